use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

use crate::domain::{
    common::SessionConfig,
    recipes::entities::{RecipeRecord, RecipeSource},
    session::{entities::SearchResultBundle, ports::SearchResultCache},
};

struct Entry {
    stored_at: Instant,
    bundle: SearchResultBundle,
}

/// In-process TTL cache keyed by session id. Expired entries are dropped
/// lazily on access and swept on every store.
#[derive(Clone)]
pub struct InMemorySearchResultCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemorySearchResultCache {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.result_ttl_secs),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn is_live(&self, entry: &Entry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }

    async fn live_bundle(&self, session_id: &str) -> Option<SearchResultBundle> {
        let entries = self.entries.read().await;
        entries
            .get(session_id)
            .filter(|e| self.is_live(e))
            .map(|e| e.bundle.clone())
    }
}

impl SearchResultCache for InMemorySearchResultCache {
    async fn store(&self, session_id: String, bundle: SearchResultBundle) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.stored_at.elapsed() < self.ttl);
        entries.insert(
            session_id,
            Entry {
                stored_at: Instant::now(),
                bundle,
            },
        );
    }

    async fn bundle(&self, session_id: String) -> Option<SearchResultBundle> {
        self.live_bundle(&session_id).await
    }

    async fn lookup(
        &self,
        session_id: String,
        source: RecipeSource,
        id: String,
    ) -> Option<RecipeRecord> {
        let bundle = self.live_bundle(&session_id).await?;
        bundle.list_for(source).iter().find(|r| r.id == id).cloned()
    }

    async fn attach_image(&self, session_id: String, id: String, image_url: String) {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(&session_id) else {
            return;
        };
        if entry.stored_at.elapsed() >= self.ttl {
            return;
        }

        let lists = [
            &mut entry.bundle.ai,
            &mut entry.bundle.web,
            &mut entry.bundle.combined,
        ];
        for list in lists {
            for record in list.iter_mut().filter(|r| r.id == id) {
                record.image = Some(image_url.clone());
            }
        }
    }

    async fn stash_web_items(&self, session_id: String, items: Vec<RecipeRecord>) {
        if items.is_empty() {
            return;
        }
        let mut entries = self.entries.write().await;
        let existing = entries
            .get(&session_id)
            .filter(|e| self.is_live(e))
            .map(|e| e.bundle.clone())
            .unwrap_or_default();

        let mut web = existing.web;
        for item in items {
            if !web.iter().any(|r| r.id == item.id) {
                web.push(item);
            }
        }

        entries.insert(
            session_id,
            Entry {
                stored_at: Instant::now(),
                bundle: SearchResultBundle::new(existing.ai, web),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, source: RecipeSource) -> RecipeRecord {
        RecipeRecord {
            id: id.into(),
            title: id.into(),
            source,
            ..Default::default()
        }
    }

    fn cache_with_ttl(secs: u64) -> InMemorySearchResultCache {
        InMemorySearchResultCache::new(SessionConfig {
            result_ttl_secs: secs,
        })
    }

    #[tokio::test]
    async fn expired_entries_read_as_missing() {
        let cache = cache_with_ttl(0);
        cache
            .store(
                "s1".into(),
                SearchResultBundle::new(vec![record("a", RecipeSource::Ai)], vec![]),
            )
            .await;

        assert!(cache.bundle("s1".into()).await.is_none());
    }

    #[tokio::test]
    async fn attach_image_updates_every_view() {
        let cache = cache_with_ttl(60);
        cache
            .store(
                "s1".into(),
                SearchResultBundle::new(vec![record("a", RecipeSource::Ai)], vec![]),
            )
            .await;

        cache
            .attach_image("s1".into(), "a".into(), "http://img/a.jpg".into())
            .await;

        let bundle = cache.bundle("s1".into()).await.unwrap();
        assert_eq!(bundle.ai[0].image.as_deref(), Some("http://img/a.jpg"));
        assert_eq!(
            bundle.combined[0].image.as_deref(),
            Some("http://img/a.jpg")
        );
    }

    #[tokio::test]
    async fn stash_merges_without_duplicating_ids() {
        let cache = cache_with_ttl(60);
        cache
            .store(
                "s1".into(),
                SearchResultBundle::new(vec![], vec![record("1", RecipeSource::Web)]),
            )
            .await;

        cache
            .stash_web_items(
                "s1".into(),
                vec![record("1", RecipeSource::Web), record("2", RecipeSource::Web)],
            )
            .await;

        let bundle = cache.bundle("s1".into()).await.unwrap();
        assert_eq!(bundle.web.len(), 2);
    }
}
