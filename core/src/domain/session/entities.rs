use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::recipes::entities::{RecipeRecord, RecipeSource};

/// The last search's normalized results for one session. Rebuilt (not
/// merged) on every search; `combined` orders AI items first, then web,
/// alphabetical by title within each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResultBundle {
    pub ai: Vec<RecipeRecord>,
    pub web: Vec<RecipeRecord>,
    pub combined: Vec<RecipeRecord>,
}

impl SearchResultBundle {
    pub fn new(ai: Vec<RecipeRecord>, web: Vec<RecipeRecord>) -> Self {
        let mut combined: Vec<RecipeRecord> = ai.iter().chain(web.iter()).cloned().collect();
        combined.sort_by_key(|r| {
            (
                match r.source {
                    RecipeSource::Ai => 0u8,
                    RecipeSource::Web => 1u8,
                },
                r.title.to_lowercase(),
            )
        });
        Self { ai, web, combined }
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    pub fn list_for(&self, source: RecipeSource) -> &[RecipeRecord] {
        match source {
            RecipeSource::Ai => &self.ai,
            RecipeSource::Web => &self.web,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, source: RecipeSource) -> RecipeRecord {
        RecipeRecord {
            id: id.into(),
            title: title.into(),
            source,
            ..Default::default()
        }
    }

    #[test]
    fn combined_orders_ai_first_then_alphabetical() {
        let bundle = SearchResultBundle::new(
            vec![
                record("z-soup", "Zucchini soup", RecipeSource::Ai),
                record("apple-pie", "apple pie", RecipeSource::Ai),
            ],
            vec![
                record("2", "Beef stew", RecipeSource::Web),
                record("1", "Aioli", RecipeSource::Web),
            ],
        );

        let titles: Vec<&str> = bundle.combined.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["apple pie", "Zucchini soup", "Aioli", "Beef stew"]);
    }
}
