use std::future::Future;

use crate::domain::{
    recipes::entities::{RecipeRecord, RecipeSource},
    session::entities::SearchResultBundle,
};

/// Short-lived per-session cache of the last search's normalized results,
/// passed explicitly through the request path instead of living in
/// framework session state. Entries expire after a fixed TTL and are
/// replaced wholesale by the next search.
#[cfg_attr(test, mockall::automock)]
pub trait SearchResultCache: Send + Sync {
    fn store(
        &self,
        session_id: String,
        bundle: SearchResultBundle,
    ) -> impl Future<Output = ()> + Send;

    fn bundle(&self, session_id: String) -> impl Future<Output = Option<SearchResultBundle>> + Send;

    /// Linear string-equality scan over the relevant list; result lists
    /// are bounded (~24 items) so no indexing is warranted.
    fn lookup(
        &self,
        session_id: String,
        source: RecipeSource,
        id: String,
    ) -> impl Future<Output = Option<RecipeRecord>> + Send;

    /// Best-effort image backfill for an already-cached record, applied
    /// to every view holding the record.
    fn attach_image(
        &self,
        session_id: String,
        id: String,
        image_url: String,
    ) -> impl Future<Output = ()> + Send;

    /// Merge extra web items into the cached bundle (used by nutrition
    /// gap suggestions so detail links keep resolving).
    fn stash_web_items(
        &self,
        session_id: String,
        items: Vec<RecipeRecord>,
    ) -> impl Future<Output = ()> + Send;
}
