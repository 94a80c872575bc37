use uuid::Uuid;

/// Authenticated caller, resolved by the API layer's auth middleware.
/// Authentication itself is an external concern; the core only needs a
/// stable owner id to scope rows by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl Identity {
    pub fn id(&self) -> Uuid {
        self.user_id
    }
}
