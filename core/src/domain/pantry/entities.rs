use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

pub const DEFAULT_UNIT: &str = "pcs";

/// A pantry ingredient owned by a user. (user_id, lower(name)) is unique
/// so "Milk" and "milk" never duplicate for the same owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Free-text quantity, e.g. "2" or "200".
    pub quantity: String,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

impl Ingredient {
    pub fn new(user_id: Uuid, name: String, quantity: String, unit: String) -> Self {
        let (now, timestamp) = generate_timestamp();
        let unit = if unit.trim().is_empty() {
            DEFAULT_UNIT.to_string()
        } else {
            unit
        };

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            name,
            quantity,
            unit,
            created_at: now,
        }
    }
}
