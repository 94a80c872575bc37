use crate::{domain::pantry::entities::Ingredient, entity::ingredients};

impl From<&ingredients::Model> for Ingredient {
    fn from(model: &ingredients::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name.clone(),
            quantity: model.quantity.clone(),
            unit: model.unit.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self::from(&model)
    }
}
