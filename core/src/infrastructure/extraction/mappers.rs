use serde_json::Value;

use crate::{
    domain::extraction::entities::{
        ExtractionCandidate, ExtractionMethod, PantryImageUpload, UploadStatus,
    },
    entity::pantry_image_uploads,
};

impl From<&pantry_image_uploads::Model> for PantryImageUpload {
    fn from(model: &pantry_image_uploads::Model) -> Self {
        let candidates: Vec<ExtractionCandidate> =
            serde_json::from_value(model.candidates.clone()).unwrap_or_default();

        Self {
            id: model.id,
            user_id: model.user_id,
            object_key: model.object_key.clone(),
            content_type: model.content_type.clone(),
            status: UploadStatus::parse(&model.status).unwrap_or(UploadStatus::Failed),
            method: model.method.as_deref().and_then(ExtractionMethod::parse),
            candidates,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<pantry_image_uploads::Model> for PantryImageUpload {
    fn from(model: pantry_image_uploads::Model) -> Self {
        Self::from(&model)
    }
}

pub fn candidates_json(candidates: &[ExtractionCandidate]) -> Value {
    serde_json::to_value(candidates).unwrap_or(Value::Array(Vec::new()))
}
