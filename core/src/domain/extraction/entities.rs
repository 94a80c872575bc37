use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, pantry::value_objects::ReviewRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Done,
    Failed,
}

/// Which extraction stage produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Ocr,
    VisionInline,
    VisionUrl,
    Demo,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &str {
        match self {
            ExtractionMethod::Ocr => "ocr",
            ExtractionMethod::VisionInline => "vision_inline",
            ExtractionMethod::VisionUrl => "vision_url",
            ExtractionMethod::Demo => "demo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ocr" => Some(ExtractionMethod::Ocr),
            "vision_inline" => Some(ExtractionMethod::VisionInline),
            "vision_url" => Some(ExtractionMethod::VisionUrl),
            "demo" => Some(ExtractionMethod::Demo),
            _ => None,
        }
    }
}

impl UploadStatus {
    pub fn as_str(&self) -> &str {
        match self {
            UploadStatus::Pending => "pending",
            UploadStatus::Done => "done",
            UploadStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(UploadStatus::Pending),
            "done" => Some(UploadStatus::Done),
            "failed" => Some(UploadStatus::Failed),
            _ => None,
        }
    }
}

/// One proposed pantry row awaiting user review. Quantity and unit are
/// free text and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionCandidate {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

impl ExtractionCandidate {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

impl From<ExtractionCandidate> for ReviewRow {
    fn from(c: ExtractionCandidate) -> Self {
        ReviewRow {
            name: c.name,
            quantity: c.quantity,
            unit: c.unit,
        }
    }
}

/// A stored pantry photo plus whatever the extraction pipeline found in
/// it. Candidates are kept so the review page can be reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PantryImageUpload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub object_key: String,
    pub content_type: String,
    pub status: UploadStatus,
    pub method: Option<ExtractionMethod>,
    pub candidates: Vec<ExtractionCandidate>,
    pub created_at: DateTime<Utc>,
}

impl PantryImageUpload {
    pub fn new(user_id: Uuid, object_key: String, content_type: String) -> Self {
        let (now, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            object_key,
            content_type,
            status: UploadStatus::Pending,
            method: None,
            candidates: Vec::new(),
            created_at: now,
        }
    }
}
