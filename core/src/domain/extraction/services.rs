use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    extraction::{
        entities::{ExtractionCandidate, ExtractionMethod, PantryImageUpload, UploadStatus},
        parse::{candidates_from_model_json, candidates_from_text, VISION_CANDIDATE_CAP},
        ports::{OcrEngine, PantryUploadRepository},
    },
    recipes::ports::GenerativeClient,
    storage::ports::ObjectStoragePort,
    user::value_objects::Identity,
};

const VISION_SYSTEM_PROMPT: &str = "Extract grocery/ingredient items from the image. \
Normalize names. If a quantity or unit is not obvious, leave it empty. \
Return STRICT JSON: {\"items\":[{\"name\":\"string\",\"quantity\":\"string\",\"unit\":\"string\"}]}.";

const VISION_USER_PROMPT: &str = "Extract up to 40 items.";

/// Shown when nothing could be read from the photo, so the review page
/// always has rows to demonstrate the flow with.
fn demo_candidates() -> Vec<ExtractionCandidate> {
    vec![
        ExtractionCandidate::new("bell pepper", "2", "pcs"),
        ExtractionCandidate::new("chicken breast", "200", "g"),
        ExtractionCandidate::new("onion", "1", "pc"),
    ]
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

/// Pantry-photo ingestion: store the image, then walk the extraction
/// ladder (OCR, vision with inline bytes, vision by URL, demo list)
/// until one stage yields candidates. Stage failures are absorbed; the
/// upload itself only fails if the image cannot be stored.
#[derive(Debug, Clone)]
pub struct ExtractionService<E, G, R, O>
where
    E: OcrEngine,
    G: GenerativeClient,
    R: PantryUploadRepository,
    O: ObjectStoragePort,
{
    ocr: E,
    generative: G,
    upload_repository: R,
    object_storage: O,
}

impl<E, G, R, O> ExtractionService<E, G, R, O>
where
    E: OcrEngine,
    G: GenerativeClient,
    R: PantryUploadRepository,
    O: ObjectStoragePort,
{
    pub fn new(ocr: E, generative: G, upload_repository: R, object_storage: O) -> Self {
        Self {
            ocr,
            generative,
            upload_repository,
            object_storage,
        }
    }

    pub async fn upload_and_extract(
        &self,
        identity: &Identity,
        payload: Bytes,
        content_type: String,
    ) -> Result<PantryImageUpload, CoreError> {
        if !content_type.starts_with("image/") {
            return Err(CoreError::Invalid(format!(
                "unsupported upload content type '{content_type}'"
            )));
        }
        if payload.is_empty() {
            return Err(CoreError::Invalid("empty upload".into()));
        }

        let object_key = format!(
            "pantry_uploads/{}.{}",
            Uuid::new_v4(),
            extension_for(&content_type)
        );
        let object_key = self
            .object_storage
            .put_object(object_key, payload.clone(), content_type.clone())
            .await?;

        let upload = self
            .upload_repository
            .create(PantryImageUpload::new(
                identity.id(),
                object_key.clone(),
                content_type.clone(),
            ))
            .await?;

        let (candidates, method) = self
            .extract_candidates(payload, &content_type, &object_key)
            .await;
        tracing::info!(
            "extracted {} candidates via {} for upload {}",
            candidates.len(),
            method.as_str(),
            upload.id
        );

        let mut upload = upload;
        upload.status = UploadStatus::Done;
        upload.method = Some(method);
        upload.candidates = candidates;
        self.upload_repository.update(upload).await
    }

    async fn extract_candidates(
        &self,
        payload: Bytes,
        content_type: &str,
        object_key: &str,
    ) -> (Vec<ExtractionCandidate>, ExtractionMethod) {
        match self.ocr.extract_text(payload.clone()).await {
            Ok(text) if !text.trim().is_empty() => {
                let candidates = candidates_from_text(&text);
                if !candidates.is_empty() {
                    return (candidates, ExtractionMethod::Ocr);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("OCR stage failed: {}", e),
        }

        match self
            .generative
            .generate_with_image_bytes(
                VISION_SYSTEM_PROMPT.to_string(),
                VISION_USER_PROMPT.to_string(),
                payload.to_vec(),
                content_type.to_string(),
            )
            .await
        {
            Ok(reply) => {
                let mut candidates = candidates_from_model_json(&reply);
                candidates.truncate(VISION_CANDIDATE_CAP);
                if !candidates.is_empty() {
                    return (candidates, ExtractionMethod::VisionInline);
                }
            }
            Err(e) => tracing::warn!("vision (inline) stage failed: {}", e),
        }

        let image_url = self.object_storage.object_url(object_key);
        match self
            .generative
            .generate_with_image_url(
                VISION_SYSTEM_PROMPT.to_string(),
                VISION_USER_PROMPT.to_string(),
                image_url,
            )
            .await
        {
            Ok(reply) => {
                let mut candidates = candidates_from_model_json(&reply);
                candidates.truncate(VISION_CANDIDATE_CAP);
                if !candidates.is_empty() {
                    return (candidates, ExtractionMethod::VisionUrl);
                }
            }
            Err(e) => tracing::warn!("vision (url) stage failed: {}", e),
        }

        tracing::info!("no items detected; using the demo list");
        (demo_candidates(), ExtractionMethod::Demo)
    }

    /// Reload an upload's candidates for the review page.
    pub async fn get(
        &self,
        identity: &Identity,
        id: Uuid,
    ) -> Result<PantryImageUpload, CoreError> {
        self.upload_repository
            .get_by_id(id, identity.id())
            .await?
            .ok_or(CoreError::NotFound)
    }

    pub async fn history(&self, identity: &Identity) -> Result<Vec<PantryImageUpload>, CoreError> {
        self.upload_repository.list_by_user(identity.id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            username: "tester".into(),
        }
    }

    struct FakeOcr {
        text: &'static str,
    }

    impl OcrEngine for FakeOcr {
        async fn extract_text(&self, _image: Bytes) -> Result<String, CoreError> {
            Ok(self.text.to_string())
        }
    }

    #[derive(Default)]
    struct FakeVision {
        inline_reply: &'static str,
        url_reply: &'static str,
    }

    impl GenerativeClient for FakeVision {
        async fn generate_text(
            &self,
            _system_prompt: String,
            _user_prompt: String,
        ) -> Result<String, CoreError> {
            Ok(String::new())
        }

        async fn generate_with_image_bytes(
            &self,
            _system_prompt: String,
            _user_prompt: String,
            _image_data: Vec<u8>,
            _mime_type: String,
        ) -> Result<String, CoreError> {
            Ok(self.inline_reply.to_string())
        }

        async fn generate_with_image_url(
            &self,
            _system_prompt: String,
            _user_prompt: String,
            _image_url: String,
        ) -> Result<String, CoreError> {
            Ok(self.url_reply.to_string())
        }

        async fn generate_image(&self, _prompt: String) -> Result<Option<String>, CoreError> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct FakeUploadRepository {
        rows: Mutex<Vec<PantryImageUpload>>,
    }

    impl PantryUploadRepository for FakeUploadRepository {
        async fn create(
            &self,
            upload: PantryImageUpload,
        ) -> Result<PantryImageUpload, CoreError> {
            self.rows.lock().unwrap().push(upload.clone());
            Ok(upload)
        }

        async fn update(
            &self,
            upload: PantryImageUpload,
        ) -> Result<PantryImageUpload, CoreError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows.iter_mut().find(|u| u.id == upload.id) {
                *existing = upload.clone();
            }
            Ok(upload)
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PantryImageUpload>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn get_by_id(
            &self,
            id: Uuid,
            user_id: Uuid,
        ) -> Result<Option<PantryImageUpload>, CoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id && u.user_id == user_id)
                .cloned())
        }
    }

    struct FakeStorage;

    impl ObjectStoragePort for FakeStorage {
        async fn put_object(
            &self,
            object_key: String,
            _payload: Bytes,
            _content_type: String,
        ) -> Result<String, CoreError> {
            Ok(object_key)
        }

        async fn get_object(&self, _object_key: String) -> Result<Bytes, CoreError> {
            Ok(Bytes::new())
        }

        fn object_url(&self, object_key: &str) -> String {
            format!("http://storage.local/{object_key}")
        }
    }

    fn service(
        ocr_text: &'static str,
        vision: FakeVision,
    ) -> ExtractionService<FakeOcr, FakeVision, FakeUploadRepository, FakeStorage> {
        ExtractionService::new(
            FakeOcr { text: ocr_text },
            vision,
            FakeUploadRepository::default(),
            FakeStorage,
        )
    }

    fn jpeg_payload() -> Bytes {
        Bytes::from_static(b"\xff\xd8\xff\xe0fake")
    }

    #[tokio::test]
    async fn readable_ocr_text_wins_the_ladder() {
        let svc = service("2 bell pepper\n200 g chicken breast", FakeVision::default());

        let upload = svc
            .upload_and_extract(&identity(), jpeg_payload(), "image/jpeg".into())
            .await
            .unwrap();

        assert_eq!(upload.status, UploadStatus::Done);
        assert_eq!(upload.method, Some(ExtractionMethod::Ocr));
        assert_eq!(upload.candidates.len(), 2);
        assert_eq!(upload.candidates[0].name, "bell pepper");
    }

    #[tokio::test]
    async fn blank_ocr_falls_through_to_inline_vision() {
        let svc = service(
            "   ",
            FakeVision {
                inline_reply: r#"{"items":[{"name":"rice","quantity":"1","unit":"kg"}]}"#,
                url_reply: "",
            },
        );

        let upload = svc
            .upload_and_extract(&identity(), jpeg_payload(), "image/png".into())
            .await
            .unwrap();

        assert_eq!(upload.method, Some(ExtractionMethod::VisionInline));
        assert_eq!(upload.candidates[0].name, "rice");
    }

    #[tokio::test]
    async fn unreadable_image_ends_on_the_demo_list() {
        let svc = service("", FakeVision::default());

        let upload = svc
            .upload_and_extract(&identity(), jpeg_payload(), "image/jpeg".into())
            .await
            .unwrap();

        assert_eq!(upload.method, Some(ExtractionMethod::Demo));
        assert_eq!(upload.candidates.len(), 3);
        assert_eq!(upload.candidates[0].name, "bell pepper");
    }

    #[tokio::test]
    async fn non_image_uploads_are_rejected() {
        let svc = service("", FakeVision::default());

        let result = svc
            .upload_and_extract(&identity(), jpeg_payload(), "application/pdf".into())
            .await;

        assert!(matches!(result, Err(CoreError::Invalid(_))));
    }
}
