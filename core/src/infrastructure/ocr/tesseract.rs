use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use tokio::process::Command;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, OcrConfig},
    extraction::ports::OcrEngine,
};

const OCR_TIMEOUT: Duration = Duration::from_secs(20);

/// Shells out to the tesseract binary. A missing binary, a failed run
/// or a run that overshoots the deadline all yield empty text so the
/// extraction ladder moves on to vision.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            command: config.tesseract_cmd,
            timeout: OCR_TIMEOUT,
        }
    }

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("pantry-ocr-{}.img", Uuid::new_v4()))
    }
}

impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, image: Bytes) -> Result<String, CoreError> {
        let path = Self::scratch_path();
        if let Err(e) = tokio::fs::write(&path, &image).await {
            tracing::warn!("failed to stage image for OCR: {}", e);
            return Ok(String::new());
        }

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.command)
                .arg(&path)
                .arg("stdout")
                .kill_on_drop(true)
                .output(),
        )
        .await;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!("failed to remove OCR scratch file: {}", e);
        }

        match output {
            Ok(Ok(output)) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(Ok(output)) => {
                tracing::warn!(
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "tesseract exited with an error"
                );
                Ok(String::new())
            }
            Ok(Err(e)) => {
                tracing::warn!(command = %self.command, "failed to run tesseract: {}", e);
                Ok(String::new())
            }
            Err(_) => {
                tracing::warn!(
                    command = %self.command,
                    "tesseract did not finish within {:?}",
                    self.timeout
                );
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn missing_binary_yields_empty_text() {
        let ocr = TesseractOcr {
            command: "/nonexistent/tesseract".into(),
            timeout: OCR_TIMEOUT,
        };
        let text = ocr.extract_text(Bytes::from_static(b"img")).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn a_stuck_process_is_cut_off_at_the_deadline() {
        // /bin/sh runs the staged file as a script, so the payload
        // stands in for a tesseract run that never returns.
        let ocr = TesseractOcr {
            command: "/bin/sh".into(),
            timeout: Duration::from_millis(200),
        };

        let started = Instant::now();
        let text = ocr
            .extract_text(Bytes::from_static(b"sleep 30\n"))
            .await
            .unwrap();

        assert_eq!(text, "");
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
