//! Text extraction through the Tesseract command-line tool.

use crate::config::OcrSettings;
use async_trait::async_trait;
use proofmark_core::{CollaboratorError, TextExtractor};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Runs `tesseract stdin stdout -l <langs>` on the image bytes
pub struct TesseractExtractor {
    binary: PathBuf,
}

impl TesseractExtractor {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            binary: settings.tesseract.clone(),
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_text(
        &self,
        image: &[u8],
        language_hints: &[String],
    ) -> Result<String, CollaboratorError> {
        let mut command = Command::new(&self.binary);
        command.arg("stdin").arg("stdout");
        if !language_hints.is_empty() {
            command.arg("-l").arg(language_hints.join("+"));
        }

        debug!(binary = %self.binary.display(), "spawning tesseract");
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(CollaboratorError::Process(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
