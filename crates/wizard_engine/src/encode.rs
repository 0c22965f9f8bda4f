use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use wizard_logging::{redacted, wizard_debug};

use crate::EncodeError;

#[derive(Debug, Clone)]
pub struct EncodeSettings {
    pub max_bytes: u64,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait FileEncoder: Send + Sync {
    /// Reads the file and returns its `data:` URL.
    async fn encode(&self, path: &Path) -> Result<String, EncodeError>;
}

#[derive(Debug, Clone, Default)]
pub struct DataUrlEncoder {
    settings: EncodeSettings,
}

impl DataUrlEncoder {
    pub fn new(settings: EncodeSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl FileEncoder for DataUrlEncoder {
    async fn encode(&self, path: &Path) -> Result<String, EncodeError> {
        let io_error = |err: std::io::Error| EncodeError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        };

        let meta = tokio::fs::metadata(path).await.map_err(io_error)?;
        if meta.len() > self.settings.max_bytes {
            return Err(EncodeError::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: meta.len(),
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let encoded = data_url(mime.essence_str(), &bytes);
        wizard_debug!(
            "Encoded {:?} as {} ({})",
            path.file_name().unwrap_or_default(),
            mime.essence_str(),
            redacted(&encoded)
        );
        Ok(encoded)
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
