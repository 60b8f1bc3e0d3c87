//! Image upload storage

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Public path prefix under which stored images are served
pub const IMAGES_ROUTE: &str = "/fs/images";

#[derive(Clone)]
pub struct ImageService {
    dir: PathBuf,
    public_url: String,
}

impl ImageService {
    pub fn new(dir: PathBuf, public_url: &str) -> Self {
        Self {
            dir,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store the bytes under a fresh random name and return the public URL
    pub async fn save(&self, data: &[u8], content_type: Option<&str>) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::BadRequest("Empty image body".to_string()));
        }

        let name = format!("{}.{}", Uuid::new_v4().simple(), extension_for(content_type));

        self.ensure_dir().await?;
        tokio::fs::write(self.dir.join(&name), data).await?;
        tracing::debug!("Stored image {} ({} bytes)", name, data.len());

        Ok(format!("{}{}/{}", self.public_url, IMAGES_ROUTE, name))
    }

    /// Directory holding the stored images
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase());

    match mime.as_deref() {
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/svg+xml") => "svg",
        _ => "jpeg",
    }
}
