//! File-backed annotation service: one JSON document per image.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::model::ImageId;

use super::error::PersistError;
use super::service::AnnotationService;
use super::wire::SaveRequest;

/// Stores `<dir>/<image id>.json`, using the same payload as the remote
/// service.
#[derive(Debug, Clone)]
pub struct FileAnnotationService {
    dir: PathBuf,
}

impl FileAnnotationService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `image`.
    ///
    /// The id is percent-encoded: bytes outside `[A-Za-z0-9_.-]`, `%` itself
    /// and a leading `.` become `%XX`, so distinct ids never share a file.
    pub fn path_for(&self, image: &ImageId) -> PathBuf {
        let mut name = String::with_capacity(image.as_str().len());
        for (i, byte) in image.as_str().bytes().enumerate() {
            let keep = byte.is_ascii_alphanumeric()
                || byte == b'-'
                || byte == b'_'
                || (byte == b'.' && i > 0);
            if keep {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }
}

impl AnnotationService for FileAnnotationService {
    async fn fetch(&self, image: &ImageId) -> Result<Option<Value>, PersistError> {
        let path = self.path_for(image);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No annotation file at {:?}", path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    async fn save(&self, image: &ImageId, request: &SaveRequest) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(image);
        let json = serde_json::to_string_pretty(request)?;
        std::fs::write(&path, json)?;
        log::debug!("Wrote {} annotations to {:?}", request.annotations.len(), path);
        Ok(())
    }
}
