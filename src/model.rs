//! Hardware model detection

use std::fs;
use std::path::{Path, PathBuf};

use crate::config;

/// Source of the hardware model identifier
pub trait DetectModel {
    fn detect_model(&self) -> String;
}

impl<F> DetectModel for F
where
    F: Fn() -> String,
{
    fn detect_model(&self) -> String {
        self()
    }
}

/// Reads the model from the DMI `product_version` attribute
pub struct DmiDetector {
    path: PathBuf,
}

impl DmiDetector {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(config::paths::PRODUCT_VERSION_PATH),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }
}

impl Default for DmiDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectModel for DmiDetector {
    fn detect_model(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(contents) if !contents.trim().is_empty() => contents.trim().to_string(),
            Ok(_) => {
                log::debug!("{} is empty", self.path.display());
                config::model::UNKNOWN_MODEL.to_string()
            }
            Err(e) => {
                log::debug!("Cannot read {}: {}", self.path.display(), e);
                config::model::UNKNOWN_MODEL.to_string()
            }
        }
    }
}
