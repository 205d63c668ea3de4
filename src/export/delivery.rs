// src/export/delivery.rs

use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Receives finished documents. `path` is the logical location
/// (`"{Month}/{filename}"`); the return value is a link to the stored copy.
pub trait Delivery {
    fn upload(&mut self, path: &str, bytes: &[u8]) -> AppResult<String>;
}

/// Writes documents into a local folder tree (e.g. a synced share).
/// Existing files are replaced so corrected exports can be regenerated.
pub struct FolderDelivery {
    root: PathBuf,
}

impl FolderDelivery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accepts exactly `{Month}/{file}`; a separator inside the file name
    /// (e.g. a job number `45/00`) would otherwise nest the document.
    fn resolve(&self, logical: &str) -> AppResult<PathBuf> {
        let rel = Path::new(logical);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if logical.trim().is_empty() || escapes {
            return Err(AppError::Delivery {
                path: logical.to_string(),
                reason: "path must be relative and stay inside the output folder".into(),
            });
        }

        if rel.components().count() != 2 || logical.contains('\\') {
            return Err(AppError::Delivery {
                path: logical.to_string(),
                reason: "expected '<Month>/<file name>' with no separator in the file name".into(),
            });
        }

        Ok(self.root.join(rel))
    }
}

impl Delivery for FolderDelivery {
    fn upload(&mut self, path: &str, bytes: &[u8]) -> AppResult<String> {
        let target = self.resolve(path)?;

        let fail = |e: std::io::Error| AppError::Delivery {
            path: path.to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(fail)?;
        }

        // write beside the target first so a half-written file is never visible
        let tmp = target.with_extension("xlsx.part");
        fs::write(&tmp, bytes).map_err(fail)?;
        fs::rename(&tmp, &target).map_err(fail)?;

        Ok(target.to_string_lossy().to_string())
    }
}
