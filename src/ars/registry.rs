//! Lazily loaded, shared municipality directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use super::parser::{ArsCodes, parse_file};
use super::{ArsError, ArsResult};

/// Shared view on the parsed directory.
///
/// The file is read on first use. Clones share the same cache.
#[derive(Clone)]
pub struct ArsRegistry {
    path: PathBuf,
    codes: Arc<OnceCell<Arc<ArsCodes>>>,
}

impl ArsRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codes: Arc::new(OnceCell::new()),
        }
    }

    /// Registry over codes that are already in memory.
    pub fn from_codes(codes: ArsCodes) -> Self {
        Self {
            path: PathBuf::new(),
            codes: Arc::new(OnceCell::new_with(Some(Arc::new(codes)))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All codes, loading the file if needed.
    pub async fn codes(&self) -> ArsResult<Arc<ArsCodes>> {
        let codes = self
            .codes
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let codes = tokio::task::spawn_blocking(move || parse_file(&path))
                    .await
                    .map_err(|e| std::io::Error::other(e.to_string()))??;
                info!(count = codes.len(), "ARS codes loaded");
                Ok::<_, ArsError>(Arc::new(codes))
            })
            .await?;

        Ok(Arc::clone(codes))
    }

    /// Regional key of a municipality, matched case-insensitively.
    pub async fn lookup(&self, municipality: &str) -> ArsResult<Option<String>> {
        let codes = self.codes().await?;
        let wanted = municipality.trim().to_lowercase();

        Ok(codes
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, ars)| ars.clone()))
    }

    /// Municipalities whose name contains `fragment`, ignoring case.
    pub async fn search(&self, fragment: &str) -> ArsResult<BTreeMap<String, String>> {
        let codes = self.codes().await?;
        let wanted = fragment.trim().to_lowercase();

        Ok(codes
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&wanted))
            .map(|(name, ars)| (name.clone(), ars.clone()))
            .collect())
    }
}
