//! Delivery: handing an encoded artifact to the environment under a timestamped name.
//!
//! Browser hosts deliver through their own download plumbing and only need
//! [`file_name_now`]. Native hosts use [`FileDelivery`], which writes the
//! artifact into a directory.

#[cfg(test)]
#[path = "deliver_test.rs"]
mod deliver_test;

use std::path::PathBuf;

use time::OffsetDateTime;

use crate::consts::FILE_STEM;
use crate::export::{Artifact, ExportFormat};

/// Error returned by a [`DeliverySink`].
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Writing the artifact failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One-shot handoff of an artifact to the user.
pub trait DeliverySink {
    /// Deliver `artifact` as `file_name`. Returns where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the handoff fails.
    fn deliver(&mut self, artifact: &Artifact, file_name: &str) -> Result<PathBuf, DeliveryError>;
}

/// Writes artifacts into a directory.
#[derive(Debug, Clone)]
pub struct FileDelivery {
    dir: PathBuf,
}

impl FileDelivery {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl DeliverySink for FileDelivery {
    fn deliver(&mut self, artifact: &Artifact, file_name: &str) -> Result<PathBuf, DeliveryError> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, &artifact.bytes).map_err(|source| DeliveryError::Io { path: path.clone(), source })?;
        tracing::info!(path = %path.display(), mime = artifact.mime_type(), bytes = artifact.bytes.len(), "artifact delivered");
        Ok(path)
    }
}

/// File name for an export taken at `at`: `firma-digital-YYYYMMDD-HHMMSS.<ext>`.
#[must_use]
pub fn file_name(format: ExportFormat, at: OffsetDateTime) -> String {
    format!(
        "{FILE_STEM}-{:04}{:02}{:02}-{:02}{:02}{:02}.{}",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
        format.extension(),
    )
}

/// File name for an export taken now, on the local clock.
///
/// Falls back to UTC when the local offset cannot be determined.
#[must_use]
pub fn file_name_now(format: ExportFormat) -> String {
    let now = match OffsetDateTime::now_local() {
        Ok(now) => now,
        Err(e) => {
            tracing::warn!(error = %e, "local UTC offset unavailable; naming export with UTC time");
            OffsetDateTime::now_utc()
        }
    };
    file_name(format, now)
}
