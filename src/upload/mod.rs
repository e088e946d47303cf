//! Upload flow state machine.
//!
//! ```text
//!            drop / pick (allowed)          upload clicked
//!   Idle ───────────────────────────▶ FileSelected ─────────────▶ Uploading
//!    ▲  ◀─────────────────────────────────┘ drop (rejected)          │
//!    └──────────────────────────────────────────────────────────────-┘
//!                        progress bar finished
//! ```
//!
//! The transfer is simulated; an upload always succeeds once started.

use serde::{Deserialize, Serialize};

use crate::config::UploadConfig;
use crate::error::{GalaxyError, GalaxyResult};
use crate::notify::Notifier;

/// Message shown when a file fails the extension check.
pub const INVALID_FILE_MESSAGE: &str = "Invalid file type. Please upload .tsp, .csv, or .json files.";

/// CSS `display` of the upload modal while it is open.
pub const MODAL_DISPLAY: &str = "block";

/// Where the upload flow currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UploadState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A valid file waits for the upload action.
    FileSelected { file_name: String },
    /// The simulated progress bar is running.
    Uploading { file_name: String },
}

impl UploadState {
    /// Name of the file being handled, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::FileSelected { file_name } | Self::Uploading { file_name } => Some(file_name),
        }
    }
}

/// Outcome of offering files to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The first file was accepted and is now selected.
    Selected(String),
    /// Nothing to do: empty file list, or an upload is in progress.
    Ignored,
}

/// Upload flow with its extension allow-list.
#[derive(Debug, Clone)]
pub struct UploadFlow {
    state: UploadState,
    allowed_extensions: Vec<String>,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

impl UploadFlow {
    /// Create an idle flow.
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            state: UploadState::Idle,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &UploadState {
        &self.state
    }

    /// Whether `file_name` ends with an allowed extension (case-insensitive).
    #[must_use]
    pub fn is_allowed(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.allowed_extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    /// Offer dropped or picked files. Only the first one is considered.
    ///
    /// # Errors
    ///
    /// Returns a validation error, after emitting one error toast, when the
    /// first file has a disallowed extension. The flow is then `Idle`.
    pub fn offer<S, N>(&mut self, file_names: &[S], notifier: &mut N) -> GalaxyResult<Selection>
    where
        S: AsRef<str>,
        N: Notifier + ?Sized,
    {
        if matches!(self.state, UploadState::Uploading { .. }) {
            log::warn!("ignoring file selection while an upload is in progress");
            return Ok(Selection::Ignored);
        }
        let Some(first) = file_names.first() else {
            return Ok(Selection::Ignored);
        };
        let name = first.as_ref();

        if self.is_allowed(name) {
            log::info!("selected '{name}' for upload");
            self.state = UploadState::FileSelected {
                file_name: name.to_string(),
            };
            Ok(Selection::Selected(name.to_string()))
        } else {
            self.state = UploadState::Idle;
            notifier.error(INVALID_FILE_MESSAGE);
            Err(GalaxyError::validation(format!(
                "'{name}' is not one of {}",
                self.allowed_extensions.join(", ")
            )))
        }
    }

    /// Start the simulated transfer of the selected file.
    ///
    /// Returns the file name, or `None` when nothing is selected.
    pub fn begin_upload(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            UploadState::FileSelected { file_name } => {
                self.state = UploadState::Uploading {
                    file_name: file_name.clone(),
                };
                Some(file_name)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Finish the transfer: success toast, back to `Idle`.
    ///
    /// Returns the uploaded file name, or `None` when no upload was running.
    pub fn complete_upload<N: Notifier + ?Sized>(&mut self, notifier: &mut N) -> Option<String> {
        match std::mem::take(&mut self.state) {
            UploadState::Uploading { file_name } => {
                notifier.success(&format!("File \"{file_name}\" uploaded successfully!"));
                Some(file_name)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}
