//! View definition persistence.
//!
//! Named views live in the platform-specific config directory:
//! - Linux: ~/.config/rowdeck/views/<name>.json
//! - macOS: ~/Library/Application Support/rowdeck/views/<name>.json
//! - Windows: %APPDATA%/rowdeck/views/<name>.json

use std::path::{Path, PathBuf};

use rowdeck_domain::ViewSettings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable};

const VIEW_EXTENSION: &str = "json";

/// Error type for view definition operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewRepositoryError {
    /// No view file exists at the resolved location.
    #[error("view not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error during file operations.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid view definition.
    #[error("invalid view definition {}: {source}", path.display())]
    Invalid {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        source: SerializationError,
    },

    /// The view could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// A view name contained path separators or was empty.
    #[error("invalid view name: {0:?}")]
    InvalidName(String),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Loads and saves view definitions.
#[derive(Debug, Clone, Default)]
pub struct ViewRepository {
    root: Option<PathBuf>,
}

impl ViewRepository {
    /// Creates a repository rooted in the user's config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Self::default_root(),
        }
    }

    /// Creates a repository rooted at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Returns the default views directory, if a config directory exists.
    #[must_use]
    pub fn default_root() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rowdeck").join("views"))
    }

    /// Returns the views directory of this repository.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolves a view reference to a file path.
    ///
    /// References that name an existing file, or that look like a path
    /// (contain a separator or end in `.json`), are used as paths. Anything
    /// else is a view name looked up in the views directory.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for an empty reference and `NoConfigDir` if a
    /// name is given but no views directory is known.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, ViewRepositoryError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ViewRepositoryError::InvalidName(reference.to_string()));
        }

        let candidate = Path::new(reference);
        let looks_like_path = candidate.components().count() > 1
            || candidate
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(VIEW_EXTENSION));
        if looks_like_path || candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }

        self.named_path(reference)
    }

    /// Returns the file path of a named view.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if `name` is empty or contains a path
    /// separator, and `NoConfigDir` if no views directory is known.
    pub fn named_path(&self, name: &str) -> Result<PathBuf, ViewRepositoryError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ViewRepositoryError::InvalidName(name.to_string()));
        }
        let root = self.root.as_ref().ok_or(ViewRepositoryError::NoConfigDir)?;
        Ok(root.join(format!("{name}.{VIEW_EXTENSION}")))
    }

    /// Loads a view by name or path.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved, the file is
    /// missing or unreadable, or it is not a valid view definition.
    pub async fn load(&self, reference: &str) -> Result<ViewSettings, ViewRepositoryError> {
        let path = self.resolve(reference)?;
        Self::load_path(&path).await
    }

    /// Loads a view definition file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Io`, or `Invalid`.
    pub async fn load_path(path: &Path) -> Result<ViewSettings, ViewRepositoryError> {
        let content = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ViewRepositoryError::NotFound(path.to_path_buf())
            } else {
                ViewRepositoryError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let settings = from_json_bytes(&content).map_err(|source| ViewRepositoryError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(event = "view.loaded", path = %path.display());
        Ok(settings)
    }

    /// Saves a view under `name` and returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the view cannot be
    /// serialized, or the file cannot be written.
    pub async fn save(
        &self,
        name: &str,
        settings: &ViewSettings,
    ) -> Result<PathBuf, ViewRepositoryError> {
        let path = self.named_path(name)?;
        let io_error = |source| ViewRepositoryError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let content = to_json_stable(settings)?;
        fs::write(&path, content).await.map_err(io_error)?;

        debug!(event = "view.saved", path = %path.display());
        Ok(path)
    }
}
