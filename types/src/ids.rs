use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentIdError {
    #[error("invalid document URI `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("document path must be absolute: {}", path.display())]
    NotAbsolute { path: PathBuf },
}

/// Stable identity of a document, independent of any editor view showing it.
///
/// Wraps a parsed (and therefore normalized) URL so two spellings of the same
/// location compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Url);

impl DocumentId {
    pub fn parse(uri: &str) -> Result<Self, DocumentIdError> {
        Url::parse(uri)
            .map(Self)
            .map_err(|e| DocumentIdError::InvalidUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            })
    }

    /// Build a `file://` identity from an absolute filesystem path.
    pub fn from_path(path: &Path) -> Result<Self, DocumentIdError> {
        Url::from_file_path(path)
            .map(Self)
            .map_err(|()| DocumentIdError::NotAbsolute {
                path: path.to_path_buf(),
            })
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Filesystem path for `file://` identities.
    #[must_use]
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.0.scheme() != "file" {
            return None;
        }
        self.0.to_file_path().ok()
    }
}

impl From<Url> for DocumentId {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
