//! Pod manifest loading from JSON or TOML files.
//!
//! Files are read through `cap_std::fs_utf8`, matching the configuration
//! loader. The format is chosen from the file extension.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::{serde_json, toml};

use super::Pod;
use crate::error::{ManifestError, Result};

/// Supported manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ManifestFormat {
    /// Pick the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::UnsupportedFormat` when the extension is
    /// missing or not `json`/`toml`.
    pub fn from_path(path: &Utf8Path) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ManifestError::UnsupportedFormat {
                extension: String::from(extension),
            }
            .into()),
        }
    }
}

/// Decode a pod from manifest text.
///
/// `path` is only used for error reporting.
///
/// # Errors
///
/// Returns `ManifestError::ParseError` when the text is not a valid pod.
pub fn parse_pod(content: &str, format: ManifestFormat, path: &Utf8Path) -> Result<Pod> {
    let decoded = match format {
        ManifestFormat::Json => serde_json::from_str::<Pod>(content).map_err(|e| e.to_string()),
        ManifestFormat::Toml => toml::from_str::<Pod>(content).map_err(|e| e.to_string()),
    };

    decoded.map_err(|message| {
        ManifestError::ParseError {
            path: path.as_std_path().to_path_buf(),
            message,
        }
        .into()
    })
}

/// Load a pod manifest from disk.
///
/// # Errors
///
/// Returns `ManifestError::UnsupportedFormat` for unknown extensions,
/// `ManifestError::NotFound` when the file cannot be opened, and
/// `ManifestError::ParseError` when it cannot be decoded.
pub fn load_pod(path: &Utf8PathBuf) -> Result<Pod> {
    let format = ManifestFormat::from_path(path)?;

    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let not_found = || ManifestError::NotFound {
        path: path.as_std_path().to_path_buf(),
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|_| not_found())?;
    let content = dir.read_to_string(file_name).map_err(|_| not_found())?;

    parse_pod(&content, format, path)
}
