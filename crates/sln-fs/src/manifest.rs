//! Format-agnostic manifest loading

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, io};

/// Serialization formats a manifest may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Detect the format from the extension of `path`, case-insensitively.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedManifest {
                path: path.to_native(),
                extension: extension.to_string(),
            }),
        }
    }

    fn deserialize<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Loads manifests in whichever format their extension names.
#[derive(Debug, Default)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and deserialize the manifest at `path`.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = ManifestFormat::from_path(path)?;
        let content = io::read_text(path)?;
        Self::parse_as(format, path, &content)
    }

    /// Deserialize `content` as if it had been read from `path`.
    pub fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
        Self::parse_as(ManifestFormat::from_path(path)?, path, content)
    }

    fn parse_as<T: DeserializeOwned>(
        format: ManifestFormat,
        path: &NormalizedPath,
        content: &str,
    ) -> Result<T> {
        format.deserialize(content).map_err(|message| Error::ManifestParse {
            path: path.to_native(),
            format,
            message,
        })
    }
}
