//! Checklist documents
//!
//! A document is the authored form of a checklist: a title, optional
//! description and submission URL, and the sections. Documents are read from
//! JSON or YAML, picked by file extension.

use crate::model::{Checklist, ChecklistSection};
use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Authored checklist definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDocument {
    /// Heading shown above the checklist
    pub title: String,

    /// Longer explanation of what is being verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where submission happens once the gate opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<String>,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<ChecklistSection>,
}

/// Serialization format of a document file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    /// Returns [`DocumentError::UnsupportedFormat`] for anything other than
    /// `.json`, `.yaml` or `.yml`
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl ChecklistDocument {
    /// Parse a document from text
    ///
    /// # Errors
    /// Returns a JSON or YAML syntax error
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        match format {
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        }
    }

    /// Parse a JSON document
    ///
    /// # Errors
    /// Returns a JSON syntax error
    #[inline]
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Self::parse(text, DocumentFormat::Json)
    }

    /// Parse a YAML document
    ///
    /// # Errors
    /// Returns a YAML syntax error
    #[inline]
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        Self::parse(text, DocumentFormat::Yaml)
    }

    /// Read and parse a document file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not parse
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&text, format)?;
        tracing::debug!(
            path = %path.display(),
            sections = document.sections.len(),
            "loaded checklist document"
        );
        Ok(document)
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    /// Returns a serialization error
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as YAML
    ///
    /// # Errors
    /// Returns a serialization error
    pub fn to_yaml_string(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Every structural defect, without failing
    #[must_use]
    pub fn diagnose(&self) -> Vec<ValidationError> {
        validation::validate(&self.sections.iter().cloned().collect())
    }

    /// Build the validated checklist
    ///
    /// # Errors
    /// Returns the first structural defect
    pub fn to_checklist(&self) -> Result<Checklist, ValidationError> {
        Checklist::validated(self.sections.iter().cloned())
    }
}

/// Errors while reading a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not one of the supported formats
    #[error("unsupported document format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    /// JSON syntax or shape error
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML syntax or shape error
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Document parsed but violates checklist invariants
    #[error("invalid checklist: {0}")]
    Invalid(#[from] ValidationError),
}

/// Load a document file and build its validated checklist
///
/// # Errors
/// Returns any read, parse or validation error
pub fn load_checklist(
    path: impl AsRef<Path>,
) -> Result<(ChecklistDocument, Checklist), DocumentError> {
    let document = ChecklistDocument::load(path)?;
    let checklist = document.to_checklist()?;
    Ok((document, checklist))
}
