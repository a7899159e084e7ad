use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Maximum document size accepted for upload: 10MB
pub const MAX_DOCUMENT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Document extensions the service accepts, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "png", "jpg", "jpeg", "txt"];

/// A contract document plus the user's description of what they expect from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub document: Vec<u8>,
    pub expectations: String,
}

impl AnalysisRequest {
    pub fn new(
        file_name: impl Into<String>,
        document: Vec<u8>,
        expectations: impl Into<String>,
    ) -> Self {
        Self { file_name: file_name.into(), document, expectations: expectations.into() }
    }

    /// Read the document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The extension is not one of [`ALLOWED_EXTENSIONS`]
    /// - The file cannot be opened or read
    /// - The file is larger than 10MB
    /// - The path has no file name component
    pub fn from_path(path: &Path, expectations: impl Into<String>) -> Result<Self> {
        check_extension(path)?;
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read document metadata: {}", path.display()))?;
        if metadata.len() > MAX_DOCUMENT_SIZE_BYTES {
            bail!(
                "Document too large: {} ({} bytes, max {} bytes)",
                path.display(),
                metadata.len(),
                MAX_DOCUMENT_SIZE_BYTES
            );
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("Document path has no file name: {}", path.display()))?;
        let document = fs::read(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        Ok(Self::new(file_name, document, expectations))
    }

    /// Check that both the document and the expectations are present
    pub fn validate(&self) -> Result<()> {
        if self.document.is_empty() {
            bail!("Document {} is empty", self.file_name);
        }
        if self.expectations.trim().is_empty() {
            bail!("Describe your expectations before submitting the contract");
        }
        Ok(())
    }
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path.extension().map(|ext| ext.to_string_lossy().to_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => bail!(
            "Unsupported document type: {} (expected one of .{})",
            path.display(),
            ALLOWED_EXTENSIONS.join(", .")
        ),
    }
}
