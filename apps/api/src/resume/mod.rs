//! Resume text extraction.
//!
//! Uploads are spooled to a temporary file (removed on drop) and parsed with
//! `pdf-extract` on the blocking pool.

use std::io::Write;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::info;

pub async fn extract_pdf_text(pdf: Bytes) -> Result<String> {
    let text = tokio::task::spawn_blocking(move || -> Result<String> {
        let mut spool = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile()
            .context("Failed to create upload spool file")?;
        spool.write_all(&pdf).context("Failed to write upload")?;
        spool.flush()?;

        pdf_extract::extract_text(spool.path())
            .map_err(|e| anyhow::anyhow!("PDF extraction error: {e}"))
    })
    .await
    .context("PDF extraction task panicked")??;

    info!(chars = text.len(), "PDF read successfully");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_pdf_bytes_are_an_error() {
        let result = extract_pdf_text(Bytes::from_static(b"plain text, not a pdf")).await;
        assert!(result.is_err());
    }
}
