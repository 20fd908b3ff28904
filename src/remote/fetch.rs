//! Artifact retrieval: streaming download, checksum verification, and gzip
//! decompression into scoped staging files.
//!
//! The compressed body is drained to a temporary file, verified against the
//! repository's `.sha1` sidecar when one is published, then decompressed into a
//! second temporary file that backs [`MappingArtifact`]. Both staging files are
//! scoped: the compressed one is removed when the fetch returns, the decompressed
//! one when the artifact is dropped; the staged bytes have no further use once
//! the table is decoded.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

use flate2::read::GzDecoder;
use reqwest::blocking::{Client, Response};
use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::BuildId;
use crate::{Error, Result};

/// A fetched, decompressed mapping artifact staged in a scoped temporary file.
///
/// The staging file is deleted when the artifact is dropped, so decode the
/// artifact before letting it go out of scope.
pub struct MappingArtifact {
    staging: NamedTempFile,
}

impl MappingArtifact {
    /// Buffered reader over the decompressed mapping text, positioned at the
    /// start of the stream. Each call opens an independent cursor.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the staging file cannot be reopened.
    pub fn reader(&self) -> Result<BufReader<File>> {
        Ok(BufReader::new(self.staging.reopen()?))
    }
}

/// Deterministic artifact path for one build, relative to the repository root.
fn artifact_url(base_url: &str, build: &BuildId) -> String {
    format!("{base_url}/{build}/yarn-{build}-tiny.gz")
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download(format!("GET {url} returned {status}")));
    }
    Ok(response)
}

/// Fetch a small text document, e.g. the version index.
pub(crate) fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = check_status(client.get(url).send()?, url)?;
    Ok(response.text()?)
}

/// Fetch, verify, and decompress the mapping artifact for `build`.
pub(crate) fn fetch_artifact(client: &Client, base_url: &str, build: &BuildId) -> Result<MappingArtifact> {
    let url = artifact_url(base_url, build);
    debug!(url = %url, "downloading mapping artifact");

    let mut compressed = NamedTempFile::new()?;
    let mut response = check_status(client.get(&url).send()?, &url)?;
    io::copy(&mut response, compressed.as_file_mut())
        .map_err(|error| Error::Download(format!("GET {url} failed mid-stream - {error}")))?;

    verify_checksum(client, &url, compressed.as_file_mut())?;

    compressed.as_file_mut().seek(SeekFrom::Start(0))?;
    let mut decoder = GzDecoder::new(BufReader::new(compressed.as_file_mut()));
    let mut staging = NamedTempFile::new()?;
    io::copy(&mut decoder, staging.as_file_mut()).map_err(|error| Error::Decompression(error.to_string()))?;

    Ok(MappingArtifact { staging })
}

/// Verify the artifact's `.sha1` sidecar against the compressed bytes.
///
/// Maven repositories publish a hex digest (optionally followed by a file name)
/// next to every artifact. A repository that does not publish one is tolerated;
/// a digest that does not match is a download failure.
fn verify_checksum(client: &Client, artifact_url: &str, file: &mut File) -> Result<()> {
    let sidecar_url = format!("{artifact_url}.sha1");
    let response = client.get(&sidecar_url).send()?;
    if !response.status().is_success() {
        warn!(url = %sidecar_url, status = %response.status(), "repository publishes no checksum, skipping verification");
        return Ok(());
    }

    let body = response.text()?;
    let expected = body
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::Download(format!("empty checksum sidecar at {sidecar_url}")))?;

    let actual = sha1_hex(file)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(Error::Download(format!(
            "checksum mismatch for {artifact_url}: expected {expected}, got {actual}"
        )));
    }

    debug!(url = %artifact_url, "artifact checksum verified");
    Ok(())
}

/// Hex SHA-1 of the file's contents, streamed from the start.
fn sha1_hex(file: &mut File) -> Result<String> {
    file.seek(SeekFrom::Start(0))?;

    let mut hasher = Sha1::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
