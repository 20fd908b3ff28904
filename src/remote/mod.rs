//! Remote mapping-artifact discovery and retrieval.
//!
//! Published mappings live in a Maven repository: a `maven-metadata.xml` version
//! index at the repository root lists every build identifier, and each build
//! directory holds the gzip-compressed mapping artifact plus its checksum
//! sidecar. [`MappingRepo`] is the handle over that layout: it locates the
//! right build for a target binary version and fetches its artifact into scoped
//! staging.
//!
//! All network I/O is blocking and happens on the calling thread, once, during
//! resolver construction. There are no retries, no timeouts, and no caching:
//! a transient failure surfaces as a fatal initialization error.

mod fetch;
mod index;

pub use fetch::MappingArtifact;
pub use index::BuildId;

use reqwest::blocking::Client;
use tracing::debug;

use crate::Result;

use index::VersionIndex;

/// Default repository root for published mapping artifacts.
pub const DEFAULT_REPO_URL: &str = "https://maven.fabricmc.net/net/fabricmc/yarn";

const USER_AGENT: &str = concat!("mapscope/", env!("CARGO_PKG_VERSION"));

/// Handle to the Maven repository publishing mapping artifacts.
///
/// # Examples
///
/// ```rust,no_run
/// use mapscope::remote::MappingRepo;
///
/// let repo = MappingRepo::new();
/// let build = repo.latest_build("1.20.4")?;
/// let artifact = repo.fetch(&build)?;
/// # Ok::<(), mapscope::Error>(())
/// ```
pub struct MappingRepo {
    base_url: String,
    client: Client,
}

impl MappingRepo {
    /// Repository handle over [`DEFAULT_REPO_URL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_REPO_URL)
    }

    /// Repository handle over a custom root, e.g. a mirror. A trailing slash is
    /// tolerated and stripped.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        MappingRepo {
            base_url,
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// The configured repository root, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Select the highest-numbered mapping build published for `target_version`.
    ///
    /// Fetches the repository's version index once and scans it for entries of the
    /// form `<version>+build.<N>` whose version component equals the target;
    /// the highest build number wins, never lexical order of the whole string.
    ///
    /// # Errors
    /// Returns [`crate::Error::Download`] if the index cannot be fetched or parsed
    /// and [`crate::Error::NoMatchingBuild`] if no entry embeds the target version.
    pub fn latest_build(&self, target_version: &str) -> Result<BuildId> {
        let url = format!("{}/maven-metadata.xml", self.base_url);
        debug!(url = %url, "fetching mapping version index");

        let body = fetch::fetch_text(&self.client, &url)?;
        VersionIndex::parse(body.as_bytes())?.latest_build(target_version)
    }

    /// Fetch the artifact for `build`, verify its checksum sidecar when the
    /// repository publishes one, and decompress it into scoped staging.
    ///
    /// # Errors
    /// Returns [`crate::Error::Download`] on transport failures or a checksum
    /// mismatch and [`crate::Error::Decompression`] if the body is not valid gzip.
    pub fn fetch(&self, build: &BuildId) -> Result<MappingArtifact> {
        fetch::fetch_artifact(&self.client, &self.base_url, build)
    }
}

impl Default for MappingRepo {
    fn default() -> Self {
        Self::new()
    }
}
