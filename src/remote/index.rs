//! Version index model for the remote repository.
//!
//! The repository's `maven-metadata.xml` lists one `<version>` element per
//! published build, each of the form `<version>+build.<N>`. Locating a mapping
//! build means scanning that list for entries embedding the target binary
//! version and keeping the highest build number.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Identifier of one published mapping build: the target binary version plus a
/// monotonically increasing build number, rendered as `<version>+build.<N>`.
///
/// # Examples
///
/// ```rust
/// use mapscope::remote::BuildId;
///
/// let build = BuildId::parse("1.20.4+build.3").unwrap();
/// assert_eq!(build.version(), "1.20.4");
/// assert_eq!(build.build(), 3);
/// assert_eq!(build.to_string(), "1.20.4+build.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildId {
    version: String,
    build: u32,
}

impl BuildId {
    /// Parse a version index entry of the form `<version>+build.<N>`.
    ///
    /// Returns `None` when the entry does not follow that convention; such
    /// entries are skipped during selection, not treated as errors.
    #[must_use]
    pub fn parse(entry: &str) -> Option<BuildId> {
        let (version, suffix) = entry.split_once('+')?;
        let build = suffix.strip_prefix("build.")?.parse().ok()?;
        if version.is_empty() {
            return None;
        }
        Some(BuildId {
            version: version.to_string(),
            build,
        })
    }

    /// The embedded binary version component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The build number distinguishing artifact revisions for one version.
    #[must_use]
    pub fn build(&self) -> u32 {
        self.build
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+build.{}", self.version, self.build)
    }
}

/// `maven-metadata.xml` document root, as published by the mapping repository.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VersionIndex {
    #[serde(default)]
    versioning: Versioning,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Versioning {
    #[serde(default)]
    versions: Versions,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Versions {
    #[serde(default, rename = "version")]
    items: Vec<String>,
}

impl VersionIndex {
    pub(crate) fn parse(bytes: &[u8]) -> Result<VersionIndex> {
        quick_xml::de::from_reader(bytes).map_err(|error| Error::Download(format!("invalid version index: {error}")))
    }

    /// Select the highest-numbered build whose embedded version equals `target`.
    ///
    /// Build numbers are unique per version, so ties are impossible.
    pub(crate) fn latest_build(&self, target: &str) -> Result<BuildId> {
        let mut best: Option<BuildId> = None;
        for entry in &self.versioning.versions.items {
            let Some(candidate) = BuildId::parse(entry) else {
                debug!(entry = %entry, "skipping index entry without a build suffix");
                continue;
            };
            if candidate.version() != target {
                continue;
            }
            if best.as_ref().map_or(true, |current| candidate.build() > current.build()) {
                best = Some(candidate);
            }
        }

        best.ok_or_else(|| Error::NoMatchingBuild(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <metadata>
          <groupId>net.example</groupId>
          <artifactId>mappings</artifactId>
          <versioning>
            <latest>1.20.4+build.9</latest>
            <release>1.20.4+build.9</release>
            <versions>
              <version>1.20.3+build.3</version>
              <version>1.20.3+build.7</version>
              <version>1.20.4+build.9</version>
              <version>experimental-snapshot</version>
            </versions>
            <lastUpdated>20240101010101</lastUpdated>
          </versioning>
        </metadata>
    "#;

    #[test]
    fn selection_is_monotonic_per_version() {
        let index = VersionIndex::parse(SAMPLE.as_bytes()).unwrap();
        let build = index.latest_build("1.20.3").unwrap();
        // Highest build for the target version, never another version's higher build.
        assert_eq!(build, BuildId::parse("1.20.3+build.7").unwrap());
    }

    #[test]
    fn no_matching_build() {
        let index = VersionIndex::parse(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(
            index.latest_build("1.99.0"),
            Err(Error::NoMatchingBuild(version)) if version == "1.99.0"
        ));
    }

    #[test]
    fn build_number_beats_lexical_order() {
        // "build.10" sorts below "build.9" lexically but must win numerically.
        let xml = "<metadata><versioning><versions>\
                   <version>1.20.4+build.9</version>\
                   <version>1.20.4+build.10</version>\
                   </versions></versioning></metadata>";
        let index = VersionIndex::parse(xml.as_bytes()).unwrap();
        assert_eq!(index.latest_build("1.20.4").unwrap().build(), 10);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        for entry in ["", "1.20.4", "1.20.4+rev.3", "+build.3", "1.20.4+build.x"] {
            assert!(BuildId::parse(entry).is_none(), "accepted {entry:?}");
        }
    }

    #[test]
    fn unparseable_index_is_a_download_error() {
        assert!(matches!(
            VersionIndex::parse(b"not xml at all <<<"),
            Err(Error::Download(_))
        ));
    }
}
