//! Slash-delimited category paths.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Deepest category chain the storefront will follow.
///
/// Applies both to incoming paths and to the parent walk that builds
/// breadcrumbs.
pub const MAX_DEPTH: usize = 32;

/// Reasons a raw path string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugPathError {
    #[error("path contains no segments")]
    Empty,
    #[error("path has {0} segments, at most {MAX_DEPTH} are allowed")]
    TooDeep(usize),
}

/// A parsed category path such as `rental/led-screen/indoor`.
///
/// Always holds between 1 and [`MAX_DEPTH`] non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlugPath {
    segments: Vec<String>,
}

impl SlugPath {
    /// Parse a raw path, discarding empty segments.
    ///
    /// Leading, trailing and doubled slashes are therefore ignored:
    /// `/rental//led-screen/` parses the same as `rental/led-screen`.
    ///
    /// # Errors
    ///
    /// Returns `SlugPathError::Empty` if no segment survives and
    /// `SlugPathError::TooDeep` if more than [`MAX_DEPTH`] remain.
    pub fn parse(raw: &str) -> Result<Self, SlugPathError> {
        let segments: Vec<String> = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        if segments.is_empty() {
            return Err(SlugPathError::Empty);
        }
        if segments.len() > MAX_DEPTH {
            return Err(SlugPathError::TooDeep(segments.len()));
        }

        Ok(Self { segments })
    }

    /// Segments from root to leaf.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl std::fmt::Display for SlugPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl std::str::FromStr for SlugPath {
    type Err = SlugPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SlugPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
