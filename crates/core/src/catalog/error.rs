//! Errors raised while navigating the catalog.

use thiserror::Error;

use crate::types::{CategoryId, MAX_DEPTH, SlugPathError};

/// Boxed error from a [`CatalogReader`](super::CatalogReader) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure modes of catalog navigation.
///
/// `InvalidPath` and `CategoryNotFound` are the caller's fault and map to
/// 4xx responses. `MalformedHierarchy` and `Store` are server-side failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The raw path could not be parsed into segments.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        path: String,
        #[source]
        reason: SlugPathError,
    },

    /// A segment did not match an active category under the previous one.
    #[error("category {slug:?} not found at depth {depth} of {path:?}")]
    CategoryNotFound {
        /// The first segment that failed to resolve.
        slug: String,
        /// Zero-based index of that segment.
        depth: usize,
        /// The normalized path being resolved.
        path: String,
    },

    /// Parent pointers form a cycle, run too deep, or dangle.
    #[error("malformed category hierarchy at {category}: {fault}")]
    MalformedHierarchy {
        category: CategoryId,
        fault: HierarchyFault,
    },

    /// The underlying store failed.
    #[error("catalog store error: {0}")]
    Store(#[source] BoxError),
}

/// What was wrong with a parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyFault {
    #[error("ancestor chain exceeds {MAX_DEPTH} levels")]
    TooDeep,
    #[error("parent {0} does not exist")]
    MissingParent(CategoryId),
}

impl CatalogError {
    /// Wrap a store error.
    pub fn store(err: impl Into<BoxError>) -> Self {
        Self::Store(err.into())
    }

    /// Returns `true` if the error is caused by the request rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPath { .. } | Self::CategoryNotFound { .. })
    }
}
