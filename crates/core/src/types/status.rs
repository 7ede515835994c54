//! Publication status shared by categories and products.

use serde::{Deserialize, Serialize};

/// Whether a catalog record is visible on the public storefront.
///
/// Inactive categories are skipped by path resolution and the navigation
/// menu; inactive products are never projected.
///
/// Stored as the Postgres enum `catalog.publish_status`; repositories read it
/// as text and parse it with [`FromStr`](std::str::FromStr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishStatus {
    #[default]
    Active,
    Inactive,
}

impl PublishStatus {
    /// Returns `true` for [`PublishStatus::Active`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for PublishStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid publish status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [PublishStatus::Active, PublishStatus::Inactive] {
            assert_eq!(status.to_string().parse::<PublishStatus>().unwrap(), status);
        }
        assert!("archived".parse::<PublishStatus>().is_err());
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&PublishStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }

    #[test]
    fn test_default_is_active() {
        assert!(PublishStatus::default().is_active());
        assert!(!PublishStatus::Inactive.is_active());
    }
}
