use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Any status may move to any other; only unknown strings are rejected.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Published,
    Archived,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Published => "published",
            ReviewStatus::Archived => "archived",
        }
    }

    /// Statuses counted on the dashboard "Owner Reviews" card.
    pub fn visible() -> Vec<String> {
        vec![
            ReviewStatus::Published.to_string(),
            ReviewStatus::Pending.to_string(),
        ]
    }
}

impl Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(ReviewStatus::Pending),
            "published" => Ok(ReviewStatus::Published),
            "archived" => Ok(ReviewStatus::Archived),
            other => Err(anyhow::anyhow!("unknown review status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_status() {
        for status in [
            ReviewStatus::Pending,
            ReviewStatus::Published,
            ReviewStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<ReviewStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_values() {
        assert!("draft".parse::<ReviewStatus>().is_err());
        assert!("Published".parse::<ReviewStatus>().is_err());
    }
}
