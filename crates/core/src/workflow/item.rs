//! Item types, review statuses, and record kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/* --------------------------------------------------------------------------
ItemType
-------------------------------------------------------------------------- */

/// The kind of directory entity a submission or proposal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Employee,
    Establishment,
    Comment,
}

impl ItemType {
    pub const ALL: [ItemType; 3] = [ItemType::Employee, ItemType::Establishment, ItemType::Comment];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Employee => "employee",
            ItemType::Establishment => "establishment",
            ItemType::Comment => "comment",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("item type", s))
    }
}

impl TryFrom<String> for ItemType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
ReviewStatus
-------------------------------------------------------------------------- */

/// Lifecycle status of a submission or edit proposal.
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ReviewStatus::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "rejected" => Ok(ReviewStatus::Rejected),
            other => Err(ParseEnumError::new("status", other)),
        }
    }
}

impl TryFrom<String> for ReviewStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/* --------------------------------------------------------------------------
RecordKind
-------------------------------------------------------------------------- */

/// Which queue an engine instance operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// New content waiting to go live.
    Submission,
    /// Field changes to an entity that is already live.
    EditProposal,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Submission => "submission",
            RecordKind::EditProposal => "edit_proposal",
        }
    }

    /// Entity name used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            RecordKind::Submission => "Submission",
            RecordKind::EditProposal => "EditProposal",
        }
    }

    /// Comments are submitted but never edit-proposed.
    pub fn accepts(self, item_type: ItemType) -> bool {
        match self {
            RecordKind::Submission => true,
            RecordKind::EditProposal => item_type != ItemType::Comment,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
