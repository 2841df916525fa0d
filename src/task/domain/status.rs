//! Task lifecycle status and its external spellings.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Serialises to its external spelling (`"pendente"`, `"concluída"`) and
/// deserialises case-insensitively from the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    /// Work on the task has not been finished.
    #[serde(rename = "pendente")]
    Pending,
    /// The task has been completed.
    #[serde(rename = "concluída")]
    Done,
}

/// Every status paired with its external spelling.
const EXTERNAL_NAMES: [(TaskStatus, &str); 2] = [
    (TaskStatus::Pending, "pendente"),
    (TaskStatus::Done, "concluída"),
];

impl TaskStatus {
    /// Returns the external representation used by API clients.
    #[must_use]
    pub const fn external_name(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Done => "concluída",
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn storage_name(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Done => "DONE",
        }
    }

    /// Parses a status from its storage representation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatus`] for unknown values.
    pub fn from_storage(value: &str) -> Result<Self, TaskDomainError> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "DONE" => Ok(Self::Done),
            _ => Err(TaskDomainError::InvalidStatus(value.to_owned())),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        EXTERNAL_NAMES
            .iter()
            .find(|(_, name)| *name == normalized)
            .map(|(status, _)| *status)
            .ok_or_else(|| TaskDomainError::InvalidStatus(value.to_owned()))
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.external_name())
    }
}
