use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a stored or submitted string is not a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Account partition. Admins and employees live side by side but an email
/// is only unique inside its own partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Admin,
    #[default]
    Employee,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    /// Employees start with a neutral trust score; admins carry none.
    pub fn initial_trust_score(self) -> Option<f64> {
        match self {
            Self::Admin => None,
            Self::Employee => Some(5.0),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            other => Err(ParseEnumError {
                kind: "account kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle of a borrow request.
///
/// `pending → {approved, rejected}`, `approved → {completed, rejected}`.
/// `rejected` and `completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// Whether an owner may move a request from `self` to `next`.
    ///
    /// `approved → rejected` is accepted so an owner can revoke an approval.
    /// Every other pair, repeats included, is refused.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Completed | Self::Rejected)
        )
    }

    /// Item availability to write when a request moves from `self` to `next`.
    ///
    /// Only the approved request holds the item, so only its departure frees
    /// it. `None` leaves the item untouched.
    pub fn item_available_after(self, next: Self) -> Option<bool> {
        match (self, next) {
            (_, Self::Approved) => Some(false),
            (Self::Approved, Self::Rejected | Self::Completed) => Some(true),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(ParseEnumError {
                kind: "request status",
                value: other.to_string(),
            }),
        }
    }
}
