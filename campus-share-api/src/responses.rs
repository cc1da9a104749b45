use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AccountKind, RequestStatus};

// -------- ACCOUNTS --------

/// Public view of an account. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AccountKind,
    pub trust_score: Option<f64>,
}

/// Minimal account card used by search results and thread headers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountResponse,
    pub expires_in: i64,
}

// -------- CATALOG --------
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub available_from: NaiveDate,
    pub available_until: NaiveDate,
    pub location: String,
    pub owner_id: Uuid,
    /// Owner display name
    pub owner: String,
    pub owner_email: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

// -------- LENDING --------
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequestResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub status: RequestStatus,
}

/// A request the caller made, seen from the borrower side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingRequestResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub status: RequestStatus,
    pub owner: String,
    pub owner_email: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A request against one of the caller's items.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequestResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub status: RequestStatus,
    pub borrower: String,
    pub borrower_email: String,
    pub borrower_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RequestListResponse {
    pub outgoing: Vec<OutgoingRequestResponse>,
    pub incoming: Vec<IncomingRequestResponse>,
}

// -------- MESSAGING --------
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub id: Uuid,
    pub text: String,
    /// "You" for the caller's own messages, the sender's name otherwise
    pub sender: String,
    pub sender_email: String,
    pub timestamp: DateTime<Utc>,
    pub is_mine: bool,
    pub read: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub other_user: AccountSummary,
    pub messages: Vec<ThreadMessage>,
}

// -------- ACTIVITY --------
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub active_items: i64,
    pub active_users: i64,
    pub successful_shares: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginLogResponse {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub email: String,
    pub role: String,
    pub ip_address: String,
    pub user_agent: String,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub login_time: DateTime<Utc>,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginLogPage {
    pub logs: Vec<LoginLogResponse>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
