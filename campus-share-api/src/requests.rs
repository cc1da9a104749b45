use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::AccountKind;

// Fields are optional on the wire so that a missing value surfaces as a
// validation error in the envelope instead of a deserializer rejection.

// -------- AUTH --------
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>, // Plain text
    #[serde(rename = "role")]
    pub kind: Option<AccountKind>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>, // Plain text
    #[serde(rename = "role")]
    pub kind: Option<AccountKind>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// -------- CATALOG --------
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub location: Option<String>,
}

/// Editable item fields. Anything else in the body (`available`,
/// `ownerId`, ...) is dropped by the deserializer.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_until: Option<NaiveDate>,
    pub location: Option<String>,
}

// -------- LENDING --------
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrowRequest {
    pub item_id: Option<Uuid>,
}

/// Status is kept as a raw string so an unknown value maps to an
/// invalid-status error rather than a JSON error.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateRequestStatusRequest {
    pub status: Option<String>,
}

// -------- MESSAGING --------
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_email: Option<String>,
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AccountSearchQuery {
    pub email: Option<String>,
}

// -------- ACTIVITY --------
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginLogPageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
