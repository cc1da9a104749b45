use crate::db::schema::accounts;
use campus_share_api::{AccountKind, AccountResponse, AccountSummary, ParseEnumError};
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = accounts)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub kind: String,
    pub trust_score: Option<f64>,
}

impl NewAccount {
    pub fn new(name: String, email: String, password_hash: String, kind: AccountKind) -> Self {
        Self {
            name,
            email,
            password_hash,
            kind: kind.as_str().to_string(),
            trust_score: kind.initial_trust_score(),
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub kind: String,
    pub trust_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn kind(&self) -> Result<AccountKind, ParseEnumError> {
        self.kind.parse()
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl TryFrom<Account> for AccountResponse {
    type Error = ParseEnumError;

    fn try_from(account: Account) -> Result<Self, Self::Error> {
        Ok(AccountResponse {
            role: account.kind()?,
            id: account.id,
            name: account.name,
            email: account.email,
            trust_score: account.trust_score,
        })
    }
}

/// Profile fields an account holder may change. `None` leaves the column as is.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = accounts)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
