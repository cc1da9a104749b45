use crate::db::schema::messages;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = messages)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub sender_email: String,
    pub sender_name: String,
    pub receiver_id: Uuid,
    pub receiver_email: String,
    pub receiver_name: String,
    pub text: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_email: String,
    pub sender_name: String,
    pub receiver_id: Uuid,
    pub receiver_email: String,
    pub receiver_name: String,
    pub text: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// The participant that is not `account_id`.
    pub fn counterpart(&self, account_id: Uuid) -> (Uuid, &str, &str) {
        if self.sender_id == account_id {
            (self.receiver_id, &self.receiver_name, &self.receiver_email)
        } else {
            (self.sender_id, &self.sender_name, &self.sender_email)
        }
    }

    pub fn is_unread_for(&self, account_id: Uuid) -> bool {
        self.receiver_id == account_id && !self.read
    }
}
