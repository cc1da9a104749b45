use crate::db::error::RepositoryError;
use crate::db::models::message::{Message, NewMessage};
use crate::db::schema::messages;
use diesel::prelude::*;
use uuid::Uuid;

pub struct MessageRepository;

impl MessageRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_message: &NewMessage,
    ) -> Result<Message, RepositoryError> {
        diesel::insert_into(messages::table)
            .values(new_message)
            .returning(Message::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Tous les messages envoyés ou reçus, les plus récents d'abord
    pub fn list_involving(
        conn: &mut PgConnection,
        account_id: Uuid,
    ) -> Result<Vec<Message>, RepositoryError> {
        messages::table
            .filter(
                messages::sender_id
                    .eq(account_id)
                    .or(messages::receiver_id.eq(account_id)),
            )
            .order(messages::timestamp.desc())
            .select(Message::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    /// Fil de discussion entre deux comptes, dans l'ordre chronologique
    pub fn list_between(
        conn: &mut PgConnection,
        a: Uuid,
        b: Uuid,
    ) -> Result<Vec<Message>, RepositoryError> {
        messages::table
            .filter(
                messages::sender_id
                    .eq(a)
                    .and(messages::receiver_id.eq(b))
                    .or(messages::sender_id.eq(b).and(messages::receiver_id.eq(a))),
            )
            .order(messages::timestamp.asc())
            .select(Message::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn mark_read(
        conn: &mut PgConnection,
        receiver_id: Uuid,
        sender_id: Uuid,
    ) -> Result<usize, RepositoryError> {
        diesel::update(
            messages::table
                .filter(messages::sender_id.eq(sender_id))
                .filter(messages::receiver_id.eq(receiver_id))
                .filter(messages::read.eq(false)),
        )
        .set(messages::read.eq(true))
        .execute(conn)
        .map_err(Into::into)
    }
}
