use crate::db::error::RepositoryError;
use crate::db::models::item::{Item, ItemChanges, NewItem};
use crate::db::schema::{accounts, items};
use diesel::prelude::*;
use uuid::Uuid;

pub struct ItemRepository;

impl ItemRepository {
    pub fn create(conn: &mut PgConnection, new_item: &NewItem) -> Result<Item, RepositoryError> {
        diesel::insert_into(items::table)
            .values(new_item)
            .returning(Item::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Item>, RepositoryError> {
        items::table
            .filter(items::id.eq(id))
            .select(Item::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Verrouille l'objet (`FOR UPDATE`) le temps de la transaction
    pub fn lock_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Item>, RepositoryError> {
        items::table
            .filter(items::id.eq(id))
            .select(Item::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Tous les objets, les plus récents d'abord, avec le nom/email courant du propriétaire
    pub fn list_with_owner(conn: &mut PgConnection) -> Result<Vec<Item>, RepositoryError> {
        let rows = items::table
            .left_join(accounts::table)
            .order(items::created_at.desc())
            .select((
                Item::as_select(),
                (accounts::name, accounts::email).nullable(),
            ))
            .load::<(Item, Option<(String, String)>)>(conn)?;

        Ok(rows
            .into_iter()
            .map(|(mut item, owner)| {
                if let Some((name, email)) = owner {
                    item.owner_name = name;
                    item.owner_email = email;
                }
                item
            })
            .collect())
    }

    pub fn list_by_owner(
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<Vec<Item>, RepositoryError> {
        items::table
            .filter(items::owner_id.eq(owner_id))
            .order(items::created_at.desc())
            .select(Item::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn update_owned(
        conn: &mut PgConnection,
        id: Uuid,
        owner_id: Uuid,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, RepositoryError> {
        let owned = items::table
            .filter(items::id.eq(id))
            .filter(items::owner_id.eq(owner_id));

        if changes.is_empty() {
            return owned
                .select(Item::as_select())
                .first(conn)
                .optional()
                .map_err(Into::into);
        }

        diesel::update(owned)
            .set(changes)
            .returning(Item::as_returning())
            .get_result(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn delete_owned(
        conn: &mut PgConnection,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let deleted = diesel::delete(
            items::table
                .filter(items::id.eq(id))
                .filter(items::owner_id.eq(owner_id)),
        )
        .execute(conn)?;

        Ok(deleted > 0)
    }

    /// Bascule la disponibilité; aucun effet si l'objet a été supprimé
    pub fn set_available(
        conn: &mut PgConnection,
        id: Uuid,
        available: bool,
    ) -> Result<usize, RepositoryError> {
        diesel::update(items::table.filter(items::id.eq(id)))
            .set(items::available.eq(available))
            .execute(conn)
            .map_err(Into::into)
    }

    pub fn count_available(conn: &mut PgConnection) -> Result<i64, RepositoryError> {
        items::table
            .filter(items::available.eq(true))
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}
