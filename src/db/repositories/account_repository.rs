use crate::db::error::RepositoryError;
use crate::db::models::account::{Account, AccountChanges, NewAccount};
use crate::db::schema::accounts;
use campus_share_api::AccountKind;
use diesel::prelude::*;
use uuid::Uuid;

pub struct AccountRepository;

impl AccountRepository {
    /// Créer un compte
    pub fn create(
        conn: &mut PgConnection,
        new_account: &NewAccount,
    ) -> Result<Account, RepositoryError> {
        diesel::insert_into(accounts::table)
            .values(new_account)
            .returning(Account::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Trouver un compte par ID
    pub fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Account>, RepositoryError> {
        accounts::table
            .filter(accounts::id.eq(id))
            .select(Account::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Trouver un compte par email dans une partition (admin / employee)
    pub fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
        kind: AccountKind,
    ) -> Result<Option<Account>, RepositoryError> {
        accounts::table
            .filter(accounts::email.eq(email))
            .filter(accounts::kind.eq(kind.as_str()))
            .select(Account::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Mettre à jour le profil (nom, email, mot de passe)
    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &AccountChanges,
    ) -> Result<Account, RepositoryError> {
        if changes.is_empty() {
            return Self::find_by_id(conn, id)?
                .ok_or_else(|| RepositoryError::NotFound("Account not found".to_string()));
        }

        diesel::update(accounts::table.filter(accounts::id.eq(id)))
            .set(changes)
            .returning(Account::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn search_by_email(
        conn: &mut PgConnection,
        fragment: &str,
        kind: AccountKind,
        exclude: Uuid,
        limit: i64,
    ) -> Result<Vec<Account>, RepositoryError> {
        accounts::table
            .filter(accounts::email.ilike(like_pattern(fragment)))
            .filter(accounts::kind.eq(kind.as_str()))
            .filter(accounts::id.ne(exclude))
            .order(accounts::email.asc())
            .limit(limit)
            .select(Account::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn count_by_kind(
        conn: &mut PgConnection,
        kind: AccountKind,
    ) -> Result<i64, RepositoryError> {
        accounts::table
            .filter(accounts::kind.eq(kind.as_str()))
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}

/// `%fragment%` with LIKE metacharacters escaped, so user input is matched
/// literally.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
