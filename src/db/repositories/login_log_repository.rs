use crate::db::error::RepositoryError;
use crate::db::models::login_log::{LoginLog, NewLoginLog};
use crate::db::schema::login_logs;
use diesel::prelude::*;
use uuid::Uuid;

pub struct LoginLogRepository;

impl LoginLogRepository {
    /// Enregistrer une tentative de connexion
    pub fn create(
        conn: &mut PgConnection,
        new_log: &NewLoginLog,
    ) -> Result<LoginLog, RepositoryError> {
        diesel::insert_into(login_logs::table)
            .values(new_log)
            .returning(LoginLog::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Récupérer les dernières tentatives d'un compte
    pub fn find_by_account(
        conn: &mut PgConnection,
        account_id: Uuid,
        limit: i64,
    ) -> Result<Vec<LoginLog>, RepositoryError> {
        login_logs::table
            .filter(login_logs::account_id.eq(account_id))
            .order_by(login_logs::login_time.desc())
            .limit(limit)
            .select(LoginLog::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn list_page(
        conn: &mut PgConnection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LoginLog>, RepositoryError> {
        login_logs::table
            .order_by(login_logs::login_time.desc())
            .offset(offset)
            .limit(limit)
            .select(LoginLog::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    pub fn count(conn: &mut PgConnection) -> Result<i64, RepositoryError> {
        login_logs::table
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}
