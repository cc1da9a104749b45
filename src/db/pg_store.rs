use campus_share_api::{AccountKind, RequestStatus};
use diesel::{Connection, PgConnection};
use uuid::Uuid;

use super::{DbConnection, DbPool};
use crate::db::error::RepositoryError;
use crate::db::models::account::{Account, AccountChanges, NewAccount};
use crate::db::models::borrow_request::{BorrowRequest, NewBorrowRequest};
use crate::db::models::item::{Item, ItemChanges, NewItem};
use crate::db::models::login_log::{LoginLog, NewLoginLog};
use crate::db::models::message::{Message, NewMessage};
use crate::db::repositories::account_repository::AccountRepository;
use crate::db::repositories::item_repository::ItemRepository;
use crate::db::repositories::login_log_repository::LoginLogRepository;
use crate::db::repositories::message_repository::MessageRepository;
use crate::db::repositories::request_repository::RequestRepository;
use crate::db::store::{StatusChange, Store, StoreResult};

/// Postgres-backed `Store`. Every call checks a connection out of the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, RepositoryError> {
        self.pool.get().map_err(Into::into)
    }
}

impl Store for PgStore {
    fn insert_account(&self, new_account: &NewAccount) -> StoreResult<Account> {
        AccountRepository::create(&mut *self.conn()?, new_account)
    }

    fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        AccountRepository::find_by_id(&mut *self.conn()?, id)
    }

    fn find_account_by_email(
        &self,
        email: &str,
        kind: AccountKind,
    ) -> StoreResult<Option<Account>> {
        AccountRepository::find_by_email(&mut *self.conn()?, email, kind)
    }

    fn update_account(&self, id: Uuid, changes: &AccountChanges) -> StoreResult<Account> {
        AccountRepository::update(&mut *self.conn()?, id, changes)
    }

    fn search_accounts(
        &self,
        fragment: &str,
        kind: AccountKind,
        exclude: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Account>> {
        AccountRepository::search_by_email(&mut *self.conn()?, fragment, kind, exclude, limit)
    }

    fn count_accounts(&self, kind: AccountKind) -> StoreResult<i64> {
        AccountRepository::count_by_kind(&mut *self.conn()?, kind)
    }

    fn insert_item(&self, new_item: &NewItem) -> StoreResult<Item> {
        ItemRepository::create(&mut *self.conn()?, new_item)
    }

    fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        ItemRepository::find_by_id(&mut *self.conn()?, id)
    }

    fn list_items(&self) -> StoreResult<Vec<Item>> {
        ItemRepository::list_with_owner(&mut *self.conn()?)
    }

    fn list_items_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Item>> {
        ItemRepository::list_by_owner(&mut *self.conn()?, owner_id)
    }

    fn update_owned_item(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ItemChanges,
    ) -> StoreResult<Option<Item>> {
        ItemRepository::update_owned(&mut *self.conn()?, id, owner_id, changes)
    }

    fn delete_owned_item(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        ItemRepository::delete_owned(&mut *self.conn()?, id, owner_id)
    }

    fn count_available_items(&self) -> StoreResult<i64> {
        ItemRepository::count_available(&mut *self.conn()?)
    }

    fn insert_request(&self, new_request: &NewBorrowRequest) -> StoreResult<BorrowRequest> {
        RequestRepository::create(&mut *self.conn()?, new_request)
    }

    fn list_requests_by_borrower(&self, borrower_id: Uuid) -> StoreResult<Vec<BorrowRequest>> {
        RequestRepository::list_by_borrower(&mut *self.conn()?, borrower_id)
    }

    fn list_requests_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<BorrowRequest>> {
        RequestRepository::list_by_owner(&mut *self.conn()?, owner_id)
    }

    fn transition_request(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: RequestStatus,
    ) -> StoreResult<StatusChange> {
        let mut pooled = self.conn()?;
        let conn: &mut PgConnection = &mut pooled;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let Some(request) = RequestRepository::lock_owned(conn, id, owner_id)? else {
                return Ok(StatusChange::NotFound);
            };

            let current = request
                .status()
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            if !current.can_transition_to(next) {
                return Ok(StatusChange::Refused(current));
            }

            // Verrou sur l'objet: deux demandes du même objet passent l'une après l'autre
            let item = ItemRepository::lock_by_id(conn, request.item_id)?;
            if next == RequestStatus::Approved && item.as_ref().is_some_and(|i| !i.available) {
                return Ok(StatusChange::ItemUnavailable);
            }

            let updated = RequestRepository::set_status(conn, id, next)?;
            if item.is_some()
                && let Some(available) = current.item_available_after(next)
            {
                ItemRepository::set_available(conn, request.item_id, available)?;
            }

            Ok(StatusChange::Applied(updated))
        })
    }

    fn count_requests(&self, status: RequestStatus) -> StoreResult<i64> {
        RequestRepository::count_by_status(&mut *self.conn()?, status)
    }

    fn insert_message(&self, new_message: &NewMessage) -> StoreResult<Message> {
        MessageRepository::create(&mut *self.conn()?, new_message)
    }

    fn list_messages_involving(&self, account_id: Uuid) -> StoreResult<Vec<Message>> {
        MessageRepository::list_involving(&mut *self.conn()?, account_id)
    }

    fn list_thread(&self, a: Uuid, b: Uuid) -> StoreResult<Vec<Message>> {
        MessageRepository::list_between(&mut *self.conn()?, a, b)
    }

    fn mark_thread_read(&self, receiver_id: Uuid, sender_id: Uuid) -> StoreResult<usize> {
        MessageRepository::mark_read(&mut *self.conn()?, receiver_id, sender_id)
    }

    fn insert_login_log(&self, new_log: &NewLoginLog) -> StoreResult<LoginLog> {
        LoginLogRepository::create(&mut *self.conn()?, new_log)
    }

    fn list_login_logs_for(&self, account_id: Uuid, limit: i64) -> StoreResult<Vec<LoginLog>> {
        LoginLogRepository::find_by_account(&mut *self.conn()?, account_id, limit)
    }

    fn list_login_logs(&self, offset: i64, limit: i64) -> StoreResult<Vec<LoginLog>> {
        LoginLogRepository::list_page(&mut *self.conn()?, offset, limit)
    }

    fn count_login_logs(&self) -> StoreResult<i64> {
        LoginLogRepository::count(&mut *self.conn()?)
    }
}
