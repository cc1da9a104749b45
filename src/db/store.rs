use campus_share_api::{AccountKind, RequestStatus};
use uuid::Uuid;

use crate::db::error::RepositoryError;
use crate::db::models::account::{Account, AccountChanges, NewAccount};
use crate::db::models::borrow_request::{BorrowRequest, NewBorrowRequest};
use crate::db::models::item::{Item, ItemChanges, NewItem};
use crate::db::models::login_log::{LoginLog, NewLoginLog};
use crate::db::models::message::{Message, NewMessage};

pub type StoreResult<T> = Result<T, RepositoryError>;

/// Outcome of an owner-driven request status change.
#[derive(Debug, Clone)]
pub enum StatusChange {
    /// Status and item availability were written together.
    Applied(BorrowRequest),
    /// No request with that id is owned by the caller.
    NotFound,
    /// The request sits in a state that cannot move to the asked status.
    Refused(RequestStatus),
    /// Approval refused: another approved request already holds the item.
    ItemUnavailable,
}

/// Persistence handle shared by every service.
///
/// Implementations are cheap to share behind an `Arc` and must be safe to
/// call from blocking worker threads. Listing methods return newest first
/// unless stated otherwise.
pub trait Store: Send + Sync {
    // === Accounts ===
    fn insert_account(&self, new_account: &NewAccount) -> StoreResult<Account>;
    fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>>;
    fn find_account_by_email(
        &self,
        email: &str,
        kind: AccountKind,
    ) -> StoreResult<Option<Account>>;
    fn update_account(&self, id: Uuid, changes: &AccountChanges) -> StoreResult<Account>;
    /// Case-insensitive literal substring match on email inside one kind.
    fn search_accounts(
        &self,
        fragment: &str,
        kind: AccountKind,
        exclude: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Account>>;
    fn count_accounts(&self, kind: AccountKind) -> StoreResult<i64>;

    // === Items ===
    fn insert_item(&self, new_item: &NewItem) -> StoreResult<Item>;
    fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>>;
    /// Every item, with owner name/email taken from the owning account when
    /// it still exists.
    fn list_items(&self) -> StoreResult<Vec<Item>>;
    fn list_items_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Item>>;
    /// `None` when the item does not exist or belongs to someone else.
    fn update_owned_item(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ItemChanges,
    ) -> StoreResult<Option<Item>>;
    /// `false` when the item does not exist or belongs to someone else.
    fn delete_owned_item(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool>;
    fn count_available_items(&self) -> StoreResult<i64>;

    // === Borrow requests ===
    fn insert_request(&self, new_request: &NewBorrowRequest) -> StoreResult<BorrowRequest>;
    fn list_requests_by_borrower(&self, borrower_id: Uuid) -> StoreResult<Vec<BorrowRequest>>;
    fn list_requests_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<BorrowRequest>>;
    /// Moves a request to `next` and sets the referenced item's availability
    /// as one atomic unit. The current status is re-read inside that unit.
    fn transition_request(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: RequestStatus,
    ) -> StoreResult<StatusChange>;
    fn count_requests(&self, status: RequestStatus) -> StoreResult<i64>;

    // === Messages ===
    fn insert_message(&self, new_message: &NewMessage) -> StoreResult<Message>;
    /// Every message sent or received by `account_id`, newest first.
    fn list_messages_involving(&self, account_id: Uuid) -> StoreResult<Vec<Message>>;
    /// Messages exchanged between `a` and `b` in either direction, oldest first.
    fn list_thread(&self, a: Uuid, b: Uuid) -> StoreResult<Vec<Message>>;
    /// Flags unread messages from `sender_id` to `receiver_id` as read.
    fn mark_thread_read(&self, receiver_id: Uuid, sender_id: Uuid) -> StoreResult<usize>;

    // === Login logs ===
    fn insert_login_log(&self, new_log: &NewLoginLog) -> StoreResult<LoginLog>;
    fn list_login_logs_for(&self, account_id: Uuid, limit: i64) -> StoreResult<Vec<LoginLog>>;
    fn list_login_logs(&self, offset: i64, limit: i64) -> StoreResult<Vec<LoginLog>>;
    fn count_login_logs(&self) -> StoreResult<i64>;
}
