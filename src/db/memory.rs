//! In-memory `Store` used by the service and router tests.

use std::sync::atomic::{AtomicBool, Ordering};

use campus_share_api::{AccountKind, RequestStatus};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::db::error::RepositoryError;
use crate::db::models::account::{Account, AccountChanges, NewAccount};
use crate::db::models::borrow_request::{BorrowRequest, NewBorrowRequest};
use crate::db::models::item::{Item, ItemChanges, NewItem};
use crate::db::models::login_log::{LoginLog, NewLoginLog};
use crate::db::models::message::{Message, NewMessage};
use crate::db::store::{StatusChange, Store, StoreResult};

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    items: Vec<Item>,
    requests: Vec<BorrowRequest>,
    messages: Vec<Message>,
    login_logs: Vec<LoginLog>,
    clock: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing timestamps so insertion order is observable.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.clock {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        next
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_login_logs: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every login-log write fail, to exercise best-effort auditing.
    pub fn fail_login_log_writes(&self) {
        self.fail_login_logs.store(true, Ordering::SeqCst);
    }

    pub fn login_logs(&self) -> Vec<LoginLog> {
        self.tables.lock().login_logs.clone()
    }

    pub fn item(&self, id: Uuid) -> Option<Item> {
        self.tables.lock().items.iter().find(|i| i.id == id).cloned()
    }

    pub fn set_item_available(&self, id: Uuid, available: bool) {
        if let Some(item) = self.tables.lock().items.iter_mut().find(|i| i.id == id) {
            item.available = available;
        }
    }
}

fn newest_first<T>(rows: impl DoubleEndedIterator<Item = T>) -> Vec<T> {
    rows.rev().collect()
}

/// Same refusal as a Postgres `VARCHAR(max)` column.
fn varchar(value: Option<&str>, max: usize) -> StoreResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(RepositoryError::Database(format!(
            "value too long for type character varying({max})"
        ))),
        _ => Ok(()),
    }
}

impl Store for MemoryStore {
    fn insert_account(&self, new_account: &NewAccount) -> StoreResult<Account> {
        varchar(Some(&new_account.name), 100)?;
        varchar(Some(&new_account.email), 255)?;
        let mut tables = self.tables.lock();
        if tables
            .accounts
            .iter()
            .any(|a| a.email == new_account.email && a.kind == new_account.kind)
        {
            return Err(RepositoryError::UniqueViolation(
                "accounts_email_kind_key".to_string(),
            ));
        }
        let account = Account {
            id: Uuid::new_v4(),
            name: new_account.name.clone(),
            email: new_account.email.clone(),
            password_hash: new_account.password_hash.clone(),
            kind: new_account.kind.clone(),
            trust_score: new_account.trust_score,
            created_at: tables.tick(),
        };
        tables.accounts.push(account.clone());
        Ok(account)
    }

    fn find_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        Ok(self.tables.lock().accounts.iter().find(|a| a.id == id).cloned())
    }

    fn find_account_by_email(
        &self,
        email: &str,
        kind: AccountKind,
    ) -> StoreResult<Option<Account>> {
        Ok(self
            .tables
            .lock()
            .accounts
            .iter()
            .find(|a| a.email == email && a.kind == kind.as_str())
            .cloned())
    }

    fn update_account(&self, id: Uuid, changes: &AccountChanges) -> StoreResult<Account> {
        varchar(changes.name.as_deref(), 100)?;
        varchar(changes.email.as_deref(), 255)?;
        let mut tables = self.tables.lock();
        let kind = tables
            .accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.kind.clone())
            .ok_or_else(|| RepositoryError::NotFound("Account not found".to_string()))?;
        if let Some(email) = &changes.email
            && tables
                .accounts
                .iter()
                .any(|a| a.id != id && &a.email == email && a.kind == kind)
        {
            return Err(RepositoryError::UniqueViolation(
                "accounts_email_kind_key".to_string(),
            ));
        }
        let account = tables
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| RepositoryError::NotFound("Account not found".to_string()))?;
        if let Some(name) = &changes.name {
            account.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            account.email.clone_from(email);
        }
        if let Some(hash) = &changes.password_hash {
            account.password_hash.clone_from(hash);
        }
        Ok(account.clone())
    }

    fn search_accounts(
        &self,
        fragment: &str,
        kind: AccountKind,
        exclude: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<Account>> {
        let needle = fragment.to_lowercase();
        let mut found: Vec<Account> = self
            .tables
            .lock()
            .accounts
            .iter()
            .filter(|a| a.kind == kind.as_str() && a.id != exclude)
            .filter(|a| a.email.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.email.cmp(&b.email));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }

    fn count_accounts(&self, kind: AccountKind) -> StoreResult<i64> {
        let tables = self.tables.lock();
        Ok(tables.accounts.iter().filter(|a| a.kind == kind.as_str()).count() as i64)
    }

    fn insert_item(&self, new_item: &NewItem) -> StoreResult<Item> {
        varchar(Some(&new_item.title), 255)?;
        varchar(Some(&new_item.category), 100)?;
        varchar(Some(&new_item.location), 255)?;
        let mut tables = self.tables.lock();
        let item = Item {
            id: Uuid::new_v4(),
            title: new_item.title.clone(),
            description: new_item.description.clone(),
            category: new_item.category.clone(),
            available_from: new_item.available_from,
            available_until: new_item.available_until,
            location: new_item.location.clone(),
            owner_id: new_item.owner_id,
            owner_name: new_item.owner_name.clone(),
            owner_email: new_item.owner_email.clone(),
            available: true,
            created_at: tables.tick(),
        };
        tables.items.push(item.clone());
        Ok(item)
    }

    fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        Ok(self.item(id))
    }

    fn list_items(&self) -> StoreResult<Vec<Item>> {
        let tables = self.tables.lock();
        Ok(newest_first(tables.items.iter().map(|item| {
            let mut item = item.clone();
            if let Some(owner) = tables.accounts.iter().find(|a| a.id == item.owner_id) {
                item.owner_name.clone_from(&owner.name);
                item.owner_email.clone_from(&owner.email);
            }
            item
        })))
    }

    fn list_items_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Item>> {
        let tables = self.tables.lock();
        Ok(newest_first(
            tables.items.iter().filter(|i| i.owner_id == owner_id).cloned(),
        ))
    }

    fn update_owned_item(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: &ItemChanges,
    ) -> StoreResult<Option<Item>> {
        varchar(changes.title.as_deref(), 255)?;
        varchar(changes.category.as_deref(), 100)?;
        varchar(changes.location.as_deref(), 255)?;
        let mut tables = self.tables.lock();
        Ok(tables
            .items
            .iter_mut()
            .find(|i| i.id == id && i.owner_id == owner_id)
            .map(|item| {
                changes.apply_to(item);
                item.clone()
            }))
    }

    fn delete_owned_item(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.lock();
        let before = tables.items.len();
        tables
            .items
            .retain(|i| !(i.id == id && i.owner_id == owner_id));
        Ok(tables.items.len() < before)
    }

    fn count_available_items(&self) -> StoreResult<i64> {
        let tables = self.tables.lock();
        Ok(tables.items.iter().filter(|i| i.available).count() as i64)
    }

    fn insert_request(&self, new_request: &NewBorrowRequest) -> StoreResult<BorrowRequest> {
        if new_request.borrower_id == new_request.owner_id {
            return Err(RepositoryError::ConstraintViolation(
                "borrow_requests_check".to_string(),
            ));
        }
        let mut tables = self.tables.lock();
        let request = BorrowRequest {
            id: Uuid::new_v4(),
            item_id: new_request.item_id,
            item_name: new_request.item_name.clone(),
            borrower_id: new_request.borrower_id,
            borrower_name: new_request.borrower_name.clone(),
            borrower_email: new_request.borrower_email.clone(),
            owner_id: new_request.owner_id,
            owner_name: new_request.owner_name.clone(),
            owner_email: new_request.owner_email.clone(),
            status: new_request.status.clone(),
            created_at: tables.tick(),
        };
        tables.requests.push(request.clone());
        Ok(request)
    }

    fn list_requests_by_borrower(&self, borrower_id: Uuid) -> StoreResult<Vec<BorrowRequest>> {
        let tables = self.tables.lock();
        Ok(newest_first(
            tables
                .requests
                .iter()
                .filter(|r| r.borrower_id == borrower_id)
                .cloned(),
        ))
    }

    fn list_requests_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<BorrowRequest>> {
        let tables = self.tables.lock();
        Ok(newest_first(
            tables.requests.iter().filter(|r| r.owner_id == owner_id).cloned(),
        ))
    }

    fn transition_request(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: RequestStatus,
    ) -> StoreResult<StatusChange> {
        // One lock guard for both writes.
        let mut tables = self.tables.lock();
        let Some(index) = tables
            .requests
            .iter()
            .position(|r| r.id == id && r.owner_id == owner_id)
        else {
            return Ok(StatusChange::NotFound);
        };

        let current = tables.requests[index]
            .status()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        if !current.can_transition_to(next) {
            return Ok(StatusChange::Refused(current));
        }

        let item_id = tables.requests[index].item_id;
        let item = tables.items.iter().position(|i| i.id == item_id);
        if next == RequestStatus::Approved && item.is_some_and(|i| !tables.items[i].available) {
            return Ok(StatusChange::ItemUnavailable);
        }

        tables.requests[index].status = next.as_str().to_string();
        let updated = tables.requests[index].clone();
        if let Some(i) = item
            && let Some(available) = current.item_available_after(next)
        {
            tables.items[i].available = available;
        }
        Ok(StatusChange::Applied(updated))
    }

    fn count_requests(&self, status: RequestStatus) -> StoreResult<i64> {
        let tables = self.tables.lock();
        Ok(tables
            .requests
            .iter()
            .filter(|r| r.status == status.as_str())
            .count() as i64)
    }

    fn insert_message(&self, new_message: &NewMessage) -> StoreResult<Message> {
        let mut tables = self.tables.lock();
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: new_message.sender_id,
            sender_email: new_message.sender_email.clone(),
            sender_name: new_message.sender_name.clone(),
            receiver_id: new_message.receiver_id,
            receiver_email: new_message.receiver_email.clone(),
            receiver_name: new_message.receiver_name.clone(),
            text: new_message.text.clone(),
            read: false,
            timestamp: tables.tick(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    fn list_messages_involving(&self, account_id: Uuid) -> StoreResult<Vec<Message>> {
        let tables = self.tables.lock();
        Ok(newest_first(
            tables
                .messages
                .iter()
                .filter(|m| m.sender_id == account_id || m.receiver_id == account_id)
                .cloned(),
        ))
    }

    fn list_thread(&self, a: Uuid, b: Uuid) -> StoreResult<Vec<Message>> {
        let tables = self.tables.lock();
        Ok(tables
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.receiver_id == b) || (m.sender_id == b && m.receiver_id == a)
            })
            .cloned()
            .collect())
    }

    fn mark_thread_read(&self, receiver_id: Uuid, sender_id: Uuid) -> StoreResult<usize> {
        let mut tables = self.tables.lock();
        let mut marked = 0;
        for message in tables
            .messages
            .iter_mut()
            .filter(|m| m.receiver_id == receiver_id && m.sender_id == sender_id && !m.read)
        {
            message.read = true;
            marked += 1;
        }
        Ok(marked)
    }

    fn insert_login_log(&self, new_log: &NewLoginLog) -> StoreResult<LoginLog> {
        if self.fail_login_logs.load(Ordering::SeqCst) {
            return Err(RepositoryError::Pool("login log store unavailable".to_string()));
        }
        // email, ip_address and user_agent are TEXT columns
        varchar(Some(&new_log.role), 20)?;
        varchar(new_log.browser.as_deref(), 32)?;
        varchar(new_log.os.as_deref(), 32)?;
        varchar(new_log.device.as_deref(), 32)?;
        let mut tables = self.tables.lock();
        let log = LoginLog {
            id: Uuid::new_v4(),
            account_id: new_log.account_id,
            email: new_log.email.clone(),
            role: new_log.role.clone(),
            ip_address: new_log.ip_address.clone(),
            user_agent: new_log.user_agent.clone(),
            browser: new_log.browser.clone(),
            os: new_log.os.clone(),
            device: new_log.device.clone(),
            login_time: tables.tick(),
            success: new_log.success,
            failure_reason: new_log.failure_reason.clone(),
            location: new_log.location.clone(),
        };
        tables.login_logs.push(log.clone());
        Ok(log)
    }

    fn list_login_logs_for(&self, account_id: Uuid, limit: i64) -> StoreResult<Vec<LoginLog>> {
        let tables = self.tables.lock();
        let mut logs = newest_first(
            tables
                .login_logs
                .iter()
                .filter(|l| l.account_id == Some(account_id))
                .cloned(),
        );
        logs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(logs)
    }

    fn list_login_logs(&self, offset: i64, limit: i64) -> StoreResult<Vec<LoginLog>> {
        let tables = self.tables.lock();
        Ok(tables
            .login_logs
            .iter()
            .rev()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    fn count_login_logs(&self) -> StoreResult<i64> {
        Ok(self.tables.lock().login_logs.len() as i64)
    }
}
