use std::sync::Arc;

use campus_share_api::{
    AccountKind, LoginLogPage, LoginLogPageQuery, LoginLogResponse, RequestStatus, StatsResponse,
};
use uuid::Uuid;

use crate::db::store::Store;
use crate::error::AppError;

const MY_LOGS_LIMIT: i64 = 50;
const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// Statistiques du tableau de bord et consultation du journal des connexions.
pub struct ActivityService {
    store: Arc<dyn Store>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> Result<StatsResponse, AppError> {
        Ok(StatsResponse {
            active_items: self.store.count_available_items()?,
            active_users: self.store.count_accounts(AccountKind::Employee)?,
            successful_shares: self.store.count_requests(RequestStatus::Completed)?,
        })
    }

    pub fn my_login_logs(&self, account_id: Uuid) -> Result<Vec<LoginLogResponse>, AppError> {
        Ok(self
            .store
            .list_login_logs_for(account_id, MY_LOGS_LIMIT)?
            .into_iter()
            .map(LoginLogResponse::from)
            .collect())
    }

    /// Toutes les tentatives de connexion, les plus récentes d'abord. Réservé aux admins.
    pub fn all_login_logs(
        &self,
        caller_kind: AccountKind,
        query: &LoginLogPageQuery,
    ) -> Result<LoginLogPage, AppError> {
        if caller_kind != AccountKind::Admin {
            return Err(AppError::forbidden("Admin access required"));
        }

        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 {
            return Err(AppError::validation("page must be at least 1"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let offset = (page - 1).saturating_mul(limit);
        let logs = self
            .store
            .list_login_logs(offset, limit)?
            .into_iter()
            .map(LoginLogResponse::from)
            .collect();
        let total = self.store.count_login_logs()?;

        Ok(LoginLogPage {
            logs,
            total_pages: (total + limit - 1) / limit,
            current_page: page,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::db::models::login_log::NewLoginLog;
    use crate::services::fixtures;
    use crate::services::lending::LendingService;

    fn log_attempt(store: &MemoryStore, account_id: Option<Uuid>, success: bool) {
        store
            .insert_login_log(&NewLoginLog {
                account_id,
                email: "ana@campus.edu".to_string(),
                role: "employee".to_string(),
                ip_address: "10.0.0.7".to_string(),
                user_agent: "unknown".to_string(),
                browser: None,
                os: None,
                device: None,
                success,
                failure_reason: (!success).then(|| "Invalid password".to_string()),
                location: None,
            })
            .expect("insert login log");
    }

    fn page(page: Option<i64>, limit: Option<i64>) -> LoginLogPageQuery {
        LoginLogPageQuery { page, limit }
    }

    #[test]
    fn stats_count_available_items_employees_and_completed_shares() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        let ben = fixtures::employee(&store, "Ben");
        fixtures::account(&store, "Root", "root@campus.edu", AccountKind::Admin);
        let projector = fixtures::item(&store, &ana, "Projector");
        let tripod = fixtures::item(&store, &ana, "Tripod");
        fixtures::item(&store, &ben, "Whiteboard");

        let lending = LendingService::new(store.clone());
        let done = lending.create_request(ben.id, projector.id).unwrap();
        lending
            .update_request_status(ana.id, done.id, Some("approved"))
            .unwrap();
        lending
            .update_request_status(ana.id, done.id, Some("completed"))
            .unwrap();
        let lent = lending.create_request(ben.id, tripod.id).unwrap();
        lending
            .update_request_status(ana.id, lent.id, Some("approved"))
            .unwrap();

        let stats = ActivityService::new(store).stats().unwrap();
        assert_eq!(
            stats,
            StatsResponse {
                active_items: 2,
                active_users: 2,
                successful_shares: 1,
            }
        );
    }

    #[test]
    fn my_logs_are_mine_newest_first_and_capped() {
        let store = fixtures::store();
        let ana = fixtures::employee(&store, "Ana");
        for _ in 0..55 {
            log_attempt(&store, Some(ana.id), false);
        }
        log_attempt(&store, Some(ana.id), true);
        log_attempt(&store, None, false);
        let service = ActivityService::new(store);

        let logs = service.my_login_logs(ana.id).unwrap();
        assert_eq!(logs.len(), 50);
        assert!(logs[0].success);
        assert!(logs.iter().all(|l| l.account_id == Some(ana.id)));
    }

    #[test]
    fn all_logs_are_admin_only() {
        let service = ActivityService::new(fixtures::store());

        let err = service
            .all_login_logs(AccountKind::Employee, &page(None, None))
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref msg) if msg == "Admin access required"));
    }

    #[test]
    fn all_logs_are_paginated() {
        let store = fixtures::store();
        for i in 0..7 {
            log_attempt(&store, None, i % 2 == 0);
        }
        let service = ActivityService::new(store);

        let first = service
            .all_login_logs(AccountKind::Admin, &page(Some(1), Some(3)))
            .unwrap();
        assert_eq!(first.logs.len(), 3);
        assert_eq!(first.total, 7);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.current_page, 1);
        assert!(first.logs[0].success, "newest entry comes first");

        let last = service
            .all_login_logs(AccountKind::Admin, &page(Some(3), Some(3)))
            .unwrap();
        assert_eq!(last.logs.len(), 1);

        let defaults = service
            .all_login_logs(AccountKind::Admin, &page(None, None))
            .unwrap();
        assert_eq!(defaults.logs.len(), 7);
        assert_eq!(defaults.total_pages, 1);
    }

    #[test]
    fn out_of_range_paging_is_rejected() {
        let service = ActivityService::new(fixtures::store());

        for (p, l) in [(Some(0), None), (None, Some(0)), (None, Some(101))] {
            assert!(matches!(
                service
                    .all_login_logs(AccountKind::Admin, &page(p, l))
                    .unwrap_err(),
                AppError::Validation(_)
            ));
        }
    }
}
