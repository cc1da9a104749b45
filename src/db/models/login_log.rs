use crate::db::schema::login_logs;
use campus_share_api::LoginLogResponse;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = login_logs)]
pub struct NewLoginLog {
    pub account_id: Option<Uuid>,
    pub email: String,
    pub role: String,
    pub ip_address: String,
    pub user_agent: String,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub location: Option<String>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = login_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LoginLog {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub email: String,
    pub role: String,
    pub ip_address: String,
    pub user_agent: String,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub device: Option<String>,
    pub login_time: DateTime<Utc>,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub location: Option<String>,
}

impl From<LoginLog> for LoginLogResponse {
    fn from(log: LoginLog) -> Self {
        LoginLogResponse {
            id: log.id,
            account_id: log.account_id,
            email: log.email,
            role: log.role,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            browser: log.browser,
            os: log.os,
            device: log.device,
            login_time: log.login_time,
            success: log.success,
            failure_reason: log.failure_reason,
            location: log.location,
        }
    }
}
