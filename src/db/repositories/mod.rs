pub mod account_repository;
pub mod item_repository;
pub mod login_log_repository;
pub mod message_repository;
pub mod request_repository;
