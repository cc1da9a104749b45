pub mod account;
pub mod borrow_request;
pub mod item;
pub mod login_log;
pub mod message;
