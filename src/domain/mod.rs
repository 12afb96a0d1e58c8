pub mod auth;
pub mod message;
pub mod page;
pub mod user;
