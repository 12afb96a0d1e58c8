pub mod account_service;
pub mod message_service;
pub mod token_service;
