pub mod catalog_service;
pub mod chat_service;
pub mod order_service;
pub mod prompt;
