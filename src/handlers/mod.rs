pub mod chat;
pub mod orders;
pub mod phones;
