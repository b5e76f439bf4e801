pub mod memory;
pub mod models;
pub mod openrouter;
pub mod order_repo;
pub mod phone_repo;

#[cfg(test)]
pub(crate) mod test_support;
