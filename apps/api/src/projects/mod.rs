pub mod handlers;
pub mod payload;
