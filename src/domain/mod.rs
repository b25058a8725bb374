pub mod event;
pub mod schema;
