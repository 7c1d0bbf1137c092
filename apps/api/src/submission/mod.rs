pub mod extract;
pub mod form;
pub mod handlers;
pub mod store;
pub mod uploads;
