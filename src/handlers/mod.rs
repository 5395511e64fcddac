pub mod cart;
pub mod catalog;
pub mod notifications;
pub mod orders;
pub mod reviews;
