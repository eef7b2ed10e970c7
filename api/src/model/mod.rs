pub mod auth;
pub mod booking;
pub mod equipment;
pub mod room;
pub mod user;
