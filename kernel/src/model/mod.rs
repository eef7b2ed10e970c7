pub mod auth;
pub mod booking;
pub mod equipment;
pub mod id;
pub mod principal;
pub mod role;
pub mod room;
pub mod user;
