pub mod auth;
pub mod categories;
pub mod health;
pub mod music;
pub mod request_id;
pub mod users;
