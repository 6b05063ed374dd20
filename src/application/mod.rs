//! Application layer: use-case services over the domain repositories

pub mod catalog;
pub mod identity;
pub mod ports;

pub use catalog::{CategoryService, MusicService, MusicView};
pub use identity::{AuthResult, UserService};
pub use ports::{Mailer, OutgoingMail};
