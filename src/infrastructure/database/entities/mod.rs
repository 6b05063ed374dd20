//! Database entities module

pub mod category;
pub mod music;
pub mod user;

pub use category::Entity as Category;
pub use music::Entity as Music;
pub use user::Entity as User;
