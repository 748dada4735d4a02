pub mod user;

pub use user::{CreateUser, User};
