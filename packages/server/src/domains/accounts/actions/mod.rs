//! Accounts domain actions

mod login;

pub use login::{login, Credentials, LoginForm, LoginToken};
