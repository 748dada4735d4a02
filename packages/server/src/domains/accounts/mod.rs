//! Accounts domain - login identities, password verification and JWTs
//!
//! A `User` is the identity a staff member signs in with; the staff profile
//! used for ticket assignment lives in the staff domain.

pub mod actions;
pub mod jwt;
pub mod models;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use models::user::{CreateUser, User};
