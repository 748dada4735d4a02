// HTTP middleware
pub mod allowed_hosts;
pub mod jwt_auth;

pub use allowed_hosts::*;
pub use jwt_auth::*;
