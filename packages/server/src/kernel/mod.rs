//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod mailer;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use mailer::{mailer_from_config, ConsoleMailer, SmtpMailer};
pub use traits::*;
