// HTTP routes
pub mod accounts;
pub mod categories;
pub mod complaints;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod staff;

pub use accounts::*;
pub use categories::*;
pub use complaints::*;
pub use dashboard::*;
pub use feedback::*;
pub use health::*;
pub use staff::*;
