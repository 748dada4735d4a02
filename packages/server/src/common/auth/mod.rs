/// Authorization for staff operations.
///
/// Handlers check what the authenticated identity may do before touching
/// tickets or reports:
///
/// ```rust
/// use complaints_core::common::{Actor, Capability, UserId};
///
/// let actor = Actor::new(UserId::new(), true, false);
/// assert!(actor.can(Capability::ViewDashboard).check().is_ok());
/// ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityCheck};
pub use capability::Capability;
pub use errors::AuthError;
