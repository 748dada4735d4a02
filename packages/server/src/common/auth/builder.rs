use super::{AuthError, Capability};
use crate::common::entity_ids::UserId;

/// Entry point for authorization checks
///
/// Usage:
/// ```ignore
/// Actor::new(user_id, is_staff, is_superuser)
///     .can(Capability::ViewDashboard)
///     .check()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    user_id: UserId,
    is_staff: bool,
    is_superuser: bool,
}

impl Actor {
    /// `is_staff` / `is_superuser` come from the verified JWT claims.
    pub fn new(user_id: UserId, is_staff: bool, is_superuser: bool) -> Self {
        Self {
            user_id,
            is_staff,
            is_superuser,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityCheck {
        CapabilityCheck {
            actor: self,
            capability,
        }
    }
}

/// Pending check after a capability has been named
pub struct CapabilityCheck {
    actor: Actor,
    capability: Capability,
}

impl CapabilityCheck {
    /// Perform the authorization check.
    ///
    /// Ticket work is gated on having a staff profile, which the ticket
    /// handlers resolve from the database; any authenticated identity passes
    /// here. The dashboard needs the staff or superuser flag.
    pub fn check(self) -> Result<(), AuthError> {
        let allowed = match self.capability {
            Capability::WorkTickets => true,
            Capability::ViewDashboard => self.actor.is_staff || self.actor.is_superuser,
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(format!(
                "user {} may not {}",
                self.actor.user_id,
                self.capability.describe()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_requires_staff_or_superuser() {
        let plain = Actor::new(UserId::new(), false, false);
        assert!(matches!(
            plain.can(Capability::ViewDashboard).check(),
            Err(AuthError::PermissionDenied(_))
        ));

        let staff = Actor::new(UserId::new(), true, false);
        assert!(staff.can(Capability::ViewDashboard).check().is_ok());

        let superuser = Actor::new(UserId::new(), false, true);
        assert!(superuser.can(Capability::ViewDashboard).check().is_ok());
    }

    #[test]
    fn test_any_identity_may_attempt_ticket_work() {
        let plain = Actor::new(UserId::new(), false, false);
        assert!(plain.can(Capability::WorkTickets).check().is_ok());
    }
}
