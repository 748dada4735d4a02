//! Typed ID definitions for the portal's entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for login identities.
pub struct User;

/// Marker type for complainants.
pub struct Customer;

/// Marker type for complaint categories.
pub struct Category;

/// Marker type for staff profiles attached to a login identity.
pub struct StaffUser;

/// Marker type for tickets (row key, not the human-facing ticket number).
pub struct Ticket;

/// Marker type for ticket audit-trail entries.
pub struct TicketHistory;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;
pub type CustomerId = Id<Customer>;
pub type CategoryId = Id<Category>;
pub type StaffUserId = Id<StaffUser>;
pub type TicketId = Id<Ticket>;
pub type TicketHistoryId = Id<TicketHistory>;
