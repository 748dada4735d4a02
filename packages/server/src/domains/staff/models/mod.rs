pub mod staff_user;

pub use staff_user::{CreateStaffUser, StaffMember, StaffUser};
