pub mod customer;

pub use customer::{Customer, CustomerDetails};
