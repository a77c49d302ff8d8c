mod employees;
pub mod models;

pub use employees::{EmployeeStore, StoreError};
pub use models::{Employee, EmployeeUpdate};
