//! Tenancy domain module: companies, their employees, and tenant registration.
//!
//! A company is the tenant boundary. It is created together with the identity
//! that owns it and exclusively owns its employees and inventory items.

pub mod company;
pub mod employee;
pub mod registration;

pub use company::{Company, CompanyUpdate};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use registration::{Registration, TenantRegistration};
