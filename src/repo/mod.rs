//! Data access, one repository per entity.
//!
//! Handlers never run queries directly; they go through these so the
//! lifecycle and CRUD logic stays free of SQL.

pub mod budgets;
pub mod expenses;
pub mod users;

pub use budgets::BudgetRepo;
pub use expenses::ExpenseRepo;
pub use users::UserRepo;
