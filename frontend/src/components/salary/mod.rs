pub mod salary;
pub mod salary_add;

pub use salary::Salary;
