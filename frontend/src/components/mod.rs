pub mod cashbox;
pub mod header;
pub mod incomes;
pub mod parking;
pub mod salary;
