pub mod use_calendar;
pub mod use_cashbox;
pub mod use_incomes;
pub mod use_salary;
