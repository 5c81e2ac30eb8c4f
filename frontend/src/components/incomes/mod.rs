pub mod income;
pub mod income_table;

pub use income::Income;
