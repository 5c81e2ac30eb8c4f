pub mod cashbox;
pub mod cashbox_calendar;
pub mod cashbox_table;

pub use cashbox::Cashbox;
pub use cashbox_calendar::CashboxCalendar;
