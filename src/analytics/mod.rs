pub mod calendar;
pub mod lookup;

pub use calendar::{format_long_date, month_name, CalendarDay, CalendarMonth};
pub use lookup::{is_selectable, lookup, WasteRecord, WasteSummary};
