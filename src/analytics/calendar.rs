use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::lookup::{data_month, is_selectable};

const WEEKDAYS: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Header shown above the chart, e.g. `Kamis, 11, 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{weekday}, {}, {}", date.day(), date.year())
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub enabled: bool,
    pub selected: bool,
}

/// The date picker. It always shows the month that has data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub month_name: &'static str,
    pub year: i32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn for_selection(selected: NaiveDate) -> Self {
        let (year, month) = data_month();
        let days: Vec<CalendarDay> = (1..=31)
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                enabled: is_selectable(date),
                selected: date == selected,
            })
            .collect();

        let month_name = days
            .first()
            .map(|day| month_name(day.date))
            .unwrap_or(MONTHS[(month - 1) as usize]);

        Self {
            month_name,
            year,
            days,
        }
    }

    pub fn enabled_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|day| day.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date_uses_indonesian_weekdays() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 11).unwrap();
        assert_eq!(format_long_date(date), "Kamis, 11, 2025");
        assert_eq!(month_name(date), "September");
    }

    #[test]
    fn only_days_with_data_are_enabled() {
        let selected = NaiveDate::from_ymd_opt(2025, 9, 13).unwrap();
        let calendar = CalendarMonth::for_selection(selected);

        assert_eq!(calendar.days.len(), 30);
        assert_eq!(calendar.month_name, "September");
        let enabled: Vec<u32> = calendar.enabled_days().map(|day| day.day).collect();
        assert_eq!(enabled, [11, 12, 13, 14, 15]);

        let picked: Vec<u32> = calendar.days.iter().filter(|d| d.selected).map(|d| d.day).collect();
        assert_eq!(picked, [13]);
    }
}
