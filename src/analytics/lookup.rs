//! Canned per-day waste analytics shown on the AI prediction screen.
//!
//! Five days of September 2025 carry data. Any other date falls back to the
//! first of them.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

const DATA_YEAR: i32 = 2025;
const DATA_MONTH: u32 = 9;
const FALLBACK_DAY: u32 = 11;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WasteSummary {
    pub anorganik: u32,
    pub jam: &'static str,
    pub organik: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WasteRecord {
    pub day: u32,
    /// Items dropped per hour, midnight first.
    pub hourly: [u32; 24],
    pub prediction: &'static str,
    pub summary: WasteSummary,
    pub peak_hour: u32,
    pub peak_value: u32,
}

impl WasteRecord {
    pub fn max_value(&self) -> u32 {
        self.hourly.iter().copied().max().unwrap_or(0)
    }
}

static RECORDS: [WasteRecord; 5] = [
    WasteRecord {
        day: 11,
        hourly: [0, 0, 0, 0, 8, 0, 12, 0, 0, 0, 0, 0, 50, 18, 0, 0, 15, 0, 0, 0, 0, 0, 0, 0],
        prediction: "18:00 pm - 01:00 am",
        summary: WasteSummary { anorganik: 28, jam: "12:00 pm", organik: 22 },
        peak_hour: 12,
        peak_value: 50,
    },
    WasteRecord {
        day: 12,
        hourly: [0, 0, 0, 0, 15, 0, 8, 0, 0, 0, 0, 0, 45, 60, 0, 0, 20, 0, 0, 0, 0, 0, 0, 0],
        prediction: "17:30 pm - 00:30 am",
        summary: WasteSummary { anorganik: 35, jam: "01:00 pm", organik: 25 },
        peak_hour: 13,
        peak_value: 60,
    },
    WasteRecord {
        day: 13,
        hourly: [0, 0, 0, 0, 5, 0, 18, 0, 0, 0, 42, 0, 25, 12, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0],
        prediction: "19:00 pm - 02:00 am",
        summary: WasteSummary { anorganik: 18, jam: "10:00 am", organik: 24 },
        peak_hour: 10,
        peak_value: 42,
    },
    WasteRecord {
        day: 14,
        hourly: [0, 0, 0, 0, 10, 0, 5, 0, 0, 0, 0, 0, 22, 15, 0, 38, 12, 0, 0, 0, 0, 0, 0, 0],
        prediction: "18:30 pm - 01:30 am",
        summary: WasteSummary { anorganik: 20, jam: "03:00 pm", organik: 18 },
        peak_hour: 15,
        peak_value: 38,
    },
    WasteRecord {
        day: 15,
        hourly: [0, 0, 0, 0, 12, 0, 8, 0, 0, 0, 0, 55, 30, 20, 0, 0, 18, 0, 0, 0, 0, 0, 0, 0],
        prediction: "17:00 pm - 00:00 am",
        summary: WasteSummary { anorganik: 32, jam: "11:00 am", organik: 23 },
        peak_hour: 11,
        peak_value: 55,
    },
];

fn find(date: NaiveDate) -> Option<&'static WasteRecord> {
    if date.year() != DATA_YEAR || date.month() != DATA_MONTH {
        return None;
    }
    RECORDS.iter().find(|record| record.day == date.day())
}

/// Record for `date`, or the 11 September record when there is none.
pub fn lookup(date: NaiveDate) -> &'static WasteRecord {
    find(date).unwrap_or_else(|| {
        RECORDS
            .iter()
            .find(|record| record.day == FALLBACK_DAY)
            .unwrap_or(&RECORDS[0])
    })
}

/// Whether the calendar lets the user pick `date`.
pub fn is_selectable(date: NaiveDate) -> bool {
    find(date).is_some()
}

pub(crate) fn data_month() -> (i32, u32) {
    (DATA_YEAR, DATA_MONTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn september(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn exact_dates_hit_their_record() {
        let record = lookup(september(13));
        assert_eq!(record.peak_hour, 10);
        assert_eq!(record.peak_value, 42);
        assert_eq!(record.summary.jam, "10:00 am");

        for day in 11..=15 {
            assert_eq!(lookup(september(day)).day, day);
        }
    }

    #[test]
    fn other_dates_fall_back_to_the_eleventh() {
        let others = [
            september(10),
            september(16),
            september(1),
            NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 13).unwrap(),
        ];
        for date in others {
            assert_eq!(lookup(date).day, 11, "{date}");
            assert!(!is_selectable(date));
        }
    }

    #[test]
    fn peaks_match_the_hourly_series() {
        for record in &RECORDS {
            assert_eq!(record.max_value(), record.peak_value);
            assert_eq!(record.hourly[record.peak_hour as usize], record.peak_value);
        }
    }
}
