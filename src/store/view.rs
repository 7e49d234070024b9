use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    analytics::{format_long_date, lookup, month_name, CalendarMonth, WasteRecord},
    composting::{progress_percentage, remaining_time, CompostingStage, StageTimings},
    devices::format_install_date,
    models::{Device, Location},
    navigation::Page,
    waste::WasteGauge,
};

use super::AppState;

/// What the current page shows, derived from [`AppState`] at a point in time.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageView {
    Home {
        devices: Vec<Device>,
    },
    #[serde(rename_all = "camelCase")]
    Profile {
        device_count: usize,
    },
    Notifications,
    #[serde(rename_all = "camelCase")]
    AddLocation {
        location_permission: bool,
        wifi_permission: bool,
    },
    LocationMap {
        location: Location,
    },
    #[serde(rename_all = "camelCase")]
    InputDevice {
        device_name: String,
        install_date: String,
        can_submit: bool,
    },
    #[serde(rename_all = "camelCase")]
    Dashboard {
        devices: Vec<Device>,
        /// Header reset button; always there.
        show_reset: bool,
        /// "Coba Lagi dari Awal" under the device list, once one is paired.
        show_start_over: bool,
    },
    #[serde(rename_all = "camelCase")]
    MenuTask {
        selected_device: Option<Device>,
    },
    #[serde(rename_all = "camelCase")]
    TaskPraKompos {
        stage: CompostingStage,
        status_text: &'static str,
        process_label: &'static str,
        progress_percentage: f64,
        /// Only shown while heating, grinding or cooling.
        remaining: Option<String>,
        can_start: bool,
        finished: bool,
    },
    #[serde(rename_all = "camelCase")]
    TaskAnorganik {
        gauge: WasteGauge,
        demo_button_label: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    TaskAi {
        header_date: String,
        record: WasteRecord,
        max_value: u32,
        calendar: Option<CalendarMonth>,
        calendar_month: &'static str,
    },
}

impl PageView {
    pub fn derive(
        state: &AppState,
        timings: &StageTimings,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Self {
        match state.page {
            Page::Home => PageView::Home {
                devices: state.devices.all().to_vec(),
            },
            Page::Profile => PageView::Profile {
                device_count: state.devices.len(),
            },
            Page::Notifications => PageView::Notifications,
            Page::AddLocation => PageView::AddLocation {
                location_permission: state.location_permission,
                wifi_permission: state.wifi_permission,
            },
            Page::LocationMap => PageView::LocationMap {
                location: state.location.clone(),
            },
            Page::InputDevice => PageView::InputDevice {
                device_name: state.device_name.clone(),
                install_date: format_install_date(today),
                can_submit: !state.device_name.trim().is_empty(),
            },
            Page::Dashboard => PageView::Dashboard {
                devices: state.devices.all().to_vec(),
                show_reset: true,
                show_start_over: !state.devices.is_empty(),
            },
            Page::MenuTask => PageView::MenuTask {
                selected_device: state.selected_device.clone(),
            },
            Page::TaskPraKompos => {
                let composting = &state.composting;
                let stage = composting.stage;
                let remaining = stage.is_timed().then(|| {
                    remaining_time(timings, stage, composting.stage_started_at, now)
                });
                PageView::TaskPraKompos {
                    stage,
                    status_text: stage.status_text(),
                    process_label: stage.process_label(),
                    progress_percentage: progress_percentage(stage),
                    remaining,
                    can_start: stage == CompostingStage::Idle,
                    finished: stage.is_ready(),
                }
            }
            Page::TaskAnorganik => PageView::TaskAnorganik {
                gauge: state.waste.gauge(),
                demo_button_label: state.waste.demo_button_label(),
            },
            Page::TaskAi => {
                let record = *lookup(state.selected_date);
                PageView::TaskAi {
                    header_date: format_long_date(state.selected_date),
                    max_value: record.max_value(),
                    record,
                    calendar: state
                        .calendar_open
                        .then(|| CalendarMonth::for_selection(state.selected_date)),
                    calendar_month: month_name(state.selected_date),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 11, 8, 0, 0).unwrap()
    }

    fn derive(state: &AppState, at: DateTime<Utc>) -> PageView {
        PageView::derive(state, &StageTimings::default(), at, at.date_naive())
    }

    #[test]
    fn composting_view_shows_remaining_only_while_timed() {
        let mut state = AppState::new(now(), now().date_naive());
        state.page = Page::TaskPraKompos;

        match derive(&state, now()) {
            PageView::TaskPraKompos {
                remaining,
                can_start,
                progress_percentage,
                finished,
                ..
            } => {
                assert_eq!(remaining, None);
                assert!(can_start);
                assert!(!finished);
                assert_eq!(progress_percentage, 0.0);
            }
            other => panic!("unexpected view {other:?}"),
        }

        state.composting.enter(CompostingStage::Heating, now());
        match derive(&state, now() + Duration::minutes(10)) {
            PageView::TaskPraKompos { remaining, process_label, .. } => {
                assert_eq!(remaining.as_deref(), Some("Dalam waktu 20 menit lagi"));
                assert_eq!(process_label, "Proses Pemanasan");
            }
            other => panic!("unexpected view {other:?}"),
        }

        state.composting.enter(CompostingStage::Ready, now());
        match derive(&state, now()) {
            PageView::TaskPraKompos {
                remaining,
                can_start,
                finished,
                ..
            } => {
                assert_eq!(remaining, None);
                assert!(!can_start);
                assert!(finished);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn dashboard_always_offers_the_header_reset() {
        let mut state = AppState::new(now(), now().date_naive());
        state.page = Page::Dashboard;

        match derive(&state, now()) {
            PageView::Dashboard {
                show_reset,
                show_start_over,
                ..
            } => {
                assert!(show_reset);
                assert!(!show_start_over);
            }
            other => panic!("unexpected view {other:?}"),
        }

        state.devices.add("Dapur", "123456".into(), "110925".into());
        match derive(&state, now()) {
            PageView::Dashboard {
                show_reset,
                show_start_over,
                ..
            } => {
                assert!(show_reset);
                assert!(show_start_over);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn ai_view_falls_back_for_dates_without_data() {
        let mut state = AppState::new(now(), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        state.page = Page::TaskAi;

        match derive(&state, now()) {
            PageView::TaskAi { record, calendar, max_value, .. } => {
                assert_eq!(record.day, 11);
                assert_eq!(max_value, 50);
                assert!(calendar.is_none());
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn views_serialize_with_a_page_tag() {
        let state = AppState::new(now(), now().date_naive());
        let json = serde_json::to_value(derive(&state, now())).unwrap();
        assert_eq!(json["page"], "home");
    }
}
