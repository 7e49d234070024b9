use chrono::{DateTime, Utc};

use super::{CompostingStage, StageTimings};

pub const FINISHED_LABEL: &str = "Selesai";

const MINUTE_MS: i64 = 60 * 1000;

/// Time left in the current stage as shown under the progress bar.
///
/// Empty for stages without a clock. Minutes round up, so a stage with one
/// second left still reads "1 menit".
pub fn remaining_time(
    timings: &StageTimings,
    stage: CompostingStage,
    stage_started_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    let Some(duration) = timings.duration(stage) else {
        return String::new();
    };

    let duration_ms = duration.as_millis() as i64;
    let elapsed_ms = (now - stage_started_at).num_milliseconds();
    let remaining_ms = (duration_ms - elapsed_ms).max(0);

    if remaining_ms == 0 {
        return FINISHED_LABEL.to_string();
    }

    let minutes = (remaining_ms + MINUTE_MS - 1) / MINUTE_MS;
    let hours = minutes / 60;

    if hours > 0 {
        format!("Dalam waktu {hours} jam {} menit lagi", minutes % 60)
    } else {
        format!("Dalam waktu {minutes} menit lagi")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 11, 8, 0, 0).unwrap()
    }

    #[test]
    fn untimed_stages_have_no_label() {
        let timings = StageTimings::default();
        for stage in [CompostingStage::Idle, CompostingStage::Ready, CompostingStage::Done] {
            assert_eq!(remaining_time(&timings, stage, start(), start()), "");
        }
    }

    #[test]
    fn rounds_minutes_up() {
        let timings = StageTimings::default();
        let now = start() + Duration::seconds(29 * 60 + 59);
        assert_eq!(
            remaining_time(&timings, CompostingStage::Heating, start(), now),
            "Dalam waktu 1 menit lagi"
        );
        assert_eq!(
            remaining_time(&timings, CompostingStage::Heating, start(), start()),
            "Dalam waktu 30 menit lagi"
        );
    }

    #[test]
    fn shows_hours_once_an_hour_remains() {
        let timings = StageTimings::default();
        assert_eq!(
            remaining_time(&timings, CompostingStage::Grinding, start(), start()),
            "Dalam waktu 1 jam 0 menit lagi"
        );
        let now = start() + Duration::seconds(30);
        assert_eq!(
            remaining_time(&timings, CompostingStage::Grinding, start(), now),
            "Dalam waktu 1 jam 0 menit lagi"
        );
        let now = start() + Duration::seconds(61);
        assert_eq!(
            remaining_time(&timings, CompostingStage::Grinding, start(), now),
            "Dalam waktu 59 menit lagi"
        );
    }

    #[test]
    fn finished_at_and_after_the_deadline() {
        let timings = StageTimings::default();
        for offset in [120, 121, 10_000] {
            let now = start() + Duration::seconds(offset);
            assert_eq!(
                remaining_time(&timings, CompostingStage::Cooling, start(), now),
                FINISHED_LABEL
            );
        }
    }

    #[test]
    fn never_increases_as_time_passes() {
        let timings = StageTimings::default();
        let minutes_left = |label: &str| -> i64 {
            if label == FINISHED_LABEL {
                return 0;
            }
            let numbers: Vec<i64> = label
                .split_whitespace()
                .filter_map(|word| word.parse().ok())
                .collect();
            match numbers.as_slice() {
                [hours, minutes] => hours * 60 + minutes,
                [minutes] => *minutes,
                _ => panic!("unexpected label {label}"),
            }
        };

        let mut previous = i64::MAX;
        for second in (0..=3_700).step_by(17) {
            let now = start() + Duration::seconds(second);
            let label = remaining_time(&timings, CompostingStage::Grinding, start(), now);
            let left = minutes_left(&label);
            assert!(left <= previous, "{label} went up at {second}s");
            previous = left;
        }
        assert_eq!(previous, 0);
    }
}
