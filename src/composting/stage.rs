use std::time::Duration;

use anyhow::{anyhow, Error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const HEATING: Duration = Duration::from_secs(30 * 60);
const GRINDING: Duration = Duration::from_secs(60 * 60);
const COOLING: Duration = Duration::from_secs(2 * 60);

/// Steps of the pre-compost cycle. Serialized as the ordinal `0..=5`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum CompostingStage {
    Idle,
    Heating,
    Grinding,
    Cooling,
    Ready,
    /// Declared alongside `Ready` but never entered by any transition.
    Done,
}

impl Default for CompostingStage {
    fn default() -> Self {
        CompostingStage::Idle
    }
}

impl CompostingStage {
    pub fn index(self) -> u8 {
        match self {
            CompostingStage::Idle => 0,
            CompostingStage::Heating => 1,
            CompostingStage::Grinding => 2,
            CompostingStage::Cooling => 3,
            CompostingStage::Ready => 4,
            CompostingStage::Done => 5,
        }
    }

    /// The stage a timer expiry moves to. `None` once the cycle is ready.
    pub fn next_timed(self) -> Option<CompostingStage> {
        match self {
            CompostingStage::Heating => Some(CompostingStage::Grinding),
            CompostingStage::Grinding => Some(CompostingStage::Cooling),
            CompostingStage::Cooling => Some(CompostingStage::Ready),
            CompostingStage::Idle | CompostingStage::Ready | CompostingStage::Done => None,
        }
    }

    /// Heating, grinding and cooling run on a clock; nothing else does.
    pub fn is_timed(self) -> bool {
        self.next_timed().is_some()
    }

    pub fn is_ready(self) -> bool {
        matches!(self, CompostingStage::Ready | CompostingStage::Done)
    }

    pub fn status_text(self) -> &'static str {
        match self {
            CompostingStage::Idle => {
                "W-Trash belum 550 gr, penuhi tempat sampahmu dengan hal-hal yang sehat!"
            }
            CompostingStage::Heating | CompostingStage::Grinding => {
                "Tunggu Sampahmu untuk W-Trash Sulap! Jadi apa yah?"
            }
            CompostingStage::Cooling => {
                "Ga sadar udah diujung aja, Pra kompos kamu udah mau siap nih!"
            }
            CompostingStage::Ready | CompostingStage::Done => {
                "Pra Kompos kamu udah siap, Manfaatin dia dengan baik ya!"
            }
        }
    }

    pub fn process_label(self) -> &'static str {
        match self {
            CompostingStage::Idle | CompostingStage::Grinding => "Proses Penggilingan",
            CompostingStage::Heating => "Proses Pemanasan",
            CompostingStage::Cooling | CompostingStage::Ready | CompostingStage::Done => {
                "Proses Pendinginan"
            }
        }
    }
}

impl From<CompostingStage> for u8 {
    fn from(stage: CompostingStage) -> Self {
        stage.index()
    }
}

impl TryFrom<u8> for CompostingStage {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CompostingStage::Idle),
            1 => Ok(CompostingStage::Heating),
            2 => Ok(CompostingStage::Grinding),
            3 => Ok(CompostingStage::Cooling),
            4 => Ok(CompostingStage::Ready),
            5 => Ok(CompostingStage::Done),
            _ => Err(anyhow!("composting stage {value} is out of range 0..=5")),
        }
    }
}

/// Display-only progress; it does not move within a stage.
pub fn progress_percentage(stage: CompostingStage) -> f64 {
    (stage.index() as f64 / 4.0 * 100.0).min(100.0)
}

/// How long each timed stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimings {
    pub heating: Duration,
    pub grinding: Duration,
    pub cooling: Duration,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            heating: HEATING,
            grinding: GRINDING,
            cooling: COOLING,
        }
    }
}

impl StageTimings {
    /// Every duration divided by `divisor`; `60` turns minutes into seconds.
    pub fn scaled(divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let base = Self::default();
        Self {
            heating: base.heating / divisor,
            grinding: base.grinding / divisor,
            cooling: base.cooling / divisor,
        }
    }

    pub fn duration(&self, stage: CompostingStage) -> Option<Duration> {
        match stage {
            CompostingStage::Heating => Some(self.heating),
            CompostingStage::Grinding => Some(self.grinding),
            CompostingStage::Cooling => Some(self.cooling),
            CompostingStage::Idle | CompostingStage::Ready | CompostingStage::Done => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompostingState {
    pub stage: CompostingStage,
    /// Reset on every stage change; only used to derive remaining time.
    pub stage_started_at: DateTime<Utc>,
    /// Bumped on every stage change and never reset. A timer armed under an
    /// older generation is stale.
    #[serde(default)]
    pub timer_generation: u64,
}

impl CompostingState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            stage: CompostingStage::Idle,
            stage_started_at: now,
            timer_generation: 0,
        }
    }

    pub fn enter(&mut self, stage: CompostingStage, now: DateTime<Utc>) {
        self.stage = stage;
        self.stage_started_at = now;
        self.timer_generation = self.timer_generation.wrapping_add(1);
    }

    /// Whether a timer armed for `stage` under `generation` still applies.
    pub fn is_current(&self, stage: CompostingStage, generation: u64) -> bool {
        self.stage == stage && self.timer_generation == generation
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.enter(CompostingStage::Idle, now);
    }
}
