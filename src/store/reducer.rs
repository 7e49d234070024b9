//! Pure state transitions.
//!
//! `reduce` never touches clocks, randomness, or tasks. Callers pass the
//! current time and any generated values in, and carry out the returned
//! [`Effect`]s themselves.

use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    analytics::is_selectable,
    composting::{CompostingStage, StageTimings},
    models::Location,
    navigation::Page,
    waste::full_alert_link,
};

use super::AppState;

pub const EMPTY_NAME_ALERT: &str = "Please enter a device name";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Page),
    Back,
    Reset,
    SetDeviceName(String),
    /// `id` and `install_date` are generated by the caller.
    AddDevice {
        name: String,
        id: String,
        install_date: String,
    },
    SelectDevice(String),
    /// The pre-compost card on the task menu: resets the cycle and opens it.
    OpenComposting,
    StartComposting,
    /// A stage timer ran out. `generation` is the one it was armed under.
    StageElapsed {
        stage: CompostingStage,
        generation: u64,
    },
    ToggleFillDemo,
    SendFullAlert {
        contact: String,
        message: String,
    },
    OpenCalendar,
    CloseCalendar,
    SelectDate(NaiveDate),
    PermissionsGranted(Location),
    LocationUpdated(Location),
    LocationFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ArmStageTimer {
        stage: CompostingStage,
        generation: u64,
        delay: Duration,
    },
    CancelStageTimer,
    Alert(String),
    OpenLink(String),
}

#[derive(Debug, Clone, Copy)]
pub struct ReduceContext {
    pub now: DateTime<Utc>,
    pub timings: StageTimings,
}

impl ReduceContext {
    pub fn new(now: DateTime<Utc>, timings: StageTimings) -> Self {
        Self { now, timings }
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<Effect>,
}

/// Applies `action` to a copy of `state`.
///
/// Errors leave the caller's state untouched. Rejections the user should
/// see (an empty device name, a failed location lookup) are not errors;
/// they come back as [`Effect::Alert`].
pub fn reduce(state: &AppState, action: Action, ctx: &ReduceContext) -> Result<Transition> {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match action {
        Action::Navigate(target) => navigate(&mut next, target),
        Action::Back => back(&mut next),
        Action::Reset => {
            next.page = Page::Home;
            next.history.clear();
            next.devices.clear();
            next.selected_device = None;
            next.device_name.clear();
            next.composting.reset(ctx.now);
            effects.push(Effect::CancelStageTimer);
        }
        Action::SetDeviceName(name) => next.device_name = name,
        Action::AddDevice {
            name,
            id,
            install_date,
        } => match next.devices.add(&name, id, install_date) {
            Some(_) => {
                next.device_name.clear();
                navigate(&mut next, Page::Dashboard);
            }
            None => effects.push(Effect::Alert(EMPTY_NAME_ALERT.into())),
        },
        Action::SelectDevice(id) => {
            let device = next.devices.find(&id)?.clone();
            next.selected_device = Some(device);
            navigate(&mut next, Page::MenuTask);
        }
        Action::OpenComposting => {
            next.composting.reset(ctx.now);
            navigate(&mut next, Page::TaskPraKompos);
            effects.push(Effect::CancelStageTimer);
        }
        Action::StartComposting => {
            if next.composting.stage != CompostingStage::Idle {
                bail!(
                    "composting already running (stage {})",
                    next.composting.stage.index()
                );
            }
            enter_stage(&mut next, CompostingStage::Heating, ctx, &mut effects);
        }
        Action::StageElapsed { stage, generation } => {
            // Expiries from a cancelled timer can still arrive after a restart.
            if next.composting.is_current(stage, generation) {
                if let Some(following) = stage.next_timed() {
                    enter_stage(&mut next, following, ctx, &mut effects);
                }
            }
        }
        Action::ToggleFillDemo => next.waste.toggle_fill_demo(),
        Action::SendFullAlert { contact, message } => {
            let link = full_alert_link(&next.waste, &contact, &message)?;
            effects.push(Effect::OpenLink(link));
        }
        Action::OpenCalendar => next.calendar_open = true,
        Action::CloseCalendar => next.calendar_open = false,
        Action::SelectDate(date) => {
            if !is_selectable(date) {
                bail!("no waste data for {date}");
            }
            next.selected_date = date;
        }
        Action::PermissionsGranted(location) => {
            next.location = location;
            next.location_permission = true;
            next.wifi_permission = true;
            navigate(&mut next, Page::LocationMap);
        }
        Action::LocationUpdated(location) => next.location = location,
        Action::LocationFailed(message) => effects.push(Effect::Alert(message)),
    }

    Ok(Transition {
        state: next,
        effects,
    })
}

fn navigate(state: &mut AppState, target: Page) {
    if state.page == target {
        return;
    }
    state.history.push(state.page);
    state.page = target;
}

fn back(state: &mut AppState) {
    if let Some(previous) = state.history.pop() {
        state.page = previous;
    } else if let Some(previous) = state.page.predecessor() {
        state.page = previous;
    }
}

fn enter_stage(
    state: &mut AppState,
    stage: CompostingStage,
    ctx: &ReduceContext,
    effects: &mut Vec<Effect>,
) {
    state.composting.enter(stage, ctx.now);
    match ctx.timings.duration(stage) {
        Some(delay) => effects.push(Effect::ArmStageTimer {
            stage,
            generation: state.composting.timer_generation,
            delay,
        }),
        None => effects.push(Effect::CancelStageTimer),
    }
}
