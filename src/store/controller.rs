use std::sync::{Arc, Mutex as StdMutex, Weak};

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, Utc};
use log::{info, warn};
use serde::Serialize;
use tokio::{
    sync::{broadcast, mpsc, Mutex},
    task::JoinHandle,
};

use crate::{
    composting::{CompostingStage, ElapsedStage, StageScheduler, StageTimings},
    devices::{format_install_date, generate_device_id},
    location::{
        locate, Geocoder, PositionOptions, PositionProvider, LOCATION_UNAVAILABLE_ALERT,
        PERMISSION_DENIED_ALERT,
    },
    models::Device,
    navigation::Page,
    settings::AlertSettings,
};

use super::{reduce, Action, AppState, Effect, PageView, ReduceContext};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub state: AppState,
    pub view: PageView,
}

/// Published to subscribers after every change.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum StoreEvent {
    #[serde(rename_all = "camelCase")]
    StateChanged {
        page: Page,
        stage: CompostingStage,
        device_count: usize,
    },
    Alert {
        message: String,
    },
    OpenLink {
        url: String,
    },
}

struct StoreInner {
    state: Mutex<AppState>,
    scheduler: Mutex<StageScheduler>,
    events: broadcast::Sender<StoreEvent>,
    timings: StageTimings,
    pump: StdMutex<Option<JoinHandle<()>>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let mut guard = match self.pump.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

/// Owns the application state and the stage timer.
///
/// Cheap to clone. Must be created inside a tokio runtime: the task that
/// feeds elapsed stage timers back into the reducer is spawned here.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new(timings: StageTimings) -> Self {
        let now = Utc::now();
        let today = Local::now().date_naive();
        Self::with_state(AppState::new(now, today), timings)
    }

    pub fn with_state(state: AppState, timings: StageTimings) -> Self {
        let (elapsed_tx, elapsed_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let inner = Arc::new(StoreInner {
            state: Mutex::new(state),
            scheduler: Mutex::new(StageScheduler::new(elapsed_tx)),
            events,
            timings,
            pump: StdMutex::new(None),
        });

        let handle = tokio::spawn(stage_pump(Arc::downgrade(&inner), elapsed_rx));
        match inner.pump.lock() {
            Ok(mut guard) => *guard = Some(handle),
            Err(poisoned) => *poisoned.into_inner() = Some(handle),
        }

        Self { inner }
    }

    pub fn timings(&self) -> StageTimings {
        self.inner.timings
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    pub async fn state(&self) -> AppState {
        self.inner.state.lock().await.clone()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state().await;
        let view = PageView::derive(&state, &self.inner.timings, Utc::now(), today());
        StoreSnapshot { state, view }
    }

    /// Stage whose timer is armed and still waiting.
    pub async fn pending_stage(&self) -> Option<CompostingStage> {
        self.inner.scheduler.lock().await.pending_stage()
    }

    pub async fn dispatch(&self, action: Action) -> Result<AppState> {
        self.apply(action).await.map(|(state, _)| state)
    }

    pub async fn navigate(&self, target: Page) -> Result<AppState> {
        self.dispatch(Action::Navigate(target)).await
    }

    pub async fn back(&self) -> Result<AppState> {
        self.dispatch(Action::Back).await
    }

    pub async fn reset(&self) -> Result<AppState> {
        self.dispatch(Action::Reset).await
    }

    pub async fn set_device_name(&self, name: impl Into<String>) -> Result<AppState> {
        self.dispatch(Action::SetDeviceName(name.into())).await
    }

    /// Registers a device and moves to the dashboard. `None` when the name
    /// is blank; the user gets an alert instead.
    pub async fn add_device(&self, name: &str) -> Result<Option<Device>> {
        let id = generate_device_id(&mut rand::thread_rng());
        let install_date = format_install_date(today());

        let (state, _) = self
            .apply(Action::AddDevice {
                name: name.to_string(),
                id: id.clone(),
                install_date,
            })
            .await?;

        if name.trim().is_empty() {
            return Ok(None);
        }

        let device = state
            .devices
            .all()
            .iter()
            .rev()
            .find(|device| device.id == id)
            .cloned();
        if let Some(device) = &device {
            info!("Paired device {} ({})", device.name, device.id);
        }
        Ok(device)
    }

    pub async fn select_device(&self, id: &str) -> Result<AppState> {
        self.dispatch(Action::SelectDevice(id.to_string())).await
    }

    pub async fn open_composting(&self) -> Result<AppState> {
        self.dispatch(Action::OpenComposting).await
    }

    pub async fn start_composting(&self) -> Result<AppState> {
        self.dispatch(Action::StartComposting).await
    }

    pub async fn toggle_fill_demo(&self) -> Result<AppState> {
        self.dispatch(Action::ToggleFillDemo).await
    }

    /// Builds the "bin full" message link and publishes it as an event.
    pub async fn send_full_alert(&self, alert: &AlertSettings) -> Result<String> {
        let (_, effects) = self
            .apply(Action::SendFullAlert {
                contact: alert.contact.clone(),
                message: alert.message.clone(),
            })
            .await?;

        effects
            .into_iter()
            .find_map(|effect| match effect {
                Effect::OpenLink(url) => Some(url),
                _ => None,
            })
            .ok_or_else(|| anyhow!("full alert produced no link"))
    }

    pub async fn open_calendar(&self) -> Result<AppState> {
        self.dispatch(Action::OpenCalendar).await
    }

    pub async fn close_calendar(&self) -> Result<AppState> {
        self.dispatch(Action::CloseCalendar).await
    }

    pub async fn select_date(&self, date: NaiveDate) -> Result<AppState> {
        self.dispatch(Action::SelectDate(date)).await
    }

    /// The "Add Location" button. Returns whether access was granted.
    pub async fn request_permissions<P, G>(&self, provider: &P, geocoder: &G) -> Result<bool>
    where
        P: PositionProvider,
        G: Geocoder,
    {
        match locate(provider, geocoder, &PositionOptions::default()).await {
            Ok(location) => {
                self.dispatch(Action::PermissionsGranted(location)).await?;
                Ok(true)
            }
            Err(err) => {
                warn!("Permission denied: {err:#}");
                self.dispatch(Action::LocationFailed(PERMISSION_DENIED_ALERT.into()))
                    .await?;
                Ok(false)
            }
        }
    }

    /// The re-centre button on the map page.
    pub async fn refresh_location<P, G>(&self, provider: &P, geocoder: &G) -> Result<bool>
    where
        P: PositionProvider,
        G: Geocoder,
    {
        match locate(provider, geocoder, &PositionOptions::default()).await {
            Ok(location) => {
                self.dispatch(Action::LocationUpdated(location)).await?;
                Ok(true)
            }
            Err(err) => {
                warn!("Location refresh failed: {err:#}");
                self.dispatch(Action::LocationFailed(LOCATION_UNAVAILABLE_ALERT.into()))
                    .await?;
                Ok(false)
            }
        }
    }

    async fn apply(&self, action: Action) -> Result<(AppState, Vec<Effect>)> {
        let ctx = ReduceContext::new(Utc::now(), self.inner.timings);

        // Timer effects run under the state lock so arm/cancel order always
        // matches the order of the transitions that produced them.
        let mut guard = self.inner.state.lock().await;
        let transition = reduce(&guard, action, &ctx)?;
        *guard = transition.state;

        for effect in &transition.effects {
            self.run_effect(effect).await;
        }

        let state = guard.clone();
        drop(guard);

        self.emit(StoreEvent::StateChanged {
            page: state.page,
            stage: state.composting.stage,
            device_count: state.devices.len(),
        });

        Ok((state, transition.effects))
    }

    async fn run_effect(&self, effect: &Effect) {
        match effect {
            Effect::ArmStageTimer {
                stage,
                generation,
                delay,
            } => {
                self.inner
                    .scheduler
                    .lock()
                    .await
                    .arm(*stage, *generation, *delay);
            }
            Effect::CancelStageTimer => {
                self.inner.scheduler.lock().await.cancel();
            }
            Effect::Alert(message) => {
                warn!("Alert: {message}");
                self.emit(StoreEvent::Alert {
                    message: message.clone(),
                });
            }
            Effect::OpenLink(url) => {
                info!("Opening {url}");
                self.emit(StoreEvent::OpenLink { url: url.clone() });
            }
        }
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn stage_pump(inner: Weak<StoreInner>, mut elapsed_rx: mpsc::UnboundedReceiver<ElapsedStage>) {
    while let Some(ElapsedStage { stage, generation }) = elapsed_rx.recv().await {
        let Some(inner) = inner.upgrade() else {
            break;
        };
        let store = Store { inner };
        if let Err(err) = store
            .dispatch(Action::StageElapsed { stage, generation })
            .await
        {
            log::error!("Failed to advance composting stage {}: {err:#}", stage.index());
        }
    }
}
