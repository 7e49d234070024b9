use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use super::CompostingStage;

// Set to true to trace arming and cancellation of stage timers
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Sent when a stage timer runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedStage {
    pub stage: CompostingStage,
    /// Generation of the composting state the timer was armed under.
    pub generation: u64,
}

struct PendingStage {
    stage: CompostingStage,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the one-shot timer for the composting stage in progress.
///
/// At most one timer is pending. When it fires, the stage and generation it
/// was armed for are sent on the elapsed channel. Cancelling does not drain
/// expiries already queued there; the receiver decides whether they are
/// still current.
pub struct StageScheduler {
    pending: Option<PendingStage>,
    elapsed_tx: mpsc::UnboundedSender<ElapsedStage>,
}

impl StageScheduler {
    pub fn new(elapsed_tx: mpsc::UnboundedSender<ElapsedStage>) -> Self {
        Self {
            pending: None,
            elapsed_tx,
        }
    }

    /// Arms a timer for `stage`, replacing whatever was pending.
    pub fn arm(&mut self, stage: CompostingStage, generation: u64, delay: Duration) {
        self.cancel();

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let elapsed_tx = self.elapsed_tx.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(delay) => {
                    log_info!("composting stage {} elapsed after {:?}", stage.index(), delay);
                    if elapsed_tx.send(ElapsedStage { stage, generation }).is_err() {
                        log_warn!("stage {} elapsed but nobody is listening", stage.index());
                    }
                }
                _ = token_clone.cancelled() => {
                    log_debug!("stage {} timer cancelled", stage.index());
                }
            }
        });

        log_debug!(
            "armed stage {} timer (generation {}) for {:?}",
            stage.index(),
            generation,
            delay
        );
        self.pending = Some(PendingStage {
            stage,
            cancel_token,
            handle,
        });
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel_token.cancel();
            pending.handle.abort();
        }
    }

    /// Stage whose timer is armed and has not fired yet.
    pub fn pending_stage(&self) -> Option<CompostingStage> {
        self.pending
            .as_ref()
            .filter(|pending| !pending.handle.is_finished())
            .map(|pending| pending.stage)
    }
}

impl Drop for StageScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_the_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = StageScheduler::new(tx);

        scheduler.arm(CompostingStage::Heating, 1, Duration::from_secs(1_800));
        assert_eq!(scheduler.pending_stage(), Some(CompostingStage::Heating));

        time::sleep(Duration::from_secs(1_799)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            ElapsedStage {
                stage: CompostingStage::Heating,
                generation: 1,
            }
        );
        assert_eq!(scheduler.pending_stage(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = StageScheduler::new(tx);

        scheduler.arm(CompostingStage::Cooling, 3, Duration::from_secs(120));
        scheduler.cancel();
        assert_eq!(scheduler.pending_stage(), None);

        time::sleep(Duration::from_secs(600)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = StageScheduler::new(tx);

        scheduler.arm(CompostingStage::Heating, 1, Duration::from_secs(60));
        scheduler.arm(CompostingStage::Grinding, 2, Duration::from_secs(120));

        time::sleep(Duration::from_secs(121)).await;
        let elapsed = rx.try_recv().unwrap();
        assert_eq!(elapsed.stage, CompostingStage::Grinding);
        assert_eq!(elapsed.generation, 2);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_leaves_queued_expiries_for_the_receiver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = StageScheduler::new(tx);

        scheduler.arm(CompostingStage::Heating, 1, Duration::from_secs(60));
        time::sleep(Duration::from_secs(61)).await;
        scheduler.cancel();
        scheduler.arm(CompostingStage::Heating, 4, Duration::from_secs(60));

        // The old expiry is still queued; only its generation tells it apart.
        assert_eq!(rx.try_recv().unwrap().generation, 1);
        assert!(rx.try_recv().is_err());
    }
}
