pub mod remaining;
pub mod scheduler;
pub mod stage;

pub use remaining::{remaining_time, FINISHED_LABEL};
pub use scheduler::{ElapsedStage, StageScheduler};
pub use stage::{progress_percentage, CompostingStage, CompostingState, StageTimings};
