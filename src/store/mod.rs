pub mod commands;
pub mod controller;
pub mod reducer;
pub mod state;
pub mod view;

pub use controller::{Store, StoreEvent, StoreSnapshot};
pub use reducer::{reduce, Action, Effect, ReduceContext, Transition};
pub use state::AppState;
pub use view::PageView;
