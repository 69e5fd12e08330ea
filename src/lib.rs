pub mod app;
pub mod catalog;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod palette;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_progress, resolve_data_path};
pub use store::GoalStore;
