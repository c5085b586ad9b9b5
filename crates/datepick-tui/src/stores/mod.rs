pub mod app_logs_store;
pub mod demo_store;
/// Store modules that hold application state
/// Each store is responsible for a slice of the application state
pub mod ui_store;

pub use app_logs_store::AppLogsStore;
pub use demo_store::{DemoState, DemoStore};
pub use ui_store::UIStore;
