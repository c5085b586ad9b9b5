pub mod code_box;
pub mod event_log;
/// UI module - panels and page layout
pub mod layout;

pub use code_box::CodeBox;
pub use event_log::EventLogPanel;
pub use layout::{render_layout, render_page};
