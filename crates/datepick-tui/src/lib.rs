use datepick_core::config::PickerConfig;
use std::io;

// Widget library
pub mod common;
pub mod listeners;
pub mod pickers;
pub mod position;
pub mod styles;

// Flux architecture modules
pub mod actions;
pub mod demo;
pub mod dispatcher;
pub mod logger;
pub mod stores;
pub mod ui;
mod app;
mod keyboard;
mod tui;

pub use app::App;

/// Run the demo page until the user quits
pub async fn tui_main(config: PickerConfig) -> io::Result<()> {
    // Install color-eyre for better error messages BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    // Logs go to memory from here on; stdout belongs to the terminal
    let log_buffer = logger::init_memory_logger();
    log::debug!("Starting with {:?}", config);

    let mut terminal = tui::init()?;
    let (mut app, action_receiver) = App::new(config, log_buffer);

    let result = app.run(&mut terminal, action_receiver).await;

    // Always restore terminal
    let _ = tui::restore();

    if let Err(e) = result {
        eprintln!("Application error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
