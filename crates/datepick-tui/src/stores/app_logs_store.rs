/// AppLogsStore mirrors the in-memory log buffer for the event log panel
use crate::actions::Action;
use crate::logger::LogBuffer;
use std::sync::{Arc, RwLock};

/// Lines kept for display; the buffer itself holds more
const VISIBLE_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct AppLogsState {
    /// Formatted log lines, oldest first
    pub logs: Vec<String>,
}

pub struct AppLogsStore {
    state: Arc<RwLock<AppLogsState>>,
    log_buffer: LogBuffer,
}

impl AppLogsStore {
    pub fn new(log_buffer: LogBuffer) -> Self {
        let store = Self {
            state: Arc::new(RwLock::new(AppLogsState::default())),
            log_buffer,
        };
        store.refresh_logs();
        store
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> AppLogsState {
        self.state.read().unwrap().clone()
    }

    /// Every action may have logged something; pick it up
    pub fn reduce(&self, _action: &Action) {
        self.refresh_logs();
    }

    pub fn refresh_logs(&self) {
        let logs = self.log_buffer.get_recent_logs(VISIBLE_LOG_LINES);
        self.state.write().unwrap().logs = logs;
    }
}
