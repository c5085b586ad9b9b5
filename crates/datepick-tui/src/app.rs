/// Main application struct and event loop
use crate::actions::Action;
use crate::demo::DemoPage;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::keyboard;
use crate::listeners::{DocumentEvent, DocumentListeners};
use crate::logger::LogBuffer;
use crate::pickers::{Picker, PickerContext};
use crate::stores::{AppLogsStore, DemoStore, UIStore};
use crate::ui::{render_layout, render_page};
use datepick_core::config::PickerConfig;
use ratatui::crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use std::io;
use std::time::Duration;

/// The demo application, following the flux architecture
pub struct App {
    /// Dispatcher for sending actions
    dispatcher: Dispatcher,

    /// Document-level listeners fed by every key and click
    listeners: DocumentListeners,

    ui_store: UIStore,

    /// Values shared by the demo sections
    demo_store: DemoStore,

    app_logs_store: AppLogsStore,

    page: DemoPage,
}

impl App {
    pub fn new(config: PickerConfig, log_buffer: LogBuffer) -> (Self, ActionReceiver) {
        let (dispatcher, action_receiver) = Dispatcher::new();
        let listeners = DocumentListeners::new();

        let ui_store = UIStore::new();
        let demo_store = DemoStore::new();
        let app_logs_store = AppLogsStore::new(log_buffer);
        let page = DemoPage::new(
            PickerContext::new(dispatcher.clone(), listeners.clone()),
            &config,
            &demo_store.get_state(),
        );

        (
            Self {
                dispatcher,
                listeners,
                ui_store,
                demo_store,
                app_logs_store,
                page,
            },
            action_receiver,
        )
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("datepick demo started");

        loop {
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.ui_store,
                    &self.demo_store,
                    &self.app_logs_store,
                    &mut self.page,
                );
            })?;

            if self.ui_store.should_exit() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key_event) => {
                                // Only process key press events (not release)
                                if key_event.kind == KeyEventKind::Press {
                                    self.handle_key(key_event);
                                }
                            }
                            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
                            _ => {}
                        }
                    }
                }

                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                    // reduce whatever the same event queued before redrawing
                    for action in action_receiver.drain() {
                        self.handle_action(&action);
                    }
                }
            }
        }

        Ok(())
    }

    /// Document listeners see the key first, then either the page or the
    /// active widget handles it
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        self.listeners.emit(&DocumentEvent::KeyDown(key_event));

        let active = self.ui_store.active_section();
        let picker_open = self.page.section(active).widget.is_open();
        match keyboard::handle_key_event(key_event, &self.ui_store, picker_open) {
            Some(action) => self.dispatcher.dispatch(action),
            None => {
                self.page.section_mut(active).widget.handle_key(key_event);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse_event.column, mouse_event.row);
        self.listeners.emit(&DocumentEvent::PointerDown(pos));

        let active = self.ui_store.active_section();
        self.page.section_mut(active).widget.handle_click(pos);
    }

    /// Route an action to the stores and widgets, then pass the new store
    /// values back down
    pub fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);

        self.ui_store.reduce(action);
        self.demo_store.reduce(action);
        self.page.reduce(action);
        self.page.sync(&self.demo_store.get_state());
        self.app_logs_store.reduce(action);
    }

    /// Draw the page into `buf` without a terminal
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        render_page(
            area,
            buf,
            &self.ui_store,
            &self.demo_store,
            &self.app_logs_store,
            &mut self.page,
        );
    }

    pub fn ui_store(&self) -> &UIStore {
        &self.ui_store
    }

    pub fn demo_store(&self) -> &DemoStore {
        &self.demo_store
    }

    pub fn page(&self) -> &DemoPage {
        &self.page
    }

    pub fn listeners(&self) -> &DocumentListeners {
        &self.listeners
    }
}
