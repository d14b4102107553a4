//! Global Hotkey Routing
//!
//! Maps four global, suppress-free key-down events onto the running
//! application: the only entry point into the process from outside its own
//! windowing loop. The listener thread never mutates overlay state itself;
//! it enqueues events for the UI thread, and the ask key hands off to a
//! query worker thread.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::error::{AskError, AskResult};
use crate::query::{QueryOrchestrator, QueryUpdate};

/// The four global hotkey actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Up: start a query run
    Ask,
    /// Down: show/hide the overlay
    ToggleVisibility,
    /// Right: toggle ghost mode
    ToggleGhost,
    /// Left: cycle to the next model
    CycleModel,
}

/// Events for the UI thread's single-consumer queue
#[derive(Debug, Clone)]
pub enum AppEvent {
    Action(HotkeyAction),
    Query(QueryUpdate),
}

/// Key → action dispatch table, decided once at startup
pub fn map_key(key: rdev::Key) -> Option<HotkeyAction> {
    match key {
        rdev::Key::UpArrow => Some(HotkeyAction::Ask),
        rdev::Key::DownArrow => Some(HotkeyAction::ToggleVisibility),
        rdev::Key::RightArrow => Some(HotkeyAction::ToggleGhost),
        rdev::Key::LeftArrow => Some(HotkeyAction::CycleModel),
        _ => None,
    }
}

/// Routes global key events to the orchestrator and the UI queue
pub struct HotkeyRouter {
    orchestrator: Arc<QueryOrchestrator>,
    events: UnboundedSender<AppEvent>,
    settle: Duration,
}

impl HotkeyRouter {
    pub fn new(
        orchestrator: Arc<QueryOrchestrator>,
        events: UnboundedSender<AppEvent>,
        settle: Duration,
    ) -> Self {
        Self {
            orchestrator,
            events,
            settle,
        }
    }

    /// Start the global listener on its own thread and return.
    ///
    /// The underlying key events are not suppressed; other applications
    /// still receive them. rdev offers no unhook, so the listener runs
    /// until process exit (it never blocks shutdown).
    pub fn start(self) -> AskResult<()> {
        std::thread::Builder::new()
            .name("askai-hotkeys".to_string())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if let rdev::EventType::KeyPress(key) = event.event_type {
                        if let Some(action) = map_key(key) {
                            self.handle(action);
                        }
                    }
                });
                if let Err(e) = result {
                    warn!("Global hotkey listener failed: {:?}", e);
                }
            })
            .map_err(|e| AskError::Hotkey(e.to_string()))?;

        info!("⌨️ Global hotkeys registered: ⬆ ask | ⬇ hide | ➡ ghost | ⬅ model");
        Ok(())
    }

    fn handle(&self, action: HotkeyAction) {
        debug!("Hotkey: {:?}", action);
        match action {
            HotkeyAction::Ask => {
                // Query runs get their own worker thread; its updates are
                // marshaled back through the same UI queue.
                let events = self.events.clone();
                self.orchestrator.spawn(self.settle, move |update| {
                    let _ = events.send(AppEvent::Query(update));
                });
            }
            _ => {
                let _ = self.events.send(AppEvent::Action(action));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table() {
        assert_eq!(map_key(rdev::Key::UpArrow), Some(HotkeyAction::Ask));
        assert_eq!(
            map_key(rdev::Key::DownArrow),
            Some(HotkeyAction::ToggleVisibility)
        );
        assert_eq!(
            map_key(rdev::Key::RightArrow),
            Some(HotkeyAction::ToggleGhost)
        );
        assert_eq!(
            map_key(rdev::Key::LeftArrow),
            Some(HotkeyAction::CycleModel)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(map_key(rdev::Key::KeyA), None);
        assert_eq!(map_key(rdev::Key::Return), None);
        assert_eq!(map_key(rdev::Key::Escape), None);
        assert_eq!(map_key(rdev::Key::Space), None);
    }
}
