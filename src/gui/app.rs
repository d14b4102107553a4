//! Main application state for the AskAI overlay
//!
//! Contains the AskaiApp struct and initialization logic.

use std::sync::{Arc, Mutex};

use iced::{window, Point, Task};
use tokio::sync::mpsc;
use tracing::info;

use crate::hotkey::AppEvent;
use crate::models::ModelRotation;
use crate::overlay::OverlayState;

use super::messages::Message;

/// Main application state
pub struct AskaiApp {
    /// Overlay display/interaction state machine
    pub(crate) overlay: OverlayState,
    /// Model rotation, shared with in-flight query fallback
    pub(crate) rotation: Arc<Mutex<ModelRotation>>,
    /// UI event queue receiver, taken by the subscription once
    pub(crate) events: Arc<Mutex<Option<mpsc::UnboundedReceiver<AppEvent>>>>,
    /// Last known pointer position, window-relative
    pub(crate) cursor: Point,
    /// Last known window origin
    pub(crate) window_pos: Point,
}

impl AskaiApp {
    /// Create a new AskaiApp instance
    pub fn new(
        rotation: Arc<Mutex<ModelRotation>>,
        events: mpsc::UnboundedReceiver<AppEvent>,
    ) -> (Self, Task<Message>) {
        let app = Self {
            overlay: OverlayState::new(),
            rotation,
            events: Arc::new(Mutex::new(Some(events))),
            cursor: Point::ORIGIN,
            window_pos: Point::ORIGIN,
        };

        info!("🚀 AskAI overlay initialized");

        // Learn where the window actually landed so dragging has a
        // correct starting origin
        let init_task = window::get_latest()
            .and_then(window::get_position)
            .and_then(|position| Task::done(Message::WindowMoved(position)));

        (app, init_task)
    }
}
