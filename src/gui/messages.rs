//! Message types for the AskAI overlay
//!
//! All messages that can be sent to update the application state.

use iced::Point;

use crate::hotkey::AppEvent;

/// Messages that drive the application
#[derive(Debug, Clone)]
pub enum Message {
    /// An event from the hotkey listener or a query worker, drained off
    /// the UI queue
    Event(AppEvent),

    // Window dragging
    CursorMoved(Point),
    DragPressed,
    DragReleased,

    /// The window origin was learned or updated
    WindowMoved(Point),
}
