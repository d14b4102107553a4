//! Overlay State Machine
//!
//! The single source of truth for what the floating window renders:
//! visibility, ghost mode, drag state, status and response text. The query
//! pipeline never touches this directly — it publishes updates that the UI
//! thread applies one at a time.
//!
//! Ghost mode is modeled as an explicit role-tagged palette rather than a
//! widget-tree walk: every themed element is either Chrome or Content, and
//! toggling recolors the Chrome set to the transparent key color while the
//! Content set keeps its colors so the answer stays legible.

use iced::Color;

use crate::models::ModelRotation;

pub const WINDOW_WIDTH: f32 = 350.0;
pub const WINDOW_HEIGHT: f32 = 200.0;
pub const WINDOW_MARGIN_RIGHT: f32 = 10.0;
pub const WINDOW_MARGIN_BOTTOM: f32 = 50.0;

/// Color key rendered as see-through by the windowing layer in ghost mode
pub const TRANSPARENT_KEY: Color = Color {
    r: 0.004,
    g: 0.004,
    b: 0.004,
    a: 1.0,
};

pub const HELP_TEXT: &str = "⬆ Send | ⬇ Hide";

const INITIAL_STATUS: &str = "⬆ Select some text and press Up";
const INITIAL_RESPONSE: &str = "Waiting...\n\nSelect some text, then press ⬆";

/// Every themed element is one of these; ghost mode only touches Chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRole {
    Chrome,
    Content,
}

/// Original (non-ghost) colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub chrome_bg: Color,
    pub chrome_fg: Color,
    pub content_bg: Color,
    pub content_fg: Color,
    /// Chrome text color while in ghost mode, for readability over the key
    pub ghost_fg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            chrome_bg: Color::from_rgba(1.0, 1.0, 1.0, 0.95),
            chrome_fg: Color::from_rgb(0.4, 0.4, 0.4),
            content_bg: Color::from_rgb(0.96, 0.96, 0.96),
            content_fg: Color::from_rgb(0.2, 0.2, 0.2),
            ghost_fg: Color::WHITE,
        }
    }
}

/// Overlay display/interaction state
#[derive(Debug, Clone)]
pub struct OverlayState {
    visible: bool,
    ghost_mode: bool,
    drag_origin: Option<(f32, f32)>,
    status_text: String,
    response_text: String,
    palette: Palette,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            visible: true,
            ghost_mode: false,
            drag_origin: None,
            status_text: INITIAL_STATUS.to_string(),
            response_text: INITIAL_RESPONSE.to_string(),
            palette: Palette::default(),
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn ghost_mode(&self) -> bool {
        self.ghost_mode
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    pub fn dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Idempotent visibility writer. Hiding never destroys window content
    /// or position, so showing again restores the prior view.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Flip ghost mode. Pure presentation: colors resolve differently
    /// through `background`/`foreground` and the scroll affordance hides,
    /// nothing else changes.
    pub fn toggle_ghost_mode(&mut self) -> bool {
        self.ghost_mode = !self.ghost_mode;
        self.ghost_mode
    }

    /// Effective background color for an element with the given role
    pub fn background(&self, role: ThemeRole) -> Color {
        match role {
            ThemeRole::Chrome if self.ghost_mode => TRANSPARENT_KEY,
            ThemeRole::Chrome => self.palette.chrome_bg,
            // The response area is excluded from ghost recoloring so the
            // content stays legible.
            ThemeRole::Content => self.palette.content_bg,
        }
    }

    /// Effective text color for an element with the given role
    pub fn foreground(&self, role: ThemeRole) -> Color {
        match role {
            ThemeRole::Chrome if self.ghost_mode => self.palette.ghost_fg,
            ThemeRole::Chrome => self.palette.chrome_fg,
            ThemeRole::Content => self.palette.content_fg,
        }
    }

    /// The scroll affordance is hidden while ghosted
    pub fn scrollbar_visible(&self) -> bool {
        !self.ghost_mode
    }

    /// Record the drag anchor on pointer-down inside the chrome
    pub fn begin_drag(&mut self, px: f32, py: f32) {
        self.drag_origin = Some((px, py));
    }

    /// Reposition so the anchor stays under the pointer. `px`/`py` are
    /// window-relative pointer coordinates, `win` the current window
    /// origin. No snapping, no bounds clamping — the window may be moved
    /// off-screen.
    pub fn drag_to(&self, px: f32, py: f32, win: (f32, f32)) -> Option<(f32, f32)> {
        let (ox, oy) = self.drag_origin?;
        Some((win.0 + px - ox, win.1 + py - oy))
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }

    pub fn set_response(&mut self, text: impl Into<String>) {
        self.response_text = text.into();
    }

    /// Advance the rotation to the next model and render the roster so the
    /// fallback order is visible without issuing a query.
    pub fn cycle_model(&mut self, rotation: &mut ModelRotation) {
        let current = rotation.cycle_next().to_string();
        self.status_text = current.clone();
        self.response_text = roster_text(rotation, &current);
    }
}

fn roster_text(rotation: &ModelRotation, current: &str) -> String {
    let mut lines = Vec::new();
    for (i, model) in rotation.models().iter().enumerate() {
        if i == rotation.cursor() {
            lines.push(format!("  ▶ {} (active)", model));
        } else {
            lines.push(format!("  • {}", model));
        }
    }
    format!(
        "Model: {}\n\nAvailable models:\n{}",
        current,
        lines.join("\n")
    )
}
