//! GUI module using iced
//!
//! Renders the floating overlay window and applies overlay mutations one
//! message at a time on the UI thread.

use iced::futures::SinkExt;
use iced::widget::{column, container, mouse_area, scrollable, text};
use iced::{window, Element, Length, Point, Subscription, Task, Theme};
use std::sync::Arc;
use tracing::debug;

// Sub-modules
pub mod app;
pub mod messages;

// Re-exports for convenience
pub use app::AskaiApp;
pub use messages::Message;

use crate::hotkey::{AppEvent, HotkeyAction};
use crate::overlay::{ThemeRole, HELP_TEXT};
use crate::query::QueryUpdate;

impl AskaiApp {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Event(AppEvent::Action(action)) => match action {
                HotkeyAction::ToggleVisibility => {
                    let visible = self.overlay.toggle_visibility();
                    return set_window_mode(visible);
                }
                HotkeyAction::ToggleGhost => {
                    let ghosted = self.overlay.toggle_ghost_mode();
                    debug!("Ghost mode: {}", ghosted);
                }
                HotkeyAction::CycleModel => {
                    let mut rotation =
                        self.rotation.lock().unwrap_or_else(|p| p.into_inner());
                    self.overlay.cycle_model(&mut rotation);
                }
                // Ask never reaches the UI queue: the router hands it
                // straight to a query worker
                HotkeyAction::Ask => {}
            },
            Message::Event(AppEvent::Query(update)) => match update {
                QueryUpdate::Status(status) => self.overlay.set_status(status),
                QueryUpdate::Response(response) => self.overlay.set_response(response),
                QueryUpdate::ShowWindow => {
                    self.overlay.set_visible(true);
                    return set_window_mode(true);
                }
            },
            Message::CursorMoved(point) => {
                self.cursor = point;
                if self.overlay.dragging() {
                    if let Some((x, y)) = self.overlay.drag_to(
                        point.x,
                        point.y,
                        (self.window_pos.x, self.window_pos.y),
                    ) {
                        self.window_pos = Point::new(x, y);
                        let target = self.window_pos;
                        return window::get_latest()
                            .and_then(move |id| window::move_to(id, target));
                    }
                }
            }
            Message::DragPressed => {
                self.overlay.begin_drag(self.cursor.x, self.cursor.y);
            }
            Message::DragReleased => {
                self.overlay.end_drag();
            }
            Message::WindowMoved(position) => {
                self.window_pos = position;
            }
        }
        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        // The single-consumer UI queue: hotkey actions and query updates
        // drain here and nowhere else.
        let events = Arc::clone(&self.events);
        Subscription::run_with_id(
            "app-events",
            iced::stream::channel(100, move |mut output| async move {
                let receiver = events.lock().unwrap_or_else(|p| p.into_inner()).take();
                let Some(mut receiver) = receiver else {
                    return;
                };
                while let Some(event) = receiver.recv().await {
                    let _ = output.send(Message::Event(event)).await;
                }
            }),
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let chrome_bg = self.overlay.background(ThemeRole::Chrome);
        let chrome_fg = self.overlay.foreground(ThemeRole::Chrome);
        let content_bg = self.overlay.background(ThemeRole::Content);
        let content_fg = self.overlay.foreground(ThemeRole::Content);

        let status = text(self.overlay.status_text())
            .size(12)
            .style(move |_theme| text::Style {
                color: Some(chrome_fg),
            });

        // Read-only between writes: plain text, no editing affordance
        let response = text(self.overlay.response_text())
            .size(14)
            .style(move |_theme| text::Style {
                color: Some(content_fg),
            });

        let mut response_area = scrollable(
            container(response)
                .width(Length::Fill)
                .padding(8)
                .style(move |_theme| container::Style {
                    background: Some(content_bg.into()),
                    ..container::Style::default()
                }),
        )
        .height(Length::Fill);

        if !self.overlay.scrollbar_visible() {
            response_area = response_area.direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ));
        }

        let help = text(HELP_TEXT).size(10).style(move |_theme| text::Style {
            color: Some(chrome_fg),
        });

        let surface = container(column![status, response_area, help].spacing(5))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(8)
            .style(move |_theme| container::Style {
                background: Some(chrome_bg.into()),
                ..container::Style::default()
            });

        mouse_area(surface)
            .on_press(Message::DragPressed)
            .on_release(Message::DragReleased)
            .on_move(Message::CursorMoved)
            .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Show or hide the overlay window without destroying its state
fn set_window_mode(visible: bool) -> Task<Message> {
    let mode = if visible {
        window::Mode::Windowed
    } else {
        window::Mode::Hidden
    };
    window::get_latest().and_then(move |id| window::change_mode(id, mode))
}
