//! Input simulation module using Linux evdev/uinput
//!
//! Synthesizes the "copy selection" key chord without X11 dependencies.
//! Works on both X11 and Wayland.

use anyhow::{Context, Result};
use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, Key};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Virtual keyboard for synthesizing the copy chord
pub struct VirtualKeyboard {
    device: evdev::uinput::VirtualDevice,
}

impl VirtualKeyboard {
    /// Create a new virtual keyboard device
    pub fn new() -> Result<Self> {
        // Only the keys this program ever synthesizes
        let mut keys = AttributeSet::<Key>::new();
        keys.insert(Key::KEY_LEFTCTRL);
        keys.insert(Key::KEY_C);

        let device = VirtualDeviceBuilder::new()?
            .name("AskAI Virtual Keyboard")
            .with_keys(&keys)?
            .build()
            .context("Failed to create virtual keyboard")?;

        info!("⌨️ Virtual keyboard created");
        Ok(Self { device })
    }

    /// Synthesize Ctrl+C, asking the focused application to copy its
    /// current selection to the clipboard
    pub fn copy_chord(&mut self) -> Result<()> {
        self.key_combo(&[Key::KEY_LEFTCTRL], Key::KEY_C)
    }

    /// Press and release a single key
    fn tap_key(&mut self, key: Key) -> Result<()> {
        self.press_key(key)?;
        thread::sleep(Duration::from_millis(10));
        self.release_key(key)?;
        Ok(())
    }

    fn press_key(&mut self, key: Key) -> Result<()> {
        debug!("Key down: {:?}", key);
        self.device.emit(&[evdev::InputEvent::new(
            evdev::EventType::KEY,
            key.code(),
            1, // Press
        )])?;
        Ok(())
    }

    fn release_key(&mut self, key: Key) -> Result<()> {
        debug!("Key up: {:?}", key);
        self.device.emit(&[evdev::InputEvent::new(
            evdev::EventType::KEY,
            key.code(),
            0, // Release
        )])?;
        Ok(())
    }

    /// Type a key combination (e.g., Ctrl+C)
    fn key_combo(&mut self, modifiers: &[Key], key: Key) -> Result<()> {
        // Press modifiers
        for modifier in modifiers {
            self.press_key(*modifier)?;
            thread::sleep(Duration::from_millis(5));
        }

        // Tap the main key
        self.tap_key(key)?;

        // Release modifiers in reverse order
        for modifier in modifiers.iter().rev() {
            self.release_key(*modifier)?;
            thread::sleep(Duration::from_millis(5));
        }

        Ok(())
    }
}
