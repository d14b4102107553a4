//! Selection capture via the system clipboard
//!
//! There is no portable "read the current selection" API, so the capture
//! works by synthesizing a copy chord and diffing the clipboard before and
//! after. Callers should know that a successful capture overwrites the
//! system clipboard with the selected text.

use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AskError, AskResult};
use crate::input::VirtualKeyboard;

/// Read access to the system clipboard
pub trait Clipboard {
    fn read(&mut self) -> AskResult<String>;
}

/// Synthesizes the OS copy command
pub trait CopySynth {
    fn send_copy(&mut self) -> AskResult<()>;
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> AskResult<Self> {
        let inner =
            arboard::Clipboard::new().map_err(|e| AskError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> AskResult<String> {
        self.inner
            .get_text()
            .map_err(|e| AskError::Clipboard(e.to_string()))
    }
}

impl CopySynth for VirtualKeyboard {
    fn send_copy(&mut self) -> AskResult<()> {
        self.copy_chord().map_err(|e| AskError::Input(e.to_string()))
    }
}

/// Captures the currently selected text by copy-and-diff
pub struct SelectionReader<C: Clipboard, K: CopySynth> {
    clipboard: C,
    synth: K,
    settle: Duration,
}

impl<C: Clipboard, K: CopySynth> SelectionReader<C, K> {
    pub fn new(clipboard: C, synth: K, settle: Duration) -> Self {
        Self {
            clipboard,
            synth,
            settle,
        }
    }

    /// Capture the current selection, or `None` if no new selection was
    /// detected.
    ///
    /// Snapshots the clipboard, synthesizes a copy chord, waits a fixed
    /// settle interval for the focused application to service it, then
    /// reads the clipboard again. An unchanged clipboard is reported as
    /// "no new selection" — a heuristic, not a guarantee: re-selecting
    /// identical text reads as nothing, and another application writing
    /// the clipboard during the settle window reads as a selection.
    ///
    /// Clipboard read failures are swallowed and treated as empty content.
    pub fn capture(&mut self) -> Option<String> {
        let before = self.clipboard.read().unwrap_or_default();

        if let Err(e) = self.synth.send_copy() {
            warn!("Copy synthesis failed: {}", e);
        }

        // Fixed wait, not a poll: the copy either landed by now or we
        // report no selection.
        std::thread::sleep(self.settle);

        let after = self.clipboard.read().unwrap_or_default();

        if after == before {
            debug!("Clipboard unchanged after copy chord; no new selection");
            return None;
        }

        Some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct FakeClipboard {
        reads: VecDeque<AskResult<String>>,
    }

    impl FakeClipboard {
        fn with_reads(reads: Vec<AskResult<String>>) -> Self {
            Self {
                reads: reads.into(),
            }
        }
    }

    impl Clipboard for FakeClipboard {
        fn read(&mut self) -> AskResult<String> {
            self.reads
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    struct FakeSynth {
        sent: usize,
        fail: bool,
    }

    impl FakeSynth {
        fn new() -> Self {
            Self {
                sent: 0,
                fail: false,
            }
        }
    }

    impl CopySynth for FakeSynth {
        fn send_copy(&mut self) -> AskResult<()> {
            self.sent += 1;
            if self.fail {
                return Err(AskError::Input("uinput unavailable".to_string()));
            }
            Ok(())
        }
    }

    fn reader(reads: Vec<AskResult<String>>) -> SelectionReader<FakeClipboard, FakeSynth> {
        SelectionReader::new(
            FakeClipboard::with_reads(reads),
            FakeSynth::new(),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_unchanged_clipboard_is_no_selection() {
        let mut reader = reader(vec![Ok("old".to_string()), Ok("old".to_string())]);
        assert_eq!(reader.capture(), None);
        assert_eq!(reader.synth.sent, 1);
    }

    #[test]
    fn test_changed_clipboard_is_the_selection() {
        let mut reader = reader(vec![Ok("old".to_string()), Ok("2+2".to_string())]);
        assert_eq!(reader.capture(), Some("2+2".to_string()));
    }

    #[test]
    fn test_read_failure_treated_as_empty() {
        // Baseline read fails -> treated as ""; any copied text counts as new
        let mut reader = reader(vec![
            Err(AskError::Clipboard("denied".to_string())),
            Ok("fresh".to_string()),
        ]);
        assert_eq!(reader.capture(), Some("fresh".to_string()));
    }

    #[test]
    fn test_both_reads_failing_is_no_selection() {
        let mut reader = reader(vec![
            Err(AskError::Clipboard("denied".to_string())),
            Err(AskError::Clipboard("denied".to_string())),
        ]);
        assert_eq!(reader.capture(), None);
    }

    #[test]
    fn test_copy_synth_failure_is_swallowed() {
        let mut reader = reader(vec![Ok("old".to_string()), Ok("old".to_string())]);
        reader.synth.fail = true;
        // Synthesis failure leaves the clipboard unchanged -> no selection
        assert_eq!(reader.capture(), None);
    }
}
