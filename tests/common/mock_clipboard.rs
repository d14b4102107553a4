//! Mock clipboard collaborators for testing
//!
//! A scripted clipboard plus a copy-synth that records invocations, so
//! selection capture runs without touching the real system clipboard.

use std::collections::VecDeque;
use std::time::Duration;

use askai::error::{AskError, AskResult};
use askai::selection::{Clipboard, CopySynth, SelectionReader};

/// Clipboard returning a scripted sequence of reads
pub struct MockClipboard {
    reads: VecDeque<AskResult<String>>,
}

impl MockClipboard {
    pub fn with_reads(reads: Vec<AskResult<String>>) -> Self {
        Self {
            reads: reads.into(),
        }
    }
}

impl Clipboard for MockClipboard {
    fn read(&mut self) -> AskResult<String> {
        self.reads
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Copy-synth recording how many chords were sent
pub struct MockCopySynth {
    pub sent: usize,
    pub fail: bool,
}

impl MockCopySynth {
    pub fn new() -> Self {
        Self {
            sent: 0,
            fail: false,
        }
    }
}

impl Default for MockCopySynth {
    fn default() -> Self {
        Self::new()
    }
}

impl CopySynth for MockCopySynth {
    fn send_copy(&mut self) -> AskResult<()> {
        self.sent += 1;
        if self.fail {
            return Err(AskError::Input("mock synth failure".to_string()));
        }
        Ok(())
    }
}

/// Reader that sees `before` on the pre-copy snapshot and `after` once the
/// copy chord has "landed"
pub fn scripted_reader(
    before: &str,
    after: &str,
) -> SelectionReader<MockClipboard, MockCopySynth> {
    SelectionReader::new(
        MockClipboard::with_reads(vec![Ok(before.to_string()), Ok(after.to_string())]),
        MockCopySynth::new(),
        Duration::ZERO,
    )
}
