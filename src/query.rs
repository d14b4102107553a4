//! Query Orchestrator
//!
//! Drives the capture → prompt-build → dispatch-with-fallback sequence for
//! a single query run. Fallback is scoped to quota-class errors only: other
//! failures (malformed prompt, network outage) are not solved by switching
//! models and would otherwise cause a slow serial sweep through the whole
//! rotation on every transient failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{info, warn};

use crate::llm::LlmClient;
use crate::models::ModelRotation;
use crate::selection::{Clipboard, CopySynth, SelectionReader, SystemClipboard};

/// Fixed instruction prefixed to every captured selection
const PROMPT_INSTRUCTION: &str = "Give me just the answer, with no justification:";

pub const LOADING_PLACEHOLDER: &str = "Loading...";
pub const EXHAUSTED_RESPONSE: &str = "All models have exhausted their quota.";
pub const EXHAUSTED_STATUS: &str = "Quotas exhausted";
pub const NO_SELECTION_STATUS: &str = "No text selected";

/// UI-bound updates published during a query run, in order
#[derive(Debug, Clone, PartialEq)]
pub enum QueryUpdate {
    Status(String),
    Response(String),
    ShowWindow,
}

/// Terminal state of a single query run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// A model answered; the cursor stays on it
    Answered { model: String },
    /// Nothing new on the clipboard, or whitespace only
    NoSelection,
    /// Every model in the rotation hit its quota; cursor restored
    AllExhausted,
    /// Non-quota error; no fallback attempted
    Failed,
}

/// Build the deterministic prompt for a captured selection
pub fn build_prompt(selection: &str) -> String {
    format!("{}\n\n{}", PROMPT_INSTRUCTION, selection)
}

/// Owns the retry/fallback policy for query runs.
///
/// The rotation cursor is shared with the hotkey-driven model cycling, so
/// it sits behind a mutex; the in-flight flag keeps a second ask-hotkey
/// press from racing a running query.
pub struct QueryOrchestrator {
    rotation: Arc<Mutex<ModelRotation>>,
    llm: Arc<dyn LlmClient>,
    in_flight: AtomicBool,
}

impl QueryOrchestrator {
    pub fn new(rotation: Arc<Mutex<ModelRotation>>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            rotation,
            llm,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn rotation(&self) -> Arc<Mutex<ModelRotation>> {
        Arc::clone(&self.rotation)
    }

    /// Claim the single in-flight slot. Returns false if a run is active.
    pub fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the in-flight slot
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    fn rotation_guard(&self) -> MutexGuard<'_, ModelRotation> {
        self.rotation.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Execute one query run, publishing every UI update through `publish`.
    ///
    /// The selection capture blocks for the settle interval, so this is
    /// meant to run on a worker thread, never on the UI thread.
    pub async fn run<C: Clipboard, K: CopySynth>(
        &self,
        reader: &mut SelectionReader<C, K>,
        publish: &mut dyn FnMut(QueryUpdate),
    ) -> RunOutcome {
        publish(QueryUpdate::Status("Retrieving selection...".to_string()));

        let selection = match reader.capture() {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                // Benign: report via status only, don't force the overlay
                // visible over whatever the user is doing.
                publish(QueryUpdate::Status(NO_SELECTION_STATUS.to_string()));
                return RunOutcome::NoSelection;
            }
        };

        publish(QueryUpdate::ShowWindow);
        publish(QueryUpdate::Status("Sending to AI...".to_string()));
        publish(QueryUpdate::Response(LOADING_PLACEHOLDER.to_string()));

        let prompt = build_prompt(&selection);

        let (start_index, attempts) = {
            let rotation = self.rotation_guard();
            (rotation.cursor(), rotation.len())
        };

        for _ in 0..attempts {
            let model = self.rotation_guard().current().to_string();
            publish(QueryUpdate::Status(format!("{}...", model)));

            match self.llm.generate(&model, &prompt).await {
                Ok(answer) => {
                    info!("✅ {} answered ({} chars)", model, answer.len());
                    publish(QueryUpdate::Response(answer));
                    publish(QueryUpdate::Status(model.clone()));
                    return RunOutcome::Answered { model };
                }
                Err(e) if e.is_quota_exhausted() => {
                    warn!("Quota exhausted on {}: {}", model, e);
                    let advanced = self.rotation_guard().try_advance();
                    if advanced {
                        let next = self.rotation_guard().current().to_string();
                        publish(QueryUpdate::Status(format!(
                            "Quota exhausted, trying {}...",
                            next
                        )));
                        continue;
                    }
                    // Undo the fallback movement so a failed query does not
                    // silently alter the user's cycling state.
                    self.rotation_guard().reset(start_index);
                    publish(QueryUpdate::Response(EXHAUSTED_RESPONSE.to_string()));
                    publish(QueryUpdate::Status(EXHAUSTED_STATUS.to_string()));
                    return RunOutcome::AllExhausted;
                }
                Err(e) => {
                    warn!("Query failed on {}: {}", model, e);
                    publish(QueryUpdate::Response(format!("Error: {}", e)));
                    publish(QueryUpdate::Status("Error".to_string()));
                    return RunOutcome::Failed;
                }
            }
        }

        // Every loop arm returns; reaching here means the rotation was
        // mutated out from under us mid-run.
        warn!("Query run fell through after {} attempts", attempts);
        publish(QueryUpdate::Status("Failed after all attempts".to_string()));
        RunOutcome::Failed
    }

    /// Entry point for the ask hotkey: runs the whole pipeline on a
    /// dedicated worker thread, marshaling every update back through
    /// `publish`. A press while a run is in flight is dropped.
    pub fn spawn(self: &Arc<Self>, settle: Duration, publish: impl FnMut(QueryUpdate) + Send + 'static) {
        if !self.try_begin() {
            info!("Query already in flight, ignoring ask hotkey");
            return;
        }

        let orchestrator = Arc::clone(self);
        let spawned = std::thread::Builder::new()
            .name("askai-query".to_string())
            .spawn(move || {
                let mut publish = publish;
                orchestrator.run_on_worker(settle, &mut publish);
                orchestrator.finish();
            });

        if let Err(e) = spawned {
            warn!("Failed to spawn query worker: {}", e);
            self.finish();
        }
    }

    fn run_on_worker(&self, settle: Duration, publish: &mut dyn FnMut(QueryUpdate)) {
        let clipboard = match SystemClipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                publish(QueryUpdate::Status(format!("Clipboard unavailable: {}", e)));
                return;
            }
        };
        let keyboard = match crate::input::VirtualKeyboard::new() {
            Ok(keyboard) => keyboard,
            Err(e) => {
                warn!("Virtual keyboard unavailable: {}", e);
                publish(QueryUpdate::Status(format!(
                    "Input synthesis unavailable: {}",
                    e
                )));
                return;
            }
        };
        let mut reader = SelectionReader::new(clipboard, keyboard, settle);

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("Failed to build query runtime: {}", e);
                publish(QueryUpdate::Status("Error".to_string()));
                return;
            }
        };

        let outcome = runtime.block_on(self.run(&mut reader, publish));
        info!("Query run finished: {:?}", outcome);
    }
}
