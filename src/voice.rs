//! Voice input state.
//!
//! The recognizer itself is platform-provided; this module only tracks
//! whether capture is possible and running, turns recognition results into
//! input text and maps recognizer error codes to advisory messages. Nothing
//! here ever blocks typing or a send.

use crate::i18n::Language;
use tracing::{debug, warn};

pub const UNSUPPORTED_MESSAGE: &str = "Speech recognition is not supported on this device.";

/// One recognized chunk of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptSegment {
    pub fn final_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }

    pub fn interim(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Unsupported,
    Started,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct VoiceCapture {
    supported: bool,
    recording: bool,
    error: Option<String>,
}

impl VoiceCapture {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            recording: false,
            error: (!supported).then(|| UNSUPPORTED_MESSAGE.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Advisory text for the last problem, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start or stop capture. A no-op when the device has no recognizer.
    pub fn toggle(&mut self) -> ToggleOutcome {
        if !self.supported {
            return ToggleOutcome::Unsupported;
        }
        if self.recording {
            self.recording = false;
            debug!("Voice capture stopped");
            ToggleOutcome::Stopped
        } else {
            self.recording = true;
            self.error = None;
            debug!("Voice capture started");
            ToggleOutcome::Started
        }
    }

    /// Input text for a batch of results: final text first, then interim.
    pub fn on_result(&self, segments: &[TranscriptSegment]) -> String {
        let (finals, interims): (Vec<_>, Vec<_>) = segments.iter().partition(|s| s.is_final);
        finals
            .iter()
            .chain(interims.iter())
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Record a recognizer error; capture is over either way.
    pub fn on_error(&mut self, code: &str, language: Language) {
        warn!("Speech recognition error: {}", code);
        let message = match code {
            "not-allowed" | "service-not-allowed" => {
                "Microphone access denied. Please enable microphone permissions and try again."
                    .to_string()
            }
            "no-speech" => "No speech was detected. Please try again.".to_string(),
            "language-not-supported" => format!(
                "The selected language ({}) is not supported for speech input on this device.",
                language.display_name()
            ),
            other => format!("Speech recognition error: {}.", other),
        };
        self.error = Some(message);
        self.recording = false;
    }

    pub fn on_end(&mut self) {
        self.recording = false;
    }

    /// Stop an active capture; returns whether one was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.recording, false)
    }
}
