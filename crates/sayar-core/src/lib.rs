// sayar tone bridge - platform-agnostic core
// Module declarations
pub mod consts;
pub mod error;
pub mod tone;

use crate::tone::ToneBackend;

/// Outcome of one method-channel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOutcome {
    /// The method was handled; the payload reports whether the tone
    /// started.
    Handled(bool),
    /// The channel has no handler for this method name.
    NotImplemented,
}

/// The tone method channel: dispatches named, argument-less calls from the
/// application layer to the platform tone backend.
pub struct ToneChannel<'a> {
    backend: &'a dyn ToneBackend,
}

impl<'a> ToneChannel<'a> {
    pub fn new(backend: &'a dyn ToneBackend) -> Self {
        Self { backend }
    }

    /// Channel identifier the application layer addresses.
    pub fn name(&self) -> &'static str {
        consts::CHANNEL_NAME
    }

    /// Dispatch one method call.
    ///
    /// Backend errors never escape; they collapse to `Handled(false)`.
    pub fn handle(&self, method: &str) -> MethodOutcome {
        if method != consts::METHOD_PLAY_WARNING_TONE {
            log::debug!("no handler for method {:?}", method);
            return MethodOutcome::NotImplemented;
        }

        match self.backend.play_warning_tone() {
            Ok(()) => MethodOutcome::Handled(true),
            Err(err) => {
                log::warn!("warning tone did not start: {}", err);
                MethodOutcome::Handled(false)
            }
        }
    }
}
