// Platform-agnostic warning tone backend trait
use crate::error::ToneInitiationError;

pub trait ToneBackend: Send {
    /// Start the short platform alert tone.
    ///
    /// Returns once initiation is known to have succeeded or failed.
    /// Implementations that defer resource teardown must not block on it
    /// here.
    fn play_warning_tone(&self) -> Result<(), ToneInitiationError>;
}
