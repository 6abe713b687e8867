use thiserror::Error;

/// The one failure the bridge models: the warning tone never started.
///
/// Never crosses the channel boundary; `ToneChannel` collapses it to a
/// boolean result.
#[derive(Debug, Error)]
pub enum ToneInitiationError {
    /// The platform tone resource could not be acquired.
    #[error("tone resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// The resource was acquired but playback did not start.
    #[error("tone playback failed to start: {0}")]
    StartFailed(String),
}
