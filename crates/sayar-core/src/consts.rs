use std::time::Duration;

/// Method channel identifier, as the application layer addresses it.
pub const CHANNEL_NAME: &str = "com.stock_sayar/tone";

/// The single method the channel understands.
pub const METHOD_PLAY_WARNING_TONE: &str = "playWarningTone";

/// Length of the alert tone.
pub const TONE_DURATION: Duration = Duration::from_millis(500);

/// How long a backend holds its tone resource before releasing it.
/// Slightly longer than the tone so playback completes first.
pub const RELEASE_DELAY: Duration = Duration::from_millis(600);
