//! Alarm tone generation through the default audio output.
//!
//! Every invocation acquires its own output stream, starts a short warble
//! on it, and releases the stream after a fixed hold. `cpal` streams are
//! not `Send`, so acquisition, playback, and release all happen on a
//! per-call worker thread; the caller only waits for the initiation result.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Source};
use sayar_core::consts;
use sayar_core::error::ToneInitiationError;
use sayar_core::tone::ToneBackend;

const SAMPLE_RATE: u32 = 48_000;
const WARBLE_HIGH_HZ: f32 = 1350.0;
const WARBLE_LOW_HZ: f32 = 1080.0;
const WARBLE_SEGMENT: Duration = Duration::from_millis(125);
const AMPLITUDE: f32 = 0.25;

/// Scoped handle to an acquired tone output. Dropping it releases the
/// underlying resource.
pub trait ToneHandle {
    fn start_warning(&mut self) -> Result<(), ToneInitiationError>;
}

/// Source of tone outputs, one acquisition per invocation.
pub trait ToneDevice: Clone + Send + 'static {
    type Handle: ToneHandle;

    fn acquire(&self) -> Result<Self::Handle, ToneInitiationError>;
}

// Two-frequency square warble, mono, fixed length
struct WarbleWave {
    num_samples: usize,
    current_sample: usize,
}

impl WarbleWave {
    fn new(duration: Duration) -> Self {
        Self {
            num_samples: (duration.as_secs_f32() * SAMPLE_RATE as f32) as usize,
            current_sample: 0,
        }
    }

    fn frequency_at(t: f32) -> f32 {
        let segment = (t / WARBLE_SEGMENT.as_secs_f32()) as usize;
        if segment % 2 == 0 {
            WARBLE_HIGH_HZ
        } else {
            WARBLE_LOW_HZ
        }
    }
}

impl Iterator for WarbleWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_sample >= self.num_samples {
            return None;
        }

        let t = self.current_sample as f32 / SAMPLE_RATE as f32;
        let cycle_position = (t * Self::frequency_at(t)) % 1.0;

        self.current_sample += 1;

        // Square wave: high for first half of cycle, low for second half
        if cycle_position < 0.5 {
            Some(AMPLITUDE)
        } else {
            Some(-AMPLITUDE)
        }
    }
}

impl Source for WarbleWave {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.num_samples - self.current_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.num_samples as f32 / SAMPLE_RATE as f32,
        ))
    }
}

/// Production device: the default audio output via rodio.
#[derive(Clone)]
pub struct RodioDevice;

pub struct RodioTone {
    // held only so the stream outlives playback; dropping tears it down
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl ToneDevice for RodioDevice {
    type Handle = RodioTone;

    fn acquire(&self) -> Result<RodioTone, ToneInitiationError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ToneInitiationError::ResourceUnavailable(e.to_string()))?;
        Ok(RodioTone {
            _stream: stream,
            handle,
        })
    }
}

impl ToneHandle for RodioTone {
    fn start_warning(&mut self) -> Result<(), ToneInitiationError> {
        let warble = WarbleWave::new(consts::TONE_DURATION);
        self.handle
            .play_raw(warble.convert_samples())
            .map_err(|e| ToneInitiationError::StartFailed(e.to_string()))
    }
}

/// The resource-managed warning tone backend.
pub struct AlarmToneGenerator<D: ToneDevice> {
    device: D,
}

impl<D: ToneDevice> AlarmToneGenerator<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }
}

impl<D: ToneDevice> ToneBackend for AlarmToneGenerator<D> {
    fn play_warning_tone(&self) -> Result<(), ToneInitiationError> {
        let device = self.device.clone();
        let (result_tx, result_rx) = mpsc::channel();

        // The worker owns the whole resource lifetime: acquire, start,
        // hold, release. Only the initiation result goes back to the
        // caller, before the hold elapses.
        thread::spawn(move || match device.acquire() {
            Err(err) => {
                let _ = result_tx.send(Err(err));
            }
            Ok(mut tone) => {
                let _ = result_tx.send(tone.start_warning());
                thread::sleep(consts::RELEASE_DELAY);
                drop(tone);
            }
        });

        result_rx.recv().unwrap_or_else(|_| {
            Err(ToneInitiationError::StartFailed(
                "tone worker exited early".into(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sayar_core::{MethodOutcome, ToneChannel};

    use super::*;

    #[derive(Clone)]
    struct FakeDevice {
        acquire_fails: bool,
        start_fails: bool,
        starts: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
    }

    impl FakeDevice {
        fn new(acquire_fails: bool, start_fails: bool) -> Self {
            Self {
                acquire_fails,
                start_fails,
                starts: Arc::new(AtomicUsize::new(0)),
                releases: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    struct FakeTone {
        start_fails: bool,
        starts: Arc<AtomicUsize>,
        releases: Arc<AtomicUsize>,
    }

    impl ToneDevice for FakeDevice {
        type Handle = FakeTone;

        fn acquire(&self) -> Result<FakeTone, ToneInitiationError> {
            if self.acquire_fails {
                return Err(ToneInitiationError::ResourceUnavailable(
                    "no output device".into(),
                ));
            }
            Ok(FakeTone {
                start_fails: self.start_fails,
                starts: self.starts.clone(),
                releases: self.releases.clone(),
            })
        }
    }

    impl ToneHandle for FakeTone {
        fn start_warning(&mut self) -> Result<(), ToneInitiationError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            if self.start_fails {
                Err(ToneInitiationError::StartFailed("stalled".into()))
            } else {
                Ok(())
            }
        }
    }

    impl Drop for FakeTone {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_initiation_result_arrives_before_release() {
        let device = FakeDevice::new(false, false);
        let generator = AlarmToneGenerator::new(device.clone());

        assert!(generator.play_warning_tone().is_ok());
        // caller is answered while the worker still holds the resource
        assert_eq!(device.releases.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resource_released_exactly_once_after_delay() {
        let device = FakeDevice::new(false, false);
        let generator = AlarmToneGenerator::new(device.clone());

        assert!(generator.play_warning_tone().is_ok());

        thread::sleep(consts::RELEASE_DELAY + Duration::from_millis(200));
        assert_eq!(device.releases.load(Ordering::SeqCst), 1);

        thread::sleep(Duration::from_millis(200));
        assert_eq!(device.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_start_still_releases_once() {
        let device = FakeDevice::new(false, true);
        let generator = AlarmToneGenerator::new(device.clone());

        assert!(generator.play_warning_tone().is_err());

        thread::sleep(consts::RELEASE_DELAY + Duration::from_millis(200));
        assert_eq!(device.starts.load(Ordering::SeqCst), 1);
        assert_eq!(device.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_acquisition_reports_resource_unavailable() {
        let device = FakeDevice::new(true, false);
        let generator = AlarmToneGenerator::new(device.clone());

        assert!(matches!(
            generator.play_warning_tone(),
            Err(ToneInitiationError::ResourceUnavailable(_))
        ));
        assert_eq!(device.starts.load(Ordering::SeqCst), 0);
        // nothing was acquired, so there is nothing to release
        assert_eq!(device.releases.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_overlapping_invocations_release_independently() {
        let device = FakeDevice::new(false, false);
        let generator = AlarmToneGenerator::new(device.clone());

        assert!(generator.play_warning_tone().is_ok());
        assert!(generator.play_warning_tone().is_ok());

        thread::sleep(consts::RELEASE_DELAY + Duration::from_millis(300));
        assert_eq!(device.releases.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_channel_scenario_play_then_release() {
        let device = FakeDevice::new(false, false);
        let generator = AlarmToneGenerator::new(device.clone());
        let channel = ToneChannel::new(&generator);

        assert_eq!(
            channel.handle("playWarningTone"),
            MethodOutcome::Handled(true)
        );
        assert_eq!(device.releases.load(Ordering::SeqCst), 0);

        thread::sleep(consts::RELEASE_DELAY + Duration::from_millis(200));
        assert_eq!(device.releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_unknown_method_has_no_audio_side_effect() {
        let device = FakeDevice::new(false, false);
        let generator = AlarmToneGenerator::new(device.clone());
        let channel = ToneChannel::new(&generator);

        assert_eq!(channel.handle("unknownMethod"), MethodOutcome::NotImplemented);
        assert_eq!(device.starts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_warble_shape() {
        let warble = WarbleWave::new(consts::TONE_DURATION);
        assert_eq!(warble.channels(), 1);
        assert_eq!(warble.sample_rate(), SAMPLE_RATE);
        assert_eq!(warble.total_duration(), Some(consts::TONE_DURATION));

        let samples: Vec<f32> = warble.collect();
        assert_eq!(samples.len(), 24_000);
        assert!(samples.iter().all(|s| s.abs() <= AMPLITUDE));
        assert!(samples.iter().any(|s| *s != 0.0));
    }
}
