//! cpal-backed output sink.
//!
//! The audio callback runs on a thread owned by the backend. Whole buffers
//! cross over through an `rtrb` ring of capacity 1, which is what enforces
//! "at most one buffer in flight": the caller can only push once the callback
//! has taken the previous buffer and played it out. Spent buffers travel back
//! on a second ring so the audio thread never frees memory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SampleRate, SizedSample, Stream, StreamConfig};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use super::quiet::quietly;
use super::AudioSink;
use crate::dsp::ToneBuffer;
use crate::error::OutputError;

const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Extra wait after the last sample leaves the ring, covering the device's
/// own buffering before the stream is torn down.
const DRAIN_TAIL: Duration = Duration::from_millis(100);

/// How long past a buffer's expected end we wait before declaring the
/// stream stalled.
const STALL_GRACE: Duration = Duration::from_secs(2);

type FailureSlot = Arc<Mutex<Option<String>>>;

/// What was opened, logged once stderr is back.
#[derive(Debug, Clone)]
struct OpenedDevice {
    name: String,
    sample_rate: u32,
    channels: u16,
    format: SampleFormat,
}

impl OpenedDevice {
    fn log(&self) {
        tracing::info!(
            device = %self.name,
            sample_rate = self.sample_rate,
            channels = self.channels,
            format = ?self.format,
            "opened output device"
        );
    }
}

/// Run `open` with stderr muted, then log the device with stderr restored.
fn open_quietly<T>(
    hide_warnings: bool,
    open: impl FnOnce() -> Result<(T, OpenedDevice), OutputError>,
) -> Result<T, OutputError> {
    let (opened, device) = quietly(hide_warnings, open)?;
    device.log();
    Ok(opened)
}

/// Audio-thread side: pulls samples out of the current buffer.
struct Playhead {
    incoming: Consumer<Vec<i16>>,
    spent: Producer<Vec<i16>>,
    current: Vec<i16>,
    position: usize,
    playing: Arc<AtomicBool>,
}

impl Playhead {
    fn new(
        incoming: Consumer<Vec<i16>>,
        spent: Producer<Vec<i16>>,
        playing: Arc<AtomicBool>,
    ) -> Self {
        Self {
            incoming,
            spent,
            current: Vec::new(),
            position: 0,
            playing,
        }
    }

    /// Next sample, or `None` when there is nothing to play.
    fn next_sample(&mut self) -> Option<i16> {
        if self.position >= self.current.len() {
            self.advance();
        }
        let sample = self.current.get(self.position).copied();
        if sample.is_some() {
            self.position += 1;
        }
        sample
    }

    fn advance(&mut self) {
        if self.current.capacity() > 0 {
            let done = std::mem::take(&mut self.current);
            // Ring full means the caller hasn't reclaimed yet; free it here.
            let _ = self.spent.push(done);
        }
        self.position = 0;

        if self.incoming.is_empty() {
            self.playing.store(false, Ordering::SeqCst);
            return;
        }
        // Raised before the pop so the caller never sees an empty ring with
        // the flag still down.
        self.playing.store(true, Ordering::SeqCst);
        if let Ok(next) = self.incoming.pop() {
            self.current = next;
        }
    }
}

/// Exclusive handle on the default output device.
pub struct CpalSink {
    stream: Option<Stream>,
    queue: Producer<Vec<i16>>,
    spent: Consumer<Vec<i16>>,
    playing: Arc<AtomicBool>,
    failure: FailureSlot,
    sample_rate: u32,
    channels: u16,
    hide_warnings: bool,
    deadline: Option<Instant>,
    needs_tail: bool,
}

impl CpalSink {
    /// Open the default output device at `sample_rate`.
    ///
    /// With `hide_warnings`, backend chatter on stderr is muted while the
    /// device opens (and later, while it closes).
    pub fn open(sample_rate: u32, hide_warnings: bool) -> Result<Self, OutputError> {
        let mut sink = open_quietly(hide_warnings, || Self::open_default(sample_rate))?;
        sink.hide_warnings = hide_warnings;
        Ok(sink)
    }

    fn open_default(sample_rate: u32) -> Result<(Self, OpenedDevice), OutputError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(OutputError::NoOutputDevice)?;
        let supported = pick_config(&device, sample_rate)?;
        let format = supported.sample_format();
        let config: StreamConfig = supported.config();

        let (queue, incoming) = RingBuffer::<Vec<i16>>::new(1);
        let (spent_tx, spent) = RingBuffer::<Vec<i16>>::new(2);
        let playing = Arc::new(AtomicBool::new(false));
        let failure: FailureSlot = Arc::new(Mutex::new(None));
        let playhead = Playhead::new(incoming, spent_tx, playing.clone());

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, playhead, failure.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, playhead, failure.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, playhead, failure.clone()),
            other => Err(OutputError::UnsupportedSampleFormat(format!("{other:?}"))),
        }?;
        stream.play()?;

        let opened = OpenedDevice {
            name: device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate,
            channels: config.channels,
            format,
        };

        let sink = Self {
            stream: Some(stream),
            queue,
            spent,
            playing,
            failure,
            sample_rate,
            channels: config.channels,
            hide_warnings: false,
            deadline: None,
            needs_tail: false,
        };
        Ok((sink, opened))
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    fn is_idle(&self) -> bool {
        let queue_empty = self.queue.slots() == self.queue.buffer().capacity();
        queue_empty && !self.playing.load(Ordering::SeqCst)
    }

    fn check_failed(&self) -> Result<(), OutputError> {
        let failure = self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(message) = failure {
            return Err(OutputError::StreamFailed(message));
        }
        if self.queue.is_abandoned() {
            return Err(OutputError::StreamFailed("audio callback is gone".into()));
        }
        Ok(())
    }

    /// Free buffers the callback has finished with.
    fn reclaim(&mut self) {
        while self.spent.pop().is_ok() {}
    }
}

impl AudioSink for CpalSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn write(&mut self, buffer: ToneBuffer) -> Result<(), OutputError> {
        if self.stream.is_none() {
            return Err(OutputError::StreamFailed("output device is closed".into()));
        }
        self.wait_idle()?;
        self.reclaim();

        let expected = buffer.duration();
        let mut pending = buffer.into_samples();
        loop {
            match self.queue.push(pending) {
                Ok(()) => break,
                Err(PushError::Full(returned)) => {
                    self.check_failed()?;
                    pending = returned;
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }

        self.deadline = Some(Instant::now() + expected + STALL_GRACE);
        self.needs_tail = true;
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), OutputError> {
        loop {
            self.check_failed()?;
            if self.is_idle() {
                self.deadline = None;
                return Ok(());
            }
            if matches!(self.deadline, Some(deadline) if Instant::now() > deadline) {
                return Err(OutputError::StreamFailed(
                    "output device stopped consuming samples".into(),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn drain(&mut self) -> Result<(), OutputError> {
        self.wait_idle()?;
        if self.needs_tail {
            thread::sleep(DRAIN_TAIL);
            self.needs_tail = false;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), OutputError> {
        if self.stream.is_none() {
            return Ok(());
        }
        let drained = self.drain();
        let stream = self.stream.take();
        quietly(self.hide_warnings, move || drop(stream));
        self.reclaim();
        tracing::debug!("closed output device");
        drained
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "output device closed without a clean drain");
        }
    }
}

/// Pick a config that can run at `rate`, preferring fewer channels and
/// float output.
fn pick_config(
    device: &cpal::Device,
    rate: u32,
) -> Result<cpal::SupportedStreamConfig, OutputError> {
    let wanted = SampleRate(rate);
    device
        .supported_output_configs()?
        .filter(|range| range.min_sample_rate() <= wanted && wanted <= range.max_sample_rate())
        .min_by_key(|range| (range.channels(), format_rank(range.sample_format())))
        .map(|range| range.with_sample_rate(wanted))
        .ok_or(OutputError::UnsupportedSampleRate { rate })
}

fn format_rank(format: SampleFormat) -> u8 {
    match format {
        SampleFormat::F32 => 0,
        SampleFormat::I16 => 1,
        SampleFormat::U16 => 2,
        _ => 3,
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut playhead: Playhead,
    failure: FailureSlot,
) -> Result<Stream, OutputError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels as usize;
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            // Mono source copied to every channel
            for frame in data.chunks_mut(channels) {
                let value = match playhead.next_sample() {
                    Some(sample) => T::from_sample(sample),
                    None => T::EQUILIBRIUM,
                };
                frame.fill(value);
            }
        },
        move |err| {
            tracing::error!(error = %err, "audio stream error");
            let mut slot = failure
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.get_or_insert_with(|| err.to_string());
        },
        None,
    )?;
    Ok(stream)
}
