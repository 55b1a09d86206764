//! The tone player: turns [`PlaybackRequest`]s into sound (or silence).
//!
//! A player owns one sink for its whole life. Each tone is rendered into a
//! fresh buffer, the previous buffer is allowed to finish, and only then is
//! the new one written, so notes never overlap. Pauses wait for the sink to
//! go idle and then sleep on the calling thread.
//!
//! ```ignore
//! use musical_beeps::{config::PlayerConfig, player::{Console, TonePlayer}};
//!
//! let mut player = TonePlayer::open(PlayerConfig::default(), Console::stdio())?;
//! player.play("A", 1.0)?;
//! player.play("pause", 0.5)?;
//! player.play("C5#", 0.2)?;
//! player.close()?;
//! ```

mod console;

#[cfg(test)]
pub(crate) use console::capture;
pub use console::Console;

use std::thread;

use crate::config::PlayerConfig;
use crate::dsp::{ToneSynth, SAMPLE_RATE};
use crate::error::{LineError, PlayerError};
use crate::notes::parse_note;
use crate::output::{AudioSink, CpalSink};
use crate::sequencing::{PlaybackRequest, RequestKind};

pub struct TonePlayer<S: AudioSink = CpalSink> {
    sink: S,
    synth: ToneSynth,
    console: Console,
    closed: bool,
}

impl TonePlayer<CpalSink> {
    /// Validate `config` and open the default output device.
    ///
    /// Volume is checked before the device is touched.
    pub fn open(config: PlayerConfig, console: Console) -> Result<Self, PlayerError> {
        config.validate()?;
        let sink = CpalSink::open(SAMPLE_RATE, config.hide_device_warnings)?;
        Self::with_sink(config, sink, console)
    }
}

impl<S: AudioSink> TonePlayer<S> {
    /// Build a player on an already-open sink.
    ///
    /// `config.silent` decides whether `console` prints informational lines.
    pub fn with_sink(
        config: PlayerConfig,
        sink: S,
        mut console: Console,
    ) -> Result<Self, PlayerError> {
        config.validate()?;
        console.set_silent(config.silent);
        let synth = ToneSynth::new(sink.sample_rate(), config.volume, config.fade_samples);
        Ok(Self {
            sink,
            synth,
            console,
            closed: false,
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn volume(&self) -> f32 {
        self.synth.volume()
    }

    /// Play one request, blocking until its buffer has been accepted (tones)
    /// or its time has elapsed (pauses).
    pub fn play_note(&mut self, request: &PlaybackRequest) -> Result<(), PlayerError> {
        match (request.kind(), request.frequency()) {
            (RequestKind::Tone, Some(frequency)) => self.play_tone(request, frequency),
            _ => self.pause(request),
        }
    }

    /// Parse `token` and play it for `seconds`.
    ///
    /// Parse problems come back as [`PlayerError::Line`] and leave the sink
    /// untouched.
    pub fn play(&mut self, token: &str, seconds: f64) -> Result<(), PlayerError> {
        let pitch = parse_note(token).map_err(LineError::from)?;
        let request = PlaybackRequest::new(token, pitch, seconds)?;
        self.play_note(&request)
    }

    fn play_tone(&mut self, request: &PlaybackRequest, frequency: f64) -> Result<(), PlayerError> {
        let buffer = self.synth.render(frequency, request.seconds());
        tracing::debug!(
            note = request.token(),
            frequency,
            samples = buffer.len(),
            "rendered tone"
        );

        self.sink.write(buffer)?;
        self.console.info(format_args!(
            "Playing {} ({:.2} Hz) for {:?}s",
            request.token(),
            frequency,
            request.seconds()
        ));
        Ok(())
    }

    fn pause(&mut self, request: &PlaybackRequest) -> Result<(), PlayerError> {
        // Silence starts when the previous note ends.
        self.sink.wait_idle()?;
        self.console
            .info(format_args!("Pausing for {:?}s", request.seconds()));
        thread::sleep(request.duration());
        Ok(())
    }

    /// Block until everything written so far has been heard.
    pub fn drain(&mut self) -> Result<(), PlayerError> {
        self.sink.drain()?;
        Ok(())
    }

    /// Drain and release the device.
    pub fn close(mut self) -> Result<(), PlayerError> {
        self.closed = true;
        self.sink.close()?;
        Ok(())
    }
}

impl<S: AudioSink> Drop for TonePlayer<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.sink.close() {
            tracing::warn!(error = %err, "failed to drain audio output on drop");
        }
    }
}
