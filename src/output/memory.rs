use std::thread;
use std::time::Instant;

use super::AudioSink;
use crate::dsp::ToneBuffer;
use crate::error::OutputError;

/// A buffer accepted by [`MemorySink`], with its simulated playback window.
#[derive(Debug, Clone)]
pub struct PlayedBuffer {
    pub buffer: ToneBuffer,
    pub started: Instant,
    pub finished: Instant,
}

/// Device stand-in that "plays" in real time without touching hardware.
///
/// Each buffer occupies the sink for exactly its duration, so timing and
/// serialization behave like a real device while every sample stays
/// inspectable.
#[derive(Debug)]
pub struct MemorySink {
    sample_rate: u32,
    played: Vec<PlayedBuffer>,
    busy_until: Option<Instant>,
    closed: bool,
}

impl MemorySink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            played: Vec::new(),
            busy_until: None,
            closed: false,
        }
    }

    /// Buffers in the order they were written.
    pub fn played(&self) -> &[PlayedBuffer] {
        &self.played
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl AudioSink for MemorySink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn write(&mut self, buffer: ToneBuffer) -> Result<(), OutputError> {
        if self.closed {
            return Err(OutputError::StreamFailed("sink is closed".into()));
        }
        self.wait_idle()?;

        let started = Instant::now();
        let finished = started + buffer.duration();
        self.busy_until = Some(finished);
        self.played.push(PlayedBuffer {
            buffer,
            started,
            finished,
        });
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), OutputError> {
        if let Some(deadline) = self.busy_until.take() {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), OutputError> {
        if !self.closed {
            self.drain()?;
            self.closed = true;
        }
        Ok(())
    }
}
