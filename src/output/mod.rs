//! Audio output sinks.
//!
//! A sink accepts whole [`ToneBuffer`]s, one at a time. `write` blocks until
//! the previous buffer has finished playing, so at most one buffer is ever in
//! flight and playback is strictly sequential.

pub mod device;
pub mod memory;
pub mod quiet;

use crate::dsp::ToneBuffer;
use crate::error::OutputError;

pub use device::CpalSink;
pub use memory::{MemorySink, PlayedBuffer};

pub trait AudioSink {
    /// Rate buffers must be rendered at.
    fn sample_rate(&self) -> u32;

    /// Wait for the previous buffer to finish, then hand `buffer` over.
    ///
    /// Returns once the sink has accepted the whole buffer; playback may
    /// continue in the background.
    fn write(&mut self, buffer: ToneBuffer) -> Result<(), OutputError>;

    /// Block until nothing is playing.
    fn wait_idle(&mut self) -> Result<(), OutputError>;

    /// Block until the last buffer is audible in full.
    ///
    /// Defaults to [`wait_idle`](AudioSink::wait_idle); device sinks add
    /// their hardware latency on top.
    fn drain(&mut self) -> Result<(), OutputError> {
        self.wait_idle()
    }

    /// Drain and release the device. Calling it twice is a no-op.
    fn close(&mut self) -> Result<(), OutputError>;
}
