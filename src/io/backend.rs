//! Pluggable audio output.
//!
//! An [`AudioBackend`] turns an [`OutputBus`] into a running output stream.
//! The engine only talks to these traits, so the realtime cpal backend and
//! the headless offline backend are interchangeable.

use crate::{error::Result, io::bus::OutputBus};

/// A platform output, able to open one stream fed by an [`OutputBus`].
pub trait AudioBackend: Send {
    fn name(&self) -> &'static str;

    /// Build a stream that pulls audio from `bus`.
    ///
    /// The stream starts suspended; call [`OutputStream::resume`] to make it
    /// audible.
    fn open(&mut self, bus: OutputBus) -> Result<Box<dyn OutputStream>>;
}

/// A live output stream. Dropping it closes the stream.
pub trait OutputStream {
    fn sample_rate(&self) -> f32;

    fn resume(&mut self) -> Result<()>;

    fn suspend(&mut self) -> Result<()>;
}
