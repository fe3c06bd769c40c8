//! Realtime output through cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, error, info};

use crate::{
    error::{Error, Result},
    io::{
        backend::{AudioBackend, OutputStream},
        bus::OutputBus,
    },
};

/// Default host, default output device, f32 samples.
pub struct CpalBackend {
    host: cpal::Host,
}

impl CpalBackend {
    pub fn new() -> Self {
        let host = cpal::default_host();
        info!(host = host.id().name(), "cpal backend initialized");
        Self { host }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    fn open(&mut self, mut bus: OutputBus) -> Result<Box<dyn OutputStream>> {
        let device = self.host.default_output_device().ok_or(Error::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| Error::HardwareUnavailable(e.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        bus.set_sample_rate(sample_rate);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    bus.render_interleaved(data, channels);
                },
                |err| error!(error = %err, "output stream error"),
                None,
            )
            .map_err(|e| Error::HardwareUnavailable(e.to_string()))?;

        // some hosts start streams immediately
        if let Err(err) = stream.pause() {
            debug!(error = %err, "stream could not be paused after build");
        }

        info!(sample_rate, channels, "output stream opened");
        Ok(Box::new(CpalStream {
            stream,
            sample_rate,
        }))
    }
}

struct CpalStream {
    stream: cpal::Stream,
    sample_rate: f32,
}

impl OutputStream for CpalStream {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn resume(&mut self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| Error::HardwareUnavailable(e.to_string()))
    }

    fn suspend(&mut self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|e| Error::HardwareUnavailable(e.to_string()))
    }
}
