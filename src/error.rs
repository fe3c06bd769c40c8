/// Errors raised by the audio plumbing.
///
/// None of these reach callers of [`crate::PlaybackController`]: the
/// controller logs them and stays silent instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host refused to open or start an output stream.
    #[error("audio hardware unavailable: {0}")]
    HardwareUnavailable(String),

    #[error("no audio output device available")]
    NoDevice,

    /// A node was connected before the output session was opened.
    #[error("audio session is not open")]
    SessionClosed,

    /// The control → audio command ring is full.
    #[error("audio command queue is full")]
    CommandQueueFull,

    #[error("unknown sound type: {0}")]
    UnknownSound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
