//! Control-thread side of the engine: timers, sound lifetimes, the output
//! session and the controller that drives them.

pub mod active;
pub mod clock;
pub mod controller;
pub mod scheduler;
pub mod session;

pub use active::{ActiveSound, SoundState, TransientEvent};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::PlaybackController;
pub use scheduler::{LiveFlag, Recurrence, TransientScheduler};
pub use session::{AudioSessionHost, SessionState};
