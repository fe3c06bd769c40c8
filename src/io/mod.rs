//! Audio output: the realtime bus and the backends that drive it.

pub mod backend;
pub mod bus;
pub mod cpal_backend;
pub mod offline;

pub use backend::{AudioBackend, OutputStream};
pub use bus::{MasterGain, NodeId, OutputBus};
pub use cpal_backend::CpalBackend;
pub use offline::{OfflineBackend, OfflineTap};
