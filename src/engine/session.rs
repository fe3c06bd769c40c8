use std::collections::{HashSet, VecDeque};

use rtrb::PushError;
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    graph::GraphNode,
    io::{
        backend::{AudioBackend, OutputStream},
        bus::{BusHandle, Command, MasterGain, NodeId, OutputBus},
    },
};

/// Lifecycle of the hardware output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Suspended,
    Running,
}

/// Owns the output stream and the master gain.
///
/// The stream is opened lazily on the first `ensure_running`. Nodes are
/// handed to the audio thread through the bus command ring; the host keeps a
/// mirror of what is connected so `disconnect` can be called any number of
/// times.
pub struct AudioSessionHost {
    backend: Box<dyn AudioBackend>,
    stream: Option<Box<dyn OutputStream>>,
    bus: Option<BusHandle>,
    state: SessionState,
    master: MasterGain,
    capacity: usize,
    connected: HashSet<NodeId>,
    // disconnects that found the ring full
    backlog: VecDeque<NodeId>,
    next_id: u64,
}

impl AudioSessionHost {
    pub fn new(backend: Box<dyn AudioBackend>, master: MasterGain, capacity: usize) -> Self {
        Self {
            backend,
            stream: None,
            bus: None,
            state: SessionState::Uninitialized,
            master,
            capacity,
            connected: HashSet::new(),
            backlog: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn master(&self) -> &MasterGain {
        &self.master
    }

    /// Open the stream if needed and make sure it is playing.
    ///
    /// Returns the output sample rate.
    pub fn ensure_running(&mut self) -> Result<f32> {
        if self.state == SessionState::Uninitialized {
            self.open()?;
        }

        let stream = self.stream.as_mut().ok_or(Error::SessionClosed)?;
        if self.state == SessionState::Suspended {
            stream.resume()?;
            self.state = SessionState::Running;
            info!(backend = self.backend.name(), "audio session resumed");
        }

        Ok(stream.sample_rate())
    }

    fn open(&mut self) -> Result<()> {
        let (bus, handle) = OutputBus::new(self.master.clone(), self.capacity);
        let stream = self.backend.open(bus)?;

        info!(
            backend = self.backend.name(),
            sample_rate = stream.sample_rate(),
            "audio session opened"
        );

        self.stream = Some(stream);
        self.bus = Some(handle);
        self.state = SessionState::Suspended;
        Ok(())
    }

    pub fn suspend(&mut self) -> Result<()> {
        if self.state != SessionState::Running {
            return Ok(());
        }
        if let Some(stream) = self.stream.as_mut() {
            stream.suspend()?;
        }
        self.state = SessionState::Suspended;
        info!(backend = self.backend.name(), "audio session suspended");
        Ok(())
    }

    /// Hand a node to the audio thread.
    pub fn connect(&mut self, node: Box<dyn GraphNode>) -> Result<NodeId> {
        let bus = self.bus.as_mut().ok_or(Error::SessionClosed)?;
        let id = NodeId(self.next_id);

        match bus.commands.push(Command::Connect { id, node }) {
            Ok(()) => {
                self.next_id += 1;
                self.connected.insert(id);
                Ok(id)
            }
            // the node comes back inside the error and is dropped here
            Err(PushError::Full(_)) => Err(Error::CommandQueueFull),
        }
    }

    /// Remove a node from the mix. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: NodeId) -> bool {
        if !self.connected.remove(&id) {
            return false;
        }

        let Some(bus) = self.bus.as_mut() else {
            return true;
        };

        if !self.backlog.is_empty() || bus.commands.push(Command::Disconnect(id)).is_err() {
            debug!(?id, "command queue full, deferring disconnect");
            self.backlog.push_back(id);
        }
        true
    }

    /// Free nodes the audio thread has let go of and retry deferred
    /// disconnects.
    pub fn collect_retired(&mut self) -> usize {
        let Some(bus) = self.bus.as_mut() else {
            return 0;
        };

        let mut freed = 0;
        while let Ok(node) = bus.retired.pop() {
            drop(node);
            freed += 1;
        }

        while let Some(&id) = self.backlog.front() {
            if bus.commands.push(Command::Disconnect(id)).is_err() {
                warn!(pending = self.backlog.len(), "disconnect backlog not drained");
                break;
            }
            self.backlog.pop_front();
        }

        freed
    }

    /// Nodes connected from the control thread's point of view.
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }
}
