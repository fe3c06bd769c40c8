use std::time::Duration;

use rand::Rng;
use tracing::trace;

use crate::{
    engine::{
        scheduler::{LiveFlag, TimerHandle, TransientScheduler},
        session::AudioSessionHost,
    },
    error::Result,
    graph::GraphNode,
    io::bus::NodeId,
    soundscape::SoundType,
    voices::TransientKind,
};

/// What a scheduled timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientEvent {
    /// Build and connect a new one-shot.
    Emit(TransientKind),
    /// Disconnect a one-shot whose envelope has finished.
    Release(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundState {
    Building,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Bed,
    Transient(TransientKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle {
    pub id: NodeId,
    pub role: NodeRole,
    release_timer: Option<TimerHandle>,
}

/// One playing soundscape: the nodes it connected and the timers it armed.
///
/// Teardown walks both lists, so nothing it created outlives it. `Stopped`
/// is terminal; playing again builds a new instance.
pub struct ActiveSound {
    kind: SoundType,
    generation: u64,
    state: SoundState,
    live: LiveFlag,
    nodes: Vec<NodeHandle>,
    timers: Vec<TimerHandle>,
    emitted: usize,
}

impl ActiveSound {
    pub fn new(kind: SoundType, generation: u64) -> Self {
        Self {
            kind,
            generation,
            state: SoundState::Building,
            live: LiveFlag::new(),
            nodes: Vec::new(),
            timers: Vec::new(),
            emitted: 0,
        }
    }

    pub fn kind(&self) -> SoundType {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> SoundState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.live.is_live()
    }

    pub fn live_flag(&self) -> LiveFlag {
        self.live.clone()
    }

    pub fn nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// One-shots emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn connect(
        &mut self,
        session: &mut AudioSessionHost,
        node: Box<dyn GraphNode>,
        role: NodeRole,
    ) -> Result<NodeId> {
        let id = session.connect(node)?;
        self.nodes.push(NodeHandle {
            id,
            role,
            release_timer: None,
        });
        Ok(id)
    }

    pub fn track_timer(&mut self, handle: TimerHandle) {
        self.timers.push(handle);
    }

    pub fn mark_running(&mut self) {
        if self.state == SoundState::Building {
            self.state = SoundState::Running;
        }
    }

    /// Connect a fresh `kind` voice and arm its release for the end of its
    /// envelope. `now` is when the voice is connected, however late that is
    /// relative to its timer.
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        kind: TransientKind,
        now: Duration,
        session: &mut AudioSessionHost,
        scheduler: &mut TransientScheduler<TransientEvent>,
        rng: &mut R,
    ) -> Result<NodeId> {
        let id = self.connect(session, kind.voice(rng), NodeRole::Transient(kind))?;
        let release = scheduler.schedule_once(
            now + kind.duration(),
            self.live.clone(),
            TransientEvent::Release(id),
        );

        if let Some(handle) = self.nodes.last_mut() {
            handle.release_timer = Some(release);
        }
        self.emitted += 1;

        trace!(sound = %self.kind, transient = %kind, ?id, "transient emitted");
        Ok(id)
    }

    /// Disconnect one node. Returns `false` if this sound does not own it.
    pub fn release(&mut self, id: NodeId, session: &mut AudioSessionHost) -> bool {
        let Some(index) = self.nodes.iter().position(|handle| handle.id == id) else {
            return false;
        };
        self.nodes.swap_remove(index);
        session.disconnect(id)
    }

    /// Cancel every timer, disconnect every node, clear the live flag.
    pub fn teardown(
        &mut self,
        session: &mut AudioSessionHost,
        scheduler: &mut TransientScheduler<TransientEvent>,
    ) {
        self.live.clear();

        for handle in self.timers.drain(..) {
            scheduler.cancel(handle);
        }

        for node in self.nodes.drain(..) {
            if let Some(release) = node.release_timer {
                scheduler.cancel(release);
            }
            session.disconnect(node.id);
        }

        self.state = SoundState::Stopped;
    }
}
