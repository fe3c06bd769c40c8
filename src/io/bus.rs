use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    graph::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Output Bus
==========

The audio-thread end of the engine. Everything the control thread wants to
change reaches it as a command on a lock-free ring:

  control thread                          audio thread
  ──────────────                          ────────────
  Connect { id, node }   ──commands──→    voices.push((id, node))
  Disconnect(id)         ──commands──→    voices.swap_remove(...)
  drop(node)             ←──retired───    node handed back

Nodes are built and dropped on the control thread; the callback only moves
boxes around, so it never allocates or frees.

Per block the bus sums every connected voice, applies the master gain and
clamps to [-1, 1].
*/

/// Identifies a node connected to the output bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

pub enum Command {
    Connect {
        id: NodeId,
        node: Box<dyn GraphNode>,
    },
    Disconnect(NodeId),
}

/// Process-wide volume, shared between the control thread and the bus.
///
/// Stored as f32 bits in an atomic: one writer, any number of readers, no
/// locks. Writes are clamped to [0, 1]; NaN becomes 0.
#[derive(Clone, Debug)]
pub struct MasterGain(Arc<AtomicU32>);

impl MasterGain {
    pub fn new(value: f32) -> Self {
        let gain = Self(Arc::new(AtomicU32::new(0)));
        gain.set(value);
        gain
    }

    pub fn set(&self, value: f32) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Control-side ends of the bus rings.
pub struct BusHandle {
    pub commands: Producer<Command>,
    pub retired: Consumer<Box<dyn GraphNode>>,
}

pub struct OutputBus {
    commands: Consumer<Command>,
    retired: Producer<Box<dyn GraphNode>>,
    voices: Vec<(NodeId, Box<dyn GraphNode>)>,
    master: MasterGain,
    ctx: RenderCtx,
    mix_buffer: Vec<f32>,
    voice_buffer: Vec<f32>,
}

impl OutputBus {
    /// Create a bus and the control-side handle that feeds it.
    pub fn new(master: MasterGain, capacity: usize) -> (Self, BusHandle) {
        let capacity = capacity.max(1);
        let (command_tx, command_rx) = RingBuffer::new(capacity);
        let (retired_tx, retired_rx) = RingBuffer::new(capacity);

        let bus = Self {
            commands: command_rx,
            retired: retired_tx,
            voices: Vec::with_capacity(capacity),
            master,
            ctx: RenderCtx::new(48_000.0),
            mix_buffer: vec![0.0; MAX_BLOCK_SIZE],
            voice_buffer: vec![0.0; MAX_BLOCK_SIZE],
        };

        let handle = BusHandle {
            commands: command_tx,
            retired: retired_rx,
        };

        (bus, handle)
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.ctx = RenderCtx::new(sample_rate);
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Number of nodes currently mixed by the bus.
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.pop() {
            match command {
                Command::Connect { id, node } => self.voices.push((id, node)),
                Command::Disconnect(id) => {
                    if let Some(index) = self.voices.iter().position(|(voice, _)| *voice == id) {
                        let (_, node) = self.voices.swap_remove(index);
                        // a full return ring means the control thread has stopped
                        // collecting; dropping here is the only option left
                        let _ = self.retired.push(node);
                    }
                }
            }
        }
    }

    /// Mix up to `MAX_BLOCK_SIZE` frames into `mix_buffer`.
    fn mix_block(&mut self, frames: usize) {
        let gain = self.master.get();
        let Self {
            voices,
            ctx,
            mix_buffer,
            voice_buffer,
            ..
        } = self;

        let block = &mut mix_buffer[..frames];
        block.fill(0.0);

        for (_, node) in voices.iter_mut() {
            if !node.is_active() {
                continue;
            }
            let scratch = &mut voice_buffer[..frames];
            scratch.fill(0.0);
            node.render_block(scratch, ctx);

            for (out, &sample) in block.iter_mut().zip(scratch.iter()) {
                *out += sample;
            }
        }

        for sample in block.iter_mut() {
            *sample = (*sample * gain).clamp(-1.0, 1.0);
        }
    }

    /// Render mono output.
    pub fn render(&mut self, out: &mut [f32]) {
        self.drain_commands();
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.mix_block(chunk.len());
            chunk.copy_from_slice(&self.mix_buffer[..chunk.len()]);
        }
    }

    /// Render interleaved output, the same signal on every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        self.drain_commands();

        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            self.mix_block(frames);

            let offset = frames_written * channels;
            for (i, &sample) in self.mix_buffer[..frames].iter().enumerate() {
                let frame = offset + i * channels;
                data[frame..frame + channels].fill(sample);
            }

            frames_written += frames;
        }

        // trailing partial frame, if the host hands us one
        data[total_frames * channels..].fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dc(f32);

    impl GraphNode for Dc {
        fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
            out.fill(self.0);
        }
    }

    fn connect(handle: &mut BusHandle, id: u64, level: f32) {
        assert!(handle
            .commands
            .push(Command::Connect {
                id: NodeId(id),
                node: Box::new(Dc(level)),
            })
            .is_ok());
    }

    #[test]
    fn master_gain_clamps() {
        let gain = MasterGain::new(0.5);
        gain.set(-1.0);
        assert_eq!(gain.get(), 0.0);
        gain.set(5.0);
        assert_eq!(gain.get(), 1.0);
        gain.set(f32::NAN);
        assert_eq!(gain.get(), 0.0);
        gain.set(0.2);
        assert_eq!(gain.get(), 0.2);
    }

    #[test]
    fn sums_voices_through_master() {
        let (mut bus, mut handle) = OutputBus::new(MasterGain::new(0.5), 8);
        connect(&mut handle, 1, 0.2);
        connect(&mut handle, 2, 0.4);

        let mut out = vec![0.0; 64];
        bus.render(&mut out);

        assert_eq!(bus.voice_count(), 2);
        assert!(out.iter().all(|&s| (s - 0.3).abs() < 1e-6));
    }

    #[test]
    fn output_is_clamped() {
        let (mut bus, mut handle) = OutputBus::new(MasterGain::new(1.0), 8);
        connect(&mut handle, 1, 0.9);
        connect(&mut handle, 2, 0.9);

        let mut out = vec![0.0; 16];
        bus.render(&mut out);
        assert!(out.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn disconnect_returns_node() {
        let (mut bus, mut handle) = OutputBus::new(MasterGain::new(1.0), 8);
        connect(&mut handle, 1, 0.5);
        assert!(handle.commands.push(Command::Disconnect(NodeId(1))).is_ok());
        assert!(handle.commands.push(Command::Disconnect(NodeId(1))).is_ok());

        let mut out = vec![1.0; 16];
        bus.render(&mut out);

        assert_eq!(bus.voice_count(), 0);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(handle.retired.pop().is_ok());
        assert!(handle.retired.pop().is_err());
    }

    #[test]
    fn interleaved_duplicates_mono() {
        let (mut bus, mut handle) = OutputBus::new(MasterGain::new(1.0), 8);
        connect(&mut handle, 1, 0.25);

        let mut data = vec![0.0; MAX_BLOCK_SIZE * 2 * 2 + 6];
        bus.render_interleaved(&mut data, 2);
        assert!(data.iter().all(|&s| s == 0.25));
    }
}
