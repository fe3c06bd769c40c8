use crate::{graph::node::RenderCtx, MIN_TIME};

/*
One-Shot Envelope
=================

Transients in a soundscape (a chirp, a cricket, a thunderclap) are fired once
and never held, so the envelope has no sustain stage: it rises to `peak` and
falls straight back to silence.

  Level
   peak ┐   ╱╲
        │  ╱  ╲
        │ ╱    ╲___
    0.0 └╱─────────╲──→ Time
        Attack  Release

Vocabulary
----------

  peak        Highest level reached, already in output units (a chirp peaks
              at 0.05, a thunderclap at 0.3).

  curve       Shape of the release. `Linear` lands exactly on zero after
              `release_time`. `Exponential` multiplies the level by a fixed
              coefficient each sample so it falls to `EXP_FLOOR × peak` after
              `release_time`, which is how a real rumble dies away.


State machine
-------------

    ┌──────┐  trigger  ┌────────┐  level = peak  ┌─────────┐
    │ Idle │ ────────→ │ Attack │ ─────────────→ │ Release │
    └──────┘           └────────┘                └─────────┘
        ↑                                             │
        └──────────────── level reaches 0 ────────────┘

`trigger` restarts from zero at any stage so a retriggered one-shot never
inherits the previous tail.
*/

/// Ratio of `peak` at which an exponential release is considered silent (-60 dB).
pub const EXP_FLOOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCurve {
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Release,
}

pub struct Envelope {
    peak: f32,
    attack_time: f32,
    release_time: f32,
    curve: ReleaseCurve,

    stage: EnvelopeState,
    level: f32,

    // release bookkeeping, sized on entry into the stage
    release_total_samples: u32,
    release_elapsed_samples: u32,
    release_coef: f32,
}

impl Envelope {
    pub fn one_shot(peak: f32, attack: f32, release: f32, curve: ReleaseCurve) -> Self {
        Self {
            peak: peak.max(0.0),
            attack_time: attack.max(MIN_TIME),
            release_time: release.max(MIN_TIME),
            curve,

            stage: EnvelopeState::Idle,
            level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
            release_coef: 0.0,
        }
    }

    /// Start the attack from silence.
    pub fn trigger(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    fn enter_release(&mut self, ctx: &RenderCtx) {
        self.level = self.peak;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.release_coef = EXP_FLOOR.powf(1.0 / self.release_total_samples as f32);
        self.stage = EnvelopeState::Release;
    }

    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += self.peak / (self.attack_time * ctx.sample_rate);

                if self.level >= self.peak {
                    self.enter_release(ctx);
                }
            }

            EnvelopeState::Release => {
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                self.level = match self.curve {
                    ReleaseCurve::Linear => {
                        let progress = self.release_elapsed_samples as f32
                            / self.release_total_samples as f32;
                        (self.peak * (1.0 - progress)).max(0.0)
                    }
                    ReleaseCurve::Exponential => self.level * self.release_coef,
                };

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!(self.level >= 0.0 && self.level <= self.peak + f32::EPSILON);
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    /// Attack plus release, in seconds.
    pub fn duration(&self) -> f32 {
        self.attack_time + self.release_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn run(env: &mut Envelope, samples: usize) {
        let ctx = RenderCtx::new(SAMPLE_RATE);
        for _ in 0..samples {
            env.next_sample(&ctx);
        }
    }

    #[test]
    fn idle_until_triggered() {
        let mut env = Envelope::one_shot(0.05, 0.05, 0.15, ReleaseCurve::Linear);
        run(&mut env, 10);
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn attack_reaches_peak_then_releases() {
        let mut env = Envelope::one_shot(0.05, 0.05, 0.15, ReleaseCurve::Linear);
        env.trigger();
        run(&mut env, 51);

        assert_eq!(env.state(), EnvelopeState::Release);
        assert!((env.level() - 0.05).abs() < 1e-3);
    }

    #[test]
    fn linear_release_lands_on_zero() {
        let mut env = Envelope::one_shot(0.02, 0.01, 0.04, ReleaseCurve::Linear);
        env.trigger();
        run(&mut env, 10 + 40 + 2);

        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn exponential_release_decays_geometrically() {
        let mut env = Envelope::one_shot(0.3, 0.1, 2.0, ReleaseCurve::Exponential);
        env.trigger();
        while env.state() == EnvelopeState::Attack {
            run(&mut env, 1);
        }
        let start = env.level();

        run(&mut env, 1000);
        let halfway = env.level();

        // half the release time is half the decibels: sqrt(0.001) of the start
        let expected = start * EXP_FLOOR.sqrt();
        assert!(
            (halfway - expected).abs() < expected * 0.1,
            "expected ~{expected}, got {halfway}"
        );

        run(&mut env, 1001);
        assert!(!env.is_active());
    }

    #[test]
    fn retrigger_restarts_from_silence() {
        let mut env = Envelope::one_shot(0.3, 0.1, 2.0, ReleaseCurve::Exponential);
        env.trigger();
        run(&mut env, 300);
        env.trigger();
        run(&mut env, 1);

        assert_eq!(env.state(), EnvelopeState::Attack);
        assert!(env.level() < 0.01);
    }

    #[test]
    fn duration_sums_both_stages() {
        let env = Envelope::one_shot(0.05, 0.05, 0.15, ReleaseCurve::Linear);
        assert!((env.duration() - 0.2).abs() < 1e-6);
    }
}
