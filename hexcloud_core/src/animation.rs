// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven animation runs.
//!
//! Two kinds of run exist: the one-shot [`Entry`](AnimationKind::Entry)
//! animation that eases hex spacing and opacity in on attach, and the
//! [`Inertia`](AnimationKind::Inertia) run that coasts the pan after a fling.
//! At most one run of each kind is active. Starting a run bumps that kind's
//! generation, so any [`AnimationToken`] held for the previous run becomes
//! stale and stepping it returns [`StepOutcome::Stale`].
//!
//! Runs are sampled in discrete steps: `step = floor(steps * fraction)`,
//! where `fraction` is the elapsed share of the run's duration. The driver
//! never reads a clock; callers pass [`HostTime`] values.

use kurbo::Vec2;

use crate::config::Tuning;
use crate::easing::ease_out_cubic;
use crate::time::{Duration, HostTime};

/// Which animation a run drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Spacing and opacity ease-in after attach.
    Entry,
    /// Post-fling pan deceleration.
    Inertia,
}

impl AnimationKind {
    const fn slot(self) -> usize {
        match self {
            Self::Entry => 0,
            Self::Inertia => 1,
        }
    }
}

/// Identity of one animation run.
///
/// Tokens are compared by value: a token is current only while its run is
/// the active run of its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken {
    /// Kind of the run.
    pub kind: AnimationKind,
    /// Per-kind generation at the time the run started.
    pub generation: u64,
}

/// Kind-specific parameters of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunParams {
    /// Ease spacing from `from` to `to`.
    Entry {
        /// Spacing at the start of the run.
        from: f64,
        /// Resting spacing.
        to: f64,
    },
    /// Coast the pan by `distance` in total.
    Inertia {
        /// Total displacement over the run.
        distance: Vec2,
        /// Last step whose displacement has been handed out.
        applied_step: u32,
    },
}

/// One in-flight animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRun {
    /// Identity of the run.
    pub token: AnimationToken,
    /// When the run started.
    pub start: HostTime,
    /// Total length of the run.
    pub duration: Duration,
    /// Number of discrete steps.
    pub steps: u32,
    /// Kind-specific parameters.
    pub params: RunParams,
}

impl AnimationRun {
    /// Elapsed share of the run at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_at(&self, now: HostTime) -> f64 {
        now.saturating_since(self.start).fraction_of(self.duration)
    }

    /// Discrete step reached at `now`.
    #[must_use]
    pub fn step_at(&self, now: HostTime) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "fraction is clamped to [0, 1], so the product fits in u32"
        )]
        let step = (f64::from(self.steps) * self.fraction_at(now)) as u32;
        step.min(self.steps)
    }
}

/// Values produced by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// Entry animation values.
    Entry {
        /// Hex spacing for this step.
        spacing: f64,
        /// Uniform item opacity.
        opacity: f64,
    },
    /// Inertial displacement since the previous step.
    Inertia {
        /// Pan displacement to apply.
        displacement: Vec2,
        /// Number of discrete steps this sample covers (zero if the step
        /// index did not advance).
        steps_advanced: u32,
    },
}

/// Result of stepping a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// The token no longer names the active run. Nothing changes.
    Stale,
    /// The run is still going.
    Advanced(Sample),
    /// The run produced its last sample and is gone.
    Finished(Sample),
}

/// Owns the active runs.
#[derive(Clone, Debug, Default)]
pub struct AnimationDriver {
    runs: [Option<AnimationRun>; 2],
    generations: [u64; 2],
}

impl AnimationDriver {
    /// Creates a driver with no active runs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runs: [None, None],
            generations: [0, 0],
        }
    }

    /// Starts the entry animation, replacing any previous one.
    ///
    /// Returns the new token and the token of the run it superseded.
    pub fn start_entry(
        &mut self,
        now: HostTime,
        hex_radius: f64,
        tuning: &Tuning,
    ) -> (AnimationToken, Option<AnimationToken>) {
        self.start(
            AnimationKind::Entry,
            now,
            tuning.entry_duration,
            tuning.entry_steps,
            RunParams::Entry {
                from: hex_radius + tuning.entry_spacing_offset,
                to: hex_radius,
            },
        )
    }

    /// Starts an inertial run covering `distance`, replacing any previous
    /// one.
    pub fn start_inertia(
        &mut self,
        now: HostTime,
        distance: Vec2,
        tuning: &Tuning,
    ) -> (AnimationToken, Option<AnimationToken>) {
        self.start(
            AnimationKind::Inertia,
            now,
            tuning.inertia_duration,
            tuning.inertia_steps,
            RunParams::Inertia {
                distance,
                applied_step: 0,
            },
        )
    }

    fn start(
        &mut self,
        kind: AnimationKind,
        start: HostTime,
        duration: Duration,
        steps: u32,
        params: RunParams,
    ) -> (AnimationToken, Option<AnimationToken>) {
        let slot = kind.slot();
        self.generations[slot] += 1;
        let token = AnimationToken {
            kind,
            generation: self.generations[slot],
        };
        let previous = self.runs[slot].replace(AnimationRun {
            token,
            start,
            duration,
            steps: steps.max(1),
            params,
        });
        (token, previous.map(|run| run.token))
    }

    /// Stops the active run of `kind`, returning its token.
    ///
    /// The generation is bumped so outstanding tokens go stale.
    pub fn cancel(&mut self, kind: AnimationKind) -> Option<AnimationToken> {
        let slot = kind.slot();
        let run = self.runs[slot].take()?;
        self.generations[slot] += 1;
        Some(run.token)
    }

    /// Whether `token` names an active run.
    #[must_use]
    pub fn is_current(&self, token: AnimationToken) -> bool {
        self.runs[token.kind.slot()].is_some_and(|run| run.token == token)
    }

    /// The active run of `kind`.
    #[must_use]
    pub fn active(&self, kind: AnimationKind) -> Option<&AnimationRun> {
        self.runs[kind.slot()].as_ref()
    }

    /// Whether any run is active.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.runs.iter().any(Option::is_some)
    }

    /// Tokens of all active runs, entry first.
    pub fn active_tokens(&self) -> impl Iterator<Item = AnimationToken> + '_ {
        self.runs.iter().flatten().map(|run| run.token)
    }

    /// Samples the run named by `token` at `now`.
    pub fn step(&mut self, token: AnimationToken, now: HostTime) -> StepOutcome {
        let slot = token.kind.slot();
        let Some(run) = self.runs[slot].as_mut() else {
            return StepOutcome::Stale;
        };
        if run.token != token {
            return StepOutcome::Stale;
        }

        let fraction = run.fraction_at(now);
        let step = run.step_at(now);
        let steps = f64::from(run.steps);
        let sample = match &mut run.params {
            RunParams::Entry { from, to } => Sample::Entry {
                spacing: ease_out_cubic(f64::from(step), *from, *to - *from, steps),
                opacity: fraction,
            },
            RunParams::Inertia {
                distance,
                applied_step,
            } => {
                let advanced = step.saturating_sub(*applied_step);
                let displacement = if advanced == 0 {
                    Vec2::ZERO
                } else {
                    inertia_offset(*distance, step, steps)
                        - inertia_offset(*distance, *applied_step, steps)
                };
                *applied_step = step.max(*applied_step);
                Sample::Inertia {
                    displacement,
                    steps_advanced: advanced,
                }
            }
        };

        if fraction >= 1.0 {
            self.runs[slot] = None;
            StepOutcome::Finished(sample)
        } else {
            StepOutcome::Advanced(sample)
        }
    }
}

/// Eased inertial offset reached after `step` of `steps`.
fn inertia_offset(distance: Vec2, step: u32, steps: f64) -> Vec2 {
    let t = f64::from(step);
    Vec2::new(
        ease_out_cubic(t, 0.0, distance.x, steps),
        ease_out_cubic(t, 0.0, distance.y, steps),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: Tuning = Tuning::DEFAULT;

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    fn sample_of(outcome: StepOutcome) -> Sample {
        match outcome {
            StepOutcome::Advanced(s) | StepOutcome::Finished(s) => s,
            StepOutcome::Stale => panic!("unexpected stale outcome"),
        }
    }

    #[test]
    fn entry_eases_spacing_and_opacity() {
        let mut d = AnimationDriver::new();
        let (token, prev) = d.start_entry(ms(0), 100.0, &T);
        assert_eq!(prev, None);

        assert_eq!(
            d.step(token, ms(0)),
            StepOutcome::Advanced(Sample::Entry {
                spacing: 200.0,
                opacity: 0.0,
            })
        );

        let Sample::Entry { spacing, opacity } = sample_of(d.step(token, ms(500))) else {
            panic!("expected entry sample");
        };
        assert!(spacing > 100.0 && spacing < 200.0, "got {spacing}");
        assert_eq!(opacity, 0.5);

        assert_eq!(
            d.step(token, ms(1000)),
            StepOutcome::Finished(Sample::Entry {
                spacing: 100.0,
                opacity: 1.0,
            })
        );
        assert!(!d.is_animating());
        assert_eq!(d.step(token, ms(1100)), StepOutcome::Stale);
    }

    #[test]
    fn entry_spacing_is_quantized_to_steps() {
        let mut d = AnimationDriver::new();
        let (token, _) = d.start_entry(ms(0), 100.0, &T);
        // 36 steps over 1000 ms: 20 ms and 25 ms both fall in step 0.
        let a = sample_of(d.step(token, ms(20)));
        let b = sample_of(d.step(token, ms(25)));
        let (Sample::Entry { spacing: sa, .. }, Sample::Entry { spacing: sb, .. }) = (a, b) else {
            panic!("expected entry samples");
        };
        assert_eq!(sa, sb);
        assert_eq!(sa, 200.0);
    }

    #[test]
    fn new_run_supersedes_old_token() {
        let mut d = AnimationDriver::new();
        let (first, _) = d.start_inertia(ms(0), Vec2::new(100.0, 0.0), &T);
        let (second, prev) = d.start_inertia(ms(50), Vec2::new(-40.0, 0.0), &T);
        assert_eq!(prev, Some(first));
        assert_ne!(first, second);
        assert_eq!(d.step(first, ms(100)), StepOutcome::Stale);
        assert!(d.is_current(second));
    }

    #[test]
    fn cancel_makes_token_stale() {
        let mut d = AnimationDriver::new();
        let (token, _) = d.start_inertia(ms(0), Vec2::new(10.0, 10.0), &T);
        assert_eq!(d.cancel(AnimationKind::Inertia), Some(token));
        assert_eq!(d.cancel(AnimationKind::Inertia), None);
        assert_eq!(d.step(token, ms(10)), StepOutcome::Stale);
    }

    #[test]
    fn kinds_run_independently() {
        let mut d = AnimationDriver::new();
        let (entry, _) = d.start_entry(ms(0), 100.0, &T);
        let (inertia, prev) = d.start_inertia(ms(0), Vec2::new(5.0, 0.0), &T);
        assert_eq!(prev, None);
        assert!(d.is_current(entry) && d.is_current(inertia));
        assert_eq!(d.active_tokens().count(), 2);
    }

    #[test]
    fn repeated_step_in_same_slot_displaces_nothing() {
        let mut d = AnimationDriver::new();
        let (token, _) = d.start_inertia(ms(0), Vec2::new(160.0, 0.0), &T);
        sample_of(d.step(token, ms(40)));
        assert_eq!(
            d.step(token, ms(40)),
            StepOutcome::Advanced(Sample::Inertia {
                displacement: Vec2::ZERO,
                steps_advanced: 0,
            })
        );
    }

    #[test]
    fn inertia_steps_decelerate() {
        let mut d = AnimationDriver::new();
        let (token, _) = d.start_inertia(ms(0), Vec2::new(160.0, 0.0), &T);
        // 300 ms / 16 steps = 18.75 ms per step.
        let mut moves = alloc::vec::Vec::new();
        for i in 1..=16_u64 {
            let now = HostTime(i * 18_750_000);
            if let Sample::Inertia { displacement, .. } = sample_of(d.step(token, now)) {
                moves.push(displacement.x);
            }
        }
        assert_eq!(moves.len(), 16);
        assert!(moves.windows(2).all(|w| w[0] >= w[1]), "not decelerating: {moves:?}");
    }

    proptest! {
        #[test]
        fn inertia_displacements_sum_to_distance(
            dx in -500.0_f64..500.0,
            dy in -500.0_f64..500.0,
            frames in proptest::collection::vec(1_u64..40, 1..40),
        ) {
            let mut frames = frames;
            let distance = Vec2::new(dx, dy);
            let mut d = AnimationDriver::new();
            let (token, _) = d.start_inertia(ms(0), distance, &T);
            let mut now = 0_u64;
            let mut total = Vec2::ZERO;
            let mut advanced = 0;
            frames.push(400);
            for dt in frames {
                now += dt;
                match d.step(token, ms(now)) {
                    StepOutcome::Advanced(Sample::Inertia { displacement, steps_advanced })
                    | StepOutcome::Finished(Sample::Inertia { displacement, steps_advanced }) => {
                        total += displacement;
                        advanced += steps_advanced;
                    }
                    StepOutcome::Stale => break,
                    other => prop_assert!(false, "unexpected {other:?}"),
                }
            }
            prop_assert!((total - distance).hypot() < 1e-9, "total {total:?} vs {distance:?}");
            prop_assert_eq!(advanced, 16);
        }
    }
}
