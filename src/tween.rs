//! Time warping for non-uniform swimming speed.
//!
//! A [`TweenSpec`] splits a repeating cycle into phases. Each phase first
//! bends time with its own motion curve (the warp pass) and then stretches or
//! squeezes how much of the path it covers according to its weight (the
//! weight pass). The result is a creature that darts, glides and darts again
//! while following the same precomputed path.

use serde::{Deserialize, Serialize};

use crate::easing::{run_equation, Ease, Transition};
use crate::error::PathError;

/// One slice of a tween cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenPhase {
    /// Wall-clock seconds the phase lasts.
    #[serde(rename = "delta")]
    pub duration: f32,
    /// Share of the cycle's path distance the phase covers.
    pub weight: f32,
    /// Curve shape applied inside the phase.
    #[serde(rename = "trans", default)]
    pub transition: Transition,
    /// Curve direction applied inside the phase.
    #[serde(rename = "eases", default)]
    pub ease: Ease,
}

impl TweenPhase {
    /// Creates a phase.
    #[must_use]
    pub const fn new(duration: f32, weight: f32, transition: Transition, ease: Ease) -> Self {
        Self {
            duration,
            weight,
            transition,
            ease,
        }
    }
}

/// Piecewise time warp. A zero `cycle_duration` disables warping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TweenSpec {
    /// Length of one cycle in seconds; the sum of the phase durations.
    #[serde(rename = "delta")]
    pub cycle_duration: f32,
    /// Sum of the phase weights.
    #[serde(rename = "weight")]
    pub total_weight: f32,
    /// Phases in playback order.
    #[serde(default)]
    pub phases: Vec<TweenPhase>,
}

impl TweenSpec {
    /// A tween that leaves time untouched.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            cycle_duration: 0.0,
            total_weight: 0.0,
            phases: Vec::new(),
        }
    }

    /// Builds an enabled tween, deriving the cycle and total weight from the
    /// phases.
    #[must_use]
    pub fn from_phases(phases: Vec<TweenPhase>) -> Self {
        Self {
            cycle_duration: phases.iter().map(|phase| phase.duration).sum(),
            total_weight: phases.iter().map(|phase| phase.weight).sum(),
            phases,
        }
    }

    /// Whether the tween warps time at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cycle_duration > 0.0
    }

    /// Checks that an enabled tween can be evaluated.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] when the cycle is negative or
    /// not finite, or when an enabled tween has no phases, a non-positive
    /// total weight, or a phase with non-positive duration or weight.
    pub fn validate(&self) -> Result<(), PathError> {
        if !self.cycle_duration.is_finite() || self.cycle_duration < 0.0 {
            return Err(PathError::invalid(format!(
                "tween cycle must be a non-negative number, got {}",
                self.cycle_duration
            )));
        }
        if !self.is_enabled() {
            return Ok(());
        }
        if self.phases.is_empty() {
            return Err(PathError::invalid("tween has a cycle but no phases"));
        }
        if self.total_weight.is_nan() || self.total_weight <= 0.0 {
            return Err(PathError::invalid(format!(
                "tween total weight must be positive, got {}",
                self.total_weight
            )));
        }
        for (index, phase) in self.phases.iter().enumerate() {
            if phase.duration.is_nan() || phase.duration <= 0.0 {
                return Err(PathError::invalid(format!(
                    "tween phase {index} has non-positive duration {}",
                    phase.duration
                )));
            }
            if phase.weight.is_nan() || phase.weight <= 0.0 {
                return Err(PathError::invalid(format!(
                    "tween phase {index} has non-positive weight {}",
                    phase.weight
                )));
            }
        }
        Ok(())
    }

    /// Maps seconds since activation onto warped progress time.
    ///
    /// Disabled tweens return `active_time` unchanged.
    ///
    /// # Examples
    /// ```
    /// use shoal::easing::{Ease, Transition};
    /// use shoal::tween::{TweenPhase, TweenSpec};
    ///
    /// // Two one-second phases; the first covers three quarters of the path.
    /// let tween = TweenSpec::from_phases(vec![
    ///     TweenPhase::new(1.0, 3.0, Transition::Linear, Ease::In),
    ///     TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In),
    /// ]);
    /// assert!((tween.warp(1.0) - 1.5).abs() < 1e-5);
    /// assert!((tween.warp(2.0) - 2.0).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn warp(&self, active_time: f32) -> f32 {
        if !self.is_enabled() {
            return active_time;
        }
        let eased = self.ease_pass(active_time);
        eased + self.weight_offset(eased)
    }

    /// Applies the curve of the phase `active_time` falls in.
    fn ease_pass(&self, active_time: f32) -> f32 {
        let mut local = self.cycle_local(active_time);
        let mut base = active_time - local;
        for phase in &self.phases {
            if local > phase.duration {
                local -= phase.duration;
                base += phase.duration;
                continue;
            }
            return run_equation(
                phase.transition,
                phase.ease,
                local,
                base,
                phase.duration,
                phase.duration,
            );
        }
        active_time
    }

    /// Seconds into the current cycle, in `0.0..=cycle_duration`.
    ///
    /// `time - cycle_local(time)` is always the start of that same cycle.
    fn cycle_local(&self, time: f32) -> f32 {
        let cycle = self.cycle_duration;
        let cycles = (time / cycle).floor();
        (time - cycles * cycle).clamp(0.0, cycle)
    }

    /// Extra progress owed to phase weights up to `eased` within its cycle.
    fn weight_offset(&self, eased: f32) -> f32 {
        let cycle = self.cycle_duration;
        let mut remaining = self.cycle_local(eased);
        let mut offset = 0.0;
        for phase in &self.phases {
            if remaining <= 0.0 {
                break;
            }
            let share = phase.weight / self.total_weight;
            let rate = cycle * share / phase.duration;
            offset += remaining.min(phase.duration) * (rate - 1.0);
            remaining -= phase.duration;
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::floor_to_index;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dart_and_glide() -> TweenSpec {
        TweenSpec::from_phases(vec![
            TweenPhase::new(0.5, 3.0, Transition::Quad, Ease::Out),
            TweenPhase::new(1.0, 1.0, Transition::Sine, Ease::InOut),
            TweenPhase::new(0.5, 2.0, Transition::Linear, Ease::In),
        ])
    }

    #[test]
    fn disabled_tween_is_identity() {
        let tween = TweenSpec::none();
        for t in [0.0, 0.3, 7.25] {
            assert_eq!(tween.warp(t), t);
        }
    }

    #[test]
    fn equal_weights_with_linear_phases_are_identity() {
        let tween = TweenSpec::from_phases(vec![
            TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In),
            TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In),
        ]);
        for t in [0.25, 0.5, 1.0, 1.75, 3.5] {
            assert_relative_eq!(tween.warp(t), t, epsilon = 1e-5);
        }
    }

    #[test]
    fn heavy_phase_covers_more_distance() {
        let tween = TweenSpec::from_phases(vec![
            TweenPhase::new(1.0, 3.0, Transition::Linear, Ease::In),
            TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In),
        ]);
        assert_relative_eq!(tween.warp(0.5), 0.75, epsilon = 1e-5);
        assert_relative_eq!(tween.warp(1.0), 1.5, epsilon = 1e-5);
        assert_relative_eq!(tween.warp(1.5), 1.75, epsilon = 1e-5);
    }

    #[rstest]
    fn whole_cycles_land_on_cycle_boundaries(dart_and_glide: TweenSpec) {
        for cycles in [1.0_f32, 2.0, 5.0] {
            let t = cycles * dart_and_glide.cycle_duration;
            assert_relative_eq!(dart_and_glide.warp(t), t, epsilon = 1e-4);
        }
    }

    #[rstest]
    fn eased_phase_bends_time_inside_the_phase(dart_and_glide: TweenSpec) {
        // Quad out over the first half second: half way through the phase
        // three quarters of its time has elapsed.
        let eased = dart_and_glide.ease_pass(0.25);
        assert_relative_eq!(eased, 0.375, epsilon = 1e-6);
    }

    #[rstest]
    fn progress_index_never_moves_backwards(dart_and_glide: TweenSpec) {
        let ratio = 30.0;
        let mut previous = 0;
        for tick in 0_u16..600 {
            let t = f32::from(tick) / 60.0;
            let index = floor_to_index(dart_and_glide.warp(t) * ratio);
            assert!(
                index >= previous,
                "index went from {previous} to {index} at t = {t}"
            );
            previous = index;
        }
    }

    #[rstest]
    #[case::tenths(vec![
        TweenPhase::new(0.1, 3.0, Transition::Linear, Ease::In),
        TweenPhase::new(0.2, 1.0, Transition::Linear, Ease::In),
    ])]
    #[case::uneven(vec![
        TweenPhase::new(0.1, 3.0, Transition::Quad, Ease::Out),
        TweenPhase::new(0.3, 1.0, Transition::Sine, Ease::InOut),
        TweenPhase::new(0.7, 2.0, Transition::Cubic, Ease::In),
    ])]
    fn inexact_cycles_never_warp_backwards(#[case] phases: Vec<TweenPhase>) {
        let tween = TweenSpec::from_phases(phases);
        let mut previous = 0.0;
        for step in 0_u16..30_000 {
            let t = f32::from(step) * 1e-4;
            let warped = tween.warp(t);
            assert!(
                warped + 1e-5 >= previous,
                "warp({t}) = {warped} after {previous}"
            );
            previous = warped;
        }
    }

    #[test]
    fn inexact_cycle_boundary_maps_onto_itself() {
        let tween = TweenSpec::from_phases(vec![
            TweenPhase::new(0.1, 3.0, Transition::Linear, Ease::In),
            TweenPhase::new(0.2, 1.0, Transition::Linear, Ease::In),
        ]);
        assert_relative_eq!(tween.warp(1.5), 1.5, epsilon = 1e-5);
        assert_relative_eq!(tween.warp(0.9), 0.9, epsilon = 1e-5);
    }

    #[rstest]
    #[case::no_phases(TweenSpec { cycle_duration: 1.0, total_weight: 1.0, phases: vec![] })]
    #[case::zero_weight(TweenSpec { cycle_duration: 1.0, total_weight: 0.0, phases: vec![TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In)] })]
    #[case::zero_phase_duration(TweenSpec::from_phases(vec![TweenPhase::new(0.0, 1.0, Transition::Linear, Ease::In), TweenPhase::new(1.0, 1.0, Transition::Linear, Ease::In)]))]
    #[case::negative_cycle(TweenSpec { cycle_duration: -1.0, total_weight: 1.0, phases: vec![] })]
    fn malformed_tweens_are_rejected(#[case] tween: TweenSpec) {
        assert!(matches!(tween.validate(), Err(PathError::InvalidArgument(_))));
    }

    #[test]
    fn disabled_tween_validates_without_phases() {
        assert_eq!(TweenSpec::none().validate(), Ok(()));
    }

    #[test]
    fn wire_names_follow_scene_scripts() {
        let tween: TweenSpec = serde_json::from_str(
            r#"{"delta": 2.0, "weight": 4.0, "phases": [
                {"delta": 1.5, "weight": 3.0, "trans": "quad", "eases": "out"},
                {"delta": 0.5, "weight": 1.0}
            ]}"#,
        )
        .expect("tween record parses");
        assert_eq!(tween.phases.len(), 2);
        assert_eq!(tween.phases[0].transition, Transition::Quad);
        assert_eq!(tween.phases[1].ease, Ease::In);
        assert_relative_eq!(tween.cycle_duration, 2.0);
    }

    #[test]
    fn curves_accept_numeric_codes() {
        let phase: TweenPhase =
            serde_json::from_str(r#"{"delta": 1.0, "weight": 2.0, "trans": 4, "eases": 1}"#)
                .expect("coded phase parses");
        assert_eq!(phase.transition, Transition::Quad);
        assert_eq!(phase.ease, Ease::Out);
    }
}
