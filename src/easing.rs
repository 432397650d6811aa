//! Motion curves for the tween warp pass.
//!
//! A curve is a [`Transition`] shape combined with an [`Ease`] direction.
//! Every `in` shape maps `0 → 0` and `1 → 1`; `out`, `in_out` and `out_in`
//! are derived from it, so all combinations share the same endpoints.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// Overshoot used by the `back` transition.
const BACK_OVERSHOOT: f32 = 1.701_58;
/// Oscillation period of the `elastic` transition, as a fraction of the curve.
const ELASTIC_PERIOD: f32 = 0.3;

/// Shape of a motion curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "CurveId")]
pub enum Transition {
    /// Constant rate.
    #[default]
    Linear,
    /// Quarter sine wave.
    Sine,
    /// Fifth power.
    Quint,
    /// Fourth power.
    Quart,
    /// Square.
    Quad,
    /// Exponential.
    Expo,
    /// Decaying oscillation.
    Elastic,
    /// Cube.
    Cubic,
    /// Quarter circle.
    Circ,
    /// Bouncing ball.
    Bounce,
    /// Slight overshoot.
    Back,
}

/// Direction a [`Transition`] is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "CurveId")]
pub enum Ease {
    /// Slow start.
    #[default]
    In,
    /// Slow finish.
    Out,
    /// Slow start and finish.
    InOut,
    /// Fast start and finish.
    OutIn,
}

/// A curve as scene scripts spell it: either its numeric code or its name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CurveId {
    /// Position in the host's curve table.
    Code(i64),
    /// Snake-case name such as `"in_out"`.
    Name(String),
}

impl Transition {
    const ALL: [Self; 11] = [
        Self::Linear,
        Self::Sine,
        Self::Quint,
        Self::Quart,
        Self::Quad,
        Self::Expo,
        Self::Elastic,
        Self::Cubic,
        Self::Circ,
        Self::Bounce,
        Self::Back,
    ];

    /// Looks up a transition by the numeric code scene scripts use.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for codes outside `0..=10`.
    pub fn from_code(code: i64) -> Result<Self, PathError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| PathError::invalid(format!("unknown transition code {code}")))
    }

    /// Name used by scene scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sine => "sine",
            Self::Quint => "quint",
            Self::Quart => "quart",
            Self::Quad => "quad",
            Self::Expo => "expo",
            Self::Elastic => "elastic",
            Self::Cubic => "cubic",
            Self::Circ => "circ",
            Self::Bounce => "bounce",
            Self::Back => "back",
        }
    }

    /// Evaluates the `in` form of the curve at `x` in `0.0..=1.0`.
    fn ease_in(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::Sine => 1.0 - (x * FRAC_PI_2).cos(),
            Self::Quint => x.powi(5),
            Self::Quart => x.powi(4),
            Self::Quad => x * x,
            Self::Expo => {
                if x <= 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * (x - 1.0))
                }
            }
            Self::Elastic => {
                if x <= 0.0 || x >= 1.0 {
                    return x.clamp(0.0, 1.0);
                }
                let shifted = x - 1.0;
                let phase = ELASTIC_PERIOD / 4.0;
                -(2.0_f32.powf(10.0 * shifted) * ((shifted - phase) * TAU / ELASTIC_PERIOD).sin())
            }
            Self::Cubic => x.powi(3),
            Self::Circ => 1.0 - (1.0 - x * x).max(0.0).sqrt(),
            Self::Bounce => 1.0 - bounce_out(1.0 - x),
            Self::Back => x * x * ((BACK_OVERSHOOT + 1.0) * x - BACK_OVERSHOOT),
        }
    }
}

impl Ease {
    const ALL: [Self; 4] = [Self::In, Self::Out, Self::InOut, Self::OutIn];

    /// Looks up an ease by the numeric code scene scripts use.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidArgument`] for codes outside `0..=3`.
    pub fn from_code(code: i64) -> Result<Self, PathError> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| PathError::invalid(format!("unknown ease code {code}")))
    }

    /// Name used by scene scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "in_out",
            Self::OutIn => "out_in",
        }
    }
}

impl FromStr for Transition {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|transition| transition.name() == s)
            .ok_or_else(|| PathError::invalid(format!("unknown transition `{s}`")))
    }
}

impl FromStr for Ease {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ease| ease.name() == s)
            .ok_or_else(|| PathError::invalid(format!("unknown ease `{s}`")))
    }
}

impl TryFrom<CurveId> for Transition {
    type Error = PathError;

    fn try_from(id: CurveId) -> Result<Self, Self::Error> {
        match id {
            CurveId::Code(code) => Self::from_code(code),
            CurveId::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<CurveId> for Ease {
    type Error = PathError;

    fn try_from(id: CurveId) -> Result<Self, Self::Error> {
        match id {
            CurveId::Code(code) => Self::from_code(code),
            CurveId::Name(name) => name.parse(),
        }
    }
}

fn bounce_out(x: f32) -> f32 {
    const SCALE: f32 = 7.5625;
    const STEP: f32 = 2.75;
    if x < 1.0 / STEP {
        SCALE * x * x
    } else if x < 2.0 / STEP {
        let t = x - 1.5 / STEP;
        SCALE * t * t + 0.75
    } else if x < 2.5 / STEP {
        let t = x - 2.25 / STEP;
        SCALE * t * t + 0.9375
    } else {
        let t = x - 2.625 / STEP;
        SCALE * t * t + 0.984_375
    }
}

/// Evaluates the curve at normalised time `x` in `0.0..=1.0`.
///
/// # Examples
/// ```
/// use shoal::easing::{curve, Ease, Transition};
/// assert_eq!(curve(Transition::Quad, Ease::In, 0.5), 0.25);
/// assert_eq!(curve(Transition::Quad, Ease::Out, 0.5), 0.75);
/// ```
#[must_use]
pub fn curve(transition: Transition, ease: Ease, x: f32) -> f32 {
    match ease {
        Ease::In => transition.ease_in(x),
        Ease::Out => 1.0 - transition.ease_in(1.0 - x),
        Ease::InOut => {
            if x < 0.5 {
                transition.ease_in(2.0 * x) / 2.0
            } else {
                1.0 - transition.ease_in(2.0 - 2.0 * x) / 2.0
            }
        }
        Ease::OutIn => {
            if x < 0.5 {
                (1.0 - transition.ease_in(1.0 - 2.0 * x)) / 2.0
            } else {
                0.5 + transition.ease_in(2.0 * x - 1.0) / 2.0
            }
        }
    }
}

/// Classic `(t, b, c, d)` tween equation: the value at local time `t` of a
/// motion starting at `b`, covering `c`, over duration `d`.
///
/// A non-positive duration jumps straight to `b + c`.
///
/// # Examples
/// ```
/// use shoal::easing::{run_equation, Ease, Transition};
/// let value = run_equation(Transition::Linear, Ease::In, 1.0, 10.0, 4.0, 2.0);
/// assert_eq!(value, 12.0);
/// ```
#[must_use]
pub fn run_equation(transition: Transition, ease: Ease, t: f32, b: f32, c: f32, d: f32) -> f32 {
    if d <= 0.0 {
        return b + c;
    }
    b + c * curve(transition, ease, t / d)
}
