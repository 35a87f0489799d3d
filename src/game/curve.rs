use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

const THREE_POINT_LINEAR_EPS: f32 = 1e-6;

/// Interpolation shape of an analog segment between its initial and final value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveShape {
    #[default]
    Linear,
    /// Cosine ease-in/ease-out.
    Cosine,
    /// Quadratic Bezier through (0,0) and (1,1) with control point (a, b).
    ThreePoint,
}

impl CurveShape {
    /// Shapes that need a tessellated ribbon instead of a single quad.
    #[inline(always)]
    pub const fn is_curved(self) -> bool {
        matches!(self, Self::Cosine | Self::ThreePoint)
    }

    /// Maps `alpha` in [0, 1] to an interpolation weight in [0, 1].
    pub fn sample(self, alpha: f32, a: f32, b: f32) -> f32 {
        let alpha = alpha.clamp(0.0, 1.0);
        let y = match self {
            Self::Linear => alpha,
            Self::Cosine => 0.5 - 0.5 * (alpha * PI).cos(),
            Self::ThreePoint => three_point(alpha, a, b),
        };
        y.clamp(0.0, 1.0)
    }
}

// x(t) = 2(1-t)t*a + t^2, solved for t, then y(t) = 2(1-t)t*b + t^2.
#[inline(always)]
fn three_point(x: f32, a: f32, b: f32) -> f32 {
    let a = a.clamp(0.0, 1.0);
    let denom = 1.0 - 2.0 * a;
    let t = if denom.abs() < THREE_POINT_LINEAR_EPS {
        x
    } else {
        let disc = (a * a + x * denom).max(0.0);
        ((disc.sqrt() - a) / denom).clamp(0.0, 1.0)
    };
    2.0 * (1.0 - t) * t * b + t * t
}
