//! Interpolation helpers:
//! - lerp_f64 / lerp_pair (component-wise linear blend)
//! - KeySpline (cubic-bezier timing, the two presets the renderer is given)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::fmt_number;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_pair(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    [lerp_f64(a[0], b[0], t), lerp_f64(a[1], b[1], t)]
}

#[inline]
fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
fn bezier_ease_t(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    // Fast path: Bezier(0,0,1,1) is exactly linear -> eased t == t
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..32 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Spline timing of one interpolation segment (`calcMode="spline"`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeySpline {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl KeySpline {
    /// Symmetric ease-in-out used by fly and settle segments.
    pub const SMOOTH: KeySpline = KeySpline {
        x1: 0.5,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };

    /// Fast start, gentle landing.
    pub const DECELERATE: KeySpline = KeySpline {
        x1: 0.0,
        y1: 0.0,
        x2: 0.5,
        y2: 1.0,
    };

    #[inline]
    pub fn ease(&self, t: f64) -> f64 {
        bezier_ease_t(t, self.x1, self.y1, self.x2, self.y2)
    }
}

impl fmt::Display for KeySpline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            fmt_number(self.x1),
            fmt_number(self.y1),
            fmt_number(self.x2),
            fmt_number(self.y2)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn splines_pin_endpoints() {
        for spline in [KeySpline::SMOOTH, KeySpline::DECELERATE] {
            approx(spline.ease(0.0), 0.0, 1e-9);
            approx(spline.ease(1.0), 1.0, 1e-9);
        }
    }

    #[test]
    fn smooth_is_symmetric_and_decelerate_leads() {
        approx(KeySpline::SMOOTH.ease(0.5), 0.5, 1e-6);
        assert!(KeySpline::DECELERATE.ease(0.5) > 0.5);
    }

    #[test]
    fn spline_renders_key_splines_attribute() {
        assert_eq!(KeySpline::SMOOTH.to_string(), "0.5 0 0.5 1");
        assert_eq!(KeySpline::DECELERATE.to_string(), "0 0 0.5 1");
    }
}
