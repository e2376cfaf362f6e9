//! Stepped polygon sweeps for wedge and wheel.
//!
//! A sector sweep cannot be expressed by linear vertex interpolation, so it
//! is approximated by a chain of polygon states. Vertices sit on a circle
//! circumscribing the unit bounding box; each polygon keeps a fixed vertex
//! count across all states by repeating the current leading vertex.

use serde::{Deserialize, Serialize};

pub const CENTER: [f64; 2] = [0.5, 0.5];

/// Rim vertices every 30°, clockwise from twelve o'clock.
pub const RIM_30: [[f64; 2]; 12] = [
    [0.5, -5.0],
    [3.25, -4.26],
    [5.26, -2.25],
    [6.0, 0.5],
    [5.26, 3.25],
    [3.25, 5.26],
    [0.5, 6.0],
    [-2.25, 5.26],
    [-4.26, 3.25],
    [-5.0, 0.5],
    [-4.26, -2.25],
    [-2.25, -4.26],
];

/// Rim vertices every 22.5°, clockwise from twelve o'clock.
pub const RIM_22_5: [[f64; 2]; 16] = [
    [0.5, -5.0],
    [2.6, -4.58],
    [4.39, -3.39],
    [5.58, -1.6],
    [6.0, 0.5],
    [5.58, 2.6],
    [4.39, 4.39],
    [2.6, 5.58],
    [0.5, 6.0],
    [-1.6, 5.58],
    [-3.39, 4.39],
    [-4.58, 2.6],
    [-5.0, 0.5],
    [-4.58, -1.6],
    [-3.39, -3.39],
    [-1.6, -4.58],
];

/// Steps per wedge half.
pub const WEDGE_STEPS: usize = 6;

/// Wheel subtype: number of spokes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Spokes {
    One,
    Two,
    Three,
    Four,
    Eight,
}

impl Spokes {
    pub fn count(self) -> usize {
        match self {
            Spokes::One => 1,
            Spokes::Two => 2,
            Spokes::Three => 3,
            Spokes::Four => 4,
            Spokes::Eight => 8,
        }
    }

    /// Step duration as a fraction of the total. Tuned per spoke count for
    /// perceived sweep speed; not `1 / steps`.
    pub fn step_fraction(self) -> f64 {
        match self {
            Spokes::One => 0.08,
            Spokes::Two => 0.16,
            Spokes::Three => 0.25,
            Spokes::Four => 0.33,
            Spokes::Eight => 0.5,
        }
    }

    fn rim(self) -> &'static [[f64; 2]] {
        match self {
            Spokes::Eight => &RIM_22_5,
            _ => &RIM_30,
        }
    }

    /// Steps needed for one spoke to sweep to the next.
    pub fn steps(self) -> usize {
        self.rim().len() / self.count()
    }
}

/// Direction a wedge half sweeps in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Handedness {
    Clockwise,
    CounterClockwise,
}

#[inline]
fn rim_at(rim: &[[f64; 2]], index: isize) -> [f64; 2] {
    let len = rim.len() as isize;
    rim[index.rem_euclid(len) as usize]
}

/// One spoke segment at `state`: centre, start vertex, then `steps`
/// vertices clamped to the current leading vertex.
fn spoke_segment(rim: &[[f64; 2]], start: isize, steps: usize, state: usize, sign: isize, out: &mut Vec<[f64; 2]>) {
    out.push(CENTER);
    out.push(rim_at(rim, start));
    for j in 1..=steps {
        let advanced = j.min(state) as isize;
        out.push(rim_at(rim, start + sign * advanced));
    }
}

/// Polygon states `0..=WEDGE_STEPS` for one wedge half.
pub fn wedge_states(hand: Handedness) -> Vec<Vec<[f64; 2]>> {
    let sign = match hand {
        Handedness::Clockwise => 1,
        Handedness::CounterClockwise => -1,
    };
    (0..=WEDGE_STEPS)
        .map(|state| {
            let mut pts = Vec::with_capacity(WEDGE_STEPS + 2);
            spoke_segment(&RIM_30, 0, WEDGE_STEPS, state, sign, &mut pts);
            pts
        })
        .collect()
}

/// Polygon states `0..=steps` for a wheel; all spokes live in one polygon.
pub fn wheel_states(spokes: Spokes) -> Vec<Vec<[f64; 2]>> {
    let rim = spokes.rim();
    let steps = spokes.steps();
    (0..=steps)
        .map(|state| {
            let mut pts = Vec::with_capacity(spokes.count() * (steps + 2));
            for spoke in 0..spokes.count() {
                let start = (spoke * steps) as isize;
                spoke_segment(rim, start, steps, state, 1, &mut pts);
            }
            pts
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_halves_end_at_six_o_clock() {
        let right = wedge_states(Handedness::Clockwise);
        let left = wedge_states(Handedness::CounterClockwise);
        assert_eq!(right.len(), WEDGE_STEPS + 1);
        assert_eq!(right[0], vec![CENTER, [0.5, -5.0], [0.5, -5.0], [0.5, -5.0], [0.5, -5.0], [0.5, -5.0], [0.5, -5.0], [0.5, -5.0]]);
        assert_eq!(right[1][2], [3.25, -4.26]);
        assert_eq!(left[1][2], [-2.25, -4.26]);
        assert_eq!(*right[6].last().unwrap(), [0.5, 6.0]);
        assert_eq!(*left[6].last().unwrap(), [0.5, 6.0]);
    }

    #[test]
    fn wheel_vertex_counts_are_constant() {
        for (spokes, per_spoke) in [
            (Spokes::One, 14),
            (Spokes::Two, 8),
            (Spokes::Three, 6),
            (Spokes::Four, 5),
            (Spokes::Eight, 4),
        ] {
            let states = wheel_states(spokes);
            assert_eq!(states.len(), spokes.steps() + 1);
            for s in &states {
                assert_eq!(s.len(), per_spoke * spokes.count());
            }
        }
    }

    #[test]
    fn wheel_spokes_start_at_table_positions() {
        let three = wheel_states(Spokes::Three);
        assert_eq!(three[0][7], [5.26, 3.25]);
        assert_eq!(three[0][13], [-4.26, 3.25]);
        let eight = wheel_states(Spokes::Eight);
        assert_eq!(eight[0][5], [4.39, -3.39]);
        assert_eq!(eight[1][6], [5.58, -1.6]);
        let one = wheel_states(Spokes::One);
        assert_eq!(*one[12].last().unwrap(), [0.5, -5.0]);
    }
}
