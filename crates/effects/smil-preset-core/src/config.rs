//! Core configuration for smil-preset-core.

use serde::{Deserialize, Serialize};

/// Tunables for synthesis. Wheel step fractions, rim vertices and mask
/// outlines are constants, not settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duration in seconds of each quick reverse/forward primitive.
    pub quick_duration: f64,

    /// Cell count along the longer side of the dissolve grid.
    pub dissolve_cells_long_side: u32,

    /// Number of bars in the random-bars partition.
    pub random_bar_count: usize,

    /// Slat count for venetian blinds.
    pub venetian_slats: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quick_duration: 0.001,
            dissolve_cells_long_side: 16,
            random_bar_count: 50,
            venetian_slats: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "random_bar_count": 20 }"#).unwrap();
        assert_eq!(cfg.random_bar_count, 20);
        assert_eq!(cfg.venetian_slats, 6);
        assert_eq!(cfg.quick_duration, 0.001);
    }
}
