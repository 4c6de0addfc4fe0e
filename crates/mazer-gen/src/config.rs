//! Tuning knobs for maze generation.

/// Parameters for [`MazeGen`](crate::MazeGen).
///
/// The defaults reproduce the classic behaviour: 5×5 minimum, 40% open
/// cells in scatter mode, 10 carve attempts, 100 repair relocations and 20
/// history-avoiding draws per relocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    /// Smallest accepted row and column count. Values below 3 are treated
    /// as 3, the smallest maze with an interior.
    pub min_dimension: i32,
    /// Chance for each interior cell to be open when no path is guaranteed.
    pub open_probability: f64,
    /// How many full spanning carves to try before giving up on a
    /// connected layout.
    pub carve_attempts: usize,
    /// How many exit relocations the repair loop may make.
    pub repair_attempts: usize,
    /// How many draws a relocation makes while avoiding recent exits.
    pub relocate_attempts: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            min_dimension: 5,
            open_probability: 0.4,
            carve_attempts: 10,
            repair_attempts: 100,
            relocate_attempts: 20,
        }
    }
}

impl MazeConfig {
    /// The effective minimum dimension.
    pub(crate) fn min_dimension(&self) -> i32 {
        self.min_dimension.max(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_never_drops_below_three() {
        let cfg = MazeConfig {
            min_dimension: 1,
            ..MazeConfig::default()
        };
        assert_eq!(cfg.min_dimension(), 3);
        assert_eq!(MazeConfig::default().min_dimension(), 5);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: MazeConfig = serde_json::from_str(r#"{"open_probability": 0.25}"#).unwrap();
        assert_eq!(cfg.open_probability, 0.25);
        assert_eq!(cfg.repair_attempts, 100);
    }
}
