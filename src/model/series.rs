use serde::Serialize;

/// A pitch location on the 0–100 normalized scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A pass drawn as an arrow from its origin to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassVector {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// Passes split by outcome. Passes without an outcome appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassMap {
    pub successful: Vec<PassVector>,
    pub unsuccessful: Vec<PassVector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum ShotKind {
    Missed,
    Goal,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotPoint {
    pub x: f64,
    pub y: f64,
    pub kind: ShotKind,
}

/// Smoothed positional density on a square grid.
///
/// `cells[row][col]`: rows follow `y`, columns follow `x`, both ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub bins: usize,
    pub cells: Vec<Vec<f64>>,
}

impl HeatmapGrid {
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    pub fn max(&self) -> f64 {
        self.cells.iter().flatten().copied().fold(0.0, f64::max)
    }
}

/// Labels of the radar axes, in vector order.
pub const RADAR_PARAMS: [&str; 9] = [
    "Goals",
    "% Pass Successful",
    "% Take On Successful",
    "Dispossessed",
    "% Aerial Successful",
    "% Tackle Successful",
    "Ball Recovery",
    "Interception",
    "Clearance",
];

/// Fixed nine-metric profile of one player.
///
/// Percentages are `0` when their denominator is `0`. Values are never
/// clamped; see [`RadarScale`] for display ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RadarVector {
    pub goals: f64,
    pub pass_success_pct: f64,
    pub take_on_success_pct: f64,
    pub dispossessed: f64,
    pub aerial_success_pct: f64,
    pub tackle_success_pct: f64,
    pub ball_recoveries: f64,
    pub interceptions: f64,
    pub clearances: f64,
}

impl RadarVector {
    /// Values in [`RADAR_PARAMS`] order.
    pub fn values(&self) -> [f64; 9] {
        [
            self.goals,
            self.pass_success_pct,
            self.take_on_success_pct,
            self.dispossessed,
            self.aerial_success_pct,
            self.tackle_success_pct,
            self.ball_recoveries,
            self.interceptions,
            self.clearances,
        ]
    }

    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, f64)> {
        RADAR_PARAMS.into_iter().zip(self.values())
    }
}

/// Per-axis display range `(min, max)` for a radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarScale {
    pub ranges: [(f64, f64); 9],
}

impl Default for RadarScale {
    fn default() -> Self {
        Self {
            ranges: [
                (0.0, 10.0),
                (0.0, 100.0),
                (0.0, 100.0),
                (0.0, 5.0),
                (0.0, 100.0),
                (0.0, 100.0),
                (0.0, 10.0),
                (0.0, 10.0),
                (0.0, 10.0),
            ],
        }
    }
}

impl RadarScale {
    /// Position of `value` within axis `axis`'s range, in `[0, 1]`, for drawing only.
    /// Axes past the last one yield `0.0`.
    pub fn position(&self, axis: usize, value: f64) -> f64 {
        let Some(&(min, max)) = self.ranges.get(axis) else {
            return 0.0;
        };
        if max <= min {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_labels_align_with_values() {
        let radar = RadarVector {
            goals: 3.0,
            clearances: 7.0,
            ..Default::default()
        };
        let labelled: Vec<_> = radar.labelled().collect();
        assert_eq!(labelled[0], ("Goals", 3.0));
        assert_eq!(labelled[8], ("Clearance", 7.0));
    }

    #[test]
    fn test_radar_scale_position_is_display_only() {
        let scale = RadarScale::default();
        assert_eq!(scale.position(0, 5.0), 0.5);
        assert_eq!(scale.position(0, 25.0), 1.0);
        assert_eq!(scale.position(3, 1.0), 0.2);
        assert_eq!(scale.position(RADAR_PARAMS.len(), 5.0), 0.0);
    }
}
