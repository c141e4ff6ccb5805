use crate::error::{Result, StatsError};
use crate::model::{HeatmapGrid, Point};

/// Pitch extent on both axes.
const PITCH_MAX: f64 = 100.0;

/// Kernel half-width in multiples of sigma.
const TRUNCATE: f64 = 4.0;

/// Largest accepted grid resolution per axis.
pub const MAX_BINS: usize = 1000;

/// Grid resolution and smoothing strength for [`heatmap_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapParams {
    pub bins: usize,
    pub sigma: f64,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            bins: 25,
            sigma: 1.0,
        }
    }
}

impl HeatmapParams {
    /// Reject grids without cells and sigmas that are negative, not finite,
    /// or wider than the grid itself.
    pub fn validate(&self) -> Result<()> {
        let sigma_ok = self.sigma.is_finite() && (0.0..=self.bins as f64).contains(&self.sigma);
        if (1..=MAX_BINS).contains(&self.bins) && sigma_ok {
            Ok(())
        } else {
            Err(StatsError::InvalidHeatmapParams {
                bins: self.bins,
                sigma: self.sigma,
            })
        }
    }

    /// Stable text form, used as a cache key component.
    pub fn key(&self) -> String {
        format!("bins={};sigma={}", self.bins, self.sigma)
    }
}

fn bin_index(value: f64, bins: usize) -> Option<usize> {
    if !(0.0..=PITCH_MAX).contains(&value) {
        return None;
    }
    let index = (value / PITCH_MAX * bins as f64).floor() as usize;
    Some(index.min(bins - 1))
}

/// Count points per cell. Points off the pitch are dropped; the upper edge
/// belongs to the last cell.
pub fn bin_counts(points: &[Point], bins: usize) -> Vec<Vec<f64>> {
    let mut cells = vec![vec![0.0; bins]; bins];
    if bins == 0 {
        return cells;
    }
    for point in points {
        if let (Some(col), Some(row)) = (bin_index(point.x, bins), bin_index(point.y, bins)) {
            cells[row][col] += 1.0;
        }
    }
    cells
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let d = i as f64 - radius as f64;
            (-0.5 * d * d / (sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Mirror an out-of-range index back into `0..len`, repeating the edge cell.
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let k = index.rem_euclid(period);
    if k >= len as isize {
        (period - 1 - k) as usize
    } else {
        k as usize
    }
}

fn convolve(line: &[f64], kernel: &[f64]) -> Vec<f64> {
    let radius = (kernel.len() / 2) as isize;
    (0..line.len() as isize)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * line[reflect(i + k as isize - radius, line.len())])
                .sum()
        })
        .collect()
}

/// Separable Gaussian blur over both grid axes.
///
/// A sigma that is not a positive finite number leaves the cells unchanged.
pub fn gaussian_smooth(cells: &[Vec<f64>], sigma: f64) -> Vec<Vec<f64>> {
    if !(sigma.is_finite() && sigma > 0.0) || cells.is_empty() {
        return cells.to_vec();
    }
    let kernel = gaussian_kernel(sigma);

    let rows: Vec<Vec<f64>> = cells.iter().map(|row| convolve(row, &kernel)).collect();

    let width = rows[0].len();
    let mut out = rows.clone();
    for col in 0..width {
        let column: Vec<f64> = rows.iter().map(|row| row[col]).collect();
        for (row, value) in convolve(&column, &kernel).into_iter().enumerate() {
            out[row][col] = value;
        }
    }
    out
}

/// Binned, smoothed positional density.
pub fn heatmap_grid(points: &[Point], params: HeatmapParams) -> Result<HeatmapGrid> {
    params.validate()?;
    let counts = bin_counts(points, params.bins);
    Ok(HeatmapGrid {
        bins: params.bins,
        cells: gaussian_smooth(&counts, params.sigma),
    })
}
