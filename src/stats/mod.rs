pub mod aggregate;
pub mod cache;
pub mod classifier;
pub mod extract;
pub mod heatmap;
pub mod series;

/// `part / whole * 100`, rounded to two decimals; `0` when `whole` is `0`.
pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
