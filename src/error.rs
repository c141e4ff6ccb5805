use std::path::PathBuf;

/// All errors that can occur while loading match tables or deriving statistics.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// The input directory is missing or holds no match tables.
    #[error("no match tables found at {}", path.display())]
    NotFound { path: PathBuf },

    /// A match table lacks one of the core grouping columns.
    #[error("{} is missing required column `{column}`", path.display())]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },

    /// A match table could not be decoded.
    #[error("failed to parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: csv::Error },

    /// An artifact table could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: csv::Error },

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A requested series has nothing to show. Callers should render nothing.
    #[error("no {series} events for player {player}")]
    EmptyInput {
        player: String,
        series: &'static str,
    },

    /// Eligibility threshold outside `[0, 1]`.
    #[error("eligibility threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Heatmap grid without cells, or a smoothing sigma that is unusable.
    #[error("invalid heatmap parameters: bins={bins}, sigma={sigma}")]
    InvalidHeatmapParams { bins: usize, sigma: f64 },
}

impl StatsError {
    /// Whether this error describes a malformed source table.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            StatsError::MissingColumn { .. } | StatsError::Parse { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
