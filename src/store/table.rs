use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StatsError};
use crate::model::{Event, EventType, OutcomeType};

/// Columns without which a table cannot be grouped.
pub(crate) const REQUIRED_COLUMNS: [&str; 3] = ["player", "team", "type"];

/// One CSV row as written by the scraper. Unlisted columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    player: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(rename = "type", default)]
    event_type: Option<String>,
    #[serde(default)]
    outcome_type: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    end_x: Option<f64>,
    #[serde(default)]
    end_y: Option<f64>,
    #[serde(default)]
    second: Option<f64>,
    #[serde(default)]
    qualifiers: Option<String>,
}

impl From<RawRow> for Event {
    fn from(row: RawRow) -> Self {
        Event {
            player: row.player.unwrap_or_default(),
            team: row.team.unwrap_or_default(),
            event_type: EventType::from_tag(row.event_type.as_deref().unwrap_or_default()),
            outcome_type: row.outcome_type.as_deref().and_then(OutcomeType::from_cell),
            x: row.x,
            y: row.y,
            end_x: row.end_x,
            end_y: row.end_y,
            second: row.second,
            qualifiers: row.qualifiers.filter(|q| !q.is_empty()),
        }
    }
}

/// Decode a match table. `path` is only used for error reporting.
pub(crate) fn decode_events<R: io::Read>(reader: R, path: &Path) -> Result<Vec<Event>> {
    let parse_err = |source| StatsError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = reader.headers().map_err(parse_err)?.clone();
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(StatsError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    reader
        .deserialize::<RawRow>()
        .map(|row| row.map(Event::from).map_err(parse_err))
        .collect()
}

/// Read and decode a match table from disk.
pub(crate) fn read_events(path: &Path) -> Result<Vec<Event>> {
    let file = std::fs::File::open(path).map_err(|e| StatsError::io(path, e))?;
    decode_events(io::BufReader::new(file), path)
}
