use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StatsError};
use crate::matching::sanitize_player_name;
use crate::model::Event;
use crate::store::table;

/// Suffix appended to the sanitized player name to form an artifact file name.
pub const ARTIFACT_SUFFIX: &str = "_events.csv";

/// Where the artifact for `player` lives inside `output_dir`.
pub fn artifact_path(output_dir: &Path, player: &str) -> PathBuf {
    output_dir.join(format!("{}{ARTIFACT_SUFFIX}", sanitize_player_name(player)))
}

type Cell = fn(&Event) -> Option<String>;

fn fmt_num(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Column name, whether it is always written, and how to render it.
const COLUMNS: [(&str, bool, Cell); 10] = [
    ("player", true, |e| Some(e.player.clone())),
    ("team", true, |e| Some(e.team.clone())),
    ("type", true, |e| Some(e.event_type.as_str().to_string())),
    ("outcome_type", false, |e| {
        e.outcome_type.map(|o| o.as_ref().to_string())
    }),
    ("x", false, |e| fmt_num(e.x)),
    ("y", false, |e| fmt_num(e.y)),
    ("end_x", false, |e| fmt_num(e.end_x)),
    ("end_y", false, |e| fmt_num(e.end_y)),
    ("second", false, |e| fmt_num(e.second)),
    ("qualifiers", false, |e| e.qualifiers.clone()),
];

/// Write events as a CSV table, leaving out optional columns that are empty on every row.
pub fn write_events(path: &Path, events: &[Event]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;
    }

    let columns: Vec<_> = COLUMNS
        .iter()
        .filter(|(_, always, cell)| *always || events.iter().any(|e| cell(e).is_some()))
        .collect();

    let csv_err = |source| StatsError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record(columns.iter().map(|(name, _, _)| *name))
        .map_err(csv_err)?;
    for event in events {
        writer
            .write_record(
                columns
                    .iter()
                    .map(|(_, _, cell)| cell(event).unwrap_or_default()),
            )
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| StatsError::io(path, e))?;

    debug!(path = %path.display(), rows = events.len(), columns = columns.len(), "wrote events");
    Ok(())
}

/// Read an artifact back. Absent columns come back as `None`.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    table::read_events(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventType, OutcomeType};

    #[test]
    fn test_artifact_path() {
        let path = artifact_path(Path::new("out"), "Virgil van Dijk");
        assert_eq!(path, Path::new("out").join("virgil_van_dijk_events.csv"));
    }

    #[test]
    fn test_write_drops_empty_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players").join("salah_events.csv");
        let events = vec![
            Event::new("Mohamed Salah", "Liverpool", EventType::Pass)
                .with_outcome(OutcomeType::Successful)
                .at(50.0, 40.5)
                .to(70.0, 30.0),
            Event::new("Mohamed Salah", "Liverpool", EventType::Goal).at(90.0, 50.0).to(90.0, 50.0),
        ];
        write_events(&path, &events).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "player,team,type,outcome_type,x,y,end_x,end_y");

        let back = read_events(&path).unwrap();
        assert_eq!(back, events);
    }
}
