pub mod artifact;
pub(crate) mod table;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::error::{Result, StatsError};
use crate::model::{Fixture, MatchTable, SeasonEventSet};

/// Extension of match-table files inside an input directory.
pub const MATCH_FILE_EXTENSION: &str = "csv";

/// List the match tables of a directory, sorted by file name.
///
/// Fails with [`StatsError::NotFound`] when the directory is missing or
/// holds no match tables.
pub fn list_match_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StatsError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| StatsError::io(dir, e))? {
        let path = entry.map_err(|e| StatsError::io(dir, e))?.path();
        let is_table = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(MATCH_FILE_EXTENSION);
        if is_table {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(StatsError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    files.sort();
    Ok(files)
}

/// Load one match table; the fixture comes from the file stem.
pub fn load_match_table(path: &Path) -> Result<MatchTable> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let events = table::read_events(path)?;
    Ok(MatchTable {
        fixture: Fixture::from_stem(stem),
        source: Some(path.to_path_buf()),
        events,
    })
}

/// Load every match table of a directory into one season.
///
/// Tables that fail to read or decode are skipped with a warning. A table
/// missing a grouping column (`player`, `team`, `type`) aborts the load.
#[instrument]
pub fn load_season(dir: &Path) -> Result<SeasonEventSet> {
    let files = list_match_files(dir)?;
    let mut matches = Vec::with_capacity(files.len());

    for path in &files {
        match load_match_table(path) {
            Ok(table) => matches.push(table),
            Err(err @ StatsError::MissingColumn { .. }) => return Err(err),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping match table"),
        }
    }

    let season = SeasonEventSet::new(matches);
    debug!(
        files = files.len(),
        matches = season.total_matches(),
        events = season.total_events(),
        "loaded season"
    );
    Ok(season)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;

    pub(crate) const HEADER: &str = "team,player,type,outcome_type,x,y,end_x,end_y,second,qualifiers";

    pub(crate) fn write_table(dir: &Path, name: &str, rows: &[&str]) {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_list_match_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_match_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StatsError::NotFound { .. }));
    }

    #[test]
    fn test_list_match_files_without_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        let err = list_match_files(dir.path()).unwrap_err();
        assert!(matches!(err, StatsError::NotFound { .. }));
    }

    #[test]
    fn test_list_match_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "liverpool_vs_chelsea.csv", &[]);
        write_table(dir.path(), "arsenal_vs_liverpool.csv", &[]);
        fs::write(dir.path().join("readme.md"), "").unwrap();

        let files = list_match_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["arsenal_vs_liverpool.csv", "liverpool_vs_chelsea.csv"]);
    }

    #[test]
    fn test_load_season_skips_unparseable_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            "liverpool_vs_chelsea.csv",
            &["Liverpool,Mohamed Salah,Pass,Successful,50,50,60,60,1,"],
        );
        write_table(
            dir.path(),
            "liverpool_vs_everton.csv",
            &["Liverpool,Mohamed Salah,Pass,Successful,not-a-number,50,60,60,1,"],
        );

        let season = load_season(dir.path()).unwrap();
        assert_eq!(season.total_matches(), 1);
        assert_eq!(
            season.matches[0].fixture,
            Fixture::from_stem("liverpool_vs_chelsea")
        );
        assert_eq!(season.total_events(), 1);
    }

    #[test]
    fn test_load_season_missing_grouping_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_table(dir.path(), "liverpool_vs_chelsea.csv", &[]);
        fs::write(dir.path().join("liverpool_vs_everton.csv"), "player,type\nSalah,Pass\n").unwrap();

        let err = load_season(dir.path()).unwrap_err();
        assert!(matches!(err, StatsError::MissingColumn { column: "team", .. }));
    }
}
