use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::matching::player_matches;
use crate::model::{Event, PlayerEvents, SeasonEventSet};
use crate::store::{self, artifact};

/// Fill the gaps spatial analysis cannot handle: a missing `second` becomes
/// `0`, a missing destination becomes the event's own location.
pub fn clean_event(mut event: Event) -> Event {
    event.second = event.second.or(Some(0.0));
    event.end_x = event.end_x.or(event.x);
    event.end_y = event.end_y.or(event.y);
    event
}

/// Events whose player matches `name`, across every team, cleaned.
/// Team-level events without a player never match.
pub fn filter_player<'a>(events: impl IntoIterator<Item = &'a Event>, name: &str) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| !e.player.is_empty() && player_matches(&e.player, name))
        .cloned()
        .map(clean_event)
        .collect()
}

/// Every event of `name` in the season. Empty when the player never appears.
#[instrument(skip(season))]
pub fn extract_player_events(season: &SeasonEventSet, name: &str) -> PlayerEvents {
    let events = filter_player(season.events(), name);
    debug!(events = events.len(), "extracted player events");
    PlayerEvents::new(name, events)
}

/// Extracts player events from a directory of match tables and keeps one
/// artifact per player in an output directory.
#[derive(Debug, Clone)]
pub struct PlayerExtractor {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl PlayerExtractor {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        artifact::artifact_path(&self.output_dir, name)
    }

    /// Extract `name` from the input directory and write its artifact.
    ///
    /// Nothing is written when the player has no events.
    #[instrument(skip(self), fields(input = %self.input_dir.display()))]
    pub fn extract(&self, name: &str) -> Result<PlayerEvents> {
        let season = store::load_season(&self.input_dir)?;
        let extracted = extract_player_events(&season, name);
        if extracted.is_empty() {
            info!("no events found for player");
            return Ok(extracted);
        }

        let path = self.artifact_path(name);
        artifact::write_events(&path, &extracted.events)?;
        info!(path = %path.display(), events = extracted.len(), "saved player events");
        Ok(extracted)
    }

    /// Serve a previously written artifact, extracting only when there is none.
    #[instrument(skip(self))]
    pub fn load_or_extract(&self, name: &str) -> Result<PlayerEvents> {
        let path = self.artifact_path(name);
        if path.is_file() {
            debug!(path = %path.display(), "reusing player artifact");
            return read_artifact(&path, name);
        }
        self.extract(name)
    }
}

fn read_artifact(path: &Path, name: &str) -> Result<PlayerEvents> {
    Ok(PlayerEvents::new(name, artifact::read_events(path)?))
}
