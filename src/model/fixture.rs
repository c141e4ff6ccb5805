use std::path::PathBuf;

use serde::Serialize;

use crate::model::Event;

/// The two participants of a fixture, as encoded in a match-table file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Fixture {
    Pairing { home: String, away: String },
    /// File stem that does not follow the `home_vs_away` pattern.
    Unknown(String),
}

impl Fixture {
    const SEPARATOR: &'static str = "_vs_";

    /// Parse a file stem such as `liverpool_vs_arsenal`.
    pub fn from_stem(stem: &str) -> Self {
        match stem.split_once(Self::SEPARATOR) {
            Some((home, away)) if !home.is_empty() && !away.is_empty() => Fixture::Pairing {
                home: home.to_string(),
                away: away.to_string(),
            },
            _ => Fixture::Unknown(stem.to_string()),
        }
    }

    /// Whether `team` takes part in this fixture. Matches the lowercase form used in file names.
    pub fn involves(&self, team: &str) -> bool {
        let team = team.to_lowercase();
        match self {
            Fixture::Pairing { home, away } => *home == team || *away == team,
            Fixture::Unknown(_) => false,
        }
    }
}

impl std::fmt::Display for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fixture::Pairing { home, away } => write!(f, "{home} vs {away}"),
            Fixture::Unknown(stem) => f.write_str(stem),
        }
    }
}

/// Ordered events of exactly one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTable {
    pub fixture: Fixture,
    pub source: Option<PathBuf>,
    pub events: Vec<Event>,
}

impl MatchTable {
    pub fn new(fixture: Fixture, events: Vec<Event>) -> Self {
        Self {
            fixture,
            source: None,
            events,
        }
    }
}

/// All match tables of one team across one competition-season.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonEventSet {
    pub matches: Vec<MatchTable>,
}

impl SeasonEventSet {
    pub fn new(matches: Vec<MatchTable>) -> Self {
        Self { matches }
    }

    /// Number of match tables.
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Every event of the season, in match order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.matches.iter().flat_map(|m| m.events.iter())
    }

    pub fn total_events(&self) -> usize {
        self.matches.iter().map(|m| m.events.len()).sum()
    }
}

/// Every event of one player, cleaned for spatial analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerEvents {
    /// Name as requested, not as logged.
    pub player: String,
    pub events: Vec<Event>,
}

impl PlayerEvents {
    pub fn new(player: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            player: player.into(),
            events,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_from_stem() {
        assert_eq!(
            Fixture::from_stem("liverpool_vs_manchester city"),
            Fixture::Pairing {
                home: "liverpool".to_string(),
                away: "manchester city".to_string()
            }
        );
        assert_eq!(
            Fixture::from_stem("friendly"),
            Fixture::Unknown("friendly".to_string())
        );
        assert_eq!(
            Fixture::from_stem("_vs_arsenal"),
            Fixture::Unknown("_vs_arsenal".to_string())
        );
    }

    #[test]
    fn test_fixture_involves() {
        let fixture = Fixture::from_stem("liverpool_vs_arsenal");
        assert!(fixture.involves("Liverpool"));
        assert!(fixture.involves("arsenal"));
        assert!(!fixture.involves("Chelsea"));
        assert_eq!(fixture.to_string(), "liverpool vs arsenal");
    }

    #[test]
    fn test_season_counts() {
        let season = SeasonEventSet::new(vec![
            MatchTable::new(
                Fixture::from_stem("a_vs_b"),
                vec![crate::model::Event::new("X", "A", crate::model::EventType::Pass)],
            ),
            MatchTable::new(Fixture::from_stem("b_vs_a"), vec![]),
        ]);
        assert_eq!(season.total_matches(), 2);
        assert_eq!(season.total_events(), 1);
        assert!(!season.is_empty());
        assert!(SeasonEventSet::default().is_empty());
    }
}
