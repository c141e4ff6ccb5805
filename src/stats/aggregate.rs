use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::{Result, StatsError};
use crate::model::{
    ActionClass, Event, EventType, PlayerCount, PlayerMetrics, RankingField, SeasonEventSet,
};
use crate::stats::{classifier, percentage};

/// Default share of matches a player must appear in to enter team rankings.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Label used by [`goal_share`] for merged single-goal scorers.
pub const OTHERS_LABEL: &str = "Others";

/// Team filter and eligibility gate for [`aggregate_players`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationConfig {
    pub team: String,
    pub threshold: f64,
}

impl AggregationConfig {
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(StatsError::InvalidThreshold(self.threshold))
        }
    }

    /// Minimum number of matches for eligibility: `floor(total_matches * threshold)`.
    pub fn required_matches(&self, total_matches: usize) -> usize {
        (total_matches as f64 * self.threshold).floor() as usize
    }
}

/// Running counters for one player, fed one event at a time.
#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    defensive_actions: u32,
    offensive_actions: u32,
    total_passes: u32,
    successful_passes: u32,
    key_passes: u32,
    goals: u32,
    missed_shots: u32,
    saved_shots: u32,
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, event: &Event) {
        let classes = classifier::classify(event);

        if classes.contains(ActionClass::Defensive) {
            self.defensive_actions += 1;
        }
        if classes.contains(ActionClass::Offensive) {
            self.offensive_actions += 1;
        }
        if classes.contains(ActionClass::Pass) {
            self.total_passes += 1;
            if event.is_successful() {
                self.successful_passes += 1;
            }
        }
        if classes.contains(ActionClass::KeyPass) {
            self.key_passes += 1;
        }
        match event.event_type {
            EventType::Goal => self.goals += 1,
            EventType::MissedShots => self.missed_shots += 1,
            EventType::SavedShot => self.saved_shots += 1,
            _ => {}
        }
    }

    pub fn finish(&self, player: &str, matches_played: usize) -> PlayerMetrics {
        PlayerMetrics {
            player: player.to_string(),
            matches_played,
            defensive_actions: self.defensive_actions,
            offensive_actions: self.offensive_actions,
            total_passes: self.total_passes,
            successful_passes: self.successful_passes,
            pass_success_pct: percentage(self.successful_passes, self.total_passes),
            key_passes: self.key_passes,
            goals: self.goals,
            missed_shots: self.missed_shots,
            saved_shots: self.saved_shots,
        }
    }
}

fn team_events<'a>(season: &'a SeasonEventSet, team: &'a str) -> impl Iterator<Item = &'a Event> {
    season
        .events()
        .filter(move |e| e.team == team && !e.player.is_empty())
}

/// Number of distinct matches in which each player has at least one event for `team`.
pub fn participation(season: &SeasonEventSet, team: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for table in &season.matches {
        let players: HashSet<&str> = table
            .events
            .iter()
            .filter(|e| e.team == team && !e.player.is_empty())
            .map(|e| e.player.as_str())
            .collect();
        for player in players {
            *counts.entry(player.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Metric records for every eligible player of the configured team.
///
/// Records come out in order of each player's first event in the season.
#[instrument(skip(season), fields(matches = season.total_matches()))]
pub fn aggregate_players(
    season: &SeasonEventSet,
    config: &AggregationConfig,
) -> Result<Vec<PlayerMetrics>> {
    config.validate()?;

    let required = config.required_matches(season.total_matches());
    let participation = participation(season, &config.team);

    let mut order: Vec<&str> = Vec::new();
    let mut accumulators: HashMap<&str, MetricsAccumulator> = HashMap::new();
    for event in team_events(season, &config.team) {
        let player = event.player.as_str();
        if participation.get(player).copied().unwrap_or_default() < required {
            continue;
        }
        accumulators
            .entry(player)
            .or_insert_with(|| {
                order.push(player);
                MetricsAccumulator::new()
            })
            .update(event);
    }

    let metrics: Vec<PlayerMetrics> = order
        .into_iter()
        .map(|player| {
            let played = participation.get(player).copied().unwrap_or_default();
            accumulators[player].finish(player, played)
        })
        .collect();

    debug!(
        required,
        eligible = metrics.len(),
        candidates = participation.len(),
        "aggregated player metrics"
    );
    Ok(metrics)
}

/// Metric record for one exactly-named player over the whole season, without eligibility gating.
pub fn summarize_player(season: &SeasonEventSet, player: &str) -> PlayerMetrics {
    let mut acc = MetricsAccumulator::new();
    let mut matches_played = 0;
    for table in &season.matches {
        let mut seen = false;
        for event in table.events.iter().filter(|e| e.player == player) {
            acc.update(event);
            seen = true;
        }
        if seen {
            matches_played += 1;
        }
    }
    acc.finish(player, matches_played)
}

fn compare_by(field: RankingField, a: &PlayerMetrics, b: &PlayerMetrics) -> std::cmp::Ordering {
    match field {
        RankingField::DefensiveActions => b.defensive_actions.cmp(&a.defensive_actions),
        RankingField::PassSuccess => b.pass_success_pct.total_cmp(&a.pass_success_pct),
        RankingField::KeyPasses => b.key_passes.cmp(&a.key_passes),
        RankingField::Goals => b.goals.cmp(&a.goals),
    }
}

/// Top `n` records by `field`, descending. Ties keep their input order.
pub fn top_n(metrics: &[PlayerMetrics], field: RankingField, n: usize) -> Vec<PlayerMetrics> {
    metrics
        .iter()
        .sorted_by(|a, b| compare_by(field, a, b))
        .take(n)
        .cloned()
        .collect()
}

/// Count matching events per player, descending, ties in first-appearance order.
fn ranked_counts<'a>(
    events: impl Iterator<Item = &'a Event>,
    keep: impl Fn(&Event) -> bool,
) -> Vec<PlayerCount> {
    let mut counts: Vec<PlayerCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for event in events.filter(|&e| keep(e)) {
        let slot = *index.entry(event.player.as_str()).or_insert_with(|| {
            counts.push(PlayerCount::new(event.player.as_str(), 0));
            counts.len() - 1
        });
        counts[slot].count += 1;
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Defensive actions per player of `team` over the whole season.
#[instrument(skip(season))]
pub fn defensive_ranking(season: &SeasonEventSet, team: &str) -> Vec<PlayerCount> {
    ranked_counts(team_events(season, team), |e| {
        classifier::is_defensive(&e.event_type)
    })
}

/// Goals per player of `team` over the whole season.
#[instrument(skip(season))]
pub fn goals_by_player(season: &SeasonEventSet, team: &str) -> Vec<PlayerCount> {
    ranked_counts(team_events(season, team), |e| {
        e.event_type == EventType::Goal
    })
}

/// Goal tallies with every single-goal scorer merged into one [`OTHERS_LABEL`] entry.
///
/// The merged entry is always last, after the ranked scorers, rather than in
/// name order, so it renders as the final slice.
pub fn goal_share(goals: &[PlayerCount]) -> Vec<PlayerCount> {
    let (singles, scorers): (Vec<_>, Vec<_>) = goals.iter().partition(|g| g.count == 1);
    let mut share: Vec<PlayerCount> = scorers.into_iter().cloned().collect();
    if !singles.is_empty() {
        share.push(PlayerCount::new(OTHERS_LABEL, singles.len() as u32));
    }
    share
}

/// Sorted distinct names of players with at least one event for `team`.
pub fn team_players(season: &SeasonEventSet, team: &str) -> Vec<String> {
    team_events(season, team)
        .map(|e| e.player.clone())
        .unique()
        .sorted()
        .collect()
}
