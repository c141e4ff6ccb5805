use std::path::Path;
use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::model::*;
use crate::stats::aggregate::{self, AggregationConfig};
use crate::stats::cache::{SeriesCache, SeriesKey, SeriesKind};
use crate::stats::heatmap::{self, HeatmapParams};
use crate::stats::{extract, series};
use crate::store;

/// The main entry point for season statistics.
///
/// `SeasonAnalyst` owns one [`SeasonEventSet`] and a cache of per-player
/// series built from it. Team-level views are recomputed on every call;
/// player series are cached until the season is replaced.
///
/// # Examples
///
/// ```no_run
/// # fn example() -> season_stats::Result<()> {
/// use season_stats::{AggregationConfig, RankingField, SeasonAnalyst};
///
/// let analyst = SeasonAnalyst::from_dir("data/matches_liverpool")?;
/// let config = AggregationConfig::new("Liverpool");
/// for player in analyst.top_players(&config, RankingField::PassSuccess, 3)? {
///     println!("{}: {:.2}%", player.player, player.pass_success_pct);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SeasonAnalyst {
    season: SeasonEventSet,
    cache: SeriesCache,
}

impl SeasonAnalyst {
    pub fn new(season: SeasonEventSet) -> Self {
        Self {
            season,
            cache: SeriesCache::new(),
        }
    }

    /// Load every match table of `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        store::load_season(dir.as_ref()).map(Self::new)
    }

    pub fn season(&self) -> &SeasonEventSet {
        &self.season
    }

    /// Swap in new season data and drop every cached series.
    pub fn replace_season(&mut self, season: SeasonEventSet) {
        self.season = season;
        self.cache.clear();
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Metric records of every eligible player of the configured team.
    #[instrument(skip(self))]
    pub fn player_metrics(&self, config: &AggregationConfig) -> Result<Vec<PlayerMetrics>> {
        aggregate::aggregate_players(&self.season, config)
    }

    /// Top `n` eligible players by `field`.
    #[instrument(skip(self))]
    pub fn top_players(
        &self,
        config: &AggregationConfig,
        field: RankingField,
        n: usize,
    ) -> Result<Vec<PlayerMetrics>> {
        let metrics = aggregate::aggregate_players(&self.season, config)?;
        Ok(aggregate::top_n(&metrics, field, n))
    }

    pub fn defensive_ranking(&self, team: &str) -> Vec<PlayerCount> {
        aggregate::defensive_ranking(&self.season, team)
    }

    pub fn goals_by_player(&self, team: &str) -> Vec<PlayerCount> {
        aggregate::goals_by_player(&self.season, team)
    }

    /// Goal tallies with single-goal scorers merged, for a pie chart.
    pub fn goal_share(&self, team: &str) -> Vec<PlayerCount> {
        aggregate::goal_share(&self.goals_by_player(team))
    }

    pub fn team_players(&self, team: &str) -> Vec<String> {
        aggregate::team_players(&self.season, team)
    }

    /// Metric record of one exactly-named player, with no eligibility gate.
    pub fn player_summary(&self, player: &str) -> PlayerMetrics {
        aggregate::summarize_player(&self.season, player)
    }

    /// Cleaned events of every player whose name contains `name`.
    #[instrument(skip(self))]
    pub fn player_events(&self, name: &str) -> Result<Arc<PlayerEvents>> {
        self.cache
            .get_or_insert_with(SeriesKey::new(name, SeriesKind::Events), || {
                Ok(extract::extract_player_events(&self.season, name))
            })
    }

    fn cached<T, F>(&self, name: &str, key: SeriesKey, build: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&PlayerEvents) -> Result<T>,
    {
        let events = self.player_events(name)?;
        let value = self.cache.get_or_insert_with(key, || build(events.as_ref()))?;
        Ok(T::clone(&value))
    }

    pub fn heatmap_points(&self, name: &str) -> Result<Vec<Point>> {
        let key = SeriesKey::new(name, SeriesKind::Heatmap);
        self.cached(name, key, |events| Ok(series::heatmap_points(events)))
    }

    /// Binned and smoothed density grid of the player's locations.
    pub fn heatmap_grid(&self, name: &str, params: HeatmapParams) -> Result<HeatmapGrid> {
        let key = SeriesKey::new(name, SeriesKind::HeatmapGrid).with_params(params.key());
        self.cached(name, key, |events| {
            heatmap::heatmap_grid(&series::heatmap_points(events), params)
        })
    }

    pub fn pass_map(&self, name: &str) -> Result<PassMap> {
        let key = SeriesKey::new(name, SeriesKind::Passes);
        self.cached(name, key, |events| Ok(series::pass_map(events)))
    }

    /// Shot locations. [`StatsError::EmptyInput`](crate::StatsError::EmptyInput)
    /// means there is no chart to draw.
    pub fn shot_points(&self, name: &str) -> Result<Vec<ShotPoint>> {
        let key = SeriesKey::new(name, SeriesKind::Shots);
        self.cached(name, key, series::shot_points)
    }

    pub fn radar(&self, name: &str) -> Result<RadarVector> {
        let key = SeriesKey::new(name, SeriesKind::Radar);
        self.cached(name, key, |events| Ok(series::radar_vector(events)))
    }
}
