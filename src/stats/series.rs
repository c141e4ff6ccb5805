use tracing::instrument;

use crate::error::{Result, StatsError};
use crate::model::{
    Event, EventType, OutcomeType, PassMap, PassVector, PlayerEvents, Point, RadarVector,
    ShotKind, ShotPoint,
};
use crate::stats::percentage;

/// Every located event as a point, skipping events without coordinates.
pub fn heatmap_points(events: &PlayerEvents) -> Vec<Point> {
    events
        .events
        .iter()
        .filter_map(Event::location)
        .map(|(x, y)| Point { x, y })
        .collect()
}

/// Passes as arrows, split by outcome.
pub fn pass_map(events: &PlayerEvents) -> PassMap {
    let mut map = PassMap::default();
    for event in events.events.iter().filter(|e| e.event_type == EventType::Pass) {
        let Some((x, y)) = event.location() else {
            continue;
        };
        let vector = PassVector {
            x,
            y,
            end_x: event.end_x.unwrap_or(x),
            end_y: event.end_y.unwrap_or(y),
        };
        match event.outcome_type {
            Some(OutcomeType::Successful) => map.successful.push(vector),
            Some(OutcomeType::Unsuccessful) => map.unsuccessful.push(vector),
            None => {}
        }
    }
    map
}

fn shot_kind(event_type: &EventType) -> Option<ShotKind> {
    match event_type {
        EventType::MissedShots => Some(ShotKind::Missed),
        EventType::Goal => Some(ShotKind::Goal),
        EventType::SavedShot => Some(ShotKind::Saved),
        _ => None,
    }
}

/// Missed, saved and scored shots with their locations.
///
/// Fails with [`StatsError::EmptyInput`] when the player took no such shot.
#[instrument(skip(events), fields(player = %events.player))]
pub fn shot_points(events: &PlayerEvents) -> Result<Vec<ShotPoint>> {
    let shots: Vec<ShotPoint> = events
        .events
        .iter()
        .filter_map(|e| {
            let kind = shot_kind(&e.event_type)?;
            let (x, y) = e.location()?;
            Some(ShotPoint { x, y, kind })
        })
        .collect();

    if shots.is_empty() {
        return Err(StatsError::EmptyInput {
            player: events.player.clone(),
            series: "shot",
        });
    }
    Ok(shots)
}

#[derive(Default)]
struct Tally {
    attempts: u32,
    successes: u32,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        self.attempts += 1;
        if event.is_successful() {
            self.successes += 1;
        }
    }

    fn pct(&self) -> f64 {
        percentage(self.successes, self.attempts)
    }
}

/// The nine-metric radar profile.
pub fn radar_vector(events: &PlayerEvents) -> RadarVector {
    let mut passes = Tally::default();
    let mut take_ons = Tally::default();
    let mut aerials = Tally::default();
    let mut tackles = Tally::default();
    let mut radar = RadarVector::default();

    for event in &events.events {
        match event.event_type {
            EventType::Goal => radar.goals += 1.0,
            EventType::Pass => passes.record(event),
            EventType::TakeOn => take_ons.record(event),
            EventType::Dispossessed => radar.dispossessed += 1.0,
            EventType::Aerial => aerials.record(event),
            EventType::Tackle => tackles.record(event),
            EventType::BallRecovery => radar.ball_recoveries += 1.0,
            EventType::Interception => radar.interceptions += 1.0,
            EventType::Clearance => radar.clearances += 1.0,
            _ => {}
        }
    }

    radar.pass_success_pct = passes.pct();
    radar.take_on_success_pct = take_ons.pct();
    radar.aerial_success_pct = aerials.pct();
    radar.tackle_success_pct = tackles.pct();
    radar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(events: Vec<Event>) -> PlayerEvents {
        PlayerEvents::new("A. Test", events)
    }

    fn ev(event_type: EventType) -> Event {
        Event::new("A. Test", "Liverpool", event_type)
    }

    #[test]
    fn test_heatmap_points_drop_unlocated() {
        let events = player(vec![
            ev(EventType::Pass).at(10.0, 20.0),
            ev(EventType::Other("Start".into())),
            ev(EventType::Clearance).at(5.0, 50.0),
        ]);
        assert_eq!(
            heatmap_points(&events),
            vec![Point { x: 10.0, y: 20.0 }, Point { x: 5.0, y: 50.0 }]
        );
    }

    #[test]
    fn test_pass_map_splits_by_outcome() {
        let events = player(vec![
            ev(EventType::Pass)
                .with_outcome(OutcomeType::Successful)
                .at(10.0, 10.0)
                .to(20.0, 20.0),
            ev(EventType::Pass)
                .with_outcome(OutcomeType::Unsuccessful)
                .at(30.0, 30.0),
            ev(EventType::Pass).at(1.0, 1.0),
            ev(EventType::TakeOn)
                .with_outcome(OutcomeType::Successful)
                .at(40.0, 40.0),
        ]);
        let map = pass_map(&events);
        assert_eq!(
            map.successful,
            vec![PassVector { x: 10.0, y: 10.0, end_x: 20.0, end_y: 20.0 }]
        );
        assert_eq!(
            map.unsuccessful,
            vec![PassVector { x: 30.0, y: 30.0, end_x: 30.0, end_y: 30.0 }]
        );
    }

    #[test]
    fn test_shot_points() {
        let events = player(vec![
            ev(EventType::Goal).at(90.0, 50.0),
            ev(EventType::MissedShots).at(80.0, 40.0),
            ev(EventType::SavedShot).at(85.0, 60.0),
            ev(EventType::ShotOnPost).at(88.0, 52.0),
            ev(EventType::Pass).at(50.0, 50.0),
        ]);
        let shots = shot_points(&events).unwrap();
        let kinds: Vec<_> = shots.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [ShotKind::Goal, ShotKind::Missed, ShotKind::Saved]);
    }

    #[test]
    fn test_shot_points_without_shots_is_empty_input() {
        let events = player(vec![ev(EventType::Pass).at(50.0, 50.0)]);
        let err = shot_points(&events).unwrap_err();
        assert!(matches!(err, StatsError::EmptyInput { series: "shot", .. }));
        assert!(shot_points(&player(vec![])).is_err());
    }

    #[test]
    fn test_radar_vector() {
        let ok = OutcomeType::Successful;
        let ko = OutcomeType::Unsuccessful;
        let events = player(vec![
            ev(EventType::Goal),
            ev(EventType::Goal),
            ev(EventType::Pass).with_outcome(ok),
            ev(EventType::Pass).with_outcome(ok),
            ev(EventType::Pass).with_outcome(ko),
            ev(EventType::TakeOn).with_outcome(ko),
            ev(EventType::Dispossessed),
            ev(EventType::Tackle).with_outcome(ok),
            ev(EventType::BallRecovery),
            ev(EventType::Interception),
            ev(EventType::Interception),
            ev(EventType::Clearance),
        ]);
        let radar = radar_vector(&events);
        assert_eq!(
            radar.values(),
            [2.0, 66.67, 0.0, 1.0, 0.0, 100.0, 1.0, 2.0, 1.0]
        );
    }

    #[test]
    fn test_radar_values_are_not_clamped() {
        let events = player((0..25).map(|_| ev(EventType::Goal)).collect());
        assert_eq!(radar_vector(&events).goals, 25.0);
    }
}
