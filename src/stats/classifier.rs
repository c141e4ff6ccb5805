use crate::matching::has_key_pass_tag;
use crate::model::{ActionClass, Classification, Event, EventType};

pub fn is_defensive(event_type: &EventType) -> bool {
    matches!(
        event_type,
        EventType::Clearance | EventType::Tackle | EventType::BallRecovery | EventType::Interception
    )
}

pub fn is_offensive(event_type: &EventType) -> bool {
    matches!(
        event_type,
        EventType::Pass
            | EventType::Goal
            | EventType::MissedShots
            | EventType::SavedShot
            | EventType::ShotOnPost
    )
}

pub fn is_shot(event_type: &EventType) -> bool {
    matches!(
        event_type,
        EventType::MissedShots | EventType::SavedShot | EventType::ShotOnPost | EventType::Goal
    )
}

/// A pass whose qualifiers carry a key-pass or assist tag.
pub fn is_key_pass(event: &Event) -> bool {
    event.event_type == EventType::Pass
        && event.qualifiers.as_deref().is_some_and(has_key_pass_tag)
}

/// Semantic classes of one event. Unknown types belong to no class.
pub fn classify(event: &Event) -> Classification {
    let mut classes = Classification::empty();
    let event_type = &event.event_type;

    if is_defensive(event_type) {
        classes.insert(ActionClass::Defensive);
    }
    if is_offensive(event_type) {
        classes.insert(ActionClass::Offensive);
    }
    if is_shot(event_type) {
        classes.insert(ActionClass::Shot);
    }
    match event_type {
        EventType::Pass => {
            classes.insert(ActionClass::Pass);
            if is_key_pass(event) {
                classes.insert(ActionClass::KeyPass);
            }
        }
        EventType::Goal => classes.insert(ActionClass::Goal),
        EventType::TakeOn => classes.insert(ActionClass::TakeOn),
        EventType::Aerial => classes.insert(ActionClass::Aerial),
        EventType::Tackle => classes.insert(ActionClass::Tackle),
        _ => {}
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: EventType) -> Event {
        Event::new("A. Test", "Liverpool", event_type)
    }

    #[test]
    fn test_defensive_membership() {
        for t in [
            EventType::Clearance,
            EventType::Tackle,
            EventType::BallRecovery,
            EventType::Interception,
        ] {
            assert!(classify(&event(t)).contains(ActionClass::Defensive));
        }
        assert!(!classify(&event(EventType::Aerial)).contains(ActionClass::Defensive));
    }

    #[test]
    fn test_offensive_membership() {
        for t in [
            EventType::Pass,
            EventType::Goal,
            EventType::MissedShots,
            EventType::SavedShot,
            EventType::ShotOnPost,
        ] {
            assert!(classify(&event(t)).contains(ActionClass::Offensive));
        }
        assert!(!classify(&event(EventType::TakeOn)).contains(ActionClass::Offensive));
    }

    #[test]
    fn test_key_pass_tags() {
        let plain = event(EventType::Pass).with_qualifiers("Zone|Length");
        assert!(!classify(&plain).contains(ActionClass::KeyPass));

        for tag in crate::matching::KEY_PASS_TAGS {
            let pass = event(EventType::Pass).with_qualifiers(format!("Zone|{tag}"));
            let classes = classify(&pass);
            assert!(classes.contains(ActionClass::Pass));
            assert!(classes.contains(ActionClass::KeyPass), "{tag}");
        }

        let tagged_shot = event(EventType::SavedShot).with_qualifiers("KeyPass");
        assert!(!classify(&tagged_shot).contains(ActionClass::KeyPass));
    }

    #[test]
    fn test_unknown_type_has_no_class() {
        let start = event(EventType::Other("Start".to_string()));
        assert!(classify(&start).is_empty());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let pass = event(EventType::Pass).with_qualifiers("ShotAssist");
        assert_eq!(classify(&pass), classify(&pass));
        let goal = event(EventType::Goal);
        assert_eq!(
            classify(&goal).classes(),
            vec![ActionClass::Offensive, ActionClass::Shot, ActionClass::Goal]
        );
    }
}
