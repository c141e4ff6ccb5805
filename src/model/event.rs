use serde::Serialize;
use strum_macros::{EnumIter, EnumString};

/// Action tag of a logged event.
///
/// Tags outside the known vocabulary are kept verbatim in [`EventType::Other`]
/// so they survive a round trip through an artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, EnumString)]
pub enum EventType {
    Pass,
    Goal,
    MissedShots,
    SavedShot,
    ShotOnPost,
    Tackle,
    Interception,
    Clearance,
    BallRecovery,
    TakeOn,
    Aerial,
    Dispossessed,
    #[strum(default)]
    Other(String),
}

impl EventType {
    /// Parse a raw tag. Never fails: unknown tags become [`EventType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        tag.parse()
            .unwrap_or_else(|_| EventType::Other(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Pass => "Pass",
            EventType::Goal => "Goal",
            EventType::MissedShots => "MissedShots",
            EventType::SavedShot => "SavedShot",
            EventType::ShotOnPost => "ShotOnPost",
            EventType::Tackle => "Tackle",
            EventType::Interception => "Interception",
            EventType::Clearance => "Clearance",
            EventType::BallRecovery => "BallRecovery",
            EventType::TakeOn => "TakeOn",
            EventType::Aerial => "Aerial",
            EventType::Dispossessed => "Dispossessed",
            EventType::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an outcome-bearing event (passes, take-ons, aerials, tackles).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumString,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
pub enum OutcomeType {
    Successful,
    Unsuccessful,
}

impl OutcomeType {
    /// Parse a raw outcome cell; blanks and unknown values mean "no outcome".
    pub fn from_cell(cell: &str) -> Option<Self> {
        cell.trim().parse().ok()
    }
}

/// One logged on-pitch action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub player: String,
    pub team: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub outcome_type: Option<OutcomeType>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub second: Option<f64>,
    pub qualifiers: Option<String>,
}

impl Event {
    pub fn new(player: impl Into<String>, team: impl Into<String>, event_type: EventType) -> Self {
        Self {
            player: player.into(),
            team: team.into(),
            event_type,
            outcome_type: None,
            x: None,
            y: None,
            end_x: None,
            end_y: None,
            second: None,
            qualifiers: None,
        }
    }

    pub fn with_outcome(mut self, outcome: OutcomeType) -> Self {
        self.outcome_type = Some(outcome);
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn to(mut self, end_x: f64, end_y: f64) -> Self {
        self.end_x = Some(end_x);
        self.end_y = Some(end_y);
        self
    }

    pub fn with_qualifiers(mut self, qualifiers: impl Into<String>) -> Self {
        self.qualifiers = Some(qualifiers.into());
        self
    }

    pub fn with_second(mut self, second: f64) -> Self {
        self.second = Some(second);
        self
    }

    pub fn is_successful(&self) -> bool {
        self.outcome_type == Some(OutcomeType::Successful)
    }

    /// Start coordinates, when both are present.
    pub fn location(&self) -> Option<(f64, f64)> {
        self.x.zip(self.y)
    }
}

/// Semantic class an event can belong to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, strum_macros::Display,
)]
pub enum ActionClass {
    Defensive,
    Offensive,
    Pass,
    KeyPass,
    Shot,
    Goal,
    TakeOn,
    Aerial,
    Tackle,
}

impl ActionClass {
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// The set of classes a single event belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Classification(u16);

impl Classification {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, class: ActionClass) {
        self.0 |= class.bit();
    }

    pub fn contains(&self, class: ActionClass) -> bool {
        self.0 & class.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member classes in declaration order.
    pub fn classes(&self) -> Vec<ActionClass> {
        use strum::IntoEnumIterator;
        ActionClass::iter().filter(|c| self.contains(*c)).collect()
    }
}

impl FromIterator<ActionClass> for Classification {
    fn from_iter<I: IntoIterator<Item = ActionClass>>(iter: I) -> Self {
        let mut set = Classification::empty();
        for class in iter {
            set.insert(class);
        }
        set
    }
}
