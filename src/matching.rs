//! Name and tag matching rules.
//!
//! Upstream data names players and pass qualifiers in free text, so matching
//! is deliberately loose: case-insensitive containment for players and
//! case-sensitive containment for qualifier tags. Everything that compares
//! names or tags goes through here.

/// Qualifier tags that mark a pass as a key or assist-type pass.
pub const KEY_PASS_TAGS: [&str; 5] = [
    "IntentionalAssist",
    "IntentionalGoalAssist",
    "KeyPass",
    "ShotAssist",
    "BigChanceCreated",
];

/// Whether `player` matches the requested `name`.
pub fn player_matches(player: &str, name: &str) -> bool {
    player.to_lowercase().contains(&player_key(name))
}

/// Form of a requested name that [`player_matches`] compares against.
///
/// Two requests select the same players exactly when their keys are equal.
pub fn player_key(name: &str) -> String {
    name.to_lowercase()
}

/// Whether the raw qualifier text carries any key-pass tag.
pub fn has_key_pass_tag(qualifiers: &str) -> bool {
    KEY_PASS_TAGS.iter().any(|tag| qualifiers.contains(tag))
}

/// File-name form of a player name: lowercase, spaces replaced by underscores.
pub fn sanitize_player_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
