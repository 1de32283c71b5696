//! Keyword lists matched against lowercase emoji names.

/// Name fragments that mark an unknown emoji as mildly positive.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "smile",
    "happy",
    "love",
    "heart",
    "joy",
    "laugh",
    "good",
    "great",
    "excellent",
    "celebration",
    "party",
    "star",
    "thumbs",
    "ok",
    "victory",
    "kiss",
    "hug",
    "wink",
    "grinning",
    "clap",
    "fireworks",
    "trophy",
];

/// Name fragments that mark an unknown emoji as mildly negative.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad",
    "cry",
    "angry",
    "mad",
    "hate",
    "disappointed",
    "confused",
    "worried",
    "fear",
    "scared",
    "tired",
    "weary",
    "broken",
    "skull",
    "poop",
    "bomb",
    "gun",
    "pistol",
    "frown",
    "unamused",
];

/// Name fragments that force a resolved score to the strong-negative floor.
pub const STRONG_NEGATIVE_KEYWORDS: &[&str] = &[
    "sad",
    "sadness",
    "cry",
    "crying",
    "sob",
    "sobbing",
    "tear",
    "tears",
    "disappointed",
    "unhappy",
    "broken",
    "weep",
    "weeping",
    "angry",
    "mad",
    "frown",
];

/// Score returned by the keyword fallback for a positive name.
pub const FALLBACK_POSITIVE: f32 = 0.3;
/// Score returned by the keyword fallback for a negative name.
pub const FALLBACK_NEGATIVE: f32 = -0.3;
/// Score forced by the strong-negative safety net.
pub const STRONG_NEGATIVE_FLOOR: f32 = -0.5;

pub(crate) fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| name.contains(k))
}
