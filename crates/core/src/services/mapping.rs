//! Frontend identifiers to the integer codes of the user tables.
//!
//! Every function is total: unrecognized input maps to a fallback code
//! instead of failing.

/// Code stored for locations and body parts without a mapping.
pub const UNKNOWN_CODE: i32 = 99;

/// Frequency code for repeated incidents; also the fallback.
pub const MULTIPLE_OCCURRENCES_CODE: i32 = 3;

const LOCATION_CODES: &[(&str, i32)] = &[
    ("playground", 1),
    ("classroom", 2),
    ("library", 3),
    ("gymnasium", 4),
    ("gym", 4),
    ("cafeteria", 5),
    ("canteen", 5),
    ("bus", 6),
];

const FREQUENCY_CODES: &[(&str, i32)] = &[
    ("once", 1),
    ("sometimes", 2),
    ("often", MULTIPLE_OCCURRENCES_CODE),
    ("always", MULTIPLE_OCCURRENCES_CODE),
];

const SAFETY_FEELING_CODES: &[(&str, i32)] = &[
    ("very_safe", 1),
    ("safe", 2),
    ("neutral", 3),
    ("unsafe", 4),
    ("very_unsafe", 5),
];

const BODY_PART_CODES: &[(&str, i32)] = &[
    ("head", 1),
    ("face", 2),
    ("chest", 18),
    ("arm", 27),
    ("hand", 30),
    ("abdomen", 40),
    ("back", 41),
    ("legs", 48),
    ("feet", 52),
];

fn lookup(table: &[(&str, i32)], key: &str) -> Option<i32> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(_, code)| code)
}

/// Location id to location code.
#[must_use]
pub fn map_location(location_id: &str) -> i32 {
    lookup(LOCATION_CODES, location_id).unwrap_or(UNKNOWN_CODE)
}

/// Emotion level to emotion code. Levels 1-5 are stored as-is.
#[must_use]
pub const fn map_emotion(level: i32) -> i32 {
    level
}

/// Frequency value to frequency index code.
#[must_use]
pub fn map_frequency(value: &str) -> i32 {
    lookup(FREQUENCY_CODES, value).unwrap_or(MULTIPLE_OCCURRENCES_CODE)
}

/// Safety feeling to safety thermometer code, falling back to the raw level.
#[must_use]
pub fn map_safety_feeling(feeling: &str, level: i32) -> i32 {
    lookup(SAFETY_FEELING_CODES, feeling).unwrap_or(level)
}

/// Body part name to body part code, ignoring case.
#[must_use]
pub fn map_body_part(body_part: &str) -> i32 {
    lookup(BODY_PART_CODES, &body_part.to_lowercase()).unwrap_or(UNKNOWN_CODE)
}
