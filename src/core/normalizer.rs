use crate::domain::model::{Place, PlaceIndex, PlaceRecord};

/// Administrative suffixes the census appends to place names.
pub const STOP_WORDS: [&str; 4] = ["city", "town", "cdp", "village"];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.iter().any(|w| token.eq_ignore_ascii_case(w))
}

/// Drops stop-word tokens and rejoins the rest with single spaces.
///
/// A place literally named "Village" loses that token too. A name made only
/// of stop-words normalizes to the empty string.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|token| !is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Portion of a full census name before the first comma.
pub fn display_name(full_name: &str) -> &str {
    full_name.split(',').next().unwrap_or_default().trim()
}

pub fn to_place(record: PlaceRecord) -> Place {
    Place {
        normalized_name: normalize_name(display_name(&record.full_name)),
        full_name: record.full_name,
        place_id: record.place_id,
    }
}

pub fn index_places(records: impl IntoIterator<Item = PlaceRecord>) -> PlaceIndex {
    let mut index = PlaceIndex::new();

    for record in records {
        let place = to_place(record);
        if place.normalized_name.is_empty() {
            tracing::debug!("Place '{}' normalizes to an empty name", place.full_name);
        }
        let full_name = place.full_name.clone();
        if let Some(displaced) = index.insert(place) {
            tracing::debug!(
                "Place '{}' replaces '{}' under key '{}'",
                full_name,
                displaced.full_name,
                displaced.normalized_name
            );
        }
    }

    index
}
