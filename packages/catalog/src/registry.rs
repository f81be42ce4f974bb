//! Compile-time registry of catalog event records.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding an event requires creating a TOML file in `events/` and adding a
//! corresponding entry here.

/// Number of registered events. Enforced by a test.
#[cfg(test)]
const EXPECTED_EVENT_COUNT: usize = 5;

/// Embedded TOML event records, in catalog order.
pub const EVENT_TOMLS: &[(&str, &str)] = &[
    (
        "inundacion_severa",
        include_str!("../events/inundacion_severa.toml"),
    ),
    (
        "deslizamiento_de_tierra",
        include_str!("../events/deslizamiento_de_tierra.toml"),
    ),
    (
        "colapso_estructural",
        include_str!("../events/colapso_estructural.toml"),
    ),
    (
        "inundacion_urbana",
        include_str!("../events/inundacion_urbana.toml"),
    ),
    (
        "erosion_costera",
        include_str!("../events/erosion_costera.toml"),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_event_toml;
    use std::collections::BTreeSet;

    #[test]
    fn registers_expected_event_count() {
        assert_eq!(
            EVENT_TOMLS.len(),
            EXPECTED_EVENT_COUNT,
            "Expected {EXPECTED_EVENT_COUNT} events, found {}. \
             Update EXPECTED_EVENT_COUNT after adding/removing events.",
            EVENT_TOMLS.len()
        );
    }

    #[test]
    fn all_records_parse_with_required_fields() {
        let mut seen = BTreeSet::new();
        for (name, text) in EVENT_TOMLS {
            let event = parse_event_toml(name, text)
                .unwrap_or_else(|e| panic!("Failed to parse event '{name}': {e}"));
            assert!(seen.insert(event.id), "Duplicate event id: {}", event.id);
            assert!(!event.name.is_empty(), "Event {name} has empty name");
            assert!(
                !event.description.is_empty(),
                "Event {name} has empty description"
            );
            assert!(
                event.image_url.starts_with("https://"),
                "Event {name} has non-https image url"
            );
            assert!(
                event.risk.is_recognized(),
                "Event {name} has unknown risk level"
            );
            assert!(
                event.category.is_recognized(),
                "Event {name} has unknown category"
            );
            assert!(
                event.coordinates.is_valid(),
                "Event {name} has invalid coordinates"
            );
        }
    }
}
