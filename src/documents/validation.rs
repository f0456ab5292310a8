//! Field-presence checks run on a parsed document before it is saved.
//!
//! Only presence is checked. Value types, ranges and nesting below the
//! item level are whatever the model produced.

use serde_json::Value;
use tracing::warn;

use super::DocumentKind;
use crate::{CinqueTerreError, Result};

/// Check that `document` carries the keys required for `kind`.
///
/// Returns the first problem found as a validation error.
pub fn validate(kind: DocumentKind, document: &Value) -> Result<()> {
    let Some(object) = document.as_object() else {
        return Err(fail("Document is not a JSON object".to_string()));
    };

    for field in kind.required_fields() {
        if !object.contains_key(*field) {
            return Err(fail(format!("Missing required field: {field}")));
        }
    }

    let Some(list) = kind.list_requirement() else {
        return Ok(());
    };

    let Some(items) = object.get(list.key).and_then(Value::as_array) else {
        return Err(fail(format!("'{}' is not a list", list.key)));
    };

    if items.is_empty() {
        return Err(fail(format!("No {} found", list.plural_label)));
    }

    for (index, item) in items.iter().enumerate() {
        for field in list.item_fields {
            if item.get(*field).is_none() {
                return Err(fail(format!(
                    "{} {} missing field: {field}",
                    list.item_label,
                    index + 1
                )));
            }
        }
    }

    Ok(())
}

/// Boolean form of [`validate`]
#[must_use]
pub fn is_valid(kind: DocumentKind, document: &Value) -> bool {
    validate(kind, document).is_ok()
}

fn fail(message: String) -> CinqueTerreError {
    warn!("Validation failed: {}", message);
    CinqueTerreError::validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn event(rank: u32) -> Value {
        json!({
            "rank": rank,
            "name": "Festa di San Giovanni Battista",
            "category": {"primary": "Religious"},
            "schedule": {"event_type": "Annual"},
            "location": {"venue": "Piazza Vignaioli"},
            "details": {}
        })
    }

    #[test]
    fn test_valid_events_document() {
        let doc = json!({"metadata": {}, "events": [event(1), event(2)]});
        assert!(validate(DocumentKind::Events, &doc).is_ok());
        assert!(is_valid(DocumentKind::Events, &doc));
    }

    #[rstest]
    #[case(DocumentKind::Weather, json!({"metadata": {}}), "Missing required field: current_conditions")]
    #[case(DocumentKind::Weather, json!({"current_conditions": {}}), "Missing required field: metadata")]
    #[case(DocumentKind::Transportation, json!({"metadata": {}}), "Missing required field: transportation_options")]
    #[case(DocumentKind::Events, json!({"metadata": {}, "events": {}}), "'events' is not a list")]
    #[case(DocumentKind::Pois, json!({"metadata": {}, "points_of_interest": []}), "No POIs found")]
    #[case(DocumentKind::Events, json!([1, 2, 3]), "Document is not a JSON object")]
    fn test_invalid_documents(
        #[case] kind: DocumentKind,
        #[case] doc: Value,
        #[case] expected: &str,
    ) {
        let err = validate(kind, &doc).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid document: {expected}"));
        assert!(!is_valid(kind, &doc));
    }

    #[test]
    fn test_item_missing_field_is_reported_with_position() {
        let mut broken = event(3);
        broken.as_object_mut().unwrap().remove("schedule");
        let doc = json!({"metadata": {}, "events": [event(1), event(2), broken]});
        let err = validate(DocumentKind::Events, &doc).unwrap_err();
        assert!(err.to_string().contains("Event 3 missing field: schedule"));
    }

    #[test]
    fn test_top_level_value_types_are_not_checked() {
        // presence is enough for the non-list kinds
        let doc = json!({"metadata": null, "current_conditions": "sunny"});
        assert!(validate(DocumentKind::Weather, &doc).is_ok());

        let doc = json!({"metadata": 7, "transportation_options": "see website"});
        assert!(validate(DocumentKind::Transportation, &doc).is_ok());
    }

    #[test]
    fn test_extra_keys_are_allowed() {
        let doc = json!({
            "metadata": {},
            "restaurants": [{"rank": 1, "name": "Trattoria", "ratings": {}, "menu": []}],
            "notes": "extra"
        });
        assert!(validate(DocumentKind::Restaurants, &doc).is_ok());
    }

    #[rstest]
    #[case(json!([]), "No restaurants found")]
    #[case(json!([{"rank": 1, "name": "Dau Cila", "ratings": {}}, {"rank": 2, "name": "Rio Bistrot"}]), "Restaurant 2 missing field: ratings")]
    fn test_restaurant_list_is_checked(#[case] restaurants: Value, #[case] expected: &str) {
        let doc = json!({"metadata": {}, "restaurants": restaurants});
        let err = validate(DocumentKind::Restaurants, &doc).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid document: {expected}"));
    }

    #[test]
    fn test_every_kind_fails_on_empty_object() {
        for kind in DocumentKind::ALL {
            assert!(!is_valid(kind, &json!({})));
        }
    }
}
