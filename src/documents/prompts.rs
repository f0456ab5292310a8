//! Search prompts sent to the model, one per document kind.
//!
//! The templates live in `prompts/` at the crate root and are embedded at
//! compile time. `{{location}}` is the only interpolation point.

use super::DocumentKind;

const LOCATION_PLACEHOLDER: &str = "{{location}}";

const ACCOMMODATIONS: &str = include_str!("../../prompts/accommodations.txt");
const EVENTS: &str = include_str!("../../prompts/events.txt");
const POIS: &str = include_str!("../../prompts/pois.txt");
const RESTAURANTS: &str = include_str!("../../prompts/restaurants.txt");
const TRANSPORTATION: &str = include_str!("../../prompts/transportation.txt");
const WEATHER: &str = include_str!("../../prompts/weather.txt");

/// Raw template text for a kind
#[must_use]
pub fn template(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Accommodations => ACCOMMODATIONS,
        DocumentKind::Events => EVENTS,
        DocumentKind::Pois => POIS,
        DocumentKind::Restaurants => RESTAURANTS,
        DocumentKind::Transportation => TRANSPORTATION,
        DocumentKind::Weather => WEATHER,
    }
}

/// Fill the template for `kind` with the target location
#[must_use]
pub fn render_prompt(kind: DocumentKind, location: &str) -> String {
    template(kind).replace(LOCATION_PLACEHOLDER, location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_a_location_slot() {
        for kind in DocumentKind::ALL {
            assert!(
                template(kind).contains(LOCATION_PLACEHOLDER),
                "{kind} template has no location placeholder"
            );
        }
    }

    #[test]
    fn test_render_replaces_all_placeholders() {
        let prompt = render_prompt(DocumentKind::Weather, "Manarola, Cinque Terre, Italy");
        assert!(!prompt.contains(LOCATION_PLACEHOLDER));
        assert!(prompt.contains("\"query_location\": \"Manarola, Cinque Terre, Italy\""));
    }

    #[test]
    fn test_templates_ask_for_the_validated_keys() {
        for kind in DocumentKind::ALL {
            let prompt = template(kind);
            for field in kind.required_fields() {
                assert!(
                    prompt.contains(&format!("\"{field}\"")),
                    "{kind} prompt never mentions required field {field}"
                );
            }
        }
    }
}
