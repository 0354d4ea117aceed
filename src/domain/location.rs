// Location domain model
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A location as listed by the backend. Only `id` is required; everything
/// else is checked when deciding whether the location can be placed on a map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "profileName")]
    pub profile_name: Option<String>,
    #[serde(default, rename = "latestCoords")]
    pub latest_coords: Value,
}

/// A location with a display name and a usable `[lat, lon]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceableLocation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// The location whose telemetry is currently on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLocation {
    pub id: String,
    pub display_name: String,
}

impl Location {
    pub fn display_name(&self) -> String {
        [&self.name, &self.profile_name]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Self::format_name(&self.id))
    }

    /// `None` unless `latestCoords` is exactly two numbers.
    pub fn placeable(&self) -> Option<PlaceableLocation> {
        let coords = self.latest_coords.as_array()?;
        let [lat, lon] = coords.as_slice() else {
            return None;
        };
        Some(PlaceableLocation {
            id: self.id.clone(),
            name: self.display_name(),
            lat: lat.as_f64()?,
            lon: lon.as_f64()?,
        })
    }

    fn format_name(id: &str) -> String {
        // Convert "Green_House_" to "Green House"
        id.trim_end_matches('_').replace('_', " ")
    }
}

impl SelectedLocation {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "location id must be a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(value: Value) -> Location {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_display_name_precedence() {
        let named = location(json!({"id": "a", "name": "Roof", "profileName": "Profile"}));
        assert_eq!(named.display_name(), "Roof");

        let profile = location(json!({"id": "a", "name": " ", "profileName": "Profile"}));
        assert_eq!(profile.display_name(), "Profile");

        let bare = location(json!({"id": "Green_House_"}));
        assert_eq!(bare.display_name(), "Green House");
    }

    #[test]
    fn test_numeric_id() {
        assert_eq!(location(json!({"id": 42})).id, "42");
        assert!(serde_json::from_value::<Location>(json!({"id": null})).is_err());
    }

    #[test]
    fn test_placeable_requires_two_coordinates() {
        let placed = location(json!({"id": 1, "name": "Lab", "latestCoords": [52.5, 13.4]}))
            .placeable()
            .unwrap();
        assert_eq!(placed.name, "Lab");
        assert_eq!((placed.lat, placed.lon), (52.5, 13.4));

        for coords in [
            json!(null),
            json!([]),
            json!([52.5]),
            json!([52.5, 13.4, 7.0]),
            json!([52.5, "east"]),
            json!({"lat": 52.5, "lon": 13.4}),
        ] {
            let candidate = location(json!({"id": 1, "latestCoords": coords}));
            assert!(candidate.placeable().is_none(), "{:?}", candidate.latest_coords);
        }
        assert!(location(json!({"id": 1})).placeable().is_none());
    }
}
