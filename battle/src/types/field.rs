//! Global field state

use std::collections::BTreeSet;

use hindsight_protocol::to_id;

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSun,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    /// Parse from protocol string ("SunnyDay", "RainDance", ...)
    pub fn from_protocol(s: &str) -> Option<Self> {
        match to_id(s).as_str() {
            "sunnyday" => Some(Weather::Sun),
            "raindance" => Some(Weather::Rain),
            "sandstorm" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "snow" | "snowscape" => Some(Weather::Snow),
            "desolateland" => Some(Weather::HarshSun),
            "primordialsea" => Some(Weather::HeavyRain),
            "deltastream" => Some(Weather::StrongWinds),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sun",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the "move: " prefix the protocol puts on some effect names
pub(crate) fn effect_id(effect: &str) -> String {
    to_id(effect.strip_prefix("move: ").unwrap_or(effect))
}

/// Global field state affecting all Pokemon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState {
    pub weather: Option<Weather>,

    /// Active field-wide effects (terrains, rooms, gravity) by id
    pub conditions: BTreeSet<String>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a -weather line; upkeep lines only confirm the current weather
    pub fn apply_weather(&mut self, weather: &str, upkeep: bool) {
        if !upkeep {
            self.weather = Weather::from_protocol(weather);
        }
    }

    pub fn apply_field_start(&mut self, condition: &str) {
        let id = effect_id(condition);
        // Only one terrain can be up at a time
        if id.ends_with("terrain") {
            self.conditions.retain(|c| !c.ends_with("terrain"));
        }
        self.conditions.insert(id);
    }

    pub fn apply_field_end(&mut self, condition: &str) {
        self.conditions.remove(&effect_id(condition));
    }

    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions.contains(&effect_id(condition))
    }

    pub fn terrain(&self) -> Option<&str> {
        self.conditions
            .iter()
            .find(|c| c.ends_with("terrain"))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_from_protocol() {
        assert_eq!(Weather::from_protocol("SunnyDay"), Some(Weather::Sun));
        assert_eq!(
            Weather::from_protocol("PrimordialSea"),
            Some(Weather::HeavyRain)
        );
        assert_eq!(Weather::from_protocol("none"), None);
    }

    #[test]
    fn test_apply_weather_ignores_upkeep() {
        let mut field = FieldState::new();
        field.apply_weather("RainDance", false);
        assert_eq!(field.weather, Some(Weather::Rain));

        field.apply_weather("none", true);
        assert_eq!(field.weather, Some(Weather::Rain));

        field.apply_weather("none", false);
        assert!(field.weather.is_none());
    }

    #[test]
    fn test_terrain_replaces_terrain() {
        let mut field = FieldState::new();
        field.apply_field_start("move: Electric Terrain");
        field.apply_field_start("Trick Room");
        field.apply_field_start("move: Grassy Terrain");

        assert_eq!(field.terrain(), Some("grassyterrain"));
        assert!(field.has_condition("move: Trick Room"));
        assert!(!field.has_condition("Electric Terrain"));
    }

    #[test]
    fn test_apply_field_end() {
        let mut field = FieldState::new();
        field.apply_field_start("Gravity");
        field.apply_field_end("move: Gravity");
        assert!(field.conditions.is_empty());
    }
}
