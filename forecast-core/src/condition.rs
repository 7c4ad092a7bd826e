use serde::{Deserialize, Serialize};

/// Coarse weather category derived from a provider's free-text condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Storm,
    Snow,
    Fog,
    Other,
}

/// Ordered substring rules; the first match wins.
const RULES: &[(&[&str], ConditionCategory)] = &[
    (&["clear"], ConditionCategory::Clear),
    (&["cloud"], ConditionCategory::Clouds),
    (&["rain"], ConditionCategory::Rain),
    (&["storm", "thunder"], ConditionCategory::Storm),
    (&["snow"], ConditionCategory::Snow),
    (&["fog", "mist"], ConditionCategory::Fog),
];

impl ConditionCategory {
    /// Classify a condition such as `"light rain"` or `"Overcast Clouds"`.
    ///
    /// Matching is case-insensitive, so `"Thunderstorm with rain"` is `Rain`.
    pub fn classify(condition: &str) -> Self {
        let lower = condition.to_lowercase();

        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
            .map(|(_, category)| *category)
            .unwrap_or(ConditionCategory::Other)
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "☀️",
            ConditionCategory::Clouds => "☁️",
            ConditionCategory::Rain => "🌧️",
            ConditionCategory::Storm => "⛈️",
            ConditionCategory::Snow => "❄️",
            ConditionCategory::Fog => "🌫️",
            ConditionCategory::Other => "🌤️",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "clear",
            ConditionCategory::Clouds => "clouds",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Storm => "storm",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Fog => "fog",
            ConditionCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
