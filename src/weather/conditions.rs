//! Weather condition labels, icon codes and emoji

/// Condition label for an Azure Maps icon code
#[must_use]
pub fn condition_from_icon(icon_code: u8) -> &'static str {
    match icon_code {
        1 => "Clear",
        2 | 3 => "Partly Cloudy",
        4 | 7 => "Cloudy",
        5 => "Haze",
        6 => "Mostly Cloudy",
        8 => "Overcast",
        11 => "Fog",
        12 | 18 => "Rain",
        13 => "Light Rain",
        14 => "Heavy Rain",
        15..=17 => "Thunderstorm",
        19 | 22 => "Snow",
        20 => "Light Snow",
        21 => "Heavy Snow",
        23 => "Mixed",
        24 | 26 => "Freezing Rain",
        25 => "Sleet",
        _ => "Unknown",
    }
}

/// Representative icon code for a condition label, `1` (clear) when unknown
#[must_use]
pub fn icon_from_condition(condition: &str) -> u8 {
    match condition {
        "Clear" => 1,
        "Partly Cloudy" => 3,
        "Cloudy" => 7,
        "Rain" => 12,
        "Thunderstorm" => 15,
        "Snow" => 19,
        "Haze" => 5,
        "Fog" => 11,
        _ => 1,
    }
}

#[must_use]
pub fn weather_emoji(condition: &str) -> &'static str {
    match condition {
        "Clear" => "☀️",
        "Partly Cloudy" => "⛅",
        "Cloudy" | "Overcast" => "☁️",
        "Rain" | "Heavy Rain" => "🌧️",
        "Light Rain" => "🌦️",
        "Thunderstorm" => "⛈️",
        "Snow" | "Heavy Snow" => "❄️",
        "Light Snow" => "🌨️",
        "Haze" | "Fog" => "🌫️",
        _ => "🌤️",
    }
}

/// Convert km/h to m/s
#[must_use]
pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh * 0.277_778
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mapping() {
        assert_eq!(condition_from_icon(1), "Clear");
        assert_eq!(condition_from_icon(3), "Partly Cloudy");
        assert_eq!(condition_from_icon(16), "Thunderstorm");
        assert_eq!(condition_from_icon(26), "Freezing Rain");
        assert_eq!(condition_from_icon(9), "Unknown");
        assert_eq!(condition_from_icon(200), "Unknown");
    }

    #[test]
    fn test_condition_round_trip() {
        for condition in ["Clear", "Partly Cloudy", "Cloudy", "Rain", "Thunderstorm", "Snow", "Haze", "Fog"] {
            assert_eq!(condition_from_icon(icon_from_condition(condition)), condition);
        }
        assert_eq!(icon_from_condition("Volcanic Ash"), 1);
    }

    #[test]
    fn test_weather_emoji_default() {
        assert_eq!(weather_emoji("Clear"), "☀️");
        assert_eq!(weather_emoji("Mixed"), "🌤️");
    }

    #[test]
    fn test_kmh_to_ms() {
        assert_eq!(kmh_to_ms(36.0).round(), 10.0);
        assert_eq!(kmh_to_ms(0.0), 0.0);
    }
}
