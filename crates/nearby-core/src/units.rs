//! Conversion of raw provider units into user-facing descriptors.
//!
//! The provider reports temperatures in Kelvin, speeds in metres per second
//! and distances in metres. Every descriptor takes an optional raw value and
//! returns `None` when the value is absent.

use crate::preferences::{DistanceVelocityUnit, TemperatureUnit};

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_KMH: f64 = 3.6;
const MPS_TO_MPH: f64 = 2.23694;
const METRES_PER_KILOMETRE: f64 = 1000.0;
const METRES_PER_MILE: f64 = 1609.344;

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn convert_temperature(unit: TemperatureUnit, kelvin: f64) -> f64 {
    match unit {
        TemperatureUnit::Celsius => kelvin - KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => kelvin,
    }
}

pub fn convert_wind_speed(unit: DistanceVelocityUnit, mps: f64) -> f64 {
    match unit {
        DistanceVelocityUnit::Kilometres => mps * MPS_TO_KMH,
        DistanceVelocityUnit::Miles => mps * MPS_TO_MPH,
    }
}

pub fn convert_distance(unit: DistanceVelocityUnit, metres: f64) -> f64 {
    match unit {
        DistanceVelocityUnit::Kilometres => metres / METRES_PER_KILOMETRE,
        DistanceVelocityUnit::Miles => metres / METRES_PER_MILE,
    }
}

/// `"12.3°C"`, `"54.1°F"` or `"285.4 K"`.
pub fn temperature_descriptor(unit: TemperatureUnit, kelvin: Option<f64>) -> Option<String> {
    let value = convert_temperature(unit, kelvin?);
    Some(match unit {
        TemperatureUnit::Celsius => format!("{:.1}°C", value),
        TemperatureUnit::Fahrenheit => format!("{:.1}°F", value),
        TemperatureUnit::Kelvin => format!("{:.1} K", value),
    })
}

/// `"12.3 km/h"` or `"7.6 mph"`.
pub fn wind_speed_descriptor(unit: DistanceVelocityUnit, mps: Option<f64>) -> Option<String> {
    let value = convert_wind_speed(unit, mps?);
    Some(match unit {
        DistanceVelocityUnit::Kilometres => format!("{:.1} km/h", value),
        DistanceVelocityUnit::Miles => format!("{:.1} mph", value),
    })
}

/// `"1.2 km"` or `"0.7 mi"`.
pub fn distance_descriptor(unit: DistanceVelocityUnit, metres: Option<f64>) -> Option<String> {
    let value = convert_distance(unit, metres?);
    Some(match unit {
        DistanceVelocityUnit::Kilometres => format!("{:.1} km", value),
        DistanceVelocityUnit::Miles => format!("{:.1} mi", value),
    })
}

/// 16-point compass name for a meteorological wind direction.
pub fn wind_direction_descriptor(degrees: Option<f64>) -> Option<String> {
    let normalized = degrees?.rem_euclid(360.0);
    let index = ((normalized / 22.5).round() as usize) % COMPASS_POINTS.len();
    Some(COMPASS_POINTS[index].to_string())
}

pub fn cloud_coverage_descriptor(percent: Option<f64>) -> Option<String> {
    percent.map(|p| format!("{:.0}%", p))
}

pub fn humidity_descriptor(percent: Option<f64>) -> Option<String> {
    percent.map(|p| format!("{:.0}%", p))
}

pub fn pressure_descriptor(hpa: Option<f64>) -> Option<String> {
    hpa.map(|p| format!("{:.0} hPa", p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_temperature_formulas() {
        assert!(approx(convert_temperature(TemperatureUnit::Celsius, 273.15), 0.0));
        assert!(approx(convert_temperature(TemperatureUnit::Fahrenheit, 273.15), 32.0));
        assert!(approx(convert_temperature(TemperatureUnit::Fahrenheit, 373.15), 212.0));
        assert!(approx(convert_temperature(TemperatureUnit::Kelvin, 300.0), 300.0));
    }

    #[test]
    fn test_temperature_descriptor() {
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Celsius, Some(285.45)).as_deref(),
            Some("12.3°C")
        );
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Fahrenheit, Some(273.15)).as_deref(),
            Some("32.0°F")
        );
        assert_eq!(
            temperature_descriptor(TemperatureUnit::Kelvin, Some(285.4)).as_deref(),
            Some("285.4 K")
        );
        assert_eq!(temperature_descriptor(TemperatureUnit::Celsius, None), None);
    }

    #[test]
    fn test_wind_speed() {
        assert!(approx(convert_wind_speed(DistanceVelocityUnit::Kilometres, 10.0), 36.0));
        assert!(approx(convert_wind_speed(DistanceVelocityUnit::Miles, 10.0), 22.3694));
        assert_eq!(
            wind_speed_descriptor(DistanceVelocityUnit::Kilometres, Some(5.0)).as_deref(),
            Some("18.0 km/h")
        );
        assert_eq!(
            wind_speed_descriptor(DistanceVelocityUnit::Miles, Some(5.0)).as_deref(),
            Some("11.2 mph")
        );
        assert_eq!(wind_speed_descriptor(DistanceVelocityUnit::Miles, None), None);
    }

    #[test]
    fn test_distance_descriptor() {
        assert_eq!(
            distance_descriptor(DistanceVelocityUnit::Kilometres, Some(1240.0)).as_deref(),
            Some("1.2 km")
        );
        assert_eq!(
            distance_descriptor(DistanceVelocityUnit::Miles, Some(1609.344)).as_deref(),
            Some("1.0 mi")
        );
        assert_eq!(distance_descriptor(DistanceVelocityUnit::Kilometres, None), None);
    }

    #[test]
    fn test_wind_direction_descriptor() {
        assert_eq!(wind_direction_descriptor(Some(0.0)).as_deref(), Some("N"));
        assert_eq!(wind_direction_descriptor(Some(45.0)).as_deref(), Some("NE"));
        assert_eq!(wind_direction_descriptor(Some(200.0)).as_deref(), Some("SSW"));
        assert_eq!(wind_direction_descriptor(Some(355.0)).as_deref(), Some("N"));
        assert_eq!(wind_direction_descriptor(Some(-90.0)).as_deref(), Some("W"));
        assert_eq!(wind_direction_descriptor(None), None);
    }

    #[test]
    fn test_percent_and_pressure() {
        assert_eq!(cloud_coverage_descriptor(Some(75.0)).as_deref(), Some("75%"));
        assert_eq!(humidity_descriptor(Some(81.4)).as_deref(), Some("81%"));
        assert_eq!(pressure_descriptor(Some(1013.0)).as_deref(), Some("1013 hPa"));
        assert_eq!(pressure_descriptor(None), None);
    }
}
