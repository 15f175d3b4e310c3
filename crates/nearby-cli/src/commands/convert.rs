use clap::ValueEnum;
use nearby_core::units::{
    convert_temperature, convert_wind_speed, temperature_descriptor, wind_speed_descriptor,
};
use nearby_core::{DistanceVelocityUnit, TemperatureUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemperatureUnitArg {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl From<TemperatureUnitArg> for TemperatureUnit {
    fn from(arg: TemperatureUnitArg) -> Self {
        match arg {
            TemperatureUnitArg::Celsius => TemperatureUnit::Celsius,
            TemperatureUnitArg::Fahrenheit => TemperatureUnit::Fahrenheit,
            TemperatureUnitArg::Kelvin => TemperatureUnit::Kelvin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedUnitArg {
    Kilometres,
    Miles,
}

impl From<SpeedUnitArg> for DistanceVelocityUnit {
    fn from(arg: SpeedUnitArg) -> Self {
        match arg {
            SpeedUnitArg::Kilometres => DistanceVelocityUnit::Kilometres,
            SpeedUnitArg::Miles => DistanceVelocityUnit::Miles,
        }
    }
}

pub fn temperature(kelvin: f64, unit: TemperatureUnit) {
    let value = convert_temperature(unit, kelvin);
    let descriptor = temperature_descriptor(unit, Some(kelvin)).unwrap_or_default();
    println!("{descriptor} ({value})");
}

pub fn wind(mps: f64, unit: DistanceVelocityUnit) {
    let value = convert_wind_speed(unit, mps);
    let descriptor = wind_speed_descriptor(unit, Some(mps)).unwrap_or_default();
    println!("{descriptor} ({value})");
}
