use anyhow::Result;
use nearby_core::{Coordinates, PreferencesRepository, WeatherInformationRepository};
use serde_json::json;

use super::Stores;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSelection {
    Both,
    Nearby,
    Bookmarked,
}

impl WeatherSelection {
    pub fn from_flags(nearby: bool, bookmarked: bool) -> Self {
        match (nearby, bookmarked) {
            (true, false) => WeatherSelection::Nearby,
            (false, true) => WeatherSelection::Bookmarked,
            _ => WeatherSelection::Both,
        }
    }
}

pub async fn show(
    stores: &Stores,
    selection: WeatherSelection,
    reference: Option<(f64, f64)>,
) -> Result<()> {
    let weather = &stores.weather;
    let preferences = stores.preferences.get_preferences().await?;

    let reference = reference.map(|(latitude, longitude)| Coordinates::new(latitude, longitude));

    let output = match selection {
        WeatherSelection::Bookmarked => json!(weather.get_bookmarked_weather().await?),
        WeatherSelection::Nearby => {
            let nearby = weather.get_nearby_weather().await?;
            json!(preferences.apply_to_nearby(nearby, reference))
        }
        WeatherSelection::Both => {
            let nearby = weather.get_nearby_weather().await?;
            json!({
                "bookmarked": weather.get_bookmarked_weather().await?,
                "nearby": preferences.apply_to_nearby(nearby, reference),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
