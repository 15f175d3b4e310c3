use anyhow::Result;
use nearby_core::PreferencesRepository;

use super::Stores;

pub async fn show(stores: &Stores) -> Result<()> {
    let preferences = stores.preferences.get_preferences().await?;

    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}
