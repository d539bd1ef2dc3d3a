use std::sync::OnceLock;

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;

use crate::domain::catalog::{Catalog, PricingProfile};

/// Embed the default reference data into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static CATALOG: OnceLock<Catalog> = OnceLock::new();
static PRICING_PROFILE: OnceLock<PricingProfile> = OnceLock::new();

/// The built-in reference catalog.
pub fn default_catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| {
        let catalog: Catalog = load_json("catalog.json");
        if let Err(error) = catalog.validate() {
            panic!("Embedded catalog.json violates its invariant: {error}");
        }
        catalog
    })
}

/// The built-in adjustment-table profile.
pub fn default_pricing_profile() -> &'static PricingProfile {
    PRICING_PROFILE.get_or_init(|| load_json("pricing_profile.json"))
}

/// Embedded assets ship with the crate; a malformed one is a programmer
/// error, so this panics with the asset path rather than limping along.
fn load_json<T: DeserializeOwned>(path: &str) -> T {
    let asset = EmbeddedAssets::get(path)
        .unwrap_or_else(|| panic!("Failed to locate embedded asset: {path}"));
    serde_json::from_slice(asset.data.as_ref())
        .unwrap_or_else(|error| panic!("Embedded asset {path} is not valid JSON: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse_and_validate() {
        let catalog = default_catalog();
        assert!(catalog.base_price("Toyota", "Fortuner").is_some());
        assert!(catalog.validate().is_ok());

        let profile = default_pricing_profile();
        assert!(!profile.age_depreciation.is_empty());
        assert!(!profile.mileage_brackets.is_empty());
    }
}
