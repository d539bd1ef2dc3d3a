//! Static reference data for the valuation engine: the brand/model catalog
//! and the adjustment-factor profile. Both are plain data loaded from JSON
//! (embedded defaults in `util::assets`, user overrides in
//! `util::persistence`) and never mutated at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vehicle::{Condition, FuelType, InsuranceStatus, OwnerTier, Transmission};

/// Multiplier applied when a factor table has no entry for a value.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Models and base new-vehicle prices for one brand.
///
/// The two vectors are index-aligned: `base_prices[i]` belongs to
/// `models[i]`. Price lookup is by position of the model name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub models: Vec<String>,
    pub base_prices: Vec<i64>,
}

/// Brand → models/prices reference table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub brands: HashMap<String, BrandEntry>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("brand {brand:?} has {models} models but {prices} base prices")]
    MisalignedBrand {
        brand: String,
        models: usize,
        prices: usize,
    },
    #[error("brand {0:?} has no models")]
    EmptyBrand(String),
}

impl Catalog {
    /// Base price for a brand/model pair, by positional index of the model
    /// name within its brand's model list. `None` for unknown pairs - the
    /// engine substitutes its fallback constant, this lookup never fails
    /// louder than that.
    pub fn base_price(&self, brand: &str, model: &str) -> Option<i64> {
        let entry = self.brands.get(brand)?;
        let index = entry.models.iter().position(|name| name == model)?;
        entry.base_prices.get(index).copied()
    }

    /// Brand names in display order.
    pub fn brand_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.brands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn models_for(&self, brand: &str) -> Option<&[String]> {
        self.brands.get(brand).map(|entry| entry.models.as_slice())
    }

    /// Checks the index-alignment invariant. Override files that fail this
    /// are rejected at load time.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (brand, entry) in &self.brands {
            if entry.models.is_empty() {
                return Err(CatalogError::EmptyBrand(brand.clone()));
            }
            if entry.models.len() != entry.base_prices.len() {
                return Err(CatalogError::MisalignedBrand {
                    brand: brand.clone(),
                    models: entry.models.len(),
                    prices: entry.base_prices.len(),
                });
            }
        }
        Ok(())
    }
}

/// One step of the mileage-impact function. `up_to_km: None` is the
/// open-ended tail bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MileageBracket {
    pub up_to_km: Option<u32>,
    pub impact: f64,
}

/// One step of the market-range retention function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetentionBracket {
    pub up_to_age: Option<u32>,
    pub factor: f64,
}

/// The full set of adjustment tables the valuation engine consults.
///
/// Every categorical lookup that misses resolves to [`NEUTRAL_FACTOR`];
/// bracket walks fall through to their tail entry. The engine never errors
/// on a sparse profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingProfile {
    pub fuel_factors: HashMap<FuelType, f64>,
    pub transmission_factors: HashMap<Transmission, f64>,
    pub condition_factors: HashMap<Condition, f64>,
    pub owner_factors: HashMap<OwnerTier, f64>,
    pub city_premiums: HashMap<String, f64>,
    pub insurance_adjustments: HashMap<InsuranceStatus, f64>,
    /// Depreciation fraction by vehicle age, indexed from age 0. Ages past
    /// the end of the table grow by `age_overflow_step` per year, capped at
    /// `age_depreciation_cap`.
    pub age_depreciation: Vec<f64>,
    pub age_overflow_step: f64,
    pub age_depreciation_cap: f64,
    pub mileage_brackets: Vec<MileageBracket>,
    pub retention_brackets: Vec<RetentionBracket>,
    /// Condition table used only by the market range - deliberately wider
    /// spread than `condition_factors`.
    pub range_condition_factors: HashMap<Condition, f64>,
}

impl PricingProfile {
    pub fn fuel_factor(&self, fuel: FuelType) -> f64 {
        self.fuel_factors.get(&fuel).copied().unwrap_or(NEUTRAL_FACTOR)
    }

    pub fn transmission_factor(&self, transmission: Transmission) -> f64 {
        self.transmission_factors
            .get(&transmission)
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }

    pub fn condition_factor(&self, condition: Condition) -> f64 {
        self.condition_factors
            .get(&condition)
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }

    pub fn owner_factor(&self, owner: OwnerTier) -> f64 {
        self.owner_factors.get(&owner).copied().unwrap_or(NEUTRAL_FACTOR)
    }

    pub fn city_premium(&self, city: &str) -> f64 {
        self.city_premiums.get(city).copied().unwrap_or(NEUTRAL_FACTOR)
    }

    pub fn insurance_adjustment(&self, insurance: InsuranceStatus) -> f64 {
        self.insurance_adjustments
            .get(&insurance)
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }

    /// Depreciation fraction for a vehicle age in whole years.
    pub fn age_depreciation(&self, age: u32) -> f64 {
        if let Some(fraction) = self.age_depreciation.get(age as usize) {
            return *fraction;
        }
        let Some(last) = self.age_depreciation.last() else {
            return 0.0;
        };
        let last_index = self.age_depreciation.len() - 1;
        let extra = (age as usize - last_index) as f64 * self.age_overflow_step;
        (last + extra).min(self.age_depreciation_cap)
    }

    /// Mileage-impact fraction: the first bracket whose threshold covers the
    /// reading wins.
    pub fn mileage_impact(&self, mileage_km: u32) -> f64 {
        for bracket in &self.mileage_brackets {
            match bracket.up_to_km {
                Some(limit) if mileage_km <= limit => return bracket.impact,
                Some(_) => continue,
                None => return bracket.impact,
            }
        }
        0.0
    }

    /// Market-range retention factor by age.
    pub fn retention(&self, age: u32) -> f64 {
        for bracket in &self.retention_brackets {
            match bracket.up_to_age {
                Some(limit) if age <= limit => return bracket.factor,
                Some(_) => continue,
                None => return bracket.factor,
            }
        }
        NEUTRAL_FACTOR
    }

    pub fn range_condition_factor(&self, condition: Condition) -> f64 {
        self.range_condition_factors
            .get(&condition)
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(models: &[&str], prices: &[i64]) -> Catalog {
        let mut brands = HashMap::new();
        brands.insert(
            "Tata".to_string(),
            BrandEntry {
                models: models.iter().map(|m| m.to_string()).collect(),
                base_prices: prices.to_vec(),
            },
        );
        Catalog { brands }
    }

    #[test]
    fn base_price_is_positional() {
        let catalog = catalog_with(&["Tiago", "Nexon"], &[650_000, 1_100_000]);
        assert_eq!(catalog.base_price("Tata", "Nexon"), Some(1_100_000));
        assert_eq!(catalog.base_price("Tata", "Punch"), None);
        assert_eq!(catalog.base_price("Yugo", "Nexon"), None);
    }

    #[test]
    fn validate_rejects_misaligned_lists() {
        let catalog = catalog_with(&["Tiago", "Nexon"], &[650_000]);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::MisalignedBrand { .. })
        ));

        let catalog = catalog_with(&["Tiago"], &[650_000]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn age_depreciation_extends_past_table() {
        let profile = crate::util::assets::default_pricing_profile();
        assert_eq!(profile.age_depreciation(0), 0.10);
        assert_eq!(profile.age_depreciation(5), 0.60);
        // One year past the table: last step plus one overflow increment.
        assert!((profile.age_depreciation(6) - 0.65).abs() < 1e-9);
        // Far past the table the cap holds.
        assert_eq!(profile.age_depreciation(40), 0.75);
    }

    #[test]
    fn mileage_brackets_fall_through_to_tail() {
        let profile = crate::util::assets::default_pricing_profile();
        assert_eq!(profile.mileage_impact(0), 0.0);
        assert_eq!(profile.mileage_impact(45_000), 0.10);
        assert_eq!(profile.mileage_impact(1_000_000), 0.35);
    }
}
