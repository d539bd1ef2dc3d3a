//! Deterministic multi-factor vehicle valuation.
//!
//! Two independent estimates come out of every call: the point price, built
//! from the full multiplicative adjustment chain, and a three-point market
//! range built from a much coarser retention model. The two are allowed to
//! disagree - the range models market sampling, not the adjustment chain.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, PricingProfile};
use super::vehicle::VehicleQuery;

/// Hard floor for any point price the engine reports.
pub const MIN_PRICE: i64 = 100_000;

/// Base price substituted when the brand/model pair is not in the catalog.
pub const FALLBACK_BASE_PRICE: i64 = 500_000;

/// Point price substituted when the chain itself fails.
pub const EMERGENCY_POINT_PRICE: i64 = 500_000;

/// Range substituted when the chain itself fails.
pub const EMERGENCY_RANGE: MarketRange = MarketRange {
    low: 300_000,
    mid: 500_000,
    high: 700_000,
};

/// Low/mid/high market estimate. By construction `low = 0.85 × mid` and
/// `high = 1.15 × mid`, rounded to whole currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRange {
    pub low: i64,
    pub mid: i64,
    pub high: i64,
}

/// Which price fed the estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateSource {
    /// Base price came from the catalog.
    Catalog,
    /// Brand/model unknown; the documented fallback base price was used.
    FallbackBase,
    /// The chain produced a non-finite value; fixed emergency constants
    /// were substituted.
    Emergency,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub point_price: i64,
    pub range: MarketRange,
    pub source: EstimateSource,
}

/// A non-finite product somewhere in the chain. Only reachable through
/// corrupt profile data (a NaN or infinite factor); callers never see it,
/// `estimate` maps it to the emergency constants.
#[derive(Debug)]
struct NonFinite;

/// Estimate a vehicle's value.
///
/// Never panics and never returns an error: lookup misses resolve to
/// documented defaults, and an internal failure degrades to the fixed
/// emergency price and range, tagged via [`EstimateSource`].
pub fn estimate(
    query: &VehicleQuery,
    catalog: &Catalog,
    profile: &PricingProfile,
    current_year: i32,
) -> Estimate {
    let (base, source) = match catalog.base_price(&query.brand, &query.model) {
        Some(price) => (price, EstimateSource::Catalog),
        None => (FALLBACK_BASE_PRICE, EstimateSource::FallbackBase),
    };
    let age = vehicle_age(query.year, current_year);

    let point = point_price(base, query, profile, age);
    let range = market_range(base, query, profile, age);

    match (point, range) {
        (Ok(point_price), Ok(range)) => Estimate {
            point_price,
            range,
            source,
        },
        _ => Estimate {
            point_price: EMERGENCY_POINT_PRICE,
            range: EMERGENCY_RANGE,
            source: EstimateSource::Emergency,
        },
    }
}

/// Age in whole years. Future model years count as age zero rather than
/// producing a negative age.
fn vehicle_age(year: i32, current_year: i32) -> u32 {
    (current_year - year).max(0) as u32
}

fn point_price(
    base: i64,
    query: &VehicleQuery,
    profile: &PricingProfile,
    age: u32,
) -> Result<i64, NonFinite> {
    let mut price = base as f64;
    price *= profile.fuel_factor(query.fuel);
    price *= profile.transmission_factor(query.transmission);

    // Age and mileage fractions add up uncapped; the sum may pass 1.0 for
    // very old, high-mileage vehicles, so the remainder is clamped at zero
    // before it scales the price.
    let total_depreciation =
        profile.age_depreciation(age) + profile.mileage_impact(query.mileage_km);
    price *= (1.0 - total_depreciation).max(0.0);

    price *= profile.condition_factor(query.condition);
    price *= profile.owner_factor(query.owner);
    price *= profile.city_premium(&query.city);
    price *= profile.insurance_adjustment(query.insurance);

    if !price.is_finite() {
        return Err(NonFinite);
    }
    Ok((price.max(MIN_PRICE as f64)) as i64)
}

fn market_range(
    base: i64,
    query: &VehicleQuery,
    profile: &PricingProfile,
    age: u32,
) -> Result<MarketRange, NonFinite> {
    let average =
        base as f64 * profile.retention(age) * profile.range_condition_factor(query.condition);
    if !average.is_finite() {
        return Err(NonFinite);
    }
    Ok(MarketRange {
        low: (average * 0.85).round() as i64,
        mid: average.round() as i64,
        high: (average * 1.15).round() as i64,
    })
}
