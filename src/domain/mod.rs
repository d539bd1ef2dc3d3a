//! Domain logic for vehicle valuation and deck recovery lives here.

pub mod catalog;
pub mod recovery;
pub mod slides;
pub mod valuation;
pub mod vehicle;

pub use catalog::{
    BrandEntry, Catalog, CatalogError, MileageBracket, PricingProfile, RetentionBracket,
    NEUTRAL_FACTOR,
};
pub use recovery::recover_slides;
pub use slides::SlideRecord;
pub use valuation::{
    estimate, Estimate, EstimateSource, MarketRange, EMERGENCY_POINT_PRICE, EMERGENCY_RANGE,
    FALLBACK_BASE_PRICE, MIN_PRICE,
};
pub use vehicle::{Condition, FuelType, InsuranceStatus, OwnerTier, Transmission, VehicleQuery};
