//! Core engines for the ValueDeck dashboards.
//!
//! Two independent leaf components: a deterministic vehicle valuation
//! engine ([`domain::valuation`]) driven by static reference tables, and a
//! recovery parser ([`domain::recovery`]) that extracts slide records from
//! possibly-truncated generation output. [`infra::generator`] wraps the
//! external text-generation call that feeds the parser. The dashboards own
//! everything else - forms, persistence, document assembly.

pub mod domain;
pub mod infra;
pub mod util;

pub use domain::{
    estimate, recover_slides, Catalog, Condition, Estimate, EstimateSource, FuelType,
    InsuranceStatus, MarketRange, OwnerTier, PricingProfile, SlideRecord, Transmission,
    VehicleQuery,
};
pub use infra::generator::{DeckRequest, GeneratorClient, GeneratorConfig, GeneratorError};
