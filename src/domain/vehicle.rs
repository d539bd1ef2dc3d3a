use serde::{Deserialize, Serialize};

/// A vehicle as described by the valuation form.
///
/// Constructed fresh for every request and discarded afterwards; the core
/// never persists it. Brand and model are free-form strings that may or may
/// not key into the reference catalog - unknown pairs are handled by the
/// engine's fallback base price, not rejected here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub brand: String,
    pub model: String,
    /// Manufacturing year. Values in the future are treated as age zero.
    pub year: i32,
    pub fuel: FuelType,
    pub transmission: Transmission,
    /// Odometer reading in kilometers.
    pub mileage_km: u32,
    pub condition: Condition,
    pub owner: OwnerTier,
    pub insurance: InsuranceStatus,
    /// Registration city, open set. Unknown cities carry no premium.
    pub city: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Cng,
    Lpg,
    Hybrid,
    Electric,
}

impl FuelType {
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Cng => "CNG",
            FuelType::Lpg => "LPG",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

/// Overall vehicle condition, ordered best to worst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Fair => "Fair",
            Condition::Poor => "Poor",
        }
    }
}

/// How many owners the vehicle has been through, ordered first to fourth-plus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerTier {
    First,
    Second,
    Third,
    FourthPlus,
}

impl OwnerTier {
    pub fn label(&self) -> &'static str {
        match self {
            OwnerTier::First => "1st owner",
            OwnerTier::Second => "2nd owner",
            OwnerTier::Third => "3rd owner",
            OwnerTier::FourthPlus => "4th owner or more",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceStatus {
    Comprehensive,
    ThirdParty,
    Expired,
}

impl InsuranceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InsuranceStatus::Comprehensive => "Comprehensive",
            InsuranceStatus::ThirdParty => "Third-party",
            InsuranceStatus::Expired => "Expired",
        }
    }
}
