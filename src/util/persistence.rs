//! Config-dir overrides for the reference catalog and pricing profile.
//!
//! The embedded defaults always work; a deployment that curates its own
//! tables drops `catalog.json` / `pricing_profile.json` into the platform
//! config directory. Broken override files are logged and ignored so a bad
//! edit can never take the engine down.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde_json::Error as SerdeError;

use crate::domain::catalog::{Catalog, PricingProfile};
use crate::util::assets;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ValueDeck";
const APP_NAME: &str = "ValueDeck";

const CATALOG_FILE: &str = "catalog.json";
const PROFILE_FILE: &str = "pricing_profile.json";

fn config_file(name: &str) -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(name))
}

/// Loads a catalog override, if one exists and passes validation.
pub fn load_catalog_override() -> Option<Catalog> {
    let catalog: Catalog = load_override(CATALOG_FILE)?;
    if let Err(error) = catalog.validate() {
        println!("[profile] Ignoring catalog override: {error}");
        return None;
    }
    Some(catalog)
}

/// Loads a pricing-profile override, if one exists.
pub fn load_profile_override() -> Option<PricingProfile> {
    load_override(PROFILE_FILE)
}

/// The catalog the dashboards should use: override if present, embedded
/// default otherwise.
pub fn effective_catalog() -> Catalog {
    load_catalog_override().unwrap_or_else(|| assets::default_catalog().clone())
}

pub fn effective_pricing_profile() -> PricingProfile {
    load_profile_override().unwrap_or_else(|| assets::default_pricing_profile().clone())
}

pub fn save_catalog_override(catalog: &Catalog) -> Result<(), PersistSaveError> {
    save_override(CATALOG_FILE, catalog)
}

pub fn save_profile_override(profile: &PricingProfile) -> Result<(), PersistSaveError> {
    save_override(PROFILE_FILE, profile)
}

fn load_override<T: DeserializeOwned>(name: &str) -> Option<T> {
    let path = config_file(name)?;
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(value) => {
                println!("[profile] Loaded override from {}", path.display());
                Some(value)
            }
            Err(error) => {
                println!("[profile] Failed to parse {}: {error}", path.display());
                None
            }
        },
        Err(error) => {
            println!("[profile] Failed to read {}: {error}", path.display());
            None
        }
    }
}

fn save_override<T: serde::Serialize>(name: &str, value: &T) -> Result<(), PersistSaveError> {
    let path = config_file(name).ok_or(PersistSaveError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
