//! Clients for the external collaborators the core talks to.

pub mod generator;

pub use generator::{DeckRequest, GeneratorClient, GeneratorConfig, GeneratorError};
