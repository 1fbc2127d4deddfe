//! # nc-core
//!
//! Core types for NuComp: the framework-wide event representation,
//! histogram type, input-handler trait, error taxonomy, and run
//! configuration shared by every other crate in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod event;
pub mod hist;
pub mod traits;

pub use config::InputConfig;
pub use error::{Error, Result};
pub use event::{FitEvent, FitParticle, FourMomentum, MAX_PARTICLES, ParticleState};
pub use hist::Hist1D;
pub use traits::InputHandler;

/// Crate version, exposed for CLI/version reporting.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
