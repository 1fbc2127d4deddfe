//! # nc-input
//!
//! Generator-event ingestion and kinematic-normalization pipeline.
//!
//! [`HepmcInputHandler`] adapts HepMC3/NuHepMC event files into the
//! framework's [`nc_core::FitEvent`] representation: it pre-scans each file
//! once to resolve the flux-averaged total cross section, rebuilds particle
//! stacks with status reclassification, serves entries over a forward-only
//! reader (cheap forward skip, reopen on backward access), and applies
//! per-file scale weights when several inputs form one logical stream.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod handler;
pub mod inputs;
pub mod joint;
pub mod norm;
pub mod stack;

pub use handler::HepmcInputHandler;
pub use inputs::parse_input_list;
pub use joint::JointIndexTable;
pub use norm::{ConventionFlags, Prescan, RunMetadata, prescan, resolve_fatx};
