//! # nc-hepmc
//!
//! Native forward-only reader for the HepMC3 version-3 ASCII event
//! container, including the NuHepMC run-level metadata conventions.
//! No external C++ HepMC libraries are required.
//!
//! ## Example
//!
//! ```no_run
//! use nc_hepmc::AsciiReader;
//!
//! let mut reader = AsciiReader::open("events.hepmc3").unwrap();
//! while let Some(event) = reader.read_event().unwrap() {
//!     println!("event {}: {} particles", event.event_number, event.particles.len());
//! }
//! let run = reader.run_info().expect("at least one event was read");
//! println!("weight channels: {:?}", run.weight_names);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod reader;
pub mod run_info;
pub mod tokens;

pub use error::{HepmcError, Result};
pub use event::{CrossSection, FourVector, GenEvent, Particle, Vertex};
pub use reader::AsciiReader;
pub use run_info::RunInfo;
