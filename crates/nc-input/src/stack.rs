//! Particle stack builder: one decoded generator event into the internal
//! fixed-capacity representation, with status reclassification.

use nc_core::{Error, FitEvent, FitParticle, FourMomentum, ParticleState, Result};
use nc_hepmc::GenEvent;

/// NuHepMC vertex status codes.
pub mod vertex_status {
    /// The primary (hard-scatter) vertex.
    pub const PRIMARY: i32 = 1;
    /// The nuclear separation vertex.
    pub const NUCLEAR: i32 = 2;
}

/// NuHepMC particle status codes.
pub mod particle_status {
    /// Undecayed physical particle, observable in a detector.
    pub const UNDECAYED_PHYSICAL: i32 = 1;
    /// Incoming beam particle.
    pub const INCOMING_BEAM: i32 = 4;
    /// Target nucleus.
    pub const TARGET: i32 = 11;
    /// Struck nucleon.
    pub const STRUCK_NUCLEON: i32 = 21;
}

/// Nuclear PDG code for hydrogen (a free proton target).
const FREE_PROTON_PID: i32 = 1000010010;

/// Rebuild `dest` from one raw generator event.
///
/// Roles are assigned from the status table; particles with any other
/// status are generator bookkeeping and are dropped without leaving gaps.
/// The target-nucleus identity is derived from the target particle's
/// nuclear PDG code. Ends with the canonical role-grouped reordering.
pub fn fill_fit_event(dest: &mut FitEvent, raw: &GenEvent, input_weight: f64) -> Result<()> {
    dest.reset();

    dest.mode = raw
        .checked_attribute_i32("ProcID")
        .map_err(|e| Error::Input(format!("event {}: {}", raw.event_number, e)))?;
    dest.event_no = raw.event_number;
    dest.input_weight = input_weight;

    for p in &raw.particles {
        let state = match p.status {
            particle_status::INCOMING_BEAM => ParticleState::InitialState,
            particle_status::TARGET => {
                dest.target_a = (p.pid / 10) % 1000;
                dest.target_z = (p.pid / 10000) % 1000;
                dest.target_h = 0;
                dest.bound = p.pid == FREE_PROTON_PID;
                ParticleState::NuclearInitial
            }
            particle_status::STRUCK_NUCLEON => ParticleState::InitialState,
            particle_status::UNDECAYED_PHYSICAL => ParticleState::FinalState,
            _ => continue,
        };

        // A dangling production-vertex id counts as non-primary.
        let primary = raw
            .vertex(p.production_vertex)
            .map(|v| v.status == vertex_status::PRIMARY)
            .unwrap_or(false);

        dest.push_particle(FitParticle {
            mom: FourMomentum::new(p.momentum.px, p.momentum.py, p.momentum.pz, p.momentum.e),
            pid: p.pid,
            state,
            primary_vertex: primary,
        })?;
    }

    dest.order_stack();
    Ok(())
}
