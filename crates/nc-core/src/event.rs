//! The framework-wide event representation filled by input handlers and
//! consumed by measurement modules.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity of the per-event particle arena.
///
/// The arena is preallocated once and truncated between events; it is never
/// reallocated while serving.
pub const MAX_PARTICLES: usize = 400;

/// A four-momentum in MeV, stored as (px, py, pz, E).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourMomentum {
    /// x momentum component.
    pub px: f64,
    /// y momentum component.
    pub py: f64,
    /// z momentum component.
    pub pz: f64,
    /// Total energy.
    pub e: f64,
}

impl FourMomentum {
    /// Construct from components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Invariant mass; negative mass-squared from rounding clamps to zero.
    pub fn m(&self) -> f64 {
        let m2 = self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz;
        if m2 > 0.0 { m2.sqrt() } else { 0.0 }
    }

    /// Polar angle with respect to the z (beam) axis.
    pub fn theta(&self) -> f64 {
        let p = self.p();
        if p == 0.0 { 0.0 } else { (self.pz / p).clamp(-1.0, 1.0).acos() }
    }
}

/// Kinematic role of a particle within an event.
///
/// Roles are assigned by the input handler from generator status codes.
/// `FsiState` is reserved for intermediate (in-medium) particles; the HepMC
/// stack builder never produces it, but the canonical ordering leaves room
/// for handlers that do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleState {
    /// Incoming beam particle or struck nucleon.
    InitialState,
    /// Target nucleus entry.
    NuclearInitial,
    /// Intermediate particle between the hard vertex and the nuclear exit.
    FsiState,
    /// Particle leaving the interaction, observable in a detector.
    FinalState,
    /// Anything else.
    Undefined,
}

impl ParticleState {
    /// Canonical grouping rank used by [`FitEvent::order_stack`]:
    /// initial-state entries first, then FSI, then final state, then the rest.
    pub fn order_rank(self) -> u8 {
        match self {
            ParticleState::InitialState => 0,
            ParticleState::FsiState => 1,
            ParticleState::FinalState => 2,
            ParticleState::NuclearInitial | ParticleState::Undefined => 3,
        }
    }
}

/// One particle record in a [`FitEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParticle {
    /// Four-momentum, verbatim from the generator record.
    pub mom: FourMomentum,
    /// PDG particle code.
    pub pid: i32,
    /// Kinematic role.
    pub state: ParticleState,
    /// Whether the particle was produced at the primary (hard-scatter) vertex.
    pub primary_vertex: bool,
}

impl FitParticle {
    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        self.mom.p()
    }

    /// Total energy.
    pub fn e(&self) -> f64 {
        self.mom.e
    }
}

/// The internal event representation.
///
/// One instance is owned by each input handler and refilled in place on
/// every entry served; consumers must copy anything they need to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct FitEvent {
    /// Interaction mode / process identifier.
    pub mode: i32,
    /// Event sequence number from the generator.
    pub event_no: i64,
    /// Target nucleus mass number.
    pub target_a: i32,
    /// Target nucleus charge.
    pub target_z: i32,
    /// Target free-proton count (hydrogen component), zero for HepMC inputs.
    pub target_h: i32,
    /// Whether the target is a bound free nucleon (hydrogen).
    pub bound: bool,
    /// Input weight attached by joint-input handling (1.0 for single files).
    pub input_weight: f64,
    particles: Vec<FitParticle>,
}

impl Default for FitEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl FitEvent {
    /// Create an empty event with the particle arena preallocated.
    pub fn new() -> Self {
        Self {
            mode: 0,
            event_no: 0,
            target_a: 0,
            target_z: 0,
            target_h: 0,
            bound: false,
            input_weight: 1.0,
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Restore the neutral state, truncating the arena without reallocating.
    pub fn reset(&mut self) {
        self.mode = 0;
        self.event_no = 0;
        self.target_a = 0;
        self.target_z = 0;
        self.target_h = 0;
        self.bound = false;
        self.input_weight = 1.0;
        self.particles.clear();
    }

    /// Append a particle record.
    ///
    /// Fails if the arena is full; the capacity bound is an invariant of the
    /// representation, not a soft limit.
    pub fn push_particle(&mut self, particle: FitParticle) -> Result<()> {
        if self.particles.len() >= MAX_PARTICLES {
            return Err(Error::Validation(format!(
                "particle stack overflow in event {}: capacity {}",
                self.event_no, MAX_PARTICLES
            )));
        }
        self.particles.push(particle);
        Ok(())
    }

    /// All particle records, in canonical order after [`Self::order_stack`].
    pub fn particles(&self) -> &[FitParticle] {
        &self.particles
    }

    /// Number of particle records.
    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    /// Group the arena by role in the order {initial, FSI, final, other},
    /// preserving relative order within each group.
    ///
    /// Consumers assume role-grouped contiguous ranges when computing
    /// kinematic quantities.
    pub fn order_stack(&mut self) {
        self.particles.sort_by_key(|p| p.state.order_rank());
    }

    /// The incoming neutrino: first initial-state particle with a neutrino
    /// PDG code.
    pub fn neutrino_in(&self) -> Option<&FitParticle> {
        self.particles
            .iter()
            .find(|p| p.state == ParticleState::InitialState && matches!(p.pid.abs(), 12 | 14 | 16))
    }

    /// Iterator over initial-state particles.
    pub fn initial_particles(&self) -> impl Iterator<Item = &FitParticle> {
        self.particles.iter().filter(|p| p.state == ParticleState::InitialState)
    }

    /// Iterator over final-state particles.
    pub fn fs_particles(&self) -> impl Iterator<Item = &FitParticle> {
        self.particles.iter().filter(|p| p.state == ParticleState::FinalState)
    }

    /// Final-state particles with the given PDG code.
    pub fn fs_particles_with_pid(&self, pid: i32) -> impl Iterator<Item = &FitParticle> + '_ {
        self.fs_particles().filter(move |p| p.pid == pid)
    }

    /// Count of final-state particles with the given PDG code.
    pub fn num_fs_particles(&self, pid: i32) -> usize {
        self.fs_particles_with_pid(pid).count()
    }

    /// Highest-momentum final-state particle with the given PDG code.
    pub fn highest_momentum_fs(&self, pid: i32) -> Option<&FitParticle> {
        self.fs_particles_with_pid(pid)
            .max_by(|a, b| a.p().partial_cmp(&b.p()).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// First final-state charged lepton, if any.
    pub fn fs_charged_lepton(&self) -> Option<&FitParticle> {
        self.fs_particles().find(|p| matches!(p.pid.abs(), 11 | 13 | 15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(pid: i32, state: ParticleState, pz: f64) -> FitParticle {
        FitParticle {
            mom: FourMomentum::new(0.0, 0.0, pz, pz.abs()),
            pid,
            state,
            primary_vertex: true,
        }
    }

    #[test]
    fn order_stack_groups_by_role_and_is_stable() {
        let mut ev = FitEvent::new();
        ev.push_particle(particle(2112, ParticleState::FinalState, 1.0)).unwrap();
        ev.push_particle(particle(14, ParticleState::InitialState, 2.0)).unwrap();
        ev.push_particle(particle(1000060120, ParticleState::NuclearInitial, 0.0)).unwrap();
        ev.push_particle(particle(211, ParticleState::FinalState, 3.0)).unwrap();
        ev.push_particle(particle(2212, ParticleState::InitialState, 4.0)).unwrap();
        ev.order_stack();

        let states: Vec<_> = ev.particles().iter().map(|p| p.state).collect();
        assert_eq!(
            states,
            vec![
                ParticleState::InitialState,
                ParticleState::InitialState,
                ParticleState::FinalState,
                ParticleState::FinalState,
                ParticleState::NuclearInitial,
            ]
        );
        // Stability: neutron (pz=1) stays ahead of pion (pz=3) within final state.
        assert_eq!(ev.particles()[2].pid, 2112);
        assert_eq!(ev.particles()[3].pid, 211);
        // And the beam neutrino stays ahead of the struck nucleon.
        assert_eq!(ev.particles()[0].pid, 14);
    }

    #[test]
    fn neutrino_in_finds_beam_particle() {
        let mut ev = FitEvent::new();
        ev.push_particle(particle(2212, ParticleState::InitialState, 0.0)).unwrap();
        ev.push_particle(particle(14, ParticleState::InitialState, 1.0)).unwrap();
        assert_eq!(ev.neutrino_in().unwrap().pid, 14);
    }

    #[test]
    fn arena_capacity_is_enforced() {
        let mut ev = FitEvent::new();
        for _ in 0..MAX_PARTICLES {
            ev.push_particle(particle(22, ParticleState::FinalState, 1.0)).unwrap();
        }
        assert!(ev.push_particle(particle(22, ParticleState::FinalState, 1.0)).is_err());
        ev.reset();
        assert_eq!(ev.n_particles(), 0);
    }

    #[test]
    fn four_momentum_kinematics() {
        let p = FourMomentum::new(3.0, 0.0, 4.0, 13.0);
        assert!((p.p() - 5.0).abs() < 1e-12);
        assert!((p.m() - 12.0).abs() < 1e-12);
    }
}
