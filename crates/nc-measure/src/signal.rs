//! Reusable signal-definition predicates over [`FitEvent`]s.

use nc_core::FitEvent;

/// Charged-lepton PDG code produced by a charged-current interaction of
/// `nu_pdg`.
fn cc_lepton_pdg(nu_pdg: i32) -> i32 {
    if nu_pdg > 0 { nu_pdg - 1 } else { nu_pdg + 1 }
}

fn is_meson(pid: i32) -> bool {
    matches!(pid.abs(), 111 | 211 | 130 | 310 | 311 | 321)
}

fn is_charged_lepton(pid: i32) -> bool {
    matches!(pid.abs(), 11 | 13 | 15)
}

/// Charged-current inclusive: the right beam neutrino and its partner
/// charged lepton in the final state.
pub fn is_cc_inclusive(event: &FitEvent, nu_pdg: i32) -> bool {
    match event.neutrino_in() {
        Some(nu) if nu.pid == nu_pdg => event.num_fs_particles(cc_lepton_pdg(nu_pdg)) > 0,
        _ => false,
    }
}

/// Charged-current single-pion production with a three-prong topology:
/// exactly one charged lepton, one pion of `pi_pdg`, one nucleon of
/// `nucleon_pdg`, no other mesons or charged leptons, and the neutrino
/// energy inside `[enu_min_mev, enu_max_mev]`.
pub fn is_cc1pi_3prong(
    event: &FitEvent,
    nu_pdg: i32,
    pi_pdg: i32,
    nucleon_pdg: i32,
    enu_min_mev: f64,
    enu_max_mev: f64,
) -> bool {
    let nu = match event.neutrino_in() {
        Some(p) if p.pid == nu_pdg => p,
        _ => return false,
    };
    let enu = nu.e();
    if enu < enu_min_mev || enu > enu_max_mev {
        return false;
    }

    let lepton_pdg = cc_lepton_pdg(nu_pdg);
    if event.num_fs_particles(lepton_pdg) != 1
        || event.num_fs_particles(pi_pdg) != 1
        || event.num_fs_particles(nucleon_pdg) != 1
    {
        return false;
    }

    // Nothing else meson- or lepton-like in the final state.
    event.fs_particles().all(|p| {
        p.pid == lepton_pdg
            || p.pid == pi_pdg
            || p.pid == nucleon_pdg
            || (!is_meson(p.pid) && !is_charged_lepton(p.pid))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::{FitParticle, FourMomentum, ParticleState};

    fn particle(pid: i32, state: ParticleState, e: f64) -> FitParticle {
        FitParticle {
            mom: FourMomentum::new(0.0, 0.0, e, e),
            pid,
            state,
            primary_vertex: true,
        }
    }

    fn cc1pip_event(enu: f64) -> FitEvent {
        let mut ev = FitEvent::new();
        ev.push_particle(particle(14, ParticleState::InitialState, enu)).unwrap();
        ev.push_particle(particle(13, ParticleState::FinalState, 600.0)).unwrap();
        ev.push_particle(particle(211, ParticleState::FinalState, 250.0)).unwrap();
        ev.push_particle(particle(2112, ParticleState::FinalState, 945.0)).unwrap();
        ev.order_stack();
        ev
    }

    #[test]
    fn accepts_the_three_prong_topology() {
        let ev = cc1pip_event(1000.0);
        assert!(is_cc1pi_3prong(&ev, 14, 211, 2112, 0.0, 3000.0));
        assert!(is_cc_inclusive(&ev, 14));
    }

    #[test]
    fn rejects_wrong_beam_flavor() {
        let ev = cc1pip_event(1000.0);
        assert!(!is_cc1pi_3prong(&ev, -14, 211, 2112, 0.0, 3000.0));
        assert!(!is_cc_inclusive(&ev, 12));
    }

    #[test]
    fn rejects_energy_out_of_window() {
        let ev = cc1pip_event(3500.0);
        assert!(!is_cc1pi_3prong(&ev, 14, 211, 2112, 0.0, 3000.0));
    }

    #[test]
    fn rejects_extra_pion() {
        let mut ev = cc1pip_event(1000.0);
        ev.push_particle(particle(-211, ParticleState::FinalState, 150.0)).unwrap();
        assert!(!is_cc1pi_3prong(&ev, 14, 211, 2112, 0.0, 3000.0));
    }

    #[test]
    fn tolerates_extra_neutral_baryon_but_not_extra_nucleon_of_type() {
        let mut ev = cc1pip_event(1000.0);
        // A second neutron breaks the exactly-one requirement.
        ev.push_particle(particle(2112, ParticleState::FinalState, 950.0)).unwrap();
        assert!(!is_cc1pi_3prong(&ev, 14, 211, 2112, 0.0, 3000.0));
    }
}
