// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Symplectic Integration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Symplectic integration for canonical Hamiltonian systems with many
//! degrees of freedom.
//!
//! Velocity-Verlet is the production stepper for long-horizon,
//! energy-bounded integration; RK4 is kept as a regression reference.

use ndarray::Array1;

/// Canonical phase-space state `(q, p)` over N degrees of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    pub q: Array1<f64>,
    pub p: Array1<f64>,
}

impl PhaseState {
    pub fn new(q: Array1<f64>, p: Array1<f64>) -> Self {
        debug_assert_eq!(q.len(), p.len());
        PhaseState { q, p }
    }

    pub fn at_rest(q: Array1<f64>) -> Self {
        let p = Array1::zeros(q.len());
        PhaseState { q, p }
    }

    pub fn dof(&self) -> usize {
        self.q.len()
    }
}

/// Hamiltonian system contract in canonical coordinates.
pub trait HamiltonianSystem {
    /// ∂H/∂q.
    fn d_h_dq(&self, q: &Array1<f64>, p: &Array1<f64>) -> Array1<f64>;
    /// ∂H/∂p.
    fn d_h_dp(&self, q: &Array1<f64>, p: &Array1<f64>) -> Array1<f64>;
    /// Hamiltonian energy `H(q, p)`.
    fn hamiltonian(&self, state: &PhaseState) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrator {
    VelocityVerlet,
    Rk4,
}

/// Perform one velocity-Verlet step.
pub fn velocity_verlet_step<S: HamiltonianSystem>(state: &mut PhaseState, system: &S, dt: f64) {
    if !dt.is_finite() || dt == 0.0 {
        return;
    }

    let p_half = &state.p - &(system.d_h_dq(&state.q, &state.p) * (0.5 * dt));
    let q_new = &state.q + &(system.d_h_dp(&state.q, &p_half) * dt);
    let p_new = &p_half - &(system.d_h_dq(&q_new, &p_half) * (0.5 * dt));

    state.q = q_new;
    state.p = p_new;
}

/// Perform one RK4 step on canonical equations:
/// `q_dot = ∂H/∂p`, `p_dot = -∂H/∂q`.
pub fn rk4_step<S: HamiltonianSystem>(state: &mut PhaseState, system: &S, dt: f64) {
    if !dt.is_finite() || dt == 0.0 {
        return;
    }

    let f = |q: &Array1<f64>, p: &Array1<f64>| -> (Array1<f64>, Array1<f64>) {
        (system.d_h_dp(q, p), -system.d_h_dq(q, p))
    };

    let (k1q, k1p) = f(&state.q, &state.p);
    let (k2q, k2p) = f(&(&state.q + &(&k1q * (0.5 * dt))), &(&state.p + &(&k1p * (0.5 * dt))));
    let (k3q, k3p) = f(&(&state.q + &(&k2q * (0.5 * dt))), &(&state.p + &(&k2p * (0.5 * dt))));
    let (k4q, k4p) = f(&(&state.q + &(&k3q * dt)), &(&state.p + &(&k3p * dt)));

    state.q = &state.q + &((&k1q + &(&k2q * 2.0) + &(&k3q * 2.0) + &k4q) * (dt / 6.0));
    state.p = &state.p + &((&k1p + &(&k2p * 2.0) + &(&k3p * 2.0) + &k4p) * (dt / 6.0));
}

/// Integrate `steps` steps, calling `observe(step, state)` for the initial
/// state and after every step. Returns the final state.
pub fn integrate<S, F>(
    initial: PhaseState,
    system: &S,
    dt: f64,
    steps: usize,
    integrator: Integrator,
    mut observe: F,
) -> PhaseState
where
    S: HamiltonianSystem,
    F: FnMut(usize, &PhaseState),
{
    let mut state = initial;
    observe(0, &state);
    for step in 1..=steps {
        match integrator {
            Integrator::VelocityVerlet => velocity_verlet_step(&mut state, system, dt),
            Integrator::Rk4 => rk4_step(&mut state, system, dt),
        }
        observe(step, &state);
    }
    state
}

/// Maximum absolute energy drift relative to the initial state over a run.
pub fn max_energy_drift<S: HamiltonianSystem>(
    initial: PhaseState,
    system: &S,
    dt: f64,
    steps: usize,
    integrator: Integrator,
) -> f64 {
    let e0 = system.hamiltonian(&initial);
    let mut drift = 0.0_f64;
    integrate(initial, system, dt, steps, integrator, |_, s| {
        drift = drift.max((system.hamiltonian(s) - e0).abs());
    });
    drift
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// `H = Σ 0.5 * (p² + (ω q)²)`.
    struct HarmonicOscillator {
        omega: f64,
    }

    impl HamiltonianSystem for HarmonicOscillator {
        fn d_h_dq(&self, q: &Array1<f64>, _p: &Array1<f64>) -> Array1<f64> {
            q * (self.omega * self.omega)
        }

        fn d_h_dp(&self, _q: &Array1<f64>, p: &Array1<f64>) -> Array1<f64> {
            p.clone()
        }

        fn hamiltonian(&self, s: &PhaseState) -> f64 {
            0.5 * (s.p.dot(&s.p) + self.omega * self.omega * s.q.dot(&s.q))
        }
    }

    #[test]
    fn test_velocity_verlet_zero_dt_identity() {
        let sys = HarmonicOscillator { omega: 1.0 };
        let mut s = PhaseState::new(array![1.2, 0.3], array![-0.4, 0.0]);
        let original = s.clone();
        velocity_verlet_step(&mut s, &sys, 0.0);
        assert_eq!(s, original);
    }

    #[test]
    fn test_velocity_verlet_energy_bounded_on_long_horizon() {
        let sys = HarmonicOscillator { omega: 1.0 };
        let initial = PhaseState::at_rest(array![1.0]);
        let drift = max_energy_drift(initial, &sys, 0.3, 5000, Integrator::VelocityVerlet);
        assert!(
            drift < 0.02,
            "Expected bounded long-horizon drift for symplectic integrator, got {drift}"
        );
    }

    #[test]
    fn test_velocity_verlet_outperforms_rk4_drift_on_coarse_step() {
        let sys = HarmonicOscillator { omega: 1.0 };
        let initial = PhaseState::at_rest(array![1.0, -0.5]);
        let verlet = max_energy_drift(initial.clone(), &sys, 0.3, 5000, Integrator::VelocityVerlet);
        let rk4 = max_energy_drift(initial, &sys, 0.3, 5000, Integrator::Rk4);
        assert!(
            verlet < rk4,
            "Expected symplectic drift < RK4 drift on long horizon, got verlet={verlet}, rk4={rk4}"
        );
    }

    #[test]
    fn test_rk4_tracks_cosine_on_fine_step() {
        let sys = HarmonicOscillator { omega: 2.0 };
        let dt = 1e-3;
        let steps = 1000;
        let end = integrate(PhaseState::at_rest(array![1.0]), &sys, dt, steps, Integrator::Rk4, |_, _| {});
        let expected = (2.0 * dt * steps as f64).cos();
        assert!((end.q[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let sys = HarmonicOscillator { omega: 1.0 };
        let mut seen = Vec::new();
        integrate(PhaseState::at_rest(array![1.0]), &sys, 0.1, 7, Integrator::VelocityVerlet, |i, _| {
            seen.push(i)
        });
        assert_eq!(seen, (0..=7).collect::<Vec<_>>());
    }
}
