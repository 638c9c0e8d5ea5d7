// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Vacuum Oscillation Toy Simulation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Longitudinal oscillations of a periodic 1-D chain of FCC nodes.
//!
//! Node mass is `m_eff` and the spring is `k_total/a`, so long waves travel
//! at the lattice `c0`. The chain Hamiltonian
//! `H = Σ p²/2m + Σ k/2 (qᵢ₊₁ − qᵢ)²` is integrated with velocity-Verlet.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use simplicity_geometry::lattice::derive_lattice_dynamics;
use simplicity_math::stats::mean_period;
use simplicity_math::symplectic::{integrate, HamiltonianSystem, Integrator, PhaseState};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::f64::consts::PI;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacuumParams {
    #[serde(default = "default_nodes")]
    pub nodes: usize,
    #[serde(default = "default_mode")]
    pub mode: usize,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default = "default_unit")]
    pub lattice_constant: f64,
    #[serde(default = "default_unit")]
    pub rho_star: f64,
    /// Gaussian pulse width in nodes.
    #[serde(default = "default_pulse_width")]
    pub pulse_width_nodes: f64,
    #[serde(default = "default_snapshots")]
    pub snapshots: usize,
}

fn default_nodes() -> usize {
    64
}
fn default_mode() -> usize {
    1
}
fn default_amplitude() -> f64 {
    0.01
}
fn default_dt() -> f64 {
    0.05
}
fn default_steps() -> usize {
    4000
}
fn default_unit() -> f64 {
    1.0
}
fn default_pulse_width() -> f64 {
    3.0
}
fn default_snapshots() -> usize {
    5
}

impl Default for VacuumParams {
    fn default() -> Self {
        VacuumParams {
            nodes: default_nodes(),
            mode: default_mode(),
            amplitude: default_amplitude(),
            dt: default_dt(),
            steps: default_steps(),
            lattice_constant: default_unit(),
            rho_star: default_unit(),
            pulse_width_nodes: default_pulse_width(),
            snapshots: default_snapshots(),
        }
    }
}

impl VacuumParams {
    pub fn chain(&self) -> SimplicityResult<LatticeChain> {
        LatticeChain::from_lattice(self.nodes, self.lattice_constant, self.rho_star)
    }
}

/// Periodic nearest-neighbour chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeChain {
    pub nodes: usize,
    pub mass: f64,
    pub stiffness: f64,
    pub spacing: f64,
}

impl LatticeChain {
    pub fn new(nodes: usize, mass: f64, stiffness: f64, spacing: f64) -> SimplicityResult<Self> {
        if nodes < 3 {
            return Err(SimplicityError::InvalidParameter(format!(
                "chain needs at least 3 nodes, got {nodes}"
            )));
        }
        for (name, v) in [("mass", mass), ("stiffness", stiffness), ("spacing", spacing)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SimplicityError::InvalidParameter(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        Ok(LatticeChain {
            nodes,
            mass,
            stiffness,
            spacing,
        })
    }

    /// Chain built from the FCC node mass and neck stiffness.
    pub fn from_lattice(nodes: usize, lattice_constant: f64, rho_star: f64) -> SimplicityResult<Self> {
        let dynamics = derive_lattice_dynamics()?;
        let mass = dynamics.node_mass(lattice_constant, rho_star)?;
        let stiffness = dynamics.node_stiffness(lattice_constant, rho_star)? / lattice_constant;
        debug!(nodes, mass, stiffness, "built FCC node chain");
        Self::new(nodes, mass, stiffness, lattice_constant)
    }

    /// Long-wavelength sound speed `a √(k/m)`.
    pub fn wave_speed(&self) -> f64 {
        self.spacing * (self.stiffness / self.mass).sqrt()
    }

    /// Wavenumber of normal mode `mode`.
    pub fn mode_wavenumber(&self, mode: usize) -> f64 {
        2.0 * PI * mode as f64 / (self.nodes as f64 * self.spacing)
    }

    /// `ω(q) = 2 √(k/m) |sin(q a / 2)|`.
    pub fn dispersion(&self, q: f64) -> f64 {
        2.0 * (self.stiffness / self.mass).sqrt() * (0.5 * q * self.spacing).sin().abs()
    }

    /// Offset wrapped into `[-L/2, L/2]` for the ring length `L`.
    fn periodic_offset(&self, dx: f64) -> f64 {
        let length = self.nodes as f64 * self.spacing;
        dx - length * (dx / length).round()
    }

    fn positions(&self) -> Array1<f64> {
        Array1::from_iter((0..self.nodes).map(|i| i as f64 * self.spacing))
    }
}

impl HamiltonianSystem for LatticeChain {
    fn d_h_dq(&self, q: &Array1<f64>, _p: &Array1<f64>) -> Array1<f64> {
        let n = q.len();
        Array1::from_iter((0..n).map(|i| {
            let left = q[(i + n - 1) % n];
            let right = q[(i + 1) % n];
            self.stiffness * (2.0 * q[i] - left - right)
        }))
    }

    fn d_h_dp(&self, _q: &Array1<f64>, p: &Array1<f64>) -> Array1<f64> {
        p / self.mass
    }

    fn hamiltonian(&self, state: &PhaseState) -> f64 {
        let n = state.q.len();
        let kinetic = state.p.dot(&state.p) / (2.0 * self.mass);
        let potential: f64 = (0..n)
            .map(|i| (state.q[(i + 1) % n] - state.q[i]).powi(2))
            .sum::<f64>()
            * 0.5
            * self.stiffness;
        kinetic + potential
    }
}

fn check_run(dt: f64, steps: usize) -> SimplicityResult<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "time step must be positive and finite, got {dt}"
        )));
    }
    if steps == 0 {
        return Err(SimplicityError::InvalidParameter("steps must be positive".to_string()));
    }
    Ok(())
}

/// Time series of a single standing mode.
#[derive(Debug, Clone)]
pub struct ModeRun {
    pub mode: usize,
    pub times: Vec<f64>,
    /// Displacement of node 0.
    pub displacement: Vec<f64>,
    pub energy: Vec<f64>,
    /// `None` when the run is shorter than two periods.
    pub omega_measured: Option<f64>,
    pub omega_analytic: f64,
    /// `max |H − H0| / H0`.
    pub relative_energy_drift: f64,
}

pub fn simulate_mode(
    chain: &LatticeChain,
    mode: usize,
    amplitude: f64,
    dt: f64,
    steps: usize,
    integrator: Integrator,
) -> SimplicityResult<ModeRun> {
    if mode == 0 || mode > chain.nodes / 2 {
        return Err(SimplicityError::InvalidParameter(format!(
            "mode must lie in 1..={}, got {mode}",
            chain.nodes / 2
        )));
    }
    if !amplitude.is_finite() || amplitude == 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "amplitude must be non-zero and finite, got {amplitude}"
        )));
    }
    check_run(dt, steps)?;

    let q = chain.mode_wavenumber(mode);
    let initial = PhaseState::at_rest(chain.positions().mapv(|x| amplitude * (q * x).cos()));
    let e0 = chain.hamiltonian(&initial);

    let mut times = Vec::with_capacity(steps + 1);
    let mut displacement = Vec::with_capacity(steps + 1);
    let mut energy = Vec::with_capacity(steps + 1);
    integrate(initial, chain, dt, steps, integrator, |step, s| {
        times.push(step as f64 * dt);
        displacement.push(s.q[0]);
        energy.push(chain.hamiltonian(s));
    });

    let omega_measured = mean_period(&displacement, dt).map(|t| 2.0 * PI / t);
    let omega_analytic = chain.dispersion(q);
    let relative_energy_drift = energy.iter().map(|e| (e - e0).abs()).fold(0.0, f64::max) / e0;
    info!(
        mode,
        omega_analytic,
        omega_measured = omega_measured.unwrap_or(f64::NAN),
        relative_energy_drift,
        "simulated vacuum mode"
    );
    Ok(ModeRun {
        mode,
        times,
        displacement,
        energy,
        omega_measured,
        omega_analytic,
        relative_energy_drift,
    })
}

#[derive(Debug, Clone)]
pub struct PulseSnapshot {
    pub time: f64,
    pub displacement: Array1<f64>,
}

/// Propagate a right-moving Gaussian pulse centred on node `center` and
/// keep `snapshots` evenly spaced frames, the initial one included.
pub fn simulate_pulse(
    chain: &LatticeChain,
    center: usize,
    width_nodes: f64,
    amplitude: f64,
    dt: f64,
    steps: usize,
    snapshots: usize,
) -> SimplicityResult<Vec<PulseSnapshot>> {
    check_run(dt, steps)?;
    if center >= chain.nodes || !width_nodes.is_finite() || width_nodes <= 0.0 {
        return Err(SimplicityError::InvalidParameter(format!(
            "pulse centre {center} / width {width_nodes} do not fit {} nodes",
            chain.nodes
        )));
    }
    if snapshots < 2 {
        return Err(SimplicityError::InvalidParameter("need at least two snapshots".to_string()));
    }

    let x0 = center as f64 * chain.spacing;
    let w = width_nodes * chain.spacing;
    let c = chain.wave_speed();
    // Minimum-image offsets so the pulse is smooth across the wrap point.
    let offsets = chain.positions().mapv(|x| chain.periodic_offset(x - x0));
    let shape = offsets.mapv(|dx| amplitude * (-dx * dx / (2.0 * w * w)).exp());
    // u(x − ct): p = −m c ∂u/∂x
    let momentum = Array1::from_iter(
        offsets
            .iter()
            .zip(shape.iter())
            .map(|(dx, u)| chain.mass * c * dx / (w * w) * u),
    );

    let every = (steps / (snapshots - 1)).max(1);
    let mut frames = Vec::with_capacity(snapshots);
    integrate(PhaseState::new(shape, momentum), chain, dt, steps, Integrator::VelocityVerlet, |step, s| {
        if step % every == 0 && frames.len() < snapshots {
            frames.push(PulseSnapshot {
                time: step as f64 * dt,
                displacement: s.q.clone(),
            });
        }
    });
    debug!(frames = frames.len(), "propagated vacuum pulse");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> LatticeChain {
        LatticeChain::from_lattice(n, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_chain_sound_speed_is_c0() {
        let c0 = derive_lattice_dynamics().unwrap().wave_speed().unwrap();
        assert!((chain(32).wave_speed() - c0).abs() < 1e-12);
        let scaled = LatticeChain::from_lattice(32, 2.5, 7.0).unwrap();
        assert!((scaled.wave_speed() - c0).abs() < 1e-12);
    }

    #[test]
    fn test_dispersion_long_wave_limit() {
        let ch = chain(1024);
        let q = ch.mode_wavenumber(1);
        assert!((ch.dispersion(q) / q - ch.wave_speed()).abs() < 1e-4);
        assert_eq!(ch.dispersion(0.0), 0.0);
    }

    #[test]
    fn test_mode_frequency_matches_dispersion() {
        let ch = chain(64);
        let run = simulate_mode(&ch, 2, 0.01, 0.05, 4000, Integrator::VelocityVerlet).unwrap();
        let measured = run.omega_measured.unwrap();
        assert!(
            (measured / run.omega_analytic - 1.0).abs() < 2e-3,
            "measured {measured}, analytic {}",
            run.omega_analytic
        );
        assert!(run.relative_energy_drift < 1e-3);
        assert_eq!(run.times.len(), 4001);
    }

    #[test]
    fn test_hamiltonian_gradient_conserves_momentum() {
        let ch = chain(8);
        let q = Array1::from_vec(vec![0.1, -0.2, 0.3, 0.0, 0.05, -0.1, 0.2, 0.4]);
        let force = ch.d_h_dq(&q, &Array1::zeros(8));
        assert!(force.sum().abs() < 1e-12);
    }

    #[test]
    fn test_pulse_moves_right_at_c0() {
        let ch = chain(128);
        let dt = 0.05;
        let steps = 400;
        let frames = simulate_pulse(&ch, 30, 4.0, 0.01, dt, steps, 3).unwrap();
        assert_eq!(frames.len(), 3);
        let peak = |f: &PulseSnapshot| {
            f.displacement
                .iter()
                .enumerate()
                .fold((0, f64::MIN), |best, (i, v)| if *v > best.1 { (i, *v) } else { best })
                .0
        };
        let last = &frames[2];
        let expected = 30.0 + ch.wave_speed() * last.time;
        assert!((peak(last) as f64 - expected).abs() <= 2.0, "peak {} expected {expected}", peak(last));
    }

    #[test]
    fn test_pulse_at_chain_end_wraps_smoothly() {
        let ch = chain(64);
        let frames = simulate_pulse(&ch, 0, 3.0, 0.01, 0.05, 10, 2).unwrap();
        let u = &frames[0].displacement;
        assert!((u[0] - 0.01).abs() < 1e-15);
        for k in 1..8 {
            assert!((u[k] - u[64 - k]).abs() < 1e-15, "node {k}: {} vs {}", u[k], u[64 - k]);
        }
        assert!(u[32] < 1e-12);

        let late = simulate_pulse(&ch, 63, 3.0, 0.01, 0.05, 10, 2).unwrap();
        let v = &late[0].displacement;
        assert!((v[0] - v[62]).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_inputs() {
        let ch = chain(16);
        assert!(LatticeChain::from_lattice(2, 1.0, 1.0).is_err());
        assert!(simulate_mode(&ch, 0, 0.01, 0.05, 10, Integrator::VelocityVerlet).is_err());
        assert!(simulate_mode(&ch, 9, 0.01, 0.05, 10, Integrator::VelocityVerlet).is_err());
        assert!(simulate_mode(&ch, 1, 0.01, 0.0, 10, Integrator::VelocityVerlet).is_err());
        assert!(simulate_mode(&ch, 1, 0.01, f64::NAN, 10, Integrator::VelocityVerlet).is_err());
        assert!(simulate_mode(&ch, 1, 0.01, 0.05, 0, Integrator::VelocityVerlet).is_err());
        assert!(simulate_pulse(&ch, 20, 2.0, 0.01, 0.05, 10, 3).is_err());
    }
}
