// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Eigen-Volume and π Lock-in
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! At half overlap the neighbours remove `2/3 V_full`; what remains is
//! `V_eig = 4/9 π R³`, so π cannot cancel out of the node's inertia.

use num_rational::Rational64;
use simplicity_math::monomial::Monomial;
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::fmt;

use crate::overlap::sphere_volume;

#[derive(Debug, Clone, PartialEq)]
pub struct LockInReport {
    pub v_full: Monomial,
    pub v_loss: Monomial,
    pub v_eig: Monomial,
}

impl LockInReport {
    pub fn pi_present(&self) -> bool {
        self.v_eig.contains_pi()
    }
}

pub fn pi_lock_in() -> SimplicityResult<LockInReport> {
    let v_full = sphere_volume();
    let v_loss = v_full.scale(Rational64::new(2, 3));
    let v_eig = v_full
        .try_sub(&v_loss)
        .ok_or_else(|| SimplicityError::Algebra(format!("{v_full} and {v_loss} are not like terms")))?;
    Ok(LockInReport { v_full, v_loss, v_eig })
}

impl fmt::Display for LockInReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "V_full          = {}", self.v_full)?;
        writeln!(f, "V_loss          = {}", self.v_loss)?;
        writeln!(f, "V_eig           = {}", self.v_eig)?;
        write!(f, "π present       : {}", if self.pi_present() { "yes" } else { "no" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eigen_volume_keeps_pi() {
        let r = pi_lock_in().unwrap();
        assert_eq!(r.v_eig.to_string(), "4·π·R^3/9");
        assert_eq!(r.v_loss.to_string(), "8·π·R^3/9");
        assert!(r.pi_present());
        assert_eq!(r.v_eig.pi_exponent(), Rational64::from_integer(1));
    }

    #[test]
    fn test_eigen_volume_is_third_of_sphere() {
        let r = pi_lock_in().unwrap();
        assert_eq!(r.v_full.scale(Rational64::new(1, 3)), r.v_eig);
        let v = r.v_eig.eval(&[("R", 2.0)]).unwrap();
        assert!((v - 4.0 / 9.0 * std::f64::consts::PI * 8.0).abs() < 1e-12);
    }
}
