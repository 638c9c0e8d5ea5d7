// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — FCC Overlap Condition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Overlap of twelve FCC neighbours.
//!
//! Requiring the eigen-volume left after inclusion-exclusion to be
//! `V_full/3` reduces to a cubic in the normalised cap height `ξ = H/R`:
//! `8ξ³ − 12ξ² + 6ξ − 1 = 0`, i.e. `(2ξ − 1)³ = 0`.

use num_rational::Rational64;
use simplicity_math::monomial::Monomial;
use simplicity_math::polynomial::{Factorization, Polynomial};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::fmt;
use tracing::debug;

use crate::RADIUS;

/// `4/3 π R³`.
pub fn sphere_volume() -> Monomial {
    Monomial::rational(Rational64::new(4, 3))
        * Monomial::pi()
        * Monomial::symbol(RADIUS)
        * Monomial::symbol(RADIUS)
        * Monomial::symbol(RADIUS)
}

/// Overlap condition in ξ.
pub fn overlap_cubic() -> Polynomial {
    Polynomial::from_integers(&[-1, 6, -12, 8])
}

#[derive(Debug, Clone)]
pub struct OverlapReport {
    pub v_full: Monomial,
    pub cubic: Polynomial,
    pub factorization: Factorization,
    pub distinct_real_roots: usize,
    pub root: Rational64,
    pub multiplicity: usize,
}

impl OverlapReport {
    /// Whether the overlap is exactly half the radius.
    pub fn is_half_overlap(&self) -> bool {
        self.root == Rational64::new(1, 2)
    }
}

/// Solve the overlap condition exactly. Fails unless it has a single
/// real root.
pub fn overlap_report() -> SimplicityResult<OverlapReport> {
    let cubic = overlap_cubic();
    let distinct_real_roots = cubic.distinct_real_roots()?;
    let factorization = cubic.factor();
    let (root, multiplicity) = match (distinct_real_roots, factorization.roots.as_slice()) {
        (1, [(root, m)]) => (*root, *m),
        _ => {
            return Err(SimplicityError::Algebra(format!(
                "overlap condition {} has {distinct_real_roots} real roots",
                cubic.display_with("ξ")
            )))
        }
    };
    debug!(%root, multiplicity, "solved FCC overlap condition");
    Ok(OverlapReport {
        v_full: sphere_volume(),
        cubic,
        factorization,
        distinct_real_roots,
        root,
        multiplicity,
    })
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "V_full          = {}", self.v_full)?;
        writeln!(f, "condition       : {} = 0", self.cubic.display_with("ξ"))?;
        writeln!(f, "factored        : {} = 0", self.factorization.display_with("ξ"))?;
        writeln!(
            f,
            "real roots      : ξ = {} (multiplicity {}, {} distinct)",
            self.root, self.multiplicity, self.distinct_real_roots
        )?;
        write!(
            f,
            "half overlap    : {}",
            if self.is_half_overlap() { "yes, H = R/2" } else { "no" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_volume() {
        assert_eq!(sphere_volume().to_string(), "4·π·R^3/3");
    }

    #[test]
    fn test_unique_half_root() {
        let report = overlap_report().unwrap();
        assert_eq!(report.distinct_real_roots, 1);
        assert_eq!(report.root, Rational64::new(1, 2));
        assert_eq!(report.multiplicity, 3);
        assert!(report.is_half_overlap());
        assert_eq!(report.factorization.display_with("ξ"), "(2ξ - 1)^3");
    }

    #[test]
    fn test_cubic_vanishes_only_at_half() {
        let c = overlap_cubic();
        assert_eq!(c.eval(Rational64::new(1, 2)), Rational64::from_integer(0));
        assert_eq!(c.eval(Rational64::from_integer(0)), Rational64::from_integer(-1));
        assert_eq!(c.eval(Rational64::from_integer(1)), Rational64::from_integer(1));
    }

    #[test]
    fn test_report_text() {
        let text = overlap_report().unwrap().to_string();
        assert!(text.contains("8ξ^3 - 12ξ^2 + 6ξ - 1 = 0"));
        assert!(text.contains("yes"));
    }
}
