// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Rational Polynomials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Univariate polynomials with exact rational coefficients.
//!
//! Rational roots come from the rational root theorem. Whatever cannot be
//! split into rational linear factors is kept as a remainder whose real roots
//! are counted by discriminant (degree ≤ 3).

use num_integer::Integer;
use num_rational::Rational64;
use num_traits::{One, Signed, Zero};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::fmt;

/// Coefficients in ascending order: `coeffs[k]` multiplies `x^k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<Rational64>,
}

/// `Π (x − rᵢ)^mᵢ · remainder`, where the remainder has no rational roots.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    pub roots: Vec<(Rational64, usize)>,
    pub remainder: Polynomial,
}

fn divisors(n: i64) -> Vec<i64> {
    let n = n.abs();
    let mut out = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            out.push(d);
            if d != n / d {
                out.push(n / d);
            }
        }
        d += 1;
    }
    out
}

impl Polynomial {
    pub fn new(mut coeffs: Vec<Rational64>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Polynomial { coeffs }
    }

    /// Integer coefficients, ascending.
    pub fn from_integers(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| Rational64::from_integer(c)).collect())
    }

    pub fn coeffs(&self) -> &[Rational64] {
        &self.coeffs
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn leading(&self) -> Rational64 {
        self.coeffs.last().copied().unwrap_or_else(Rational64::zero)
    }

    pub fn eval(&self, x: Rational64) -> Rational64 {
        self.coeffs
            .iter()
            .rev()
            .fold(Rational64::zero(), |acc, c| acc * x + c)
    }

    pub fn eval_f64(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, c| {
            acc * x + *c.numer() as f64 / *c.denom() as f64
        })
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, c)| c * Rational64::from_integer(k as i64))
                .collect(),
        )
    }

    pub fn scale(&self, s: Rational64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c * s).collect())
    }

    /// Synthetic division by `(x − r)`: returns (quotient, remainder).
    pub fn div_linear(&self, r: Rational64) -> (Polynomial, Rational64) {
        if self.coeffs.len() < 2 {
            return (Polynomial::new(Vec::new()), self.leading());
        }
        let n = self.coeffs.len();
        let mut quotient = vec![Rational64::zero(); n - 1];
        let mut carry = Rational64::zero();
        for k in (1..n).rev() {
            carry = self.coeffs[k] + carry * r;
            quotient[k - 1] = carry;
        }
        let remainder = self.coeffs[0] + carry * r;
        (Polynomial::new(quotient), remainder)
    }

    /// Distinct rational roots, ascending.
    pub fn rational_roots(&self) -> Vec<Rational64> {
        if self.degree().unwrap_or(0) == 0 {
            return Vec::new();
        }
        // Clear denominators so the rational root theorem applies.
        let lcm = self
            .coeffs
            .iter()
            .fold(1i64, |acc, c| acc.lcm(c.denom()));
        let ints: Vec<i64> = self
            .coeffs
            .iter()
            .map(|c| (c * Rational64::from_integer(lcm)).to_integer())
            .collect();

        let mut roots = Vec::new();
        let low = ints.iter().position(|c| *c != 0).unwrap_or(0);
        if low > 0 {
            roots.push(Rational64::zero());
        }
        let a0 = ints[low];
        let an = ints[ints.len() - 1];
        for p in divisors(a0) {
            for q in divisors(an) {
                for candidate in [Rational64::new(p, q), Rational64::new(-p, q)] {
                    if !roots.contains(&candidate) && self.eval(candidate).is_zero() {
                        roots.push(candidate);
                    }
                }
            }
        }
        roots.sort();
        roots
    }

    /// Split off every rational linear factor with its multiplicity.
    pub fn factor(&self) -> Factorization {
        let mut remainder = self.clone();
        let mut roots = Vec::new();
        for r in self.rational_roots() {
            let mut multiplicity = 0;
            loop {
                let (q, rem) = remainder.div_linear(r);
                if !rem.is_zero() || remainder.degree().unwrap_or(0) == 0 {
                    break;
                }
                remainder = q;
                multiplicity += 1;
            }
            roots.push((r, multiplicity));
        }
        Factorization { roots, remainder }
    }

    /// Number of distinct real roots. Supported when the non-rational
    /// remainder has degree ≤ 3.
    pub fn distinct_real_roots(&self) -> SimplicityResult<usize> {
        if self.is_zero() {
            return Err(SimplicityError::Algebra(
                "zero polynomial has infinitely many roots".to_string(),
            ));
        }
        let f = self.factor();
        let c = &f.remainder.coeffs;
        let extra = match f.remainder.degree() {
            Some(0) | None => 0,
            Some(1) => 1,
            Some(2) => {
                let disc = c[1] * c[1] - Rational64::from_integer(4) * c[2] * c[0];
                if disc.is_positive() {
                    2
                } else if disc.is_zero() {
                    1
                } else {
                    0
                }
            }
            Some(3) => {
                let (a, b, cc, d) = (c[3], c[2], c[1], c[0]);
                let k = |n: i64| Rational64::from_integer(n);
                let disc = k(18) * a * b * cc * d - k(4) * b * b * b * d + b * b * cc * cc
                    - k(4) * a * cc * cc * cc
                    - k(27) * a * a * d * d;
                if disc.is_positive() {
                    3
                } else if disc.is_zero() {
                    // A repeated root of a rational cubic is rational.
                    2
                } else {
                    1
                }
            }
            Some(deg) => {
                return Err(SimplicityError::Algebra(format!(
                    "real root count unsupported for irreducible remainder of degree {deg}"
                )))
            }
        };
        Ok(f.roots.len() + extra)
    }

    pub fn display_with(&self, var: &str) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        for (k, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let magnitude = c.abs();
            if out.is_empty() {
                if c.is_negative() {
                    out.push('-');
                }
            } else {
                out.push_str(if c.is_negative() { " - " } else { " + " });
            }
            let coeff = if magnitude.is_integer() {
                magnitude.to_integer().to_string()
            } else {
                format!("({}/{})", magnitude.numer(), magnitude.denom())
            };
            match k {
                0 => out.push_str(&coeff),
                _ => {
                    if !magnitude.is_one() {
                        out.push_str(&coeff);
                    }
                    out.push_str(var);
                    if k > 1 {
                        out.push_str(&format!("^{k}"));
                    }
                }
            }
        }
        out
    }
}

impl Factorization {
    /// Render as `c·(q x − p)^m ...`, absorbing root denominators into the
    /// linear factors.
    pub fn display_with(&self, var: &str) -> String {
        let mut constant = Rational64::one();
        let mut parts = Vec::new();
        for (r, m) in &self.roots {
            let (p, q) = (*r.numer(), *r.denom());
            constant /= Rational64::from_integer(q).pow(*m as i32);
            let qx = if q == 1 {
                var.to_string()
            } else {
                format!("{q}{var}")
            };
            let linear = match p.signum() {
                0 => qx,
                1 => format!("({qx} - {p})"),
                _ => format!("({qx} + {})", -p),
            };
            parts.push(if *m > 1 {
                format!("{linear}^{m}")
            } else {
                linear
            });
        }
        let rest = self.remainder.scale(constant);
        let head = match rest.degree() {
            Some(0) if rest.leading().is_one() && !parts.is_empty() => String::new(),
            Some(0) if (-rest.leading()).is_one() && !parts.is_empty() => "-".to_string(),
            Some(0) => rest.display_with(var),
            _ => format!("({})", rest.display_with(var)),
        };
        if parts.is_empty() {
            return head;
        }
        let sep = if head.is_empty() || head == "-" { "" } else { "·" };
        format!("{head}{sep}{}", parts.join("·"))
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with("x"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational64 {
        Rational64::new(n, d)
    }

    fn overlap_cubic() -> Polynomial {
        Polynomial::from_integers(&[-1, 6, -12, 8])
    }

    #[test]
    fn test_display_descending() {
        assert_eq!(overlap_cubic().display_with("ξ"), "8ξ^3 - 12ξ^2 + 6ξ - 1");
        assert_eq!(Polynomial::from_integers(&[0, -1]).to_string(), "-x");
        assert_eq!(Polynomial::new(vec![r(1, 2), r(0, 1), r(3, 2)]).to_string(), "(3/2)x^2 + (1/2)");
    }

    #[test]
    fn test_overlap_cubic_is_perfect_cube() {
        let f = overlap_cubic().factor();
        assert_eq!(f.roots, vec![(r(1, 2), 3)]);
        assert_eq!(f.remainder.degree(), Some(0));
        assert_eq!(f.display_with("ξ"), "(2ξ - 1)^3");
        assert_eq!(overlap_cubic().distinct_real_roots().unwrap(), 1);
    }

    #[test]
    fn test_triple_root_kills_two_derivatives() {
        let p = overlap_cubic();
        let half = r(1, 2);
        assert!(p.eval(half).is_zero());
        assert!(p.derivative().eval(half).is_zero());
        assert!(p.derivative().derivative().eval(half).is_zero());
        assert!(!p.derivative().derivative().derivative().eval(half).is_zero());
    }

    #[test]
    fn test_synthetic_division() {
        // x^2 - 3x + 2 = (x - 1)(x - 2)
        let p = Polynomial::from_integers(&[2, -3, 1]);
        let (q, rem) = p.div_linear(r(1, 1));
        assert!(rem.is_zero());
        assert_eq!(q, Polynomial::from_integers(&[-2, 1]));
        let (_, rem) = p.div_linear(r(3, 1));
        assert_eq!(rem, r(2, 1));
    }

    #[test]
    fn test_rational_roots_with_zero_and_fractions() {
        // x (3x - 2)(x + 4) = 3x^3 + 10x^2 - 8x
        let p = Polynomial::from_integers(&[0, -8, 10, 3]);
        assert_eq!(p.rational_roots(), vec![r(-4, 1), r(0, 1), r(2, 3)]);
        assert_eq!(p.distinct_real_roots().unwrap(), 3);
    }

    #[test]
    fn test_irreducible_quadratic_remainder() {
        // (x - 1)(x^2 + 1)
        let p = Polynomial::from_integers(&[-1, 1, -1, 1]);
        let f = p.factor();
        assert_eq!(f.roots, vec![(r(1, 1), 1)]);
        assert_eq!(f.remainder, Polynomial::from_integers(&[1, 0, 1]));
        assert_eq!(p.distinct_real_roots().unwrap(), 1);
        assert_eq!(f.display_with("x"), "(x^2 + 1)·(x - 1)");
    }

    #[test]
    fn test_irrational_cubic_counts_three() {
        // x^3 - 3x + 1 has three irrational real roots
        let p = Polynomial::from_integers(&[1, -3, 0, 1]);
        assert!(p.rational_roots().is_empty());
        assert_eq!(p.distinct_real_roots().unwrap(), 3);
    }

    #[test]
    fn test_zero_polynomial() {
        let p = Polynomial::from_integers(&[0, 0]);
        assert!(p.is_zero());
        assert_eq!(p.degree(), None);
        assert!(p.distinct_real_roots().is_err());
    }
}
