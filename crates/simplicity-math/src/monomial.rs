// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Exact Monomials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exact monomial algebra.
//!
//! A [`Monomial`] is `±Π pᵢ^eᵢ · π^e · Π symⱼ^eⱼ` with rational exponents,
//! where the `pᵢ` are primes. Products, quotients, rational powers and
//! substitution stay exact, which is enough for closed-form lattice
//! derivations like `c0 = 8·2^(1/4)/√(5π)`.

use num_rational::Rational64;
use num_traits::{One, Signed, Zero};
use simplicity_types::error::{SimplicityError, SimplicityResult};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Div, Mul};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    sign: i8,
    primes: BTreeMap<u64, Rational64>,
    pi: Rational64,
    symbols: BTreeMap<String, Rational64>,
}

fn factorize(mut n: u64) -> Vec<(u64, i64)> {
    let mut out = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        let mut count = 0;
        while n % p == 0 {
            n /= p;
            count += 1;
        }
        if count > 0 {
            out.push((p, count));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        out.push((n, 1));
    }
    out
}

fn add_exponent<K: Ord>(map: &mut BTreeMap<K, Rational64>, key: K, e: Rational64) {
    let entry = map.entry(key).or_insert_with(Rational64::zero);
    *entry += e;
}

fn prune<K: Ord>(map: &mut BTreeMap<K, Rational64>) {
    map.retain(|_, e| !e.is_zero());
}

fn fmt_exponent(e: Rational64) -> String {
    if e.is_one() {
        String::new()
    } else if e.is_integer() {
        format!("^{}", e.to_integer())
    } else {
        format!("^({}/{})", e.numer(), e.denom())
    }
}

impl Monomial {
    pub fn one() -> Self {
        Monomial {
            sign: 1,
            primes: BTreeMap::new(),
            pi: Rational64::zero(),
            symbols: BTreeMap::new(),
        }
    }

    pub fn zero() -> Self {
        Monomial {
            sign: 0,
            ..Monomial::one()
        }
    }

    pub fn integer(n: i64) -> Self {
        Self::rational(Rational64::from_integer(n))
    }

    pub fn rational(r: Rational64) -> Self {
        if r.is_zero() {
            return Self::zero();
        }
        let mut m = Self::one();
        if r.is_negative() {
            m.sign = -1;
        }
        for (p, k) in factorize(r.numer().unsigned_abs()) {
            add_exponent(&mut m.primes, p, Rational64::from_integer(k));
        }
        for (p, k) in factorize(r.denom().unsigned_abs()) {
            add_exponent(&mut m.primes, p, Rational64::from_integer(-k));
        }
        m
    }

    /// `n/d` as a monomial. Fails on `d = 0`.
    pub fn ratio(n: i64, d: i64) -> SimplicityResult<Self> {
        if d == 0 {
            return Err(SimplicityError::Algebra("zero denominator".to_string()));
        }
        Ok(Self::rational(Rational64::new(n, d)))
    }

    pub fn pi() -> Self {
        Monomial {
            pi: Rational64::one(),
            ..Self::one()
        }
    }

    pub fn symbol(name: &str) -> Self {
        let mut m = Self::one();
        m.symbols.insert(name.to_string(), Rational64::one());
        m
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    pub fn contains_pi(&self) -> bool {
        !self.is_zero() && !self.pi.is_zero()
    }

    pub fn contains_symbol(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn symbol_exponent(&self, name: &str) -> Rational64 {
        self.symbols.get(name).copied().unwrap_or_else(Rational64::zero)
    }

    pub fn pi_exponent(&self) -> Rational64 {
        self.pi
    }

    pub fn scale(&self, r: Rational64) -> Self {
        self * &Self::rational(r)
    }

    /// Raise to a rational power.
    ///
    /// Negative bases only admit odd-denominator exponents; zero only
    /// admits positive exponents.
    pub fn pow(&self, e: Rational64) -> SimplicityResult<Self> {
        if self.is_zero() {
            return if e.is_positive() {
                Ok(Self::zero())
            } else {
                Err(SimplicityError::Algebra(format!("0^{e} is undefined")))
            };
        }
        let sign = if self.sign < 0 {
            if e.denom() % 2 == 0 {
                return Err(SimplicityError::Algebra(format!(
                    "even root of negative monomial {self}"
                )));
            }
            if e.numer() % 2 == 0 {
                1
            } else {
                -1
            }
        } else {
            1
        };
        let mut out = Monomial {
            sign,
            primes: self.primes.iter().map(|(p, x)| (*p, x * e)).collect(),
            pi: self.pi * e,
            symbols: self.symbols.iter().map(|(s, x)| (s.clone(), x * e)).collect(),
        };
        prune(&mut out.primes);
        prune(&mut out.symbols);
        Ok(out)
    }

    pub fn sqrt(&self) -> SimplicityResult<Self> {
        self.pow(Rational64::new(1, 2))
    }

    pub fn recip(&self) -> SimplicityResult<Self> {
        self.pow(Rational64::from_integer(-1))
    }

    /// Replace every occurrence of `name` by `value`.
    pub fn subs(&self, name: &str, value: &Monomial) -> SimplicityResult<Self> {
        let mut rest = self.clone();
        match rest.symbols.remove(name) {
            Some(e) => Ok(&rest * &value.pow(e)?),
            None => Ok(rest),
        }
    }

    /// Integer-exponent part of the prime product, with sign.
    pub fn rational_part(&self) -> Rational64 {
        if self.is_zero() {
            return Rational64::zero();
        }
        let mut r = Rational64::from_integer(i64::from(self.sign));
        for (p, e) in &self.primes {
            let whole = e.floor().to_integer();
            let base = Rational64::from_integer(*p as i64);
            r *= if whole >= 0 {
                base.pow(whole as i32)
            } else {
                base.recip().pow((-whole) as i32)
            };
        }
        r
    }

    /// Everything except the rational part: radicals in [0, 1), π and symbols.
    fn unit(&self) -> Self {
        let mut unit = Monomial {
            sign: 1,
            primes: self.primes.iter().map(|(p, e)| (*p, e - e.floor())).collect(),
            pi: self.pi,
            symbols: self.symbols.clone(),
        };
        prune(&mut unit.primes);
        unit
    }

    /// Sum of two like terms, `None` when the terms are not alike.
    pub fn try_add(&self, other: &Monomial) -> Option<Monomial> {
        if self.is_zero() {
            return Some(other.clone());
        }
        if other.is_zero() {
            return Some(self.clone());
        }
        let unit = self.unit();
        if unit != other.unit() {
            return None;
        }
        let sum = self.rational_part() + other.rational_part();
        Some(&Monomial::rational(sum) * &unit)
    }

    pub fn try_sub(&self, other: &Monomial) -> Option<Monomial> {
        self.try_add(&other.scale(Rational64::from_integer(-1)))
    }

    /// Evaluate with the given symbol bindings.
    pub fn eval(&self, bindings: &[(&str, f64)]) -> SimplicityResult<f64> {
        if self.is_zero() {
            return Ok(0.0);
        }
        let mut v = f64::from(self.sign);
        for (p, e) in &self.primes {
            v *= (*p as f64).powf(rational_to_f64(*e));
        }
        v *= std::f64::consts::PI.powf(rational_to_f64(self.pi));
        for (name, e) in &self.symbols {
            let x = bindings
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, x)| *x)
                .ok_or_else(|| SimplicityError::Algebra(format!("unbound symbol '{name}'")))?;
            v *= x.powf(rational_to_f64(*e));
        }
        Ok(v)
    }

    /// Numeric value of a symbol-free monomial.
    pub fn to_f64(&self) -> SimplicityResult<f64> {
        self.eval(&[])
    }
}

pub fn rational_to_f64(r: Rational64) -> f64 {
    *r.numer() as f64 / *r.denom() as f64
}

impl Mul for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &Monomial) -> Monomial {
        if self.is_zero() || rhs.is_zero() {
            return Monomial::zero();
        }
        let mut out = self.clone();
        out.sign *= rhs.sign;
        for (p, e) in &rhs.primes {
            add_exponent(&mut out.primes, *p, *e);
        }
        out.pi += rhs.pi;
        for (s, e) in &rhs.symbols {
            add_exponent(&mut out.symbols, s.clone(), *e);
        }
        prune(&mut out.primes);
        prune(&mut out.symbols);
        out
    }
}

impl Mul for Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Monomial) -> Monomial {
        &self * &rhs
    }
}

impl Div for &Monomial {
    type Output = SimplicityResult<Monomial>;

    fn div(self, rhs: &Monomial) -> SimplicityResult<Monomial> {
        Ok(self * &rhs.recip()?)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let rational = self.rational_part();
        let unit = self.unit();

        let mut num: Vec<String> = Vec::new();
        let mut den: Vec<String> = Vec::new();
        let n = rational.numer().abs();
        let d = *rational.denom();
        if n != 1 {
            num.push(n.to_string());
        }
        if d != 1 {
            den.push(d.to_string());
        }
        for (p, e) in &unit.primes {
            num.push(format!("{p}{}", fmt_exponent(*e)));
        }
        let mut push = |name: &str, e: Rational64| {
            if e.is_positive() {
                num.push(format!("{name}{}", fmt_exponent(e)));
            } else if e.is_negative() {
                den.push(format!("{name}{}", fmt_exponent(-e)));
            }
        };
        push("π", unit.pi);
        for (s, e) in &unit.symbols {
            push(s.as_str(), *e);
        }

        if rational.is_negative() {
            write!(f, "-")?;
        }
        if num.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", num.join("·"))?;
        }
        match den.len() {
            0 => Ok(()),
            1 => write!(f, "/{}", den[0]),
            _ => write!(f, "/({})", den.join("·")),
        }
    }
}
