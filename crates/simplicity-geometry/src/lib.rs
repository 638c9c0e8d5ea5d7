// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Simplicity Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
pub mod eigen_volume;
pub mod lattice;
pub mod overlap;

/// Sphere radius.
pub const RADIUS: &str = "R";
/// Lattice constant.
pub const LATTICE_CONSTANT: &str = "a";
/// Reference energy density.
pub const RHO_STAR: &str = "ρ*";
