// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — SPARC Readers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Readers for the SPARC galaxy sample.
//!
//! * the fixed-width metadata table (machine-readable byte-by-byte layout),
//! * the per-galaxy `<Galaxy>_rotmod.dat` mass-model rotation curves.

use simplicity_types::error::{SimplicityError, SimplicityResult};
use simplicity_types::records::{GalaxyMeta, RotationCurve, RotationPoint};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Int,
    Float,
}

/// One fixed-width column: 1-based inclusive byte range.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub kind: ColumnKind,
    pub required: bool,
}

const fn col(name: &'static str, start: usize, end: usize, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        start,
        end,
        kind,
        required: false,
    }
}

/// Byte-by-byte layout of the SPARC galaxy table.
pub const SPARC_COLUMNS: [ColumnSpec; 19] = [
    ColumnSpec {
        name: "Galaxy",
        start: 1,
        end: 11,
        kind: ColumnKind::Text,
        required: true,
    },
    col("T", 12, 13, ColumnKind::Int),
    col("D", 14, 19, ColumnKind::Float),
    col("e_D", 20, 24, ColumnKind::Float),
    col("f_D", 25, 26, ColumnKind::Int),
    col("Inc", 27, 30, ColumnKind::Float),
    col("e_Inc", 31, 34, ColumnKind::Float),
    col("L[3.6]", 35, 41, ColumnKind::Float),
    col("e_L[3.6]", 42, 48, ColumnKind::Float),
    col("Reff", 49, 53, ColumnKind::Float),
    col("SBeff", 54, 61, ColumnKind::Float),
    col("Rdisk", 62, 66, ColumnKind::Float),
    col("SBdisk", 67, 74, ColumnKind::Float),
    col("MHI", 75, 81, ColumnKind::Float),
    col("RHI", 82, 86, ColumnKind::Float),
    col("Vflat", 87, 91, ColumnKind::Float),
    col("e_Vflat", 92, 96, ColumnKind::Float),
    col("Q", 97, 99, ColumnKind::Int),
    col("Ref", 100, 113, ColumnKind::Text),
];

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(Option<i64>),
    Float(Option<f64>),
}

/// One parsed data line.
#[derive(Debug, Clone)]
pub struct FixedWidthRow {
    /// 1-based line number in the source text.
    pub line: usize,
    fields: Vec<(&'static str, FieldValue)>,
}

impl FixedWidthRow {
    fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(FieldValue::Int(v)) => *v,
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(FieldValue::Float(v)) => *v,
            _ => None,
        }
    }
}

fn is_separator(line: &str) -> bool {
    let t = line.trim_end();
    t.len() >= 10 && t.chars().all(|c| c == '-')
}

fn slice_field<'a>(line: &'a str, spec: &ColumnSpec, line_no: usize) -> SimplicityResult<&'a str> {
    let start = spec.start.saturating_sub(1);
    if start >= line.len() {
        return Ok("");
    }
    let end = spec.end.min(line.len());
    line.get(start..end)
        .map(str::trim)
        .ok_or_else(|| SimplicityError::Parse {
            line: line_no,
            column: spec.name.to_string(),
            message: "field does not fall on character boundaries".to_string(),
        })
}

/// Parse a fixed-width table. Data rows start after the last dashed
/// separator line when one exists.
pub fn parse_fixed_width(text: &str, columns: &[ColumnSpec]) -> SimplicityResult<Vec<FixedWidthRow>> {
    let lines: Vec<&str> = text.lines().collect();
    let first_data = lines
        .iter()
        .rposition(|l| is_separator(l))
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut rows = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(first_data) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = Vec::with_capacity(columns.len());
        for spec in columns {
            let raw = slice_field(line, spec, line_no)?;
            if spec.required && raw.is_empty() {
                return Err(SimplicityError::Parse {
                    line: line_no,
                    column: spec.name.to_string(),
                    message: "required field is empty".to_string(),
                });
            }
            let parse_err = |message: String| SimplicityError::Parse {
                line: line_no,
                column: spec.name.to_string(),
                message,
            };
            let value = match spec.kind {
                ColumnKind::Text => FieldValue::Text(raw.to_string()),
                ColumnKind::Int if raw.is_empty() => FieldValue::Int(None),
                ColumnKind::Int => FieldValue::Int(Some(
                    raw.parse::<i64>()
                        .map_err(|e| parse_err(format!("'{raw}': {e}")))?,
                )),
                ColumnKind::Float if raw.is_empty() => FieldValue::Float(None),
                ColumnKind::Float => FieldValue::Float(Some(
                    raw.parse::<f64>()
                        .map_err(|e| parse_err(format!("'{raw}': {e}")))?,
                )),
            };
            fields.push((spec.name, value));
        }
        rows.push(FixedWidthRow {
            line: line_no,
            fields,
        });
    }
    debug!(rows = rows.len(), first_data_line = first_data + 1, "parsed fixed-width table");
    Ok(rows)
}

fn meta_from_row(row: &FixedWidthRow) -> SimplicityResult<GalaxyMeta> {
    let name = row.text("Galaxy").unwrap_or_default().to_string();
    let quality = match row.int("Q") {
        Some(q) => Some(u8::try_from(q).map_err(|_| SimplicityError::Parse {
            line: row.line,
            column: "Q".to_string(),
            message: format!("quality flag {q} out of range"),
        })?),
        None => None,
    };
    let small_int = |n: &str| row.int(n).and_then(|v| i32::try_from(v).ok());
    Ok(GalaxyMeta {
        name,
        hubble_type: small_int("T"),
        distance_mpc: row.float("D"),
        distance_err_mpc: row.float("e_D"),
        distance_method: small_int("f_D"),
        inclination_deg: row.float("Inc"),
        inclination_err_deg: row.float("e_Inc"),
        luminosity_3p6: row.float("L[3.6]"),
        luminosity_3p6_err: row.float("e_L[3.6]"),
        r_eff_kpc: row.float("Reff"),
        sb_eff: row.float("SBeff"),
        r_disk_kpc: row.float("Rdisk"),
        sb_disk: row.float("SBdisk"),
        m_hi: row.float("MHI"),
        r_hi_kpc: row.float("RHI"),
        v_flat: row.float("Vflat"),
        v_flat_err: row.float("e_Vflat"),
        quality,
        references: row.text("Ref").unwrap_or_default().to_string(),
    })
}

/// Parse the SPARC metadata table text.
pub fn parse_sparc_table(text: &str) -> SimplicityResult<Vec<GalaxyMeta>> {
    parse_fixed_width(text, &SPARC_COLUMNS)?
        .iter()
        .map(meta_from_row)
        .collect()
}

pub fn load_sparc_table(path: impl AsRef<Path>) -> SimplicityResult<Vec<GalaxyMeta>> {
    let path = path.as_ref();
    let galaxies = parse_sparc_table(&std::fs::read_to_string(path)?)?;
    info!(path = %path.display(), galaxies = galaxies.len(), "loaded SPARC metadata table");
    Ok(galaxies)
}

/// Canonical form for matching names across files: no spaces, upper case.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn parse_distance_comment(comment: &str) -> Option<f64> {
    let (key, rest) = comment.split_once('=')?;
    if !key.trim().eq_ignore_ascii_case("distance") {
        return None;
    }
    rest.split_whitespace().next()?.parse().ok()
}

/// Parse a `_rotmod.dat` body. Columns: Rad Vobs errV Vgas Vdisk Vbul
/// [SBdisk SBbul].
pub fn parse_rotmod(name: &str, text: &str) -> SimplicityResult<RotationCurve> {
    let mut distance = None;
    let mut points = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some(d) = parse_distance_comment(comment) {
                distance = Some(d);
            }
            continue;
        }
        let values = trimmed
            .split_whitespace()
            .enumerate()
            .map(|(i, tok)| {
                tok.parse::<f64>().map_err(|e| SimplicityError::Parse {
                    line: line_no,
                    column: format!("#{}", i + 1),
                    message: format!("'{tok}': {e}"),
                })
            })
            .collect::<SimplicityResult<Vec<f64>>>()?;
        if values.len() < 6 {
            return Err(SimplicityError::Parse {
                line: line_no,
                column: format!("#{}", values.len() + 1),
                message: format!("expected at least 6 columns, found {}", values.len()),
            });
        }
        points.push(RotationPoint {
            radius_kpc: values[0],
            v_obs: values[1],
            err_v: values[2],
            v_gas: values[3],
            v_disk: values[4],
            v_bul: values[5],
            sb_disk: values.get(6).copied().unwrap_or(0.0),
            sb_bul: values.get(7).copied().unwrap_or(0.0),
        });
    }
    Ok(RotationCurve::new(name, distance, points))
}

/// Galaxy name from a `<Galaxy>_rotmod.dat` path.
pub fn galaxy_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.strip_suffix("_rotmod").unwrap_or(stem).to_string())
}

pub fn load_rotmod(path: impl AsRef<Path>) -> SimplicityResult<RotationCurve> {
    let path = path.as_ref();
    let name = galaxy_name_from_path(path).ok_or_else(|| {
        SimplicityError::InvalidParameter(format!("no galaxy name in path {}", path.display()))
    })?;
    parse_rotmod(&name, &std::fs::read_to_string(path)?)
}

/// Load every `*_rotmod.dat` in `dir`, in file-name order.
pub fn load_rotation_dir(dir: impl AsRef<Path>) -> SimplicityResult<Vec<RotationCurve>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("_rotmod.dat"))
        })
        .collect();
    paths.sort();
    let curves = paths
        .iter()
        .map(load_rotmod)
        .collect::<SimplicityResult<Vec<_>>>()?;
    info!(dir = %dir.display(), curves = curves.len(), "loaded rotation curves");
    Ok(curves)
}
