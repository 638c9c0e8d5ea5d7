// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Vacuum Oscillation Figure
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use plotters::prelude::*;
use simplicity_sim::vacuum::{ModeRun, PulseSnapshot};
use simplicity_types::error::SimplicityResult;
use std::path::Path;

use crate::{axis_max, render_to, DrawResult, CAPTION_FONT};

/// Mode trace of node 0 above, pulse snapshots below.
pub fn render_vacuum(path: &Path, run: &ModeRun, frames: &[PulseSnapshot]) -> SimplicityResult<()> {
    render_to(path, "vacuum oscillation", |p| draw_vacuum(p, run, frames))
}

fn draw_vacuum(path: &Path, run: &ModeRun, frames: &[PulseSnapshot]) -> DrawResult {
    let t_max = run.times.last().copied().unwrap_or(1.0).max(1e-9);
    let amp = axis_max(run.displacement.iter().map(|v| v.abs()), 1.0) * 1.1;
    let nodes = frames.first().map(|f| f.displacement.len()).unwrap_or(1).max(2);
    let pulse_amp = axis_max(frames.iter().flat_map(|f| f.displacement.iter().map(|v| v.abs())), 1.0) * 1.1;

    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let measured = run
        .omega_measured
        .map(|w| format!("{w:.4}"))
        .unwrap_or_else(|| "n/a".to_string());
    let mut top = ChartBuilder::on(&panels[0])
        .caption(
            format!(
                "Mode {}: ω measured {measured}, analytic {:.4}, ΔE/E {:.1e}",
                run.mode, run.omega_analytic, run.relative_energy_drift
            ),
            CAPTION_FONT,
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..t_max, -amp..amp)?;
    top.configure_mesh().x_desc("t").y_desc("u₀").draw()?;
    top.draw_series(LineSeries::new(
        run.times.iter().copied().zip(run.displacement.iter().copied()),
        &BLUE,
    ))?;

    let mut bottom = ChartBuilder::on(&panels[1])
        .caption("Gaussian pulse", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..(nodes - 1) as f64, -pulse_amp..pulse_amp)?;
    bottom.configure_mesh().x_desc("node").y_desc("u").draw()?;
    for (i, frame) in frames.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        bottom
            .draw_series(LineSeries::new(
                frame.displacement.iter().enumerate().map(|(n, u)| (n as f64, *u)),
                &color,
            ))?
            .label(format!("t = {:.1}", frame.time))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    bottom
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
