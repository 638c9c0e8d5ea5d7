// ─────────────────────────────────────────────────────────────────────
// Simplicity Toolkit — Rotation Curve Figure
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two panels per galaxy: velocities on top, surface density and the
//! Square-Rule fraction below.

use plotters::prelude::*;
use simplicity_astro::square_rule::SquareRuleFit;
use simplicity_types::error::SimplicityResult;
use std::path::Path;

use crate::{axis_max, render_to, DrawResult, CAPTION_FONT};

const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);

pub fn render_rotation_curve(path: &Path, fit: &SquareRuleFit, sigma_star: f64) -> SimplicityResult<()> {
    render_to(path, "rotation curve", |p| draw_rotation_curve(p, fit, sigma_star))
}

fn draw_rotation_curve(path: &Path, fit: &SquareRuleFit, sigma_star: f64) -> DrawResult {
    let r_max = axis_max(fit.radius_kpc.iter().copied(), 1.0) * 1.05;
    let v_max = axis_max(
        fit.v_obs
            .iter()
            .zip(fit.err_v.iter())
            .map(|(v, e)| v + e.abs())
            .chain(fit.v_pred.iter().copied())
            .chain(fit.v_bar.iter().copied()),
        1.0,
    ) * 1.15;
    let sigma_max = axis_max(fit.sigma.iter().copied(), sigma_star).max(sigma_star) * 1.1;

    let root = SVGBackend::new(path, (900, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    let mut top = ChartBuilder::on(&panels[0])
        .caption(
            format!("{}: RMS {:.1} km/s, χ²ν {:.2}", fit.name, fit.rms_kms, fit.chi2_reduced),
            CAPTION_FONT,
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..r_max, 0.0..v_max)?;

    top.configure_mesh()
        .x_desc("R [kpc]")
        .y_desc("V [km/s]")
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    let r = &fit.radius_kpc;
    top.draw_series(
        r.iter()
            .zip(fit.v_obs.iter())
            .zip(fit.err_v.iter())
            .map(|((x, v), e)| ErrorBar::new_vertical(*x, v - e.abs(), *v, v + e.abs(), BLACK.filled(), 6)),
    )?
    .label("V_obs")
    .legend(|(x, y)| Circle::new((x + 10, y), 3, BLACK.filled()));

    top.draw_series(LineSeries::new(
        r.iter().copied().zip(fit.v_bar.iter().copied()),
        DARK_GREEN.stroke_width(2),
    ))?
    .label("V_bar")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_GREEN.stroke_width(2)));

    top.draw_series(LineSeries::new(
        r.iter().copied().zip(fit.v_pred.iter().copied()),
        RED.stroke_width(2),
    ))?
    .label("V_pred (Square-Rule)")
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    top.configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let mut bottom = ChartBuilder::on(&panels[1])
        .caption(format!("<f> = {:.2}", fit.mean_fraction), CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0.0..r_max, 0.0..sigma_max)?
        .set_secondary_coord(0.0..r_max, 0.0..1.05);

    bottom
        .configure_mesh()
        .x_desc("R [kpc]")
        .y_desc("Σ [M☉/pc²]")
        .light_line_style(BLACK.mix(0.08))
        .draw()?;
    bottom.configure_secondary_axes().y_desc("f").draw()?;

    bottom
        .draw_series(LineSeries::new(
            r.iter().copied().zip(fit.sigma.iter().copied()),
            BLUE.stroke_width(2),
        ))?
        .label("Σ(r)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    bottom
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, sigma_star), (r_max, sigma_star)],
            BLUE.mix(0.4),
        )))?
        .label(format!("Σ* = {sigma_star:.0}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.mix(0.4)));

    bottom
        .draw_secondary_series(LineSeries::new(
            r.iter().copied().zip(fit.fraction.iter().copied()),
            MAGENTA.stroke_width(2),
        ))?
        .label("f(r)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAGENTA.stroke_width(2)));

    bottom
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
