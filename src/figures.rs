//! Paper figures: torso movement against trial outcome measures.
//!
//! Both figures consume the cleaned response-displacement file (missing
//! rows already dropped) and render a raster scatter plot sized for a
//! 300 dpi print. The displacement axis is clipped so a handful of large
//! tracking glitches do not flatten the bulk of the data.

use std::path::Path;

use plotters::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::config::FigureConfig;
use crate::core::align::{correct_to_value, RESPONSE_CORRECT, RESPONSE_REACTION_TIME};
use crate::core::joint::Joint;
use crate::data::csv::Table;
use crate::error::{Error, Result};

/// Fixed jitter seed so re-rendering the figure reproduces the paper.
const JITTER_SEED: u64 = 0x5EED;
const JITTER_SIGMA: f64 = 0.03;

struct ResponsePoint {
    torso: f64,
    reaction_time: Option<f64>,
    correct: f64,
}

fn response_points(table: &Table) -> Result<Vec<ResponsePoint>> {
    let torso_col = table.require_column(&Joint::Torso.displacement_column())?;
    let rt_col = table.require_column(RESPONSE_REACTION_TIME)?;
    let correct_col = table.require_column(RESPONSE_CORRECT)?;

    let mut points = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let torso = match table.f64_at(row, torso_col) {
            Some(v) => v,
            None => continue,
        };
        let correct = match correct_to_value(table.value(row, correct_col)) {
            Some(v) => v,
            None => continue,
        };
        points.push(ResponsePoint {
            torso,
            reaction_time: table.f64_at(row, rt_col),
            correct,
        });
    }
    Ok(points)
}

/// Torso displacement vs. reaction time, styled by response correctness:
/// incorrect responses draw as large triangles, correct ones as small
/// circles.
pub fn render_reaction_time_figure(
    table: &Table,
    out_path: &Path,
    cfg: &FigureConfig,
) -> Result<()> {
    let points = response_points(table)?;
    let x_max = cfg.x_max;

    let y_max = points
        .iter()
        .filter_map(|p| p.reaction_time)
        .fold(0.0f64, f64::max)
        .max(0.1)
        * 1.05;

    let draw = || -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root =
            BitMapBackend::new(out_path, (cfg.width_px, cfg.height_px)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Average Joint Movement (torso joint)")
            .y_desc("reaction time (sec)")
            .draw()?;

        let incorrect = points
            .iter()
            .filter(|p| p.correct == 0.0)
            .filter_map(|p| p.reaction_time.map(|rt| (p.torso, rt)))
            .filter(|(x, _)| *x <= x_max);
        chart
            .draw_series(incorrect.map(|(x, y)| TriangleMarker::new((x, y), 7, RED.mix(0.5))))?
            .label("no")
            .legend(|(x, y)| TriangleMarker::new((x, y), 7, RED));

        let correct = points
            .iter()
            .filter(|p| p.correct == 1.0)
            .filter_map(|p| p.reaction_time.map(|rt| (p.torso, rt)))
            .filter(|(x, _)| *x <= x_max);
        chart
            .draw_series(correct.map(|(x, y)| Circle::new((x, y), 3, BLUE.mix(0.5).filled())))?
            .label("yes")
            .legend(|(x, y)| Circle::new((x, y), 3, BLUE.filled()));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    };
    draw().map_err(|e| Error::Render(e.to_string()))?;

    info!(path = %out_path.display(), "saved reaction time figure");
    Ok(())
}

/// Torso displacement vs. response correctness. The binary outcome is
/// jittered vertically so overlapping trials stay visible.
pub fn render_response_figure(table: &Table, out_path: &Path, cfg: &FigureConfig) -> Result<()> {
    let points = response_points(table)?;
    let x_max = cfg.x_max;

    let mut rng = StdRng::seed_from_u64(JITTER_SEED);
    let jittered: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.torso <= x_max)
        .map(|p| (p.torso, p.correct + JITTER_SIGMA * gaussian(&mut rng)))
        .collect();

    let draw = || -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root =
            BitMapBackend::new(out_path, (cfg.width_px, cfg.height_px)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..x_max, -0.2..1.2)?;

        chart
            .configure_mesh()
            .x_desc("Average Joint Movement (torso joint)")
            .y_desc("response correct")
            .y_labels(8)
            .y_label_formatter(&|y: &f64| {
                if (y - 0.0).abs() < 0.02 {
                    "no".to_string()
                } else if (y - 1.0).abs() < 0.02 {
                    "yes".to_string()
                } else {
                    String::new()
                }
            })
            .draw()?;

        chart.draw_series(
            jittered
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.25).filled())),
        )?;

        root.present()?;
        Ok(())
    };
    draw().map_err(|e| Error::Render(e.to_string()))?;

    info!(path = %out_path.display(), "saved response figure");
    Ok(())
}

/// Standard normal draw via Box-Muller.
fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-12);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
