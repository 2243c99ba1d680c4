//! Line chart rendering.
//!
//! Draws into an in-memory RGB buffer with plotters and PNG-encodes it with
//! the image crate; no temporary files.

use plotters::prelude::*;
use std::io::Cursor;

use crate::errors::AppError;

const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 480;

fn draw_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::InternalError(format!("chart rendering failed: {}", e))
}

/// Axis range with a little headroom so the line never hugs the frame.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &v| (min.min(v), max.max(v)),
    );
    let pad = if (max - min).abs() > 1e-6 {
        (max - min) * 0.1
    } else {
        1.0
    };
    (min - pad, max + pad)
}

/// Render a single line plot connecting (x, y) pairs in the given order.
///
/// Returns encoded PNG bytes. Mismatched or empty series are errors.
pub fn render_chart(
    xs: &[f64],
    ys: &[f64],
    x_label: &str,
    y_label: &str,
) -> Result<Vec<u8>, AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::InternalError(format!(
            "series length mismatch: {} x values vs {} y values",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(AppError::InternalError(
            "cannot chart an empty series".to_string(),
        ));
    }

    let (x_min, x_max) = padded_range(xs);
    let (y_min, y_max) = padded_range(ys);

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(42)
            .y_label_area_size(52)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .light_line_style(BLACK.mix(0.15))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(
                xs.iter().copied().zip(ys.iter().copied()),
                &BLUE,
            ))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer)
        .ok_or_else(|| AppError::InternalError("chart buffer size mismatch".to_string()))?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| AppError::InternalError(format!("PNG encoding failed: {}", e)))?;

    Ok(png)
}
