use anyhow::{bail, Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

use crate::table::{value_counts, Table};

/// Columns rendered as pie charts, in grid order
pub const CATEGORICAL_COLUMNS: [&str; 8] = [
    "gender",
    "nationality",
    "state_program",
    "student_status",
    "academic_standing",
    "payment_status",
    "marital_status",
    "scholarship",
];

const GPA_MEAN: f64 = 3.5;
const GPA_STD: f64 = 0.5;
const GPA_MIN: f64 = 2.0;
const GPA_MAX: f64 = 5.0;
const GPA_BINS: usize = 30;

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);

const SLICE_COLORS: [RGBColor; 10] = [
    RGBColor(91, 132, 177),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

/// Render the full 3x4 summary grid to a PNG image
pub fn render_chart_grid(table: &Table, output: &Path) -> Result<()> {
    if table.is_empty() {
        bail!("table contains no rows, nothing to chart");
    }

    let root = BitMapBackend::new(output, (2400, 1800)).into_drawing_area();
    root.fill(&WHITE)?;
    let cells = root.split_evenly((3, 4));

    for (cell, column) in cells.iter().zip(CATEGORICAL_COLUMNS) {
        draw_pie(cell, table, column)?;
    }
    draw_gpa_density(&cells[8], table)?;
    draw_books_histogram(&cells[9], table)?;

    root.present()
        .with_context(|| format!("failed to write chart image '{}'", output.display()))?;
    info!(
        "rendered {} charts to {}",
        CATEGORICAL_COLUMNS.len() + 2,
        output.display()
    );
    Ok(())
}

fn draw_pie(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &Table,
    column: &str,
) -> Result<()> {
    let values = table.column(column)?;
    let counts = value_counts(&values);
    let total: usize = counts.iter().map(|(_, count)| count).sum();

    let area = area.titled(&format!("Distribution of {column}"), ("sans-serif", 30))?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.30;

    let sizes: Vec<f64> = counts.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = counts
        .iter()
        .map(|(value, count)| {
            format!("{} ({:.1}%)", value, 100.0 * *count as f64 / total as f64)
        })
        .collect();
    let colors: Vec<RGBColor> = (0..counts.len())
        .map(|slice| SLICE_COLORS[slice % SLICE_COLORS.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
    pie.label_offset(14.0);
    area.draw(&pie)?;
    Ok(())
}

fn draw_gpa_density(area: &DrawingArea<BitMapBackend<'_>, Shift>, table: &Table) -> Result<()> {
    let values = table.numeric_column("GPA")?;
    let bin_width = (GPA_MAX - GPA_MIN) / GPA_BINS as f64;

    let mut counts = [0usize; GPA_BINS];
    for value in &values {
        let bin = (((value - GPA_MIN) / bin_width) as usize).min(GPA_BINS - 1);
        counts[bin] += 1;
    }
    let sample_count = values.len() as f64;
    let densities: Vec<f64> = counts
        .iter()
        .map(|count| *count as f64 / (sample_count * bin_width))
        .collect();

    let pdf_peak = normal_pdf(GPA_MEAN, GPA_MEAN, GPA_STD);
    let y_max = densities.iter().copied().fold(pdf_peak, f64::max) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Distribution of GPA", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(GPA_MIN..GPA_MAX, 0.0..y_max)?;
    chart
        .configure_mesh()
        .x_desc("GPA")
        .y_desc("Density")
        .draw()?;

    chart.draw_series(densities.iter().enumerate().map(|(bin, density)| {
        let x0 = GPA_MIN + bin as f64 * bin_width;
        Rectangle::new([(x0, 0.0), (x0 + bin_width, *density)], SKYBLUE.mix(0.8).filled())
    }))?;

    chart
        .draw_series(LineSeries::new(
            (0..=200).map(|step| {
                let x = GPA_MIN + (GPA_MAX - GPA_MIN) * step as f64 / 200.0;
                (x, normal_pdf(x, GPA_MEAN, GPA_STD))
            }),
            RED.stroke_width(2),
        ))?
        .label("Theoretical Normal (μ=3.5, σ=0.5)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], RED.stroke_width(2)));
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_books_histogram(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    table: &Table,
) -> Result<()> {
    let values: Vec<u32> = table
        .numeric_column("library_books_borrowed")?
        .into_iter()
        .map(|value| value as u32)
        .collect();
    let max_books = values.iter().copied().max().unwrap_or(0);

    let mut counts = vec![0u32; max_books as usize + 1];
    for value in &values {
        counts[*value as usize] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1) * 11 / 10 + 1;

    let mut chart = ChartBuilder::on(area)
        .caption("Distribution of library_books_borrowed", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((0u32..max_books + 2).into_segmented(), 0u32..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("library_books_borrowed")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(SKYBLUE.filled())
            .margin(3)
            .data(values.iter().map(|value| (*value, 1u32))),
    )?;
    Ok(())
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_pdf_peaks_at_the_mean() {
        let peak = normal_pdf(GPA_MEAN, GPA_MEAN, GPA_STD);
        assert!(peak > normal_pdf(GPA_MEAN + 0.5, GPA_MEAN, GPA_STD));
        assert!(peak > normal_pdf(GPA_MEAN - 0.5, GPA_MEAN, GPA_STD));
        assert!((peak - 0.7978845608).abs() < 1e-6);
    }

    #[test]
    fn chart_columns_cover_the_grid() {
        assert_eq!(CATEGORICAL_COLUMNS.len() + 2, 10);
    }
}
