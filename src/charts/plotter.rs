//! Chart Plotter Module
//! Draws the dashboard charts with plotters into an RGB bitmap and encodes it as PNG.

use super::{ChartBackend, ChartKind, ImageBytes, RenderError};
use crate::data::{Category, CategoryTally, RegionRecord};
use image::{ImageFormat, RgbImage};
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::io::Cursor;

type DrawResult = Result<(), Box<dyn Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub const PINK: RGBColor = RGBColor(0xff, 0x6f, 0x91);
pub const SOFT_BLUE: RGBColor = RGBColor(0x4d, 0x96, 0xff);
pub const PURPLE: RGBColor = RGBColor(0x84, 0x5e, 0xc2);
const MUTED: RGBColor = RGBColor(120, 120, 120);

const CASES_LABEL: &str = "Jumlah Penderita DM";
const YEAR_LABEL: &str = "Tahun";
const FONT: &str = "sans-serif";

/// Pixel sizes (width, height).
const BAR_SIZE: (u32, u32) = (800, 400);
const LINE_SIZE: (u32, u32) = (600, 400);
const PIE_SIZE: (u32, u32) = (400, 400);

/// Slice color for a bucket.
pub fn category_color(category: Category) -> RGBColor {
    match category {
        Category::Medium => SOFT_BLUE,
        Category::High => PINK,
        Category::Low => PURPLE,
    }
}

/// Percentage label with one decimal, e.g. `"33.3%"`.
pub fn percent_label(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Renders charts with plotters' bitmap backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersBackend;

impl PlottersBackend {
    fn size_of(kind: ChartKind) -> (u32, u32) {
        match kind {
            ChartKind::Bar => BAR_SIZE,
            ChartKind::Line => LINE_SIZE,
            ChartKind::Pie => PIE_SIZE,
        }
    }

    fn draw<F>(kind: ChartKind, paint: F) -> Result<ImageBytes, RenderError>
    where
        F: FnOnce(&Area<'_>) -> DrawResult,
    {
        let (width, height) = Self::size_of(kind);
        let mut buf = vec![0u8; (width * height * 3) as usize];

        paint_into(&mut buf, (width, height), paint).map_err(|e| RenderError::Draw {
            chart: kind,
            message: e.to_string(),
        })?;

        let img = RgbImage::from_raw(width, height, buf).ok_or_else(|| RenderError::Draw {
            chart: kind,
            message: "bitmap buffer does not match image size".to_string(),
        })?;

        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png)
            .map_err(|source| RenderError::Encode { chart: kind, source })?;
        Ok(png.into_inner())
    }
}

impl ChartBackend for PlottersBackend {
    fn render_bar(&self, ranked: &[RegionRecord], title: &str) -> Result<ImageBytes, RenderError> {
        Self::draw(ChartKind::Bar, |root| paint_bar(root, ranked, title))
    }

    fn render_line(&self, totals: &[(i64, i64)], title: &str) -> Result<ImageBytes, RenderError> {
        Self::draw(ChartKind::Line, |root| paint_line(root, totals, title))
    }

    fn render_pie(&self, tally: &CategoryTally, title: &str) -> Result<ImageBytes, RenderError> {
        Self::draw(ChartKind::Pie, |root| paint_pie(root, tally, title))
    }

    fn render_placeholder(
        &self,
        kind: ChartKind,
        title: &str,
        message: &str,
    ) -> Result<ImageBytes, RenderError> {
        Self::draw(kind, |root| paint_placeholder(root, title, message))
    }
}

fn paint_into<F>(buf: &mut [u8], size: (u32, u32), paint: F) -> DrawResult
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
    root.fill(&WHITE)?;
    paint(&root)?;
    root.present()?;
    Ok(())
}

fn paint_bar(root: &Area<'_>, ranked: &[RegionRecord], title: &str) -> DrawResult {
    let n = ranked.len() as u32;
    let x_max = ranked.iter().map(|r| r.cases).max().unwrap_or(0).max(1) as f64 * 1.1;

    // Rank 0 is drawn in the top slot.
    let slot_of = |rank: usize| n - 1 - rank as u32;
    let region_label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(slot) if *slot < n => ranked[(n - 1 - *slot) as usize].region.clone(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 18))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(190)
        .build_cartesian_2d(0f64..x_max, (0u32..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(ranked.len())
        .y_label_formatter(&region_label)
        .x_label_formatter(&|v: &f64| format!("{:.0}", v))
        .x_desc(CASES_LABEL)
        .draw()?;

    chart.draw_series(ranked.iter().enumerate().map(|(rank, r)| {
        let slot = slot_of(rank);
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot)),
                (r.cases as f64, SegmentValue::Exact(slot + 1)),
            ],
            PINK.filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        bar
    }))?;

    Ok(())
}

fn paint_line(root: &Area<'_>, totals: &[(i64, i64)], title: &str) -> DrawResult {
    let first = totals.first().map(|&(year, _)| year).unwrap_or(0);
    let last = totals.last().map(|&(year, _)| year).unwrap_or(0);
    let x_range = if first < last {
        first..last
    } else {
        (first - 1)..(last + 1)
    };
    let y_max = totals.iter().map(|&(_, t)| t).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 18))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(totals.len().max(2))
        .x_label_formatter(&|year: &i64| year.to_string())
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .x_desc(YEAR_LABEL)
        .y_desc(CASES_LABEL)
        .draw()?;

    let points: Vec<(i64, f64)> = totals.iter().map(|&(year, t)| (year, t as f64)).collect();
    chart.draw_series(LineSeries::new(points.clone(), SOFT_BLUE.stroke_width(3)))?;
    chart.draw_series(points.into_iter().map(|p| Circle::new(p, 5, SOFT_BLUE.filled())))?;

    Ok(())
}

fn paint_pie(root: &Area<'_>, tally: &CategoryTally, title: &str) -> DrawResult {
    let area = root.titled(title, (FONT, 18))?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.32;
    let total = tally.total() as f64;

    let label_style =
        TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    // Counter-clockwise from 12 o'clock.
    let mut start = 90.0_f64;
    for (category, count) in tally.non_empty() {
        let fraction = count as f64 / total;
        let sweep = 360.0 * fraction;
        let mid = start + sweep / 2.0;

        area.draw(&Polygon::new(
            wedge(center, radius, start, sweep),
            category_color(category).filled(),
        ))?;
        area.draw(&Text::new(
            category.label().to_string(),
            polar(center, radius * 1.2, mid),
            label_style.clone(),
        ))?;
        area.draw(&Text::new(
            percent_label(fraction),
            polar(center, radius * 0.6, mid),
            label_style.clone(),
        ))?;

        start += sweep;
    }

    Ok(())
}

fn paint_placeholder(root: &Area<'_>, title: &str, message: &str) -> DrawResult {
    let area = root.titled(title, (FONT, 18))?;
    let (width, height) = area.dim_in_pixel();
    let style = TextStyle::from((FONT, 16).into_font())
        .color(&MUTED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        message.to_string(),
        (width as i32 / 2, height as i32 / 2),
        style,
    ))?;
    Ok(())
}

/// Pixel position at `degrees` (counter-clockwise from 3 o'clock) on a circle.
fn polar(center: (i32, i32), r: f64, degrees: f64) -> (i32, i32) {
    let a = degrees.to_radians();
    (
        center.0 + (r * a.cos()).round() as i32,
        center.1 - (r * a.sin()).round() as i32,
    )
}

/// Closed outline of a pie slice: center, then the arc at ~2 degree steps.
fn wedge(center: (i32, i32), r: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / 2.0).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        points.push(polar(center, r, start + sweep * step as f64 / steps as f64));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn assert_png(bytes: &[u8], size: (u32, u32)) {
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png).unwrap();
        assert_eq!(img.dimensions(), size);
    }

    #[test]
    fn renders_every_chart_as_png() {
        let backend = PlottersBackend;
        let ranked = vec![
            RegionRecord::new("KABUPATEN BOGOR", 2019, 75_000),
            RegionRecord::new("KOTA BANDUNG", 2019, 50_000),
            RegionRecord::new("KOTA BANJAR", 2019, 10_000),
        ];
        let mut tally = CategoryTally::default();
        tally.add(Category::High);
        tally.add(Category::Medium);
        tally.add(Category::Medium);

        let bar = backend.render_bar(&ranked, "Top 3").unwrap();
        assert_png(&bar, BAR_SIZE);

        let line = backend
            .render_line(&[(2018, 60_000), (2019, 135_000), (2020, 52_000)], "Total")
            .unwrap();
        assert_png(&line, LINE_SIZE);

        let pie = backend.render_pie(&tally, "Proporsi").unwrap();
        assert_png(&pie, PIE_SIZE);
    }

    #[test]
    fn placeholder_and_single_year_keep_chart_sizes() {
        let backend = PlottersBackend;
        for kind in ChartKind::ALL {
            let bytes = backend.render_placeholder(kind, "Kosong", "Tidak ada data").unwrap();
            assert_png(&bytes, PlottersBackend::size_of(kind));
        }

        let line = backend.render_line(&[(2019, 10)], "Total").unwrap();
        assert_png(&line, LINE_SIZE);
    }

    #[test]
    fn percent_labels_have_one_decimal() {
        assert_eq!(percent_label(1.0 / 3.0), "33.3%");
        assert_eq!(percent_label(0.625), "62.5%");
        assert_eq!(percent_label(1.0), "100.0%");
    }

    #[test]
    fn bucket_colors_are_fixed() {
        assert_eq!(category_color(Category::Medium), SOFT_BLUE);
        assert_eq!(category_color(Category::High), PINK);
        assert_eq!(category_color(Category::Low), PURPLE);
    }

    #[test]
    fn polar_uses_screen_coordinates() {
        assert_eq!(polar((100, 100), 50.0, 90.0), (100, 50));
        assert_eq!(polar((100, 100), 50.0, 180.0), (50, 100));
    }

    #[test]
    fn wedge_spans_the_sweep() {
        let points = wedge((0, 0), 10.0, 90.0, 90.0);
        assert_eq!(points[0], (0, 0));
        assert_eq!(points[1], (0, -10));
        assert_eq!(*points.last().unwrap(), (-10, 0));
        assert_eq!(points.len(), 45 + 2);
    }
}
