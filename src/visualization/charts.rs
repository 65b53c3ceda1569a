use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Month;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use crate::analysis::{product_summary, GroupTotal, ProductSummary, SalesMetrics};
use crate::config::MonthSelection;
use crate::error::SalesError;
use crate::models::SalesTable;
use crate::report::format_number;

pub const PRODUCT_CHART_FILE: &str = "chart_product_performance.svg";
pub const REGION_CHART_FILE: &str = "chart_regional_sales.svg";
pub const TREND_CHART_FILE: &str = "chart_sales_trend.svg";

/// Pie slice colors, reused in order when there are more regions than colors.
pub const REGION_PALETTE: [RGBColor; 4] = [
    RGBColor(0xFF, 0x99, 0x99),
    RGBColor(0x66, 0xB2, 0xFF),
    RGBColor(0x99, 0xFF, 0x99),
    RGBColor(0xFF, 0xCC, 0x99),
];

const SKY_BLUE: RGBColor = RGBColor(0x87, 0xCE, 0xEB);
const LIGHT_GREEN: RGBColor = RGBColor(0x90, 0xEE, 0x90);
const TREND_PURPLE: RGBColor = RGBColor(0x80, 0x00, 0x80);

/// Months the legacy trend chart is limited to.
const LEGACY_MONTHS: [Month; 4] = [Month::January, Month::February, Month::March, Month::April];

/// Files written by [`generate_charts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPaths {
    pub product_performance: PathBuf,
    pub regional_sales: PathBuf,
    pub sales_trend: PathBuf,
}

impl ChartPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            product_performance: dir.join(PRODUCT_CHART_FILE),
            regional_sales: dir.join(REGION_CHART_FILE),
            sales_trend: dir.join(TREND_CHART_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [
            self.product_performance.as_path(),
            self.regional_sales.as_path(),
            self.sales_trend.as_path(),
        ]
    }
}

fn chart_err<E: std::fmt::Display>(e: E) -> SalesError {
    SalesError::Chart(e.to_string())
}

/// Color of the `index`-th pie slice.
pub fn slice_color(index: usize) -> RGBColor {
    REGION_PALETTE[index % REGION_PALETTE.len()]
}

/// Monthly revenue points for the trend chart, in calendar order.
///
/// Month keys that are not month names are skipped. With
/// [`MonthSelection::Legacy`] only January to April are kept.
pub fn trend_points(monthly_sales: &[GroupTotal], selection: MonthSelection) -> Vec<(Month, f64)> {
    let mut points: Vec<(Month, f64)> = monthly_sales
        .iter()
        .filter_map(|g| Month::from_str(&g.key).ok().map(|m| (m, g.total)))
        .filter(|(m, _)| match selection {
            MonthSelection::Present => true,
            MonthSelection::Legacy => LEGACY_MONTHS.contains(m),
        })
        .collect();
    points.sort_by_key(|(m, _)| m.number_from_month());
    points
}

fn value_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let top = if hi > 0.0 { hi * 1.1 } else { 1.0 };
    lo..top
}

fn draw_bar_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: &str,
    y_desc: &str,
    labels: &[&str],
    values: &[f64],
    color: RGBColor,
) -> Result<(), SalesError> {
    let n = values.len().max(1) as u32;
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(100)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..n).into_segmented(), value_range(values.iter().copied()))
        .map_err(chart_err)?;

    let x_fmt = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default(),
        _ => String::new(),
    };
    let y_fmt = |v: &f64| format_number(*v, 0);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() + 1)
        .x_label_formatter(&x_fmt)
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&y_fmt)
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let i = i as u32;
            Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
                color.filled(),
            )
        }))
        .map_err(chart_err)?;

    Ok(())
}

/// Two panels side by side: units sold and revenue per product, both ordered by revenue.
pub fn draw_product_performance(path: &Path, products: &[ProductSummary]) -> Result<(), SalesError> {
    let root = SVGBackend::new(path, (1200, 650)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let (left, right) = root.split_horizontally(600);

    let labels: Vec<&str> = products.iter().map(|p| p.product.as_str()).collect();
    let quantities: Vec<f64> = products.iter().map(|p| p.quantity).collect();
    let revenues: Vec<f64> = products.iter().map(|p| p.revenue).collect();

    draw_bar_panel(&left, "Products by Quantity Sold", "Units Sold", &labels, &quantities, SKY_BLUE)?;
    draw_bar_panel(&right, "Products by Revenue", "Revenue", &labels, &revenues, LIGHT_GREEN)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

fn arc_point(center: (i32, i32), radius: f64, degrees: f64) -> (i32, i32) {
    let rad = degrees * PI / 180.0;
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Pie chart of revenue share per region, starting at 12 o'clock and running counter-clockwise.
pub fn draw_regional_pie(path: &Path, regions: &[GroupTotal]) -> Result<(), SalesError> {
    let root = SVGBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let area = root
        .titled("Sales Distribution by Region", ("sans-serif", 28))
        .map_err(chart_err)?;

    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.35;

    // Slices cannot represent negative revenue.
    let slices: Vec<&GroupTotal> = regions.iter().filter(|g| g.total > 0.0).collect();
    let total: f64 = slices.iter().map(|g| g.total).sum();

    if total <= 0.0 {
        area.draw(&Text::new(
            "No revenue to display",
            (center.0 - 100, center.1),
            ("sans-serif", 20),
        ))
        .map_err(chart_err)?;
        root.present().map_err(chart_err)?;
        return Ok(());
    }

    let mut start = 90.0_f64;
    for (i, region) in slices.iter().enumerate() {
        let share = region.total / total;
        let sweep = share * 360.0;
        let steps = sweep.ceil().max(1.0) as usize;

        let mut points = vec![center];
        points.extend((0..=steps).map(|s| arc_point(center, radius, start + sweep * s as f64 / steps as f64)));
        area.draw(&Polygon::new(points, slice_color(i).filled()))
            .map_err(chart_err)?;

        let mid = start + sweep / 2.0;
        let anchor = if mid.to_radians().cos() >= 0.0 { HPos::Left } else { HPos::Right };
        let style = TextStyle::from(("sans-serif", 18).into_font()).pos(Pos::new(anchor, VPos::Center));
        area.draw(&Text::new(
            format!("{} ({:.1}%)", region.key, share * 100.0),
            arc_point(center, radius * 1.1, mid),
            style,
        ))
        .map_err(chart_err)?;

        start += sweep;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Line chart of revenue per month in calendar order.
pub fn draw_sales_trend(path: &Path, points: &[(Month, f64)]) -> Result<(), SalesError> {
    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = points.len().max(1) as u32;
    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Sales Trend", ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d((0u32..n).into_segmented(), value_range(points.iter().map(|(_, v)| *v)))
        .map_err(chart_err)?;

    let x_fmt = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => points
            .get(*i as usize)
            .map(|(m, _)| m.name().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let y_fmt = |v: &f64| format_number(*v, 0);

    chart
        .configure_mesh()
        .x_labels(points.len() + 1)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .bold_line_style(BLACK.mix(0.3).stroke_width(1))
        .x_desc("Month")
        .y_desc("Revenue")
        .draw()
        .map_err(chart_err)?;

    let coords: Vec<(SegmentValue<u32>, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (SegmentValue::CenterOf(i as u32), *v))
        .collect();

    chart
        .draw_series(LineSeries::new(coords.clone(), TREND_PURPLE.stroke_width(2)))
        .map_err(chart_err)?;
    chart
        .draw_series(coords.into_iter().map(|c| Circle::new(c, 5, TREND_PURPLE.filled())))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Render all three charts into `output_dir`, creating it if needed.
pub fn generate_charts(
    table: &SalesTable,
    metrics: &SalesMetrics,
    output_dir: &Path,
    selection: MonthSelection,
) -> Result<ChartPaths, SalesError> {
    std::fs::create_dir_all(output_dir)?;
    let paths = ChartPaths::in_dir(output_dir);

    draw_product_performance(&paths.product_performance, &product_summary(table))?;
    tracing::info!(path = %paths.product_performance.display(), "saved product performance chart");

    draw_regional_pie(&paths.regional_sales, &metrics.regional_sales)?;
    tracing::info!(path = %paths.regional_sales.display(), "saved regional sales chart");

    let points = trend_points(&metrics.monthly_sales, selection);
    if points.len() < metrics.monthly_sales.len() {
        tracing::debug!(
            plotted = points.len(),
            months = metrics.monthly_sales.len(),
            "trend chart omits months outside the selection"
        );
    }
    draw_sales_trend(&paths.sales_trend, &points)?;
    tracing::info!(path = %paths.sales_trend.display(), "saved monthly trend chart");

    Ok(paths)
}
