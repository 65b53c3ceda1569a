mod charts;
mod tables;

pub use charts::{
    draw_product_performance, draw_regional_pie, draw_sales_trend, generate_charts, slice_color,
    trend_points, ChartPaths, PRODUCT_CHART_FILE, REGION_CHART_FILE, REGION_PALETTE,
    TREND_CHART_FILE,
};
pub use tables::{
    format_chart_paths, print_chart_paths,
    format_cleaning_report, print_cleaning_report,
    format_load_summary, print_load_summary,
    format_metrics, print_metrics,
};
