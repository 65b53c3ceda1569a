use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SalesError;
use crate::models::SalesTable;

use super::grouping::{first_max, group_sum, sort_descending, GroupTotal};

/// Headline metrics of a cleaned sales table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    /// Sum of `Total_Sales` over all records
    pub total_sales: f64,
    /// Product with the largest summed quantity
    pub best_product: String,
    pub best_product_qty: f64,
    /// Mean of `Total_Sales` over all records
    pub avg_transaction: f64,
    /// Revenue per region, largest first
    pub regional_sales: Vec<GroupTotal>,
    /// Revenue per month name, in the order months first appear in the table
    pub monthly_sales: Vec<GroupTotal>,
}

impl SalesMetrics {
    /// Each region's share of total revenue, in percent, in `regional_sales` order.
    pub fn region_shares(&self) -> Vec<(&str, f64)> {
        self.regional_sales
            .iter()
            .map(|g| {
                let pct = if self.total_sales != 0.0 {
                    (g.total / self.total_sales) * 100.0
                } else {
                    0.0
                };
                (g.key.as_str(), pct)
            })
            .collect()
    }
}

/// Units and revenue for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product: String,
    pub quantity: f64,
    pub revenue: f64,
}

/// Compute the headline metrics. The table must be cleaned and non-empty.
pub fn compute_sales_metrics(table: &SalesTable) -> Result<SalesMetrics, SalesError> {
    if table.is_empty() {
        return Err(SalesError::InsufficientData(
            "cannot compute metrics on an empty table".to_string(),
        ));
    }
    let records = &table.records;

    let total_sales: f64 = records.iter().map(|r| r.total_sales).sum();

    let product_qty = group_sum(records, |r| r.product.as_deref(), |r| r.quantity);
    let best = first_max(&product_qty).ok_or_else(|| {
        SalesError::InsufficientData("no record names a product".to_string())
    })?;
    let (best_product, best_product_qty) = (best.key.clone(), best.total);

    let avg_transaction = total_sales / records.len() as f64;

    let mut regional_sales = group_sum(records, |r| r.region.as_deref(), |r| r.total_sales);
    sort_descending(&mut regional_sales);

    let monthly_sales = group_sum(records, |r| r.month_name(), |r| r.total_sales);

    tracing::debug!(
        total_sales,
        best_product = %best_product,
        regions = regional_sales.len(),
        months = monthly_sales.len(),
        "computed sales metrics"
    );

    Ok(SalesMetrics {
        total_sales,
        best_product,
        best_product_qty,
        avg_transaction,
        regional_sales,
        monthly_sales,
    })
}

/// Units sold and revenue per product, highest revenue first.
pub fn product_summary(table: &SalesTable) -> Vec<ProductSummary> {
    let mut products: IndexMap<&str, (f64, f64)> = IndexMap::new();
    for record in &table.records {
        if let Some(product) = record.product.as_deref() {
            let entry = products.entry(product).or_insert((0.0, 0.0));
            entry.0 += record.quantity;
            entry.1 += record.total_sales;
        }
    }

    let mut summary: Vec<ProductSummary> = products
        .into_iter()
        .map(|(product, (quantity, revenue))| ProductSummary {
            product: product.to_string(),
            quantity,
            revenue,
        })
        .collect();
    summary.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;

    use crate::analysis::cleaning::month_of;
    use crate::models::SalesRecord;

    fn record(date: (i32, u32, u32), product: &str, region: &str, qty: f64, price: f64) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        SalesRecord {
            date: Some(date),
            product: Some(product.to_string()),
            region: Some(region.to_string()),
            quantity: qty,
            price,
            total_sales: qty * price,
            month: Some(month_of(date)),
        }
    }

    fn sample_table() -> SalesTable {
        SalesTable {
            name: "metrics".to_string(),
            columns: Vec::new(),
            records: vec![
                record((2024, 2, 3), "Laptop", "North", 2.0, 500.0),
                record((2024, 1, 10), "Phone", "South", 5.0, 200.0),
                record((2024, 1, 20), "Laptop", "South", 1.0, 500.0),
                record((2024, 3, 2), "Cable", "East", 10.0, 10.0),
            ],
        }
    }

    #[test]
    fn test_total_and_average() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        assert_approx_eq!(metrics.total_sales, 2600.0);
        assert_approx_eq!(metrics.avg_transaction, 650.0);
    }

    #[test]
    fn test_best_product_by_quantity() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        assert_eq!(metrics.best_product, "Cable");
        assert_approx_eq!(metrics.best_product_qty, 10.0);
    }

    #[test]
    fn test_best_product_tie_goes_to_first_seen() {
        let table = SalesTable {
            name: "tie".to_string(),
            columns: Vec::new(),
            records: vec![
                record((2024, 1, 1), "Phone", "North", 3.0, 1.0),
                record((2024, 1, 2), "Laptop", "North", 3.0, 1.0),
            ],
        };
        let metrics = compute_sales_metrics(&table).unwrap();
        assert_eq!(metrics.best_product, "Phone");
    }

    #[test]
    fn test_regional_sales_sorted_descending() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        let regions: Vec<(&str, f64)> = metrics
            .regional_sales
            .iter()
            .map(|g| (g.key.as_str(), g.total))
            .collect();
        assert_eq!(regions, vec![("South", 1500.0), ("North", 1000.0), ("East", 100.0)]);
    }

    #[test]
    fn test_monthly_sales_in_encounter_order() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        let months: Vec<(&str, f64)> = metrics
            .monthly_sales
            .iter()
            .map(|g| (g.key.as_str(), g.total))
            .collect();
        assert_eq!(
            months,
            vec![("February", 1000.0), ("January", 1500.0), ("March", 100.0)]
        );
    }

    #[test]
    fn test_undated_record_counts_toward_total_only() {
        let mut table = sample_table();
        table.records[3].date = None;
        table.records[3].month = None;
        let metrics = compute_sales_metrics(&table).unwrap();
        assert_approx_eq!(metrics.total_sales, 2600.0);
        assert_approx_eq!(metrics.avg_transaction, 650.0);
        let months: Vec<&str> = metrics.monthly_sales.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(months, vec!["February", "January"]);
    }

    #[test]
    fn test_region_shares_sum_to_100() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        let total: f64 = metrics.region_shares().iter().map(|(_, pct)| pct).sum();
        assert_approx_eq!(total, 100.0, 1e-9);
    }

    #[test]
    fn test_region_shares_zero_revenue() {
        let table = SalesTable {
            name: "zero".to_string(),
            columns: Vec::new(),
            records: vec![record((2024, 1, 1), "Phone", "North", 3.0, 0.0)],
        };
        let metrics = compute_sales_metrics(&table).unwrap();
        assert_eq!(metrics.region_shares(), vec![("North", 0.0)]);
    }

    #[test]
    fn test_empty_table_is_error() {
        let table = SalesTable {
            name: "empty".to_string(),
            columns: Vec::new(),
            records: Vec::new(),
        };
        let err = compute_sales_metrics(&table).unwrap_err();
        assert!(matches!(err, SalesError::InsufficientData(_)));
    }

    #[test]
    fn test_no_products_is_error() {
        let mut r = record((2024, 1, 1), "Phone", "North", 1.0, 1.0);
        r.product = None;
        let table = SalesTable {
            name: "anon".to_string(),
            columns: Vec::new(),
            records: vec![r],
        };
        assert!(compute_sales_metrics(&table).is_err());
    }

    #[test]
    fn test_unnamed_region_counts_toward_total_only() {
        let mut table = sample_table();
        table.records[3].region = None;
        let metrics = compute_sales_metrics(&table).unwrap();
        assert_approx_eq!(metrics.total_sales, 2600.0);
        assert_eq!(metrics.regional_sales.len(), 2);
    }

    #[test]
    fn test_product_summary_sorted_by_revenue() {
        let summary = product_summary(&sample_table());
        let products: Vec<&str> = summary.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(products, vec!["Laptop", "Phone", "Cable"]);
        assert_approx_eq!(summary[0].quantity, 3.0);
        assert_approx_eq!(summary[0].revenue, 1500.0);
    }

    #[test]
    fn test_metrics_json_roundtrip() {
        let metrics = compute_sales_metrics(&sample_table()).unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        let deserialized: SalesMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, metrics);
    }
}
