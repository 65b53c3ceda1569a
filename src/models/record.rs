use chrono::{Month, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Cell texts that load as a missing value, matched after trimming.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing_marker(text: &str) -> bool {
    text.is_empty() || MISSING_MARKERS.contains(&text)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericCell {
    Number(f64),
    Text(String),
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumericCell>::deserialize(deserializer)? {
        None => None,
        Some(NumericCell::Number(n)) => Some(n),
        Some(NumericCell::Text(text)) => {
            let text = text.trim();
            if is_missing_marker(text) {
                None
            } else {
                Some(text.parse::<f64>().map_err(|_| {
                    <D::Error as de::Error>::custom(format!("invalid number '{text}'"))
                })?)
            }
        }
    };
    // Non-finite numbers count as missing.
    Ok(value.filter(|n| n.is_finite()))
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|text| text.trim().to_string())
        .filter(|text| !is_missing_marker(text)))
}

/// A sales row as read from the input file, before cleaning.
///
/// Every field is optional. Empty cells, JSON nulls and the usual spreadsheet
/// markers in [`MISSING_MARKERS`] all load as `None`, as do `NaN` and infinite numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Date", default, deserialize_with = "optional_text")]
    pub date: Option<String>,
    #[serde(rename = "Product", default, deserialize_with = "optional_text")]
    pub product: Option<String>,
    #[serde(rename = "Region", default, deserialize_with = "optional_text")]
    pub region: Option<String>,
    #[serde(rename = "Quantity", default, deserialize_with = "optional_number")]
    pub quantity: Option<f64>,
    #[serde(rename = "Price", default, deserialize_with = "optional_number")]
    pub price: Option<f64>,
    #[serde(rename = "Total_Sales", default, deserialize_with = "optional_number")]
    pub total_sales: Option<f64>,
}

/// The numeric columns that cleaning fills with their column mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Quantity,
    Price,
    TotalSales,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 3] = [
        NumericColumn::Quantity,
        NumericColumn::Price,
        NumericColumn::TotalSales,
    ];

    /// Column header as it appears in the input file.
    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Quantity => "Quantity",
            NumericColumn::Price => "Price",
            NumericColumn::TotalSales => "Total_Sales",
        }
    }

    pub fn get(&self, record: &RawRecord) -> Option<f64> {
        match self {
            NumericColumn::Quantity => record.quantity,
            NumericColumn::Price => record.price,
            NumericColumn::TotalSales => record.total_sales,
        }
    }

    pub fn slot<'a>(&self, record: &'a mut RawRecord) -> &'a mut Option<f64> {
        match self {
            NumericColumn::Quantity => &mut record.quantity,
            NumericColumn::Price => &mut record.price,
            NumericColumn::TotalSales => &mut record.total_sales,
        }
    }
}

impl std::fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A cleaned sales transaction: no missing numbers, a parsed date and its month.
///
/// A record whose date cell was empty keeps `date` and `month` as `None`; it
/// still counts toward totals but belongs to no month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: Option<NaiveDate>,
    /// Product identifier; `None` rows are left out of product groupings.
    pub product: Option<String>,
    /// Region identifier; `None` rows are left out of region groupings.
    pub region: Option<String>,
    pub quantity: f64,
    pub price: f64,
    pub total_sales: f64,
    /// Calendar month of `date`, derived during cleaning.
    pub month: Option<Month>,
}

impl SalesRecord {
    /// Full English month name, e.g. "January".
    pub fn month_name(&self) -> Option<&'static str> {
        self.month.map(|m| m.name())
    }
}
