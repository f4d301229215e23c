use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::builder::OrderError;
use crate::models::OrderRecord;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// How exported files are named.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportNaming {
    /// `<shop>-<date>-<HH-MM-SS>.csv` and a matching `.json`.
    #[default]
    Timestamped,
    /// `order.csv` and `order.json`.
    Fixed,
}

/// A serialized artifact ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Content type implied by the file extension.
    pub fn content_type_for(file_name: &str) -> &'static str {
        if file_name.ends_with(".json") {
            JSON_CONTENT_TYPE
        } else if file_name.ends_with(".csv") {
            CSV_CONTENT_TYPE
        } else {
            "application/octet-stream"
        }
    }
}

/// Pretty-printed JSON, products flattened after the fixed fields.
pub fn to_json(record: &OrderRecord) -> Result<String, OrderError> {
    serde_json::to_string_pretty(record).map_err(|e| OrderError::Serialization(e.to_string()))
}

/// Summary rows, a blank row, then one `<productKey>,<quantity>` row per product.
///
/// Values are not quoted: product keys are normalized and never hold commas.
pub fn to_csv(record: &OrderRecord) -> String {
    let mut rows: Vec<String> = Vec::with_capacity(6 + record.product_count());
    rows.push(format!("Shop Name,{}", record.shop_name()));
    rows.push(format!("Order Date,{}", record.order_date()));
    if let Some(device_type) = record.device_type() {
        rows.push(format!("Device Type,{}", device_type));
    }
    rows.push(String::new());
    rows.push("Product,Quantity".to_string());
    for (key, quantity) in record.quantities() {
        rows.push(format!("{},{}", key, quantity));
    }
    rows.join("\n")
}

/// `<shop>-<date>-<HH-MM-SS>.csv`, unique per second for a shop and date.
pub fn csv_file_name(record: &OrderRecord, time: NaiveTime) -> String {
    format!("{}.csv", timestamped_stem(record, time))
}

/// Both exports for a record.
pub fn export_files(
    record: &OrderRecord,
    naming: ExportNaming,
    time: NaiveTime,
) -> Result<Vec<ExportFile>, OrderError> {
    let stem = match naming {
        ExportNaming::Timestamped => timestamped_stem(record, time),
        ExportNaming::Fixed => "order".to_string(),
    };

    Ok(vec![
        ExportFile {
            file_name: format!("{}.json", stem),
            content_type: JSON_CONTENT_TYPE,
            contents: to_json(record)?,
        },
        ExportFile {
            file_name: format!("{}.csv", stem),
            content_type: CSV_CONTENT_TYPE,
            contents: to_csv(record),
        },
    ])
}

fn timestamped_stem(record: &OrderRecord, time: NaiveTime) -> String {
    format!(
        "{}-{}-{}",
        file_safe_shop(record.shop_name()),
        file_safe_date(record.order_date()),
        time.format("%H-%M-%S")
    )
}

// Whitespace runs become `_`. Characters that cannot appear in a file name or
// a URL path segment are dropped.
fn file_safe_shop(shop_name: &str) -> String {
    let joined = shop_name.split_whitespace().collect::<Vec<_>>().join("_");
    joined
        .chars()
        .filter(|c| !c.is_control() && !matches!(*c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '#' | '%'))
        .collect()
}

fn file_safe_date(order_date: &str) -> String {
    order_date
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect()
}
