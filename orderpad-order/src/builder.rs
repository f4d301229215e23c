use chrono::NaiveDate;
use orderpad_catalog::normalize_key;
use orderpad_shared::DeviceType;

use crate::models::{
    FieldValue, FormState, OrderRecord, DEVICE_TYPE_FIELD, ORDER_DATE_FIELD, SHOP_NAME_FIELD,
};

/// Environment the record is built in. Passed in so building stays pure.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub today: NaiveDate,
    /// Use `today` when the form carries no order date.
    pub default_date_to_today: bool,
    pub device_type: Option<DeviceType>,
}

impl BuildOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            default_date_to_today: false,
            device_type: None,
        }
    }

    pub fn default_date_to_today(mut self, enabled: bool) -> Self {
        self.default_date_to_today = enabled;
        self
    }

    pub fn device_type(mut self, device_type: Option<DeviceType>) -> Self {
        self.device_type = device_type;
        self
    }
}

/// Build the order record from the submitted form.
///
/// Quantities are parsed leniently; anything that does not parse to a
/// positive integer is left out without error.
pub fn build_order_data(form: &FormState, options: &BuildOptions) -> Result<OrderRecord, OrderError> {
    let shop_name = form.shop_name.trim();
    if shop_name.is_empty() {
        return Err(OrderError::MissingField(SHOP_NAME_FIELD));
    }

    let order_date = match form.order_date.trim() {
        "" if options.default_date_to_today => options.today.format("%Y-%m-%d").to_string(),
        "" => return Err(OrderError::MissingField(ORDER_DATE_FIELD)),
        date => validate_date(date)?,
    };

    let mut quantities: Vec<(String, u32)> = Vec::new();
    for field in &form.fields {
        let Some(quantity) = parse_quantity(&field.value) else {
            continue;
        };

        let key = normalize_key(&field.name);
        if key.is_empty() || is_reserved(&key) {
            tracing::warn!(field = %field.name, "Ignoring quantity field with unusable name");
            continue;
        }

        match quantities.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = quantity,
            None => quantities.push((key, quantity)),
        }
    }

    Ok(OrderRecord::new(
        shop_name.to_string(),
        order_date,
        options.device_type,
        quantities,
    ))
}

fn validate_date(date: &str) -> Result<String, OrderError> {
    let well_formed = date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(date.to_string())
    } else {
        Err(OrderError::InvalidDate(date.to_string()))
    }
}

fn is_reserved(key: &str) -> bool {
    [SHOP_NAME_FIELD, ORDER_DATE_FIELD, DEVICE_TYPE_FIELD].contains(&key)
}

fn parse_quantity(value: &FieldValue) -> Option<u32> {
    let parsed = match value {
        FieldValue::Number(number) if number.is_finite() => number.trunc() as i64,
        FieldValue::Text(text) => parse_int(text)?,
        _ => return None,
    };

    if parsed <= 0 {
        return None;
    }

    match u32::try_from(parsed) {
        Ok(quantity) => Some(quantity),
        Err(_) => {
            tracing::warn!(value = parsed, "Ignoring quantity above {}", u32::MAX);
            None
        }
    }
}

/// Integer prefix of `text`: optional leading whitespace and sign, then
/// decimal digits up to the first non-digit. `None` when no digits lead.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid order date: {0}")]
    InvalidDate(String),

    #[error("Order serialization failed: {0}")]
    Serialization(String),
}
