use orderpad_shared::DeviceType;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const SHOP_NAME_FIELD: &str = "shopName";
pub const ORDER_DATE_FIELD: &str = "orderDate";
pub const DEVICE_TYPE_FIELD: &str = "deviceType";

/// Snapshot of the order form at submit time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    pub shop_name: String,
    #[serde(default)]
    pub order_date: String,
    /// Quantity selectors in page order.
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub value: FieldValue,
}

/// Raw selector value. Browsers post text, scripted clients may post numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl FormState {
    pub fn new(shop_name: impl Into<String>, order_date: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            order_date: order_date.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// A validated order, built fresh for every submission.
///
/// Serializes flat: the fixed fields first, then one key per selected
/// product in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    shop_name: String,
    order_date: String,
    device_type: Option<DeviceType>,
    quantities: Vec<(String, u32)>,
}

impl OrderRecord {
    pub(crate) fn new(
        shop_name: String,
        order_date: String,
        device_type: Option<DeviceType>,
        quantities: Vec<(String, u32)>,
    ) -> Self {
        Self {
            shop_name,
            order_date,
            device_type,
            quantities,
        }
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }

    pub fn device_type(&self) -> Option<DeviceType> {
        self.device_type
    }

    /// Selected products with their quantities, all strictly positive.
    pub fn quantities(&self) -> &[(String, u32)] {
        &self.quantities
    }

    pub fn quantity(&self, product_key: &str) -> Option<u32> {
        self.quantities
            .iter()
            .find(|(key, _)| key == product_key)
            .map(|(_, quantity)| *quantity)
    }

    pub fn product_count(&self) -> usize {
        self.quantities.len()
    }

    pub fn total_units(&self) -> u64 {
        self.quantities.iter().map(|(_, quantity)| u64::from(*quantity)).sum()
    }
}

impl Serialize for OrderRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = 2 + usize::from(self.device_type.is_some()) + self.quantities.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(SHOP_NAME_FIELD, &self.shop_name)?;
        map.serialize_entry(ORDER_DATE_FIELD, &self.order_date)?;
        if let Some(device_type) = &self.device_type {
            map.serialize_entry(DEVICE_TYPE_FIELD, device_type)?;
        }
        for (key, quantity) in &self.quantities {
            map.serialize_entry(key, quantity)?;
        }
        map.end()
    }
}
