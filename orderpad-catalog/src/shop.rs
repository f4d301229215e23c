use serde::{Deserialize, Serialize};

use crate::LoadError;

/// A shop that can place orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shop {
    pub name: String,
}

/// Shop lists are published either as plain names or as objects with a `name`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ShopEntry {
    Name(String),
    Record {
        #[serde(default)]
        name: Option<String>,
    },
}

/// Parse the shop list document, dropping entries without a usable name.
pub fn parse_shops(source_name: &str, body: &str) -> Result<Vec<Shop>, LoadError> {
    let entries: Vec<ShopEntry> = serde_json::from_str(body)
        .map_err(|e| LoadError::malformed(source_name, e))?;

    let shops = entries
        .into_iter()
        .filter_map(|entry| match entry {
            ShopEntry::Name(name) => Some(name),
            ShopEntry::Record { name } => name,
        })
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .map(|name| Shop { name })
        .collect();

    Ok(shops)
}
