use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::LoadError;

/// Product catalog as published in the static products document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
}

/// Both a bare array and the `{"products": [...]}` storefront export are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse the products document.
    pub fn from_json(source_name: &str, body: &str) -> Result<Self, LoadError> {
        let document: CatalogDocument = serde_json::from_str(body)
            .map_err(|e| LoadError::malformed(source_name, e))?;

        let products = match document {
            CatalogDocument::Bare(products) => products,
            CatalogDocument::Wrapped { products } => products,
        };

        Ok(Self { products })
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub src: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "price_as_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sku: Option<String>,
}

impl Product {
    /// Source of the first image, used as the section thumbnail.
    pub fn image_src(&self) -> Option<&str> {
        self.images
            .iter()
            .map(|image| image.src.as_str())
            .find(|src| !src.is_empty())
    }

    /// Form key of one of this product's variants.
    pub fn key_for(&self, variant: &Variant) -> String {
        product_key(&self.title, Some(&variant.title), variant.sku.as_deref())
    }
}

/// Build the form key of a catalog entry: product title, variant title and
/// SKU (when present) joined with `_`, then normalized.
pub fn product_key(product_title: &str, variant_title: Option<&str>, sku: Option<&str>) -> String {
    let parts: Vec<&str> = [Some(product_title), variant_title, sku]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    normalize_key(&parts.join("_"))
}

/// Replace each whitespace run with `_` and drop every character outside
/// `[A-Za-z0-9_-]`. Applying it twice yields the same key.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                key.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            key.push(ch);
        }
    }

    key
}

fn price_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
