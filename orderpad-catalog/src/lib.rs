pub mod product;
pub mod shop;
pub mod form;

pub use product::{normalize_key, product_key, Catalog, Product, ProductImage, Variant};
pub use shop::{parse_shops, Shop};
pub use form::{render_form, OrderForm, ProductSection, QuantityControl, DEFAULT_QUANTITY_OPTIONS};

/// Failure to fetch or decode one of the static catalog documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {source_name}: {reason}")]
    Unreachable {
        source_name: String,
        reason: String,
    },

    #[error("Failed to parse {source_name}: {reason}")]
    Malformed {
        source_name: String,
        reason: String,
    },
}

impl LoadError {
    pub fn unreachable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::Unreachable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(source_name: impl Into<String>, reason: impl ToString) -> Self {
        LoadError::Malformed {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
