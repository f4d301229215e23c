use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::product::{normalize_key, Catalog};

/// Quantities offered by each selector when none are configured.
pub const DEFAULT_QUANTITY_OPTIONS: [u32; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Order form derived from the catalog: one section per product and one
/// quantity selector per variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderForm {
    pub sections: Vec<ProductSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSection {
    pub title: String,
    pub image: Option<String>,
    pub controls: Vec<QuantityControl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuantityControl {
    /// Field name submitted back with the form; the normalized product key.
    pub name: String,
    pub label: String,
    pub price: Option<String>,
    pub sku: Option<String>,
    pub options: Vec<u32>,
}

impl OrderForm {
    pub fn control_count(&self) -> usize {
        self.sections.iter().map(|section| section.controls.len()).sum()
    }

    pub fn control_names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.controls.iter())
            .map(|control| control.name.as_str())
    }
}

/// Render the catalog into form controls.
///
/// Products without a title are skipped. A product without variants gets a
/// single selector keyed by its title.
pub fn render_form(catalog: &Catalog, quantity_options: &[u32]) -> OrderForm {
    let options = selector_options(quantity_options);
    let mut seen = HashSet::new();
    let mut sections = Vec::with_capacity(catalog.products.len());

    for product in &catalog.products {
        let title = product.title.trim();
        if title.is_empty() {
            tracing::warn!("Skipping catalog product without a title");
            continue;
        }

        let mut controls = Vec::with_capacity(product.variants.len().max(1));
        if product.variants.is_empty() {
            controls.push(QuantityControl {
                name: normalize_key(title),
                label: title.to_string(),
                price: None,
                sku: None,
                options: options.clone(),
            });
        } else {
            for variant in &product.variants {
                controls.push(QuantityControl {
                    name: product.key_for(variant),
                    label: variant.title.clone(),
                    price: variant.price.clone(),
                    sku: variant.sku.clone(),
                    options: options.clone(),
                });
            }
        }

        for control in &controls {
            if !seen.insert(control.name.clone()) {
                tracing::warn!(key = %control.name, "Duplicate product key in catalog");
            }
        }

        sections.push(ProductSection {
            title: title.to_string(),
            image: product.image_src().map(str::to_string),
            controls,
        });
    }

    OrderForm { sections }
}

fn selector_options(configured: &[u32]) -> Vec<u32> {
    let mut options = if configured.is_empty() {
        DEFAULT_QUANTITY_OPTIONS.to_vec()
    } else {
        configured.to_vec()
    };
    options.sort_unstable();
    options.dedup();
    options
}
