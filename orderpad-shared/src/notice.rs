use serde::{Serialize, Serializer};
use std::fmt;

/// Messages shown to the person filling in the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    SubmittedSheetUpdateFailed,
    SubmittedExportFailed,
    SelectShop,
    SelectOrderDate,
    InvalidOrderDate(String),
    CatalogUnavailable,
    ShopsUnavailable,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Submitted => "Order submitted".to_string(),
            Notice::SubmittedSheetUpdateFailed => {
                "Order submitted, but the sheet update failed".to_string()
            }
            Notice::SubmittedExportFailed => {
                "Order submitted, but the order files could not be saved".to_string()
            }
            Notice::SelectShop => "Please select a shop".to_string(),
            Notice::SelectOrderDate => "Please select an order date".to_string(),
            Notice::InvalidOrderDate(value) => {
                format!("Order date '{}' is not a valid YYYY-MM-DD date", value)
            }
            Notice::CatalogUnavailable => "Products could not be loaded".to_string(),
            Notice::ShopsUnavailable => "Shops could not be loaded".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// Clients only ever see the rendered text.
impl Serialize for Notice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.message())
    }
}
