//! Sale Records

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::rows::RowError;

/// Number of fields in a `sales_log.csv` row.
const SALE_FIELDS: usize = 3;

/// One line of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    /// Name of the product sold
    pub product_name: String,

    /// Units sold
    pub quantity: u32,

    /// Amount charged for the line
    pub subtotal: Decimal,

    /// When the sale happened; not persisted, so absent on records read back from the log
    pub timestamp: Option<Timestamp>,
}

impl SaleRecord {
    /// Create a record stamped with the current time.
    pub fn now(product_name: impl Into<String>, quantity: u32, subtotal: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            subtotal,
            timestamp: Some(Timestamp::now()),
        }
    }

    pub(crate) fn from_fields(fields: &[&str]) -> Result<Self, RowError> {
        let [product_name, quantity, subtotal] = fields else {
            return Err(RowError::WrongFieldCount {
                expected: SALE_FIELDS,
                found: fields.len(),
            });
        };

        let quantity = quantity
            .parse()
            .map_err(|_err| RowError::InvalidQuantity((*quantity).to_string()))?;

        let subtotal = Decimal::from_str(subtotal)
            .map_err(|_err| RowError::InvalidAmount((*subtotal).to_string()))?;

        Ok(Self {
            product_name: (*product_name).to_string(),
            quantity,
            subtotal,
            timestamp: None,
        })
    }

    pub(crate) fn to_row(&self) -> String {
        format!("{},{},{}", self.product_name, self.quantity, self.subtotal)
    }
}
