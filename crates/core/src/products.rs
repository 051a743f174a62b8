//! Products

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::rows::RowError;

/// Number of fields in a `products.csv` row.
const PRODUCT_FIELDS: usize = 4;

/// Largest unit price accepted from worker input.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Characters that would break the row format if stored in a text field.
const FORBIDDEN_CHARS: [char; 3] = [',', '\n', '\r'];

/// Rejected worker input for a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductInputError {
    /// A required text field was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A text field contained a separator character.
    #[error("{0} must not contain commas or line breaks")]
    ForbiddenCharacter(&'static str),

    /// Price was not a number.
    #[error("price must be a valid number, got {0:?}")]
    InvalidPrice(String),

    /// Price was zero or negative.
    #[error("price must be greater than zero")]
    NonPositivePrice,

    /// Price had fractions of a minor unit.
    #[error("price must have at most two decimal places, got {0:?}")]
    TooManyDecimalPlaces(String),

    /// Price was above [`MAX_PRICE`].
    #[error("price must not exceed {}", MAX_PRICE)]
    PriceTooHigh,

    /// Quantity was not a non-negative whole number.
    #[error("quantity must be a whole number of zero or more, got {0:?}")]
    InvalidQuantity(String),
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Product name, unique within the catalogue
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Units in stock
    pub quantity: u32,

    /// Product category
    pub category: String,
}

impl Product {
    /// Create a new product without validation.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            category: category.into(),
        }
    }

    /// Build a product from raw worker input.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductInputError`] when a field is empty, contains a separator, or the
    /// price or quantity does not parse. Prices must be strictly positive.
    pub fn parse(
        name: &str,
        price: &str,
        quantity: &str,
        category: &str,
    ) -> Result<Self, ProductInputError> {
        Ok(Self {
            name: parse_label("name", name)?,
            price: parse_price(price)?,
            quantity: parse_quantity(quantity)?,
            category: parse_label("category", category)?,
        })
    }

    /// Whether this product answers to `name`, ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether stock is strictly below `threshold`.
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    pub(crate) fn from_fields(fields: &[&str]) -> Result<Self, RowError> {
        let [name, price, quantity, category] = fields else {
            return Err(RowError::WrongFieldCount {
                expected: PRODUCT_FIELDS,
                found: fields.len(),
            });
        };

        let price = Decimal::from_str(price)
            .ok()
            .filter(|price| !price.is_sign_negative())
            .ok_or_else(|| RowError::InvalidPrice((*price).to_string()))?;

        let quantity = quantity
            .parse()
            .map_err(|_err| RowError::InvalidQuantity((*quantity).to_string()))?;

        Ok(Self::new(*name, price, quantity, *category))
    }

    pub(crate) fn to_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.name, self.price, self.quantity, self.category
        )
    }
}

/// Changes to apply to an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    /// New name
    pub name: Option<String>,

    /// New unit price
    pub price: Option<Decimal>,

    /// New stock level
    pub quantity: Option<u32>,

    /// New category
    pub category: Option<String>,
}

impl ProductUpdate {
    /// Build an update from optional raw worker input.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductInputError`] for the first field that fails validation.
    pub fn parse(
        name: Option<&str>,
        price: Option<&str>,
        quantity: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ProductInputError> {
        Ok(Self {
            name: name.map(|name| parse_label("name", name)).transpose()?,
            price: price.map(parse_price).transpose()?,
            quantity: quantity.map(parse_quantity).transpose()?,
            category: category
                .map(|category| parse_label("category", category))
                .transpose()?,
        })
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
    }

    pub(crate) fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }

        if let Some(price) = self.price {
            product.price = price;
        }

        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }

        if let Some(category) = &self.category {
            product.category.clone_from(category);
        }
    }
}

/// Validate a text field destined for a data file.
///
/// # Errors
///
/// Returns [`ProductInputError::Empty`] or [`ProductInputError::ForbiddenCharacter`].
pub fn parse_label(field: &'static str, value: &str) -> Result<String, ProductInputError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ProductInputError::Empty(field));
    }

    if value.contains(FORBIDDEN_CHARS) {
        return Err(ProductInputError::ForbiddenCharacter(field));
    }

    Ok(value.to_string())
}

/// Parse a strictly positive price of at most two decimal places, up to [`MAX_PRICE`].
///
/// # Errors
///
/// Returns [`ProductInputError::InvalidPrice`], [`ProductInputError::NonPositivePrice`],
/// [`ProductInputError::TooManyDecimalPlaces`] or [`ProductInputError::PriceTooHigh`].
pub fn parse_price(value: &str) -> Result<Decimal, ProductInputError> {
    let price = Decimal::from_str(value.trim())
        .map_err(|_err| ProductInputError::InvalidPrice(value.to_string()))?;

    if price <= Decimal::ZERO {
        return Err(ProductInputError::NonPositivePrice);
    }

    // trailing zeros are fine: 1.500 is 1.50
    if price.normalize().scale() > 2 {
        return Err(ProductInputError::TooManyDecimalPlaces(value.to_string()));
    }

    if price > MAX_PRICE {
        return Err(ProductInputError::PriceTooHigh);
    }

    Ok(price)
}

/// Parse a non-negative whole quantity.
///
/// # Errors
///
/// Returns [`ProductInputError::InvalidQuantity`].
pub fn parse_quantity(value: &str) -> Result<u32, ProductInputError> {
    value
        .trim()
        .parse()
        .map_err(|_err| ProductInputError::InvalidQuantity(value.to_string()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_builds_product_from_text() -> TestResult {
        let product = Product::parse(" Milk ", "2.00", "12", "Dairy")?;

        assert_eq!(product, Product::new("Milk", Decimal::new(200, 2), 12, "Dairy"));

        Ok(())
    }

    #[test]
    fn parse_rejects_non_numeric_price() {
        let result = Product::parse("Milk", "two", "1", "Dairy");

        assert_eq!(result, Err(ProductInputError::InvalidPrice("two".to_string())));
    }

    #[test]
    fn parse_rejects_zero_price() {
        let result = Product::parse("Milk", "0", "1", "Dairy");

        assert_eq!(result, Err(ProductInputError::NonPositivePrice));
    }

    #[test]
    fn parse_rejects_fractions_of_a_penny() -> TestResult {
        assert_eq!(
            Product::parse("Gum", "0.333", "10", "Sweets"),
            Err(ProductInputError::TooManyDecimalPlaces("0.333".to_string()))
        );
        assert_eq!(parse_price("1.500")?, Decimal::new(1_500, 3));

        Ok(())
    }

    #[test]
    fn parse_rejects_prices_above_the_cap() -> TestResult {
        assert_eq!(
            Product::parse("Gold", "79228162514264337593543950335", "5", "Lux"),
            Err(ProductInputError::PriceTooHigh)
        );
        assert_eq!(parse_price("1000000")?, MAX_PRICE);

        Ok(())
    }

    #[test]
    fn parse_rejects_negative_quantity() {
        let result = Product::parse("Milk", "1.00", "-1", "Dairy");

        assert_eq!(result, Err(ProductInputError::InvalidQuantity("-1".to_string())));
    }

    #[test]
    fn parse_rejects_empty_and_comma_labels() {
        assert_eq!(
            Product::parse("", "1.00", "1", "Dairy"),
            Err(ProductInputError::Empty("name"))
        );

        assert_eq!(
            Product::parse("Milk", "1.00", "1", "Dairy, chilled"),
            Err(ProductInputError::ForbiddenCharacter("category"))
        );
    }

    #[test]
    fn matches_name_ignores_case() {
        let product = Product::new("Oat Milk", Decimal::ONE, 1, "Dairy");

        assert!(product.matches_name("oat milk"));
        assert!(product.matches_name("OAT MILK "));
        assert!(!product.matches_name("milk"));
    }

    #[test]
    fn is_low_stock_is_strict() {
        let product = Product::new("Milk", Decimal::ONE, 5, "Dairy");

        assert!(!product.is_low_stock(5));
        assert!(product.is_low_stock(6));
    }

    #[test]
    fn from_fields_parses_row() -> TestResult {
        let product = Product::from_fields(&["Bread", "1.20", "7", "Bakery"])?;

        assert_eq!(product, Product::new("Bread", Decimal::new(120, 2), 7, "Bakery"));
        assert_eq!(product.to_row(), "Bread,1.20,7,Bakery");

        Ok(())
    }

    #[test]
    fn from_fields_rejects_wrong_field_count() {
        let result = Product::from_fields(&["Bread", "1.20", "7"]);

        assert_eq!(
            result,
            Err(RowError::WrongFieldCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn from_fields_rejects_negative_price() {
        let result = Product::from_fields(&["Bread", "-1.20", "7", "Bakery"]);

        assert_eq!(result, Err(RowError::InvalidPrice("-1.20".to_string())));
    }

    #[test]
    fn update_applies_only_given_fields() -> TestResult {
        let mut product = Product::new("Milk", Decimal::ONE, 3, "Dairy");

        let update = ProductUpdate::parse(None, Some("1.50"), None, Some("Chilled"))?;
        update.apply_to(&mut product);

        assert_eq!(product, Product::new("Milk", Decimal::new(150, 2), 3, "Chilled"));

        Ok(())
    }

    #[test]
    fn empty_update_is_empty() -> TestResult {
        assert!(ProductUpdate::default().is_empty());
        assert!(!ProductUpdate::parse(None, None, Some("4"), None)?.is_empty());

        Ok(())
    }
}
