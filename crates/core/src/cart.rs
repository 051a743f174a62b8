//! Cart

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::{AmountOverflow, round_amount};

/// A line in the cart, priced when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Product name
    pub product_name: String,

    /// Units taken
    pub quantity: u32,

    /// Unit price at the time the line was added
    pub unit_price: Decimal,

    /// `quantity * unit_price`, rounded to whole minor units
    pub subtotal: Decimal,
}

impl CartLine {
    /// Create a line, computing its subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the subtotal does not fit in a [`Decimal`].
    pub fn new(
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, AmountOverflow> {
        let subtotal = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(AmountOverflow)?;

        Ok(Self {
            product_name: product_name.into(),
            quantity,
            unit_price,
            subtotal: round_amount(subtotal),
        })
    }
}

/// Transient list of items picked during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the cart total would overflow; the cart is unchanged.
    pub fn push(&mut self, line: CartLine) -> Result<(), AmountOverflow> {
        self.total = self
            .total
            .checked_add(line.subtotal)
            .ok_or(AmountOverflow)?;
        self.lines.push(line);

        Ok(())
    }

    /// Remove the line at `index` (0-based).
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        let line = (index < self.lines.len()).then(|| self.lines.remove(index))?;

        self.total -= line.subtotal;

        Some(line)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line subtotals.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Decimal::ZERO;
    }
}
