//! Till
//!
//! A single selling session: the catalogue, the sales ledger and the cart being filled.
//! Stock is taken from the catalogue as soon as an item goes into the cart, so the cart can
//! never promise more than is on the shelf; removing a line or abandoning the session puts
//! the stock back.

use jiff::Zoned;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartLine},
    catalogue::{Catalogue, CatalogueError},
    ledger::{LedgerError, SaleRecord, SalesLedger},
    money::AmountOverflow,
    receipt::Receipt,
};

/// Errors raised by cart and checkout operations.
#[derive(Debug, Error)]
pub enum TillError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart quantity of zero was requested.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// No cart line at this position.
    #[error("no cart line at position {0}")]
    LineNotFound(usize),

    /// Catalogue lookup, stock or storage error.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Sales ledger storage error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A line subtotal or the cart total is too large to represent.
    #[error(transparent)]
    Overflow(#[from] AmountOverflow),
}

/// Where the session is in the cart lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TillState {
    /// Nothing in the cart and nothing sold yet.
    Empty,

    /// The cart has at least one line.
    Populated,

    /// The last action was a checkout; the cart is empty again.
    CheckedOut,
}

/// Cart and checkout over a catalogue and a sales ledger.
#[derive(Debug)]
pub struct Till {
    catalogue: Catalogue,
    ledger: SalesLedger,
    cart: Cart,
    state: TillState,
}

impl Till {
    /// Start a session with an empty cart.
    pub fn new(catalogue: Catalogue, ledger: SalesLedger) -> Self {
        Self {
            catalogue,
            ledger,
            cart: Cart::new(),
            state: TillState::Empty,
        }
    }

    /// The catalogue being sold from.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// The sales ledger.
    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Mutable access to the sales ledger, e.g. to refresh the total.
    pub fn ledger_mut(&mut self) -> &mut SalesLedger {
        &mut self.ledger
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of the cart's line subtotals.
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TillState {
        self.state
    }

    /// Take `quantity` units of `name` off the shelf and into the cart.
    ///
    /// # Errors
    ///
    /// - [`TillError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CatalogueError::NotFound`]: no such product.
    /// - [`CatalogueError::InsufficientStock`]: not enough stock; stock is unchanged.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved.
    /// - [`TillError::Overflow`]: the line or cart total is too large; stock is unchanged.
    pub fn add_item(&mut self, name: &str, quantity: u32) -> Result<&CartLine, TillError> {
        if quantity == 0 {
            return Err(TillError::ZeroQuantity);
        }

        // Price the line before stock moves so an overflow leaves the shelf untouched.
        let line = match self.catalogue.find(name) {
            Some(product) => CartLine::new(product.name.clone(), quantity, product.price)?,
            None => return Err(CatalogueError::NotFound(name.to_string()).into()),
        };

        self.cart
            .total()
            .checked_add(line.subtotal)
            .ok_or(AmountOverflow)?;

        self.catalogue.withdraw(name, quantity)?;

        debug!(product = %line.product_name, quantity, subtotal = %line.subtotal, "added to cart");

        self.cart.push(line)?;
        self.state = TillState::Populated;

        self.cart
            .lines()
            .last()
            .ok_or(TillError::LineNotFound(self.cart.len()))
    }

    /// Remove the cart line at `index` (0-based) and put its stock back.
    ///
    /// # Errors
    ///
    /// - [`TillError::LineNotFound`]: `index` is out of range.
    /// - [`CatalogueError::Storage`]: the catalogue could not be saved; the line stays in
    ///   the cart.
    pub fn remove_item(&mut self, index: usize) -> Result<CartLine, TillError> {
        let line = self
            .cart
            .lines()
            .get(index)
            .ok_or(TillError::LineNotFound(index))?;

        let restocked = self.catalogue.restock(&line.product_name, line.quantity)?;

        let line = self
            .cart
            .remove(index)
            .ok_or(TillError::LineNotFound(index))?;

        debug!(
            product = %line.product_name,
            quantity = line.quantity,
            restocked,
            "removed from cart"
        );

        if self.cart.is_empty() {
            self.state = TillState::Empty;
        }

        Ok(line)
    }

    /// Sell everything in the cart.
    ///
    /// Appends one sale record per line to the ledger, adds the cart total to the running
    /// total, saves the catalogue and empties the cart. The writes are not transactional: a
    /// failure part-way leaves the earlier writes in place and the cart untouched.
    ///
    /// # Errors
    ///
    /// - [`TillError::EmptyCart`]: nothing to sell; the ledger is untouched.
    /// - [`TillError::Ledger`] / [`TillError::Catalogue`]: a write failed.
    /// - [`TillError::Overflow`]: the sale total is too large; nothing is written.
    pub fn checkout(&mut self) -> Result<Receipt, TillError> {
        if self.cart.is_empty() {
            return Err(TillError::EmptyCart);
        }

        let receipt = Receipt::new(self.cart.lines().to_vec(), Zoned::now())?;

        let records: Vec<SaleRecord> = self
            .cart
            .lines()
            .iter()
            .map(|line| SaleRecord::now(&line.product_name, line.quantity, line.subtotal))
            .collect();

        let sales_total = self.ledger.record_sale(&records)?;

        self.catalogue.save()?;
        self.cart.clear();

        self.state = TillState::CheckedOut;

        info!(
            lines = receipt.lines().len(),
            total = %receipt.total(),
            %sales_total,
            "checked out"
        );

        Ok(receipt)
    }

    /// Put every cart line back on the shelf and empty the cart. Returns how many lines were
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Storage`] if the catalogue could not be saved; lines not
    /// yet restocked stay in the cart.
    pub fn abandon(&mut self) -> Result<usize, TillError> {
        let mut returned = 0;

        while !self.cart.is_empty() {
            self.remove_item(self.cart.len() - 1)?;
            returned += 1;
        }

        if returned > 0 {
            info!(lines = returned, "abandoned cart");
        }

        Ok(returned)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalogue::MockProductsRepository,
        ledger::MockSalesRepository,
        products::{Product, ProductUpdate},
        rows::Loaded,
        storage::StorageError,
    };

    use super::*;

    fn milk(quantity: u32) -> Product {
        Product::new("Milk", Decimal::new(200, 2), quantity, "Dairy")
    }

    fn catalogue(products: Vec<Product>, saves: usize) -> Result<Catalogue, CatalogueError> {
        let mut repo = MockProductsRepository::new();

        repo.expect_load()
            .once()
            .return_once(move || Ok(Loaded::clean(products)));
        repo.expect_save().times(saves).returning(|_| Ok(()));

        Ok(Catalogue::open(repo)?.0)
    }

    fn idle_ledger(total: Decimal) -> Result<SalesLedger, LedgerError> {
        let mut repo = MockSalesRepository::new();

        repo.expect_load_total()
            .once()
            .return_once(move || Ok(Loaded::clean(total)));
        repo.expect_append_records().never();
        repo.expect_save_total().never();

        Ok(SalesLedger::open(repo)?.0)
    }

    #[test]
    fn add_item_decrements_stock() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 1)?, idle_ledger(Decimal::ZERO)?);

        let line = till.add_item("milk", 2)?.clone();

        assert_eq!(line, CartLine::new("Milk", 2, Decimal::new(200, 2))?);
        assert_eq!(till.catalogue().find("Milk").map(|p| p.quantity), Some(1));
        assert_eq!(till.state(), TillState::Populated);

        Ok(())
    }

    #[test]
    fn add_item_beyond_stock_fails_and_leaves_stock() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 0)?, idle_ledger(Decimal::ZERO)?);

        let result = till.add_item("Milk", 5);

        assert!(matches!(
            result,
            Err(TillError::Catalogue(CatalogueError::InsufficientStock {
                requested: 5,
                available: 3,
                ..
            }))
        ));

        assert_eq!(till.catalogue().find("Milk").map(|p| p.quantity), Some(3));
        assert!(till.cart().is_empty());
        assert_eq!(till.state(), TillState::Empty);

        Ok(())
    }

    #[test]
    fn add_item_overflowing_subtotal_fails_and_leaves_stock() -> TestResult {
        let gold = Product::new("Gold", Decimal::MAX, 5, "Lux");
        let mut till = Till::new(catalogue(vec![gold], 0)?, idle_ledger(Decimal::ZERO)?);

        assert!(matches!(till.add_item("Gold", 2), Err(TillError::Overflow(_))));
        assert_eq!(till.catalogue().find("Gold").map(|p| p.quantity), Some(5));
        assert!(till.cart().is_empty());

        Ok(())
    }

    #[test]
    fn add_item_overflowing_cart_total_fails_and_leaves_stock() -> TestResult {
        let gold = Product::new("Gold", Decimal::MAX, 5, "Lux");
        let mut till = Till::new(catalogue(vec![gold], 1)?, idle_ledger(Decimal::ZERO)?);

        till.add_item("Gold", 1)?;

        assert!(matches!(till.add_item("Gold", 1), Err(TillError::Overflow(_))));
        assert_eq!(till.catalogue().find("Gold").map(|p| p.quantity), Some(4));
        assert_eq!(till.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn add_item_zero_quantity_is_rejected() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 0)?, idle_ledger(Decimal::ZERO)?);

        assert!(matches!(till.add_item("Milk", 0), Err(TillError::ZeroQuantity)));

        Ok(())
    }

    #[test]
    fn add_item_unknown_product_is_not_found() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 0)?, idle_ledger(Decimal::ZERO)?);

        assert!(matches!(
            till.add_item("Cheese", 1),
            Err(TillError::Catalogue(CatalogueError::NotFound(_)))
        ));

        Ok(())
    }

    #[test]
    fn cart_price_is_fixed_at_add_time() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 2)?, idle_ledger(Decimal::ZERO)?);

        till.add_item("Milk", 1)?;

        let update = ProductUpdate {
            price: Some(Decimal::new(500, 2)),
            ..Default::default()
        };

        till.catalogue.update("Milk", &update)?;

        assert_eq!(till.cart().total(), Decimal::new(200, 2));

        Ok(())
    }

    #[test]
    fn remove_item_restocks() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 2)?, idle_ledger(Decimal::ZERO)?);

        till.add_item("Milk", 2)?;
        let removed = till.remove_item(0)?;

        assert_eq!(removed.quantity, 2);
        assert_eq!(till.catalogue().find("Milk").map(|p| p.quantity), Some(3));
        assert_eq!(till.state(), TillState::Empty);

        Ok(())
    }

    #[test]
    fn remove_item_out_of_range_is_line_not_found() -> TestResult {
        let mut till = Till::new(catalogue(vec![milk(3)], 0)?, idle_ledger(Decimal::ZERO)?);

        assert!(matches!(till.remove_item(0), Err(TillError::LineNotFound(0))));

        Ok(())
    }

    #[test]
    fn checkout_empty_cart_fails_without_touching_ledger() -> TestResult {
        let mut repo = MockSalesRepository::new();
        repo.expect_load_total()
            .once()
            .return_once(|| Ok(Loaded::clean(Decimal::new(100, 0))));
        repo.expect_append_records().never();
        repo.expect_save_total().never();

        let (ledger, _) = SalesLedger::open(repo)?;
        let mut till = Till::new(catalogue(vec![milk(3)], 0)?, ledger);

        assert!(matches!(till.checkout(), Err(TillError::EmptyCart)));
        assert_eq!(till.ledger().total(), Decimal::new(100, 0));

        Ok(())
    }

    #[test]
    fn checkout_records_sale_and_clears_cart() -> TestResult {
        let mut repo = MockSalesRepository::new();
        repo.expect_load_total()
            .once()
            .return_once(|| Ok(Loaded::clean(Decimal::new(10_000, 2))));
        repo.expect_append_records()
            .once()
            .withf(|records| {
                records.len() == 1
                    && records.first().is_some_and(|record| {
                        record.product_name == "Milk"
                            && record.quantity == 2
                            && record.subtotal == Decimal::new(400, 2)
                    })
            })
            .returning(|_| Ok(()));
        repo.expect_save_total()
            .once()
            .withf(|total| *total == Decimal::new(104, 0))
            .returning(|_| Ok(()));

        let (ledger, _) = SalesLedger::open(repo)?;

        // one save for the withdrawal, one at checkout
        let mut till = Till::new(catalogue(vec![milk(3)], 2)?, ledger);

        till.add_item("Milk", 2)?;
        let receipt = till.checkout()?;

        assert_eq!(receipt.total(), Decimal::new(400, 2));
        assert_eq!(till.ledger().total(), Decimal::new(104, 0));
        assert!(till.cart().is_empty());
        assert_eq!(till.state(), TillState::CheckedOut);
        assert_eq!(till.catalogue().find("Milk").map(|p| p.quantity), Some(1));

        Ok(())
    }

    #[test]
    fn failed_ledger_write_keeps_cart() -> TestResult {
        let mut repo = MockSalesRepository::new();
        repo.expect_load_total()
            .once()
            .return_once(|| Ok(Loaded::clean(Decimal::ZERO)));
        repo.expect_append_records().once().returning(|_| {
            Err(StorageError::Write {
                path: "sales_log.csv".into(),
                source: std::io::Error::other("disk full"),
            })
        });
        repo.expect_save_total().never();

        let (ledger, _) = SalesLedger::open(repo)?;
        let mut till = Till::new(catalogue(vec![milk(3)], 1)?, ledger);

        till.add_item("Milk", 1)?;

        assert!(matches!(till.checkout(), Err(TillError::Ledger(_))));
        assert_eq!(till.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn abandon_restocks_every_line() -> TestResult {
        let mut till = Till::new(
            catalogue(
                vec![milk(5), Product::new("Bread", Decimal::ONE, 2, "Bakery")],
                4,
            )?,
            idle_ledger(Decimal::ZERO)?,
        );

        till.add_item("Milk", 2)?;
        till.add_item("Bread", 2)?;

        assert_eq!(till.abandon()?, 2);
        assert_eq!(till.catalogue().find("Milk").map(|p| p.quantity), Some(5));
        assert_eq!(till.catalogue().find("Bread").map(|p| p.quantity), Some(2));

        Ok(())
    }
}
