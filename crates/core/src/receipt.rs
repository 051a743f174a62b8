//! Receipt

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use jiff::Zoned;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::builder::Builder;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::CartLine,
    money::{AmountOverflow, checked_total, format_amount},
    table::render,
};

const RULE: &str = "============================================";

/// Errors that can occur when rendering or saving a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The receipt could not be written to the output.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),

    /// The receipt file could not be created.
    #[error("failed to save receipt to {}", path.display())]
    Save {
        /// Receipt file
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Record of a completed checkout.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: Vec<CartLine>,
    total: Decimal,
    issued_at: Zoned,
}

impl Receipt {
    /// Create a receipt for `lines`, issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] if the lines do not sum to a representable total.
    pub fn new(lines: Vec<CartLine>, issued_at: Zoned) -> Result<Self, AmountOverflow> {
        let total = checked_total(lines.iter().map(|line| line.subtotal))?;

        Ok(Self {
            lines,
            total,
            issued_at,
        })
    }

    /// Purchased lines
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Amount paid
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// When the checkout happened
    pub fn issued_at(&self) -> &Zoned {
        &self.issued_at
    }

    /// Render the receipt as plain text.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if writing to `out` fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Subtotal"]);

        for line in &self.lines {
            builder.push_record([
                line.product_name.clone(),
                line.quantity.to_string(),
                format_amount(line.subtotal, currency),
            ]);
        }

        writeln!(out, "{:=^44}", " TILL RECEIPT ")?;
        writeln!(out, "Date: {}", self.issued_at.strftime("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out)?;
        writeln!(out, "{}", render(builder, 1..3))?;
        writeln!(out, "TOTAL: {}", format_amount(self.total, currency))?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        writeln!(out, "Thank you for shopping with us!")?;

        Ok(())
    }

    fn file_stem(&self) -> String {
        format!("receipt_{}", self.issued_at.strftime("%Y-%m-%d_%H-%M-%S"))
    }
}

/// Saves receipts as timestamped text files in a directory.
#[derive(Debug, Clone)]
pub struct ReceiptWriter {
    dir: PathBuf,
}

impl ReceiptWriter {
    /// Writer saving into `dir`, created on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory receipts are saved in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `receipt` as `receipt_YYYY-MM-DD_HH-MM-SS.txt`, adding a numeric suffix if a
    /// receipt with that name already exists. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Save`] if the directory or file cannot be created, or
    /// [`ReceiptError::Io`] if writing fails.
    pub fn write(
        &self,
        receipt: &Receipt,
        currency: &'static Currency,
    ) -> Result<PathBuf, ReceiptError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReceiptError::Save {
            path: self.dir.clone(),
            source,
        })?;

        let stem = receipt.file_stem();
        let mut attempt = 1_u32;

        loop {
            let path = if attempt == 1 {
                self.dir.join(format!("{stem}.txt"))
            } else {
                self.dir.join(format!("{stem}_{attempt}.txt"))
            };

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    let mut out = io::BufWriter::new(file);

                    receipt.write_to(&mut out, currency)?;
                    out.flush()?;

                    info!(path = %path.display(), "saved receipt");

                    return Ok(path);
                }
                Err(error) if error.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(ReceiptError::Save { path, source }),
            }
        }
    }
}
