//! Interactive shopping session.

use std::io::{BufRead, Write};

use clap::Args;
use rusty_money::iso::Currency;
use till::{
    money::format_amount,
    products::parse_quantity,
    receipt::ReceiptWriter,
    table::{cart_table, products_table},
    till::{Till, TillError},
    users::Capability,
};

use crate::{config::CredentialsConfig, context::AppContext, errors::AppError};

const HELP: &str = "\
Commands:
  list              show every product
  search KEYWORD    show products whose name contains KEYWORD
  add NAME QTY      put QTY units of NAME in the cart
  remove N          take cart line N out of the cart
  cart              show the cart
  checkout          pay for the cart and print a receipt
  help              show this help
  quit              leave, returning anything in the cart to stock";

#[derive(Debug, Args)]
pub(crate) struct ShellArgs {
    /// Do not save receipts to the receipts directory
    #[arg(long)]
    no_receipt: bool,
}

pub(crate) fn run(
    args: &ShellArgs,
    context: &AppContext,
    credentials: &CredentialsConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let user = context.sign_in(credentials)?;
    user.require(Capability::Purchase)?;

    writeln!(out, "Welcome, {}. Type `help` for commands.", user.username)?;

    let mut session = Session {
        till: context.open_till()?,
        currency: context.currency(),
        receipts: (!args.no_receipt).then(|| context.receipts()),
    };

    session.run(input, out)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Search(String),
    Add { name: String, quantity: u32 },
    Remove(usize),
    Cart,
    Checkout,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_ascii_lowercase().as_str() {
            "list" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "add" => {
                let (name, quantity) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| usage("add NAME QTY"))?;

                Command::Add {
                    name: name.trim().to_string(),
                    quantity: parse_quantity(quantity)?,
                }
            }
            "remove" => {
                let position: usize = rest.parse().map_err(|_err| usage("remove N"))?;

                Command::Remove(position.checked_sub(1).ok_or_else(|| usage("remove N"))?)
            }
            "cart" => Command::Cart,
            "checkout" => Command::Checkout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => {
                return Err(AppError::InvalidCommand(format!(
                    "unknown command {word:?}; type `help` for commands"
                )));
            }
        };

        Ok(Some(command))
    }
}

fn usage(form: &str) -> AppError {
    AppError::InvalidCommand(format!("usage: {form}"))
}

#[derive(Debug)]
struct Session {
    till: Till,
    currency: &'static Currency,
    receipts: Option<ReceiptWriter>,
}

impl Session {
    /// Read commands until `quit` or end of input, then put anything left in the cart back.
    ///
    /// The cart is returned to stock even when reading input or writing output fails; that
    /// failure is reported after the stock is back.
    fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<(), AppError> {
        let outcome = self.read_commands(input, out);
        let returned = self.till.abandon();

        outcome?;
        let returned = returned?;

        if returned > 0 {
            writeln!(out, "Returned {returned} cart line(s) to stock.")?;
        }

        writeln!(out, "Goodbye.")?;

        Ok(())
    }

    fn read_commands(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<(), AppError> {
        prompt(out)?;

        for line in input.lines() {
            let line = line?;

            match self.handle(&line, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(AppError::Output(error)) => return Err(AppError::Output(error)),
                Err(error) => writeln!(out, "error: {error}")?,
            }

            prompt(out)?;
        }

        Ok(())
    }

    /// Parse and run one input line. Returns `false` when the session should end.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool, AppError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command, out),
            None => Ok(true),
        }
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<bool, AppError> {
        match command {
            Command::List => {
                writeln!(
                    out,
                    "{}",
                    products_table(self.till.catalogue().products(), self.currency)
                )?;
            }
            Command::Search(keyword) => {
                let found = self.till.catalogue().search(&keyword);

                if found.is_empty() {
                    writeln!(out, "No products match {keyword:?}.")?;
                } else {
                    writeln!(out, "{}", products_table(found, self.currency))?;
                }
            }
            Command::Add { name, quantity } => {
                let line = self.till.add_item(&name, quantity)?;

                writeln!(
                    out,
                    "Added {} x {} ({})",
                    line.quantity,
                    line.product_name,
                    format_amount(line.subtotal, self.currency)
                )?;
            }
            Command::Remove(index) => {
                let line = self.till.remove_item(index).map_err(|error| match error {
                    TillError::LineNotFound(_) => {
                        AppError::InvalidCommand(format!("no cart line {}", index + 1))
                    }
                    other => other.into(),
                })?;

                writeln!(out, "Removed {} x {}", line.quantity, line.product_name)?;
            }
            Command::Cart => self.write_cart(out)?,
            Command::Checkout => {
                let receipt = self.till.checkout()?;

                receipt.write_to(&mut *out, self.currency)?;

                if let Some(receipts) = &self.receipts {
                    let path = receipts.write(&receipt, self.currency)?;

                    writeln!(out, "Receipt saved to {}", path.display())?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn write_cart(&self, out: &mut impl Write) -> Result<(), AppError> {
        let cart = self.till.cart();

        if cart.is_empty() {
            writeln!(out, "Cart is empty.")?;
        } else {
            writeln!(out, "{}", cart_table(cart.lines(), self.currency))?;
            writeln!(out, "Total: {}", format_amount(cart.total(), self.currency))?;
        }

        Ok(())
    }
}

fn prompt(out: &mut impl Write) -> Result<(), AppError> {
    write!(out, "> ")?;
    out.flush()?;

    Ok(())
}
