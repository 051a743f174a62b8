//! Table rendering for terminal and receipt output.

use std::ops::Range;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{cart::CartLine, money::format_amount, products::Product};

/// Render a catalogue listing.
pub fn products_table<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    currency: &'static Currency,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Price", "Stock", "Category"]);

    for product in products {
        builder.push_record([
            product.name.clone(),
            format_amount(product.price, currency),
            product.quantity.to_string(),
            product.category.clone(),
        ]);
    }

    render(builder, 1..3)
}

/// Render cart lines, numbered from 1.
pub fn cart_table(lines: &[CartLine], currency: &'static Currency) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qty", "Unit Price", "Subtotal"]);

    for (idx, line) in lines.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            line.product_name.clone(),
            line.quantity.to_string(),
            format_amount(line.unit_price, currency),
            format_amount(line.subtotal, currency),
        ]);
    }

    render(builder, 2..5)
}

/// Build `builder` into a rounded table with a rule under the header and the given columns
/// right-aligned.
pub(crate) fn render(builder: Builder, right_aligned: Range<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Columns::new(right_aligned), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    table.to_string()
}
