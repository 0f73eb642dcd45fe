//! Tabular rendering of the machine's inventories.
//!
//! Display only: column layout is free to change, the values are not.

use crate::domain::money::Denomination;
use crate::domain::product::Product;
use std::io::Write;

pub fn render_products<W: Write>(out: &mut W, products: &[Product]) -> std::io::Result<()> {
    writeln!(out, "List of products")?;
    writeln!(out, "{:<10}{:<12}{:<10}{:<10}", "No", "Name", "Price", "Stock")?;
    writeln!(out, "------------------------------------------")?;
    for product in products {
        writeln!(
            out,
            "{:<10}{:<12}{:<10}{:<10}",
            product.id, product.name, product.price, product.stock
        )?;
    }
    writeln!(out, "------------------------------------------")?;
    Ok(())
}

pub fn render_denominations<W: Write>(
    out: &mut W,
    denominations: &[Denomination],
) -> std::io::Result<()> {
    writeln!(out, "List of money")?;
    writeln!(
        out,
        "{:<10}{:<12}{:<10}{:<10}",
        "Kind", "Label", "Value", "Stock"
    )?;
    writeln!(out, "------------------------------------------")?;
    for denom in denominations {
        writeln!(
            out,
            "{:<10}{:<12}{:<10}{:<10}",
            denom.kind.to_string(),
            denom.label,
            denom.value,
            denom.stock
        )?;
    }
    writeln!(out, "------------------------------------------")?;
    Ok(())
}
