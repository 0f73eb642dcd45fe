use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// Writes a session script, one input line per entry. An empty entry is
/// the blank line that ends product selection.
pub fn write_script(path: &Path, lines: &[&str]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

/// Writes a product inventory CSV fixture.
pub fn write_products_csv(path: &Path, rows: &[(&str, &str, &str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["id", "name", "price", "stock"])?;
    for (id, name, price, stock) in rows {
        wtr.write_record([*id, *name, *price, *stock])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a denomination inventory CSV fixture.
pub fn write_denominations_csv(
    path: &Path,
    rows: &[(&str, &str, &str, &str)],
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["kind", "label", "value", "stock"])?;
    for (kind, label, value, stock) in rows {
        wtr.write_record([*kind, *label, *value, *stock])?;
    }
    wtr.flush()?;
    Ok(())
}
