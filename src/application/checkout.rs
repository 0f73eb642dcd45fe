use crate::domain::change::make_change;
use crate::domain::money::{DenomId, Denomination, PaymentTally};
use crate::domain::ports::{CatalogBox, LedgerBox};
use crate::domain::product::{Product, ProductKey, SelectionTally};
use crate::error::{Result, VendingError};
use std::collections::BTreeMap;
use std::io::{BufRead, ErrorKind, Write};

/// Outcome of one shopping session.
///
/// On cancellation `success` is false, `change` is empty and `paid` holds
/// the money to hand back; nothing was committed to the inventories.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub purchased: SelectionTally,
    pub total: i64,
    pub paid: PaymentTally,
    pub change: Vec<DenomId>,
    pub success: bool,
}

/// Drives shopping sessions against the catalog and ledger it owns.
///
/// A session is a straight line through three states: selecting products,
/// paying, then either a committed checkout or a cancellation. Each store
/// operation is awaited before the next starts, so a session's commit
/// sequence never interleaves with anything else.
pub struct CheckoutEngine {
    catalog: CatalogBox,
    ledger: LedgerBox,
}

impl CheckoutEngine {
    pub fn new(catalog: CatalogBox, ledger: LedgerBox) -> Self {
        Self { catalog, ledger }
    }

    /// Current product inventory, for display.
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.catalog.all().await
    }

    /// Current money inventory, for display.
    pub async fn denominations(&self) -> Result<Vec<Denomination>> {
        self.ledger.all().await
    }

    /// Runs one full shopping session over line-oriented I/O.
    ///
    /// Blocks on `input` for every product id, inserted denomination and
    /// retry confirmation; prompts and the closing summary go to `out`.
    /// Recoverable validation errors are reported and re-prompted in
    /// place. `NoSelection` and I/O failures propagate to the caller.
    pub async fn run_session<R, W>(&self, input: &mut R, out: &mut W) -> Result<Receipt>
    where
        R: BufRead,
        W: Write,
    {
        let (purchased, total) = self.select_products(input, out).await?;

        writeln!(out, "\n------------ Checkout ------------")?;
        write_purchased(out, &purchased)?;

        // The pool the change engine sees is fixed for the session; the
        // authoritative ledger only changes at commit.
        let pool = self.ledger.all().await?;
        let hint = pool
            .iter()
            .map(|d| d.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut paid = PaymentTally::new();
        let receipt = loop {
            while paid.total() < total {
                writeln!(out, "\nTotal amount left: {}", total - paid.total())?;
                self.insert_one(input, out, &mut paid, &hint).await?;
            }

            match make_change(paid.total() - total, &pool, &paid) {
                Ok(change) => {
                    self.commit(&purchased, &paid, &change).await?;
                    break Receipt {
                        purchased,
                        total,
                        paid,
                        change,
                        success: true,
                    };
                }
                Err(VendingError::InsufficientChange) => {
                    writeln!(
                        out,
                        "{}, press ENTER to insert more money or type \"exit\" to cancel",
                        VendingError::InsufficientChange
                    )?;
                    match read_line(input)? {
                        None => {
                            break Receipt {
                                purchased,
                                total,
                                paid,
                                change: Vec::new(),
                                success: false,
                            };
                        }
                        Some(answer) if answer == "exit" => {
                            break Receipt {
                                purchased,
                                total,
                                paid,
                                change: Vec::new(),
                                success: false,
                            };
                        }
                        Some(_) => {
                            // The tally is preserved and already covers the
                            // price; only new money can unblock the retry.
                            self.insert_one(input, out, &mut paid, &hint).await?;
                        }
                    }
                }
                Err(other) => return Err(other),
            }
        };

        write_summary(out, &receipt)?;
        Ok(receipt)
    }

    /// Selecting state: accumulates product ids until a blank line.
    ///
    /// Availability is checked against a shadow copy of the catalog that is
    /// decremented per selection, so a session cannot oversell a slot it
    /// has already drained. The authoritative catalog is untouched until
    /// commit.
    async fn select_products<R, W>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(SelectionTally, i64)>
    where
        R: BufRead,
        W: Write,
    {
        let mut shadow = self.catalog.all().await?;
        let mut purchased = SelectionTally::new();
        let mut total = 0i64;

        writeln!(out, "Please select product no:")?;
        loop {
            let token = read_line(input)?.unwrap_or_default();
            if token.is_empty() {
                if purchased.is_empty() {
                    return Err(VendingError::NoSelection);
                }
                break;
            }

            match reserve(&mut shadow, &token) {
                Ok(key) => {
                    total += key.price;
                    purchased.insert(key);
                    writeln!(out, "Press ENTER to checkout or continue selecting products")?;
                }
                Err(err) => writeln!(out, "{err}, please select product no. again")?,
            }
        }

        Ok((purchased, total))
    }

    /// Collects one valid denomination, re-prompting on unknown labels.
    async fn insert_one<R, W>(
        &self,
        input: &mut R,
        out: &mut W,
        paid: &mut PaymentTally,
        hint: &str,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            write!(out, "Please insert money ({hint}): ")?;
            out.flush()?;
            let Some(label) = read_line(input)? else {
                return Err(VendingError::Io(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "input ended during payment",
                )));
            };
            match self.ledger.find(&label).await? {
                Some(denom) => {
                    paid.insert(&denom);
                    return Ok(());
                }
                None => writeln!(
                    out,
                    "{}, please try again",
                    VendingError::DenominationNotFound
                )?,
            }
        }
    }

    /// Commit phase: the three mutations touch disjoint accounting, and
    /// change feasibility was proven against the shadow pool, so underflow
    /// here means the machine's state is inconsistent and the error
    /// propagates.
    async fn commit(
        &self,
        purchased: &SelectionTally,
        paid: &PaymentTally,
        change: &[DenomId],
    ) -> Result<()> {
        self.catalog.commit_decrease(purchased).await?;
        self.ledger.increase_stock(paid).await?;
        self.ledger.decrease_stock(change).await?;
        tracing::info!(
            total = purchased.total(),
            paid = paid.total(),
            change_units = change.len(),
            "checkout committed"
        );
        Ok(())
    }
}

/// Reads one line, trimmed. `None` means the input is exhausted.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn plural(word: &str, count: u32) -> String {
    if count > 1 {
        format!("{word}s")
    } else {
        word.to_string()
    }
}

fn write_purchased<W: Write>(out: &mut W, purchased: &SelectionTally) -> std::io::Result<()> {
    writeln!(out, "You've bought")?;
    for (key, count) in purchased.iter() {
        writeln!(
            out,
            "{} price {} for {} {}",
            key.name,
            key.price,
            count,
            plural("piece", count)
        )?;
    }
    Ok(())
}

fn write_money_lines<'a, W, I>(out: &mut W, lines: I) -> std::io::Result<()>
where
    W: Write,
    I: Iterator<Item = (&'a DenomId, u32)>,
{
    for (id, count) in lines {
        writeln!(
            out,
            "{} {} for {} {}",
            id.kind,
            id.label,
            count,
            plural(&id.kind.to_string(), count)
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, receipt: &Receipt) -> std::io::Result<()> {
    writeln!(out, "\n------------ Summary ------------")?;
    write_purchased(out, &receipt.purchased)?;
    writeln!(out, "total price: {}", receipt.total)?;

    if receipt.success {
        writeln!(out, "\nYou've paid")?;
        write_money_lines(out, receipt.paid.iter().rev())?;

        writeln!(out, "\nChange")?;
        if receipt.change.is_empty() {
            writeln!(out, "no change")?;
        } else {
            let mut counts: BTreeMap<&DenomId, u32> = BTreeMap::new();
            for id in &receipt.change {
                *counts.entry(id).or_insert(0) += 1;
            }
            write_money_lines(out, counts.into_iter().rev())?;
        }
    } else {
        writeln!(out, "unsuccessful!")?;
        writeln!(out, "\nReturned")?;
        write_money_lines(out, receipt.paid.iter().rev())?;
    }
    writeln!(out, "---------------------------------")?;
    Ok(())
}

fn reserve(shadow: &mut [Product], token: &str) -> Result<ProductKey> {
    let id: u8 = token.parse().map_err(|_| VendingError::ProductNotFound)?;
    let Some(product) = shadow.iter_mut().find(|p| p.id == id) else {
        return Err(VendingError::ProductNotFound);
    };
    if product.stock == 0 {
        return Err(VendingError::OutOfStock(product.name.clone()));
    }
    product.stock -= 1;
    Ok(product.key())
}
