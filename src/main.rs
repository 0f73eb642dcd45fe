use clap::Parser;
use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vendo::application::checkout::CheckoutEngine;
use vendo::domain::money::{DenomKind, Denomination};
use vendo::domain::ports::{CatalogBox, LedgerBox};
use vendo::domain::product::Product;
use vendo::infrastructure::in_memory::{InMemoryCatalog, InMemoryLedger};
use vendo::interfaces::console;
use vendo::interfaces::csv::inventory_reader::InventoryReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session script to read instead of interactive stdin
    script: Option<PathBuf>,

    /// Product inventory CSV (id,name,price,stock)
    #[arg(long)]
    products: Option<PathBuf>,

    /// Denomination inventory CSV (kind,label,value,stock)
    #[arg(long)]
    denominations: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let products = match &cli.products {
        Some(path) => load_records(path)?,
        None => default_products(),
    };
    let denominations = match &cli.denominations {
        Some(path) => load_records(path)?,
        None => default_denominations(),
    };

    let catalog: CatalogBox = Box::new(InMemoryCatalog::new(products));
    let ledger: LedgerBox = Box::new(InMemoryLedger::new(denominations));
    let engine = CheckoutEngine::new(catalog, ledger);

    let mut input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path).into_diagnostic()?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Shop until the user types "exit" at the continue prompt (or the
    // script runs out).
    loop {
        let products = engine.products().await.into_diagnostic()?;
        console::render_products(&mut out, &products).into_diagnostic()?;
        let denominations = engine.denominations().await.into_diagnostic()?;
        console::render_denominations(&mut out, &denominations).into_diagnostic()?;

        engine.run_session(&mut input, &mut out).await.into_diagnostic()?;

        writeln!(
            out,
            "\nPress ENTER key to continue shopping or type \"exit\" to exit program"
        )
        .into_diagnostic()?;
        let mut answer = String::new();
        if input.read_line(&mut answer).into_diagnostic()? == 0 || answer.trim() == "exit" {
            break;
        }
    }

    Ok(())
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).into_diagnostic()?;
    let reader = InventoryReader::new(file);
    let mut records = Vec::new();
    for record in reader.records::<T>() {
        records.push(record.into_diagnostic()?);
    }
    Ok(records)
}

fn default_products() -> Vec<Product> {
    vec![
        Product::new(1, "Chips", 5, 1),
        Product::new(2, "Wafers", 10, 10),
        Product::new(3, "Choco Bar", 25, 10),
        Product::new(4, "Cola", 15, 10),
    ]
}

fn default_denominations() -> Vec<Denomination> {
    vec![
        Denomination::new(DenomKind::Coin, "1", 1, 0),
        Denomination::new(DenomKind::Coin, "5", 5, 0),
        Denomination::new(DenomKind::Coin, "10", 10, 0),
        Denomination::new(DenomKind::Note, "20", 20, 10),
        Denomination::new(DenomKind::Note, "50", 50, 10),
    ]
}
