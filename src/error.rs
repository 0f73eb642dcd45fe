use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("product does not exist")]
    ProductNotFound,
    #[error("money is not accepted")]
    DenominationNotFound,
    #[error("{0} is out of stock")]
    OutOfStock(String),
    #[error("no product was selected")]
    NoSelection,
    #[error("insufficient change")]
    InsufficientChange,
    #[error("{0}'s stock is less than zero")]
    StockUnderflow(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VendingError>;
