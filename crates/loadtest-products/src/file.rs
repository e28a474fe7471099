//! JSONL product files for pre-generated upload workloads.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::product::Product;

/// Errors reading or writing product JSONL files.
#[derive(Debug, Error)]
pub enum ProductFileError {
    /// Underlying file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line that did not parse as a product.
    #[error("invalid product on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    /// A product that did not serialize.
    #[error("failed to encode product {id}: {source}")]
    Encode {
        id: String,
        source: serde_json::Error,
    },
}

/// Read one product per line from a JSONL file. Blank lines are skipped.
pub fn read_products_jsonl(path: &Path) -> Result<Vec<Product>, ProductFileError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut products = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let product =
            serde_json::from_str(&line).map_err(|source| ProductFileError::Parse {
                line: idx + 1,
                source,
            })?;
        products.push(product);
    }
    Ok(products)
}

/// Write one product per line to a JSONL file, replacing any existing file.
pub fn write_products_jsonl(path: &Path, products: &[Product]) -> Result<(), ProductFileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for product in products {
        let json = serde_json::to_string(product).map_err(|source| ProductFileError::Encode {
            id: product.id.clone(),
            source,
        })?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(())
}
