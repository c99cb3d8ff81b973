use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult};
use crate::models::{Catalog, Product};

use super::CatalogStore;

const HEADER: [&str; 4] = ["Product ID", "Category", "Rating", "Users Purchased"];
const PRICE_HEADER: &str = "Price";

/// One catalog file row; `Price` is absent from files in the older layout
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Product ID")]
    id: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Users Purchased")]
    users_purchased: u64,
    #[serde(rename = "Price", default)]
    price: Option<f64>,
}

impl From<CsvRow> for Product {
    fn from(row: CsvRow) -> Self {
        Product {
            id: row.id,
            category: row.category,
            rating: row.rating,
            users_purchased: row.users_purchased,
            price: row.price,
        }
    }
}

/// Catalog persisted as a flat CSV file
#[derive(Debug, Clone)]
pub struct CsvCatalogStore {
    path: PathBuf,
}

impl CsvCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[async_trait::async_trait]
impl CatalogStore for CsvCatalogStore {
    async fn load(&self) -> AppResult<Catalog> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> AppResult<Catalog> {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Catalog file missing, starting empty");
                return Ok(Catalog::new());
            }
            let file = std::fs::File::open(&path)?;
            let catalog = read_catalog(file)?;
            tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
            Ok(catalog)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Catalog load task failed: {}", e)))?
    }

    async fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let path = self.path.clone();
        let snapshot = catalog.clone();
        tokio::task::spawn_blocking(move || -> AppResult<()> {
            replace_file(&path, |file| write_catalog(&snapshot, file))?;
            tracing::debug!(path = %path.display(), products = snapshot.len(), "Catalog saved");
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Catalog save task failed: {}", e)))?
    }
}

/// Writes into a temporary sibling of `path`, then renames it over `path`
///
/// The existing file is untouched unless `write` succeeds.
fn replace_file<F>(path: &Path, write: F) -> AppResult<()>
where
    F: FnOnce(&mut NamedTempFile) -> AppResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    write(&mut file)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Parses a catalog from CSV with either the four- or five-column header
pub fn read_catalog<R: Read>(reader: R) -> AppResult<Catalog> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut products = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        products.push(Product::from(row?));
    }

    Catalog::from_products(products)
}

/// Writes a catalog as CSV; the `Price` column is emitted only if some product has a price
pub fn write_catalog<W: Write>(catalog: &Catalog, writer: W) -> AppResult<()> {
    let with_price = catalog.products().iter().any(|p| p.price.is_some());
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = HEADER.to_vec();
    if with_price {
        header.push(PRICE_HEADER);
    }
    writer.write_record(&header)?;

    for product in catalog.products() {
        let mut record = vec![
            product.id.clone(),
            product.category.clone(),
            product.rating.to_string(),
            product.users_purchased.to_string(),
        ];
        if with_price {
            record.push(product.price.map(|p| p.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
