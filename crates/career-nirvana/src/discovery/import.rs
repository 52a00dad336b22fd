use super::catalog::{CareerRecord, StoryCatalog};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read story catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid story catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("story id {0} appears more than once")]
    DuplicateId(u32),
    #[error("story {id} has an empty {field}")]
    MissingField { id: u32, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: u32,
    name: String,
    title: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    income: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    quote: String,
    #[serde(default)]
    duration: String,
    category: String,
}

impl CatalogRow {
    fn into_record(self) -> Result<CareerRecord, CatalogImportError> {
        for (field, value) in [
            ("name", &self.name),
            ("title", &self.title),
            ("category", &self.category),
        ] {
            if value.is_empty() {
                return Err(CatalogImportError::MissingField { id: self.id, field });
            }
        }

        let tags = self
            .tags
            .split(';')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(CareerRecord {
            id: self.id,
            display_name: self.name,
            title: self.title,
            location: self.location,
            income_range: self.income,
            tags,
            image_ref: self.image,
            quote: self.quote,
            duration_label: self.duration,
            category: self.category,
        })
    }
}

/// Loads a replacement story catalog from a CSV export.
///
/// Columns: `id,name,title,location,income,tags,image,quote,duration,category`, with tags
/// separated by `;`.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<StoryCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<StoryCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<CatalogRow>() {
            records.push(row?.into_record()?);
        }

        StoryCatalog::new(records)
    }
}
