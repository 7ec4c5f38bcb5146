// File: crates/drops-core/src/category.rs
// Summary: Category metadata registry (label/color/border lookup) with a CSV-loadable static implementation.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;

/// Display metadata for one drop category. Colors are CSS color strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryMetadata {
    pub label: String,
    pub color: String,
    pub border: String,
}

impl CategoryMetadata {
    pub fn new(label: impl Into<String>, color: impl Into<String>, border: impl Into<String>) -> Self {
        Self { label: label.into(), color: color.into(), border: border.into() }
    }
}

/// Read-only lookup shared by the legend and the drawing routine.
pub trait CategoryRegistry {
    fn lookup(&self, id: &str) -> Option<&CategoryMetadata>;
}

/// In-memory registry keyed by category id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticRegistry {
    entries: BTreeMap<String, CategoryMetadata>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, meta: CategoryMetadata) -> Option<CategoryMetadata> {
        self.entries.insert(id.into(), meta)
    }

    pub fn with(mut self, id: impl Into<String>, meta: CategoryMetadata) -> Self {
        self.insert(id, meta);
        self
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Load a registry from a CSV table with `id,label,color,border` columns
    /// (any order, case-insensitive headers).
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, ConfigError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.to_lowercase())
            .collect::<Vec<_>>();
        let idx = |name: &'static str| -> Result<usize, ConfigError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(ConfigError::MissingColumn(name))
        };
        let (i_id, i_label, i_color, i_border) = (idx("id")?, idx("label")?, idx("color")?, idx("border")?);

        let mut out = Self::new();
        for rec in rdr.records() {
            let rec = rec?;
            let field = |i: usize| rec.get(i).unwrap_or("").to_string();
            let id = field(i_id);
            if id.is_empty() {
                return Err(ConfigError::EmptyField { id: format!("row {}", out.len() + 1), field: "id" });
            }
            let meta = CategoryMetadata::new(field(i_label), field(i_color), field(i_border));
            for (name, value) in [("label", &meta.label), ("color", &meta.color), ("border", &meta.border)] {
                if value.is_empty() {
                    return Err(ConfigError::EmptyField { id, field: name });
                }
            }
            if out.entries.contains_key(&id) {
                return Err(ConfigError::DuplicateCategory(id));
            }
            out.entries.insert(id, meta);
        }
        debug!(categories = out.len(), "loaded category registry");
        Ok(out)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_csv_reader(file)
    }
}

impl CategoryRegistry for StaticRegistry {
    fn lookup(&self, id: &str) -> Option<&CategoryMetadata> {
        self.entries.get(id)
    }
}

impl<T: CategoryRegistry + ?Sized> CategoryRegistry for std::rc::Rc<T> {
    fn lookup(&self, id: &str) -> Option<&CategoryMetadata> {
        (**self).lookup(id)
    }
}
