use crate::error::CatalogError;
use crate::item::{Item, ItemRecord};
use ahash::AHashMap;

/// Genre axes used by the festival kiosk catalogs, in column order.
pub const DEFAULT_GENRE_AXES: [&str; 18] = [
    "Comedy", "Art", "Chill", "Food", "Social", "Rock", "Pop", "Soul", "Jazz",
    "Electronic", "Folk", "Reggae", "Hip-hop", "Punk", "Rap", "Classical", "Indie", "Other",
];

/// Items of one category, in insertion order
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    items: Vec<Item>,
    lookup: AHashMap<String, usize>,
}

impl Category {
    fn new(name: String) -> Self {
        Self {
            name,
            items: Vec::new(),
            lookup: AHashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by identifier
    pub fn get(&self, identifier: &str) -> Option<&Item> {
        self.lookup.get(identifier).map(|&i| &self.items[i])
    }
}

/// Immutable, validated item catalog grouped by category
///
/// Built once from decoded records. Every vector has the same dimension,
/// inferred from the first record. Categories and the items inside them
/// keep the order they were first seen in, which is what makes shortlist
/// tie-breaking deterministic.
#[derive(Debug, Clone)]
pub struct Catalog {
    dim: usize,
    axes: Option<Vec<String>>,
    categories: Vec<Category>,
    index: AHashMap<String, usize>,
    generation: u64,
}

impl Catalog {
    /// Validate and group decoded records
    pub fn from_records<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let mut records = records.into_iter().peekable();
        let dim = match records.peek() {
            Some(first) => first.features.len(),
            None => return Err(CatalogError::Empty),
        };
        if dim == 0 {
            return Err(CatalogError::ZeroDimension);
        }

        let mut categories: Vec<Category> = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();

        for record in records {
            if record.features.len() != dim {
                return Err(CatalogError::DimensionMismatch {
                    category: record.category,
                    identifier: record.identifier,
                    expected: dim,
                    actual: record.features.len(),
                });
            }
            if let Some(axis) = record.features.iter().position(|x| !x.is_finite()) {
                return Err(CatalogError::NonFiniteValue {
                    category: record.category,
                    identifier: record.identifier,
                    axis,
                });
            }

            let slot = match index.get(&record.category) {
                Some(&slot) => slot,
                None => {
                    index.insert(record.category.clone(), categories.len());
                    categories.push(Category::new(record.category.clone()));
                    categories.len() - 1
                }
            };

            let category = &mut categories[slot];
            if category.lookup.contains_key(&record.identifier) {
                return Err(CatalogError::DuplicateIdentifier {
                    category: record.category,
                    identifier: record.identifier,
                });
            }
            category
                .lookup
                .insert(record.identifier.clone(), category.items.len());
            category.items.push(Item::from_record(record));
        }

        Ok(Self {
            dim,
            axes: None,
            categories,
            index,
            generation: 0,
        })
    }

    /// Attach names for the feature axes
    pub fn with_axes<S: Into<String>>(
        mut self,
        axes: impl IntoIterator<Item = S>,
    ) -> Result<Self, CatalogError> {
        let axes: Vec<String> = axes.into_iter().map(Into::into).collect();
        if axes.len() != self.dim {
            return Err(CatalogError::AxisCountMismatch {
                expected: self.dim,
                actual: axes.len(),
            });
        }
        self.axes = Some(axes);
        Ok(self)
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Feature dimension shared by every item
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn axes(&self) -> Option<&[String]> {
        self.axes.as_deref()
    }

    /// Name of axis `i`, falling back to `axis_<i>` when the catalog is unnamed
    pub fn axis_name(&self, i: usize) -> String {
        match self.axes.as_ref().and_then(|axes| axes.get(i)) {
            Some(name) => name.clone(),
            None => format!("axis_{}", i),
        }
    }

    /// Publication counter assigned by [`crate::CatalogHandle`]; 0 when unpublished
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&i| &self.categories[i])
    }

    /// Category that a request can select from: present and non-empty
    pub fn require(&self, name: &str) -> Result<&Category, CatalogError> {
        match self.category(name) {
            Some(category) if !category.is_empty() => Ok(category),
            _ => Err(CatalogError::MissingCategory(name.to_string())),
        }
    }

    pub fn item(&self, category: &str, identifier: &str) -> Result<&Item, CatalogError> {
        self.category(category)
            .and_then(|c| c.get(identifier))
            .ok_or_else(|| CatalogError::UnknownItem {
                category: category.to_string(),
                identifier: identifier.to_string(),
            })
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name()).collect()
    }

    /// Total number of items across all categories
    pub fn len(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
