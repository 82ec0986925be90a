use serde::{Deserialize, Serialize};

/// Raw course row as read from a data source, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
}

/// Validated course
///
/// Only constructed when title, description and tags are all present.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    title: String,
    description: String,
    tags: String,
    category: String,
    level: String,
    combined_text: String,
}

impl Item {
    /// Create a new item and derive its combined text
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: impl Into<String>,
        category: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let description = description.into();
        let tags = tags.into();
        // Field order decides which terms dominate the item vector.
        let combined_text = format!("{} {} {}", title, description, tags);

        Self {
            title,
            description,
            tags,
            category: category.into(),
            level: level.into(),
            combined_text,
        }
    }

    /// Validate a raw record; `None` when a required field is missing or empty
    pub fn from_record(record: CourseRecord) -> Option<Self> {
        let CourseRecord {
            title,
            description,
            tags,
            category,
            level,
        } = record;

        let present = |field: Option<String>| field.filter(|value| !value.is_empty());

        Some(Self::new(
            present(title)?,
            present(description)?,
            present(tags)?,
            category.unwrap_or_default(),
            level.unwrap_or_default(),
        ))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// `title + " " + description + " " + tags`
    pub fn combined_text(&self) -> &str {
        &self.combined_text
    }

    /// Public view of this item
    pub fn recommendation(&self) -> Recommendation {
        Recommendation {
            title: self.title.clone(),
            category: self.category.clone(),
            level: self.level.clone(),
            description: self.description.clone(),
        }
    }
}

/// Course as returned to callers (tags and combined text stay internal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub category: String,
    pub level: String,
    pub description: String,
}

/// Ordered, immutable collection of validated items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    items: Vec<Item>,
}

impl Corpus {
    /// Create corpus from already validated items, keeping their order
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Validate raw records, dropping incomplete ones
    pub fn from_records(records: impl IntoIterator<Item = CourseRecord>) -> Self {
        Self {
            items: records.into_iter().filter_map(Item::from_record).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get item by corpus position
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
