use crate::types::{Corpus, CourseRecord, Item};
use eduai_common::{EduAiError, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns every source must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["title", "description", "tags"];

/// Columns read when present, empty otherwise
const OPTIONAL_COLUMNS: [&str; 2] = ["category", "level"];

/// Cell values treated as missing in tabular sources
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Corpus source format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated values with a header row
    Csv,
    /// Top-level JSON array of objects
    Json,
}

impl SourceFormat {
    /// Detect format from file extension (`.json` is JSON, anything else CSV)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Reads course sources into a validated corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader {
    format: Option<SourceFormat>,
}

impl CorpusLoader {
    /// Create loader that detects the format from the file extension
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a source format
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Load corpus from file
    pub fn load(&self, path: &Path) -> Result<Corpus> {
        let format = self.format.unwrap_or_else(|| SourceFormat::from_path(path));
        debug!("Loading corpus from {} ({:?})", path.display(), format);

        let file = File::open(path).map_err(|e| {
            EduAiError::data_source(format!("Failed to open {}: {}", path.display(), e))
        })?;

        self.load_reader(BufReader::new(file), format)
    }

    /// Load corpus from any reader
    pub fn load_reader<R: Read>(&self, reader: R, format: SourceFormat) -> Result<Corpus> {
        let records = match format {
            SourceFormat::Csv => read_csv_records(reader)?,
            SourceFormat::Json => read_json_records(reader)?,
        };

        Ok(retain_complete(records))
    }
}

/// Drop rows missing a required field, logging what was kept
fn retain_complete(records: Vec<CourseRecord>) -> Corpus {
    let total = records.len();
    let mut items = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        match Item::from_record(record) {
            Some(item) => items.push(item),
            None => debug!("Dropping row {}: missing title, description or tags", i + 1),
        }
    }

    info!(
        "Loaded {} courses ({} incomplete rows dropped)",
        items.len(),
        total - items.len()
    );

    Corpus::from_items(items)
}

/// Position of each known column in the source
#[derive(Debug, Default)]
struct ColumnMap {
    title: Option<usize>,
    description: Option<usize>,
    tags: Option<usize>,
    category: Option<usize>,
    level: Option<usize>,
}

impl ColumnMap {
    fn resolve<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut map = Self::default();

        for (idx, name) in names.into_iter().enumerate() {
            let slot = match name.trim_start_matches('\u{feff}').trim() {
                "title" => &mut map.title,
                "description" => &mut map.description,
                "tags" => &mut map.tags,
                "category" => &mut map.category,
                "level" => &mut map.level,
                _ => continue,
            };
            // First occurrence wins
            slot.get_or_insert(idx);
        }

        let present = [map.title, map.description, map.tags];
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .zip(present)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(EduAiError::data_source(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        for (name, idx) in OPTIONAL_COLUMNS.iter().zip([map.category, map.level]) {
            if idx.is_none() {
                warn!("Column '{}' not found, using empty values", name);
            }
        }

        Ok(map)
    }

    fn extract<F>(&self, cell: F) -> CourseRecord
    where
        F: Fn(usize) -> Option<String>,
    {
        let get = |idx: Option<usize>| idx.and_then(&cell);
        CourseRecord {
            title: get(self.title),
            description: get(self.description),
            tags: get(self.tags),
            category: get(self.category),
            level: get(self.level),
        }
    }
}

fn read_csv_records<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| EduAiError::data_source(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = ColumnMap::resolve(headers.iter())?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            EduAiError::data_source(format!("Failed to parse CSV row {}: {}", i + 1, e))
        })?;
        records.push(columns.extract(|idx| csv_cell(row.get(idx))));
    }

    Ok(records)
}

fn csv_cell(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.is_empty() && !NA_MARKERS.contains(value))
        .map(str::to_string)
}

fn read_json_records<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| EduAiError::data_source(format!("Failed to parse JSON: {}", e)))?;

    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return Err(EduAiError::data_source(format!(
                "Expected a JSON array of course objects, found {}",
                json_kind(&other)
            )))
        }
    };

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        match row {
            Value::Object(map) => objects.push(map),
            other => {
                return Err(EduAiError::data_source(format!(
                    "Row {} is {}, expected an object",
                    i + 1,
                    json_kind(&other)
                )))
            }
        }
    }

    // A key seen in any object counts as a column
    let mut keys: Vec<&str> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key.as_str());
            }
        }
    }
    let columns = ColumnMap::resolve(keys.iter().copied())?;

    let records = objects
        .iter()
        .map(|object| {
            columns.extract(|idx| object.get(keys[idx]).and_then(json_cell))
        })
        .collect();

    Ok(records)
}

fn json_cell(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::Array(_) | Value::Object(_) => None,
                scalar => json_cell(scalar),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Null | Value::Object(_) => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
