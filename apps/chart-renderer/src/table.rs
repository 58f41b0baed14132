use anyhow::{Context, Result};
use csv::StringRecord;
use std::path::Path;

/// A generated dataset loaded generically, addressed by column name
pub struct Table {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to read CSV file '{}'", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("'{}' has no header row", path.display()))?
            .clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.with_context(|| format!("malformed row in '{}'", path.display()))?);
        }
        Ok(Table { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .with_context(|| format!("column '{name}' not present in table"))
    }

    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).unwrap_or(""))
            .collect())
    }

    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| {
                let raw = row.get(index).unwrap_or("");
                raw.parse::<f64>()
                    .with_context(|| format!("non-numeric value '{raw}' in column '{name}'"))
            })
            .collect()
    }
}

/// Frequency of each distinct value, most frequent first (ties alphabetical)
pub fn value_counts<'a>(values: &[&'a str]) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}
