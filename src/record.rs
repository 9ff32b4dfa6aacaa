//! Record — one row zipped against the header.
//!
//! Values are kept as raw strings (no type coercion). Field order follows the
//! header, and serialization preserves it.

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Zip header names with row values. Caller guarantees equal lengths.
    pub fn from_parts(header: &[String], values: Vec<String>) -> Self {
        debug_assert_eq!(header.len(), values.len());
        let fields = header.iter().cloned().zip(values).collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Strip one trailing line terminator (`\n` or `\r\n`).
#[inline]
pub fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Header: split on the delimiter and trim each column name.
pub fn split_header(line: &str, delimiter: char) -> Vec<String> {
    trim_line_end(line)
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .collect()
}

/// Data row: naive split, values verbatim (no quote handling).
pub fn split_row(line: &str, delimiter: char) -> Vec<String> {
    trim_line_end(line)
        .split(delimiter)
        .map(str::to_string)
        .collect()
}
