//! String tables for preview labels and warnings.

use std::collections::HashMap;

use morphin_domain::{DomainError, Localize};

const ENGLISH: &str = include_str!("../../lang/en.json");

/// Flat key -> text table loaded from nested JSON (`{"UI": {"None": "None"}}`
/// becomes `UI.None`).
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| DomainError::parse(format!("Invalid string table: {}", e)))?;
        let mut entries = HashMap::new();
        flatten("", &value, &mut entries);
        Ok(Self { entries })
    }

    /// The bundled English table.
    pub fn english() -> Result<Self, DomainError> {
        Self::from_json(ENGLISH)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        serde_json::Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        _ => {}
    }
}

impl Localize for StringTable {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_covers_preview_sections() {
        let table = StringTable::english().unwrap();
        for section in [
            morphin_domain::shapeshift::PreviewSection::AbilityScores,
            morphin_domain::shapeshift::PreviewSection::Regeneration,
        ] {
            assert_eq!(table.lookup(section.key()).as_deref(), Some(section.english()));
        }
        assert_eq!(table.lookup("UI.None").as_deref(), Some("None"));
    }

    #[test]
    fn nested_keys_flatten_and_unknown_keys_fall_back() {
        let table = StringTable::from_json(r#"{"UI": {"Speeds": "Vitesses"}, "count": 3}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.localize_or("UI.Speeds", "Speeds"), "Vitesses");
        assert_eq!(table.localize_or("UI.Senses", "Senses"), "Senses");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(StringTable::from_json("{").is_err());
    }
}
