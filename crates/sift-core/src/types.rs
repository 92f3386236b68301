use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// FieldType
///
/// Semantic type tag declared per searchable field. Drives operator
/// legality and value coercion; deliberately smaller than any storage
/// schema. Wire names follow the client contract
/// (`string | number | date | boolean | array`).
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum FieldType {
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "boolean")]
    Bool,
    #[serde(rename = "array")]
    Array,
}

impl FieldType {
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Date)
    }

    /// Array fields are stored either as value sets or as `[min, max]`
    /// numeric ranges; both share this tag.
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array)
    }
}

///
/// FieldTypeMap
///
/// Caller-supplied mapping from field name to its [`FieldType`]. One
/// static map per searchable resource; purely a lookup table with no
/// shared state. Fields absent from the map compile with untyped
/// semantics (no date widening, no range treatment).
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, PartialEq, Deserialize, Serialize)]
pub struct FieldTypeMap(BTreeMap<String, FieldType>);

impl FieldTypeMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, ty: FieldType) -> Self {
        self.0.insert(field.into(), ty);
        self
    }

    #[must_use]
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.0.get(field).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, FieldType)> for FieldTypeMap {
    fn from_iter<I: IntoIterator<Item = (S, FieldType)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, ty)| (field.into(), ty))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        let map: FieldTypeMap = serde_json::from_str(
            r#"{"title": "string", "age": "number", "createdAt": "date",
                "active": "boolean", "tags": "array"}"#,
        )
        .unwrap();

        assert_eq!(map.field_type("title"), Some(FieldType::Text));
        assert_eq!(map.field_type("age"), Some(FieldType::Number));
        assert_eq!(map.field_type("createdAt"), Some(FieldType::Date));
        assert_eq!(map.field_type("active"), Some(FieldType::Bool));
        assert_eq!(map.field_type("tags"), Some(FieldType::Array));
        assert_eq!(map.field_type("missing"), None);

        let json = serde_json::to_string(&map).unwrap();
        let back: FieldTypeMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn builder_and_iterator_agree() {
        let built = FieldTypeMap::new()
            .with("title", FieldType::Text)
            .with("age", FieldType::Number);
        let collected: FieldTypeMap =
            [("title", FieldType::Text), ("age", FieldType::Number)]
                .into_iter()
                .collect();

        assert_eq!(built, collected);
        assert_eq!(built.len(), 2);
    }
}
