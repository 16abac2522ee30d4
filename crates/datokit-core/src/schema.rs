// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CMS schema objects as delivered by the host: models, fields, records,
//! and uploads. Shapes follow the JSON:API documents of the content
//! management API, reduced to the attributes this crate and its helpers read.

use serde::{Deserialize, Serialize};

/// A JSON:API relationship pointing at a single resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceRef>,
}

impl Relationship {
    pub fn to(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            data: Some(ResourceRef {
                id: id.into(),
                kind: kind.into(),
            }),
        }
    }
}

/// Identifier of a related resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A model (item type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub id: String,
    pub attributes: ItemTypeAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTypeAttributes {
    pub api_key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub singleton: bool,
    #[serde(default)]
    pub modular_block: bool,
}

impl ItemType {
    pub fn new(id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: ItemTypeAttributes {
                api_key: api_key.into(),
                ..Default::default()
            },
        }
    }

    pub fn singleton(mut self) -> Self {
        self.attributes.singleton = true;
        self
    }
}

/// A field belonging to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub attributes: FieldAttributes,
    #[serde(default)]
    pub relationships: FieldRelationships,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldAttributes {
    pub api_key: String,
    #[serde(default)]
    pub label: String,
    /// Raw field type tag, e.g. `"string"` or `"structured_text"`.
    pub field_type: String,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub validators: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRelationships {
    #[serde(default)]
    pub item_type: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_extension: Option<Relationship>,
}

impl Field {
    pub fn new(
        id: impl Into<String>,
        api_key: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            attributes: FieldAttributes {
                api_key: api_key.into(),
                field_type: field_type.into(),
                ..Default::default()
            },
            relationships: FieldRelationships::default(),
        }
    }

    /// Attaches the field to the model with the given ID.
    pub fn in_item_type(mut self, item_type_id: impl Into<String>) -> Self {
        self.relationships.item_type = Relationship::to(item_type_id, "item_type");
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>, config: serde_json::Value) -> Self {
        self.attributes.validators.insert(name.into(), config);
        self
    }

    pub fn localized(mut self) -> Self {
        self.attributes.localized = true;
        self
    }
}

/// A record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub relationships: ItemRelationships,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRelationships {
    #[serde(default)]
    pub item_type: Relationship,
}

impl Item {
    pub fn new(id: impl Into<String>, item_type_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: serde_json::Map::new(),
            relationships: ItemRelationships {
                item_type: Relationship::to(item_type_id, "item_type"),
            },
        }
    }
}

/// A media library upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: UploadAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadAttributes {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_deserializes_from_jsonapi_shape() {
        let json = serde_json::json!({
            "id": "f1",
            "attributes": {
                "api_key": "title",
                "label": "Title",
                "field_type": "string",
                "localized": true,
                "validators": { "required": {} }
            },
            "relationships": {
                "item_type": { "data": { "id": "m1", "type": "item_type" } }
            }
        });
        let field: Field = serde_json::from_value(json).unwrap();
        assert_eq!(field.attributes.api_key, "title");
        assert!(field.attributes.localized);
        assert!(field.attributes.validators.contains_key("required"));
        assert_eq!(
            field.relationships.item_type.data.as_ref().map(|r| r.id.as_str()),
            Some("m1")
        );
        assert!(field.relationships.field_extension.is_none());
    }

    #[test]
    fn upload_without_attributes_deserializes() {
        let upload: Upload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(upload.attributes.url.is_none());
    }
}
