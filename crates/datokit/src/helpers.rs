// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookups and predicates over the schema objects carried by a [`Ctx`].

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

use datokit_core::{Ctx, Field, FieldType, ItemType, Upload};

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("api key pattern is valid"));

// Models

/// The model a field belongs to, if the context has loaded it.
pub fn get_field_item_type<'a>(field: &Field, ctx: &'a Ctx) -> Option<&'a ItemType> {
    let parent = field.relationships.item_type.data.as_ref()?;
    ctx.item_types.get(&parent.id)
}

pub fn get_item_type_by_api_key<'a>(api_key: &str, ctx: &'a Ctx) -> Option<&'a ItemType> {
    ctx.item_types
        .values()
        .find(|model| model.attributes.api_key == api_key)
}

pub fn is_singleton_model(item_type: &ItemType) -> bool {
    item_type.attributes.singleton
}

pub fn is_collection_model(item_type: &ItemType) -> bool {
    !is_singleton_model(item_type)
}

// Field relationships

pub fn field_belongs_to_item_type(field: &Field, item_type_api_key: &str, ctx: &Ctx) -> bool {
    get_field_item_type(field, ctx).is_some_and(|model| model.attributes.api_key == item_type_api_key)
}

/// Fields of the model with the given API key, sorted by field ID.
pub fn get_fields_by_item_type<'a>(item_type_api_key: &str, ctx: &'a Ctx) -> Vec<&'a Field> {
    sorted_fields(ctx, |field| {
        field_belongs_to_item_type(field, item_type_api_key, ctx)
    })
}

/// Fields of the given type across every loaded model, sorted by field ID.
pub fn get_all_fields_of_type(field_type: FieldType, ctx: &Ctx) -> Vec<&Field> {
    sorted_fields(ctx, |field| is_field_type(field, field_type))
}

fn sorted_fields<'a>(ctx: &'a Ctx, keep: impl Fn(&Field) -> bool) -> Vec<&'a Field> {
    let mut fields: Vec<&Field> = ctx.fields.values().filter(|f| keep(f)).collect();
    fields.sort_by(|a, b| a.id.cmp(&b.id));
    fields
}

/// `true` when every API key names a field loaded in the context.
pub fn context_has_all_fields<S: AsRef<str>>(ctx: &Ctx, field_api_keys: &[S]) -> bool {
    field_api_keys.iter().all(|key| {
        ctx.fields
            .values()
            .any(|field| field.attributes.api_key == key.as_ref())
    })
}

// Field types

pub fn is_field_type(field: &Field, field_type: FieldType) -> bool {
    field.attributes.field_type == field_type.as_ref()
}

pub fn is_string_field(field: &Field) -> bool {
    is_field_type(field, FieldType::String)
}

pub fn is_text_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Text)
}

pub fn is_json_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Json)
}

pub fn is_structured_text_field(field: &Field) -> bool {
    is_field_type(field, FieldType::StructuredText)
}

/// Single or multiple links.
pub fn is_link_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Link) || is_field_type(field, FieldType::Links)
}

/// Single file or gallery.
pub fn is_file_field(field: &Field) -> bool {
    is_field_type(field, FieldType::File) || is_field_type(field, FieldType::Gallery)
}

pub fn is_boolean_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Boolean)
}

pub fn is_date_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Date)
}

pub fn is_date_time_field(field: &Field) -> bool {
    is_field_type(field, FieldType::DateTime)
}

pub fn is_integer_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Integer)
}

pub fn is_float_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Float)
}

pub fn is_color_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Color)
}

pub fn is_lat_lon_field(field: &Field) -> bool {
    is_field_type(field, FieldType::LatLon)
}

pub fn is_seo_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Seo)
}

pub fn is_slug_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Slug)
}

pub fn is_video_field(field: &Field) -> bool {
    is_field_type(field, FieldType::Video)
}

// Field properties

/// Any entry under `name` counts, including one set to JSON `null`.
fn has_validator(field: &Field, name: &str) -> bool {
    field.attributes.validators.contains_key(name)
}

pub fn is_field_required(field: &Field) -> bool {
    has_validator(field, "required")
}

pub fn is_unique_field(field: &Field) -> bool {
    has_validator(field, "unique")
}

pub fn is_localized_field(field: &Field) -> bool {
    field.attributes.localized
}

pub fn get_field_validators(field: &Field) -> &serde_json::Map<String, serde_json::Value> {
    &field.attributes.validators
}

// Field extensions

pub fn get_field_extension_id(field: &Field) -> Option<&str> {
    field
        .relationships
        .field_extension
        .as_ref()?
        .data
        .as_ref()
        .map(|ext| ext.id.as_str())
        .filter(|id| !id.is_empty())
}

pub fn has_field_extension(field: &Field, extension_id: &str) -> bool {
    get_field_extension_id(field) == Some(extension_id)
}

// Validation and permissions

/// API keys start with a lowercase letter followed by lowercase letters,
/// digits, or underscores.
pub fn is_valid_api_key(api_key: &str) -> bool {
    API_KEY_PATTERN.is_match(api_key)
}

pub fn has_current_user_permissions(ctx: &Ctx) -> bool {
    ctx.current_user_access_level.is_some()
}

// Structured text

/// A structured text value with no document, or a document without children.
pub fn is_structured_text_empty(value: &serde_json::Value) -> bool {
    value
        .pointer("/document/children")
        .and_then(serde_json::Value::as_array)
        .is_none_or(Vec::is_empty)
}

/// Plain text of a structured text value: span values in document order,
/// one line per top-level block.
///
/// This is readable text, not a serialized copy of the document: marks,
/// links and block attributes are dropped. Use `serde_json::to_string` on
/// the value when the raw document is wanted.
pub fn extract_text_from_structured_text(value: &serde_json::Value) -> String {
    let Some(blocks) = value
        .pointer("/document/children")
        .and_then(serde_json::Value::as_array)
    else {
        return String::new();
    };

    blocks
        .iter()
        .map(|block| {
            let mut text = String::new();
            collect_span_text(block, &mut text);
            text
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_span_text(node: &serde_json::Value, out: &mut String) {
    if node["type"] == "span" {
        if let Some(value) = node["value"].as_str() {
            out.push_str(value);
        }
    }
    if let Some(children) = node["children"].as_array() {
        for child in children {
            collect_span_text(child, out);
        }
    }
}

// Uploads

/// The upload's URL with imgix parameters appended as a query string, in
/// the order given. `None` when the upload has no URL.
pub fn get_upload_url<I, K, V>(upload: &Upload, imgix_params: I) -> Option<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    let base = upload.attributes.url.as_deref().filter(|url| !url.is_empty())?;

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut has_params = false;
    for (key, value) in imgix_params {
        query.append_pair(key.as_ref(), &value.to_string());
        has_params = true;
    }

    if has_params {
        Some(format!("{base}?{}", query.finish()))
    } else {
        Some(base.to_string())
    }
}

// Predicate builders

/// A `should_apply` predicate matching models by API key.
///
/// ```
/// use datokit::helpers::should_apply_to_item_types;
/// use datokit::registration::outlets::FormOutletConfig;
/// use datokit_core::{Ctx, ItemFormCtx, Node};
///
/// let outlet = FormOutletConfig::new("seo", |_ctx: &ItemFormCtx| Node::Empty)
///     .should_apply(should_apply_to_item_types::<Ctx>(["article", "post"]));
/// ```
pub fn should_apply_to_item_types<C>(
    api_keys: impl IntoIterator<Item = impl Into<String>>,
) -> impl Fn(&ItemType, &C) -> bool + Send + Sync + Clone + 'static
where
    C: 'static,
{
    let api_keys: Vec<String> = api_keys.into_iter().map(Into::into).collect();
    move |model: &ItemType, _ctx: &C| api_keys.iter().any(|key| *key == model.attributes.api_key)
}

/// A `should_apply` predicate matching fields by type.
pub fn should_apply_to_field_types<C>(
    field_types: impl IntoIterator<Item = FieldType>,
) -> impl Fn(&Field, &C) -> bool + Send + Sync + Clone + 'static
where
    C: 'static,
{
    let field_types: Vec<FieldType> = field_types.into_iter().collect();
    move |field: &Field, _ctx: &C| field_types.iter().any(|t| is_field_type(field, *t))
}
