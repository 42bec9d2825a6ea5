//! Offending-key lookup inside version-catalog TOML files.
//!
//! Several Gradle failure messages name a bad key (an alias, a version
//! reference, a bundle member) without giving its location. These helpers
//! parse the catalog with `toml_edit` and recover a 0-based (line, column)
//! position from the key's source span.
//!
//! Every function returns `Ok(None)` when the key is not present and an
//! error only when the file itself is not parsable TOML; callers degrade
//! both cases to a diagnostic without navigation.

use crate::error::{CatalogError, Result};
use lens_core::LineIndex;
use toml_edit::{Document, Item, Table};

/// Catalog sections that may declare an alias.
const ALIAS_SECTIONS: [&str; 4] = ["versions", "libraries", "plugins", "bundles"];

/// Position of `alias` as a key in any catalog section.
pub fn find_alias(content: &str, alias: &str) -> Result<Option<(u32, u32)>> {
    let doc = parse_catalog(content)?;
    let index = LineIndex::new(content);
    for section in ALIAS_SECTIONS {
        if let Some(table) = doc.as_table().get(section).and_then(Item::as_table)
            && let Some(position) = key_position(table, alias, &index)
        {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

/// Position of the library declaration whose coordinates are `group:name`.
///
/// Matches both the `module = "group:name"` and the separate
/// `group = ...` / `name = ...` notations.
pub fn find_library(content: &str, group: &str, name: &str) -> Result<Option<(u32, u32)>> {
    let doc = parse_catalog(content)?;
    let index = LineIndex::new(content);
    let Some(libraries) = doc.as_table().get("libraries").and_then(Item::as_table) else {
        return Ok(None);
    };
    let module = format!("{group}:{name}");
    for (alias, item) in libraries.iter() {
        let matches = entry_str(item, "module") == Some(module.as_str())
            || (entry_str(item, "group") == Some(group) && entry_str(item, "name") == Some(name));
        if matches {
            return Ok(key_position(libraries, alias, &index));
        }
    }
    Ok(None)
}

/// Position of the plugin declaration with the given `id`.
pub fn find_plugin(content: &str, id: &str) -> Result<Option<(u32, u32)>> {
    let doc = parse_catalog(content)?;
    let index = LineIndex::new(content);
    let Some(plugins) = doc.as_table().get("plugins").and_then(Item::as_table) else {
        return Ok(None);
    };
    for (alias, item) in plugins.iter() {
        // Either `{ id = "...", ... }` or the shorthand "id:version" string.
        let matches = entry_str(item, "id") == Some(id)
            || item
                .as_str()
                .is_some_and(|s| s == id || s.starts_with(&format!("{id}:")));
        if matches {
            return Ok(key_position(plugins, alias, &index));
        }
    }
    Ok(None)
}

/// Position of an unexpected `key` inside the declaration `alias` of the
/// given catalog `section` (e.g. a `group1` typo in a library entry).
pub fn find_unexpected_key(
    content: &str,
    section: &str,
    alias: &str,
    key: &str,
) -> Result<Option<(u32, u32)>> {
    let doc = parse_catalog(content)?;
    let index = LineIndex::new(content);
    let Some(item) = doc
        .get(section)
        .and_then(Item::as_table)
        .and_then(|table| table.get(alias))
    else {
        return Ok(None);
    };

    if let Some(inline) = item.as_inline_table()
        && let Some((found, _)) = inline.get_key_value(key)
        && let Some(span) = found.span()
    {
        return Ok(Some(index.position(span.start)));
    }
    if let Some(table) = item.as_table()
        && let Some(position) = key_position(table, key, &index)
    {
        return Ok(Some(position));
    }
    Ok(None)
}

/// Position of the quoted `member` string inside bundle `bundle`'s array.
pub fn find_bundle_member(content: &str, bundle: &str, member: &str) -> Result<Option<(u32, u32)>> {
    let doc = parse_catalog(content)?;
    let index = LineIndex::new(content);
    let Some(array) = doc
        .get("bundles")
        .and_then(Item::as_table)
        .and_then(|table| table.get(bundle))
        .and_then(Item::as_array)
    else {
        return Ok(None);
    };
    for value in array.iter() {
        if value.as_str() == Some(member)
            && let Some(span) = value.span()
        {
            // The value span starts at the opening quote.
            return Ok(Some(index.position(span.start)));
        }
    }
    Ok(None)
}

fn parse_catalog(content: &str) -> Result<Document<&str>> {
    // `DocumentMut` despans on parse; the read-only document keeps spans.
    Document::parse(content).map_err(|err| CatalogError::TomlParse {
        message: err.to_string(),
    })
}

fn key_position(table: &Table, key: &str, index: &LineIndex) -> Option<(u32, u32)> {
    let (found, _) = table.get_key_value(key)?;
    let span = found.span()?;
    Some(index.position(span.start))
}

fn entry_str<'a>(item: &'a Item, key: &str) -> Option<&'a str> {
    if let Some(inline) = item.as_inline_table() {
        return inline.get(key).and_then(toml_edit::Value::as_str);
    }
    item.as_table()
        .and_then(|table| table.get(key))
        .and_then(Item::as_str)
}
