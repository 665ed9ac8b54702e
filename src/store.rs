use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::models::Item;
use crate::utils::error::{AppError, Result};

/// Load the full item collection. The file must hold a JSON array of items;
/// every item's URL and extraction pattern is validated up front so a bad
/// record fails the run before any network activity.
pub fn load(path: &Path) -> Result<Vec<Item>> {
    let raw = fs::read_to_string(path)?;
    let items: Vec<Item> = serde_json::from_str(&raw)?;

    for item in &items {
        validate(item)?;
    }

    debug!("Loaded {} items from '{}'", items.len(), path.display());
    Ok(items)
}

/// Overwrite the collection file with the full serialized list, two-space
/// indented. External edits made since load are lost; the store has exactly
/// one writer.
pub fn save(path: &Path, items: &[Item]) -> Result<()> {
    let mut body = serde_json::to_string_pretty(items)?;
    body.push('\n');
    fs::write(path, body)?;

    debug!("Wrote {} items to '{}'", items.len(), path.display());
    Ok(())
}

fn validate(item: &Item) -> Result<()> {
    Url::parse(&item.url).map_err(|e| {
        AppError::Config(format!("item '{}' has an invalid url '{}': {e}", item.name, item.url))
    })?;

    let regex = Regex::new(&item.pattern).map_err(|e| AppError::Pattern {
        pattern: item.pattern.clone(),
        message: format!("item '{}': {e}", item.name),
    })?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        return Err(AppError::Pattern {
            pattern: item.pattern.clone(),
            message: format!("item '{}': pattern has no capturing group", item.name),
        });
    }

    Ok(())
}
