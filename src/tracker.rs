use chrono::{DateTime, Utc};

use crate::models::Item;

/// Decide whether an observed price is a new low and produce the updated
/// record. Pure; the caller owns the collection and applies the copy.
///
/// A price equal to the stored minimum is not a new low: the record keeps
/// the timestamp of the run that first saw the minimum.
pub fn update(item: &Item, current_price: f64, now: DateTime<Utc>) -> (bool, Item) {
    match item.last_price {
        Some(best) if current_price >= best => (false, item.clone()),
        _ => {
            let mut updated = item.clone();
            updated.last_price = Some(current_price);
            updated.last_price_timestamp = Some(now.timestamp());
            (true, updated)
        }
    }
}
