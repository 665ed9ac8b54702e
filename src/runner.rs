use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::fetcher::Fetcher;
use crate::models::Item;
use crate::notifier::EmailNotifier;
use crate::utils::error::{AppError, Result};
use crate::{extractor, store, tracker};

/// Outcome counters for one full pass over the item collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub checked: usize,
    pub updated: usize,
    pub notified: usize,
    pub skipped: usize,
}

enum ItemOutcome {
    NewLow { notified: bool },
    Unchanged,
    Skipped,
}

/// Drives one run: load, verify every item in order, persist once.
pub struct Runner {
    items_path: PathBuf,
    recipient: Option<String>,
    fetcher: Fetcher,
    notifier: EmailNotifier,
}

impl Runner {
    pub fn new(
        items_path: PathBuf,
        recipient: Option<String>,
        fetcher: Fetcher,
        notifier: EmailNotifier,
    ) -> Self {
        Self {
            items_path,
            recipient,
            fetcher,
            notifier,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        info!(
            "Loading items to track from '{}' at {}",
            self.items_path.display(),
            Utc::now()
        );

        if !self.items_path.exists() {
            return Err(AppError::Config(format!(
                "Can't load item list from file '{}'. It doesn't exist",
                self.items_path.display()
            )));
        }

        let mut items = store::load(&self.items_path)?;
        if items.is_empty() {
            return Err(AppError::Config(
                "Item list must contain at least 1 item to track".to_string(),
            ));
        }

        let mut summary = RunSummary::default();
        for item in items.iter_mut() {
            summary.checked += 1;
            match self.verify(item).await {
                ItemOutcome::NewLow { notified } => {
                    summary.updated += 1;
                    if notified {
                        summary.notified += 1;
                    }
                }
                ItemOutcome::Unchanged => {}
                ItemOutcome::Skipped => summary.skipped += 1,
            }
        }

        info!("All items have been verified.");
        info!("Updating item list...");
        store::save(&self.items_path, &items)?;

        Ok(summary)
    }

    /// Check one item. Fetch and extraction failures are logged and skip the
    /// item; a failed notification does not undo the record update.
    async fn verify(&self, item: &mut Item) -> ItemOutcome {
        info!("Verifying price for '{}' from '{}'...", item.name, item.url);

        let body = match self.fetcher.fetch(&item.url).await {
            Ok(body) => body,
            Err(e) => {
                error!("Could not retrieve current price for item '{}'", item.name);
                error!("{e}");
                return ItemOutcome::Skipped;
            }
        };

        let current_price = match extractor::decode(&body)
            .and_then(|text| extractor::extract(text, &item.pattern))
        {
            Ok(price) => price,
            Err(e) => {
                error!("Could not retrieve current price for item '{}'", item.name);
                error!("{e}");
                return ItemOutcome::Skipped;
            }
        };

        info!("    Price : {current_price}");

        let (is_new_low, updated) = tracker::update(item, current_price, Utc::now());
        if !is_new_low {
            return ItemOutcome::Unchanged;
        }
        *item = updated;

        let message = format!(
            "New BEST price found for '{}' : {} $",
            item.name, current_price
        );
        println!(">>> {message}");

        let notified = match &self.recipient {
            Some(recipient) => self.notifier.notify(&item.name, &message, recipient).await,
            None => false,
        };

        ItemOutcome::NewLow { notified }
    }
}
