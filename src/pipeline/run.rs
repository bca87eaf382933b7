// src/pipeline/run.rs

//! Run controller: one full monitoring pass.

use chrono::Local;

use crate::error::Result;
use crate::models::{Config, Listing};
use crate::pipeline::detect_new;
use crate::services::{ListingExtractor, NotifyStatus, TelegramNotifier};
use crate::storage::StateStore;
use crate::utils::http;

/// Outcome of a completed monitoring pass.
#[derive(Debug)]
pub struct RunReport {
    /// Listings currently on the portal
    pub total: usize,
    /// Listings in the previous snapshot
    pub known: usize,
    /// Listings absent from the previous snapshot, in fetch order
    pub new_listings: Vec<Listing>,
    /// Delivery outcome, when notification was attempted
    pub notify: Option<NotifyStatus>,
    /// Whether the snapshot was replaced
    pub persisted: bool,
}

/// Run one monitoring pass: fetch, extract, diff, notify, persist.
///
/// Returns `None` when the pass aborted before the diff. A fetch failure or
/// an empty extraction leaves the previous snapshot untouched; "site
/// unreachable" must never read as "zero listings", which would turn the
/// next healthy run into a mass new-listing event.
pub async fn run_check(
    config: &Config,
    store: &dyn StateStore,
    dry_run: bool,
) -> Result<Option<RunReport>> {
    log::info!("Starting listing check");
    log::info!("Consulting: {}", config.portal.search_url);

    let extractor = ListingExtractor::new(config)?;
    let client = http::create_client(&config.http)?;

    let current = match http::fetch_page(&client, &config.portal.search_url).await {
        Ok(document) => extractor.extract(&document),
        Err(e) => {
            log::error!("Fetch failed: {}. Aborting this pass.", e);
            return Ok(None);
        }
    };

    process(config, store, current, dry_run).await
}

/// Diff, report, notify and persist an already-extracted listing set.
///
/// Split from [`run_check`] so the full post-fetch path is exercisable
/// without a live portal.
pub async fn process(
    config: &Config,
    store: &dyn StateStore,
    current: Vec<Listing>,
    dry_run: bool,
) -> Result<Option<RunReport>> {
    if current.is_empty() {
        log::warn!(
            "No listings extracted. Check connectivity or page structure; previous state left untouched."
        );
        return Ok(None);
    }

    let previous = store.load().await;
    let new_listings = detect_new(&current, &previous);
    log::info!("New listings detected: {}", new_listings.len());

    print_summary(&current, &previous, &new_listings);

    let notify = if new_listings.is_empty() {
        None
    } else if dry_run {
        log::info!("Dry run: skipping notification");
        None
    } else {
        let notifier = TelegramNotifier::new(config)?;
        Some(notifier.notify(&new_listings).await)
    };

    // Persist regardless of delivery outcome; only a dry run skips it.
    let persisted = if dry_run {
        log::info!("Dry run: previous state left untouched");
        false
    } else {
        match store.save(&current).await {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "Failed to save state: {}. The next run will re-report these listings.",
                    e
                );
                false
            }
        }
    };

    Ok(Some(RunReport {
        total: current.len(),
        known: previous.len(),
        new_listings,
        notify,
        persisted,
    }))
}

/// Print the human-readable run summary.
fn print_summary(current: &[Listing], previous: &[Listing], new_listings: &[Listing]) {
    let border = "=".repeat(70);
    println!("{border}");
    println!(
        "MONITOR SUMMARY - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("{border}");
    println!("Listings on the portal: {}", current.len());
    println!("New listings detected:  {}", new_listings.len());
    println!("Previously known:       {}", previous.len());

    if new_listings.is_empty() {
        println!("\nNo new listings in this pass.");
    } else {
        println!("\nNEW LISTINGS:");
        for (i, listing) in new_listings.iter().enumerate() {
            println!("{}. {}", i + 1, listing.summary_line());
            println!("   Link: {}", listing.link);
        }
    }

    println!("{border}\n");
}
