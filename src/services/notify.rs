// src/services/notify.rs

//! Telegram digest notifier.
//!
//! Formats the new-listing digest and delivers it with a single bot API
//! call. Delivery problems are soft failures: they are logged and reported
//! in the run outcome, but never stop the run from persisting state.

use std::time::Duration;

use serde::Serialize;

use crate::error::Result;
use crate::models::{Config, Listing};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    /// Message accepted by the bot API
    Sent,
    /// Credentials absent; delivery skipped
    NotConfigured,
    /// Transport error or non-success status
    Failed,
}

/// `sendMessage` request body.
#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

/// Delivers new-listing digests to a Telegram chat.
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    max_entries: usize,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a notifier from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.notifier.timeout_secs))
            .build()?;

        Ok(Self {
            bot_token: config.telegram.bot_token.clone(),
            chat_id: config.telegram.chat_id.clone(),
            max_entries: config.notifier.max_entries,
            client,
        })
    }

    /// Whether delivery credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    /// Deliver a digest for the given new listings.
    pub async fn notify(&self, new_listings: &[Listing]) -> NotifyStatus {
        if !self.is_configured() {
            log::info!("Telegram not configured. Skipping notification.");
            return NotifyStatus::NotConfigured;
        }

        let text = self.format_digest(new_listings);
        match self.send(&text).await {
            Ok(()) => {
                log::info!("Telegram notification sent");
                NotifyStatus::Sent
            }
            Err(e) => {
                log::error!("Telegram delivery failed: {}", e);
                NotifyStatus::Failed
            }
        }
    }

    /// Render the digest message in Telegram Markdown.
    pub fn format_digest(&self, new_listings: &[Listing]) -> String {
        let mut text = String::from("🔔 *Nuevas Ofertas de Empleo - Santa Fe*\n");
        text.push_str(&format!(
            "Se detectaron {} nueva(s) oferta(s)\n\n",
            new_listings.len()
        ));

        for (i, listing) in new_listings.iter().take(self.max_entries).enumerate() {
            text.push_str(&format!("{}. *{}*\n", i + 1, listing.title));
            text.push_str(&format!("   📍 {}\n", listing.location));
            text.push_str(&format!("   🏢 {}\n", listing.employer));
            text.push_str(&format!("   🔗 [Ver oferta]({})\n\n", listing.link));
        }

        if new_listings.len() > self.max_entries {
            text.push_str(&format!(
                "... y {} ofertas más.\n",
                new_listings.len() - self.max_entries
            ));
        }

        text
    }

    async fn send(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API, self.bot_token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        self.client
            .post(&url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_listing(title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            employer: "Gobierno de Santa Fe".to_string(),
            location: "Santa Fe".to_string(),
            link: format!("https://example.com/{}", title),
            detected_at: Utc::now(),
            fingerprint: crate::pipeline::fingerprint(title, "Gobierno de Santa Fe"),
        }
    }

    fn unconfigured_notifier() -> TelegramNotifier {
        TelegramNotifier::new(&Config::default()).unwrap()
    }

    fn configured_notifier() -> TelegramNotifier {
        let mut config = Config::default();
        config.telegram.bot_token = "123:abc".to_string();
        config.telegram.chat_id = "42".to_string();
        TelegramNotifier::new(&config).unwrap()
    }

    #[test]
    fn test_is_configured() {
        assert!(!unconfigured_notifier().is_configured());
        assert!(configured_notifier().is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_notify_is_noop() {
        let notifier = unconfigured_notifier();
        let status = notifier.notify(&[make_listing("Chofer")]).await;
        assert_eq!(status, NotifyStatus::NotConfigured);
    }

    #[test]
    fn test_digest_header_and_entry() {
        let notifier = configured_notifier();
        let digest = notifier.format_digest(&[make_listing("Chofer")]);

        assert!(digest.starts_with("🔔 *Nuevas Ofertas de Empleo - Santa Fe*"));
        assert!(digest.contains("Se detectaron 1 nueva(s) oferta(s)"));
        assert!(digest.contains("1. *Chofer*"));
        assert!(digest.contains("📍 Santa Fe"));
        assert!(digest.contains("🏢 Gobierno de Santa Fe"));
        assert!(digest.contains("[Ver oferta](https://example.com/Chofer)"));
        assert!(!digest.contains("ofertas más"));
    }

    #[test]
    fn test_digest_caps_entries_and_adds_trailer() {
        let notifier = configured_notifier();
        let listings: Vec<Listing> = (0..13).map(|i| make_listing(&format!("Oferta{}", i))).collect();

        let digest = notifier.format_digest(&listings);
        assert!(digest.contains("Se detectaron 13 nueva(s) oferta(s)"));
        assert!(digest.contains("10. *Oferta9*"));
        assert!(!digest.contains("11. *Oferta10*"));
        assert!(digest.contains("... y 3 ofertas más."));
    }
}
