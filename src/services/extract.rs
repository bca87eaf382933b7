// src/services/extract.rs

//! Listing extraction service.
//!
//! Turns the raw search-results page into listing records using the
//! configured selector fallback chains.

use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Listing};
use crate::pipeline::fingerprint;
use crate::utils::resolve_url;

/// Why a matched container produced no listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No title selector matched, or every match was blank. Title is the
    /// one mandatory field.
    MissingTitle,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTitle => write!(f, "no title element matched"),
        }
    }
}

/// Result of parsing a single container.
#[derive(Debug, Clone)]
pub enum ContainerOutcome {
    Parsed(Listing),
    Skipped(SkipReason),
}

/// Extracts listings from the portal search-results page.
///
/// Selector chains are compiled once at construction; an invalid configured
/// selector surfaces here, before any network traffic.
pub struct ListingExtractor {
    containers: Vec<Selector>,
    title_chain: Vec<Selector>,
    employer_chain: Vec<Selector>,
    location_chain: Vec<Selector>,
    link_chain: Vec<Selector>,
    link_attr: String,
    default_employer: String,
    default_location: String,
    search_base: Url,
    portal_url: String,
}

impl ListingExtractor {
    /// Create a new extractor from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let selectors = &config.selectors;
        Ok(Self {
            containers: Self::parse_chain(&selectors.container_chain)?,
            title_chain: Self::parse_chain(&selectors.title_chain)?,
            employer_chain: Self::parse_chain(&selectors.employer_chain)?,
            location_chain: Self::parse_chain(&selectors.location_chain)?,
            link_chain: Self::parse_chain(&selectors.link_chain)?,
            link_attr: selectors.link_attr.clone(),
            default_employer: selectors.default_employer.clone(),
            default_location: selectors.default_location.clone(),
            search_base: Url::parse(&config.portal.search_url)?,
            portal_url: config.portal.base_url.clone(),
        })
    }

    /// Extract all listings from a parsed document.
    ///
    /// Containers that fail to produce a listing are logged and skipped;
    /// they never abort the surrounding extraction.
    pub fn extract(&self, document: &Html) -> Vec<Listing> {
        let containers = self.select_containers(document);
        log::info!("Containers found: {}", containers.len());

        let mut listings = Vec::new();
        for container in containers {
            match self.parse_container(container) {
                ContainerOutcome::Parsed(listing) => listings.push(listing),
                ContainerOutcome::Skipped(reason) => {
                    log::debug!("Skipping container: {}", reason);
                }
            }
        }

        log::info!("Listings extracted: {}", listings.len());
        listings
    }

    /// Walk the container chain; the first selector with any matches wins.
    fn select_containers<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.containers {
            let matches: Vec<ElementRef<'a>> = document.select(selector).collect();
            if !matches.is_empty() {
                return matches;
            }
        }
        Vec::new()
    }

    /// Parse one container into a listing, or a typed skip.
    fn parse_container(&self, container: ElementRef<'_>) -> ContainerOutcome {
        let Some(title) = self.first_text(container, &self.title_chain) else {
            return ContainerOutcome::Skipped(SkipReason::MissingTitle);
        };

        let employer = self
            .first_text(container, &self.employer_chain)
            .unwrap_or_else(|| self.default_employer.clone());
        let location = self
            .first_text(container, &self.location_chain)
            .unwrap_or_else(|| self.default_location.clone());
        let link = self.resolve_link(container);
        let fingerprint = fingerprint(&title, &employer);

        ContainerOutcome::Parsed(Listing {
            title,
            employer,
            location,
            link,
            detected_at: Utc::now(),
            fingerprint,
        })
    }

    /// Apply a field chain: first selector yielding non-blank text wins.
    fn first_text(&self, container: ElementRef<'_>, chain: &[Selector]) -> Option<String> {
        chain.iter().find_map(|selector| {
            container
                .select(selector)
                .next()
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                .filter(|text| !text.is_empty())
        })
    }

    /// Resolve the listing link, falling back to the portal base URL when no
    /// usable anchor exists.
    fn resolve_link(&self, container: ElementRef<'_>) -> String {
        let href = self.link_chain.iter().find_map(|selector| {
            container
                .select(selector)
                .next()
                .and_then(|el| el.value().attr(&self.link_attr))
                .map(str::trim)
                .filter(|href| !href.is_empty())
        });

        match href {
            Some(href) => resolve_url(&self.search_base, href),
            None => self.portal_url.clone(),
        }
    }

    fn parse_chain(chain: &[String]) -> Result<Vec<Selector>> {
        chain.iter().map(|s| Self::parse_selector(s)).collect()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
