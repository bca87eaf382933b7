// src/models/selectors.rs

//! CSS selector fallback chains for the listing page.
//!
//! Each chain is tried in order; the first selector that yields anything
//! wins and later entries are not consulted. The portal has shipped several
//! markup variants over time, which is why every field carries alternatives.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Selector chains for locating listings and their fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSelectors {
    /// Candidate selectors for a listing container
    #[serde(default = "default_containers")]
    pub container_chain: Vec<String>,

    /// Candidate selectors for the title element within a container
    #[serde(default = "default_title")]
    pub title_chain: Vec<String>,

    /// Candidate selectors for the employer element
    #[serde(default = "default_employer")]
    pub employer_chain: Vec<String>,

    /// Candidate selectors for the location element
    #[serde(default = "default_location")]
    pub location_chain: Vec<String>,

    /// Candidate selectors for the link anchor
    #[serde(default = "default_link")]
    pub link_chain: Vec<String>,

    /// HTML attribute for extracting links (usually "href")
    #[serde(default = "default_link_attr")]
    pub link_attr: String,

    /// Employer value when no employer element matches
    #[serde(default = "default_employer_fallback")]
    pub default_employer: String,

    /// Location value when no location element matches
    #[serde(default = "default_location_fallback")]
    pub default_location: String,
}

fn default_containers() -> Vec<String> {
    vec![
        "div.oferta".into(),
        "div.job-item".into(),
        "article".into(),
        "div.card".into(),
        "li.list-item".into(),
    ]
}

fn default_title() -> Vec<String> {
    vec!["h2, h3, h4, h5".into(), "a.titulo".into(), "strong".into()]
}

fn default_employer() -> Vec<String> {
    vec![".empresa, .company, .empleador, .organismo".into()]
}

fn default_location() -> Vec<String> {
    vec![".ubicacion, .location, .localidad, .lugar".into()]
}

fn default_link() -> Vec<String> {
    vec!["a[href]".into()]
}

fn default_link_attr() -> String {
    "href".to_string()
}

fn default_employer_fallback() -> String {
    "Gobierno de Santa Fe".to_string()
}

fn default_location_fallback() -> String {
    "Santa Fe".to_string()
}

impl Default for PortalSelectors {
    fn default() -> Self {
        Self {
            container_chain: default_containers(),
            title_chain: default_title(),
            employer_chain: default_employer(),
            location_chain: default_location(),
            link_chain: default_link(),
            link_attr: default_link_attr(),
            default_employer: default_employer_fallback(),
            default_location: default_location_fallback(),
        }
    }
}

impl PortalSelectors {
    /// Reject configurations that would make extraction impossible.
    pub fn validate(&self) -> Result<()> {
        if self.container_chain.is_empty() {
            return Err(AppError::validation("selectors.container_chain is empty"));
        }
        if self.title_chain.is_empty() {
            return Err(AppError::validation("selectors.title_chain is empty"));
        }
        if self.link_attr.trim().is_empty() {
            return Err(AppError::validation("selectors.link_attr is empty"));
        }
        Ok(())
    }
}
