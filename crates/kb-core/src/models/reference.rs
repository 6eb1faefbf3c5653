//! Provenance records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{REFERENCE_DESCRIPTION_MAX_LEN, REFERENCE_URL_MAX_LEN};
use crate::error::{Error, Result};
use crate::uuid_utils::new_v7;

/// One DNS label: no leading or trailing hyphen, at most 63 characters.
macro_rules! dns_label {
    () => {
        r"[a-z0-9\x{a1}-\x{ffff}](?:[a-z0-9\x{a1}-\x{ffff}-]{0,61}[a-z0-9\x{a1}-\x{ffff}])?"
    };
}

/// Dotted-quad octet, 0 to 255 without leading zeros.
macro_rules! ipv4_octet {
    () => {
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])"
    };
}

/// Absolute http(s)/ftp(s) URL with a dotted host name, an IP address or
/// `localhost`, an optional port and an optional path, query or fragment.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?i)(?:https?|ftps?)://",
        r"(?:[^\s:@/]+(?::[^\s:@/]*)?@)?",
        r"(?:",
        ipv4_octet!(),
        r"(?:\.",
        ipv4_octet!(),
        r"){3}",
        r"|\[[0-9a-f:.]+\]",
        r"|",
        dns_label!(),
        r"(?:\.",
        dns_label!(),
        r")*",
        r"\.(?:[a-z\x{a1}-\x{ffff}][a-z\x{a1}-\x{ffff}-]{0,61}[a-z\x{a1}-\x{ffff}]",
        r"|xn--[a-z0-9]{1,59})\.?",
        r"|localhost)",
        r"(?::[0-9]{1,5})?",
        r"(?:[/?#]\S*)?$",
    ))
    .expect("reference url pattern compiles")
});

/// A source backing one or more statements. The store keeps the
/// reference-to-statement links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Uuid,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl Reference {
    pub fn new(url: Option<&str>, description: Option<&str>) -> Result<Self> {
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let description = description.filter(|d| !d.is_empty());

        if let Some(url) = url {
            if url.chars().count() > REFERENCE_URL_MAX_LEN {
                return Err(Error::InvalidInput(format!(
                    "reference url exceeds {} characters",
                    REFERENCE_URL_MAX_LEN
                )));
            }
            if !URL_PATTERN.is_match(url) {
                return Err(Error::InvalidInput(format!("invalid reference url: {}", url)));
            }
        }
        if let Some(description) = description {
            if description.chars().count() > REFERENCE_DESCRIPTION_MAX_LEN {
                return Err(Error::InvalidInput(format!(
                    "reference description exceeds {} characters",
                    REFERENCE_DESCRIPTION_MAX_LEN
                )));
            }
        }

        Ok(Self {
            id: new_v7(),
            url: url.map(str::to_string),
            description: description.map(str::to_string),
        })
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.url, &self.description) {
            (Some(url), _) => write!(f, "{}", url),
            (None, Some(description)) => write!(f, "{}", description),
            (None, None) => Ok(()),
        }
    }
}
