//! Wire contract for `POST /api/subscribe` and the provider-facing mapping.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Phrases in a provider error that mean the address is already on the list.
const DUPLICATE_MARKERS: [&str; 3] = ["already subscribed", "already exists", "duplicate"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscribeRequest {
    /// Missing on the wire reads as empty so it fails validation with a message.
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biggest_challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Matches the provider's wording, which is the only duplicate signal it gives.
pub fn is_duplicate_subscription(message: &str) -> bool {
    let lowered = message.to_lowercase();
    DUPLICATE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl SubscribeRequest {
    /// Checks the only field the endpoint requires.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() {
            return Err("Email is required");
        }
        if !is_valid_email(&self.email) {
            return Err("Invalid email address");
        }
        Ok(())
    }

    pub fn full_name(&self) -> Option<String> {
        let first = non_empty(&self.first_name);
        let last = non_empty(&self.last_name);
        if first.is_none() && last.is_none() {
            return None;
        }
        let name = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
        Some(name.trim().to_string())
    }

    /// Provider custom fields, skipping anything the visitor left empty.
    pub fn custom_fields(&self) -> Vec<CustomField> {
        let name = self.full_name();
        [
            ("name", name.as_deref()),
            ("role", non_empty(&self.role)),
            ("company_focus", non_empty(&self.company_focus)),
            ("biggest_challenge", non_empty(&self.biggest_challenge)),
            ("team_size", non_empty(&self.team_size)),
            ("referral_source", non_empty(&self.referral_source)),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value.filter(|v| !v.is_empty()).map(|value| CustomField {
                name: field.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
    }
}
