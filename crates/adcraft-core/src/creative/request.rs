//! Form input and the validated generation request built from it.

use super::kind::CreativeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tone used when the form leaves it blank.
pub const DEFAULT_TONE: &str = "professional";
/// Platform used when the form leaves it blank.
pub const DEFAULT_PLATFORM: &str = "general";

/// Raw form fields as submitted by the presentation layer.
///
/// Every field is optional here; [`CreativeForm::validate`] decides what is
/// actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeForm {
    pub industry: String,
    pub product: String,
    pub target_audience: String,
    pub tone: String,
    pub platform: String,
    pub goals: String,
    pub constraints: String,
}

/// A form field that must be filled before generation can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Industry,
    Product,
    TargetAudience,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Industry => "industry",
            Self::Product => "product",
            Self::TargetAudience => "target audience",
        };
        f.write_str(name)
    }
}

/// Returned when one or more required fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in the required fields: {}", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated, kind-specific request ready for prompt construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub kind: CreativeKind,
    pub industry: String,
    pub product: String,
    pub target_audience: String,
    pub tone: String,
    pub platform: String,
    pub goals: Option<String>,
    pub constraints: Option<String>,
}

impl CreativeForm {
    /// Checks required fields and produces a [`GenerationRequest`].
    ///
    /// Whitespace-only values count as missing. Every missing field is
    /// reported, not just the first one.
    pub fn validate(&self, kind: CreativeKind) -> Result<GenerationRequest, ValidationError> {
        let mut missing = Vec::new();
        if is_blank(&self.industry) {
            missing.push(RequiredField::Industry);
        }
        if is_blank(&self.product) {
            missing.push(RequiredField::Product);
        }
        if is_blank(&self.target_audience) {
            missing.push(RequiredField::TargetAudience);
        }
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(GenerationRequest {
            kind,
            industry: self.industry.trim().to_string(),
            product: self.product.trim().to_string(),
            target_audience: self.target_audience.trim().to_string(),
            tone: or_default(&self.tone, DEFAULT_TONE).to_string(),
            platform: or_default(&self.platform, DEFAULT_PLATFORM).to_string(),
            goals: non_blank(&self.goals),
            constraints: non_blank(&self.constraints),
        })
    }
}

impl GenerationRequest {
    /// Tone with the blank-means-default rule applied.
    pub fn effective_tone(&self) -> &str {
        or_default(&self.tone, DEFAULT_TONE)
    }

    /// Platform with the blank-means-default rule applied.
    pub fn effective_platform(&self) -> &str {
        or_default(&self.platform, DEFAULT_PLATFORM)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
