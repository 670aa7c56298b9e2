use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    General,
    Project,
    Partnership,
    Careers,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::General => "general",
            InquiryType::Project => "project",
            InquiryType::Partnership => "partnership",
            InquiryType::Careers => "careers",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "general" => Some(InquiryType::General),
            "project" => Some(InquiryType::Project),
            "partnership" => Some(InquiryType::Partnership),
            "careers" => Some(InquiryType::Careers),
            _ => None,
        }
    }
}

fn validate_inquiry_type(value: &str) -> Result<(), ValidationError> {
    if InquiryType::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("inquiry_type");
    err.message = Some("Inquiry type must be one of general, project, partnership, careers".into());
    Err(err)
}

/// Contact form body. Missing fields deserialize to empty values so they
/// surface as field-level validation errors instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InquiryPayload {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 200, message = "Company must be at most 200 characters"))]
    pub company: Option<String>,
    #[validate(length(max = 40, message = "Phone must be at most 40 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
    #[validate(custom(function = "validate_inquiry_type"))]
    pub inquiry_type: String,
    pub locale: String,
}

impl InquiryPayload {
    /// Trimmed copy of the payload. Email is lowercased and blank optional
    /// fields become `None`. Validation runs on this form.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: optional(self.company),
            phone: optional(self.phone),
            message: self.message.trim().to_string(),
            inquiry_type: self.inquiry_type.trim().to_string(),
            locale: self.locale.trim().to_string(),
        }
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub inquiry_type: InquiryType,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub inquiry_type: InquiryType,
    pub locale: String,
    pub created_at: DateTime<Utc>,
}
