use std::sync::Arc;

use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::ContentConfig;
use crate::error::Result;
use crate::models::{Inquiry, InquiryPayload, InquiryType, NewInquiry, Page, Paginated};
use crate::repository::InquiryRepository;

pub struct InquiryService {
    repo: Arc<dyn InquiryRepository>,
    content: ContentConfig,
}

impl InquiryService {
    pub fn new(repo: Arc<dyn InquiryRepository>, content: ContentConfig) -> Self {
        Self { repo, content }
    }

    /// Validate and store a contact form submission
    pub async fn submit(&self, payload: InquiryPayload) -> Result<Inquiry> {
        let payload = payload.normalized();
        let mut errors = match payload.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };

        if !self.content.is_supported(&payload.locale) {
            let mut err = ValidationError::new("locale");
            err.message = Some("Unsupported locale".into());
            errors.add("locale", err);
        }

        let inquiry_type = InquiryType::parse(&payload.inquiry_type);
        let Some(inquiry_type) = inquiry_type.filter(|_| errors.errors().is_empty()) else {
            return Err(errors.into());
        };

        let new_inquiry = NewInquiry {
            name: payload.name,
            email: payload.email,
            company: payload.company,
            phone: payload.phone,
            message: payload.message,
            inquiry_type,
            locale: payload.locale,
        };

        let inquiry = self.repo.insert_inquiry(&new_inquiry).await?;
        info!(
            inquiry_id = %inquiry.id,
            inquiry_type = inquiry.inquiry_type.as_str(),
            "Inquiry received"
        );
        Ok(inquiry)
    }

    /// Newest submissions first
    pub async fn list(&self, page: Page) -> Result<Paginated<Vec<Inquiry>>> {
        let items = self.repo.list_inquiries(page).await?;
        let total = self.repo.count_inquiries().await?;
        Ok(Paginated { items, page, total })
    }
}
