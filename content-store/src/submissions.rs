//! Visitor form submissions
//!
//! Append-only lists written by the public forms and read by the admin.

use crate::core::ContentStore;
use crate::storage::keys;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text, validate_text,
};
use shared::models::{
    ContactInput, ContactMessage, Inquiry, InquiryInput, MembershipInput, MembershipSignup,
    NewsletterSignup,
};
use shared::util::{next_timestamp_id, now_rfc3339};
use shared::{AppError, AppResult, ErrorCode, MutationResult};

fn report_submission<T>(form: &str, result: AppResult<T>) -> MutationResult<T> {
    match &result {
        Ok(_) => tracing::info!(form, "Form submission stored"),
        Err(e) => tracing::warn!(form, code = %e.code, error = %e.message, "Form submission rejected"),
    }
    result.into()
}

fn submission_id(current_max: Option<i64>) -> AppResult<i64> {
    next_timestamp_id(current_max)
        .ok_or_else(|| AppError::corrupted("No submission id left above the stored maximum"))
}

impl ContentStore {
    pub fn inquiries(&self) -> Vec<Inquiry> {
        self.codec().read_array(keys::INQUIRIES)
    }

    pub fn contacts(&self) -> Vec<ContactMessage> {
        self.codec().read_array(keys::CONTACTS)
    }

    pub fn newsletter_signups(&self) -> Vec<NewsletterSignup> {
        self.codec().read_array(keys::NEWSLETTER_SIGNUPS)
    }

    pub fn membership_signups(&self) -> Vec<MembershipSignup> {
        self.codec().read_array(keys::MEMBERSHIP_SIGNUPS)
    }

    pub fn submit_inquiry(&self, input: InquiryInput) -> MutationResult<Inquiry> {
        report_submission("inquiry", self.try_submit_inquiry(input))
    }

    fn try_submit_inquiry(&self, input: InquiryInput) -> AppResult<Inquiry> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_email(&input.email)?;
        validate_optional_text(&input.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&input.service, "service", MAX_NAME_LEN)?;
        validate_text(&input.message, "message", MAX_NOTE_LEN)?;

        let mut list: Vec<Inquiry> = self.codec().load_array(keys::INQUIRIES)?;
        let inquiry = Inquiry {
            id: submission_id(list.iter().map(|i| i.id).max())?,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone.filter(|p| !p.trim().is_empty()),
            service: input.service.filter(|s| !s.trim().is_empty()),
            message: input.message,
            submitted_at: now_rfc3339(),
        };
        list.push(inquiry.clone());
        self.codec().write_array(keys::INQUIRIES, &list)?;
        Ok(inquiry)
    }

    pub fn submit_contact(&self, input: ContactInput) -> MutationResult<ContactMessage> {
        report_submission("contact", self.try_submit_contact(input))
    }

    fn try_submit_contact(&self, input: ContactInput) -> AppResult<ContactMessage> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_email(&input.email)?;
        validate_text(&input.subject, "subject", MAX_NAME_LEN)?;
        validate_required_text(&input.message, "message", MAX_NOTE_LEN)?;

        let mut list: Vec<ContactMessage> = self.codec().load_array(keys::CONTACTS)?;
        let contact = ContactMessage {
            id: submission_id(list.iter().map(|c| c.id).max())?,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            subject: input.subject,
            message: input.message,
            submitted_at: now_rfc3339(),
        };
        list.push(contact.clone());
        self.codec().write_array(keys::CONTACTS, &list)?;
        Ok(contact)
    }

    /// Subscribe an address; addresses compare case-insensitively
    pub fn subscribe_newsletter(&self, email: &str) -> MutationResult<NewsletterSignup> {
        report_submission("newsletter", self.try_subscribe_newsletter(email))
    }

    fn try_subscribe_newsletter(&self, email: &str) -> AppResult<NewsletterSignup> {
        validate_email(email)?;
        let email = email.trim().to_lowercase();

        let mut list: Vec<NewsletterSignup> = self.codec().load_array(keys::NEWSLETTER_SIGNUPS)?;
        if list.iter().any(|s| s.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::with_message(
                ErrorCode::AlreadySubscribed,
                format!("{} is already subscribed", email),
            ));
        }
        let signup = NewsletterSignup {
            email,
            subscribed_at: now_rfc3339(),
        };
        list.push(signup.clone());
        self.codec().write_array(keys::NEWSLETTER_SIGNUPS, &list)?;
        Ok(signup)
    }

    pub fn submit_membership_signup(&self, input: MembershipInput) -> MutationResult<MembershipSignup> {
        report_submission("membership", self.try_submit_membership_signup(input))
    }

    fn try_submit_membership_signup(&self, input: MembershipInput) -> AppResult<MembershipSignup> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_email(&input.email)?;
        validate_text(&input.plan, "plan", MAX_SHORT_TEXT_LEN)?;

        let mut list: Vec<MembershipSignup> = self.codec().load_array(keys::MEMBERSHIP_SIGNUPS)?;
        let signup = MembershipSignup {
            id: submission_id(list.iter().map(|m| m.id).max())?,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            plan: input.plan,
            submitted_at: now_rfc3339(),
        };
        list.push(signup.clone());
        self.codec().write_array(keys::MEMBERSHIP_SIGNUPS, &list)?;
        Ok(signup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::catalog::Catalog;
    use std::sync::Arc;

    #[test]
    fn test_inquiry_is_stamped_and_appended() {
        let content = ContentStore::in_memory();
        let first = content.submit_inquiry(InquiryInput {
            name: "Dana".into(),
            email: "dana@studio.co".into(),
            service: Some("Poster Design".into()),
            message: "Need 200 posters".into(),
            ..Default::default()
        });
        assert!(first.is_success());
        let second = content.submit_inquiry(InquiryInput {
            name: "Lee".into(),
            email: "lee@studio.co".into(),
            ..Default::default()
        });

        let list = content.inquiries();
        assert_eq!(list.len(), 2);
        assert_ne!(list[0].id, list[1].id);
        assert_eq!(second.data.map(|i| i.phone), Some(None));
        assert!(!list[0].submitted_at.is_empty());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let content = ContentStore::in_memory();
        let result = content.submit_contact(ContactInput {
            name: "Dana".into(),
            email: "not-an-email".into(),
            message: "hi".into(),
            ..Default::default()
        });
        assert_eq!(result.code, Some(ErrorCode::InvalidEmail));
        assert!(content.contacts().is_empty());
    }

    #[test]
    fn test_newsletter_dedupes_case_insensitively() {
        let content = ContentStore::in_memory();
        assert!(content.subscribe_newsletter("Dana@Studio.co").is_success());
        let again = content.subscribe_newsletter("dana@studio.CO ");
        assert_eq!(again.code, Some(ErrorCode::AlreadySubscribed));
        assert_eq!(content.newsletter_signups().len(), 1);
        assert_eq!(content.newsletter_signups()[0].email, "dana@studio.co");
    }

    #[test]
    fn test_unreadable_list_is_not_overwritten() {
        let content = ContentStore::in_memory();
        let store = content.codec().store();
        store
            .set(keys::INQUIRIES, r#"[{"id":1,"name":"Old","email":42}]"#)
            .unwrap();

        let result = content.submit_inquiry(InquiryInput {
            name: "Dana".into(),
            email: "dana@studio.co".into(),
            ..Default::default()
        });
        assert_eq!(result.code, Some(ErrorCode::StorageCorrupted));
        assert_eq!(
            store.get(keys::INQUIRIES).unwrap().as_deref(),
            Some(r#"[{"id":1,"name":"Old","email":42}]"#)
        );
    }

    #[test]
    fn test_membership_signup_surfaces_storage_full() {
        let content = ContentStore::new(Arc::new(MemoryStore::with_quota(16)), Catalog::empty());
        let result = content.submit_membership_signup(MembershipInput {
            name: "Dana".into(),
            email: "dana@studio.co".into(),
            plan: "pro".into(),
        });
        assert!(result.is_storage_full());
        assert!(content.membership_signups().is_empty());
    }
}
