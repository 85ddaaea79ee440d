use super::domain::{CareerApplication, ContactMessage, QuoteRequest};

/// Validation errors raised before a lead is accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Quote requests only require a reachable email; names are optional in the commercial flow.
pub fn validate_quote_request(request: &QuoteRequest) -> Result<(), IntakeViolation> {
    require_email(&request.contact.email)
}

pub fn validate_contact_message(message: &ContactMessage) -> Result<(), IntakeViolation> {
    require_text("name", &message.name)?;
    require_email(&message.email)?;
    require_text("subject", &message.subject)?;
    require_text("message", &message.message)
}

pub fn validate_career_application(application: &CareerApplication) -> Result<(), IntakeViolation> {
    require_text("name", &application.name)?;
    require_email(&application.email)?;
    require_text("phone", &application.phone)?;
    require_text("position", &application.position)
}

fn require_email(email: &str) -> Result<(), IntakeViolation> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(IntakeViolation::InvalidEmail);
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), IntakeViolation> {
    if value.trim().is_empty() {
        Err(IntakeViolation::MissingField(field))
    } else {
        Ok(())
    }
}
