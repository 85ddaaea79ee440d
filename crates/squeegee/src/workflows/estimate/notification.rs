//! Plain-text owner notifications for accepted leads.

use super::domain::{CareerApplication, ContactMessage};
use super::engine::format_dollars;
use super::repository::{LeadKind, LeadNotification, QuoteRecord};

pub fn quote_notification(record: &QuoteRecord) -> LeadNotification {
    let contact = &record.contact;
    let form = &record.form_input;

    let name = [contact.first_name.as_str(), contact.last_name.as_str()]
        .into_iter()
        .filter_map(|part| non_blank(Some(part)))
        .collect::<Vec<_>>()
        .join(" ");
    let from = if name.is_empty() {
        format!("From: <{}>", contact.email.trim())
    } else {
        format!("From: {} <{}>", name, contact.email.trim())
    };

    let mut lines = vec![format!("New quote #{}", record.quote_id.0), from];
    if let Some(phone) = non_blank(contact.phone.as_deref()) {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(address) = non_blank(contact.address.as_deref()) {
        lines.push(format!(
            "Address: {}, {} {}",
            address,
            contact.city.as_deref().unwrap_or_default().trim(),
            contact.zip_code.as_deref().unwrap_or_default().trim()
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Service: {}",
        non_blank(form.service_type.as_deref()).unwrap_or("N/A")
    ));
    lines.push(format!(
        "Windows: {}, Screens: {}",
        form.window_count, form.screen_count
    ));
    lines.push(format!(
        "Quote total: {}",
        format_dollars(record.result.total_cents)
    ));
    if let Some(notes) = non_blank(form.special_requests.as_deref()) {
        lines.push(String::new());
        lines.push(format!("Notes: {notes}"));
    }

    LeadNotification {
        kind: LeadKind::Quote,
        subject: format!("New quote #{}", record.quote_id.0),
        reply_to: contact.email.trim().to_string(),
        body: lines.join("\n"),
    }
}

pub fn contact_notification(message: &ContactMessage) -> LeadNotification {
    let mut lines = vec![format!("From: {} <{}>", message.name.trim(), message.email.trim())];
    if let Some(phone) = non_blank(message.phone.as_deref()) {
        lines.push(format!("Phone: {phone}"));
    }
    lines.push(format!("Subject: {}", message.subject.trim()));
    lines.push(String::new());
    lines.push(message.message.trim().to_string());

    LeadNotification {
        kind: LeadKind::Contact,
        subject: format!("Contact form: {}", message.subject.trim()),
        reply_to: message.email.trim().to_string(),
        body: lines.join("\n"),
    }
}

pub fn career_notification(application: &CareerApplication) -> LeadNotification {
    let mut lines = vec![
        format!(
            "Applicant: {} <{}>",
            application.name.trim(),
            application.email.trim()
        ),
        format!("Phone: {}", application.phone.trim()),
        format!("Position: {}", application.position.trim()),
    ];
    if let Some(experience) = non_blank(application.experience.as_deref()) {
        lines.push(format!("Experience: {experience}"));
    }
    if let Some(availability) = non_blank(application.availability.as_deref()) {
        lines.push(format!("Availability: {availability}"));
    }
    if let Some(message) = non_blank(application.message.as_deref()) {
        lines.push(String::new());
        lines.push(message.to_string());
    }

    LeadNotification {
        kind: LeadKind::Career,
        subject: format!(
            "Job application: {} for {}",
            application.name.trim(),
            application.position.trim()
        ),
        reply_to: application.email.trim().to_string(),
        body: lines.join("\n"),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
