use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Product;

/// Who is submitting the interest list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactIdentity {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Payload handed to the intake transport: the contact plus a formatted
/// plain-text summary of the saved items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestSubmission {
    pub contact: ContactIdentity,
    pub summary: String,
    pub item_count: usize,
}

/// Confirmation returned to the caller after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub item_count: usize,
    pub submitted_at: DateTime<Utc>,
}

/// Submission failure. Transport errors are surfaced once with no retry;
/// the saved interest list is left untouched so the caller can try again.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("interest list is empty, nothing to submit")]
    EmptyInterestList,
    #[error("contact name and email are required")]
    MissingContact,
    #[error("submission transport failed: {0}")]
    Transport(String),
}

/// Outbound seam for the external intake endpoint. Implementations make a
/// single attempt; retry policy belongs to the caller.
pub trait SubmissionTransport: Send + Sync {
    fn send(&self, submission: InterestSubmission) -> Result<(), SubmissionError>;
}

/// Human-readable intake summary: contact header, item count, then one
/// line per saved product in list order.
pub fn format_summary(contact: &ContactIdentity, items: &[&Product]) -> String {
    let mut summary = String::new();
    writeln!(
        summary,
        "Product interest list from {} <{}>",
        contact.name, contact.email
    )
    .expect("write contact line");
    if let Some(company) = contact.company.as_deref().filter(|c| !c.trim().is_empty()) {
        writeln!(summary, "Company: {company}").expect("write company line");
    }
    writeln!(summary, "Items: {}", items.len()).expect("write count line");
    summary.push('\n');

    for product in items {
        writeln!(
            summary,
            "- {} ({}), {}",
            product.name, product.size, product.brand
        )
        .expect("write item line");
    }

    summary
}
