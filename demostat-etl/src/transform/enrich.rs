//! Per-record enrichment stage
//!
//! Derives the age bucket and the email domain/preference for every record
//! in the batch. Pure: returns parallel tables instead of mutating records.

use demostat_common::models::{AgeGroup, EmailPreference, UserRecord, UNKNOWN_DOMAIN};

/// Derived email attributes for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailProfile {
    pub domain: String,
    pub preference: EmailPreference,
}

/// Classify every record's age into its bucket
pub fn classify_ages(records: &[UserRecord]) -> Vec<AgeGroup> {
    records.iter().map(|r| AgeGroup::from_age(r.age)).collect()
}

/// Domain part of an email address: the substring after the last `@`,
/// or the `"unknown"` sentinel when no `@` is present
pub fn email_domain(email: &str) -> String {
    match email.rfind('@') {
        Some(at) => email[at + 1..].to_string(),
        None => UNKNOWN_DOMAIN.to_string(),
    }
}

/// Derive domain and allow-list classification for every record
///
/// The allow-list match is case-sensitive and exact.
pub fn email_profiles(records: &[UserRecord], popular_domains: &[String]) -> Vec<EmailProfile> {
    records
        .iter()
        .map(|r| {
            let domain = email_domain(&r.email);
            let preference = if popular_domains.iter().any(|d| d == &domain) {
                EmailPreference::Popular
            } else {
                EmailPreference::Other
            };
            EmailProfile { domain, preference }
        })
        .collect()
}
