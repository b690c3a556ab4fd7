//! User record model
//!
//! `UserRecord` holds the immutable identity fields as fetched from the
//! RandomUser API. `EnrichedUser` is the fully-derived form produced by the
//! transform pipeline; it has no optional fields, so a batch of
//! `EnrichedUser` is by construction never partially enriched.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sentinel domain for emails without an `@`
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Sentinel region for countries without lookup data
pub const UNKNOWN_REGION: &str = "N/A";

/// One subject as fetched from the record source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub gender: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    pub age: u32,
    pub email: String,
}

/// Raw RandomUser API payload shape (one element of `results`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub name: ApiName,
    #[serde(default)]
    pub location: ApiLocation,
    #[serde(default)]
    pub dob: ApiDob,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiLocation {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDob {
    #[serde(default)]
    pub age: u32,
}

impl From<ApiUser> for UserRecord {
    fn from(api: ApiUser) -> Self {
        Self {
            gender: api.gender,
            first_name: api.name.first,
            last_name: api.name.last,
            country: api.location.country,
            age: api.dob.age,
            email: api.email,
        }
    }
}

/// Ordered age buckets, exhaustive over all non-negative ages
///
/// Boundaries are half-open on the lower bound: every age maps to exactly
/// one bucket and the mapping is monotonic in age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Adolescent,
    YoungAdult,
    EarlyAdult,
    MatureAdult,
    Senior,
    Longevous,
}

impl AgeGroup {
    /// Classify an age into its bucket
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=17 => AgeGroup::Adolescent,
            18..=29 => AgeGroup::YoungAdult,
            30..=44 => AgeGroup::EarlyAdult,
            45..=59 => AgeGroup::MatureAdult,
            60..=79 => AgeGroup::Senior,
            _ => AgeGroup::Longevous,
        }
    }

    /// Ordinal bucket label as reported in statistics and exports
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Adolescent => "<18",
            AgeGroup::YoungAdult => "18-30",
            AgeGroup::EarlyAdult => "31-45",
            AgeGroup::MatureAdult => "46-60",
            AgeGroup::Senior => "61-80",
            AgeGroup::Longevous => "80+",
        }
    }

    /// Human-readable category paired 1:1 with the bucket label
    pub fn category(self) -> &'static str {
        match self {
            AgeGroup::Adolescent => "Adolescent",
            AgeGroup::YoungAdult => "Young Adult",
            AgeGroup::EarlyAdult => "Early Adult",
            AgeGroup::MatureAdult => "Mature Adult",
            AgeGroup::Senior => "Senior",
            AgeGroup::Longevous => "Longevous",
        }
    }

    /// Inverse of [`AgeGroup::label`], used when decoding flat records
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "<18" => Some(AgeGroup::Adolescent),
            "18-30" => Some(AgeGroup::YoungAdult),
            "31-45" => Some(AgeGroup::EarlyAdult),
            "46-60" => Some(AgeGroup::MatureAdult),
            "61-80" => Some(AgeGroup::Senior),
            "80+" => Some(AgeGroup::Longevous),
            _ => None,
        }
    }
}

/// Binary classification of an email domain against the configured allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPreference {
    Popular,
    Other,
}

impl EmailPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailPreference::Popular => "Popular",
            EmailPreference::Other => "Other",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Popular" => Some(EmailPreference::Popular),
            "Other" => Some(EmailPreference::Other),
            _ => None,
        }
    }
}

/// Fully-enriched record produced by the transform pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedUser {
    pub record: UserRecord,
    pub age_group: AgeGroup,
    pub email_domain: String,
    pub email_preference: EmailPreference,
    pub is_outlier: bool,
    pub region: String,
    pub population: u64,
}

/// Keys of the flat key-value form, in export column order
pub const FLAT_KEYS: [&str; 13] = [
    "first_name",
    "last_name",
    "gender",
    "country",
    "age",
    "email",
    "age_group",
    "age_category",
    "email_domain",
    "email_preference",
    "is_outlier",
    "region",
    "population",
];

impl EnrichedUser {
    /// Serialize to the flat key-value form consumed by persistence sinks
    ///
    /// Pairs come back in [`FLAT_KEYS`] order.
    pub fn to_flat(&self) -> Vec<(&'static str, String)> {
        vec![
            ("first_name", self.record.first_name.clone()),
            ("last_name", self.record.last_name.clone()),
            ("gender", self.record.gender.clone()),
            ("country", self.record.country.clone()),
            ("age", self.record.age.to_string()),
            ("email", self.record.email.clone()),
            ("age_group", self.age_group.label().to_string()),
            ("age_category", self.age_group.category().to_string()),
            ("email_domain", self.email_domain.clone()),
            ("email_preference", self.email_preference.as_str().to_string()),
            ("is_outlier", self.is_outlier.to_string()),
            ("region", self.region.clone()),
            ("population", self.population.to_string()),
        ]
    }

    /// Reconstruct an enriched record from its flat key-value form
    pub fn from_flat(pairs: &[(String, String)]) -> Result<Self> {
        let get = |key: &str| -> Result<&str> {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| Error::InvalidInput(format!("missing flat key '{key}'")))
        };

        let age: u32 = get("age")?
            .parse()
            .map_err(|e| Error::InvalidInput(format!("bad age: {e}")))?;
        let group_label = get("age_group")?;
        let age_group = AgeGroup::from_label(group_label)
            .ok_or_else(|| Error::InvalidInput(format!("bad age_group '{group_label}'")))?;
        let email_preference = EmailPreference::from_str_opt(get("email_preference")?)
            .ok_or_else(|| Error::InvalidInput("bad email_preference".to_string()))?;
        let is_outlier: bool = get("is_outlier")?
            .parse()
            .map_err(|e| Error::InvalidInput(format!("bad is_outlier: {e}")))?;
        let population: u64 = get("population")?
            .parse()
            .map_err(|e| Error::InvalidInput(format!("bad population: {e}")))?;

        Ok(Self {
            record: UserRecord {
                gender: get("gender")?.to_string(),
                first_name: get("first_name")?.to_string(),
                last_name: get("last_name")?.to_string(),
                country: get("country")?.to_string(),
                age,
                email: get("email")?.to_string(),
            },
            age_group,
            email_domain: get("email_domain")?.to_string(),
            email_preference,
            is_outlier,
            region: get("region")?.to_string(),
            population,
        })
    }
}
