//! Shared data models

pub mod user;

pub use user::{
    AgeGroup, ApiUser, EmailPreference, EnrichedUser, UserRecord, FLAT_KEYS, UNKNOWN_DOMAIN,
    UNKNOWN_REGION,
};
