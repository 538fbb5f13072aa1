//! Sequential account and profile number issuance.
//!
//! Every customer gets a human-readable account number at signup
//! (`SAN-00001`) and a profile number at first profile completion
//! (`SCPN-00001`), both scoped to the customer's category. Issuance goes
//! through a per-(category, kind) counter row updated with an atomic
//! increment-and-read, so concurrent signups for the same category can never
//! observe the same sequence value. A counter value consumed by a write that
//! later fails leaves a gap in the sequence, never a duplicate.

use crate::errors::AppError;
use sqlx::PgPool;

const ACCOUNT_KIND: &str = "account";
const PROFILE_KIND: &str = "profile";

/// Account number prefix for a category. Case-sensitive; anything outside the
/// known set falls back to the generic prefix.
pub fn account_prefix(category: &str) -> &'static str {
    match category {
        "subscription" => "SAN",
        "non_subscription" => "NSAN",
        "corporate" => "CSAN",
        _ => "GEN",
    }
}

/// Profile number prefix for a category.
pub fn profile_prefix(category: &str) -> &'static str {
    match category {
        "subscription" => "SCPN",
        "non_subscription" => "NSCPN",
        "corporate" => "CSCPN",
        _ => "GCPN",
    }
}

/// Format an account number from a category and sequence value.
/// Sequences are zero-padded to 5 digits and widen naturally past 99999.
pub fn format_account_number(category: &str, seq: i64) -> String {
    format!("{}-{:05}", account_prefix(category), seq)
}

/// Format a profile number from a category and sequence value.
pub fn format_profile_number(category: &str, seq: i64) -> String {
    format!("{}-{:05}", profile_prefix(category), seq)
}

/// Atomically increment and read the counter for a (category, kind) pair.
/// The first issuance for a pair creates the row at 1.
async fn next_sequence(pool: &PgPool, category: &str, kind: &str) -> Result<i64, AppError> {
    let (value,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO number_counters (category, kind, value)
        VALUES ($1, $2, 1)
        ON CONFLICT (category, kind)
        DO UPDATE SET value = number_counters.value + 1
        RETURNING value
        "#,
    )
    .bind(category)
    .bind(kind)
    .fetch_one(pool)
    .await
    .map_err(AppError::DatabaseError)?;

    Ok(value)
}

/// Issue the next account number for a category.
pub async fn next_account_number(pool: &PgPool, category: &str) -> Result<String, AppError> {
    let seq = next_sequence(pool, category, ACCOUNT_KIND).await?;
    Ok(format_account_number(category, seq))
}

/// Issue the next profile number for a category.
pub async fn next_profile_number(pool: &PgPool, category: &str) -> Result<String, AppError> {
    let seq = next_sequence(pool, category, PROFILE_KIND).await?;
    Ok(format_profile_number(category, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_prefixes() {
        assert_eq!(account_prefix("subscription"), "SAN");
        assert_eq!(account_prefix("non_subscription"), "NSAN");
        assert_eq!(account_prefix("corporate"), "CSAN");

        assert_eq!(profile_prefix("subscription"), "SCPN");
        assert_eq!(profile_prefix("non_subscription"), "NSCPN");
        assert_eq!(profile_prefix("corporate"), "CSCPN");
    }

    #[test]
    fn test_unknown_category_falls_back_to_generic() {
        assert_eq!(account_prefix("walk_in"), "GEN");
        assert_eq!(account_prefix(""), "GEN");
        // Case-sensitive match
        assert_eq!(account_prefix("Subscription"), "GEN");
        assert_eq!(profile_prefix("walk_in"), "GCPN");
        assert_eq!(profile_prefix("CORPORATE"), "GCPN");
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_account_number("subscription", 1), "SAN-00001");
        assert_eq!(format_account_number("corporate", 42), "CSAN-00042");
        assert_eq!(format_profile_number("non_subscription", 7), "NSCPN-00007");
        assert_eq!(format_account_number("something_else", 99999), "GEN-99999");
    }

    #[test]
    fn test_sequence_widens_past_five_digits() {
        assert_eq!(format_account_number("subscription", 100000), "SAN-100000");
        assert_eq!(format_profile_number("corporate", 1234567), "CSCPN-1234567");
    }
}
