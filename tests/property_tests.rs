/// Property-based tests using proptest
/// Tests invariants and properties that should hold for all inputs
use proptest::prelude::*;
use birthday_club_api::account_numbers::{
    account_prefix, format_account_number, format_profile_number, profile_prefix,
};
use birthday_club_api::validation::is_valid_email;

// Property: formatting should never panic, for any category string
proptest! {
    #[test]
    fn account_number_formatting_never_panics(category in "\\PC*", seq in 0i64..=i64::MAX) {
        let _ = format_account_number(&category, seq);
        let _ = format_profile_number(&category, seq);
    }

    #[test]
    fn number_always_prefixed_with_category_prefix(category in "\\PC*", seq in 1i64..1_000_000i64) {
        let account = format_account_number(&category, seq);
        let profile = format_profile_number(&category, seq);
        let account_expected_prefix = format!("{}-", account_prefix(&category));
        let profile_expected_prefix = format!("{}-", profile_prefix(&category));
        prop_assert!(account.starts_with(&account_expected_prefix));
        prop_assert!(profile.starts_with(&profile_expected_prefix));
    }
}

// Property: the numeric suffix round-trips and is padded to at least 5 digits
proptest! {
    #[test]
    fn suffix_parses_back_to_sequence(seq in 1i64..100_000_000i64) {
        let number = format_account_number("subscription", seq);
        let suffix = number.strip_prefix("SAN-").unwrap();
        prop_assert!(suffix.len() >= 5);
        prop_assert_eq!(suffix.parse::<i64>().unwrap(), seq);
    }

    #[test]
    fn suffix_is_exactly_five_digits_up_to_99999(seq in 1i64..=99999i64) {
        let number = format_profile_number("corporate", seq);
        let suffix = number.strip_prefix("CSCPN-").unwrap();
        prop_assert_eq!(suffix.len(), 5);
        prop_assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn formatting_is_monotonic_in_sequence(seq in 1i64..99_998i64) {
        // Within the padded range, lexicographic order matches numeric order
        let a = format_account_number("non_subscription", seq);
        let b = format_account_number("non_subscription", seq + 1);
        prop_assert!(a < b);
    }
}

// Property: unknown categories always fall back to the generic prefixes
proptest! {
    #[test]
    fn unknown_categories_get_generic_prefixes(category in "[a-z_]{1,20}") {
        prop_assume!(
            category != "subscription"
                && category != "non_subscription"
                && category != "corporate"
        );
        prop_assert!(format_account_number(&category, 1).starts_with("GEN-"));
        prop_assert!(format_profile_number(&category, 1).starts_with("GCPN-"));
    }
}

// Property: email validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn well_formed_emails_accepted(
        local in "[a-z][a-z0-9]{0,10}",
        domain in "[a-z][a-z0-9]{1,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email), "Well-formed email rejected: {}", email);
    }

    #[test]
    fn emails_without_at_sign_rejected(text in "[a-z0-9.]{1,30}") {
        prop_assert!(!is_valid_email(&text));
    }
}
