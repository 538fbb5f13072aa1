use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A birthday club member, one row per customer.
///
/// This is the central entity. A customer starts in the signup state
/// (`profile_completed = false`, no profile number) and transitions exactly
/// once to the profiled state when the extended profile is submitted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Human-readable account identifier, e.g. `SAN-00001`. Unique, immutable.
    pub account_number: String,
    /// Human-readable profile identifier, e.g. `SCPN-00001`.
    /// `None` until the profile is completed, then assigned exactly once.
    #[serde(rename = "customer_profile_number")]
    pub profile_number: Option<String>,
    /// Customer segment driving the identifier prefixes
    /// ("subscription", "non_subscription", "corporate", or free text).
    #[serde(rename = "customer_type")]
    pub customer_category: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Whether the extended profile has been submitted. Transitions only
    /// false -> true, never back.
    pub profile_completed: bool,
    /// Job title.
    pub employment_title: Option<String>,
    /// Favorite bistro food items.
    pub favorite_bistro_food_items: Option<String>,
    /// Preferred bistro beverage.
    pub preferred_bistro_beverage: Option<String>,
    /// Interest in group/private packages.
    pub interest_in_group_private_package: Option<String>,
    /// Music and ambiance preference.
    pub music_ambiance_preference: Option<String>,
    /// Known allergies.
    pub allergies: Option<String>,
    /// Dietary restrictions.
    pub dietary_restrictions: Option<String>,
    /// Celebration budget band.
    pub celebration_budget: Option<String>,
    /// Typical group size (or solo).
    pub group_size_solo: Option<String>,
    /// Preferred contact method.
    pub preferred_contact_method: Option<String>,
    /// Opt-in for corporate offers.
    pub want_corporate_offers: Option<bool>,
    /// Preferred celebration style.
    pub preferred_celebration_style: Option<String>,
    /// Personalized birthday treat preferences.
    pub personalized_bistro_birthday_treats: Option<String>,
    /// Opt-in for the rewards program.
    pub interest_in_rewards: Option<bool>,
    /// Whether the customer likes surprises.
    pub i_like_surprises: Option<bool>,
    /// Free-text notes.
    pub special_notes: Option<String>,
    /// Timestamp of creation, set once.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update, refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

// ============ API Request Models ============

/// Request payload for the initial customer signup.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerSignup {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone_number: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Customer segment. Deliberately not validated against the known set;
    /// unknown values fall back to the generic identifier prefixes.
    #[serde(rename = "customer_type")]
    pub customer_category: String,
}

/// Request payload for completing the extended customer profile.
///
/// The contact fields (`contact_name`, `email_address`, `phone_number`,
/// `birthday_date`) overwrite the core fields captured at signup; everything
/// else is set all at once on the customer row.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerProfile {
    /// Account number, resubmitted in the body. Lookup uses the path
    /// parameter; this field is carried for parity with the signup form.
    pub account_number: String,
    /// Contact name, overwrites the signup name.
    pub contact_name: String,
    /// Email address, overwrites the signup email.
    pub email_address: String,
    /// Job title.
    pub employment_title: Option<String>,
    /// Phone number, overwrites the signup phone number.
    pub phone_number: String,
    /// Date of birth, overwrites the signup date of birth.
    pub birthday_date: NaiveDate,
    /// Favorite bistro food items.
    pub favorite_bistro_food_items: Option<String>,
    /// Preferred bistro beverage.
    pub preferred_bistro_beverage: Option<String>,
    /// Interest in group/private packages.
    pub interest_in_group_private_package: Option<String>,
    /// Music and ambiance preference.
    pub music_ambiance_preference: Option<String>,
    /// Known allergies.
    pub allergies: Option<String>,
    /// Dietary restrictions.
    pub dietary_restrictions: Option<String>,
    /// Celebration budget band.
    pub celebration_budget: Option<String>,
    /// Typical group size (or solo).
    pub group_size_solo: Option<String>,
    /// Preferred contact method.
    pub preferred_contact_method: Option<String>,
    /// Opt-in for corporate offers.
    #[serde(default)]
    pub want_corporate_offers: bool,
    /// Preferred celebration style.
    pub preferred_celebration_style: Option<String>,
    /// Personalized birthday treat preferences.
    pub personalized_bistro_birthday_treats: Option<String>,
    /// Opt-in for the rewards program.
    #[serde(default)]
    pub interest_in_rewards: bool,
    /// Whether the customer likes surprises.
    #[serde(default)]
    pub i_like_surprises: bool,
    /// Free-text notes.
    pub special_notes: Option<String>,
}

// ============ API Response Models ============

/// Core customer view returned from signup, profile completion, lookup and
/// listing. The full row (including extended profile fields) is only exposed
/// by the profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    /// Unique identifier.
    pub id: Uuid,
    /// Account number.
    pub account_number: String,
    /// Profile number, if assigned.
    pub customer_profile_number: Option<String>,
    /// Customer segment.
    pub customer_type: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Whether the extended profile has been submitted.
    pub profile_completed: bool,
    /// Timestamp of creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update.
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            account_number: customer.account_number,
            customer_profile_number: customer.profile_number,
            customer_type: customer.customer_category,
            name: customer.name,
            email: customer.email,
            phone_number: customer.phone_number,
            date_of_birth: customer.date_of_birth,
            profile_completed: customer.profile_completed,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

/// Aggregate counts returned by the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Total number of customers.
    pub total_customers: i64,
    /// Customers in the "subscription" category.
    pub subscription_customers: i64,
    /// Customers in the "non_subscription" category.
    pub non_subscription_customers: i64,
    /// Customers in the "corporate" category.
    pub corporate_customers: i64,
    /// Customers with a completed profile.
    pub completed_profiles: i64,
    /// Completed profiles as a percentage of the total; 0 when there are no
    /// customers at all.
    pub profile_completion_rate: f64,
}

// ============ Query Parameters ============

/// Query parameters for customer listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerQueryParams {
    /// Filter by customer segment.
    #[serde(rename = "customer_type")]
    pub customer_category: Option<String>,
    /// Filter by profile completion state.
    pub profile_completed: Option<bool>,
    /// Page size, defaults to 50.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of records to skip, defaults to 0.
    #[serde(default)]
    pub skip: i64,
}

fn default_limit() -> i64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_defaults() {
        let params: CustomerQueryParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, 50);
        assert_eq!(params.skip, 0);
        assert!(params.customer_category.is_none());
        assert!(params.profile_completed.is_none());
    }

    #[test]
    fn test_signup_wire_name_is_customer_type() {
        let json = r#"
        {
            "name": "Test User",
            "phone_number": "5551234567",
            "email": "test@example.com",
            "date_of_birth": "1990-01-01",
            "customer_type": "subscription"
        }
        "#;

        let signup: CustomerSignup = serde_json::from_str(json).unwrap();
        assert_eq!(signup.customer_category, "subscription");
        assert_eq!(
            signup.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_profile_opt_in_flags_default_to_false() {
        let json = r#"
        {
            "account_number": "SAN-00001",
            "contact_name": "Test User",
            "email_address": "test@example.com",
            "phone_number": "5551234567",
            "birthday_date": "1990-01-01"
        }
        "#;

        let profile: CustomerProfile = serde_json::from_str(json).unwrap();
        assert!(!profile.want_corporate_offers);
        assert!(!profile.interest_in_rewards);
        assert!(!profile.i_like_surprises);
        assert!(profile.special_notes.is_none());
    }

    #[test]
    fn test_customer_serializes_with_wire_names() {
        let customer = Customer {
            id: Uuid::new_v4(),
            account_number: "SAN-00001".to_string(),
            profile_number: Some("SCPN-00001".to_string()),
            customer_category: "subscription".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone_number: "5551234567".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            profile_completed: true,
            employment_title: None,
            favorite_bistro_food_items: None,
            preferred_bistro_beverage: None,
            interest_in_group_private_package: None,
            music_ambiance_preference: None,
            allergies: None,
            dietary_restrictions: None,
            celebration_budget: None,
            group_size_solo: None,
            preferred_contact_method: None,
            want_corporate_offers: Some(false),
            preferred_celebration_style: None,
            personalized_bistro_birthday_treats: None,
            interest_in_rewards: Some(true),
            i_like_surprises: Some(false),
            special_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["customer_type"], "subscription");
        assert_eq!(value["customer_profile_number"], "SCPN-00001");
        assert!(value.get("customer_category").is_none());

        let response = CustomerResponse::from(customer);
        assert_eq!(response.customer_profile_number.as_deref(), Some("SCPN-00001"));
        assert_eq!(response.customer_type, "subscription");
    }
}
