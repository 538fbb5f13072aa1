//! Customer record service.
//!
//! Orchestrates the two-phase lifecycle (signup, then a single profile
//! completion) and answers read and aggregate queries. All mutation is
//! expressed as single-row statements; the store's per-statement atomicity is
//! the only coordination between concurrent requests.

use crate::account_numbers;
use crate::errors::{AppError, ResultExt};
use crate::models::{
    Customer, CustomerProfile, CustomerQueryParams, CustomerSignup, StatsResponse,
};
use crate::validation::is_valid_email;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Database service for customer records.
pub struct CustomerStore {
    pool: PgPool,
}

impl CustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a customer from the minimal signup payload.
    ///
    /// Issues an account number for the requested category, stamps creation
    /// timestamps and persists the row in the signup state
    /// (`profile_completed = false`, no profile number).
    pub async fn signup(&self, signup: CustomerSignup) -> Result<Customer, AppError> {
        if !is_valid_email(&signup.email) {
            return Err(AppError::ValidationError(format!(
                "Invalid email address: {}",
                signup.email
            )));
        }

        let account_number =
            account_numbers::next_account_number(&self.pool, &signup.customer_category).await?;
        let now = Utc::now();

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                id, account_number, profile_number, customer_category,
                name, email, phone_number, date_of_birth,
                profile_completed, created_at, updated_at
            )
            VALUES ($1, $2, NULL, $3, $4, $5, $6, $7, FALSE, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account_number)
        .bind(&signup.customer_category)
        .bind(&signup.name)
        .bind(&signup.email)
        .bind(&signup.phone_number)
        .bind(signup.date_of_birth)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?
        .ok_or_else(|| AppError::PersistenceError("Failed to create customer".to_string()))?;

        tracing::info!(
            "Created customer {} ({})",
            customer.account_number,
            customer.customer_category
        );

        Ok(customer)
    }

    /// Complete the extended profile for a customer.
    ///
    /// Issues a profile number on the first completion; repeated completions
    /// reuse the number already on the row, so the operation is idempotent
    /// with respect to `profile_number`. The payload's contact fields
    /// overwrite the core fields captured at signup.
    pub async fn complete_profile(
        &self,
        account_number: &str,
        profile: CustomerProfile,
    ) -> Result<Customer, AppError> {
        if !is_valid_email(&profile.email_address) {
            return Err(AppError::ValidationError(format!(
                "Invalid email address: {}",
                profile.email_address
            )));
        }

        let existing = self
            .get_by_account_number(account_number)
            .await
            .context("looking up customer for profile completion")?;

        // The profile number is assigned exactly once. A row that claims
        // completion but lost its number (a failed earlier write) gets a
        // fresh one rather than staying numberless forever.
        let profile_number = match (&existing.profile_number, existing.profile_completed) {
            (Some(number), true) => number.clone(),
            _ => {
                account_numbers::next_profile_number(&self.pool, &existing.customer_category)
                    .await?
            }
        };

        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2,
                email = $3,
                phone_number = $4,
                date_of_birth = $5,
                profile_number = $6,
                profile_completed = TRUE,
                employment_title = $7,
                favorite_bistro_food_items = $8,
                preferred_bistro_beverage = $9,
                interest_in_group_private_package = $10,
                music_ambiance_preference = $11,
                allergies = $12,
                dietary_restrictions = $13,
                celebration_budget = $14,
                group_size_solo = $15,
                preferred_contact_method = $16,
                want_corporate_offers = $17,
                preferred_celebration_style = $18,
                personalized_bistro_birthday_treats = $19,
                interest_in_rewards = $20,
                i_like_surprises = $21,
                special_notes = $22,
                updated_at = $23
            WHERE account_number = $1
            RETURNING *
            "#,
        )
        .bind(account_number)
        .bind(&profile.contact_name)
        .bind(&profile.email_address)
        .bind(&profile.phone_number)
        .bind(profile.birthday_date)
        .bind(&profile_number)
        .bind(&profile.employment_title)
        .bind(&profile.favorite_bistro_food_items)
        .bind(&profile.preferred_bistro_beverage)
        .bind(&profile.interest_in_group_private_package)
        .bind(&profile.music_ambiance_preference)
        .bind(&profile.allergies)
        .bind(&profile.dietary_restrictions)
        .bind(&profile.celebration_budget)
        .bind(&profile.group_size_solo)
        .bind(&profile.preferred_contact_method)
        .bind(profile.want_corporate_offers)
        .bind(&profile.preferred_celebration_style)
        .bind(&profile.personalized_bistro_birthday_treats)
        .bind(profile.interest_in_rewards)
        .bind(profile.i_like_surprises)
        .bind(&profile.special_notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?
        .ok_or_else(|| {
            AppError::PersistenceError("Failed to update customer profile".to_string())
        })?;

        tracing::info!(
            "Completed profile {} for customer {}",
            profile_number,
            updated.account_number
        );

        Ok(updated)
    }

    /// Fetch a customer by account number.
    pub async fn get_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE account_number = $1")
            .bind(account_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
    }

    /// Fetch the full profile record for a customer.
    ///
    /// Fails with `ProfileIncomplete` when the customer exists but has not
    /// completed the extended profile yet.
    pub async fn get_profile(&self, account_number: &str) -> Result<Customer, AppError> {
        let customer = self.get_by_account_number(account_number).await?;

        if !customer.profile_completed {
            return Err(AppError::ProfileIncomplete(
                "Customer profile not completed".to_string(),
            ));
        }

        Ok(customer)
    }

    /// List customers, newest first.
    ///
    /// Optional category and completion-state predicates, then skip/limit.
    /// Returns a finite snapshot, not a live cursor.
    pub async fn list(&self, params: &CustomerQueryParams) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ($1::text IS NULL OR customer_category = $1)
              AND ($2::boolean IS NULL OR profile_completed = $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(&params.customer_category)
        .bind(params.profile_completed)
        .bind(params.skip)
        .bind(params.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(customers)
    }

    /// Aggregate counts across all customers.
    pub async fn stats(&self) -> Result<StatsResponse, AppError> {
        let (total, subscription, non_subscription, corporate, completed): (
            i64,
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE customer_category = 'subscription'),
                   COUNT(*) FILTER (WHERE customer_category = 'non_subscription'),
                   COUNT(*) FILTER (WHERE customer_category = 'corporate'),
                   COUNT(*) FILTER (WHERE profile_completed)
            FROM customers
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        let profile_completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Ok(StatsResponse {
            total_customers: total,
            subscription_customers: subscription,
            non_subscription_customers: non_subscription,
            corporate_customers: corporate,
            completed_profiles: completed,
            profile_completion_rate,
        })
    }
}
