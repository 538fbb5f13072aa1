use sqlx::{postgres::PgPoolOptions, PgPool};

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        ensure_schema(&pool).await?;

        Ok(Self { pool })
    }
}

/// Bootstrap the schema on startup. All statements are idempotent and run on
/// every boot.
async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY,
            account_number TEXT NOT NULL UNIQUE,
            profile_number TEXT,
            customer_category TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            date_of_birth DATE NOT NULL,
            profile_completed BOOLEAN NOT NULL DEFAULT FALSE,
            employment_title TEXT,
            favorite_bistro_food_items TEXT,
            preferred_bistro_beverage TEXT,
            interest_in_group_private_package TEXT,
            music_ambiance_preference TEXT,
            allergies TEXT,
            dietary_restrictions TEXT,
            celebration_budget TEXT,
            group_size_solo TEXT,
            preferred_contact_method TEXT,
            want_corporate_offers BOOLEAN,
            preferred_celebration_style TEXT,
            personalized_bistro_birthday_treats TEXT,
            interest_in_rewards BOOLEAN,
            i_like_surprises BOOLEAN,
            special_notes TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Listing orders by created_at DESC; keep it indexed.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS customers_created_at_idx ON customers (created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS customers_category_idx ON customers (customer_category)",
    )
    .execute(pool)
    .await?;

    // One counter row per (category, kind); incremented atomically when
    // account and profile numbers are issued.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS number_counters (
            category TEXT NOT NULL,
            kind TEXT NOT NULL,
            value BIGINT NOT NULL,
            PRIMARY KEY (category, kind)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
