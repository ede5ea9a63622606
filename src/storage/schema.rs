//! Idempotent schema creation for the Postgres store.

use sqlx::PgPool;
use tracing::info;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'owner',
    restaurant_name TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_MENUS: &str = "CREATE TABLE IF NOT EXISTS menus (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

// profit_margin is generated by the database and can never be written directly.
// The application derives the same value through `profit_margin()` on read.
const CREATE_MENU_ITEMS: &str = "CREATE TABLE IF NOT EXISTS menu_items (
    id BIGSERIAL PRIMARY KEY,
    menu_id BIGINT NOT NULL REFERENCES menus(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    description TEXT,
    price NUMERIC(10,2) NOT NULL,
    cost NUMERIC(10,2) NOT NULL DEFAULT 0,
    category TEXT NOT NULL DEFAULT 'Uncategorized',
    tags TEXT[] NOT NULL DEFAULT '{}',
    sales_count INTEGER NOT NULL DEFAULT 0,
    profit_margin NUMERIC(5,2) GENERATED ALWAYS AS (
        CASE
            WHEN cost > 0 THEN ((price - cost) / price * 100)
            ELSE 0
        END
    ) STORED,
    is_available BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_menus_user_id ON menus(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_menu_items_menu_id ON menu_items(menu_id)",
    "CREATE INDEX IF NOT EXISTS idx_menu_items_category ON menu_items(category)",
    "CREATE INDEX IF NOT EXISTS idx_menu_items_price ON menu_items(price)",
    "CREATE INDEX IF NOT EXISTS idx_menu_items_sales_count ON menu_items(sales_count)",
];

const CREATE_TOUCH_FUNCTION: &str = "CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql";

const TOUCHED_TABLES: &[&str] = &["users", "menus", "menu_items"];

/// Creates tables, indexes and `updated_at` triggers. Safe to run on every start.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("running database migrations");

    for sql in [CREATE_USERS, CREATE_MENUS, CREATE_MENU_ITEMS] {
        sqlx::query(sql).execute(pool).await?;
    }
    for sql in CREATE_INDEXES {
        sqlx::query(sql).execute(pool).await?;
    }

    sqlx::query(CREATE_TOUCH_FUNCTION).execute(pool).await?;
    for table in TOUCHED_TABLES {
        sqlx::query(&format!("DROP TRIGGER IF EXISTS update_{table}_updated_at ON {table}"))
            .execute(pool)
            .await?;
        sqlx::query(&format!(
            "CREATE TRIGGER update_{table}_updated_at
                BEFORE UPDATE ON {table}
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column()"
        ))
        .execute(pool)
        .await?;
    }

    info!("database schema is up to date");
    Ok(())
}
