//! Seed script for development — populates a fresh database with a small shop.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Datelike, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const CATEGORIES: [&str; 6] = ["Electronics", "Clothing", "Books", "Home", "Sports", "Toys"];

const STATUSES: [&str; 5] = ["Delivered", "Completed", "Pending", "Shipped", "Cancelled"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    storefront_analytics::db::run_migrations(&pool).await?;

    println!("=== Storefront Analytics Seed Script ===");

    seed_categories(&pool).await?;
    seed_products(&pool).await?;
    let users = seed_users(&pool).await?;
    seed_orders(&pool, &users).await?;

    println!("\n=== Seed complete! ===");

    Ok(())
}

async fn seed_categories(pool: &PgPool) -> anyhow::Result<()> {
    for name in CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }
    println!("[done] Categories ({})", CATEGORIES.len());
    Ok(())
}

async fn seed_products(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Products already exist ({count})");
        return Ok(());
    }

    let mut inserted = 0;
    for (i, category) in CATEGORIES.iter().enumerate() {
        // Uneven catalogue sizes so the category chart has some shape.
        for n in 0..(i + 2) {
            sqlx::query(
                "INSERT INTO products (name, price, stock, category_id)
                 SELECT $1, $2::numeric, $3, id FROM categories WHERE name = $4",
            )
            .bind(format!("{category} item {}", n + 1))
            .bind(format!("{}.99", 9 + n * 10))
            .bind(i32::try_from(20 + n * 5)?)
            .bind(category)
            .execute(pool)
            .await?;
            inserted += 1;
        }
    }

    println!("[done] Created {inserted} products");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<Vec<Uuid>> {
    let customers = [
        ("Ada Lovelace", "ada@shop.test"),
        ("Grace Hopper", "grace@shop.test"),
        ("Alan Turing", "alan@shop.test"),
        ("Barbara Liskov", "barbara@shop.test"),
    ];

    for (name, email) in customers {
        sqlx::query(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(email)
        .execute(pool)
        .await?;
    }

    let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM users ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    println!("[done] Users ({})", ids.len());
    Ok(ids)
}

async fn seed_orders(pool: &PgPool, users: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Orders already exist ({count})");
        return Ok(());
    }

    let product_ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM products ORDER BY name")
        .fetch_all(pool)
        .await?;
    if product_ids.is_empty() || users.is_empty() {
        println!("[skip] No products or users to order with");
        return Ok(());
    }

    let year = Utc::now().year();
    let mut created = 0;

    // A few orders per month up to the current one.
    for month in 1..=Utc::now().month() {
        for n in 0..(month % 4 + 2) {
            let placed_at = Utc
                .with_ymd_and_hms(year, month, 1 + n * 3, 12, 0, 0)
                .single()
                .ok_or_else(|| anyhow::anyhow!("invalid seed date {year}-{month}"))?;
            let index = (month + n) as usize;
            let user = users[index % users.len()];
            let product = product_ids[index % product_ids.len()];
            let status = STATUSES[index % STATUSES.len()];
            let quantity = i32::try_from(n + 1)?;
            let unit_price = format!("{}.50", 15 + index * 7);

            let order_id = Uuid::now_v7();
            sqlx::query(
                "INSERT INTO orders (id, user_id, total_amount, status, created_at)
                 VALUES ($1, $2, $3::numeric * $4, $5, $6)",
            )
            .bind(order_id)
            .bind(user)
            .bind(&unit_price)
            .bind(quantity)
            .bind(status)
            .bind(placed_at)
            .execute(pool)
            .await?;

            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                 VALUES ($1, $2, $3, $4::numeric)",
            )
            .bind(order_id)
            .bind(product)
            .bind(quantity)
            .bind(&unit_price)
            .execute(pool)
            .await?;

            created += 1;
        }
    }

    println!("[done] Created {created} orders for {year}");
    Ok(())
}
