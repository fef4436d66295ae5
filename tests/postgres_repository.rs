//! PostgreSQL repository checks. They truncate `featured_products`, so they only run
//! against the database named by `FEATURED_PRODUCTS_TEST_DATABASE_URL`:
//!
//! ```text
//! FEATURED_PRODUCTS_TEST_DATABASE_URL=postgres://... cargo test --test postgres_repository -- --ignored
//! ```

use featured_products::repository::postgres::PgFeaturedProductRepository;
use featured_products::repository::FeaturedProductRepository;
use featured_products::{apply_bundled_migrations, AppError, ReorderItem};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const TEST_DATABASE_ENV: &str = "FEATURED_PRODUCTS_TEST_DATABASE_URL";

async fn fresh_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var(TEST_DATABASE_ENV) else {
        eprintln!("{} not set, skipping", TEST_DATABASE_ENV);
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    apply_bundled_migrations(&pool).await.expect("migrations");
    sqlx::query("TRUNCATE featured_products RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("truncate");
    Some(pool)
}

// One test body: every step shares the featured_products table.
#[tokio::test]
#[ignore = "needs FEATURED_PRODUCTS_TEST_DATABASE_URL"]
async fn featured_product_sql_round() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let repo = PgFeaturedProductRepository::new(pool.clone());

    // Add appends after the current max.
    let a = repo.add_or_reactivate(101).await.unwrap();
    let b = repo.add_or_reactivate(102).await.unwrap();
    assert_eq!((a.sort_order, b.sort_order), (1, 2));
    assert!(a.is_active && b.is_active);

    // Re-add moves the existing row to the end and reactivates it.
    repo.toggle(a.id).await.unwrap();
    let again = repo.add_or_reactivate(101).await.unwrap();
    assert_eq!(again.id, a.id);
    assert_eq!(again.sort_order, 3);
    assert!(again.is_active);
    assert_eq!(repo.list_ordered().await.unwrap().len(), 2);

    // Reorder sets each row regardless of item order.
    repo.reorder(&[
        ReorderItem { id: b.id, sort_order: 3 },
        ReorderItem { id: a.id, sort_order: 5 },
    ])
    .await
    .unwrap();
    let pairs: Vec<(i64, i32)> = repo
        .list_ordered()
        .await
        .unwrap()
        .iter()
        .map(|r| (r.id, r.sort_order))
        .collect();
    assert_eq!(pairs, vec![(b.id, 3), (a.id, 5)]);

    // A missing id rolls the whole batch back.
    let err = repo
        .reorder(&[
            ReorderItem { id: a.id, sort_order: 9 },
            ReorderItem { id: 999_999, sort_order: 1 },
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(repo.find(a.id).await.unwrap().unwrap().sort_order, 5);

    // No room above i32::MAX: nothing is written.
    repo.reorder(&[ReorderItem { id: a.id, sort_order: i32::MAX }])
        .await
        .unwrap();
    let err = repo.add_or_reactivate(103).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(repo.existing_ids(&[a.id, b.id]).await.unwrap().len(), 2);
    assert_eq!(repo.list_ordered().await.unwrap().len(), 2);

    assert!(repo.delete(b.id).await.unwrap());
    assert!(!repo.delete(b.id).await.unwrap());
}
