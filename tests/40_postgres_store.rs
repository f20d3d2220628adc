//! Runs against a live PostgreSQL when DATABASE_URL is set; every test returns early otherwise.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use cashcard_api::config::{AppConfig, StoreBackend};
use cashcard_api::database::{seed, CashCardRepository, DatabaseError, DatabaseManager, PgCashCardRepository};
use cashcard_api::database::models::CashCard;
use cashcard_api::filter::{PageRequest, SortOrder, SortProperty};

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Pool and repository for the configured database, or `None` when DATABASE_URL is unset
async fn connect() -> Result<Option<(PgPool, PgCashCardRepository)>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping postgres store test");
        return Ok(None);
    };

    let mut config = AppConfig::development().database;
    config.backend = StoreBackend::Postgres;
    config.url = Some(url);
    config.max_connections = 2;

    let pool = DatabaseManager::connect(&config).await?;
    // Schema bootstrap and demo seeding run once per test binary
    SCHEMA
        .get_or_try_init(|| async {
            DatabaseManager::bootstrap_schema(&pool).await?;
            seed::seed_postgres(&pool).await
        })
        .await?;

    Ok(Some((pool.clone(), PgCashCardRepository::new(pool))))
}

/// Owner name no other test or earlier run uses
fn unique_owner(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", prefix, nanos)
}

fn ids(cards: &[CashCard]) -> Vec<i64> {
    cards.iter().filter_map(|c| c.id).collect()
}

async fn insert(repo: &PgCashCardRepository, cents: i64, owner: &str) -> Result<i64> {
    let saved = repo.save(CashCard::new(None, Decimal::new(cents, 2), owner)).await?;
    saved.id.ok_or_else(|| anyhow::anyhow!("insert returned no id"))
}

#[tokio::test]
async fn insert_assigns_id_and_keeps_exact_amount() -> Result<()> {
    let Some((_pool, repo)) = connect().await? else { return Ok(()) };
    let owner = unique_owner("insert");

    let saved = repo.save(CashCard::new(None, Decimal::new(12345, 2), &owner)).await?;
    let id = saved.id.expect("id assigned on insert");
    assert_eq!(saved.amount, Decimal::new(12345, 2));
    assert_eq!(saved.owner, owner);

    let found = repo.find_by_id_and_owner(id, &owner).await?.expect("inserted card");
    assert_eq!(found, saved);
    assert_eq!(found.amount.to_string(), "123.45");

    assert!(repo.find_by_id_and_owner(id, "someone-else").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn update_overwrites_existing_row_and_rejects_missing_id() -> Result<()> {
    let Some((_pool, repo)) = connect().await? else { return Ok(()) };
    let owner = unique_owner("update");
    let id = insert(&repo, 100, &owner).await?;

    let updated = repo.save(CashCard::new(Some(id), Decimal::new(1999, 2), &owner)).await?;
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.amount, Decimal::new(1999, 2));

    let err = repo
        .save(CashCard::new(Some(-1), Decimal::new(100, 2), &owner))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)), "unexpected error: {:?}", err);
    Ok(())
}

#[tokio::test]
async fn pages_are_owner_scoped_and_break_ties_on_id() -> Result<()> {
    let Some((_pool, repo)) = connect().await? else { return Ok(()) };
    let owner = unique_owner("page");
    let first_five = insert(&repo, 500, &owner).await?;
    let one = insert(&repo, 100, &owner).await?;
    let second_five = insert(&repo, 500, &owner).await?;
    let three = insert(&repo, 300, &owner).await?;
    insert(&repo, 200, &unique_owner("page-other")).await?;

    let by_amount = vec![SortOrder::asc(SortProperty::Amount)];
    let cards = repo.find_page_by_owner(&owner, &PageRequest::new(0, 2, by_amount.clone())).await?;
    assert_eq!(ids(&cards), vec![one, three]);

    let cards = repo.find_page_by_owner(&owner, &PageRequest::new(1, 2, by_amount)).await?;
    assert_eq!(ids(&cards), vec![first_five, second_five]);

    let by_amount_desc = vec![SortOrder::desc(SortProperty::Amount)];
    let cards = repo.find_page_by_owner(&owner, &PageRequest::new(0, 10, by_amount_desc)).await?;
    assert_eq!(ids(&cards), vec![first_five, second_five, three, one]);

    let by_id_desc = vec![SortOrder::desc(SortProperty::Id)];
    let cards = repo.find_page_by_owner(&owner, &PageRequest::new(0, 10, by_id_desc)).await?;
    assert_eq!(ids(&cards), vec![three, second_five, one, first_five]);

    let cards = repo.find_page_by_owner(&owner, &PageRequest::new(5, 10, vec![])).await?;
    assert!(cards.is_empty());
    Ok(())
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() -> Result<()> {
    let Some((_pool, repo)) = connect().await? else { return Ok(()) };
    let owner = unique_owner("delete");
    let id = insert(&repo, 100, &owner).await?;

    assert!(!repo.delete_by_id_and_owner(id, "someone-else").await?);
    assert!(repo.exists_by_id_and_owner(id, &owner).await?);

    assert!(repo.delete_by_id_and_owner(id, &owner).await?);
    assert!(!repo.exists_by_id_and_owner(id, &owner).await?);
    assert!(!repo.delete_by_id_and_owner(id, &owner).await?);
    Ok(())
}

#[tokio::test]
async fn seeding_twice_leaves_sequence_past_demo_ids() -> Result<()> {
    let Some((pool, repo)) = connect().await? else { return Ok(()) };

    seed::seed_postgres(&pool).await?;
    seed::seed_postgres(&pool).await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cash_card WHERE id BETWEEN 99 AND 102")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 4);

    let id = insert(&repo, 100, &unique_owner("seed")).await?;
    assert!(id > 102, "new card reused a seeded id: {}", id);
    Ok(())
}
