use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::CashCard;

/// Demo rows used in development: three cards for sarah1 and one for kumar2
pub fn demo_cards() -> Vec<CashCard> {
    vec![
        CashCard::new(Some(99), Decimal::new(12345, 2), "sarah1"),
        CashCard::new(Some(100), Decimal::new(100, 2), "sarah1"),
        CashCard::new(Some(101), Decimal::new(15000, 2), "sarah1"),
        CashCard::new(Some(102), Decimal::new(20000, 2), "kumar2"),
    ]
}

/// Insert the demo rows unless they already exist, then move the id sequence past them
pub async fn seed_postgres(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut inserted = 0u64;
    for card in demo_cards() {
        let result = sqlx::query(
            "INSERT INTO cash_card (id, amount, owner) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(card.id)
        .bind(card.amount)
        .bind(&card.owner)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }

    // Never moves the sequence backwards past ids already handed out
    sqlx::query(
        r#"
        SELECT setval(seq, GREATEST(
            (SELECT COALESCE(MAX(id), 1) FROM cash_card),
            COALESCE(pg_sequence_last_value(seq), 1)
        ))
        FROM (SELECT pg_get_serial_sequence('cash_card', 'id')::regclass AS seq) s
        "#,
    )
    .execute(pool)
    .await?;

    info!("Seeded {} demo cash cards", inserted);
    Ok(())
}
