mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{ids, TestServer};

#[tokio::test]
async fn returns_owned_cash_card() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards/99").send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let card = res.json::<Value>().await?;
    assert_eq!(card, json!({ "id": 99, "amount": 123.45, "owner": "sarah1" }));
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found_with_empty_body() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards/1000").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn other_owners_card_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards/102").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The card exists for its real owner
    let res = server
        .get("/cashcards/102", common::KUMAR, common::KUMAR_PASSWORD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn lists_owned_cards_sorted_by_amount() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards").send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cards = res.json::<Value>().await?;
    assert_eq!(ids(&cards), vec![100, 99, 101]);
    assert!(cards
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["owner"] == "sarah1"));
    Ok(())
}

#[tokio::test]
async fn returns_a_page_of_cards() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards?page=0&size=1").send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cards = res.json::<Value>().await?;
    assert_eq!(ids(&cards), vec![100]);
    Ok(())
}

#[tokio::test]
async fn returns_a_sorted_page_of_cards() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .get_as_sarah("/cashcards?page=0&size=1&sort=amount,desc")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cards = res.json::<Value>().await?;
    assert_eq!(cards, json!([{ "id": 101, "amount": 150.0, "owner": "sarah1" }]));
    Ok(())
}

#[tokio::test]
async fn later_pages_continue_the_order() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards?page=1&size=2").send().await?;
    let cards = res.json::<Value>().await?;
    assert_eq!(ids(&cards), vec![101]);

    let res = server.get_as_sarah("/cashcards?page=5&size=2").send().await?;
    let cards = res.json::<Value>().await?;
    assert_eq!(cards, json!([]));
    Ok(())
}

#[tokio::test]
async fn sorts_by_id_descending() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards?sort=id,desc").send().await?;
    let cards = res.json::<Value>().await?;
    assert_eq!(ids(&cards), vec![101, 100, 99]);
    Ok(())
}

#[tokio::test]
async fn unknown_sort_property_is_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get_as_sarah("/cashcards?sort=colour,desc").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
