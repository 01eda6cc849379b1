mod common;

use axum::Router;
use axum_test::TestServer;
use serde_json::json;
use vocab_cards::api::routes::api_routes;
use vocab_cards::web::routes::view_routes;

async fn make_server() -> TestServer {
    let state = common::create_test_state(common::test_pool().await);
    let app = Router::new()
        .merge(api_routes())
        .nest("/view", view_routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_cards_page_renders_cards() {
    let server = make_server().await;
    server
        .post("/cards")
        .json(&json!({
            "word_type": "NOUN",
            "relevance_description": "A1",
            "german": "der Hund",
            "italian": "il cane",
            "tags": ["animals"]
        }))
        .await;

    let response = server.get("/view/cards").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("der Hund"));
    assert!(html.contains("il cane"));
    assert!(html.contains("animals"));
    assert!(html.contains("1 cards, page 1 of 1"));
}

#[tokio::test]
async fn test_cards_page_escapes_html() {
    let server = make_server().await;
    server
        .post("/cards")
        .json(&json!({
            "relevance_description": "A1",
            "german": "<b>fett</b>",
            "italian": "grassetto"
        }))
        .await;

    let html = server.get("/view/cards").await.text();

    assert!(!html.contains("<b>fett</b>"));
    assert!(html.contains("&lt;b&gt;fett"));
}

#[tokio::test]
async fn test_cards_page_navigation_links() {
    let server = make_server().await;
    for (german, italian) in [("haben", "avere"), ("alt", "vecchio")] {
        server
            .post("/cards")
            .json(&common::card_body(german, italian))
            .await;
    }

    let html = server
        .get("/view/cards")
        .add_query_param("page_size", 1)
        .await
        .text();

    assert!(html.contains("haben"));
    assert!(!html.contains("vecchio"));
    assert!(html.contains("page=2&amp;page_size=1") || html.contains("page=2&page_size=1"));
}

#[tokio::test]
async fn test_cards_page_invalid_page() {
    let server = make_server().await;

    let response = server.get("/view/cards").add_query_param("page", 0).await;

    response.assert_status_bad_request();
}
