//! Collection CRUD over HTTP against the in-memory store.

mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use serde_json::json;

#[tokio::test]
async fn user_data_scenario() {
    let app = common::app();

    let resp = app.post("/UserData", json!({ "name": "Alice", "age": 30 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    let ack = resp.json();
    assert_eq!(ack["acknowledged"], json!(true));
    let id = ack["insertedId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let resp = app.get(&format!("/collections/UserData/{id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "_id": id, "name": "Alice", "age": 30 }));

    let resp = app.delete(&format!("/collections/UserData/{id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "msg": "success" }));

    let resp = app.get(&format!("/collections/UserData/{id}")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_record() {
    let app = common::app();
    let resp = app.get("/collections/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([]));

    for i in 0..3 {
        app.insert("products", json!({ "n": i })).await;
    }
    let resp = app.get("/collections/products").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_filters_and_pages_from_query() {
    let app = common::app();
    app.insert("lessons", json!({ "subject": "math", "location": "London", "price": 100 })).await;
    app.insert("lessons", json!({ "subject": "art", "location": "Oxford", "price": 80 })).await;
    app.insert("lessons", json!({ "subject": "music", "location": "London", "price": 120 })).await;

    let rows = app.get("/collections/lessons?location=London").await.json();
    let subjects: Vec<&str> = rows.as_array().unwrap().iter().map(|r| r["subject"].as_str().unwrap()).collect();
    assert_eq!(subjects, vec!["math", "music"]);

    let rows = app.get("/collections/lessons?price=80").await.json();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["subject"], json!("art"));

    let rows = app.get("/collections/lessons?skip=1&limit=1").await.json();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["subject"], json!("art"));

    let resp = app.get("/collections/lessons?limit=many").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sorted_listing_respects_max_and_direction() {
    let app = common::app();
    for (subject, price) in [("math", 100), ("art", 80), ("music", 120), ("drama", 90)] {
        app.insert("lessons", json!({ "subject": subject, "price": price })).await;
    }

    let rows = app.get("/collections/lessons/3/price/desc").await.json();
    let prices: Vec<i64> = rows.as_array().unwrap().iter().map(|r| r["price"].as_i64().unwrap()).collect();
    assert_eq!(prices, vec![120, 100, 90]);

    let rows = app.get("/collections/lessons/2/price/asc").await.json();
    let prices: Vec<i64> = rows.as_array().unwrap().iter().map(|r| r["price"].as_i64().unwrap()).collect();
    assert_eq!(prices, vec![80, 90]);

    // Unknown direction tokens sort ascending.
    let rows = app.get("/collections/lessons/10/subject/descending").await.json();
    let subjects: Vec<&str> = rows.as_array().unwrap().iter().map(|r| r["subject"].as_str().unwrap()).collect();
    assert_eq!(subjects, vec!["art", "drama", "math", "music"]);

    let rows = app.get("/collections/lessons/0/price/asc").await.json();
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn sorted_listing_rejects_non_numeric_max() {
    let app = common::app();
    app.insert("lessons", json!({ "price": 1 })).await;
    let resp = app.get("/collections/lessons/ten/price/asc").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["code"], json!("bad_request"));
    let resp = app.get("/collections/lessons/-5/price/asc").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_ids_rejected_before_store() {
    let app = common::app();
    app.insert("products", json!({ "name": "pen" })).await;

    for bad in ["123", "not-an-object-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
        let uri = format!("/collections/products/{bad}");
        let resp = app.get(&uri).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(resp.json()["error"]["message"], json!("Invalid ID format"));
        assert_eq!(app.put(&uri, json!({ "name": "x" })).await.status, StatusCode::BAD_REQUEST);
        assert_eq!(app.delete(&uri).await.status, StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.store.count("products"), 1);
}

#[tokio::test]
async fn malformed_id_reported_before_body_problems() {
    let app = common::app();
    let resp = app.request("PUT", "/collections/products/nope", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["code"], json!("invalid_id"));

    let id = app.insert("products", json!({ "name": "pen" })).await;
    let resp = app.request("PUT", &format!("/collections/products/{id}"), None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["code"], json!("bad_request"));
}

#[tokio::test]
async fn dotted_field_names_rejected() {
    let app = common::app();
    let id = app.insert("products", json!({ "a": { "b": 1 } })).await;
    let uri = format!("/collections/products/{id}");
    let resp = app.put(&uri, json!({ "a.b": 2 })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(&uri).await.json(), json!({ "_id": id, "a": { "b": 1 } }));

    let resp = app.get("/collections/products?a.b=1").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn absent_ids_are_not_found() {
    let app = common::app();
    let uri = format!("/collections/products/{}", ObjectId::new().to_hex());
    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.put(&uri, json!({ "name": "x" })).await.status, StatusCode::NOT_FOUND);
    let resp = app.delete(&uri).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"]["message"], json!("Record not found"));
}

#[tokio::test]
async fn update_merges_fields() {
    let app = common::app();
    let id = app.insert("products", json!({ "a": 1, "b": 2 })).await;
    let uri = format!("/collections/products/{id}");

    let resp = app.put(&uri, json!({ "b": 3 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({ "msg": "success" }));
    assert_eq!(app.get(&uri).await.json(), json!({ "_id": id, "a": 1, "b": 3 }));

    // Identical values modify nothing.
    assert_eq!(app.put(&uri, json!({ "b": 3 })).await.status, StatusCode::NOT_FOUND);
    // The identifier cannot be changed.
    let resp = app.put(&uri, json!({ "_id": ObjectId::new().to_hex(), "c": 4 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.get(&uri).await.json(), json!({ "_id": id, "a": 1, "b": 3, "c": 4 }));

    assert_eq!(app.put(&uri, json!({})).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.put(&uri, json!([1, 2])).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_twice() {
    let app = common::app();
    let id = app.insert("products", json!({ "name": "pen" })).await;
    let uri = format!("/collections/products/{id}");
    assert_eq!(app.delete(&uri).await.status, StatusCode::OK);
    assert_eq!(app.delete(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn insert_ignores_client_id_and_rejects_non_objects() {
    let app = common::app();
    let id = app.insert("products", json!({ "_id": "mine", "name": "pen" })).await;
    assert_ne!(id, "mine");
    let rec = app.get(&format!("/collections/products/{id}")).await.json();
    assert_eq!(rec, json!({ "_id": id, "name": "pen" }));

    let resp = app.post("/collections/products", json!("just a string")).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_collections_are_not_found() {
    let app = common::app();
    let resp = app.get("/collections/secrets").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"]["code"], json!("not_found"));

    let resp = app.post("/collections/secrets", json!({ "a": 1 })).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.count("secrets"), 0);

    let resp = app.get(&format!("/collections/secrets/{}", ObjectId::new().to_hex())).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
