use std::collections::HashMap;

use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::spawn_app;

async fn create(client: &reqwest::Client, address: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/persons", address))
        .json(&body)
        .send()
        .await
        .expect("failed request")
}

#[tokio::test]
async fn it_returns_a_dev_given_a_valid_body() {
    let test_address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = create(
        &client,
        &test_address,
        json!({
            "apelido": "foo",
            "nome": "bye",
            "nascimento": "1992-11-23",
            "stack": ["Rust", "Ruby"]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(LOCATION)
        .expect("header not found")
        .to_str()
        .expect("not ASCII value")
        .starts_with("/persons/"));
    let response_body = response.json::<HashMap<String, Value>>().await.unwrap();
    assert_eq!(response_body["apelido"], "foo");
    assert_eq!(response_body["nome"], "bye");
    assert_eq!(response_body["nascimento"], "1992-11-23");
    assert_eq!(response_body["stack"], json!(["Rust", "Ruby"]));
}

#[tokio::test]
async fn created_dev_can_be_fetched_by_id() {
    let test_address = spawn_app().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &test_address,
        json!({ "apelido": "ana", "nome": "Ana", "nascimento": "1990-01-01", "stack": ["node", "react"] }),
    )
    .await
    .json::<Value>()
    .await
    .unwrap();

    let response = client
        .get(format!("{}/persons/{}", test_address, created["id"].as_str().unwrap()))
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response.json::<Value>().await.unwrap();
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["stack"], json!(["node", "react"]));
}

#[tokio::test]
async fn second_dev_with_same_nickname_is_rejected() {
    let test_address = spawn_app().await;
    let client = reqwest::Client::new();
    let body = json!({ "apelido": "ana", "nome": "Ana", "nascimento": "1990-01-01" });

    let first = create(&client, &test_address, body.clone()).await;
    let second = create(&client, &test_address, body).await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        second.json::<Value>().await.unwrap(),
        json!({ "error": "O apelido deve ser único" })
    );
}

#[tokio::test]
async fn unknown_dev_is_not_found() {
    let test_address = spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("{}/persons/e50408fa-e368-4ccd-9ade-851fdb553e0f", test_address))
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.json::<Value>().await.unwrap()["error"].is_string());
}

#[tokio::test]
async fn search_requires_a_term() {
    let test_address = spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("{}/persons", test_address))
        .send()
        .await
        .expect("failed request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(CONTENT_TYPE)
        .expect("content type")
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), "O termo de busca é obrigatório");
}

#[tokio::test]
async fn search_and_count_after_three_creations() {
    let test_address = spawn_app().await;
    let client = reqwest::Client::new();

    for (nickname, name, stack) in [
        ("ana", "Ana", json!(["Rust"])),
        ("bia", "Beatriz", json!(["Go", "Rust"])),
        ("caio", "Caio", json!(null)),
    ] {
        let response = create(
            &client,
            &test_address,
            json!({ "apelido": nickname, "nome": name, "nascimento": "1990-01-01", "stack": stack }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let found = client
        .get(format!("{}/persons?t=Rust", test_address))
        .send()
        .await
        .expect("failed request")
        .json::<Vec<Value>>()
        .await
        .unwrap();
    let nicknames: Vec<&str> = found.iter().map(|dev| dev["apelido"].as_str().unwrap()).collect();
    assert_eq!(nicknames, vec!["ana", "bia"]);

    let none = client
        .get(format!("{}/persons?t=xyz", test_address))
        .send()
        .await
        .expect("failed request")
        .json::<Vec<Value>>()
        .await
        .unwrap();
    assert!(none.is_empty());

    let count = client
        .get(format!("{}/count-persons", test_address))
        .send()
        .await
        .expect("failed request");
    assert_eq!(count.status(), StatusCode::OK);
    assert_eq!(count.text().await.unwrap(), "3");
}
