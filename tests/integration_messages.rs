use serde_json::json;
use uuid::Uuid;

mod common;

fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}

async fn list_messages(
    client: &reqwest::Client,
    server_url: &str,
    token: &str,
    query: &str,
) -> serde_json::Value {
    let resp = client
        .get(format!("{server_url}/messages?{query}"))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json::<serde_json::Value>().await.unwrap()
}

#[tokio::test]
async fn test_send_and_list_inbox() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let bob = unique_name("bob");
    let token_a = common::register_and_login(&client, &server_url, &alice, "password123").await;
    let token_b = common::register_and_login(&client, &server_url, &bob, "password123").await;

    common::send_message(&client, &server_url, &token_a, &bob, "hello", "first message").await;

    // Bob's inbox has it.
    let inbox = list_messages(&client, &server_url, &token_b, "page=1&pageSize=10").await;
    assert_eq!(inbox["data"].as_array().unwrap().len(), 1);
    assert_eq!(inbox["data"][0]["sender"], alice.as_str());
    assert_eq!(inbox["data"][0]["receiver"], bob.as_str());
    assert_eq!(inbox["data"][0]["subject"], "hello");
    assert_eq!(inbox["data"][0]["is_read"], false);
    assert_eq!(inbox["pagination"]["totalItems"], 1);
    assert_eq!(inbox["pagination"]["totalPages"], 1);
    assert_eq!(inbox["pagination"]["currentPage"], 1);
    assert_eq!(inbox["pagination"]["pageSize"], 10);

    // Alice's inbox does not, but her outbox does.
    let alice_inbox = list_messages(&client, &server_url, &token_a, "page=1").await;
    assert_eq!(alice_inbox["pagination"]["totalItems"], 0);
    assert_eq!(alice_inbox["pagination"]["totalPages"], 0);

    let alice_outbox = list_messages(&client, &server_url, &token_a, "sent=true").await;
    assert_eq!(alice_outbox["pagination"]["totalItems"], 1);
    assert_eq!(alice_outbox["data"][0]["receiver"], bob.as_str());
}

#[tokio::test]
async fn test_send_validation() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let token = common::register_and_login(&client, &server_url, &alice, "password123").await;

    // Whitespace-only subject trims to empty.
    let resp = client
        .post(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "receiver": "bob", "subject": "   ", "body": "text" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "receiver": "", "subject": "hi", "body": "text" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_bulk_update_scoped_to_receiver() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let bob = unique_name("bob");
    let token_a = common::register_and_login(&client, &server_url, &alice, "password123").await;
    let token_b = common::register_and_login(&client, &server_url, &bob, "password123").await;

    let id = common::send_message(&client, &server_url, &token_a, &bob, "hello", "text").await;

    // Bob, the receiver, can mark it read.
    let resp = client
        .put(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token_b}"))
        .json(&json!({ "ids": [id], "is_read": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<serde_json::Value>().await.unwrap()["updated"], 1);

    // Alice sent it, so the same update affects nothing for her.
    let resp = client
        .put(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token_a}"))
        .json(&json!({ "ids": [id], "is_read": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<serde_json::Value>().await.unwrap()["updated"], 0);

    let inbox = list_messages(&client, &server_url, &token_b, "").await;
    assert_eq!(inbox["data"][0]["is_read"], true);
    // The unsupplied archive flag was left untouched.
    assert_eq!(inbox["data"][0]["is_archived"], false);
}

#[tokio::test]
async fn test_archive_partitions_are_disjoint() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let bob = unique_name("bob");
    let token_a = common::register_and_login(&client, &server_url, &alice, "password123").await;
    let token_b = common::register_and_login(&client, &server_url, &bob, "password123").await;

    let keep = common::send_message(&client, &server_url, &token_a, &bob, "keep", "text").await;
    let archive = common::send_message(&client, &server_url, &token_a, &bob, "archive", "text").await;
    assert_ne!(keep, archive);

    let resp = client
        .put(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token_b}"))
        .json(&json!({ "ids": [archive], "is_archived": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<serde_json::Value>().await.unwrap()["updated"], 1);

    let active = list_messages(&client, &server_url, &token_b, "archived=false").await;
    assert_eq!(active["pagination"]["totalItems"], 1);
    assert_eq!(active["data"][0]["id"], keep);

    let archived = list_messages(&client, &server_url, &token_b, "archived=true").await;
    assert_eq!(archived["pagination"]["totalItems"], 1);
    assert_eq!(archived["data"][0]["id"], archive);
}

#[tokio::test]
async fn test_bulk_update_validation() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let token = common::register_and_login(&client, &server_url, &alice, "password123").await;

    let resp = client
        .put(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "ids": [], "is_read": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .put(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "ids": [1, 2] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_bulk_delete_scoped_to_receiver() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let bob = unique_name("bob");
    let token_a = common::register_and_login(&client, &server_url, &alice, "password123").await;
    let token_b = common::register_and_login(&client, &server_url, &bob, "password123").await;

    let id = common::send_message(&client, &server_url, &token_a, &bob, "bye", "text").await;

    // The sender cannot delete it.
    let resp = client
        .delete(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token_a}"))
        .json(&json!({ "ids": [id] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<serde_json::Value>().await.unwrap()["deleted"], 0);

    // The receiver can.
    let resp = client
        .delete(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token_b}"))
        .json(&json!({ "ids": [id] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.json::<serde_json::Value>().await.unwrap()["deleted"], 1);

    let inbox = list_messages(&client, &server_url, &token_b, "").await;
    assert_eq!(inbox["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn test_pagination_over_large_mailbox() {
    let Some(pool) = common::try_test_pool().await else { return };
    let server_url = common::spawn_app(pool).await;
    let client = reqwest::Client::new();

    let alice = unique_name("alice");
    let bob = unique_name("bob");
    let token_a = common::register_and_login(&client, &server_url, &alice, "password123").await;
    let token_b = common::register_and_login(&client, &server_url, &bob, "password123").await;

    let message_count = 25;
    for i in 0..message_count {
        common::send_message(&client, &server_url, &token_a, &bob, &format!("msg {i}"), "text")
            .await;
    }

    let page1 = list_messages(&client, &server_url, &token_b, "page=1&pageSize=10").await;
    assert_eq!(page1["pagination"]["totalItems"], message_count);
    assert_eq!(page1["pagination"]["totalPages"], 3);
    assert_eq!(page1["data"].as_array().unwrap().len(), 10);

    let page3 = list_messages(&client, &server_url, &token_b, "page=3&pageSize=10").await;
    assert_eq!(page3["data"].as_array().unwrap().len(), 5);

    // Newest first across the whole sweep.
    assert_eq!(page1["data"][0]["subject"], "msg 24");
    assert_eq!(page3["data"][4]["subject"], "msg 0");

    // An out-of-range page size falls back into bounds.
    let clamped = list_messages(&client, &server_url, &token_b, "page=0&pageSize=1000").await;
    assert_eq!(clamped["pagination"]["currentPage"], 1);
    assert_eq!(clamped["pagination"]["pageSize"], 100);
}
