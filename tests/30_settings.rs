mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::Mutex;

static STORE_LOCK: Mutex<()> = Mutex::const_new(());

fn settings_url(base: &str) -> String {
    format!("{}/api/settings", base)
}

#[tokio::test]
async fn settings_round_trip() -> Result<()> {
    let _guard = STORE_LOCK.lock().await;
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(settings_url(&server.base_url))
        .bearer_auth(common::ADMIN_TOKEN)
        .json(&serde_json::json!({"limit": 25}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(settings_url(&server.base_url))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["limit"], 25);
    Ok(())
}

#[tokio::test]
async fn settings_expose_the_delete_endpoint_url() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(settings_url(&server.base_url))
        .bearer_auth(common::ADMIN_TOKEN)
        .send()
        .await?;

    let body = res.json::<Value>().await?;
    let url = body["data"]["endpoint_url"].as_str().unwrap_or_default();
    assert!(
        url.ends_with("/product-delete/v1/delete-products"),
        "unexpected endpoint_url: {}",
        url
    );
    Ok(())
}

#[tokio::test]
async fn rejects_non_positive_limit() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .put(settings_url(&server.base_url))
        .bearer_auth(common::ADMIN_TOKEN)
        .json(&serde_json::json!({"limit": 0}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn requires_admin_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(settings_url(&server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(settings_url(&server.base_url))
        .bearer_auth("wrong-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
