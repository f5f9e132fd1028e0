mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_requires_email_and_password() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for payload in [
        json!({ "name": "Ada" }),
        json!({ "email": "ada@example.com" }),
        json!({ "email": "  ", "password": "hunter22" }),
    ] {
        let res = client
            .post(format!("{}/api/auth/register", server.base_url))
            .json(&payload)
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Email and password are required");
    }
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_body() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(format!("{}/api/auth/register", server.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
