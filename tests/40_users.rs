mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn profile_update_round_trips() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _user) = common::signup(server, &client).await?;

    let res = client
        .put(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Renamed Reader", "bio": "Mostly essays" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = client
        .get(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(body["data"]["user"]["name"], "Renamed Reader");
    assert_eq!(body["data"]["user"]["bio"], "Mostly essays");
    Ok(())
}

#[tokio::test]
async fn preferences_are_partially_updated() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let (token, _user) = common::signup(server, &client).await?;

    let res = client
        .put(server.url("/api/users/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "theme": "dark", "readingMode": "page-by-page" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["preferences"]["theme"], "dark");
    assert_eq!(body["data"]["preferences"]["readingMode"], "page-by-page");
    assert_eq!(body["data"]["preferences"]["fontSize"], 16);

    let res = client
        .put(server.url("/api/users/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "fontSize": 30 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(server.url("/api/users/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "fontSize": 300 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert!(err["field_errors"].get("fontSize").is_some(), "{}", err);

    let res = client
        .put(server.url("/api/users/preferences"))
        .bearer_auth(&token)
        .json(&json!({ "theme": "sepia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
