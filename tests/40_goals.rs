mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn goal_crud_round_trip() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.signup("ada@example.com").await?;

    let (status, body) = server
        .post(
            "/goals",
            &token,
            json!({ "title": "Run a marathon", "category": "health", "due_date": "2025-10-12" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["progress"], 0);
    let path = format!("/goals/{}", body["data"]["id"].as_str().unwrap());

    let (status, body) = server
        .put(
            &path,
            &token,
            json!({ "title": "Run a marathon", "category": "health", "progress": 40 }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["progress"], 40);
    assert!(body["data"]["due_date"].is_null());

    let (status, body) = server.get("/goals", &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = server.delete(&path, &token).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server.delete(&path, &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn goal_progress_must_be_a_percentage() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.signup("ada@example.com").await?;

    let (status, body) = server
        .post("/goals", &token, json!({ "title": "Overachieve", "category": "work", "progress": 150 }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["progress"].is_string());

    let (status, body) = server.post("/goals", &token, json!({ "progress": 10 })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["title"].is_string());
    assert!(body["field_errors"]["category"].is_string());
    Ok(())
}

#[tokio::test]
async fn other_users_cannot_update_my_goals() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = server.signup("owner@example.com").await?;
    let intruder = server.signup("intruder@example.com").await?;

    let (_, body) = server
        .post("/goals", &owner, json!({ "title": "Save money", "category": "finance", "progress": 5 }))
        .await?;
    let path = format!("/goals/{}", body["data"]["id"].as_str().unwrap());

    let (status, _) = server
        .put(&path, &intruder, json!({ "title": "Spend it", "category": "finance", "progress": 100 }))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = server.get(&path, &owner).await?;
    assert_eq!(body["data"]["progress"], 5);
    Ok(())
}
