mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{get, post, request, signup, test_app};

#[tokio::test]
async fn create_then_get_round_trip() {
    let app = test_app().await;
    let session = signup(&app, "A", "a@x.com", "secret1").await;

    let (status, body) = post(
        &app,
        "/budgets",
        Some(&session),
        json!({ "name": "Groceries", "amount": 300 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget created");

    let (_, budgets) = get(&app, "/budgets", Some(&session)).await;
    let id = budgets[0]["id"].as_i64().unwrap();

    let (status, budget) = get(&app, &format!("/budgets/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budget["name"], "Groceries");
    assert_eq!(budget["amount"], 300.0);
    assert_eq!(budget["expenses"], json!([]));
}

#[tokio::test]
async fn list_returns_own_budgets_newest_first() {
    let app = test_app().await;
    let session = signup(&app, "A", "a@x.com", "secret1").await;
    let other = signup(&app, "B", "b@x.com", "secret2").await;

    for name in ["First", "Second", "Third"] {
        let (status, _) = post(
            &app,
            "/budgets",
            Some(&session),
            json!({ "name": name, "amount": 100 }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    post(&app, "/budgets", Some(&other), json!({ "name": "Not mine", "amount": 50 })).await;

    let (status, budgets) = get(&app, "/budgets", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = budgets
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);

    // Repeated reads are stable
    let (_, again) = get(&app, "/budgets", Some(&session)).await;
    assert_eq!(budgets, again);
}

#[tokio::test]
async fn update_and_delete_own_budget() {
    let app = test_app().await;
    let session = signup(&app, "A", "a@x.com", "secret1").await;

    post(&app, "/budgets", Some(&session), json!({ "name": "Old", "amount": 10 })).await;
    let (_, budgets) = get(&app, "/budgets", Some(&session)).await;
    let id = budgets[0]["id"].as_i64().unwrap();

    let (status, body) = request(
        &app,
        Method::PUT,
        &format!("/budgets/{id}"),
        Some(&session),
        Some(json!({ "name": "New", "amount": 42.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget updated");

    let (_, budget) = get(&app, &format!("/budgets/{id}"), Some(&session)).await;
    assert_eq!(budget["name"], "New");
    assert_eq!(budget["amount"], 42.5);

    let (status, body) = request(
        &app,
        Method::DELETE,
        &format!("/budgets/{id}"),
        Some(&session),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget deleted");

    let (status, _) = get(&app, &format!("/budgets/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_owner_is_denied_regardless_of_operation() {
    let app = test_app().await;
    let owner = signup(&app, "A", "a@x.com", "secret1").await;
    let intruder = signup(&app, "B", "b@x.com", "secret2").await;

    post(&app, "/budgets", Some(&owner), json!({ "name": "Mine", "amount": 5 })).await;
    let (_, budgets) = get(&app, "/budgets", Some(&owner)).await;
    let id = budgets[0]["id"].as_i64().unwrap();

    let (status, body) = get(&app, &format!("/budgets/{id}"), Some(&intruder)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access denied");

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/budgets/{id}"),
        Some(&intruder),
        Some(json!({ "name": "Stolen", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/budgets/{id}"),
        Some(&intruder),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Untouched
    let (status, budget) = get(&app, &format!("/budgets/{id}"), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(budget["name"], "Mine");
}

#[tokio::test]
async fn budget_id_must_be_a_positive_integer() {
    let app = test_app().await;
    let session = signup(&app, "A", "a@x.com", "secret1").await;

    for bad in ["abc", "0", "-1", "1.5"] {
        let (status, body) = get(&app, &format!("/budgets/{bad}"), Some(&session)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {bad:?}");
        assert_eq!(body["errors"][0]["msg"], "Id not valid");
    }

    let (status, body) = get(&app, "/budgets/999", Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Budget not found");
}

#[tokio::test]
async fn create_validates_name_and_amount() {
    let app = test_app().await;
    let session = signup(&app, "A", "a@x.com", "secret1").await;

    let (status, body) = post(&app, "/budgets", Some(&session), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msgs: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(msgs, vec!["Name is required", "Amount is required"]);

    let (status, body) = post(
        &app,
        "/budgets",
        Some(&session),
        json!({ "name": "X", "amount": "much" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "Amount must be a number");

    let (status, body) = post(
        &app,
        "/budgets",
        Some(&session),
        json!({ "name": "X", "amount": -20 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["msg"], "Amount must be greater than 0");
}

#[tokio::test]
async fn budgets_require_a_session() {
    let app = test_app().await;

    let (status, body) = get(&app, "/budgets", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token is required");
}
