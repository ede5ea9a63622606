//! End-to-end API behaviour over HTTP against the in-memory store.

mod common;

use common::{memory_settings, spawn_server, spawn_server_with, TestServer};
use menuiq::domain::model::UserId;
use menuiq::transport::http::error::file_too_large;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

const MENU_CSV: &str = "name,description,price,cost,category,tags,sales_count\n\
Grilled Atlantic Salmon,Fresh salmon fillet,28.99,12.50,Main Course,\"seafood,healthy\",89\n\
Caesar Salad,Crisp romaine,14.99,4.25,Appetizer,\"vegetarian,classic\",127\n\
Tiramisu,Classic Italian dessert,10.99,3.25,Dessert,dessert,8\n";

fn upload_form(file_name: &str, mime: Option<&str>, body: &[u8], title: Option<&str>) -> Form {
    let mut part = Part::bytes(body.to_vec()).file_name(file_name.to_string());
    if let Some(mime) = mime {
        part = part.mime_str(mime).expect("valid mime");
    }
    let mut form = Form::new().part("menuFile", part);
    if let Some(title) = title {
        form = form.text("title", title.to_string());
    }
    form
}

async fn upload(server: &TestServer, form: Form) -> (StatusCode, Value) {
    let resp = server
        .client
        .post(server.url("/api/menu/upload"))
        .bearer_auth(&server.token)
        .multipart(form)
        .send()
        .await
        .expect("upload request");
    let status = resp.status();
    (status, resp.json().await.expect("json body"))
}

async fn get(server: &TestServer, path: &str, token: &str) -> (StatusCode, Value) {
    let resp = server
        .client
        .get(server.url(path))
        .bearer_auth(token)
        .send()
        .await
        .expect("get request");
    let status = resp.status();
    (status, resp.json().await.expect("json body"))
}

async fn upload_sample(server: &TestServer) -> i64 {
    let form = upload_form("menu.csv", Some("text/csv"), MENU_CSV.as_bytes(), Some("Main Menu"));
    let (status, body) = upload(server, form).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["menuId"].as_i64().expect("menu id")
}

#[tokio::test]
async fn health_reports_ok() {
    let server = spawn_server().await;
    let resp = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "data": {"status": "ok"}}));
}

#[tokio::test]
async fn csv_upload_creates_menu_and_reads_back() {
    let server = spawn_server().await;

    let form = upload_form("menu.csv", Some("text/csv"), MENU_CSV.as_bytes(), Some("Main Menu"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["itemsProcessed"], 3);
    assert_eq!(body["data"]["title"], "Main Menu");
    let menu_id = body["data"]["menuId"].as_i64().unwrap();

    let (status, body) = get(&server, &format!("/api/menu/{menu_id}"), &server.token).await;
    assert_eq!(status, StatusCode::OK);
    let menu = &body["data"]["menu"];
    assert_eq!(menu["title"], "Main Menu");
    assert_eq!(menu["status"], "active");
    assert_eq!(menu["stats"]["totalItems"], 3);
    assert_eq!(menu["stats"]["totalSales"], 224);
    assert_eq!(
        menu["stats"]["categories"],
        json!(["Appetizer", "Dessert", "Main Course"])
    );

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Caesar Salad");
    let salmon = items.iter().find(|i| i["name"] == "Grilled Atlantic Salmon").unwrap();
    assert_eq!(salmon["tags"], json!(["seafood", "healthy"]));
    assert_eq!(salmon["sales_count"], 89);
    assert!((salmon["profit_margin"].as_f64().unwrap() - 56.88).abs() < 0.01);
}

#[tokio::test]
async fn json_upload_detected_by_file_name() {
    let server = spawn_server().await;
    let body = json!([
        {"name": "Soup", "price": 6.5, "cost": 2, "tags": ["hot"]},
        {"name": "Bread", "price": "3.00"}
    ]);
    let form = upload_form("menu.json", None, body.to_string().as_bytes(), Some("Lunch"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["itemsProcessed"], 2);
}

#[tokio::test]
async fn invalid_rows_reject_the_whole_upload() {
    let server = spawn_server().await;
    let csv = "name,price,cost\nSoup,5.00,1\n,5,1\nStew,abc,-2\n";
    let form = upload_form("menu.csv", Some("text/csv"), csv.as_bytes(), Some("Broken"));

    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation errors found in menu data");
    assert_eq!(body["validItemsCount"], 1);
    assert_eq!(
        body["errors"],
        json!([
            {"row": 2, "errors": ["Item name is required"]},
            {"row": 3, "errors": ["Valid price is required", "Cost must be a valid positive number"]}
        ])
    );
    assert_eq!(server.store.row_counts().await, (0, 0));
}

#[tokio::test]
async fn upload_form_problems_are_reported() {
    let server = spawn_server().await;

    let form = upload_form("menu.csv", Some("text/csv"), MENU_CSV.as_bytes(), None);
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "title");
    assert_eq!(body["errors"][0]["message"], "Menu title is required");

    let long = "t".repeat(256);
    let form = upload_form("menu.csv", Some("text/csv"), MENU_CSV.as_bytes(), Some(long.as_str()));
    let (_, body) = upload(&server, form).await;
    assert_eq!(body["errors"][0]["message"], "Menu title too long");

    let form = Form::new().text("title", "No File");
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded");

    let form = upload_form("menu.txt", Some("text/plain"), b"hello", Some("Text"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid file type. Only CSV and JSON files are allowed."
    );

    let form = upload_form("menu.json", Some("application/json"), b"{not json", Some("Bad"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON format");
    assert!(body.get("error").is_none());

    let form = upload_form("menu.json", Some("application/json"), b"[]", Some("Empty"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Menu data must be a non-empty array");

    assert_eq!(server.store.row_counts().await, (0, 0));
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let mut settings = memory_settings();
    settings.upload.max_file_bytes = 1024;
    let server = spawn_server_with(settings).await;

    let mut csv = String::from("name,price\n");
    while csv.len() <= 2048 {
        csv.push_str("Filler Dish,9.99\n");
    }
    let form = upload_form("menu.csv", Some("text/csv"), csv.as_bytes(), Some("Huge"));
    let (status, body) = upload(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "File too large. Maximum size is 1KB.");
    assert_eq!(server.store.row_counts().await, (0, 0));

    assert_eq!(
        file_too_large(10 * 1024 * 1024),
        "File too large. Maximum size is 10MB."
    );
}

#[tokio::test]
async fn error_detail_is_only_shown_by_development_servers() {
    let mut dev_settings = memory_settings();
    dev_settings.server.development = true;
    let dev = spawn_server_with(dev_settings).await;
    let prod = spawn_server().await;

    for (server, shows_detail) in [(&dev, true), (&prod, false), (&dev, true)] {
        let form = upload_form("menu.json", None, b"{not json", Some("Broken"));
        let (status, body) = upload(server, form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid JSON format");
        assert_eq!(body["error"].is_string(), shows_detail, "{body}");
    }
}

#[tokio::test]
async fn requests_without_valid_token_are_unauthorized() {
    let server = spawn_server().await;

    let resp = server.client.get(server.url("/api/menu")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "No token provided");

    let (status, body) = get(&server, "/api/menu", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"sub": "1", "exp": 1_000_000, "role": "owner", "user_id": 1}),
        &jsonwebtoken::EncodingKey::from_secret(server.settings.auth.jwt_secret.as_bytes()),
    )
    .unwrap();
    let (status, body) = get(&server, "/api/menu", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn menu_ids_are_validated_and_missing_menus_are_404() {
    let server = spawn_server().await;

    for bad in ["abc", "0", "-4", "1.5"] {
        let (status, body) = get(&server, &format!("/api/menu/{bad}"), &server.token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {bad}");
        assert_eq!(body["message"], "Invalid menu ID");
    }

    let (status, body) = get(&server, "/api/menu/9999", &server.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Menu not found"}));

    let (status, body) = get(&server, "/api/menu/9999/insights", &server.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Menu not found");
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let server = spawn_server().await;
    let resp = server.client.get(server.url("/api/nothing")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Not found - /api/nothing");
}

#[tokio::test]
async fn insights_over_http() {
    let server = spawn_server().await;
    let menu_id = upload_sample(&server).await;

    let (status, body) = get(&server, &format!("/api/menu/{menu_id}/insights"), &server.token).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["overview"]["topPerformer"], "Caesar Salad");
    assert_eq!(data["overview"]["totalItems"], 3);
    assert_eq!(data["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(data["recommendations"][2]["affectedItems"], 3);
    assert_eq!(data["itemAnalysis"][0]["name"], "Caesar Salad");
    assert_eq!(data["itemAnalysis"][2]["performance"], "average");
}

#[tokio::test]
async fn list_and_delete_are_owner_scoped() {
    let server = spawn_server().await;
    let menu_id = upload_sample(&server).await;
    let (_, rival_token) = server.add_owner("rival@menuiq.test").await;

    let (status, body) = get(&server, "/api/menu", &server.token).await;
    assert_eq!(status, StatusCode::OK);
    let menus = body["data"].as_array().unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["id"], menu_id);
    assert_eq!(menus[0]["item_count"], 3);
    assert_eq!(menus[0]["total_sales"], 224);
    assert_eq!(menus[0]["user_id"], server.owner.0);

    let (_, body) = get(&server, "/api/menu", &rival_token).await;
    assert_eq!(body["data"], json!([]));
    let (status, _) = get(&server, &format!("/api/menu/{menu_id}"), &rival_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let resp = server
        .client
        .delete(server.url(&format!("/api/menu/{menu_id}")))
        .bearer_auth(&rival_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.store.row_counts().await, (1, 3));

    let resp = server
        .client
        .delete(server.url(&format!("/api/menu/{menu_id}")))
        .bearer_auth(&server.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Menu deleted successfully");
    assert_eq!(server.store.row_counts().await, (0, 0));

    let (status, _) = get(&server, &format!("/api/menu/{menu_id}"), &server.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn token_for_unknown_owner_cannot_create_menus() {
    let server = spawn_server().await;
    let ghost = common::token_for(&server.settings, UserId(424242));

    let resp = server
        .client
        .post(server.url("/api/menu/upload"))
        .bearer_auth(&ghost)
        .multipart(upload_form("menu.csv", Some("text/csv"), MENU_CSV.as_bytes(), Some("Ghost")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Referenced record does not exist");
    assert_eq!(server.store.row_counts().await, (0, 0));
}
