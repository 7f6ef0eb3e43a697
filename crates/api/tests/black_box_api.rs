use reqwest::StatusCode;
use serde_json::json;

use stockbeads_api::config::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, but an in-memory database and ephemeral port.
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
        };
        let app = stockbeads_api::app::build_app(&config)
            .await
            .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn login(&self, client: &reqwest::Client) -> String {
        let res = client
            .post(format!("{}/admin/login", self.base_url))
            .json(&json!({ "username": "admin", "password": "admin123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn mutations_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "name": "Bead" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_reads_are_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/admin/login", srv.base_url))
        .json(&json!({ "username": "admin", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn refresh_token_cannot_be_used_as_access_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/admin/login", srv.base_url))
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let refresh = body["refresh_token"].as_str().unwrap().to_string();

    // Refresh token is not an access token.
    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .bearer_auth(&refresh)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // But it buys a fresh access token.
    let res = client
        .post(format!("{}/admin/refresh", srv.base_url))
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let access = body["access_token"].as_str().unwrap();

    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .bearer_auth(access)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn sale_lifecycle_and_oversell_report() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/categories", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Seed beads" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category: serde_json::Value = res.json().await.unwrap();
    let category_id = category["id"].as_i64().unwrap();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Glass bead 6mm",
            "category_id": category_id,
            "stock_quantity": 5,
            "selling_price": 2.5,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let product: serde_json::Value = res.json().await.unwrap();
    let product_id = product["id"].as_i64().unwrap();

    // Oversell: requested 10 against 5 in stock.
    let res = client
        .post(format!("{}/sales", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "product_id": product_id,
            "quantity_sold": 10,
            "total_price": 25.0,
            "payment_method": "cash",
            "sale_status": "completed",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Insufficient stock");
    assert_eq!(body["available"], 5);
    assert_eq!(body["requested"], 10);

    // A fitting sale goes through and the public read reflects it.
    let res = client
        .post(format!("{}/sales", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "product_id": product_id,
            "quantity_sold": 3,
            "total_price": 7.5,
            "payment_method": "cash",
            "sale_status": "completed",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/products/{product_id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["stock_quantity"], 2);
}

#[tokio::test]
async fn missing_fields_are_reported_by_name() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Missing field: product_id");
}

#[tokio::test]
async fn sales_listing_paginates_with_clamped_page_size() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/categories", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Cords" }))
        .send()
        .await
        .unwrap();
    let category_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Cord",
            "category_id": category_id,
            "stock_quantity": 100,
            "selling_price": 1.0,
        }))
        .send()
        .await
        .unwrap();
    let product_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    for _ in 0..12 {
        let res = client
            .post(format!("{}/sales", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "product_id": product_id,
                "quantity_sold": 1,
                "total_price": 1.0,
                "payment_method": "cash",
                "sale_status": "completed",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/sales/all?page=2&per_page=10", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["sales"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_items"], 12);
    assert_eq!(body["pagination"]["has_prev"], true);
    assert_eq!(body["pagination"]["has_next"], false);

    let res = client
        .get(format!("{}/sales/all?per_page=500", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["pagination"]["per_page"], 100);
}

#[tokio::test]
async fn stream_delivers_sale_events_live() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/categories", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Pendants" }))
        .send()
        .await
        .unwrap();
    let category_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    // Threshold defaults to 10, so selling down to 3 also fires the alert.
    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Moon pendant",
            "category_id": category_id,
            "stock_quantity": 5,
            "selling_price": 4.0,
        }))
        .send()
        .await
        .unwrap();
    let product_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    // Open the stream before mutating; late subscribers get no replay.
    let mut stream = client
        .get(format!("{}/stream", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "product_id": product_id,
            "quantity_sold": 2,
            "total_price": 8.0,
            "payment_method": "cash",
            "sale_status": "completed",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let mut body = String::new();
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while !body.contains("event: low_stock_alert") {
            let chunk = stream
                .chunk()
                .await
                .unwrap()
                .expect("stream closed before events arrived");
            body.push_str(&String::from_utf8_lossy(&chunk));
        }
    })
    .await
    .expect("no events within timeout");

    let data = body
        .split("\n\n")
        .find(|frame| frame.contains("event: sale_completed"))
        .and_then(|frame| frame.lines().find_map(|l| l.strip_prefix("data: ")))
        .expect("sale_completed frame carries a data payload");
    let data: serde_json::Value = serde_json::from_str(data).unwrap();
    assert_eq!(data["product_name"], "Moon pendant");
    assert_eq!(data["quantity_sold"], 2);
    assert_eq!(data["remaining_stock"], 3);

    assert!(body.contains("event: low_stock_alert"));
}

#[tokio::test]
async fn order_fulfillment_moves_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = srv.login(&client).await;

    let res = client
        .post(format!("{}/categories", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Clasps" }))
        .send()
        .await
        .unwrap();
    let category_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Lobster clasp",
            "category_id": category_id,
            "stock_quantity": 10,
            "selling_price": 0.8,
        }))
        .send()
        .await
        .unwrap();
    let product_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    let res = client
        .post(format!("{}/orders", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "customer_name": "Ada",
            "items": [{ "product_id": product_id, "quantity": 4 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order_id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_i64()
        .unwrap();

    // Creation alone does not move stock.
    let res = client
        .get(format!("{}/products/{product_id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap()["stock_quantity"],
        10
    );

    let res = client
        .post(format!("{}/orders/{order_id}/fulfill", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/products/{product_id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.json::<serde_json::Value>().await.unwrap()["stock_quantity"],
        6
    );

    // Fulfilling twice conflicts.
    let res = client
        .post(format!("{}/orders/{order_id}/fulfill", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}
