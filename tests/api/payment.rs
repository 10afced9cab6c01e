use crate::helpers::{spawn_app, TestApp};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_order_body(order_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": order_id,
        "entity": "order",
        "amount": 50000,
        "amount_paid": 0,
        "amount_due": 50000,
        "currency": "INR",
        "receipt": "donation_1723291200",
        "status": "created",
        "created_at": 1723291200,
    })
}

fn gateway_payment_body(order_id: &str, status: &str, captured: bool) -> serde_json::Value {
    serde_json::json!({
        "count": 1,
        "items": [{
            "id": "pay_test_1",
            "entity": "payment",
            "amount": 50000,
            "currency": "INR",
            "status": status,
            "order_id": order_id,
            "method": "upi",
            "captured": captured,
            "created_at": 1723291500,
        }],
    })
}

async fn mount_order_mock(server: &MockServer, order_id: &str) {
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order_body(order_id)))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;
}

async fn order_count(app: &TestApp) -> i64 {
    sqlx::query_scalar("SELECT count(*) FROM payment_order")
        .fetch_one(&app.db_pool)
        .await
        .unwrap()
}

#[actix_web::test]
async fn gateway_failure_leaves_no_order_behind() {
    let app = spawn_app().await;
    let token = app.register_and_login("donor").await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "description": "Authentication failed" },
        })))
        .expect(1)
        .mount(&app.gateway_server)
        .await;

    let response = app
        .post_json(
            "/payment/order/create",
            &token,
            &serde_json::json!({
                "amount": 500,
                "idempotencyKey": Uuid::new_v4(),
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Authentication failed"));
    assert_eq!(order_count(&app).await, 0);
}

#[actix_web::test]
async fn retrying_with_the_same_key_reuses_the_order() {
    let app = spawn_app().await;
    let token = app.register_and_login("donor").await;
    let idempotency_key = Uuid::new_v4();

    // expect(1) fails the test if the retry reaches the gateway again.
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gateway_order_body("order_test_1")))
        .expect(1)
        .mount(&app.gateway_server)
        .await;

    let request_body = serde_json::json!({
        "amount": 500,
        "idempotencyKey": idempotency_key,
    });
    let first = app
        .post_json("/payment/order/create", &token, &request_body)
        .await;
    assert!(first.status().is_success());
    let first: serde_json::Value = first.json().await.unwrap();

    let second = app
        .post_json("/payment/order/create", &token, &request_body)
        .await;
    assert!(second.status().is_success());
    let second: serde_json::Value = second.json().await.unwrap();

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["gatewayOrderId"], "order_test_1");
    assert_eq!(order_count(&app).await, 1);
}

#[actix_web::test]
async fn another_account_reusing_a_key_gets_its_own_order() {
    let app = spawn_app().await;
    let first_donor = app.register_and_login("donor").await;
    let second_donor = app.register_and_login("donor").await;
    let idempotency_key = Uuid::new_v4();

    mount_order_mock(&app.gateway_server, "order_acct_a").await;
    mount_order_mock(&app.gateway_server, "order_acct_b").await;

    let request_body = serde_json::json!({
        "amount": 500,
        "idempotencyKey": idempotency_key,
    });
    let first = app
        .post_json("/payment/order/create", &first_donor, &request_body)
        .await;
    assert!(first.status().is_success());
    let first: serde_json::Value = first.json().await.unwrap();
    assert_eq!(first["data"]["gatewayOrderId"], "order_acct_a");

    // Idempotency keys dedupe per account; a stranger reusing the value
    // opens their own order instead of colliding with the first donor's.
    let second = app
        .post_json("/payment/order/create", &second_donor, &request_body)
        .await;
    assert!(second.status().is_success());
    let second: serde_json::Value = second.json().await.unwrap();
    assert_eq!(second["data"]["gatewayOrderId"], "order_acct_b");

    assert_eq!(order_count(&app).await, 2);
}

#[actix_web::test]
async fn refunded_checkout_marks_the_order_failed() {
    let app = spawn_app().await;
    let token = app.register_and_login("donor").await;

    mount_order_mock(&app.gateway_server, "order_rfnd_1").await;
    Mock::given(method("GET"))
        .and(path("/orders/order_rfnd_1/payments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gateway_payment_body("order_rfnd_1", "refunded", false)),
        )
        .expect(1)
        .mount(&app.gateway_server)
        .await;

    let response = app
        .post_json(
            "/payment/order/create",
            &token,
            &serde_json::json!({
                "amount": 500,
                "idempotencyKey": Uuid::new_v4(),
            }),
        )
        .await;
    assert!(response.status().is_success());

    let response = app
        .post_json(
            "/payment/confirm",
            &token,
            &serde_json::json!({ "orderId": "order_rfnd_1" }),
        )
        .await;
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["paymentStatus"], "refunded");
    assert_eq!(body["data"]["newlySettled"], false);
    assert_eq!(body["data"]["order"]["status"], "failed");

    let status: String =
        sqlx::query_scalar("SELECT status::text FROM payment_order WHERE gateway_order_id = $1")
            .bind("order_rfnd_1")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(status, "failed");
}
