use crate::helpers::{spawn_app, TestApp};
use uuid::Uuid;

struct DonationFixture {
    donor_token: String,
    ngo_token: String,
    donation_id: Uuid,
}

/// Registers a donor and an NGO account and records one pending item
/// donation from the donor to the NGO.
async fn pending_donation(app: &TestApp) -> DonationFixture {
    let donor_token = app.register_and_login("donor").await;
    let ngo_token = app.register_and_login("ngo").await;
    let ngo_id = app.register_ngo(&ngo_token).await;

    let response = app
        .post_json(
            "/donation/create",
            &donor_token,
            &serde_json::json!({
                "ngoId": ngo_id,
                "kind": "item",
                "category": "winter clothes",
            }),
        )
        .await;
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["version"], 1);

    DonationFixture {
        donor_token,
        ngo_token,
        donation_id: body["data"]["id"].as_str().unwrap().parse().unwrap(),
    }
}

#[actix_web::test]
async fn accepting_a_donation_removes_it_from_the_pending_list() {
    let app = spawn_app().await;
    let fixture = pending_donation(&app).await;

    let response = app
        .get_json("/donation/list?status=pending", &fixture.ngo_token)
        .await;
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .post_json(
            "/donation/status/update",
            &fixture.ngo_token,
            &serde_json::json!({
                "donationId": fixture.donation_id,
                "action": "accept",
                "version": 1,
            }),
        )
        .await;
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["status"], "accepted");
    assert_eq!(body["data"]["version"], 2);

    let response = app
        .get_json("/donation/list?status=pending", &fixture.ngo_token)
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = app
        .get_json("/donation/list?status=accepted", &fixture.ngo_token)
        .await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn rapid_conflicting_actions_store_exactly_one_outcome() {
    let app = spawn_app().await;
    let fixture = pending_donation(&app).await;

    // Both callers read version 1; the versioned update lets exactly one
    // through, whichever order they land in.
    let accept_body = serde_json::json!({
        "donationId": fixture.donation_id,
        "action": "accept",
        "version": 1,
    });
    let reject_body = serde_json::json!({
        "donationId": fixture.donation_id,
        "action": "reject",
        "version": 1,
    });
    let accept = app.post_json("/donation/status/update", &fixture.ngo_token, &accept_body);
    let reject = app.post_json("/donation/status/update", &fixture.ngo_token, &reject_body);
    let (accept_response, reject_response) = tokio::join!(accept, reject);

    let statuses = [accept_response.status(), reject_response.status()];
    let winners = statuses.iter().filter(|s| s.is_success()).count();
    assert_eq!(winners, 1, "exactly one caller must win, got {:?}", statuses);
    let loser = statuses.iter().find(|s| !s.is_success()).unwrap();
    assert!(
        loser.as_u16() == 400 || loser.as_u16() == 409,
        "loser must be rejected as invalid or concurrent, got {}",
        loser
    );

    let (status, version): (String, i32) =
        sqlx::query_as("SELECT status::text, version FROM donation WHERE id = $1")
            .bind(fixture.donation_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_ne!(status, "pending");
    assert_eq!(version, 2);
}

#[actix_web::test]
async fn stale_version_is_rejected_after_an_accept() {
    let app = spawn_app().await;
    let fixture = pending_donation(&app).await;

    let response = app
        .post_json(
            "/donation/status/update",
            &fixture.ngo_token,
            &serde_json::json!({
                "donationId": fixture.donation_id,
                "action": "accept",
                "version": 1,
            }),
        )
        .await;
    assert!(response.status().is_success());

    // A second actor still holding version 1 must not overwrite the accept.
    let response = app
        .post_json(
            "/donation/status/update",
            &fixture.ngo_token,
            &serde_json::json!({
                "donationId": fixture.donation_id,
                "action": "complete",
                "version": 1,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let donor_view = app
        .get_json("/donation/list?status=accepted", &fixture.donor_token)
        .await;
    let body: serde_json::Value = donor_view.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
