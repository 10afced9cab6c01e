use once_cell::sync::Lazy;
use seva_connect::configuration::get_configuration;
use seva_connect::database::configure_database;
use seva_connect::startup::Application;
use seva_connect::telemetry::{get_json_subscriber, init_subscriber};
use sqlx::PgPool;
use uuid::Uuid;
use wiremock::MockServer;

// The tracing stack is global; initialize it once for the whole test binary.
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            get_json_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_json_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub db_pool: PgPool,
    /// Stands in for the payment gateway; tests mount the responses they
    /// expect the application to fetch.
    pub gateway_server: MockServer,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let gateway_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Each test run gets its own database.
        c.database.name = Uuid::new_v4().to_string();
        c.application.port = 0;
        c.payment.base_url = gateway_server.uri();
        c
    };

    let db_pool = configure_database(&configuration.database).await;

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address,
        api_client,
        db_pool,
        gateway_server,
    }
}

impl TestApp {
    /// Registers a fresh account with the given role and returns its bearer
    /// token.
    pub async fn register_and_login(&self, role: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        let username = format!("user_{}", &suffix[..12]);
        let email = format!("{}@example.org", username);
        let password = "correct-horse-battery";

        let response = self
            .api_client
            .post(format!("{}/user/register", self.address))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "displayName": "Test User",
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute register request.");
        assert!(response.status().is_success(), "registration failed");

        let response = self
            .api_client
            .post(format!("{}/user/login", self.address))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request.");
        assert!(response.status().is_success(), "login failed");
        let body: serde_json::Value = response.json().await.unwrap();
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Creates an NGO profile for the account behind `token` and returns its
    /// id. The register endpoint returns no body, so the id is read back
    /// from the database.
    pub async fn register_ngo(&self, token: &str) -> Uuid {
        let suffix = Uuid::new_v4().simple().to_string();
        let registration_no = format!("REG-{}", &suffix[..8]);
        let response = self
            .api_client
            .post(format!("{}/ngo/register", self.address))
            .bearer_auth(token)
            .json(&serde_json::json!({
                "displayName": "Helping Hands",
                "registrationNo": registration_no,
            }))
            .send()
            .await
            .expect("Failed to execute NGO register request.");
        assert!(response.status().is_success(), "NGO registration failed");
        sqlx::query_scalar("SELECT id FROM ngo WHERE registration_no = $1")
            .bind(&registration_no)
            .fetch_one(&self.db_pool)
            .await
            .expect("NGO profile was not persisted")
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_json(&self, path: &str, token: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
