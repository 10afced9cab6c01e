use std::net::TcpListener;
use std::sync::Arc;

use actix::Actor;
use actix_cors::Cors;
use actix_web::dev::Server as ActixServer;
use actix_web::{web, App, HttpServer};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::configuration::{EmailClientConfig, SecretConfig, Settings};
use crate::database::get_connection_pool;
use crate::email_client::{DummyEmailClient, GenericEmailService, SmtpEmailClient};
use crate::openapi::ApiDoc;
use crate::payment_client::PaymentClient;
use crate::routes::main_route;
use crate::websocket;

pub struct Application {
    port: u16,
    server: ActixServer,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let payment_client = PaymentClient::new(&configuration.payment)?;
        let email_client = create_email_client(&configuration.email);
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        tracing::info!("Listening on {}", address);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            connection_pool,
            payment_client,
            email_client,
            configuration.secret,
            configuration.application.workers,
        )
        .await?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Falls back to a no-op mailer when SMTP credentials are left blank, so
/// local runs and tests never need a mail server.
fn create_email_client(config: &EmailClientConfig) -> Arc<dyn GenericEmailService> {
    if config.username.is_empty() || config.password.expose_secret().is_empty() {
        return Arc::new(DummyEmailClient::new());
    }
    match SmtpEmailClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("SMTP client setup failed, discarding mail: {}", e);
            Arc::new(DummyEmailClient::new())
        }
    }
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    payment_client: PaymentClient,
    email_client: Arc<dyn GenericEmailService>,
    secret: SecretConfig,
    workers: usize,
) -> Result<ActixServer, anyhow::Error> {
    let db_pool = web::Data::new(db_pool);
    let payment_client = web::Data::new(payment_client);
    let email_client = web::Data::new(email_client);
    let secret_obj = web::Data::new(secret);
    let websocket_srv = web::Data::new(websocket::Server::new().start());
    let openapi = ApiDoc::openapi();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(db_pool.clone())
            .app_data(payment_client.clone())
            .app_data(email_client.clone())
            .app_data(secret_obj.clone())
            .app_data(websocket_srv.clone())
            .service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(main_route)
    })
    .workers(workers)
    .listen(listener)?
    .run();

    Ok(server)
}
