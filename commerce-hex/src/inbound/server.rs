//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use commerce_types::{PaymentRepository, UserRepository};

use super::handlers::{self, payment, user};
use crate::{PaymentService, UserService};

/// HTTP server exposing the payment and user services side by side.
pub struct HttpServer<P: PaymentRepository, U: UserRepository> {
    payments: Arc<PaymentService<P>>,
    users: Arc<UserService<U>>,
}

impl<P: PaymentRepository, U: UserRepository> HttpServer<P, U> {
    /// Creates a new HTTP server with the given services.
    pub fn new(payments: PaymentService<P>, users: UserService<U>) -> Self {
        Self {
            payments: Arc::new(payments),
            users: Arc::new(users),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let payment_routes = Router::new()
            .route(
                "/payment-service/api/payments",
                get(payment::find_all::<P>)
                    .post(payment::save::<P>)
                    .put(payment::update::<P>),
            )
            .route(
                "/payment-service/api/payments/{payment_id}",
                get(payment::find_by_id::<P>)
                    .put(payment::update_by_id::<P>)
                    .delete(payment::delete_by_id::<P>),
            )
            .with_state(self.payments.clone());

        let user_routes = Router::new()
            .route(
                "/user-service/api/users",
                get(user::find_all::<U>)
                    .post(user::save::<U>)
                    .put(user::update::<U>),
            )
            .route(
                "/user-service/api/users/{user_id}",
                get(user::find_by_id::<U>)
                    .put(user::update_by_id::<U>)
                    .delete(user::delete_by_id::<U>),
            )
            .route(
                "/user-service/api/users/username/{username}",
                get(user::find_by_username::<U>),
            )
            .with_state(self.users.clone());

        Router::new()
            .route("/health", get(handlers::health))
            .merge(payment_routes)
            .merge(user_routes)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
