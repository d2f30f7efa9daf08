use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use driver::database::{MongoBookRepository, MongoDatabase};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

use crate::status::{push_flash, StatusMessage};
use crate::view::Views;

pub const DATABASE_UNAVAILABLE: &str = "Error: No hay conexión a la base de datos";

/// Router state. `handler` is absent when the store could not be reached at
/// startup; the service then answers every request with an error.
#[derive(Clone)]
pub struct AppModule {
    handler: Option<Arc<Handler>>,
    views: Arc<Views>,
    key: Key,
}

impl AppModule {
    pub async fn new(key: Key) -> error_stack::Result<Self, KernelError> {
        let handler = match Handler::init().await {
            Ok(handler) => Some(handler),
            Err(report) => {
                tracing::error!("Database unavailable, serving errors only: {report:?}");
                None
            }
        };
        Self::with_handler(handler, key)
    }

    pub fn with_handler(
        handler: Option<Handler>,
        key: Key,
    ) -> error_stack::Result<Self, KernelError> {
        Ok(Self {
            handler: handler.map(Arc::new),
            views: Arc::new(Views::new()?),
            key,
        })
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_deref()
    }

    pub fn views(&self) -> &Views {
        &self.views
    }
}

impl FromRef<AppModule> for Key {
    fn from_ref(module: &AppModule) -> Self {
        module.key.clone()
    }
}

pub struct Handler {
    mongo: MongoDatabase,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let mongo = MongoDatabase::new().await?;

        Ok(Self { mongo })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = MongoDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.mongo
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = MongoBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MongoBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = MongoBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MongoBookRepository
    }
}

/// Extracts the store handler. When the service is degraded the request is
/// answered with a flashed error and a redirect to the list view.
pub struct Connected(pub Arc<Handler>);

#[axum::async_trait]
impl FromRequestParts<AppModule> for Connected {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        if let Some(handler) = &module.handler {
            return Ok(Connected(Arc::clone(handler)));
        }
        tracing::warn!("Rejecting {} {}: database unavailable", parts.method, parts.uri);
        let jar = SignedCookieJar::from_headers(&parts.headers, module.key.clone());
        let jar = push_flash(jar, StatusMessage::error(DATABASE_UNAVAILABLE));
        Err((jar, Redirect::to("/")).into_response())
    }
}
