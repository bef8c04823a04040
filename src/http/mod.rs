use actix_web::HttpServer;
use error_stack::{Result, ResultExt};
use thiserror::Error;

use crate::App;

pub mod controllers;
pub mod extract;

pub use extract::SessionUser;

#[derive(Debug, Error)]
#[error("Failed to run the HTTP server")]
pub struct ServeError;

/// Builds every route with its middleware and shared state. Used by
/// [`serve`] and by the tests.
macro_rules! http_app {
  ($app:expr) => {
    ::actix_web::App::new()
      .app_data(::actix_web::web::Data::new($app))
      .app_data($crate::http::extract::json_config())
      .wrap(
        ::actix_cors::Cors::default()
          .allow_any_origin()
          .allow_any_method()
          .allow_any_header()
          .max_age(3600),
      )
      .wrap(::tracing_actix_web::TracingLogger::default())
      .configure($crate::http::controllers::configure)
  };
}
pub(crate) use http_app;

/// Serves the API until the process receives a shutdown signal.
#[tracing::instrument(skip_all)]
pub async fn serve(app: App) -> Result<(), ServeError> {
  let address = (app.config.ip, app.config.port);
  let workers = app.config.workers;
  tracing::info!("listening on {}:{}", address.0, address.1);

  HttpServer::new(move || http_app!(app.clone()))
    .workers(workers)
    .bind(address)
    .change_context(ServeError)
    .attach_printable_lazy(|| format!("could not bind to {}:{}", address.0, address.1))?
    .run()
    .await
    .change_context(ServeError)
}
