use actix_web::HttpResponse;
use serde::Serialize;

use crate::types::form::Envelope;

#[derive(Debug, Serialize)]
struct Greeting {
  data: &'static str,
}

pub async fn index() -> HttpResponse {
  HttpResponse::Ok().json(Envelope::ok("Service is up", Greeting { data: "Hello World" }))
}
