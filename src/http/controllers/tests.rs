use actix_web::{
  http::{header, StatusCode},
  test::{self, TestRequest},
};
use assert_json_diff::assert_json_include;
use serde_json::{json, Value};

use crate::{
  auth::LoginClaims, http::http_app, test_utils, types::id::UserId, util::Sensitive, App,
};

async fn call(app: &App, req: TestRequest) -> (StatusCode, Value) {
  let service = test::init_service(http_app!(app.clone())).await;
  let res = test::call_service(&service, req.to_request()).await;
  let status = res.status();
  let body: Value = test::read_body_json(res).await;
  (status, body)
}

async fn create_account(app: &App, email: &str) -> (UserId, String) {
  let (status, body) = call(
    app,
    TestRequest::post()
      .uri("/create-account")
      .set_json(json!({ "fullName": "A", "email": email, "password": "p" })),
  )
  .await;

  assert_eq!(status, StatusCode::OK, "{body}");
  let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
  let token = body["accessToken"].as_str().unwrap().to_string();
  (id, token)
}

fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn index_says_hello() {
  let app = test_utils::build_test_app();
  let (status, body) = call(&app, TestRequest::get().uri("/")).await;
  assert_eq!(status, StatusCode::OK);
  assert_json_include!(actual: body, expected: json!({ "error": false, "data": "Hello World" }));
}

#[actix_web::test]
async fn unknown_routes_are_not_found() {
  let app = test_utils::build_test_app();
  let (status, body) = call(&app, TestRequest::get().uri("/nope")).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_json_include!(actual: body, expected: json!({ "error": true, "type": "not_found" }));
}

#[actix_web::test]
async fn register_then_conflict() {
  let app = test_utils::build_test_app();
  let (_, token) = create_account(&app, "a@x.com").await;
  assert!(!token.is_empty());

  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/create-account")
      .set_json(json!({ "fullName": "A", "email": "a@x.com", "password": "p" })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_json_include!(
    actual: body,
    expected: json!({ "error": true, "type": "email_taken", "message": "User already exists" })
  );
}

#[actix_web::test]
async fn passwords_are_never_returned() {
  let app = test_utils::build_test_app();
  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/create-account")
      .set_json(json!({ "fullName": "A", "email": "a@x.com", "password": "hunter2" })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert!(body["user"].get("passwordHash").is_none());
  assert!(!body.to_string().contains("hunter2"));
}

#[actix_web::test]
async fn register_requires_fields() {
  let app = test_utils::build_test_app();
  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/create-account")
      .set_json(json!({ "email": "a@x.com" })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_json_include!(
    actual: body,
    expected: json!({
      "type": "invalid_form_body",
      "fields": {
        "fullName": { "_errors": ["This field is required"] },
        "password": { "_errors": ["This field is required"] },
      },
    })
  );
  assert!(body["fields"].get("email").is_none());
}

#[actix_web::test]
async fn malformed_json_is_a_form_error() {
  let app = test_utils::build_test_app();
  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/login")
      .insert_header((header::CONTENT_TYPE, "application/json"))
      .set_payload("{not json"),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "invalid_form_body");
}

#[actix_web::test]
async fn login_flow() {
  let app = test_utils::build_test_app();
  let (id, _) = create_account(&app, "a@x.com").await;

  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/login")
      .set_json(json!({ "email": "a@x.com", "password": "p" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["id"], id.to_string());

  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/login")
      .set_json(json!({ "email": "a@x.com", "password": "nope" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "invalid_credentials");

  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/login")
      .set_json(json!({ "email": "b@x.com", "password": "p" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "user_not_found");
}

#[actix_web::test]
async fn get_user_requires_token() {
  let app = test_utils::build_test_app();
  let (id, token) = create_account(&app, "a@x.com").await;

  let (status, body) = call(&app, TestRequest::get().uri("/get-user")).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["type"], "unauthorized");

  let (status, body) = call(
    &app,
    TestRequest::get().uri("/get-user").insert_header(bearer(&token)),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_json_include!(
    actual: body,
    expected: json!({ "error": false, "user": { "id": id.to_string(), "email": "a@x.com" } })
  );
}

#[actix_web::test]
async fn rejects_foreign_and_expired_tokens() {
  let app = test_utils::build_test_app();
  let (id, _) = create_account(&app, "a@x.com").await;

  let other = test_utils::build_test_app_with_secret("a completely different secret");
  let user = app.store().find_user(id).await.unwrap().unwrap();
  let foreign = LoginClaims::generate(&other, &user).encode(&other).unwrap();

  let mut expired = LoginClaims::generate(&app, &user);
  expired.iat -= 7200;
  expired.exp -= 7200;
  let expired = expired.encode(&app).unwrap();

  for (token, kind) in [(foreign, "unauthorized"), (expired, "expired_token")] {
    for req in [
      TestRequest::get().uri("/get-user"),
      TestRequest::get().uri("/get-all-notes"),
      TestRequest::post()
        .uri("/add-note")
        .set_json(json!({ "title": "T", "content": "C" })),
      TestRequest::put()
        .uri("/edit-note/1")
        .set_json(json!({ "title": "T" })),
      TestRequest::delete().uri("/delete-note/1"),
    ] {
      let (status, body) = call(&app, req.insert_header(bearer(&token))).await;
      assert_eq!(status, StatusCode::UNAUTHORIZED);
      assert_eq!(body["type"], kind);
    }
  }
}

#[actix_web::test]
async fn tokens_expired_moments_ago_are_rejected() {
  let app = test_utils::build_test_app();
  let (id, token) = create_account(&app, "a@x.com").await;

  let (status, _) = call(
    &app,
    TestRequest::get().uri("/get-user").insert_header(bearer(&token)),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let now = chrono::Utc::now().timestamp();
  let claims = LoginClaims {
    iat: now - 60,
    exp: now - 5,
    iss: "jotter.api.login".into(),
    sub: id,
  };
  let expired = claims.encode(&app).unwrap();

  let (status, body) = call(
    &app,
    TestRequest::get().uri("/get-user").insert_header(bearer(&expired)),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_json_include!(
    actual: body,
    expected: json!({ "error": true, "type": "expired_token" })
  );
}

#[actix_web::test]
async fn note_lifecycle() {
  let app = test_utils::build_test_app();
  let (id, token) = create_account(&app, "a@x.com").await;

  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/add-note")
      .insert_header(bearer(&token))
      .set_json(json!({ "title": "T", "content": "C" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_json_include!(
    actual: body.clone(),
    expected: json!({
      "error": false,
      "note": { "title": "T", "content": "C", "tags": [], "isPinned": false, "ownerId": id.to_string() },
    })
  );
  let note = body["note"].clone();
  let note_id = note["id"].as_str().unwrap().to_string();

  let (status, body) = call(
    &app,
    TestRequest::get().uri("/get-all-notes").insert_header(bearer(&token)),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["notes"], json!([note]));

  let (status, body) = call(
    &app,
    TestRequest::put()
      .uri(&format!("/edit-note/{note_id}"))
      .insert_header(bearer(&token))
      .set_json(json!({ "isPinned": true, "tags": ["work", " work "] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_json_include!(
    actual: body,
    expected: json!({ "note": { "title": "T", "content": "C", "tags": ["work"], "isPinned": true } })
  );

  let (status, body) = call(
    &app,
    TestRequest::put()
      .uri(&format!("/edit-note/{note_id}"))
      .insert_header(bearer(&token))
      .set_json(json!({})),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "invalid_form_body");

  let (status, _) = call(
    &app,
    TestRequest::delete()
      .uri(&format!("/delete-note/{note_id}"))
      .insert_header(bearer(&token)),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, body) = call(
    &app,
    TestRequest::get().uri("/get-all-notes").insert_header(bearer(&token)),
  )
  .await;
  assert_eq!(body["notes"], json!([]));
}

#[actix_web::test]
async fn oversized_tag_lists_are_rejected() {
  let app = test_utils::build_test_app();
  let (id, token) = create_account(&app, "a@x.com").await;

  let tags = (0..100_000).map(|i| format!("tag-{i}")).collect::<Vec<_>>();
  let (status, body) = call(
    &app,
    TestRequest::post()
      .uri("/add-note")
      .insert_header(bearer(&token))
      .set_json(json!({ "title": "T", "content": "C", "tags": tags })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "invalid_form_body");
  assert!(body["fields"].get("tags").is_some());

  let note = app
    .store()
    .insert_note(id, "T", "C", &[], false)
    .await
    .unwrap();

  let (status, body) = call(
    &app,
    TestRequest::put()
      .uri(&format!("/edit-note/{}", note.id))
      .insert_header(bearer(&token))
      .set_json(json!({ "tags": tags })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["fields"].get("tags").is_some());
  assert!(app.store().list_notes(id).await.unwrap()[0].tags.is_empty());
}

#[actix_web::test]
async fn notes_are_private() {
  let app = test_utils::build_test_app();
  let (_, alice) = create_account(&app, "alice@x.com").await;
  let (_, bob) = create_account(&app, "bob@x.com").await;

  let (_, body) = call(
    &app,
    TestRequest::post()
      .uri("/add-note")
      .insert_header(bearer(&alice))
      .set_json(json!({ "title": "T", "content": "C" })),
  )
  .await;
  let note_id = body["note"]["id"].as_str().unwrap().to_string();

  let (_, body) = call(
    &app,
    TestRequest::get().uri("/get-all-notes").insert_header(bearer(&bob)),
  )
  .await;
  assert_eq!(body["notes"], json!([]));

  let (status, body) = call(
    &app,
    TestRequest::put()
      .uri(&format!("/edit-note/{note_id}"))
      .insert_header(bearer(&bob))
      .set_json(json!({ "title": "Mine" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "note_not_found");

  let (status, body) = call(
    &app,
    TestRequest::delete()
      .uri(&format!("/delete-note/{note_id}"))
      .insert_header(bearer(&bob)),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["type"], "note_not_found");

  let (_, body) = call(
    &app,
    TestRequest::get().uri("/get-all-notes").insert_header(bearer(&alice)),
  )
  .await;
  assert_eq!(body["notes"][0]["title"], "T");
}

#[actix_web::test]
async fn deleting_missing_notes() {
  let app = test_utils::build_test_app();
  let (id, token) = create_account(&app, "a@x.com").await;
  app
    .store()
    .insert_note(id, "T", "C", &[], false)
    .await
    .unwrap();

  for uri in ["/delete-note/999", "/delete-note/not-an-id"] {
    let (status, body) = call(
      &app,
      TestRequest::delete().uri(uri).insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_include!(
      actual: body,
      expected: json!({ "error": true, "type": "note_not_found", "message": "Note does not exist" })
    );
  }

  assert_eq!(app.store().list_notes(id).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn tokens_of_deleted_users_are_rejected() {
  let app = test_utils::build_test_app();
  let ghost = LoginClaims {
    iat: chrono::Utc::now().timestamp(),
    exp: chrono::Utc::now().timestamp() + 60,
    iss: "jotter.api.login".into(),
    sub: UserId::new(42),
  };
  let token = Sensitive::new(ghost.encode(&app).unwrap());

  let (status, body) = call(
    &app,
    TestRequest::get()
      .uri("/get-user")
      .insert_header(bearer(token.as_str())),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["type"], "unauthorized");
}
