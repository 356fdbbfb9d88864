//! In-process tests of the books API over the in-memory store

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{
    api,
    config::{AppConfig, StoreBackend},
    models::{Role, UserAccount},
    repository::{seed, Repository},
    services::auth::BasicCredentials,
    AppState,
};

const BOOKS_URL: &str = "/api/books/";
const NEW_BOOK_TITLE: &str = "NewBook Title";
const NEW_BOOK_DESCRIPTION: &str = "NewBook description";

struct TestApp {
    router: Router,
    state: AppState,
}

#[derive(Clone, Copy)]
enum As {
    Anonymous,
    User,
    Admin,
    WrongPassword,
}

fn test_app() -> TestApp {
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::Memory;
    config.store.seed = true;
    config.auth.users = vec![
        UserAccount {
            username: "user".into(),
            password: "pass".into(),
            roles: vec![Role::User],
        },
        UserAccount {
            username: "admin".into(),
            password: "pass".into(),
            roles: vec![Role::User, Role::Admin],
        },
    ];

    let repository = Repository::in_memory(config.store.seed);
    let state = AppState::new(config, repository).expect("Failed to build state");
    TestApp {
        router: api::router(state.clone()),
        state,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, who: As, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let credentials = match who {
            As::Anonymous => None,
            As::User => Some(("user", "pass")),
            As::Admin => Some(("admin", "pass")),
            As::WrongPassword => Some(("admin", "wrong")),
        };
        if let Some((username, password)) = credentials {
            let value = BasicCredentials {
                username: username.into(),
                password: password.into(),
            }
            .to_header_value();
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    async fn get_books(&self, who: As) -> Vec<Value> {
        let response = self.send(Method::GET, BOOKS_URL, who, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await.as_array().cloned().expect("Expected an array")
    }

    async fn create_book(&self, who: As) -> Response {
        self.send(
            Method::POST,
            BOOKS_URL,
            who,
            Some(json!({"title": NEW_BOOK_TITLE, "description": NEW_BOOK_DESCRIPTION})),
        )
        .await
    }

    async fn delete_book(&self, id: i64, who: As) -> Response {
        self.send(Method::DELETE, &format!("{}{}", BOOKS_URL, id), who, None)
            .await
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

// =========================================================================
// GET
// =========================================================================

#[tokio::test]
async fn test_list_books_without_credentials_returns_reference_catalog() {
    let app = test_app();

    let books = app.get_books(As::Anonymous).await;

    let expected = seed::reference_catalog();
    assert_eq!(books.len(), expected.len());
    for (index, (book, reference)) in books.iter().zip(expected.iter()).enumerate() {
        assert_eq!(book["id"], json!(index as i64 + 1));
        assert_eq!(book["title"], json!(reference.title));
        assert_eq!(book["description"], json!(reference.description));
    }
    assert_eq!(books[0]["title"], "SUEÑOS DE ACERO Y NEON");
    assert_eq!(books[4]["title"], "LA LEGIÓN PERDIDA");
}

#[tokio::test]
async fn test_list_books_with_any_credentials() {
    let app = test_app();

    for who in [As::User, As::Admin, As::WrongPassword] {
        assert_eq!(app.get_books(who).await.len(), 5);
    }
}

#[tokio::test]
async fn test_list_books_without_trailing_slash() {
    let app = test_app();

    let response = app.send(Method::GET, "/api/books", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_single_book() {
    let app = test_app();

    let response = app.send(Method::GET, "/api/books/2", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], seed::LA_VIDA_SECRETA_DE_LA_MENTE_TITLE);

    let response = app.send(Method::GET, "/api/books/99", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =========================================================================
// POST
// =========================================================================

#[tokio::test]
async fn test_create_book_without_credentials_is_unauthorized() {
    let app = test_app();

    let response = app.create_book(As::Anonymous).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

    let response = app
        .send(
            Method::POST,
            "/api/books",
            As::Anonymous,
            Some(json!({"title": NEW_BOOK_TITLE, "description": NEW_BOOK_DESCRIPTION})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Nothing was stored
    assert_eq!(app.get_books(As::Anonymous).await.len(), 5);
}

#[tokio::test]
async fn test_create_book_with_wrong_password_is_unauthorized() {
    let app = test_app();

    let response = app.create_book(As::WrongPassword).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_book_as_user() {
    let app = test_app();

    let response = app.create_book(As::User).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert!(body["id"].is_i64());
    assert_eq!(body["title"], NEW_BOOK_TITLE);
    assert_eq!(body["description"], NEW_BOOK_DESCRIPTION);

    let id = body["id"].as_i64().unwrap();
    assert!(app.state.services.books.exist(id).await.unwrap());
}

#[tokio::test]
async fn test_create_book_as_admin() {
    let app = test_app();

    let response = app.create_book(As::Admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_book_rejects_malformed_input() {
    let app = test_app();

    let response = app
        .send(Method::POST, BOOKS_URL, As::User, Some(json!({"description": "no title"})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].is_string());

    let response = app
        .send(
            Method::POST,
            BOOKS_URL,
            As::User,
            Some(json!({"title": "x".repeat(300), "description": ""})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.get_books(As::Anonymous).await.len(), 5);
}

// =========================================================================
// DELETE
// =========================================================================

#[tokio::test]
async fn test_delete_book_without_credentials_is_unauthorized() {
    let app = test_app();

    let response = app.delete_book(1, As::Anonymous).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.state.services.books.exist(1).await.unwrap());
}

#[tokio::test]
async fn test_delete_book_as_user_is_forbidden() {
    let app = test_app();

    let response = app.delete_book(1, As::User).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.state.services.books.exist(1).await.unwrap());
}

#[tokio::test]
async fn test_authorization_is_checked_before_existence() {
    let app = test_app();

    assert_eq!(
        app.delete_book(999, As::Anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.delete_book(999, As::User).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        app.delete_book(999, As::Admin).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_book_as_admin() {
    let app = test_app();

    let response = app.delete_book(3, As::Admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.state.services.books.exist(3).await.unwrap());
}

#[tokio::test]
async fn test_delete_twice_returns_not_found() {
    let app = test_app();

    assert_eq!(app.delete_book(2, As::Admin).await.status(), StatusCode::OK);
    assert_eq!(
        app.delete_book(2, As::Admin).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_create_then_delete_round_trip() {
    let app = test_app();

    let created = json_body(app.create_book(As::User).await).await;
    let id = created["id"].as_i64().expect("No book ID");

    let books = app.get_books(As::Anonymous).await;
    assert!(books.iter().any(|book| book["id"] == id
        && book["title"] == NEW_BOOK_TITLE
        && book["description"] == NEW_BOOK_DESCRIPTION));

    assert_eq!(app.delete_book(id, As::Admin).await.status(), StatusCode::OK);

    let books = app.get_books(As::Anonymous).await;
    assert!(books.iter().all(|book| book["id"] != id));
    assert_eq!(books.len(), 5);
}

#[tokio::test]
async fn test_unparseable_id_answers_with_json_error() {
    let app = test_app();

    let response = app.send(Method::DELETE, "/api/books/abc", As::Admin, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 6);
    assert_eq!(body["error"], "BadValue");

    let response = app.send(Method::GET, "/api/books/abc", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "BadValue");

    // Access rules still come first
    let response = app.send(Method::DELETE, "/api/books/abc", As::User, None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_books_gzip_when_accepted() {
    let app = test_app();

    let request = Request::builder()
        .uri(BOOKS_URL)
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );
}

// =========================================================================
// Health
// =========================================================================

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let app = test_app();

    let response = app.send(Method::GET, "/api/health", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");

    let response = app.send(Method::GET, "/api/ready", As::Anonymous, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ready");
}
