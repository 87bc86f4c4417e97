//! End-to-end tests of the REST router over the in-memory store.

use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use clinic_core::{Clinic, ClinicConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const API_KEY: &str = "test-secret";

fn app() -> Router {
    let config = ClinicConfig::new(
        "127.0.0.1:0".into(),
        API_KEY.into(),
        "x-api-key".into(),
        None,
        1,
    )
    .expect("test config");
    router(AppState::new(Clinic::in_memory(), config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request")
}

fn authed(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", API_KEY);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request")
}

async fn create_dentist(app: &Router, license: &str) -> Value {
    let (status, body) = send(
        app,
        authed(
            "POST",
            "/api/v1/odontologos",
            Some(json!({"apellido": "Pérez", "nombre": "Ana", "matricula": license})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create dentist: {body}");
    body
}

async fn create_patient(app: &Router, dni: &str) -> Value {
    let (status, body) = send(
        app,
        authed(
            "POST",
            "/api/v1/pacientes",
            Some(json!({
                "nombre": "Luis",
                "apellido": "Gómez",
                "domicilio": "Calle 1",
                "dni": dni,
                "fecha_alta": "2023-01-10"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create patient: {body}");
    body
}

async fn book_by_natural_keys(app: &Router, license: &str, dni: &str) -> (StatusCode, Value) {
    send(
        app,
        authed(
            "POST",
            "/api/v1/turnos/dni",
            Some(json!({
                "matricula_odontologo": license,
                "dni_paciente": dni,
                "fecha_hora": "2024-05-01T09:30:00Z",
                "descripcion": "control"
            })),
        ),
    )
    .await
}

#[tokio::test]
async fn test_health_is_open() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_mutation_without_api_key_is_forbidden() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/odontologos")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"apellido": "Pérez", "nombre": "Ana", "matricula": "MP-1"}).to_string(),
        ))
        .expect("build request");

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
    assert_eq!(body["code"], "FORBIDDEN");

    let (_, listed) = send(&app, get("/api/v1/odontologos")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_wrong_api_key_is_forbidden() {
    let app = app();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/turnos/1")
        .header("x-api-key", "not-the-key")
        .body(Body::empty())
        .expect("build request");

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dentist_crud_round() {
    let app = app();
    let created = create_dentist(&app, "MP-1").await;
    let id = created["id"].as_i64().expect("numeric id");
    assert!(id >= 1);

    let (status, fetched) = send(&app, get(&format!("/api/v1/odontologos/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, patched) = send(
        &app,
        authed("PATCH", &format!("/api/v1/odontologos/{id}?matricula=MP-9"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["matricula"], "MP-9");
    assert_eq!(patched["apellido"], "Pérez");

    let (status, replaced) = send(
        &app,
        authed(
            "PUT",
            &format!("/api/v1/odontologos/{id}"),
            Some(json!({"apellido": "Ruiz", "nombre": "Eva", "matricula": "MP-10"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["nombre"], "Eva");

    let (status, report) = send(
        &app,
        authed("DELETE", &format!("/api/v1/odontologos/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["removed_appointments"], json!([]));

    let (status, body) = send(&app, get(&format!("/api/v1/odontologos/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, get("/api/v1/pacientes/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_missing_required_fields_are_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        authed(
            "POST",
            "/api/v1/odontologos",
            Some(json!({"apellido": "Pérez", "nombre": "Ana", "matricula": ""})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .expect("message text")
        .contains("matricula"));
}

#[tokio::test]
async fn test_patient_patch_admission_date() {
    let app = app();
    let created = create_patient(&app, "30111222").await;
    let id = created["id"].as_i64().expect("numeric id");

    let (status, patched) = send(
        &app,
        authed(
            "PATCH",
            &format!("/api/v1/pacientes/{id}?fecha_alta=2024-03-15"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["fecha_alta"], "2024-03-15");
    assert_eq!(patched["nombre"], created["nombre"]);
    assert_eq!(patched["domicilio"], created["domicilio"]);

    let (status, _) = send(
        &app,
        authed(
            "PATCH",
            &format!("/api/v1/pacientes/{id}?fecha_alta=not-a-date"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, get(&format!("/api/v1/pacientes/{id}"))).await;
    assert_eq!(stored, patched);
}

#[tokio::test]
async fn test_booking_by_natural_keys() {
    let app = app();
    let dentist = create_dentist(&app, "MP-1").await;
    let patient = create_patient(&app, "30111222").await;

    let (status, booked) = book_by_natural_keys(&app, "MP-1", "30111222").await;
    assert_eq!(status, StatusCode::CREATED, "{booked}");
    assert_eq!(booked["id_odontologo"], dentist["id"]);
    assert_eq!(booked["id_paciente"], patient["id"]);

    let (status, found) = send(&app, get("/api/v1/turnos/dni/30111222")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([booked]));

    let (status, body) = book_by_natural_keys(&app, "BAD-LICENSE", "30111222").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .expect("message text")
        .contains("dentist"));

    let (_, all) = send(&app, get("/api/v1/turnos")).await;
    assert_eq!(all.as_array().expect("list").len(), 1);
}

#[tokio::test]
async fn test_lookup_by_national_id_without_appointments() {
    let app = app();
    create_patient(&app, "30111222").await;

    let (status, body) = send(&app, get("/api/v1/turnos/dni/30111222")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPTY_LIST");

    let (status, body) = send(&app, get("/api/v1/turnos/dni/99999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_deleting_patient_removes_its_appointments() {
    let app = app();
    create_dentist(&app, "MP-1").await;
    let patient = create_patient(&app, "30111222").await;
    let (_, booked) = book_by_natural_keys(&app, "MP-1", "30111222").await;

    let (status, report) = send(
        &app,
        authed(
            "DELETE",
            &format!("/api/v1/pacientes/{}", patient["id"]),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["removed_appointments"], json!([booked["id"]]));
    assert_eq!(report["failed_appointments"], json!([]));

    let (_, all) = send(&app, get("/api/v1/turnos")).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_appointment_delete_and_patch() {
    let app = app();
    create_dentist(&app, "MP-1").await;
    create_patient(&app, "30111222").await;
    let (_, booked) = book_by_natural_keys(&app, "MP-1", "30111222").await;
    let id = booked["id"].as_i64().expect("numeric id");

    let (status, patched) = send(
        &app,
        authed(
            "PATCH",
            &format!("/api/v1/turnos/{id}?fecha_hora=2024-06-02%2015:00"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["fecha_hora"], "2024-06-02T15:00:00Z");
    assert_eq!(patched["descripcion"], "control");

    let (status, body) = send(&app, authed("DELETE", &format!("/api/v1/turnos/{id}"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, authed("DELETE", &format!("/api/v1/turnos/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_use_the_error_table() {
    let app = app();

    let (status, body) = send(
        &app,
        authed("POST", "/api/v1/odontologos", Some(json!({"apellido": 5}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
    assert_eq!(body["status"], 400);

    let untyped = Request::builder()
        .method("POST")
        .uri("/api/v1/pacientes")
        .header("x-api-key", API_KEY)
        .body(Body::from(r#"{"nombre":"Luis"}"#))
        .expect("build request");
    let (status, body) = send(&app, untyped).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    let truncated = Request::builder()
        .method("POST")
        .uri("/api/v1/turnos")
        .header("x-api-key", API_KEY)
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id_odontologo":1,"#))
        .expect("build request");
    let (status, body) = send(&app, truncated).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_malformed_query_uses_the_error_table() {
    let app = app();
    let created = create_dentist(&app, "MP-1").await;
    let id = created["id"].as_i64().expect("numeric id");

    let (status, body) = send(
        &app,
        authed(
            "PATCH",
            &format!("/api/v1/odontologos/{id}?apellido=a&apellido=b"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_booking_accepts_short_date_time_layout() {
    let app = app();
    let dentist = create_dentist(&app, "MP-1").await;
    let patient = create_patient(&app, "30111222").await;

    let (status, booked) = send(
        &app,
        authed(
            "POST",
            "/api/v1/turnos",
            Some(json!({
                "id_odontologo": dentist["id"],
                "id_paciente": patient["id"],
                "fecha_hora": "2024-05-01 09:30"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create appointment: {booked}");
    assert_eq!(booked["fecha_hora"], "2024-05-01T09:30:00Z");

    let (status, body) = send(
        &app,
        authed(
            "POST",
            "/api/v1/turnos",
            Some(json!({
                "id_odontologo": dentist["id"],
                "id_paciente": patient["id"],
                "fecha_hora": "tomorrow"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
}
