//! Интеграционные тесты API поверх роутера, без реального сокета
//! (tower::ServiceExt::oneshot).

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Local};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use unieventhub::config::{AppConfig, Config};
use unieventhub::middleware::{ADMIN_HEADER, ORGANIZER_HEADER, STUDENT_HEADER};
use unieventhub::models::{Admin, Organizer, Student, Venue};
use unieventhub::{controllers, AppState};

fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "off".to_string(),
            seed_demo_data: false,
        },
    }
}

struct TestApp {
    app: Router,
    state: Arc<AppState>,
    venue: Uuid,
    students: Vec<Uuid>,
    organizer: Uuid,
    admin: Uuid,
}

async fn spawn_app() -> TestApp {
    let state = AppState::new(test_config());

    let venue = Venue::new("Main Hall", 40);
    let venue_id = venue.id;
    let students: Vec<Student> = ["Aruzhan", "Dias", "Madina"]
        .into_iter()
        .map(|n| Student::new(n, format!("{}@univ.kz", n.to_lowercase())))
        .collect();
    let organizer = Organizer::new("Student Union", "union@univ.kz");
    let admin = Admin::new("Dean's office");
    let (organizer_id, admin_id) = (organizer.id, admin.id);
    let student_ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();

    {
        let mut db = state.store.write().await;
        db.venues.insert(venue_id, venue);
        for s in students {
            db.students.insert(s.id, s);
        }
        db.organizers.insert(organizer_id, organizer);
        db.admins.insert(admin_id, admin);
    }

    let app = Router::new()
        .nest("/api", controllers::routes())
        .with_state(state.clone());

    TestApp {
        app,
        state,
        venue: venue_id,
        students: student_ids,
        organizer: organizer_id,
        admin: admin_id,
    }
}

fn json_request(method: &str, uri: &str, identity: Option<(&str, Uuid)>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some((name, id)) = identity {
        builder = builder.header(name, id.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, identity: Option<(&str, Uuid)>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some((name, id)) = identity {
        builder = builder.header(name, id.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn registration_lifecycle_over_http() {
    let t = spawn_app().await;
    let event = t
        .state
        .catalog
        .create_event(
            t.organizer,
            "Rust workshop",
            "bring a laptop",
            Local::now().naive_local() + Duration::days(2),
            t.venue,
            2,
        )
        .await
        .unwrap();
    let (a, b, c) = (t.students[0], t.students[1], t.students[2]);
    let register_body = json!({ "event_id": event.id });

    // A и B занимают оба места
    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/registrations", Some((STUDENT_HEADER, a)), register_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["free_spots"], 1);

    // повторная регистрация — бизнес-конфликт
    let (status, _) = send(
        &t.app,
        json_request("POST", "/api/registrations", Some((STUDENT_HEADER, a)), register_body.clone()),
    )
    .await;
    assert_eq!(status.as_u16(), 419);

    let (status, body) = send(
        &t.app,
        json_request("POST", "/api/registrations", Some((STUDENT_HEADER, b)), register_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["free_spots"], 0);

    // мест нет
    let (status, _) = send(
        &t.app,
        json_request("POST", "/api/registrations", Some((STUDENT_HEADER, c)), register_body.clone()),
    )
    .await;
    assert_eq!(status.as_u16(), 419);

    // выдача каталога аннотируется для представившегося студента
    let (status, body) = send(&t.app, get_request("/api/events", Some((STUDENT_HEADER, a)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["registered"], true);
    assert_eq!(body[0]["registered_count"], 2);

    // без заголовка аннотации нет вовсе
    let (_, body) = send(&t.app, get_request("/api/events", None)).await;
    assert!(body[0].get("registered").is_none());

    // A отменяет, C успевает
    let (status, _) = send(
        &t.app,
        json_request("PATCH", "/api/registrations/cancel", Some((STUDENT_HEADER, a)), register_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &t.app,
        json_request("POST", "/api/registrations", Some((STUDENT_HEADER, c)), register_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // повторная отмена — идемпотентный успех
    let (status, _) = send(
        &t.app,
        json_request("PATCH", "/api/registrations/cancel", Some((STUDENT_HEADER, a)), register_body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        get_request("/api/registrations/my", Some((STUDENT_HEADER, b))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["free_spots"], 0);
}

#[tokio::test]
async fn identity_and_unknown_event_errors() {
    let t = spawn_app().await;

    // незнакомый студент
    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            "/api/registrations",
            Some((STUDENT_HEADER, Uuid::new_v4())),
            json!({ "event_id": Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // без заголовка вовсе
    let (status, _) = send(
        &t.app,
        json_request("POST", "/api/registrations", None, json!({ "event_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // знакомый студент, несуществующее событие
    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            "/api/registrations",
            Some((STUDENT_HEADER, t.students[0])),
            json!({ "event_id": Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn organizer_creates_and_admin_rejects() {
    let t = spawn_app().await;
    let date_time = (Local::now().naive_local() + Duration::days(5))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();

    // превышение вместимости площадки
    let (status, _) = send(
        &t.app,
        json_request(
            "POST",
            "/api/events",
            Some((ORGANIZER_HEADER, t.organizer)),
            json!({ "title": "Open air", "date_time": date_time, "venue_id": t.venue, "capacity": 41 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = send(
        &t.app,
        json_request(
            "POST",
            "/api/events",
            Some((ORGANIZER_HEADER, t.organizer)),
            json!({ "title": "Open air", "date_time": date_time, "venue_id": t.venue, "capacity": 40 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["approved"], true);
    let event_id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

    // организатор видит своё событие
    let (_, mine) = send(
        &t.app,
        get_request("/api/events/mine", Some((ORGANIZER_HEADER, t.organizer))),
    )
    .await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    // админ снимает approve — событие пропадает из публичного поиска
    let (status, _) = send(
        &t.app,
        json_request(
            "PATCH",
            "/api/events/approve",
            Some((ADMIN_HEADER, t.admin)),
            json!({ "event_id": event_id, "approved": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, rows) = send(&t.app, get_request("/api/events", None)).await;
    assert!(rows.as_array().unwrap().is_empty());

    // но остаётся в админском списке
    let (_, all) = send(&t.app, get_request("/api/events/all", Some((ADMIN_HEADER, t.admin)))).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    // студенту админские списки недоступны
    let (status, _) = send(
        &t.app,
        get_request("/api/events/all", Some((STUDENT_HEADER, t.students[0]))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
