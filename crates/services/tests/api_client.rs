use std::collections::BTreeMap;
use std::sync::Arc;

use aula_core::model::{CourseId, CourseManifest, LessonEntry, LessonId};
use aula_core::time::fixed_clock;
use serde_json::json;
use services::{ApiClient, ApiError, AuthService, CourseError, CourseService};
use storage::repository::InMemoryRepository;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(Url::parse(&server.uri()).unwrap())
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"nombre_usuario": "ana", "contrasena_hash": "secreto"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "token_type": "bearer"})),
        )
        .mount(server)
        .await;
}

fn course_service(server: &MockServer, repo: &InMemoryRepository) -> CourseService {
    let api = client(server);
    let auth = Arc::new(AuthService::new(
        fixed_clock(),
        api.clone(),
        Arc::new(repo.clone()),
    ));
    CourseService::new(api, auth, Arc::new(repo.clone()))
}

#[tokio::test]
async fn login_returns_access_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let token = client(&server).login("ana", "secreto").await.unwrap();
    assert_eq!(token, "tok-1");
}

#[tokio::test]
async fn rejected_login_keeps_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Credenciales inválidas"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).login("ana", "mal").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Credenciales inválidas");
}

#[tokio::test]
async fn error_without_detail_uses_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).signup("ana", "x").await.unwrap_err();
    assert!(matches!(err, ApiError::HttpStatus { .. }));
    assert_eq!(err.to_string(), "Internal Server Error");
}

#[tokio::test]
async fn course_requests_carry_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "conjuntos", "title": "Conjuntos", "joined": true},
            {"id": "probabilidad", "title": "Probabilidad"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/courses/probabilidad/join"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let courses = api.list_courses("tok-1").await.unwrap();
    assert_eq!(courses.len(), 2);
    assert!(courses[0].joined);
    assert!(!courses[1].joined);

    api.join_course("tok-1", &CourseId::new("probabilidad").unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn course_service_requires_session() {
    let server = MockServer::start().await;
    let courses = course_service(&server, &InMemoryRepository::new());

    let err = courses.list_courses().await.unwrap_err();
    assert!(matches!(err, CourseError::Api(ApiError::Unauthorized)));
}

#[tokio::test]
async fn joined_courses_filters_membership() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "conjuntos", "title": "Conjuntos", "joined": true},
            {"id": "probabilidad", "title": "Probabilidad", "joined": false}
        ])))
        .mount(&server)
        .await;

    let repo = InMemoryRepository::new();
    let auth = AuthService::new(fixed_clock(), client(&server), Arc::new(repo.clone()));
    auth.login("ana", "secreto").await.unwrap();

    let joined = course_service(&server, &repo).joined_courses().await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].id.as_str(), "conjuntos");
}

#[tokio::test]
async fn rejected_token_clears_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/courses/conjuntos/leave"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expirado"})))
        .mount(&server)
        .await;

    let repo = InMemoryRepository::new();
    let auth = AuthService::new(fixed_clock(), client(&server), Arc::new(repo.clone()));
    auth.login("ana", "secreto").await.unwrap();

    let err = course_service(&server, &repo)
        .leave(&CourseId::new("conjuntos").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, CourseError::Api(ref api) if api.is_unauthorized()));
    assert!(auth.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn roadmap_prefers_local_manifest() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/courses/probabilidad/lessons"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"file": "prob-1", "title": "Experimentos aleatorios"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = InMemoryRepository::new();
    let conjuntos = CourseId::new("conjuntos").unwrap();
    repo.set_manifest(CourseManifest::new(BTreeMap::from([(
        conjuntos.clone(),
        vec![LessonEntry {
            file: LessonId::new("conj-1").unwrap(),
            title: "¿Qué es un conjunto?".into(),
        }],
    )])))
    .unwrap();
    let auth = AuthService::new(fixed_clock(), client(&server), Arc::new(repo.clone()));
    auth.login("ana", "secreto").await.unwrap();
    let courses = course_service(&server, &repo);

    let local = courses.roadmap(&conjuntos).await.unwrap();
    assert_eq!(local[0].file.as_str(), "conj-1");

    let remote = courses
        .roadmap(&CourseId::new("probabilidad").unwrap())
        .await
        .unwrap();
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].title, "Experimentos aleatorios");
}
