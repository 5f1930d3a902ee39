use std::sync::Arc;

use aula_core::model::{
    AnswerFixture, ExerciseResponse, Lesson, LessonId, ResponseFamily,
};
use dioxus::prelude::*;
use services::{ExerciseValidator, LessonLoopService, LessonRun};
use storage::repository::{AnswerKeyRepository, InMemoryRepository, StorageError};
use tokio::sync::Notify;

use super::lesson::submit_in_place;
use super::test_harness::{COURSE, ViewHarness, ViewKind, setup_view_harness};
use crate::vm::LessonVm;

const SETS_LESSON: &str = r#"{
    "title": "Conjuntos",
    "sections": [
        {"content": [
            {"type": "text", "value": "Un **conjunto** es una colección de objetos."},
            {"type": "formula", "value": "A \\cup B"},
            {"type": "component", "name": "TimeMachine"}
        ]},
        {"content": [{"type": "text", "value": "Segunda sección"}]}
    ],
    "exercises": [
        {"content": [{"type": "component", "name": "FreeResponse", "isExercise": true, "id": "P1"}]}
    ]
}"#;

const SIMULATION_LESSON: &str = r#"{
    "title": "Simulación",
    "sections": [
        {"content": [
            {"type": "component", "name": "CoinFlipSimulator", "props": {"probabilityHeads": 0.5}},
            {"type": "component", "name": "VennDiagramInfo"}
        ]}
    ],
    "exercises": []
}"#;

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_first_section() {
    let mut harness =
        setup_view_harness(ViewKind::Lesson("conjuntos".into()), &[("conjuntos", SETS_LESSON)]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Conjuntos"), "missing title in {html}");
    assert!(html.contains("conjunto"), "missing text in {html}");
    assert!(html.contains("math--block"), "missing formula in {html}");
    assert!(!html.contains("Segunda sección"), "second section leaked in {html}");
    assert!(html.contains("Continuar"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_shows_missing_component_placeholder() {
    let mut harness =
        setup_view_harness(ViewKind::Lesson("conjuntos".into()), &[("conjuntos", SETS_LESSON)]);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Missing component: TimeMachine"),
        "missing placeholder in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_widgets() {
    let mut harness = setup_view_harness(
        ViewKind::Lesson("simulacion".into()),
        &[("simulacion", SIMULATION_LESSON)],
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lanzar una vez"), "missing simulator in {html}");
    assert!(html.contains("Unión"), "missing venn presets in {html}");
    assert!(html.contains("Finalizar"), "missing last-page footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_reports_unknown_lesson() {
    let mut harness = setup_view_harness(ViewKind::Lesson("no-existe".into()), &[]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson not available"), "missing empty state in {html}");
    assert!(html.contains("Inicio"), "missing home link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_welcomes_signed_out_learner() {
    let mut harness = setup_view_harness(ViewKind::Home, &[]);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Bienvenido a Aula"), "missing welcome in {html}");
    assert!(html.contains("Crear cuenta"), "missing signup link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn courses_view_smoke_asks_to_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Courses, &[]);
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Inicia sesión para continuar."),
        "missing signed-out message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_view_smoke_lists_manifest_lessons() {
    let mut harness = setup_view_harness(
        ViewKind::Roadmap(COURSE.into()),
        &[("conjuntos", SETS_LESSON), ("simulacion", SIMULATION_LESSON)],
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Probabilidad"), "missing course title in {html}");
    let first = html.find("Conjuntos").expect("first lesson");
    let second = html.find("Simulación").expect("second lesson");
    assert!(first < second, "roadmap out of order in {html}");
}

const GRADED_LESSON: &str = r#"{
    "title": "Probabilidad",
    "sections": [
        {"content": [
            {"type": "text", "value": "¿Probabilidad de cara?"},
            {"type": "component", "name": "FreeResponse", "isExercise": true, "id": "P1"}
        ]}
    ]
}"#;

/// Answer keys held back until the test releases them.
struct GatedAnswers {
    gate: Arc<Notify>,
    inner: InMemoryRepository,
}

#[async_trait::async_trait]
impl AnswerKeyRepository for GatedAnswers {
    async fn get_fixture(&self, family: ResponseFamily) -> Result<AnswerFixture, StorageError> {
        self.gate.notified().await;
        self.inner.get_fixture(family).await
    }
}

#[derive(Props, Clone)]
struct SubmittingLessonProps {
    vm: LessonVm,
    lessons: Arc<LessonLoopService>,
}

impl PartialEq for SubmittingLessonProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn SubmittingLesson(props: SubmittingLessonProps) -> Element {
    let vm = use_signal(|| Some(props.vm.clone()));
    let lessons = Arc::clone(&props.lessons);
    use_hook(move || {
        spawn(async move {
            let _ = submit_in_place(vm, &lessons).await;
        });
    });

    let guard = vm.read();
    match guard.as_ref() {
        None => rsx! { p { "lesson unmounted" } },
        Some(current) => {
            let status = current.feedback().map_or("sin revisar", |banner| banner.message);
            rsx! {
                h1 { "{current.title()}" }
                p { "{status}" }
            }
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_stays_rendered_while_answer_is_checked() {
    let repo = InMemoryRepository::new();
    repo.insert_fixture(
        AnswerFixture::from_json(ResponseFamily::FreeResponse, r#"{"P1": 0.5}"#).unwrap(),
    )
    .unwrap();
    let gate = Arc::new(Notify::new());
    let answers = GatedAnswers {
        gate: Arc::clone(&gate),
        inner: repo.clone(),
    };
    let lessons = Arc::new(LessonLoopService::new(
        Arc::new(repo),
        ExerciseValidator::new(Arc::new(answers)),
    ));

    let lesson = Lesson::from_json(GRADED_LESSON).unwrap();
    let mut vm = LessonVm::new(LessonRun::new(LessonId::new("prob-1").unwrap(), lesson));
    vm.set_response(ExerciseResponse::FreeResponse("0.50".into()));

    let mut harness = ViewHarness {
        dom: VirtualDom::new_with_props(SubmittingLesson, SubmittingLessonProps { vm, lessons }),
    };
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Probabilidad"), "lesson vanished mid-check: {html}");
    assert!(html.contains("sin revisar"), "verdict arrived early: {html}");
    assert!(!html.contains("lesson unmounted"), "{html}");

    gate.notify_one();
    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("¡Correcto!"), "missing verdict in {html}");
    assert!(html.contains("Probabilidad"), "{html}");
}
