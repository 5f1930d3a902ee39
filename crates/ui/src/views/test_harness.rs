use std::collections::BTreeMap;
use std::sync::Arc;

use aula_core::model::{CourseId, CourseManifest, Lesson, LessonEntry, LessonId};
use aula_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{ApiClient, AppServices, AuthService, CourseService, LessonLoopService};
use storage::repository::{InMemoryRepository, Storage};
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::views::{CoursesView, HomeView, LessonView, RoadmapView};

pub const COURSE: &str = "probabilidad";

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn lessons(&self) -> Arc<LessonLoopService> {
        self.services.lessons()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Courses,
    Roadmap(String),
    Lesson(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Courses => rsx! { CoursesView {} },
        ViewKind::Roadmap(course_id) => rsx! { RoadmapView { course_id } },
        ViewKind::Lesson(lesson_id) => rsx! {
            LessonView { course_id: COURSE.to_string(), lesson_id }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources resolve and re-render.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over in-memory storage. The API points at a closed port, so only
/// signed-out and local-manifest paths render without errors.
pub fn setup_view_harness(view: ViewKind, lessons: &[(&str, &str)]) -> ViewHarness {
    let repo = InMemoryRepository::new();
    let mut entries = Vec::new();
    for (id, json) in lessons {
        let lesson_id = LessonId::new(*id).expect("lesson id");
        let lesson = Lesson::from_json(json).expect("lesson json");
        entries.push(LessonEntry {
            file: lesson_id.clone(),
            title: lesson.title.clone(),
        });
        repo.insert_lesson(lesson_id, lesson).expect("insert lesson");
    }
    let mut courses = BTreeMap::new();
    courses.insert(CourseId::new(COURSE).expect("course id"), entries);
    repo.set_manifest(CourseManifest::new(courses))
        .expect("set manifest");

    let api = ApiClient::new(Url::parse("http://127.0.0.1:9/").expect("url"));
    let services = AppServices::new(Storage::from_in_memory(repo), api, fixed_clock());
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
