use aula_core::model::{CourseId, LessonEntry};
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// `probabilidad-basica` reads as `Probabilidad basica`.
fn roadmap_title(course_id: &str) -> String {
    let spaced = course_id.replacen('-', " ", 1);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered lessons of one course.
#[component]
pub fn RoadmapView(course_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let title = roadmap_title(&course_id);

    let resource = {
        let course_id = course_id.clone();
        use_resource(move || {
            let courses = courses.clone();
            let course_id = course_id.clone();
            async move {
                let id = CourseId::new(course_id).map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(courses.roadmap(&id).await?)
            }
        })
    };
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page roadmap",
            h2 { "{title}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { "Cargando..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(lessons) => rsx! {
                    LessonList { course_id: course_id.clone(), lessons }
                },
            }
        }
    }
}

#[component]
fn LessonList(course_id: String, lessons: Vec<LessonEntry>) -> Element {
    if lessons.is_empty() {
        return rsx! { p { "Este curso aún no tiene lecciones." } };
    }
    rsx! {
        ol { class: "roadmap-list",
            for entry in lessons {
                li { key: "{entry.file}",
                    Link {
                        to: Route::Lesson {
                            course_id: course_id.clone(),
                            lesson_id: entry.file.to_string(),
                        },
                        "{entry.title}"
                    }
                }
            }
        }
    }
}
