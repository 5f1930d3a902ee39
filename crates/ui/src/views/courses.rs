use aula_core::model::{Course, CourseId};
use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Membership {
    Join,
    Leave,
}

/// Every backend course with join and leave buttons.
#[component]
pub fn CoursesView() -> Element {
    let ctx = use_context::<AppContext>();
    let courses = ctx.courses();
    let mut action_error = use_signal(|| None::<ViewError>);

    let resource = {
        let courses = courses.clone();
        use_resource(move || {
            let courses = courses.clone();
            async move { Ok::<_, ViewError>(courses.list_courses().await?) }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_membership = use_callback(move |(course, change): (CourseId, Membership)| {
        let courses = courses.clone();
        let mut resource = resource;
        spawn(async move {
            let result = match change {
                Membership::Join => courses.join(&course).await,
                Membership::Leave => courses.leave(&course).await,
            };
            match result {
                Ok(()) => {
                    action_error.set(None);
                    resource.restart();
                }
                Err(err) => {
                    warn!(%course, error = %err, "membership change failed");
                    action_error.set(Some(ViewError::from(err)));
                }
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Cursos disponibles" }
            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { "Cargando..." } },
                ViewState::Error(err @ ViewError::SignedOut) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::Login {}, "Iniciar sesión" }
                },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(list) => rsx! {
                    CourseList { courses: list, on_membership }
                },
            }
        }
    }
}

#[component]
fn CourseList(courses: Vec<Course>, on_membership: Callback<(CourseId, Membership)>) -> Element {
    if courses.is_empty() {
        return rsx! { p { "No hay cursos disponibles." } };
    }
    rsx! {
        ul { class: "course-list",
            for course in courses {
                li { key: "{course.id}", class: "course-row",
                    Link {
                        to: Route::Roadmap { course_id: course.id.to_string() },
                        "{course.title}"
                    }
                    if course.joined {
                        button {
                            r#type: "button",
                            class: "button--secondary",
                            onclick: move |_| on_membership.call((course.id.clone(), Membership::Leave)),
                            "Salir"
                        }
                    } else {
                        button {
                            r#type: "button",
                            onclick: move |_| on_membership.call((course.id.clone(), Membership::Join)),
                            "Unirme"
                        }
                    }
                }
            }
        }
    }
}
