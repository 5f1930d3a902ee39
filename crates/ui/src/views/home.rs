use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use aula_core::model::Course;

/// Signed-in learners see their joined courses; everyone else a welcome.
#[derive(Clone, Debug, PartialEq)]
enum HomeData {
    Welcome,
    Joined { username: String, courses: Vec<Course> },
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let courses = ctx.courses();

    let resource = use_resource(move || {
        let auth = auth.clone();
        let courses = courses.clone();
        async move {
            let Some(session) = auth.current_session().await? else {
                return Ok::<_, ViewError>(HomeData::Welcome);
            };
            let joined = match courses.joined_courses().await {
                Ok(joined) => joined,
                Err(err) => match ViewError::from(err) {
                    ViewError::SignedOut => return Ok(HomeData::Welcome),
                    other => return Err(other),
                },
            };
            Ok(HomeData::Joined {
                username: session.username().to_string(),
                courses: joined,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { p { "Cargando..." } },
                ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
                ViewState::Ready(HomeData::Welcome) => rsx! {
                    h1 { "Bienvenido a Aula" }
                    div { class: "actions",
                        Link { to: Route::Login {}, class: "button", "Iniciar sesión" }
                        Link { to: Route::Signup {}, class: "button button--secondary", "Crear cuenta" }
                    }
                },
                ViewState::Ready(HomeData::Joined { username, courses }) => rsx! {
                    h1 { "Hola, {username}" }
                    h2 { "Your courses" }
                    if courses.is_empty() {
                        p { "You haven’t joined any courses yet." }
                        Link { to: Route::Courses {}, "Ver cursos" }
                    } else {
                        ul { class: "course-list",
                            for course in courses {
                                li { key: "{course.id}",
                                    Link {
                                        to: Route::Roadmap { course_id: course.id.to_string() },
                                        "{course.title}"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
