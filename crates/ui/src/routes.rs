use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    CoursesView, HomeView, LessonView, LoginView, RoadmapView, SignupView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login", LoginView)] Login {},
        #[route("/signup", SignupView)] Signup {},
        #[route("/courses", CoursesView)] Courses {},
        #[route("/roadmap/:course_id", RoadmapView)] Roadmap { course_id: String },
    #[end_layout]
    #[route("/lesson/:course_id/:lesson_id", LessonView)] Lesson { course_id: String, lesson_id: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Aula" }
            ul {
                li { Link { to: Route::Home {}, "Inicio" } }
                li { Link { to: Route::Courses {}, "Cursos" } }
                li { Link { to: Route::Login {}, "Iniciar sesión" } }
            }
        }
    }
}
