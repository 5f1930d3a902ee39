mod blocks;
mod exercise_context;

use aula_core::model::LessonId;
use aula_core::navigation::NavigationEffect;
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{Feedback, LessonLoopService};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AsideVm, FeedbackAction, FooterAction, LessonVm, section_vm, start_lesson,
};

pub use blocks::{BlockView, ContentBlocks, InlineText};
pub use exercise_context::ExerciseContext;

fn scroll_to_section_script(index: usize) -> String {
    format!(
        r#"(function() {{
            const el = document.getElementById("section-{index}");
            if (el) el.scrollIntoView({{ behavior: "smooth", block: "start" }});
        }})();"#
    )
}

const SCROLL_TOP_SCRIPT: &str = r#"window.scrollTo({ top: 0, behavior: "smooth" });"#;

/// Validate the current answer while the run stays in its signal, so the
/// page keeps its widgets mounted during the answer-key load.
pub(crate) async fn submit_in_place(
    mut vm: Signal<Option<LessonVm>>,
    lessons: &LessonLoopService,
) -> Result<Feedback, ViewError> {
    let pending = vm.read().as_ref().map(LessonVm::submission);
    let (response, exercise_id) = pending.ok_or(ViewError::Unknown)??;
    let correct = lessons
        .validator()
        .validate(&response, exercise_id.as_ref())
        .await;
    debug!(correct, "exercise submitted");
    vm.write()
        .as_mut()
        .map(|current| current.record_result(correct))
        .ok_or(ViewError::Unknown)
}

/// One lesson: sections revealed one by one, then the exercises one at a time.
#[component]
pub fn LessonView(course_id: String, lesson_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let lessons = ctx.lessons();

    let mut vm = use_signal(|| None::<LessonVm>);
    let aside = use_signal(|| None::<AsideVm>);
    let mut effect = use_signal(|| None::<NavigationEffect>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut submitting = use_signal(|| false);
    let mut fade_key = use_signal(|| 0_usize);
    use_context_provider(|| ExerciseContext::new(vm, aside, effect));

    let resource = {
        let lessons = lessons.clone();
        use_resource(move || {
            let lessons = lessons.clone();
            let lesson_id = lesson_id.clone();
            async move {
                let id = LessonId::new(lesson_id).map_err(|_| ViewError::LessonNotAvailable)?;
                let started = start_lesson(&lessons, &id).await?;
                vm.set(Some(started));
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        let Some(next) = effect() else {
            return;
        };
        match next {
            NavigationEffect::ScrollToSection(index) => {
                let _ = eval(&scroll_to_section_script(index));
            }
            NavigationEffect::FadeToExercise { index, .. } => {
                fade_key.set(index + 1);
                let _ = eval(SCROLL_TOP_SCRIPT);
            }
            NavigationEffect::Exit => {
                navigator.push(Route::Roadmap {
                    course_id: course_id.clone(),
                });
            }
        }
        effect.set(None);
    });

    let on_continue = use_callback(move |()| {
        let result = vm.write().as_mut().map(LessonVm::continue_lesson);
        match result {
            Some(Ok(next)) => {
                error.set(None);
                effect.set(Some(next));
            }
            Some(Err(err)) => error.set(Some(err)),
            None => {}
        }
    });

    let on_submit = {
        let lessons = lessons.clone();
        use_callback(move |()| {
            if submitting() {
                return;
            }
            let lessons = lessons.clone();
            spawn(async move {
                submitting.set(true);
                let result = submit_in_place(vm, &lessons).await;
                submitting.set(false);
                match result {
                    Ok(_) => error.set(None),
                    Err(err) => {
                        warn!(?err, "submit failed");
                        error.set(Some(err));
                    }
                }
            });
        })
    };

    let on_feedback = use_callback(move |action: FeedbackAction| {
        let result = vm.write().as_mut().map(|vm| vm.apply_feedback(action));
        match result {
            Some(Ok(Some(next))) => effect.set(Some(next)),
            Some(Ok(None)) | None => {}
            Some(Err(err)) => error.set(Some(err)),
        }
    });

    let content = match state {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "lesson-status", "Cargando..." }
        },
        ViewState::Error(err) => rsx! {
            div { class: "lesson-status",
                p { class: "error", "{err.message()}" }
                Link { to: Route::Home {}, "Inicio" }
            }
        },
        ViewState::Ready(()) => {
            let guard = vm.read();
            match guard.as_ref() {
                None => rsx! {},
                Some(current) => {
                    let header = current.header_label();
                    let title = current.title().to_string();
                    let run = current.run();
                    let sections = run
                        .visible_sections()
                        .iter()
                        .map(section_vm)
                        .collect::<Vec<_>>();
                    let exercise = run.current_exercise().map(section_vm);
                    let footer = current.footer();
                    let feedback = current.feedback();
                    let finished = run.is_finished();
                    let fade = fade_key();
                    rsx! {
                        header { class: "lesson-header",
                            Link { to: Route::Home {}, "Inicio" }
                            if let Some(label) = header {
                                span { class: "lesson-counter", "{label}" }
                            }
                        }
                        article { class: "lesson",
                            h1 { "{title}" }
                            if let Some(blocks) = exercise {
                                section { key: "exercise-{fade}", class: "exercise fade-in",
                                    ContentBlocks { blocks }
                                }
                            } else {
                                for (index, blocks) in sections.into_iter().enumerate() {
                                    section {
                                        key: "{index}",
                                        id: "section-{index}",
                                        class: "lesson-section fade-in",
                                        ContentBlocks { blocks }
                                    }
                                }
                            }
                            if finished {
                                p { class: "lesson-done", "¡Lección completada!" }
                            }
                            if let Some(err) = error() {
                                p { class: "error", "{err.message()}" }
                            }
                        }
                        if let Some(banner) = feedback {
                            div {
                                class: if banner.correct { "feedback feedback--correct" } else { "feedback feedback--incorrect" },
                                strong { "{banner.message}" }
                                for (label, action) in banner.actions {
                                    button {
                                        key: "{label}",
                                        r#type: "button",
                                        onclick: move |_| on_feedback.call(action),
                                        "{label}"
                                    }
                                }
                            }
                        }
                        if let Some(bar) = footer {
                            footer { class: "footer",
                                button {
                                    r#type: "button",
                                    disabled: !bar.enabled || submitting(),
                                    onclick: move |_| match bar.action {
                                        FooterAction::Continue => on_continue.call(()),
                                        FooterAction::Submit => on_submit.call(()),
                                    },
                                    "{bar.label}"
                                }
                            }
                        }
                        AsidePanel {}
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "lesson-page", {content} }
    }
}

#[component]
fn AsidePanel() -> Element {
    let ctx = use_context::<ExerciseContext>();
    let Some(aside) = ctx.aside() else {
        return rsx! {};
    };
    rsx! {
        aside { class: "aside",
            button {
                r#type: "button",
                class: "aside-close",
                onclick: move |_| ctx.close_aside(),
                "✕"
            }
            h2 { "{aside.title}" }
            div { class: "aside-body", dangerous_inner_html: "{aside.info_html}" }
        }
    }
}
