use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    const fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Iniciar sesión",
            AuthMode::Signup => "Crear cuenta",
        }
    }

    const fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Entrar",
            AuthMode::Signup => "Registrarme",
        }
    }
}

#[component]
pub fn LoginView() -> Element {
    rsx! { AuthForm { mode: AuthMode::Login } }
}

#[component]
pub fn SignupView() -> Element {
    rsx! { AuthForm { mode: AuthMode::Signup } }
}

#[component]
fn AuthForm(mode: AuthMode) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let on_submit = use_callback(move |()| {
        if busy() {
            return;
        }
        let auth = auth.clone();
        spawn(async move {
            busy.set(true);
            let (name, secret) = (username(), password());
            let result = match mode {
                AuthMode::Login => auth.login(&name, &secret).await,
                AuthMode::Signup => auth.signup(&name, &secret).await,
            };
            busy.set(false);
            match result {
                Ok(session) => {
                    debug!(username = session.username(), "authenticated");
                    error.set(None);
                    navigator.push(Route::Courses {});
                }
                Err(err) => error.set(Some(ViewError::from(err))),
            }
        });
    });

    rsx! {
        div { class: "page auth",
            h2 { "{mode.title()}" }
            form {
                class: "auth-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                input {
                    r#type: "text",
                    placeholder: "Nombre de usuario",
                    autocomplete: "username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Contraseña",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", disabled: busy(), "{mode.submit_label()}" }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            match mode {
                AuthMode::Login => rsx! {
                    p { "¿No tienes cuenta? " Link { to: Route::Signup {}, "Crear cuenta" } }
                },
                AuthMode::Signup => rsx! {
                    p { "¿Ya tienes cuenta? " Link { to: Route::Login {}, "Iniciar sesión" } }
                },
            }
        }
    }
}
