mod auth;
mod courses;
mod home;
mod lesson;
mod roadmap;
mod state;
mod widgets;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::{LoginView, SignupView};
pub use courses::CoursesView;
pub use home::HomeView;
pub use lesson::LessonView;
pub use roadmap::RoadmapView;
pub use state::{ViewError, ViewState, view_state_from_resource};
