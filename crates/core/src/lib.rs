pub mod error;
pub mod model;
pub mod navigation;
pub mod response_store;
pub mod sample_space;
pub mod simulation;
pub mod time;
pub mod validation;
pub mod venn;

pub use error::Error;
pub use time::Clock;
