pub mod controller;
pub mod history;
pub mod messages;
pub mod model;
pub mod render;
pub mod sampler;
pub mod scheduler;
pub mod service;
pub mod session;
pub mod snapshot;

pub use controller::SketchController;
