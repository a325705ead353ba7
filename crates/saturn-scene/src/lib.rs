//! Ringed-planet scene: kinematic moons and ring bands around a spinning
//! planet, driven by a per-frame update and render.
//!
//! Rendering goes through the [`saturn_render::DrawList`] and
//! [`saturn_render::MeshUploader`] traits, so the scene runs unchanged
//! against the wgpu renderer or a recording double in tests.

pub mod angle;
pub mod catalog;
mod error;
pub mod moon;
pub mod ring;
pub mod simulation;
pub mod state;
pub mod time_scale;

pub use angle::wrap_degrees;
pub use catalog::{MoonSpec, PlanetSpec, RingSpec, SystemCatalog};
pub use error::SceneError;
pub use moon::Moon;
pub use ring::RingBand;
pub use simulation::{Planet, Simulation};
pub use state::{ControlInput, SceneSettings, SceneState};
pub use time_scale::{DEFAULT_TIME_SCALE_KEY, TIME_SCALE_TABLE};
