//! Core state and geometry for the aeroscope viewer.
//!
//! Everything here is renderer independent: view and propulsion selection,
//! procedural geometry, marker interaction, camera motion and inspect-request
//! bookkeeping. A renderer drives [`SceneComposer`] with input and time, and
//! draws the [`SceneDescription`] it exposes.

pub mod camera;
pub mod catalog;
pub mod composer;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod inspect;
pub mod markers;
pub mod mode;
pub mod picking;
pub mod projector;
pub mod view;

pub use camera::{CameraAnimator, CameraAnimatorSettings, CameraState};
pub use catalog::{MarkerAnchor, MarkerEntity, MarkerKind};
pub use composer::{ClickOutcome, SceneComposer};
pub use controller::{ModeChange, PropulsionChange, ViewModeController};
pub use error::{Result, SceneError};
pub use geometry::{Hotspot, HotspotTarget, Material, Primitive, Rgb, SceneDescription, Shape};
pub use inspect::{InspectRequest, InspectStatus, InspectTracker, Ticket};
pub use markers::{MarkerSystem, MarkerUiState};
pub use mode::{PropulsionConfig, PropulsionType, ViewMode};
pub use picking::{PickHit, Ray};
pub use projector::SphericalProjector;
pub use view::ActiveView;
