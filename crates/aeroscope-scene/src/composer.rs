//! Top-level scene orchestration.
//!
//! [`SceneComposer`] owns all interactive state: the view controller, the
//! camera animator, the marker table and the inspect tracker. Renderers feed
//! it pointer input and elapsed time, and read back the active scene
//! description and camera pose.

use std::collections::HashMap;
use std::sync::Arc;

use crate::camera::{CameraAnimator, CameraState};
use crate::catalog::{self, MarkerEntity};
use crate::controller::{ModeChange, PropulsionChange, ViewModeController};
use crate::geometry::{self, HotspotTarget, SceneDescription};
use crate::inspect::{InspectRequest, InspectTracker, Ticket};
use crate::markers::MarkerSystem;
use crate::mode::{PropulsionType, ViewMode};
use crate::picking::{self, PickHit, Ray};
use crate::projector::SphericalProjector;
use crate::view::ActiveView;

/// What a click on a hotspot did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The aircraft body was clicked and the view switched to it.
    Navigated(ModeChange),
    /// An engine was clicked; the request leaves the core.
    Inspect(InspectRequest),
    /// A marker panel was opened or closed.
    MarkerToggled { id: String, open: bool },
    /// The click changed nothing.
    Ignored,
}

/// Orchestrates view selection, geometry, markers, camera and inspection.
///
/// `T` is the result type of inspect requests, opaque to the core.
#[derive(Debug)]
pub struct SceneComposer<T> {
    controller: ViewModeController,
    camera: CameraAnimator,
    markers: MarkerSystem,
    catalog: Vec<MarkerEntity>,
    projector: SphericalProjector,
    view: ActiveView,
    scenes: HashMap<(PropulsionType, ViewMode), Arc<SceneDescription>>,
    scene: Arc<SceneDescription>,
    revision: u64,
    hovered: Option<HotspotTarget>,
    inspect: InspectTracker<T>,
}

impl<T> Default for SceneComposer<T> {
    fn default() -> Self {
        Self::new(ViewModeController::default(), CameraAnimator::default())
    }
}

impl<T> SceneComposer<T> {
    /// Create a composer over the scenario catalog.
    pub fn new(controller: ViewModeController, camera: CameraAnimator) -> Self {
        Self::with_catalog(controller, camera, catalog::all_markers())
    }

    /// Create a composer over an explicit marker catalog.
    pub fn with_catalog(
        controller: ViewModeController,
        camera: CameraAnimator,
        catalog: Vec<MarkerEntity>,
    ) -> Self {
        let projector = SphericalProjector::default();
        let view = ActiveView::select(
            controller.mode(),
            controller.propulsion(),
            &catalog,
            &projector,
        );
        let scene = Arc::new(geometry::build_view(&view));
        let mut scenes = HashMap::new();
        scenes.insert(
            scene_key(controller.propulsion(), controller.mode()),
            scene.clone(),
        );

        Self {
            markers: MarkerSystem::with_markers(catalog.iter().cloned()),
            controller,
            camera,
            catalog,
            projector,
            view,
            scenes,
            scene,
            revision: 0,
            hovered: None,
            inspect: InspectTracker::new(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.controller.mode()
    }

    pub fn propulsion(&self) -> PropulsionType {
        self.controller.propulsion()
    }

    pub fn cinema(&self) -> bool {
        self.controller.cinema()
    }

    /// Switch view mode.
    ///
    /// Leaving a view closes its markers, clears hover and dismisses any
    /// inspect request.
    pub fn set_mode(&mut self, mode: ViewMode) -> Option<ModeChange> {
        let change = self.controller.set_mode(mode)?;
        self.markers.observe_mode(change.to);
        self.inspect.dismiss();
        self.hovered = None;
        self.reselect();
        Some(change)
    }

    /// Step the scrubber towards the macro end.
    pub fn next_mode(&mut self) -> Option<ModeChange> {
        self.mode().next().and_then(|mode| self.set_mode(mode))
    }

    /// Step the scrubber towards the micro end.
    pub fn previous_mode(&mut self) -> Option<ModeChange> {
        self.mode().previous().and_then(|mode| self.set_mode(mode))
    }

    /// Select a propulsion type and rebuild the affected geometry.
    pub fn set_propulsion(&mut self, propulsion: PropulsionType) -> Option<PropulsionChange> {
        let change = self.controller.set_propulsion(propulsion)?;
        self.reselect();
        Some(change)
    }

    pub fn set_cinema(&mut self, cinema: bool) -> bool {
        self.controller.set_cinema(cinema)
    }

    /// The groups visible in the current mode.
    pub fn active_view(&self) -> &ActiveView {
        &self.view
    }

    /// The scene for the current mode and propulsion.
    pub fn scene(&self) -> &Arc<SceneDescription> {
        &self.scene
    }

    /// Incremented whenever [`Self::scene`] is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn markers(&self) -> &MarkerSystem {
        &self.markers
    }

    pub fn projector(&self) -> &SphericalProjector {
        &self.projector
    }

    /// Advance the camera one frame. `elapsed` is scene time in seconds.
    pub fn frame(&mut self, elapsed: f32) -> CameraState {
        self.camera
            .tick(self.controller.mode(), self.controller.cinema(), elapsed)
    }

    pub fn camera(&self) -> &CameraAnimator {
        &self.camera
    }

    /// Pick the hotspot under `ray` in the active scene.
    pub fn pick(&self, ray: Ray) -> Option<PickHit> {
        picking::pick_ray(&self.scene.hotspots, ray)
    }

    /// The entity currently under the pointer.
    pub fn hovered(&self) -> Option<&HotspotTarget> {
        self.hovered.as_ref()
    }

    /// Label of the engine under the pointer, for the tooltip.
    pub fn hovered_engine(&self) -> Option<&str> {
        match &self.hovered {
            Some(HotspotTarget::Engine { label }) => Some(label),
            _ => None,
        }
    }

    /// Move the pointer onto `target`, or off everything with `None`.
    /// Returns `true` if the hovered entity changed.
    pub fn hover(&mut self, target: Option<HotspotTarget>) -> bool {
        if self.hovered == target {
            return false;
        }
        let previous = std::mem::replace(&mut self.hovered, target.clone());
        if let Some(HotspotTarget::Marker { id }) = previous {
            self.set_marker_hover(&id, false);
        }
        if let Some(HotspotTarget::Marker { id }) = target {
            self.set_marker_hover(&id, true);
        }
        true
    }

    fn set_marker_hover(&mut self, id: &str, hovered: bool) {
        if let Err(err) = self.markers.set_hover(id, hovered) {
            tracing::warn!(%err, "hover on unmounted marker");
        }
    }

    /// Handle a click on `target`.
    pub fn click(&mut self, target: &HotspotTarget) -> ClickOutcome {
        match target {
            HotspotTarget::Aircraft => self
                .set_mode(ViewMode::Aircraft)
                .map_or(ClickOutcome::Ignored, ClickOutcome::Navigated),
            HotspotTarget::Engine { label } => {
                let propulsion = self.propulsion();
                ClickOutcome::Inspect(self.inspect.request(label.clone(), propulsion))
            }
            HotspotTarget::Marker { id } => match self.markers.toggle_open(id) {
                Ok(open) => ClickOutcome::MarkerToggled {
                    id: id.clone(),
                    open,
                },
                Err(err) => {
                    tracing::warn!(%err, "click on unmounted marker");
                    ClickOutcome::Ignored
                }
            },
        }
    }

    /// Close a marker panel from its close button.
    pub fn close_marker(&mut self, id: &str) -> bool {
        self.markers.close_all(|entity| entity.id == id) > 0
    }

    pub fn inspect(&self) -> &InspectTracker<T> {
        &self.inspect
    }

    /// Deliver an inspect result. Stale results are dropped.
    pub fn complete_inspect(&mut self, ticket: Ticket, result: T) -> bool {
        self.inspect.complete(ticket, result)
    }

    /// Close the inspect panel, discarding any in-flight result.
    pub fn dismiss_inspect(&mut self) {
        self.inspect.dismiss();
    }

    fn reselect(&mut self) {
        let (propulsion, mode) = (self.controller.propulsion(), self.controller.mode());
        self.view = ActiveView::select(mode, propulsion, &self.catalog, &self.projector);
        let view = &self.view;
        let scene = self
            .scenes
            .entry(scene_key(propulsion, mode))
            .or_insert_with(|| Arc::new(geometry::build_view(view)))
            .clone();
        if !Arc::ptr_eq(&scene, &self.scene) {
            self.scene = scene;
            self.revision += 1;
        }
    }
}

/// Cache key for a built scene. The globe does not depend on propulsion.
fn scene_key(propulsion: PropulsionType, mode: ViewMode) -> (PropulsionType, ViewMode) {
    match mode {
        ViewMode::Global => (PropulsionType::default(), mode),
        _ => (propulsion, mode),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::{BASE_FUSELAGE_WIDTH, Shape};
    use crate::inspect::InspectStatus;

    fn composer() -> SceneComposer<String> {
        SceneComposer::default()
    }

    fn engine(label: &str) -> HotspotTarget {
        HotspotTarget::Engine {
            label: label.to_owned(),
        }
    }

    fn marker(id: &str) -> HotspotTarget {
        HotspotTarget::Marker { id: id.to_owned() }
    }

    #[test]
    fn test_starts_in_airport() {
        let composer = composer();
        assert_eq!(composer.mode(), ViewMode::Airport);
        assert!(matches!(composer.active_view(), ActiveView::Airport(_)));
        assert!(composer.scene().primitive("terminal").is_some());
    }

    #[test]
    fn test_hydrogen_widens_fuselage() {
        let mut composer = composer();
        composer.set_mode(ViewMode::Aircraft);
        composer.set_propulsion(PropulsionType::LiquidH2);

        let ActiveView::Aircraft(view) = composer.active_view() else {
            panic!("aircraft view expected");
        };
        let profile = geometry::AircraftProfile::for_propulsion(view.propulsion);
        assert!((profile.fuselage_width - BASE_FUSELAGE_WIDTH * 1.2).abs() < 1e-6);

        let Shape::Dome { radius } = composer.scene().primitive("nose").unwrap().shape else {
            panic!("nose is a dome");
        };
        assert!((radius - 0.8 * BASE_FUSELAGE_WIDTH * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_leaving_airport_closes_open_marker() {
        let mut composer = composer();
        composer.click(&marker("h2-farm"));
        assert!(composer.markers().state("h2-farm").unwrap().open);

        composer.set_mode(ViewMode::Global);
        assert!(!composer.markers().state("h2-farm").unwrap().open);
        assert_eq!(composer.markers().open_markers().count(), 0);
    }

    #[test]
    fn test_late_engine_result_is_ignored() {
        let mut composer = composer();
        let ClickOutcome::Inspect(first) = composer.click(&engine("ENG 1")) else {
            panic!("engine click inspects");
        };
        let ClickOutcome::Inspect(second) = composer.click(&engine("ENG 2")) else {
            panic!("engine click inspects");
        };

        assert!(composer.complete_inspect(second.ticket, "eng-2".to_owned()));
        assert!(!composer.complete_inspect(first.ticket, "eng-1".to_owned()));
        let (request, result) = composer.inspect().displayed().unwrap();
        assert_eq!(request.part, "ENG 2");
        assert_eq!(result, "eng-2");
    }

    #[test]
    fn test_navigation_discards_pending_inspect() {
        let mut composer = composer();
        let ClickOutcome::Inspect(request) = composer.click(&engine("ENG 1")) else {
            panic!("engine click inspects");
        };
        composer.set_mode(ViewMode::Global);
        assert!(!composer.complete_inspect(request.ticket, "late".to_owned()));
        assert_eq!(composer.inspect().status(), InspectStatus::Idle);
    }

    #[test]
    fn test_aircraft_click_navigates() {
        let mut composer = composer();
        let outcome = composer.click(&HotspotTarget::Aircraft);
        assert_eq!(
            outcome,
            ClickOutcome::Navigated(ModeChange {
                from: ViewMode::Airport,
                to: ViewMode::Aircraft
            })
        );
        assert_eq!(composer.click(&HotspotTarget::Aircraft), ClickOutcome::Ignored);
    }

    #[test]
    fn test_scene_is_memoized() {
        let mut composer = composer();
        let airport = composer.scene().clone();
        let revision = composer.revision();

        composer.set_mode(ViewMode::Global);
        assert_eq!(composer.revision(), revision + 1);
        composer.set_mode(ViewMode::Airport);
        assert!(Arc::ptr_eq(composer.scene(), &airport));
        assert_eq!(composer.revision(), revision + 2);

        // Setting the same propulsion again rebuilds nothing.
        composer.set_propulsion(PropulsionType::Kerosene);
        assert_eq!(composer.revision(), revision + 2);
    }

    #[test]
    fn test_globe_ignores_propulsion_change() {
        let mut composer = composer();
        composer.set_mode(ViewMode::Global);
        let globe = composer.scene().clone();
        let revision = composer.revision();

        assert!(composer.set_propulsion(PropulsionType::LiquidH2).is_some());
        assert!(Arc::ptr_eq(composer.scene(), &globe));
        assert_eq!(composer.revision(), revision);

        // The airport still picks up the new propulsion.
        composer.set_mode(ViewMode::Airport);
        assert_eq!(composer.revision(), revision + 1);
        let glow = composer.scene().primitive("engine-1-glow").unwrap();
        assert_eq!(
            glow.material.emission.unwrap().color,
            PropulsionType::LiquidH2.config().color
        );
    }

    #[test]
    fn test_hover_tracks_marker_and_engine() {
        let mut composer = composer();
        assert!(composer.hover(Some(marker("electrolyzer"))));
        assert!(composer.markers().state("electrolyzer").unwrap().hovered);
        assert!(!composer.hover(Some(marker("electrolyzer"))));

        assert!(composer.hover(Some(engine("ENG 2"))));
        assert!(!composer.markers().state("electrolyzer").unwrap().hovered);
        assert_eq!(composer.hovered_engine(), Some("ENG 2"));

        composer.hover(None);
        assert_eq!(composer.hovered(), None);
    }

    #[test]
    fn test_pick_through_camera_ray() {
        let mut composer = composer();
        composer.set_mode(ViewMode::Global);
        let lhr = composer.projector().project(0.8, 0.6).unwrap();
        let origin = lhr * 3.0;
        let hit = composer.pick(Ray::new(origin, lhr - origin)).unwrap();
        assert_eq!(hit.target, marker("LHR"));
    }

    #[test]
    fn test_frame_moves_camera_towards_mode_target() {
        let mut composer = composer();
        let start = composer.camera().position();
        let target = crate::camera::camera_target(ViewMode::Airport, false, 0.0);
        let state = composer.frame(0.016);
        assert!(state.position.distance(target) < start.distance(target));
        assert_eq!(state.look_at, Vec3::ZERO);
    }

    #[test]
    fn test_close_marker() {
        let mut composer = composer();
        composer.click(&marker("refuel-truck"));
        assert!(composer.close_marker("refuel-truck"));
        assert!(!composer.close_marker("refuel-truck"));
    }
}
