//! Hover and open state of every mounted marker.
//!
//! Hover is purely visual. Clicking toggles a marker's panel; panels are
//! independent of one another, but all panels of a view close as soon as that
//! view stops being the active one.

use std::collections::HashMap;

use crate::catalog::MarkerEntity;
use crate::error::{Result, SceneError};
use crate::mode::ViewMode;

/// Scale applied to a hovered or open marker.
pub const EMPHASIS_SCALE: f32 = 1.1;

/// Interaction state of one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerUiState {
    pub hovered: bool,
    pub open: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    entity: MarkerEntity,
    state: MarkerUiState,
}

/// Indexed table of mounted markers and their UI state.
#[derive(Debug, Clone, Default)]
pub struct MarkerSystem {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl MarkerSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount every marker in `entities`.
    pub fn with_markers(entities: impl IntoIterator<Item = MarkerEntity>) -> Self {
        let mut system = Self::new();
        for entity in entities {
            system.mount(entity);
        }
        system
    }

    /// Mount a marker with fresh state. Remounting an id replaces the entity
    /// and resets its state.
    pub fn mount(&mut self, entity: MarkerEntity) {
        let slot = Slot {
            entity,
            state: MarkerUiState::default(),
        };
        if let Some(&i) = self.index.get(&slot.entity.id) {
            tracing::debug!(id = %slot.entity.id, "remounting marker");
            self.slots[i] = slot;
        } else {
            self.index.insert(slot.entity.id.clone(), self.slots.len());
            self.slots.push(slot);
        }
    }

    /// Remove a marker and its state.
    pub fn unmount(&mut self, id: &str) -> Result<MarkerEntity> {
        let i = self.position(id)?;
        let slot = self.slots.remove(i);
        self.index.remove(id);
        for position in self.index.values_mut() {
            if *position > i {
                *position -= 1;
            }
        }
        Ok(slot.entity)
    }

    /// Number of mounted markers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Set the hover flag. Returns `true` if it changed.
    pub fn set_hover(&mut self, id: &str, hovered: bool) -> Result<bool> {
        let state = &mut self.slot_mut(id)?.state;
        let changed = state.hovered != hovered;
        state.hovered = hovered;
        Ok(changed)
    }

    /// Clear the hover flag on every marker.
    pub fn clear_hover(&mut self) {
        for slot in &mut self.slots {
            slot.state.hovered = false;
        }
    }

    /// Flip the open flag. Returns the new value.
    pub fn toggle_open(&mut self, id: &str) -> Result<bool> {
        let slot = self.slot_mut(id)?;
        slot.state.open = !slot.state.open;
        tracing::debug!(id, open = slot.state.open, "marker toggled");
        Ok(slot.state.open)
    }

    /// Close every marker matching `predicate`. Returns how many were open.
    pub fn close_all(&mut self, predicate: impl Fn(&MarkerEntity) -> bool) -> usize {
        let mut closed = 0;
        for slot in &mut self.slots {
            if slot.state.open && predicate(&slot.entity) {
                slot.state.open = false;
                closed += 1;
            }
        }
        closed
    }

    /// React to the active view mode: every marker whose home view is not
    /// `mode` is reset to idle and closed. Returns how many panels closed.
    pub fn observe_mode(&mut self, mode: ViewMode) -> usize {
        let closed = self.close_all(|entity| entity.home != mode);
        for slot in &mut self.slots {
            if slot.entity.home != mode {
                slot.state.hovered = false;
            }
        }
        if closed > 0 {
            tracing::debug!(?mode, closed, "closed markers outside active view");
        }
        closed
    }

    /// Current state of a marker.
    pub fn state(&self, id: &str) -> Result<MarkerUiState> {
        Ok(self.slot(id)?.state)
    }

    /// The entity mounted under `id`.
    pub fn entity(&self, id: &str) -> Result<&MarkerEntity> {
        Ok(&self.slot(id)?.entity)
    }

    /// Display scale: [`EMPHASIS_SCALE`] when hovered or open, else 1.
    pub fn emphasis(&self, id: &str) -> Result<f32> {
        let state = self.state(id)?;
        Ok(if state.hovered || state.open {
            EMPHASIS_SCALE
        } else {
            1.0
        })
    }

    /// Markers with an open panel, in mount order.
    pub fn open_markers(&self) -> impl Iterator<Item = &MarkerEntity> {
        self.slots
            .iter()
            .filter(|slot| slot.state.open)
            .map(|slot| &slot.entity)
    }

    /// All markers and their state, in mount order.
    pub fn iter(&self) -> impl Iterator<Item = (&MarkerEntity, MarkerUiState)> {
        self.slots.iter().map(|slot| (&slot.entity, slot.state))
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| SceneError::UnknownMarker { id: id.to_owned() })
    }

    fn slot(&self, id: &str) -> Result<&Slot> {
        let i = self.position(id)?;
        Ok(&self.slots[i])
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut Slot> {
        let i = self.position(id)?;
        Ok(&mut self.slots[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::all_markers;

    fn system() -> MarkerSystem {
        MarkerSystem::with_markers(all_markers())
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut markers = system();
        let before = markers.state("electrolyzer").unwrap();
        assert!(markers.toggle_open("electrolyzer").unwrap());
        assert!(!markers.toggle_open("electrolyzer").unwrap());
        assert_eq!(markers.state("electrolyzer").unwrap(), before);
    }

    #[test]
    fn test_open_states_are_independent() {
        let mut markers = system();
        markers.toggle_open("h2-farm").unwrap();
        markers.toggle_open("refuel-truck").unwrap();
        let open: Vec<_> = markers.open_markers().map(|m| m.id.as_str()).collect();
        assert_eq!(open, ["h2-farm", "refuel-truck"]);
    }

    #[test]
    fn test_leaving_airport_closes_airport_markers() {
        let mut markers = system();
        markers.toggle_open("h2-farm").unwrap();
        markers.toggle_open("electrolyzer").unwrap();
        markers.set_hover("refuel-truck", true).unwrap();

        assert_eq!(markers.observe_mode(ViewMode::Global), 2);
        for (entity, state) in markers.iter() {
            if entity.home == ViewMode::Airport {
                assert_eq!(state, MarkerUiState::default(), "{}", entity.id);
            }
        }
    }

    #[test]
    fn test_staying_in_airport_keeps_markers_open() {
        let mut markers = system();
        markers.toggle_open("h2-farm").unwrap();
        assert_eq!(markers.observe_mode(ViewMode::Airport), 0);
        assert!(markers.state("h2-farm").unwrap().open);
    }

    #[test]
    fn test_emphasis() {
        let mut markers = system();
        assert!((markers.emphasis("LHR").unwrap() - 1.0).abs() < f32::EPSILON);
        markers.set_hover("LHR", true).unwrap();
        assert!((markers.emphasis("LHR").unwrap() - EMPHASIS_SCALE).abs() < f32::EPSILON);
        markers.set_hover("LHR", false).unwrap();
        markers.toggle_open("LHR").unwrap();
        assert!((markers.emphasis("LHR").unwrap() - EMPHASIS_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_marker() {
        let mut markers = system();
        assert_eq!(
            markers.toggle_open("nope"),
            Err(SceneError::UnknownMarker {
                id: "nope".to_owned()
            })
        );
        assert!(markers.set_hover("nope", true).is_err());
        assert!(markers.emphasis("nope").is_err());
    }

    #[test]
    fn test_unmount_keeps_index_consistent() {
        let mut markers = system();
        let removed = markers.unmount("h2-farm").unwrap();
        assert_eq!(removed.id, "h2-farm");
        assert_eq!(markers.len(), 5);
        assert!(markers.state("h2-farm").is_err());
        assert!(markers.toggle_open("DXB").unwrap());
        assert_eq!(markers.entity("DXB").unwrap().label, "Dubai Int.");
    }

    #[test]
    fn test_remount_resets_state() {
        let mut markers = system();
        markers.toggle_open("TLS").unwrap();
        let entity = markers.entity("TLS").unwrap().clone();
        markers.mount(entity);
        assert_eq!(markers.len(), 6);
        assert!(!markers.state("TLS").unwrap().open);
    }
}
