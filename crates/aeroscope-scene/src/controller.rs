//! View-mode and propulsion selection state.
//!
//! All mutation goes through [`ViewModeController`]. Setters are idempotent:
//! setting the current value again returns `None` and changes nothing.

use crate::mode::{PropulsionType, ViewMode};

/// A completed view-mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: ViewMode,
    pub to: ViewMode,
}

/// A completed propulsion selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropulsionChange {
    pub from: PropulsionType,
    pub to: PropulsionType,
}

/// Holds the active view mode, propulsion type and cinema toggle.
#[derive(Debug, Clone, Default)]
pub struct ViewModeController {
    mode: ViewMode,
    propulsion: PropulsionType,
    cinema: bool,
}

impl ViewModeController {
    /// Create a controller with explicit initial values.
    pub fn new(mode: ViewMode, propulsion: PropulsionType, cinema: bool) -> Self {
        Self {
            mode,
            propulsion,
            cinema,
        }
    }

    /// The active view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The selected propulsion type.
    pub fn propulsion(&self) -> PropulsionType {
        self.propulsion
    }

    /// Whether cinema camera motion is enabled.
    pub fn cinema(&self) -> bool {
        self.cinema
    }

    /// Switch to `mode`. Returns the transition, or `None` if already active.
    pub fn set_mode(&mut self, mode: ViewMode) -> Option<ModeChange> {
        if self.mode == mode {
            return None;
        }
        let change = ModeChange {
            from: self.mode,
            to: mode,
        };
        self.mode = mode;
        tracing::debug!(from = ?change.from, to = ?change.to, "view mode changed");
        Some(change)
    }

    /// Select `propulsion`. Returns the change, or `None` if already selected.
    pub fn set_propulsion(&mut self, propulsion: PropulsionType) -> Option<PropulsionChange> {
        if self.propulsion == propulsion {
            return None;
        }
        let change = PropulsionChange {
            from: self.propulsion,
            to: propulsion,
        };
        self.propulsion = propulsion;
        tracing::debug!(from = ?change.from, to = ?change.to, "propulsion changed");
        Some(change)
    }

    /// Enable or disable cinema motion. Returns `true` if the value changed.
    pub fn set_cinema(&mut self, cinema: bool) -> bool {
        let changed = self.cinema != cinema;
        self.cinema = cinema;
        changed
    }

    /// Step the scrubber one mode towards the macro end.
    pub fn next_mode(&mut self) -> Option<ModeChange> {
        self.mode.next().and_then(|mode| self.set_mode(mode))
    }

    /// Step the scrubber one mode towards the micro end.
    pub fn previous_mode(&mut self) -> Option<ModeChange> {
        self.mode.previous().and_then(|mode| self.set_mode(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controller = ViewModeController::default();
        assert_eq!(controller.mode(), ViewMode::Airport);
        assert_eq!(controller.propulsion(), PropulsionType::Kerosene);
        assert!(!controller.cinema());
    }

    #[test]
    fn test_set_mode_is_idempotent() {
        let mut controller = ViewModeController::default();
        let change = controller.set_mode(ViewMode::Global);
        assert_eq!(
            change,
            Some(ModeChange {
                from: ViewMode::Airport,
                to: ViewMode::Global
            })
        );
        assert_eq!(controller.set_mode(ViewMode::Global), None);
        assert_eq!(controller.mode(), ViewMode::Global);
    }

    #[test]
    fn test_set_propulsion_is_idempotent() {
        let mut controller = ViewModeController::default();
        assert!(controller.set_propulsion(PropulsionType::LiquidH2).is_some());
        assert!(controller.set_propulsion(PropulsionType::LiquidH2).is_none());
        assert_eq!(controller.propulsion(), PropulsionType::LiquidH2);
    }

    #[test]
    fn test_scrubber_stops_at_ends() {
        let mut controller = ViewModeController::new(ViewMode::Aircraft, PropulsionType::Saf, false);
        assert!(controller.previous_mode().is_none());
        assert!(controller.next_mode().is_some());
        assert!(controller.next_mode().is_some());
        assert!(controller.next_mode().is_none());
        assert_eq!(controller.mode(), ViewMode::Global);
    }

    #[test]
    fn test_set_cinema_reports_change() {
        let mut controller = ViewModeController::default();
        assert!(controller.set_cinema(true));
        assert!(!controller.set_cinema(true));
        assert!(controller.cinema());
    }
}
