//! Discrete view modes and propulsion types.

use crate::geometry::Rgb;

/// The semantic zoom level currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// A single aircraft.
    Aircraft,
    /// An airport's ground infrastructure.
    #[default]
    Airport,
    /// The global route network.
    Global,
}

impl ViewMode {
    /// All view modes in scrubber order (micro to macro).
    pub const ALL: [ViewMode; 3] = [ViewMode::Aircraft, ViewMode::Airport, ViewMode::Global];

    /// Label shown on the view-step scrubber.
    pub fn step_label(self) -> &'static str {
        match self {
            Self::Aircraft => "MICRO: ARCHITECTURE",
            Self::Airport => "MESO: INFRASTRUCTURE",
            Self::Global => "MACRO: NETWORK",
        }
    }

    /// Position of this mode in [`ViewMode::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Aircraft => 0,
            Self::Airport => 1,
            Self::Global => 2,
        }
    }

    /// The next mode towards the macro end, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The next mode towards the micro end, if any.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Fuel or energy source of the visualized aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropulsionType {
    #[default]
    Kerosene,
    Saf,
    LiquidH2,
    Electric,
}

/// Visual and morphological parameters of a propulsion type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionConfig {
    /// Engine glow color.
    pub color: Rgb,
    /// Emission intensity of the engine glow.
    pub emission: f32,
    /// Shape interpolation factor in `[0, 1]`.
    pub morph_factor: f32,
}

impl PropulsionType {
    /// All propulsion types in selector order.
    pub const ALL: [PropulsionType; 4] = [
        PropulsionType::Kerosene,
        PropulsionType::Saf,
        PropulsionType::LiquidH2,
        PropulsionType::Electric,
    ];

    /// Human-readable label, also embedded in schematic prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Kerosene => "Kerosene (Jet A-1)",
            Self::Saf => "Sustainable Aviation Fuel",
            Self::LiquidH2 => "Liquid Hydrogen (LH2)",
            Self::Electric => "Battery Electric",
        }
    }

    /// The static configuration for this propulsion type.
    pub fn config(self) -> PropulsionConfig {
        match self {
            Self::Kerosene => PropulsionConfig {
                color: Rgb::new(0xfb, 0xbf, 0x24),
                emission: 0.1,
                morph_factor: 0.0,
            },
            Self::Saf => PropulsionConfig {
                color: Rgb::new(0x4a, 0xde, 0x80),
                emission: 0.3,
                morph_factor: 0.2,
            },
            Self::LiquidH2 => PropulsionConfig {
                color: Rgb::new(0x00, 0xf3, 0xff),
                emission: 0.8,
                morph_factor: 1.0,
            },
            Self::Electric => PropulsionConfig {
                color: Rgb::new(0xa7, 0x8b, 0xfa),
                emission: 0.6,
                morph_factor: 0.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrubber_order() {
        assert_eq!(ViewMode::Aircraft.next(), Some(ViewMode::Airport));
        assert_eq!(ViewMode::Airport.next(), Some(ViewMode::Global));
        assert_eq!(ViewMode::Global.next(), None);
        assert_eq!(ViewMode::Aircraft.previous(), None);
        assert_eq!(ViewMode::Global.previous(), Some(ViewMode::Airport));
    }

    #[test]
    fn test_morph_factors_in_unit_range() {
        for propulsion in PropulsionType::ALL {
            let morph = propulsion.config().morph_factor;
            assert!((0.0..=1.0).contains(&morph), "{propulsion:?} morph {morph}");
        }
    }

    #[test]
    fn test_hydrogen_is_fully_morphed() {
        let config = PropulsionType::LiquidH2.config();
        assert!((config.morph_factor - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.color, Rgb::new(0x00, 0xf3, 0xff));
    }
}
