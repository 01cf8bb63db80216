//! Launch parameters for the viewer.
//!
//! On native, parameters come from command-line arguments via clap.
//! On WASM, defaults are used.

use aeroscope_scene::{PropulsionType, ViewMode};
use bevy::prelude::*;

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    /// Initial view mode.
    pub mode: ViewMode,
    /// Initial propulsion type.
    pub propulsion: PropulsionType,
    /// Start with cinema camera motion enabled.
    pub cinema: bool,
}

/// Parse a view mode name.
///
/// Accepts the mode names and the scrubber's zoom-level names.
pub fn parse_mode(s: &str) -> Result<ViewMode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "aircraft" | "micro" => Ok(ViewMode::Aircraft),
        "airport" | "meso" => Ok(ViewMode::Airport),
        "global" | "globe" | "macro" => Ok(ViewMode::Global),
        other => Err(format!(
            "unknown view mode '{other}', expected aircraft, airport or global"
        )),
    }
}

/// Parse a propulsion type name.
pub fn parse_propulsion(s: &str) -> Result<PropulsionType, String> {
    match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "kerosene" | "jet_a_1" => Ok(PropulsionType::Kerosene),
        "saf" => Ok(PropulsionType::Saf),
        "liquid_h2" | "lh2" | "hydrogen" => Ok(PropulsionType::LiquidH2),
        "electric" | "battery" => Ok(PropulsionType::Electric),
        other => Err(format!(
            "unknown propulsion '{other}', expected kerosene, saf, liquid-h2 or electric"
        )),
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "Interactive aircraft, airport and route-network viewer")]
    pub(super) struct CliArgs {
        /// Initial view mode (aircraft, airport, global).
        #[arg(long, value_parser = parse_mode, default_value = "airport")]
        pub mode: ViewMode,

        /// Initial propulsion type (kerosene, saf, liquid-h2, electric).
        #[arg(long, value_parser = parse_propulsion, default_value = "kerosene")]
        pub propulsion: PropulsionType,

        /// Start with cinema camera motion enabled.
        #[arg(long)]
        pub cinema: bool,
    }

    impl From<CliArgs> for LaunchParams {
        fn from(args: CliArgs) -> Self {
            LaunchParams {
                mode: args.mode,
                propulsion: args.propulsion,
                cinema: args.cinema,
            }
        }
    }

    pub fn parse() -> LaunchParams {
        CliArgs::parse().into()
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
