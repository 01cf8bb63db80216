//! Part schematics for the aeroscope viewer.
//!
//! Schematics come from a generative image provider when one is configured.
//! Any failure falls back to a deterministic local [`Blueprint`], so callers
//! always get something to show.
//!
//! # Example
//!
//! ```ignore
//! use aeroscope_schematic::{SchematicClient, resolve_schematic};
//!
//! let client = SchematicClient::from_env().ok();
//! let image = resolve_schematic(client.as_ref(), "ENG 1", "Liquid Hydrogen (LH2)").await;
//! ```

mod client;
mod error;
pub mod fallback;
mod prompt;

pub use client::{
    API_KEY_VARS, DEFAULT_MODEL, Schematic, SchematicClient, api_key_from_env, decode_response,
};
pub use error::{Error, Result};
pub use fallback::Blueprint;
pub use prompt::schematic_prompt;

/// What the inspect panel shows for a part.
#[derive(Debug, Clone, PartialEq)]
pub enum SchematicImage {
    /// An image from the provider.
    Generated(Schematic),
    /// The local blueprint, used when generation is unavailable.
    Fallback(Blueprint),
}

impl SchematicImage {
    /// The image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        match self {
            Self::Generated(schematic) => schematic.to_data_url(),
            Self::Fallback(blueprint) => blueprint.to_data_url(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Try to generate a schematic, returning `None` on any failure.
///
/// A missing client counts as a missing API key. Failures are logged.
pub async fn generate_schematic(
    client: Option<&SchematicClient>,
    part: &str,
    propulsion: &str,
) -> Option<Schematic> {
    let result = match client {
        Some(client) => client.generate(part, propulsion).await,
        None => Err(Error::MissingApiKey),
    };
    match result {
        Ok(schematic) => {
            tracing::info!(part, mime_type = %schematic.mime_type, "schematic generated");
            Some(schematic)
        }
        Err(e) => {
            tracing::warn!(part, "schematic generation unavailable: {e}");
            None
        }
    }
}

/// Generate a schematic, substituting the local blueprint on failure.
pub async fn resolve_schematic(
    client: Option<&SchematicClient>,
    part: &str,
    propulsion: &str,
) -> SchematicImage {
    match generate_schematic(client, part, propulsion).await {
        Some(schematic) => SchematicImage::Generated(schematic),
        None => SchematicImage::Fallback(Blueprint::fallback(part, propulsion)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_client_yields_none() {
        assert_eq!(generate_schematic(None, "ENG 1", "SAF").await, None);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_blueprint() {
        let image = resolve_schematic(None, "ENG 2", "Liquid Hydrogen (LH2)").await;
        assert!(image.is_fallback());
        assert_eq!(
            image,
            SchematicImage::Fallback(Blueprint::fallback("ENG 2", "Liquid Hydrogen (LH2)"))
        );
        assert!(image.to_data_url().starts_with("data:image/svg+xml;utf8,"));
    }

    #[test]
    fn test_generated_data_url() {
        let image = SchematicImage::Generated(Schematic {
            mime_type: "image/jpeg".to_owned(),
            data: vec![1, 2, 3],
        });
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,AQID");
        assert!(!image.is_fallback());
    }
}
