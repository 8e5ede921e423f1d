//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording was made.
    pub recorded_at: DateTime<Utc>,
    /// Source revision the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording, starting at 0.
    pub seq: u64,
    /// Port name (e.g., `"image_provider"`).
    pub port: String,
    /// Method name (e.g., `"request_image"`).
    pub method: String,
    /// Call input; `null` for methods without arguments.
    #[serde(default)]
    pub input: serde_json::Value,
    /// `{Ok: ...}` or `{Err: ...}`.
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_without_input() {
        let yaml = r"
name: denied
recorded_at: 2026-02-01T00:00:00Z
commit: test
interactions:
  - seq: 0
    port: image_provider
    method: request_image
    output:
      Err:
        kind: permission_denied
";
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.interactions.len(), 1);
        let interaction = &cassette.interactions[0];
        assert!(interaction.input.is_null());
        assert_eq!(interaction.output["Err"]["kind"], "permission_denied");
    }
}
