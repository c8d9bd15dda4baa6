//! Payload deserialization structs

use serde::Deserialize;

/// Fragment payload sent for every token.
///
/// Only `p` carries the fragment; any other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FragmentPayload {
    #[serde(default)]
    pub p: Option<String>,
}
