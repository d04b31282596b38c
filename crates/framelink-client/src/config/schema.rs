use serde::Deserialize;

use framelink_core::error::{FramelinkError, Result};

use crate::registry::DuplicatePolicy;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub queue: QueueSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FramelinkError::InvalidConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            registry: RegistrySection::default(),
            queue: QueueSection::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// What happens when a second player registers an already-held channel.
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueSection {
    /// Per-bucket depth at which the deferred queue logs a growth warning.
    /// 0 disables the diagnostic. The queue itself stays unbounded.
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: usize,
}

impl Default for QueueSection {
    fn default() -> Self {
        Self {
            warn_threshold: default_warn_threshold(),
        }
    }
}

fn default_warn_threshold() -> usize {
    64
}
