//! Build options.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Per-file fan-out used when `concurrency` is left at 0.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Upper bound on the per-file fan-out.
const MAX_CONCURRENCY: usize = usize::MAX >> 3;

/// Options governing what is measured and how it is displayed.
///
/// Every field carries a serde default, so deserializing a partial object
/// merges it over the defaults and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct SizeOptions {
    /// Compute and display the gzipped size next to the raw size.
    #[builder(default = "true")]
    pub gzipped: bool,

    /// Style the printed lines with terminal colors.
    #[builder(default = "true")]
    pub colors: bool,

    /// Maximum number of files measured at once (0 = auto).
    #[builder(default = "0")]
    pub concurrency: usize,
}

impl SizeOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(concurrency) = self.concurrency {
            if concurrency > MAX_CONCURRENCY {
                return Err(format!("Concurrency {concurrency} is too large"));
            }
        }
        Ok(())
    }
}

impl SizeOptions {
    /// Create a new options builder.
    pub fn builder() -> SizeOptionsBuilder {
        SizeOptionsBuilder::default()
    }

    /// Number of files that may be measured concurrently.
    pub fn effective_concurrency(&self) -> usize {
        match self.concurrency {
            0 => DEFAULT_CONCURRENCY,
            n => n.min(MAX_CONCURRENCY),
        }
    }
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            gzipped: true,
            colors: true,
            concurrency: 0,
        }
    }
}
