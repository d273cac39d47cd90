use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuning knobs for the section splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDiffOptions")]
pub struct DiffOptions {
    enable_patience_optimization: bool,
    context_size: usize,
}

impl DiffOptions {
    pub fn new(enable_patience_optimization: bool, context_size: usize) -> Result<Self> {
        if context_size == 0 {
            return Err(Error::InvalidContextSize(context_size));
        }
        Ok(Self {
            enable_patience_optimization,
            context_size,
        })
    }

    /// Trim matching prefixes and suffixes before running the LCS search.
    pub fn enable_patience_optimization(&self) -> bool {
        self.enable_patience_optimization
    }

    /// Minimum length a common run needs before it is used as an anchor.
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    pub fn with_patience_optimization(mut self, enabled: bool) -> Self {
        self.enable_patience_optimization = enabled;
        self
    }

    pub fn with_context_size(self, context_size: usize) -> Result<Self> {
        Self::new(self.enable_patience_optimization, context_size)
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            enable_patience_optimization: default_patience(),
            context_size: default_context_size(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiffOptions {
    #[serde(default = "default_patience")]
    enable_patience_optimization: bool,
    #[serde(default = "default_context_size")]
    context_size: usize,
}

impl TryFrom<RawDiffOptions> for DiffOptions {
    type Error = Error;

    fn try_from(raw: RawDiffOptions) -> Result<Self> {
        DiffOptions::new(raw.enable_patience_optimization, raw.context_size)
    }
}

fn default_patience() -> bool {
    true
}
fn default_context_size() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DiffOptions::default();
        assert!(options.enable_patience_optimization());
        assert_eq!(options.context_size(), 1);
    }

    #[test]
    fn test_zero_context_size_rejected() {
        assert_eq!(DiffOptions::new(true, 0), Err(Error::InvalidContextSize(0)));
        assert!(DiffOptions::default().with_context_size(0).is_err());
        assert_eq!(
            DiffOptions::default()
                .with_patience_optimization(false)
                .with_context_size(3)
                .unwrap(),
            DiffOptions::new(false, 3).unwrap()
        );
    }

    #[test]
    fn test_serde_camel_case_with_defaults() {
        let options: DiffOptions = serde_json::from_str(r#"{"contextSize": 2}"#).unwrap();
        assert!(options.enable_patience_optimization());
        assert_eq!(options.context_size(), 2);

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"enablePatienceOptimization\":true"));
    }

    #[test]
    fn test_deserialize_revalidates() {
        let result: std::result::Result<DiffOptions, _> =
            serde_json::from_str(r#"{"contextSize": 0}"#);
        assert!(result.is_err());
    }
}
