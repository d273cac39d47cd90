use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;
use crate::options::DiffOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffSettings {
    #[serde(default)]
    pub options: DiffOptions,
    #[serde(default)]
    pub alignment: AlignmentSettings,
    #[serde(default)]
    pub merge: MergeSettings,
}

/// Which aligner turns unmatched sections into element operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentStrategy {
    InsertDelete,
    ReplaceInsertDelete,
    #[default]
    StringSimilarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentSettings {
    #[serde(default)]
    pub strategy: AlignmentStrategy,
    #[serde(default = "default_modification_threshold")]
    pub modification_threshold: f64,
}

impl Default for AlignmentSettings {
    fn default() -> Self {
        Self {
            strategy: AlignmentStrategy::default(),
            modification_threshold: default_modification_threshold(),
        }
    }
}

/// How the merge engine settles a genuine conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    TakeLeft,
    TakeRight,
    #[default]
    TakeLeftThenRight,
    TakeRightThenLeft,
    TakeLeftThenRightIfDifferent,
    Markers,
    Abort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSettings {
    #[serde(default)]
    pub conflict_strategy: ConflictStrategy,
}

fn default_modification_threshold() -> f64 {
    0.3333
}

impl DiffSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: DiffSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::debug!(
            path = %path.display(),
            strategy = ?settings.alignment.strategy,
            conflict_strategy = ?settings.merge.conflict_strategy,
            "loaded diff settings"
        );
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!(path = %path.display(), "saved diff settings");
        Ok(())
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        let threshold = self.alignment.modification_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        DiffOptions::new(
            self.options.enable_patience_optimization(),
            self.options.context_size(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: DiffSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, DiffSettings::default());
        assert_eq!(settings.alignment.strategy, AlignmentStrategy::StringSimilarity);
        assert_eq!(settings.alignment.modification_threshold, 0.3333);
        assert_eq!(
            settings.merge.conflict_strategy,
            ConflictStrategy::TakeLeftThenRight
        );
    }

    #[test]
    fn test_kebab_case_strategies() {
        let settings: DiffSettings = serde_json::from_str(
            r#"{
                "options": {"enablePatienceOptimization": false},
                "alignment": {"strategy": "replace-insert-delete"},
                "merge": {"conflictStrategy": "take-left-then-right-if-different"}
            }"#,
        )
        .unwrap();
        assert!(!settings.options.enable_patience_optimization());
        assert_eq!(
            settings.alignment.strategy,
            AlignmentStrategy::ReplaceInsertDelete
        );
        assert_eq!(
            settings.merge.conflict_strategy,
            ConflictStrategy::TakeLeftThenRightIfDifferent
        );
    }

    #[test]
    fn test_keys_are_camel_case_throughout() {
        let json = serde_json::to_value(DiffSettings::default()).unwrap();
        assert!(json["options"].get("enablePatienceOptimization").is_some());
        assert!(json["options"].get("contextSize").is_some());
        assert!(json["alignment"].get("modificationThreshold").is_some());
        assert!(json["merge"].get("conflictStrategy").is_some());

        let settings: DiffSettings =
            serde_json::from_str(r#"{"alignment": {"modificationThreshold": 0.5}, "merge": {"conflictStrategy": "abort"}}"#)
                .unwrap();
        assert_eq!(settings.alignment.modification_threshold, 0.5);
        assert_eq!(settings.merge.conflict_strategy, ConflictStrategy::Abort);
    }

    #[test]
    fn test_load_logs_the_settings_path() {
        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqdiff.json");
        DiffSettings::default().save(&path).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || DiffSettings::load(&path).unwrap());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("loaded diff settings"), "{}", output);
        assert!(output.contains("seqdiff.json"), "{}", output);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("seqdiff.json");

        let mut settings = DiffSettings::default();
        settings.options = DiffOptions::new(false, 3).unwrap();
        settings.merge.conflict_strategy = ConflictStrategy::Markers;
        settings.save(&path).unwrap();

        let loaded = DiffSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqdiff.json");
        std::fs::write(&path, r#"{"alignment": {"modificationThreshold": 1.5}}"#).unwrap();

        let err = DiffSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("modification threshold"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DiffSettings::load(&dir.path().join("missing.json")).is_err());
    }
}
