use std::{
    collections::BTreeMap,
    io::Write as _,
    path::Path,
    process::{Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{SlideSyncError, SlideSyncResult},
    narration::slide::Slide,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Entities and relations reported by the external text-understanding service.
pub struct ExtractionResult {
    /// Named system components.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Relations between components, by component name.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One extracted component.
pub struct Component {
    /// Display name, slugified into a node id.
    pub name: String,
    /// Component type (`storage`, `compute`, `platform`, `service`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One extracted relation.
pub struct Relation {
    /// Source component name.
    pub from: String,
    /// Target component name.
    pub to: String,
    /// Relation label (`contains`, `flows_to`, `uses`). Not drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl ExtractionResult {
    /// Decode an extractor response, treating anything malformed as an empty result.
    pub fn from_json_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "malformed extraction response; using empty result");
                Self::default()
            }
        }
    }

    /// Decode an already-parsed JSON value with the same leniency.
    pub fn from_value_lenient(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(raw) => Self::from_json_lenient(&raw),
            other => match serde_json::from_value::<Self>(other) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed extraction response; using empty result");
                    Self::default()
                }
            },
        }
    }

    /// `true` when no components were reported.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Source of per-slide entities and relations.
///
/// Implementations may fail freely. The pipeline logs the failure and continues with an empty
/// result, which ends in the fallback plan.
pub trait EntityExtractor: Send + Sync {
    /// Extract components and relations from one slide's narration.
    fn extract(&self, slide: &Slide) -> anyhow::Result<ExtractionResult>;
}

/// Extractor that never reports anything. Every slide gets the fallback plan.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExtraction;

impl EntityExtractor for NoExtraction {
    fn extract(&self, _slide: &Slide) -> anyhow::Result<ExtractionResult> {
        Ok(ExtractionResult::default())
    }
}

/// Responses captured ahead of time, keyed by slide index.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedExtraction {
    by_slide: BTreeMap<usize, ExtractionResult>,
}

impl PrecomputedExtraction {
    /// Wrap an existing map.
    pub fn new(by_slide: BTreeMap<usize, ExtractionResult>) -> Self {
        Self { by_slide }
    }

    /// Parse `{ "<slide index>": <response object or raw response string>, ... }`.
    ///
    /// Keys must be slide indices. Individual responses are decoded leniently.
    pub fn from_json_str(s: &str) -> SlideSyncResult<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(s)?;
        let mut by_slide = BTreeMap::new();
        for (key, value) in raw {
            let idx: usize = key.trim().parse().map_err(|_| {
                SlideSyncError::validation(format!(
                    "extraction key '{key}' is not a slide index"
                ))
            })?;
            by_slide.insert(idx, ExtractionResult::from_value_lenient(value));
        }
        Ok(Self { by_slide })
    }

    /// Load from a JSON file (see [`PrecomputedExtraction::from_json_str`]).
    pub fn from_path(path: &Path) -> SlideSyncResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read extraction file '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

impl EntityExtractor for PrecomputedExtraction {
    fn extract(&self, slide: &Slide) -> anyhow::Result<ExtractionResult> {
        Ok(self.by_slide.get(&slide.index).cloned().unwrap_or_default())
    }
}

/// Runs an external program per slide: the body goes to stdin, the JSON response is read from
/// stdout.
#[derive(Clone, Debug)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    /// Configure the program and its fixed arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl EntityExtractor for CommandExtractor {
    fn extract(&self, slide: &Slide) -> anyhow::Result<ExtractionResult> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn extractor '{}'", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .context("extractor stdin unavailable")?;
        stdin
            .write_all(slide.body_text.as_bytes())
            .context("write slide text to extractor")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .context("wait for extractor to finish")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "extractor '{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        Ok(ExtractionResult::from_json_lenient(
            &String::from_utf8_lossy(&output.stdout),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/extract.rs"]
mod tests;
