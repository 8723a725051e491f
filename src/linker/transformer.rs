use crate::linker::config::LinkerConfig;
use crate::linker::envelope;
use crate::linker::error::Result;
use crate::linker::extract;
use crate::linker::resolve;
use crate::linker::types::{is_falsy, Object, META_FIELD};
use serde_json::Value;

/// Links and embeds objects according to a [`LinkerConfig`]
#[derive(Debug, Clone, Default)]
pub struct JsonLinker {
    config: LinkerConfig,
}

impl JsonLinker {
    pub fn new(config: LinkerConfig) -> Self {
        JsonLinker { config }
    }

    /// Add relations to link, keeping those already configured
    pub fn link<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.relations(relations);
        self
    }

    /// Set the envelope root attribute
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.config = self.config.with_root(root);
        self
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Copy of `model` with the configured relations replaced by links
    pub fn links(&self, model: Option<&Object>) -> Result<Option<Object>> {
        extract::extract_links(model, self.config.relations.as_slice())
    }

    /// Side-table of the configured relations of `model`
    pub fn linked(&self, model: Option<&Object>) -> Result<Option<Object>> {
        extract::extract_linked(model, self.config.relations.as_slice())
    }

    /// Copy of `model` with its links resolved against `linked`
    pub fn resolve(&self, model: Option<&Object>, linked: Option<&Object>) -> Result<Option<Object>> {
        resolve::resolve_links(model, linked)
    }

    /// Wrap `model` into an envelope under the configured root
    pub fn to_envelope(&self, model: Option<&Object>) -> Result<Option<Object>> {
        envelope::to_envelope(model, self.config.relations.as_slice(), &self.config.root_attribute)
    }

    /// Wrap `model` into an envelope and attach `meta` to it, unless `meta` is falsy
    pub fn to_envelope_with_meta(&self, model: Option<&Object>, meta: Value) -> Result<Option<Object>> {
        let mut envelope = self.to_envelope(model)?;

        if let Some(envelope) = envelope.as_mut() {
            if !is_falsy(&meta) {
                envelope.insert(META_FIELD.to_string(), meta);
            }
        }

        Ok(envelope)
    }

    /// Unwrap an envelope into an embedded model, reading the configured root
    pub fn from_envelope(&self, envelope: Option<&Object>) -> Result<Option<Object>> {
        envelope::from_envelope(envelope, &self.config.root_attribute)
    }
}
