//! Offline view snapshots.
//!
//! A snapshot is a JSON dump of the views a server would return for a set of
//! models. It stands in for a live connection in the CLI and in tests:
//!
//! ```json
//! { "name": "demo",
//!   "models": { "sale.order": [
//!     { "module": "sale", "name": "view_order_form", "type": "form",
//!       "arch": "<form>...</form>", "fields": {} } ] } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SnapshotError;
use crate::fetcher::ViewFetcher;
use crate::types::{FetchedView, QualifiedViewName, ViewDescriptor, ViewKind};

/// One stored view definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotView {
    pub module: String,
    pub name: String,
    #[serde(rename = "type")]
    pub view_type: String,
    #[serde(flatten)]
    pub descriptor: ViewDescriptor,
}

impl SnapshotView {
    pub fn qualified_name(&self) -> QualifiedViewName {
        QualifiedViewName::new(self.module.clone(), self.name.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub models: BTreeMap<String, Vec<SnapshotView>>,
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Model names in sorted order.
    pub fn model_names(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    /// Append the views of `other`; models present in both keep their views
    /// followed by the other snapshot's.
    pub fn absorb(&mut self, other: Snapshot) {
        if self.name.is_none() {
            self.name = other.name;
        }
        for (model, views) in other.models {
            self.models.entry(model).or_default().extend(views);
        }
    }
}

impl ViewFetcher for Snapshot {
    type Error = SnapshotError;

    fn fetch_views(&self, model: &str) -> Result<Vec<FetchedView>, Self::Error> {
        let views = self
            .models
            .get(model)
            .ok_or_else(|| SnapshotError::UnknownModel(model.to_string()))?;

        Ok(views
            .iter()
            .filter(|v| ViewKind::from_type(&v.view_type).is_some())
            .map(|v| FetchedView {
                name: v.qualified_name(),
                descriptor: v.descriptor.clone(),
            })
            .collect())
    }
}
