//! Sources of view descriptors.
//!
//! The scanner never talks to a server itself. A [`ViewFetcher`] hands it the
//! views of a model; [`RemoteViewFetcher`] builds one on top of the three
//! remote calls an ERP object service exposes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalogs::{MODEL_DATA_FIELDS, MODEL_DATA_MODEL, VIEW_MODEL};
use crate::error::RemoteFetchError;
use crate::types::{FetchedView, QualifiedViewName, ViewDescriptor, ViewKind};

/// Hands out the form and tree views of a model, in listing order.
pub trait ViewFetcher {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_views(&self, model: &str) -> Result<Vec<FetchedView>, Self::Error>;
}

/// Database id of a remote record.
pub type RecordId = i64;

/// A record as returned by `read`.
pub type Record = serde_json::Map<String, Value>;

/// One `(field, operator, value)` search criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion(pub String, pub String, pub Value);

/// Search domain: criteria implicitly joined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(pub Vec<Criterion>);

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.0
            .push(Criterion(field.to_string(), operator.to_string(), value.into()));
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.0
    }
}

/// The remote object API: generic search/read plus view compilation.
pub trait ObjectService {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search(&self, model: &str, domain: &Domain) -> Result<Vec<RecordId>, Self::Error>;

    fn read(
        &self,
        model: &str,
        ids: &[RecordId],
        fields: &[&str],
    ) -> Result<Vec<Record>, Self::Error>;

    /// Compiled descriptor (`arch` + field metadata) of view `view_id` of `model`.
    fn fields_view_get(&self, model: &str, view_id: RecordId)
        -> Result<ViewDescriptor, Self::Error>;
}

#[derive(Debug, Deserialize)]
struct ModelData {
    name: String,
    module: String,
    res_id: RecordId,
}

/// [`ViewFetcher`] backed by a live [`ObjectService`].
///
/// Views are looked up in `ir.ui.view`, qualified through their
/// `ir.model.data` external id and compiled one at a time.
pub struct RemoteViewFetcher<S> {
    service: S,
}

impl<S: ObjectService> RemoteViewFetcher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

impl<S: ObjectService> ViewFetcher for RemoteViewFetcher<S> {
    type Error = RemoteFetchError<S::Error>;

    fn fetch_views(&self, model: &str) -> Result<Vec<FetchedView>, Self::Error> {
        let kinds: Vec<&str> = ViewKind::SCANNED.iter().map(|k| k.as_str()).collect();
        let view_domain = Domain::new()
            .with("model", "=", model)
            .with("type", "in", kinds);
        let view_ids = self
            .service
            .search(VIEW_MODEL, &view_domain)
            .map_err(RemoteFetchError::Service)?;

        let data_domain = Domain::new()
            .with("res_id", "in", view_ids.clone())
            .with("model", "=", VIEW_MODEL);
        let data_ids = self
            .service
            .search(MODEL_DATA_MODEL, &data_domain)
            .map_err(RemoteFetchError::Service)?;
        let records = self
            .service
            .read(MODEL_DATA_MODEL, &data_ids, &MODEL_DATA_FIELDS)
            .map_err(RemoteFetchError::Service)?;
        debug!(
            model,
            views = view_ids.len(),
            qualified = records.len(),
            "listed remote views"
        );

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let data: ModelData = serde_json::from_value(Value::Object(record)).map_err(
                |source| RemoteFetchError::InvalidRecord {
                    model: MODEL_DATA_MODEL,
                    source,
                },
            )?;
            let descriptor = self
                .service
                .fields_view_get(model, data.res_id)
                .map_err(RemoteFetchError::Service)?;
            views.push(FetchedView {
                name: QualifiedViewName::new(data.module, data.name),
                descriptor,
            });
        }

        Ok(views)
    }
}
