use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// View descriptors (as returned by the remote `fields_view_get`)
// ---------------------------------------------------------------------------

/// Compiled definition of a form/tree view: its markup plus the metadata of
/// the fields it displays. Relational fields may embed their own sub-views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub arch: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldMeta>,
}

/// Field metadata attached to a view descriptor. Only relational fields carry
/// a `relation`; only those embedding sub-views carry `views`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Nested views keyed by view kind (`form`, `tree`, sometimes others).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub views: BTreeMap<String, ViewDescriptor>,
}

impl FieldMeta {
    /// Nested view of the given kind, if the field embeds one.
    pub fn view(&self, kind: ViewKind) -> Option<&ViewDescriptor> {
        self.views.get(kind.as_str())
    }
}

/// View kinds the scanner looks at. Other kinds (search, graph, ...) are
/// tolerated in the data and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Form,
    Tree,
}

impl ViewKind {
    /// Scan order for nested views: form first, then tree.
    pub const SCANNED: [ViewKind; 2] = [ViewKind::Form, ViewKind::Tree];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Form => "form",
            ViewKind::Tree => "tree",
        }
    }

    pub fn from_type(view_type: &str) -> Option<Self> {
        match view_type {
            "form" => Some(ViewKind::Form),
            "tree" => Some(ViewKind::Tree),
            _ => None,
        }
    }
}

/// `<module>.<name>` pair uniquely naming a view definition on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedViewName {
    pub module: String,
    pub name: String,
}

impl QualifiedViewName {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// One view as handed over by a fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedView {
    pub name: QualifiedViewName,
    pub descriptor: ViewDescriptor,
}

// ---------------------------------------------------------------------------
// Trigger results (serialized to JSON)
// ---------------------------------------------------------------------------

/// Normalized `on_change` argument.
///
/// `True`/`False`/`None` become booleans and null; every other token is kept
/// as the literal text found in the attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Null,
    Str(String),
}

impl ArgValue {
    pub fn from_token(token: &str) -> Self {
        match token {
            "True" => ArgValue::Bool(true),
            "False" => ArgValue::Bool(false),
            "None" => ArgValue::Null,
            other => ArgValue::Str(other.to_string()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(true) => f.write_str("True"),
            ArgValue::Bool(false) => f.write_str("False"),
            ArgValue::Null => f.write_str("None"),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

/// Deduplicated string set that remembers insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` unless already present. Returns true when inserted.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.items.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Union keeping this set's order, then the new entries of `other`.
    pub fn extend_from(&mut self, other: &OrderedSet) {
        for value in other.iter() {
            self.insert(value);
        }
    }
}

impl From<Vec<String>> for OrderedSet {
    fn from(values: Vec<String>) -> Self {
        let mut set = OrderedSet::new();
        for value in &values {
            set.insert(value);
        }
        set
    }
}

impl From<OrderedSet> for Vec<String> {
    fn from(set: OrderedSet) -> Self {
        set.items
    }
}

/// Everything known about one trigger function of one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Longest argument list seen so far.
    pub args: Vec<ArgValue>,
    pub fields: OrderedSet,
    pub views: OrderedSet,
}

impl TriggerSpec {
    /// Keep `args` if nothing is stored yet or it is strictly longer than the
    /// stored list. Returns true when the stored list was replaced.
    pub fn offer_args(&mut self, args: Vec<ArgValue>) -> bool {
        if self.args.is_empty() || args.len() > self.args.len() {
            self.args = args;
            return true;
        }
        false
    }

    pub fn merge(&mut self, other: &TriggerSpec) {
        self.fields.extend_from(&other.fields);
        self.views.extend_from(&other.views);
        self.offer_args(other.args.clone());
    }
}

/// Triggers of a single model keyed by function name.
pub type ModelTriggers = BTreeMap<String, TriggerSpec>;

/// model → function → trigger. Grows monotonically while views are scanned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMap(BTreeMap<String, ModelTriggers>);

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `model` has an entry, even if it ends up without triggers.
    pub fn ensure_model(&mut self, model: &str) -> &mut ModelTriggers {
        self.0.entry(model.to_string()).or_default()
    }

    /// Entry for `(model, function)`, created empty on first sight.
    pub fn trigger_mut(&mut self, model: &str, function: &str) -> &mut TriggerSpec {
        self.ensure_model(model)
            .entry(function.to_string())
            .or_default()
    }

    pub fn get(&self, model: &str, function: &str) -> Option<&TriggerSpec> {
        self.0.get(model).and_then(|triggers| triggers.get(function))
    }

    pub fn model(&self, model: &str) -> Option<&ModelTriggers> {
        self.0.get(model)
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelTriggers)> {
        self.0.iter().map(|(model, triggers)| (model.as_str(), triggers))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of (model, function) pairs.
    pub fn trigger_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Fold `other` into `self` with the same rules the scanner applies:
    /// longest args win (ties keep `self`), field/view sets are unioned.
    pub fn merge(&mut self, other: &ResultMap) {
        for (model, triggers) in &other.0 {
            let target = self.ensure_model(model);
            for (function, spec) in triggers {
                target.entry(function.clone()).or_default().merge(spec);
            }
        }
    }
}
