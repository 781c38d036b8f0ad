use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use super::Value;

/// The parameter lookup an expression is evaluated against.
///
/// Implement this for any attribute source; the evaluator only asks for
/// names it meets as variable references, in source order. Sources that
/// store their values hand out borrows; sources that compute them return
/// them owned.
pub trait Params {
    /// Resolve `name`, or `None` if the source has no such parameter.
    fn get(&self, name: &str) -> Option<Cow<'_, Value>>;
}

/// A map-backed parameter set.
///
/// ```
/// use rulexp::MapParams;
///
/// let params = MapParams::new()
///     .set("gender", "female")
///     .set("age", 55_i64)
///     .set("region", vec![1_i64, 2, 3]);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapParams {
    data: HashMap<String, Value>,
}

impl MapParams {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Insert a parameter (mutable reference version).
    pub fn insert(&mut self, name: &str, value: Value) {
        self.data.insert(name.to_owned(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Params for MapParams {
    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.data.get(name).map(Cow::Borrowed)
    }
}

impl Params for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        HashMap::get(self, name).map(Cow::Borrowed)
    }
}

impl Params for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        BTreeMap::get(self, name).map(Cow::Borrowed)
    }
}

/// No parameters at all: every variable reference is unresolved.
impl Params for () {
    fn get(&self, _name: &str) -> Option<Cow<'_, Value>> {
        None
    }
}

impl<T: Params + ?Sized> Params for &T {
    fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).get(name)
    }
}
