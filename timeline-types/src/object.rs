use crate::instant::Timestamp;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of a domain object, used by renderers to match
/// highlighted or selected objects against what they have drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The temporal kind of a domain object.
///
/// Exactly one kind per object. `Untimed` objects carry no temporal data and
/// are skipped by every range and bin computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeTag {
    /// One or more exact dates. Only the first date takes part in range
    /// computations.
    Exact { dates: SmallVec<[Timestamp; 1]> },
    /// An uncertain date somewhere between `begin` and `end`.
    FuzzySpan { begin: Timestamp, end: Timestamp },
    #[default]
    Untimed,
}

impl TimeTag {
    pub fn exact(date: Timestamp) -> Self {
        let mut dates = SmallVec::new();
        dates.push(date);
        TimeTag::Exact { dates }
    }

    pub fn exact_many<I: IntoIterator<Item = Timestamp>>(dates: I) -> Self {
        TimeTag::Exact {
            dates: dates.into_iter().collect(),
        }
    }

    /// A fuzzy span. Bounds are stored as given; inverted spans are rejected
    /// when the collection is loaded.
    pub fn fuzzy(begin: Timestamp, end: Timestamp) -> Self {
        TimeTag::FuzzySpan { begin, end }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, TimeTag::Exact { .. })
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, TimeTag::FuzzySpan { .. })
    }

    pub fn is_untimed(&self) -> bool {
        matches!(self, TimeTag::Untimed)
    }
}

/// A record shown on the timeline.
///
/// The engine only reads `time`; `id` and `label` are carried through to
/// listeners untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    #[serde(default)]
    pub id: ObjectId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub time: TimeTag,
}

impl DataObject {
    pub fn new(label: impl Into<String>, time: TimeTag) -> Self {
        Self {
            id: ObjectId::new(),
            label: label.into(),
            time,
        }
    }

    pub fn exact(label: impl Into<String>, date: Timestamp) -> Self {
        Self::new(label, TimeTag::exact(date))
    }

    pub fn fuzzy(label: impl Into<String>, begin: Timestamp, end: Timestamp) -> Self {
        Self::new(label, TimeTag::fuzzy(begin, end))
    }

    pub fn untimed(label: impl Into<String>) -> Self {
        Self::new(label, TimeTag::Untimed)
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }
}

/// An ordered sequence of domain objects.
///
/// Objects are shared through `Arc` so that derived datasets (visible subsets,
/// query results) point at the same records instead of copying them.
///
/// # Examples
///
/// ```
/// use timeline_types::object::{DataObject, Dataset};
/// use timeline_types::instant::Timestamp;
///
/// let dataset = Dataset::from_objects(
///     "letters",
///     vec![
///         DataObject::exact("first", Timestamp::from_ymd(1780, 3, 2).unwrap()),
///         DataObject::untimed("undated"),
///     ],
/// );
/// assert_eq!(dataset.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub objects: Vec<Arc<DataObject>>,
}

impl Dataset {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            objects: Vec::new(),
        }
    }

    pub fn from_objects<I>(label: impl Into<String>, objects: I) -> Self
    where
        I: IntoIterator<Item = DataObject>,
    {
        Self {
            label: label.into(),
            objects: objects.into_iter().map(Arc::new).collect(),
        }
    }

    /// A dataset with the same label holding the given shared objects.
    pub fn derive(&self, objects: Vec<Arc<DataObject>>) -> Self {
        Self {
            label: self.label.clone(),
            objects,
        }
    }

    pub fn push(&mut self, object: DataObject) {
        self.objects.push(Arc::new(object));
    }

    pub fn push_shared(&mut self, object: Arc<DataObject>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<DataObject>> {
        self.objects.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Arc<DataObject>;
    type IntoIter = std::slice::Iter<'a, Arc<DataObject>>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
