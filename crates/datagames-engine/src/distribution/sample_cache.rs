use std::{collections::HashMap, ops::Deref, sync::Arc};

use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use super::Family;

/// The values drawn from one family for one requested sample count.
///
/// Cloning is cheap: clones share the same immutable values.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    family: Family,
    requested_count: usize,
    values: Arc<[f64]>,
}

impl SampleSet {
    pub(crate) fn new(family: Family, requested_count: usize, values: Vec<f64>) -> Self {
        Self {
            family,
            requested_count,
            values: values.into(),
        }
    }

    /// Returns the family the values were drawn from.
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the sample count the set was requested with.
    ///
    /// This can exceed the number of values for families whose draws are
    /// post-filtered.
    #[must_use]
    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    /// Returns the drawn values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for SampleSet {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl Serialize for SampleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("SampleSet", 3)?;
        state.serialize_field("family", &self.family)?;
        state.serialize_field("requested_count", &self.requested_count)?;
        state.serialize_field("values", &*self.values)?;
        state.end()
    }
}

/// Memoises sample sets by `(family, requested count)`.
///
/// The first request for a key stores the result of the supplied draw; every
/// later request for the same key returns the stored values unchanged.
/// Entries for different counts are independent.
#[derive(Debug, Clone, Default)]
pub struct SampleCache {
    entries: HashMap<(Family, usize), SampleSet>,
}

impl SampleCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored set for `(family, count)`, drawing and storing it
    /// with `draw` on a miss.
    pub fn get_or_insert_with<F>(&mut self, family: Family, count: usize, draw: F) -> SampleSet
    where
        F: FnOnce() -> Vec<f64>,
    {
        self.entries
            .entry((family, count))
            .or_insert_with(|| {
                let values = draw();
                tracing::debug!(
                    %family,
                    count,
                    retained = values.len(),
                    "sample cache miss, drew new sample set"
                );
                SampleSet::new(family, count, values)
            })
            .clone()
    }

    /// Returns the number of memoised sample sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been memoised yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_hit_does_not_redraw() {
        let draws = Cell::new(0);
        let mut cache = SampleCache::new();
        let draw = || {
            draws.set(draws.get() + 1);
            vec![1.0, 2.0]
        };

        let first = cache.get_or_insert_with(Family::Normal, 2, draw);
        let second = cache.get_or_insert_with(Family::Normal, 2, || unreachable!());

        assert_eq!(draws.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let mut cache = SampleCache::new();
        let a = cache.get_or_insert_with(Family::Normal, 2, || vec![1.0, 2.0]);
        let b = cache.get_or_insert_with(Family::Normal, 3, || vec![3.0, 4.0, 5.0]);
        let c = cache.get_or_insert_with(Family::Gamma, 2, || vec![6.0, 7.0]);

        assert_eq!(a.values(), [1.0, 2.0]);
        assert_eq!(b.values(), [3.0, 4.0, 5.0]);
        assert_eq!(c.values(), [6.0, 7.0]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_requested_count_is_kept_for_filtered_sets() {
        let mut cache = SampleCache::new();
        let set = cache.get_or_insert_with(Family::Lorentz, 4, || vec![0.5]);
        assert_eq!(set.requested_count(), 4);
        assert_eq!(set.len(), 1);
        assert_eq!(set.family(), Family::Lorentz);
    }

    #[test]
    fn test_serialize() {
        let set = SampleSet::new(Family::Power, 2, vec![0.25, 0.5]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"family":"power","requested_count":2,"values":[0.25,0.5]}"#
        );
    }
}
