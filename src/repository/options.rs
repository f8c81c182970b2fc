use std::cmp::Ordering;

use serde_json::Value;

use crate::record::Record;

/// Sort direction for one `order_by` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Ordering and paging applied by `find_by` after filtering.
///
/// The default applies nothing: matches come back in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub order_by: Vec<(String, SortOrder)>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push((field.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sort, skip and truncate `(record, item)` pairs.
    pub(crate) fn apply<T>(&self, mut matches: Vec<(Record, T)>) -> Vec<T> {
        if !self.order_by.is_empty() {
            // stable, so equal keys keep storage order
            matches.sort_by(|(a, _), (b, _)| self.compare(a, b));
        }

        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);

        matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, item)| item)
            .collect()
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (field, order) in &self.order_by {
            let ordering = compare_values(a.get(field), b.get(field));
            let ordering = match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Missing < null < bool < number < string < array < object.
/// Values of the same kind compare naturally; arrays and objects compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => rank(a).cmp(&rank(b)),
        },
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
