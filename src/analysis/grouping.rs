use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::SalesRecord;

/// One group of a grouping and its summed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

impl GroupTotal {
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// Sum `value` per `key`, keeping groups in the order their key first appears.
///
/// Records whose key is `None` belong to no group.
pub fn group_sum<'a, I, K, V>(records: I, key: K, value: V) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    K: Fn(&'a SalesRecord) -> Option<&'a str>,
    V: Fn(&SalesRecord) -> f64,
{
    let mut groups: IndexMap<&'a str, f64> = IndexMap::new();
    for record in records {
        if let Some(k) = key(record) {
            *groups.entry(k).or_insert(0.0) += value(record);
        }
    }
    groups
        .into_iter()
        .map(|(key, total)| GroupTotal::new(key, total))
        .collect()
}

/// Sort groups by total, largest first. Equal totals keep their order.
pub fn sort_descending(groups: &mut [GroupTotal]) {
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
}

/// The first group holding the largest total.
pub fn first_max(groups: &[GroupTotal]) -> Option<&GroupTotal> {
    groups.iter().fold(None, |best: Option<&GroupTotal>, g| match best {
        Some(b) if b.total >= g.total => Some(b),
        _ => Some(g),
    })
}
