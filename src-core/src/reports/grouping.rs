use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;

use crate::sheet::SheetRecord;

/// Groups in first-seen key order.
pub type Groups<'a, K> = Vec<(K, Vec<&'a SheetRecord>)>;

/// Partition records by `key_fn`, keeping groups in the order their key first
/// appears and records in input order within each group.
pub fn group_by<'a, K, I, F>(records: I, key_fn: F) -> Groups<'a, K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a SheetRecord>,
    F: Fn(&SheetRecord) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Groups<'a, K> = Vec::new();
    for record in records {
        let key = key_fn(record);
        match positions.get(&key) {
            Some(&i) => groups[i].1.push(record),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }
    groups
}

pub fn by_app(record: &SheetRecord) -> String {
    record.app_name.clone()
}

pub fn by_app_platform(record: &SheetRecord) -> (String, String) {
    (record.app_name.clone(), record.platform.clone())
}

pub fn by_app_date(record: &SheetRecord) -> (String, Option<NaiveDate>) {
    (record.app_name.clone(), record.parsed_date())
}
