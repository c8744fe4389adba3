//! Per-group sequence renumbering.

use std::collections::HashMap;

use crate::extract::Record;

/// Group used for records whose grouping field is empty.
pub const UNKNOWN_GROUP: &str = "UNKNOWN";

/// Last sequence number handed out per group key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounters {
    counts: HashMap<String, u64>,
}

impl GroupCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, group: &str) -> u64 {
        let counter = self.counts.entry(group.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn count(&self, group: &str) -> u64 {
        self.counts.get(group).copied().unwrap_or(0)
    }

    pub fn group_count(&self) -> usize {
        self.counts.len()
    }
}

pub fn group_key(record: &Record, group_field: &str) -> String {
    let key = record.text(group_field);
    if key.is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        key
    }
}

/// Overwrites `sequence_field` of every record with its 1-based position within its
/// group, continuing from `counters`, and returns the updated counters.
pub fn renumber(
    records: &mut [Record],
    group_field: &str,
    sequence_field: &str,
    mut counters: GroupCounters,
) -> GroupCounters {
    for record in records.iter_mut() {
        let key = group_key(record, group_field);
        let seq = counters.next(&key);
        record.set_number(sequence_field, seq);
    }
    counters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(manufacturer: &str) -> Record {
        [("seq", "99"), ("manufacturer", manufacturer)]
            .into_iter()
            .collect()
    }

    #[test]
    fn numbers_restart_per_manufacturer() {
        let mut records = vec![record("A"), record("B"), record("A")];
        let counters = renumber(&mut records, "manufacturer", "seq", GroupCounters::new());
        let seqs: Vec<String> = records.iter().map(|r| r.text("seq")).collect();
        assert_eq!(seqs, vec!["1", "1", "2"]);
        assert_eq!(counters.count("A"), 2);
        assert_eq!(counters.group_count(), 2);
    }

    #[test]
    fn empty_group_key_falls_into_unknown() {
        let mut records = vec![record(""), record("UNKNOWN"), record("")];
        let counters = renumber(&mut records, "manufacturer", "seq", GroupCounters::new());
        let seqs: Vec<String> = records.iter().map(|r| r.text("seq")).collect();
        assert_eq!(seqs, vec!["1", "2", "3"]);
        assert_eq!(counters.count(UNKNOWN_GROUP), 3);
    }

    #[test]
    fn counters_carry_across_calls() {
        let mut first = vec![record("A")];
        let counters = renumber(&mut first, "manufacturer", "seq", GroupCounters::new());
        let mut second = vec![record("A"), record("B")];
        renumber(&mut second, "manufacturer", "seq", counters);
        assert_eq!(second[0].text("seq"), "2");
        assert_eq!(second[1].text("seq"), "1");
    }
}
