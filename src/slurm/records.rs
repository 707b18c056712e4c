use std::collections::BTreeMap;

/// Boundary key of `scontrol show partition(s)` output
pub const PARTITION_KEY: &str = "PartitionName";
/// Boundary key of `scontrol show node` output
pub const NODE_KEY: &str = "NodeName";

/// A single block of `key=value` pairs from `scontrol` output
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Returns the value of a field, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Inserts every `key=value` token on a line; tokens without `=` are ignored
    fn extend_from_line(&mut self, line: &str) {
        for token in line.split_whitespace() {
            // Only the first '=' separates key from value, e.g. `TRESBillingWeights=CPU=1.0`
            if let Some((key, value)) = token.split_once('=') {
                self.fields
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Returns true if the first token of `line` starts with `<boundary>=`
fn starts_record(line: &str, boundary: &str) -> bool {
    line.split_whitespace()
        .next()
        .and_then(|token| token.strip_prefix(boundary))
        .is_some_and(|rest| rest.starts_with('='))
}

/// Splits `scontrol` output into records, starting a new record on every line
/// whose first token is `<boundary>=...`.
///
/// Lines preceding the first boundary line do not belong to any record and are
/// discarded, so text without any boundary line yields no records at all.
pub fn parse_records(text: &str, boundary: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;
    let mut discarded = 0;

    for line in text.lines() {
        if starts_record(line, boundary) {
            if let Some(record) = current.take().filter(|r| !r.is_empty()) {
                records.push(record);
            }

            current = Some(Record::default());
        }

        match current.as_mut() {
            Some(record) => record.extend_from_line(line),
            None if !line.trim().is_empty() => discarded += 1,
            None => {}
        }
    }

    if let Some(record) = current.filter(|r| !r.is_empty()) {
        records.push(record);
    }

    if discarded > 0 {
        log::debug!(
            "discarded {} line(s) preceding the first {}= record",
            discarded,
            boundary
        );
    }

    records
}
