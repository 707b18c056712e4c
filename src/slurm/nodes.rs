use super::records::{Record, NODE_KEY};

/// Fields shown for each node unless configured otherwise
pub const DEFAULT_FIELDS: [&str; 5] = ["NodeName", "CPUAlloc", "CPUEfctv", "CPUTot", "CPULoad"];

/// A compute node as reported by `scontrol show node`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node(Record);

impl Node {
    pub fn name(&self) -> &str {
        self.0.get(NODE_KEY).unwrap_or_default()
    }

    /// Returns a field value, or an empty string if the node lacks the field
    pub fn field(&self, key: &str) -> &str {
        self.0.get(key).unwrap_or_default()
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Self(record)
    }
}
