use super::records::{Record, PARTITION_KEY};

/// A partition as reported by `scontrol show partition`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition(Record);

impl Partition {
    /// Name used to select the partition; empty if the record lacks one
    pub fn name(&self) -> &str {
        self.0.get(PARTITION_KEY).unwrap_or_default()
    }

    /// Compact node list expression, e.g. `node[01-04]`
    ///
    /// Returns None if the field is missing or empty (`(null)` for partitions
    /// without nodes)
    pub fn nodes(&self) -> Option<&str> {
        self.0
            .get("Nodes")
            .filter(|nodes| !nodes.is_empty() && *nodes != "(null)")
    }
}

impl From<Record> for Partition {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let partition = Partition::from(Record::from_iter([
            ("PartitionName", "debug"),
            ("Nodes", "node[01-04]"),
            ("State", "UP"),
        ]));

        assert_eq!(partition.name(), "debug");
        assert_eq!(partition.nodes(), Some("node[01-04]"));
    }

    #[test]
    fn test_partition_without_nodes() {
        let empty = Partition::from(Record::from_iter([("PartitionName", "empty")]));
        let null = Partition::from(Record::from_iter([
            ("PartitionName", "null"),
            ("Nodes", "(null)"),
        ]));

        assert_eq!(empty.nodes(), None);
        assert_eq!(null.nodes(), None);
    }
}
