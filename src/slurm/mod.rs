#[cfg(test)]
pub(crate) mod fake;
mod nodes;
mod partitions;
mod query;
mod records;

pub use nodes::{Node, DEFAULT_FIELDS};
pub use partitions::Partition;
pub use query::{validate_argument, Captured, Executor, ProcessExecutor, Query, QueryError};
pub use records::{parse_records, Record, NODE_KEY, PARTITION_KEY};

/// Queries partition and node state via `scontrol`
///
/// Every query blocks until `scontrol` exits; there is no timeout.
#[derive(Debug)]
pub struct Slurm<E> {
    scontrol: String,
    executor: E,
}

impl<E: Executor> Slurm<E> {
    /// Constructs a new instance of [`Slurm`] using the given `scontrol` executable
    pub fn new(scontrol: &str, executor: E) -> Self {
        Self {
            scontrol: scontrol.to_string(),
            executor,
        }
    }

    /// Lists all partitions in the order reported by `scontrol show partitions`
    pub fn list_partitions(&self) -> Result<Vec<Partition>, QueryError> {
        let text = self.run(&["show", "partitions"])?;

        Ok(parse_records(&text, PARTITION_KEY)
            .into_iter()
            .map(Partition::from)
            .collect())
    }

    /// Describes a single partition; returns None if `scontrol` reported no partition
    pub fn describe_partition(&self, name: &str) -> Result<Option<Partition>, QueryError> {
        let name = validate_argument(name)?;
        let text = self.run(&["show", "partition", name])?;

        Ok(parse_records(&text, PARTITION_KEY)
            .into_iter()
            .next()
            .map(Partition::from))
    }

    /// Describes every node in a node list expression; ranges are expanded by `scontrol`
    pub fn describe_nodes(&self, nodelist: &str) -> Result<Vec<Node>, QueryError> {
        let nodelist = validate_argument(nodelist)?;
        let text = self.run(&["show", "node", nodelist])?;

        Ok(parse_records(&text, NODE_KEY)
            .into_iter()
            .map(Node::from)
            .collect())
    }

    fn run(&self, args: &[&str]) -> Result<String, QueryError> {
        let query = Query::new(&self.scontrol, args.iter().copied());

        self.executor.execute(&query)?.into_stdout(&query)
    }
}
