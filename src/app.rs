use std::io::Write;
use std::process::ExitCode;

use color_eyre::eyre::Context;
use color_eyre::Result;
use crossterm::style::Stylize;

use crate::args::Args;
use crate::report;
use crate::select::{self, Prompt};
use crate::slurm::{Executor, QueryError, Slurm};

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Partitions could not be listed, or there were none
    NoPartitions,
    /// A partition was selected; the node report may still be empty
    Completed,
}

impl Outcome {
    /// Process exit status; 1 if no partitions could be listed
    pub fn status(self) -> u8 {
        match self {
            Outcome::NoPartitions => 1,
            Outcome::Completed => 0,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

#[derive(Debug)]
pub struct App<E> {
    /// Command-line args
    pub args: Args,
    slurm: Slurm<E>,
    /// Highlight diagnostics
    styled: bool,
}

impl<E: Executor> App<E> {
    /// Constructs a new instance of [`App`].
    pub fn new(args: Args, executor: E) -> Self {
        let slurm = Slurm::new(&args.scontrol, executor);

        Self {
            args,
            slurm,
            styled: false,
        }
    }

    /// Enables colored diagnostics
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Selects a partition and writes the report on its nodes to `out`.
    ///
    /// Failed queries are reported on `err` and end the run early; only the
    /// absence of partitions is reflected in the [`Outcome`].
    pub fn run<P, O, D>(&self, prompt: &mut P, mut out: O, mut err: D) -> Result<Outcome>
    where
        P: Prompt + ?Sized,
        O: Write,
        D: Write,
    {
        let partitions = match self.slurm.list_partitions() {
            Ok(partitions) => partitions,
            Err(error) => {
                self.failure(&mut err, "Failed to retrieve available partitions.", &error)?;
                return Ok(Outcome::NoPartitions);
            }
        };

        if partitions.is_empty() {
            self.notice(&mut err, "No partitions available.")?;
            return Ok(Outcome::NoPartitions);
        }

        let name = select::resolve(&partitions, self.args.partition.as_deref(), prompt)?;
        log::info!("selected partition {:?}", name);

        let partition = match self.slurm.describe_partition(&name) {
            Ok(Some(partition)) => partition,
            Ok(None) => {
                let message = format!("No information returned for partition '{}'.", name);
                self.notice(&mut err, &message)?;
                return Ok(Outcome::Completed);
            }
            Err(error) => {
                let headline = format!(
                    "Failed to get partition information for partition '{}'.",
                    name
                );
                self.failure(&mut err, &headline, &error)?;
                return Ok(Outcome::Completed);
            }
        };

        if self.args.format() == report::Format::Text {
            writeln!(out, "\nNode status for '{}':", name).wrap_err("writing report header")?;
        }

        let Some(nodelist) = partition.nodes() else {
            self.notice(&mut err, &format!("Partition '{}' has no nodes.", name))?;
            return Ok(Outcome::Completed);
        };

        match self.slurm.describe_nodes(nodelist) {
            Ok(nodes) => {
                log::debug!("{} node(s) in {}", nodes.len(), nodelist);
                let fields = self.args.fields();
                report::write_nodes(out, &nodes, fields.as_slice(), self.args.format())?;
            }
            Err(error) => self.failure(&mut err, "Failed to get node information.", &error)?,
        }

        Ok(Outcome::Completed)
    }

    /// Reports a failed query with the attempted command and its diagnostics
    fn failure<D: Write>(&self, mut err: D, headline: &str, error: &QueryError) -> Result<()> {
        log::debug!("{:?}", error);

        if self.styled {
            writeln!(err, "{}", headline.red().bold())?;
        } else {
            writeln!(err, "{}", headline)?;
        }

        match (error.command(), error.status()) {
            (Some(command), Some(status)) => writeln!(err, "Command: {} ({})", command, status)?,
            (Some(command), None) => writeln!(err, "Command: {}", command)?,
            (None, _) => {}
        }

        let diagnostics = error.diagnostics();
        writeln!(err, "{}", diagnostics.trim_end())?;
        Ok(())
    }

    fn notice<D: Write>(&self, mut err: D, message: &str) -> Result<()> {
        if self.styled {
            writeln!(err, "{}", message.yellow())?;
        } else {
            writeln!(err, "{}", message)?;
        }

        Ok(())
    }
}
