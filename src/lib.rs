/// Application.
pub mod app;
/// Command-line arguments
pub mod args;
/// Node report rendering
pub mod report;
/// Partition selection
pub mod select;
/// Querying of Slurm state
pub mod slurm;
