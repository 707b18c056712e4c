use std::process::Command;

use chknodes::slurm::{ProcessExecutor, Slurm};
use color_eyre::Result;

fn are_we_on_slurm_machine() -> bool {
    let found = Command::new("which")
        .arg("scontrol")
        .output()
        .is_ok_and(|output| output.status.success());
    if !found {
        eprintln!("No slurm found, SKIPPING");
    }
    found
}

#[test]
fn partitions_and_nodes_of_live_cluster() -> Result<()> {
    if !are_we_on_slurm_machine() {
        return Ok(());
    }

    // Nothing is known about the cluster; check that every partition and
    // node reported by scontrol carries its name
    let slurm = Slurm::new("scontrol", ProcessExecutor);
    for partition in slurm.list_partitions()? {
        assert!(!partition.name().is_empty());

        let described = slurm.describe_partition(partition.name())?;
        let Some(nodes) = described.as_ref().and_then(|p| p.nodes()) else {
            continue;
        };

        for node in slurm.describe_nodes(nodes)? {
            assert!(!node.name().is_empty());
        }
    }

    Ok(())
}

#[test]
fn missing_scontrol_is_reported() {
    let slurm = Slurm::new("/nonexistent/bin/scontrol", ProcessExecutor);
    let err = slurm.list_partitions().unwrap_err();

    assert_eq!(err.command(), Some("/nonexistent/bin/scontrol show partitions"));
}
