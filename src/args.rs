use argh::FromArgs;

use crate::report::Format;
use crate::slurm::DEFAULT_FIELDS;

/// Shows CPU allocation and load of the nodes in a Slurm partition
#[derive(FromArgs, Debug)]
pub struct Args {
    /// partition to report on; prompts for a partition if missing or unknown
    #[argh(positional)]
    pub partition: Option<String>,

    /// location of `scontrol` executable
    #[argh(option, default = "\"scontrol\".to_string()")]
    pub scontrol: String,

    /// comma separated node fields to report
    #[argh(option, default = "DEFAULT_FIELDS.join(\",\")")]
    pub fields: String,

    /// write the report as CSV
    #[argh(switch)]
    pub csv: bool,

    /// never prompt; fail if the partition cannot be determined
    #[argh(switch)]
    pub no_input: bool,

    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
}

impl Args {
    /// Report fields in the order given, skipping empty entries
    pub fn fields(&self) -> Vec<&str> {
        self.fields
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub fn format(&self) -> Format {
        if self.csv {
            Format::Csv
        } else {
            Format::Text
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            partition: None,
            scontrol: "scontrol".to_string(),
            fields: DEFAULT_FIELDS.join(","),
            csv: false,
            no_input: false,
            version: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["chknodes"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);

        assert_eq!(args.partition, None);
        assert_eq!(args.scontrol, "scontrol");
        assert_eq!(args.fields(), DEFAULT_FIELDS);
        assert_eq!(args.format(), Format::Text);
        assert!(!args.no_input);
    }

    #[test]
    fn test_options() {
        let args = parse(&[
            "gpu",
            "--scontrol",
            "/opt/slurm/bin/scontrol",
            "--fields",
            "NodeName, State,,RealMemory",
            "--csv",
            "--no-input",
        ]);

        assert_eq!(args.partition.as_deref(), Some("gpu"));
        assert_eq!(args.scontrol, "/opt/slurm/bin/scontrol");
        assert_eq!(args.fields(), ["NodeName", "State", "RealMemory"]);
        assert_eq!(args.format(), Format::Csv);
        assert!(args.no_input);
    }
}
