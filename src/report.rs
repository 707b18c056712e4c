use std::io::Write;

use color_eyre::eyre::Context;
use color_eyre::Result;
use serde::Serialize;

use crate::slurm::Node;

/// Output format of the node report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// One `KEY = VALUE | ...` line per node
    #[default]
    Text,
    /// Header row of field names followed by one row per node
    Csv,
}

/// Formats the selected fields of a node, e.g. `NodeName = n01 | CPUTot = 64`
pub fn node_line<S: AsRef<str>>(node: &Node, fields: &[S]) -> String {
    fields
        .iter()
        .map(|key| format!("{} = {}", key.as_ref(), node.field(key.as_ref())))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Writes one entry per node; fields missing from a node are written as empty strings
pub fn write_nodes<W, S>(out: W, nodes: &[Node], fields: &[S], format: Format) -> Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    match format {
        Format::Text => write_text(out, nodes, fields),
        Format::Csv => write_csv(out, nodes, fields),
    }
}

fn write_text<W: Write, S: AsRef<str>>(mut out: W, nodes: &[Node], fields: &[S]) -> Result<()> {
    for node in nodes {
        writeln!(out, "{}", node_line(node, fields)).wrap_err("writing node report")?;
    }

    Ok(())
}

/// Values of the selected fields of one node, in field order
#[derive(Debug, PartialEq, Serialize)]
struct Row<'a>(Vec<&'a str>);

impl<'a> Row<'a> {
    fn new<S: AsRef<str>>(node: &'a Node, fields: &[S]) -> Self {
        Self(fields.iter().map(|key| node.field(key.as_ref())).collect())
    }
}

fn write_csv<W: Write, S: AsRef<str>>(out: W, nodes: &[Node], fields: &[S]) -> Result<()> {
    // Rows are sequences, so the header row is written explicitly
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(fields.iter().map(|key| key.as_ref()))?;

    for node in nodes {
        writer
            .serialize(Row::new(node, fields))
            .wrap_err_with(|| format!("writing CSV row for {:?}", node.name()))?;
    }

    writer.flush().wrap_err("writing CSV report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slurm::{Record, DEFAULT_FIELDS};

    fn nodes() -> Vec<Node> {
        vec![
            Node::from(Record::from_iter([
                ("NodeName", "c01"),
                ("CPUAlloc", "8"),
                ("CPUEfctv", "32"),
                ("CPUTot", "32"),
                ("CPULoad", "7.93"),
                ("State", "MIXED"),
            ])),
            Node::from(Record::from_iter([("NodeName", "c02"), ("CPUTot", "16")])),
        ]
    }

    #[test]
    fn test_node_line() {
        assert_eq!(
            node_line(&nodes()[0], &DEFAULT_FIELDS),
            "NodeName = c01 | CPUAlloc = 8 | CPUEfctv = 32 | CPUTot = 32 | CPULoad = 7.93"
        );
    }

    #[test]
    fn test_missing_fields_are_rendered_empty() {
        assert_eq!(
            node_line(&nodes()[1], &DEFAULT_FIELDS),
            "NodeName = c02 | CPUAlloc =  | CPUEfctv =  | CPUTot = 16 | CPULoad = "
        );
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        write_nodes(&mut out, &nodes(), &["NodeName", "State"], Format::Text).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NodeName = c01 | State = MIXED\nNodeName = c02 | State = \n"
        );
    }

    #[test]
    fn test_csv_report() {
        let mut out = Vec::new();
        write_nodes(&mut out, &nodes(), &DEFAULT_FIELDS, Format::Csv).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NodeName,CPUAlloc,CPUEfctv,CPUTot,CPULoad\nc01,8,32,32,7.93\nc02,,,16,\n"
        );
    }

    #[test]
    fn test_row_follows_field_order() {
        let nodes = nodes();

        assert_eq!(
            Row::new(&nodes[1], &["CPUTot", "NodeName", "State"]),
            Row(vec!["16", "c02", ""])
        );
    }

    #[test]
    fn test_csv_quotes_values() {
        let node = Node::from(Record::from_iter([
            ("NodeName", "c01"),
            ("Reason", "disk,fan"),
        ]));
        let mut out = Vec::new();
        write_nodes(&mut out, &[node], &["NodeName", "Reason"], Format::Csv).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "NodeName,Reason\nc01,\"disk,fan\"\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let mut out = Vec::new();
        write_nodes(&mut out, &[], &DEFAULT_FIELDS, Format::Text).unwrap();

        assert!(out.is_empty());
    }
}
