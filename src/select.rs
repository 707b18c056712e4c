use std::io::{self, BufRead, Write};

use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;

use crate::slurm::Partition;

const QUESTION: &str = "\nEnter the number of the partition you want to retrieve information for: ";

/// Interaction with the operator while choosing a partition
pub trait Prompt {
    /// Shows a line of text
    fn say(&mut self, text: &str) -> io::Result<()>;

    /// Shows an error message, e.g. following invalid input
    fn warn(&mut self, text: &str) -> io::Result<()> {
        self.say(text)
    }

    /// Asks a question and reads one line of input; None once input is exhausted
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Prompts on a terminal or any other pair of streams
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    /// Constructs a [`Terminal`] on stdin/stdout; errors are highlighted on a TTY
    pub fn stdio() -> Self {
        let output = io::stdout();
        let styled = output.is_tty();

        Self {
            input: io::stdin().lock(),
            output,
            styled,
        }
    }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn warn(&mut self, text: &str) -> io::Result<()> {
        if self.styled {
            writeln!(self.output, "{}", text.yellow())
        } else {
            self.say(text)
        }
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line))
    }
}

/// Used when prompting is disabled; the choices end up in the error instead of a menu
#[derive(Debug, Default)]
pub struct Unattended {
    choices: Vec<String>,
}

impl Prompt for Unattended {
    fn say(&mut self, text: &str) -> io::Result<()> {
        log::debug!("{}", text);
        self.choices.push(text.to_string());
        Ok(())
    }

    fn ask(&mut self, _question: &str) -> io::Result<Option<String>> {
        Err(io::Error::other(format!(
            "a partition must be selected, but prompting is disabled; {}",
            self.choices.join(" ")
        )))
    }
}

/// Resolves the partition to report on.
///
/// A `requested` name matching one of the partitions is returned as is;
/// otherwise the operator picks a partition from a numbered list.
pub fn resolve<P>(
    partitions: &[Partition],
    requested: Option<&str>,
    prompt: &mut P,
) -> Result<String>
where
    P: Prompt + ?Sized,
{
    if partitions.is_empty() {
        bail!("no partitions to select from");
    }

    if let Some(requested) = requested {
        if let Some(partition) = partitions.iter().find(|p| p.name() == requested) {
            return Ok(partition.name().to_string());
        }

        log::debug!("requested partition {:?} not found", requested);
        prompt.say("Wrong partition name chosen. Available partitions are:")?;
    } else {
        prompt.say("Available Partitions:")?;
    }

    for (i, partition) in partitions.iter().enumerate() {
        prompt.say(&format!("{}. {}", i + 1, partition.name()))?;
    }

    let index = prompt_for_index(prompt, partitions.len())?;

    Ok(partitions[index - 1].name().to_string())
}

/// Asks until a number in `1..=max` is entered
fn prompt_for_index<P>(prompt: &mut P, max: usize) -> Result<usize>
where
    P: Prompt + ?Sized,
{
    loop {
        let answer = prompt
            .ask(QUESTION)?
            .ok_or_else(|| eyre!("input ended before a partition was selected"))?;

        match answer.trim().parse::<usize>() {
            Ok(index) if (1..=max).contains(&index) => return Ok(index),
            Ok(_) => prompt.warn("Invalid choice. Please enter a number within the range.")?,
            Err(_) => prompt.warn("Invalid input. Please enter a valid number.")?,
        }
    }
}
