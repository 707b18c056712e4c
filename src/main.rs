use std::io;
use std::process::ExitCode;

use color_eyre::Result;
use crossterm::tty::IsTty;

use chknodes::app::App;
use chknodes::args::Args;
use chknodes::select::{Prompt, Terminal, Unattended};
use chknodes::slurm::ProcessExecutor;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CHKNODES_LOG", "warn"))
        .init();

    let args: Args = argh::from_env();
    if args.version {
        println!("chknodes v{}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut prompt: Box<dyn Prompt> = if args.no_input {
        Box::new(Unattended::default())
    } else {
        Box::new(Terminal::stdio())
    };

    let app = App::new(args, ProcessExecutor).styled(io::stderr().is_tty());
    let outcome = app.run(prompt.as_mut(), io::stdout().lock(), io::stderr().lock())?;

    Ok(outcome.exit_code())
}
