mod commands;
mod locations;
mod logger;
mod terminal;
mod ui;

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::Write;
use terminal::with_terminal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: CommonOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
pub struct CommonOptions {
    /// Log verbosity level
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available MIDI input ports
    Ports,
    /// Watch incoming MIDI and the actions it would trigger
    Monitor(commands::monitor::Options),
    /// Render a countdown to a time of day
    Countdown(commands::countdown::Options),
    /// `showcue completions --generate=zsh > showcue.zsh`
    Completions(Completions),
}

#[derive(Debug, Parser)]
#[command(arg_required_else_help(true))]
struct Completions {
    /// shell to generate the completion script for
    #[arg(long = "generate", value_enum)]
    shell: Option<clap_complete::Shell>,
}

impl Completions {
    fn generate(&self) -> anyhow::Result<()> {
        let Some(shell) = self.shell else {
            anyhow::bail!("no shell specified for autocompletion generation");
        };

        let mut stdout = std::io::stdout();
        stdout.flush()?;

        let mut cli = Cli::command();
        clap_complete::generate(shell, &mut cli, "showcue", &mut stdout);

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let app_result = match args.command {
        Commands::Ports => commands::ports::run(),
        Commands::Countdown(opts) => commands::countdown::run(opts),
        Commands::Monitor(opts) => {
            with_terminal(move |term| commands::monitor::run(term, opts, args.opts))
        }
        Commands::Completions(ref c) => c.generate(),
    };

    if let Err(e) = app_result {
        if logger::is_active() {
            log::error!("{e}");
        } else {
            use colored::*;
            eprintln!("{} {}", "Error:".red().bold(), format!("{e}").bold());
        }
    }

    Ok(())
}
