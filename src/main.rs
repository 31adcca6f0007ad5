use anyhow::Context;
use clap::Parser;
use stakeguard::cli::output::{self, Mark};
use stakeguard::cli::{check, replay, Cli, Commands};

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Replay(args) => replay::execute(args)
            .with_context(|| format!("replay of {} failed", args.script.display())),
        Commands::Check(args) => check::execute_config(&args.config)
            .with_context(|| format!("invalid configuration {}", args.config.display())),
    }
}

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        output::mark(Mark::Fail, &format!("{e:#}"));
        std::process::exit(1);
    }
}
