mod cli;
mod commands;
mod config;
#[allow(unused_assignments)]
mod diagnostic;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init(&cli.global);
    let output = output::OutputContext::from_global(&cli.global);

    let result = match cli.command {
        cli::Commands::Parse(args) => commands::parse::run(args, &cli.global, &output).await,
        cli::Commands::Build(args) => commands::build::run(args, &cli.global, &output).await,
        cli::Commands::Emit(args) => commands::emit::run(args, &cli.global, &output).await,
        cli::Commands::Apply(args) => commands::apply::run(args, &cli.global, &output).await,
        cli::Commands::Extract(args) => commands::extract::run(args, &cli.global, &output).await,
        cli::Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => std::process::exit(error::ExitCode::Success as i32),
        Err(e) => {
            if let error::CliError::Parse {
                errors,
                source_text,
                file,
            } = &e
            {
                if output.mode == output::OutputMode::Human && !errors.is_empty() {
                    let filename = file.display().to_string();
                    for report in diagnostic::render_diagnostics(errors, source_text, &filename) {
                        eprintln!("{report:?}");
                    }
                }
            }
            output.print_error(&e);
            std::process::exit(e.exit_code() as i32);
        }
    }
}
