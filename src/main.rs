use clap::{CommandFactory, Parser};

use doctl_cli::cli::commands::{configure, engines, glossary, translate};
use doctl_cli::cli::{Args, Command};
use doctl_cli::input::InputError;
use doctl_cli::output::{self, OutputConfig};
use doctl_cli::translation::print_languages;
use doctl_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
        verbosity: args.verbose,
    });

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Engines) => engines::print_engines()?,
        Some(Command::Configure { show }) => configure::run_configure(show)?,
        Some(Command::Glossary { command }) => glossary::run_glossary(command, args.db)?,
        None => {
            let Some(input) = args.input else {
                Args::command().print_help()?;
                std::process::exit(exitcode::USAGE);
            };

            let options = translate::TranslateOptions {
                input,
                output: args.output,
                engine: args.engine,
                key: args.key,
                from: args.from,
                to: args.to,
                category: args.category,
                db: args.db,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(input) = err.downcast_ref::<InputError>() {
        return match input {
            InputError::NotFound(_) => exitcode::NOINPUT,
            InputError::NotDocx(_) | InputError::TooLarge { .. } => exitcode::DATAERR,
            InputError::Io { .. } => exitcode::IOERR,
        };
    }
    if err.chain().any(|cause| cause.is::<toml::de::Error>()) {
        return exitcode::CONFIG;
    }
    exitcode::SOFTWARE
}
