use clap::Parser;
use domain_solve::notation::Notation;
use domain_tutor::{store::InMemoryStore, Tutor, TutorConfig};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Talk with the domain-of-definition tutor from the terminal.
#[derive(Parser, Debug)]
#[command(name = "domain-repl", version, long_about = None)]
struct Args {
    /// File of student messages, one per line. Messages are read from stdin if it is not a
    /// terminal.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Interval notation of the tutor's corrections (french or international)
    #[arg(short, long, default_value_t = Notation::French)]
    notation: Notation,

    /// Identifier of the conversation
    #[arg(short, long, default_value = "repl")]
    conversation: String,

    /// Also write corrections as inequalities
    #[arg(long)]
    show_chain: bool,

    /// Report the errors behind each reply, and log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Installs the log subscriber. `RUST_LOG` takes precedence over the default level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false);
    if let Err(err) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        eprintln!("could not install the log subscriber: {}", err);
    }
}

/// Sends one message to the tutor and prints its reply.
fn turn(tutor: &Tutor<InMemoryStore>, args: &Args, input: &str) {
    let (reply, diagnostics) = tutor.process_turn_verbose(&args.conversation, input);
    println!("{}", reply);

    if args.verbose {
        for diagnostic in diagnostics {
            if let Err(err) = diagnostic.report_to_stderr() {
                error!(%err, "could not report diagnostic");
            }
        }
    }
}

/// Sends every non-empty line of the script as a message.
fn run_script(tutor: &Tutor<InMemoryStore>, args: &Args, script: &str) {
    for line in script.lines().map(str::trim).filter(|line| !line.is_empty()) {
        println!("> {}", line);
        turn(tutor, args, line);
        println!();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = TutorConfig::default()
        .into_builder()
        .notation(args.notation)
        .show_chain(args.show_chain)
        .build();
    debug!(?config, "starting tutor");
    let tutor = Tutor::with_config(InMemoryStore::new(), config);

    if let Some(path) = &args.script {
        // run script file
        match fs::read_to_string(path) {
            Ok(script) => run_script(&tutor, &args, &script),
            Err(err) => {
                eprintln!("could not read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read messages from stdin
        let mut script = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut script) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        run_script(&tutor, &args, &script);
    } else {
        // interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        println!("Envoie-moi une fonction sous la forme f(x) = ..., par exemple f(x) = 1/√(x-2).");

        fn process_line(
            rl: &mut DefaultEditor,
            tutor: &Tutor<InMemoryStore>,
            args: &Args,
        ) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            turn(tutor, args, &input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &tutor, &args) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
