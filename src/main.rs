use argh::FromArgs;
use basic_shell::config::{Config, DEFAULT_PROMPT};
use basic_shell::{Interpreter, Outcome};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Basic Linux Shell: run builtins and programs, one command per line.
struct Args {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// text shown before each command line.
    prompt: String,

    #[argh(switch, short = 'q')]
    /// do not print the welcome and goodbye banners.
    quiet: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            prompt: args.prompt,
            banners: !args.quiet,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug shows dispatch and child status events
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let sh = Interpreter::with_config(args.into());
    let banners = sh.config().banners;

    if banners {
        println!("Welcome to my Basic Linux Shell!");
    }

    let outcome = sh.repl(&mut io::stdin().lock(), &mut io::stdout(), &mut io::stderr());
    match outcome {
        Ok(Outcome::Exit) => {
            if banners {
                println!("Goodbye!");
            }
            Ok(())
        }
        Ok(Outcome::EndOfInput) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
