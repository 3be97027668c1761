//! vue2ts: convert Vue 2 Options API components to class components.

mod cli;
mod logging;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};
use output::Formatter;

fn main() -> Result<()> {
    logging::init_tracing();
    let args = Args::parse();

    let summary = orchestrator::run(&args).into_diagnostic()?;

    if args.stdout {
        for contents in summary.files.iter().filter_map(|report| report.contents.as_deref()) {
            println!("{contents}");
        }
    }

    let report = Formatter::new(args.output).format(&summary);
    if args.stdout {
        eprint!("{report}");
    } else {
        print!("{report}");
    }

    if summary.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
