// src/main.rs

use cronpush::{cli, logging, run};

fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("cronpush error: {err:?}");
        std::process::exit(1);
    }

    match run(args) {
        Ok(report) => {
            if let Some(stage) = report.halted() {
                eprintln!("cronpush: run halted at stage '{stage}'");
                for line in report.summary_lines() {
                    eprintln!("  {line}");
                }
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("cronpush error: {err:?}");
            std::process::exit(1);
        }
    }
}
