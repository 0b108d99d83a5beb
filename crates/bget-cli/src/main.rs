use bget_core::logging;

mod cli;

fn main() {
    logging::init();

    let outcome = cli::run_from_args();
    if let Err(err) = &outcome {
        eprintln!("bget error: {:#}", err);
    }
    let code = cli::exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
}
