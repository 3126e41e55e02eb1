//! microfolio - Static portfolio generator for creatives

use std::process::ExitCode;

fn main() -> ExitCode {
    match microfolio::cli::run() {
        Ok(code) => code,
        Err(e) => {
            microfolio::cli::report(&e);
            ExitCode::FAILURE
        }
    }
}
