//! Binary entrypoint for the `phagelaunch` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match phagelaunch::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.exit_code == 0 => {
            print!("{err}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(u8::try_from(err.exit_code).unwrap_or(1).max(1))
        }
    }
}
