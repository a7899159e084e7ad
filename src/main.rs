use std::process::ExitCode;

fn main() -> ExitCode {
    contractiq::logging::init();

    match contractiq::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
