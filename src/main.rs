use std::process::ExitCode;

fn main() -> ExitCode {
    match transom::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
