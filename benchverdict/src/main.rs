use std::process::ExitCode;

use benchverdict::Suite;

/// With no registered cases this binary only drives `--results` files
/// through comparison, reporting and output.
fn main() -> ExitCode {
    benchverdict::main(Suite::new())
}
