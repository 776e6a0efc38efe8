use std::process;

use modscan::cli::{Args, Command};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Create command from arguments
    let command = Command::from_args(args);

    // Run the command and exit with its code
    process::exit(command.run());
}
