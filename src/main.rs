mod cli;
mod execute;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use crate::cli::CLI;

fn main() {
    let cli = match CLI::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on bad usage by default; the CLI contract is 1
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    if let Err(err) = execute::execute(cli) {
        println!("{} {:#}", "error:".red(), err);
        std::process::exit(1);
    }
}
