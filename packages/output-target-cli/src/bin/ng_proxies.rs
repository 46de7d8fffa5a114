/**
 * Angular Output Target CLI - ng-proxies
 *
 * Generates Angular wrappers from component metadata
 */
use std::process;

use angular_output_target_cli::main_entry::{command, init_logging, main_fn, CliOptions};

fn main() {
    let options = CliOptions::from_matches(&command().get_matches());
    init_logging(options.verbose);

    match main_fn(&options) {
        Ok(summary) => {
            for line in summary.lines() {
                println!("{}", line);
            }
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
            process::exit(1);
        }
    }
}
