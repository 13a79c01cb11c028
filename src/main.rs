//! worktrack main entrypoint.

use worktrack::run;
use worktrack::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
