//! rwatson main entrypoint.

use rwatson::run;
use rwatson::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
