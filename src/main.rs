//! rCheckin main entrypoint.

use rcheckin::{logging, run};

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
