//! VOLK speedup CLI entry point.

fn main() {
    if let Err(e) = volk_speedup_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
