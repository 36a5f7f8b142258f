//! Latte front-end CLI entry point

fn main() {
    // Logging is initialized inside `run()` once `--verbose` is known
    latte::cli::run();
}
