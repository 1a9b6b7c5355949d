fn main() {
    if let Err(e) = picoservice_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
