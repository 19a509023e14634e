fn main() {
    if let Err(e) = font_fetcher::cli::run() {
        eprintln!("font-fetcher: error: {e:#}");
        std::process::exit(1);
    }
}
