fn main() {
    #[cfg(feature = "cli")]
    oxi85::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxi85: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
