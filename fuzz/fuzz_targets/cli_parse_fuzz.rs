#![no_main]
use libfuzzer_sys::fuzz_target;
use oxi85::cli;

fuzz_target!(|data: &[u8]| {
    // Argument parsing must never panic, whatever the shell hands over.
    let args: Vec<String> = data
        .split(|&b| b == 0)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .take(16)
        .collect();
    cli::fuzz_try_parse_args(&args);
});
