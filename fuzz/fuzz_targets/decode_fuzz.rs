#![no_main]
use libfuzzer_sys::fuzz_target;
use oxi85::ascii85::decoder;

fuzz_target!(|data: &[u8]| {
    // Fuzz the decoder with arbitrary bytes.
    // The decoder must never panic -- only return errors.
    let _ = decoder::decode_all(data);
    let _ = decoder::decode_raw_all(data);

    // Also fuzz the streaming entry point with split pushes.
    if data.len() >= 2 {
        let split = data.len() / 2;
        let mut dec = decoder::Ascii85Decoder::new_delimited(Vec::new());
        if dec.push(&data[..split]).is_ok() && dec.push(&data[split..]).is_ok() {
            let _ = dec.finish();
        }
    }
});
