#![no_main]
use libfuzzer_sys::fuzz_target;
use oxi85::ascii85::decoder;
use oxi85::ascii85::encoder;
use oxi85::ascii85::wrap::LineWrap;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to pick a wrap mode.
    let wrap = match data[0] {
        0 => LineWrap::Off,
        w => LineWrap::Columns(w as usize),
    };
    let payload = &data[1..];

    let mut text = Vec::new();
    encoder::encode_all(&mut text, payload, wrap).unwrap();

    // Decode and verify roundtrip.
    let decoded = decoder::decode_all(&text).unwrap();
    assert_eq!(decoded, payload);
});
