use oxi85::ascii85::decoder::{self, Ascii85Decoder, DecodeError};
use oxi85::ascii85::encoder::{self, Ascii85Encoder};
use oxi85::ascii85::wrap::LineWrap;
use rand::{Rng, SeedableRng};

const LEVIATHAN_PLAIN: &[u8; 269] = b"Man is distinguished, not only by his reason, but by this singular passion from other animals, which is a lust of the mind, that by a perseverance of delight in the continued and indefatigable generation of knowledge, exceeds the short vehemence of any carnal pleasure.";

const LEVIATHAN_PAYLOAD: &str = r#"9jqo^BlbD-BleB1DJ+*+F(f,q/0JhKF<GL>Cj@.4Gp$d7F!,L7@<6@)/0JDEF<G%<+EV:2F!,O<DJ+*.@<*K0@<6L(Df-\0Ec5e;DffZ(EZee.Bl.9pF"AGXBPCsi+DGm>@3BB/F*&OCAfu2/AKYi(DIb:@FD,*)+C]U=@3BN#EcYf8ATD3s@q?d$AftVqCh[NqF<G:8+EV:.+Cf>-FD5W8ARlolDIal(DId<j@<?3r@:F%a+D58'ATD4$Bl@l3De:,-DJs`8ARoFb/0JMK@qB4^F!,R<AKZ&-DfTqBG%G>uD.RTpAKYo'+CT/5+Cei#DII?(E,9)oF*2M7/c"#;

fn encode(data: &[u8], wrap: LineWrap) -> Vec<u8> {
    let mut out = Vec::new();
    encoder::encode_all(&mut out, data, wrap).unwrap();
    out
}

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random()).collect()
}

#[test]
fn leviathan_encodes_to_the_published_text() {
    let expected = format!("<~{LEVIATHAN_PAYLOAD}~>");
    assert_eq!(encode(LEVIATHAN_PLAIN, LineWrap::Off), expected.as_bytes());
}

#[test]
fn leviathan_decodes_back() {
    let text = format!("<~{LEVIATHAN_PAYLOAD}~>");
    assert_eq!(
        decoder::decode_all(text.as_bytes()).unwrap(),
        LEVIATHAN_PLAIN
    );
    assert_eq!(
        decoder::decode_raw_all(LEVIATHAN_PAYLOAD.as_bytes()).unwrap(),
        LEVIATHAN_PLAIN
    );
}

#[test]
fn ruby_vector_both_ways() {
    assert_eq!(encode(b"Ruby", LineWrap::Off), b"<~;KZGo~>");
    assert_eq!(decoder::decode_all(b"<~;KZGo~>").unwrap(), b"Ruby");
}

#[test]
fn embedded_region_with_junk_on_both_sides() {
    let text = b"Content-Transfer: <~;KZGo~>; charset=a85 <~zzzz~>";
    assert_eq!(decoder::decode_all(text).unwrap(), b"Ruby");
}

#[test]
fn roundtrip_all_lengths_mod_four() {
    // Trailing-tuple truncation covers every padding length.
    let base: Vec<u8> = (0..64u8).collect();
    for len in 0..base.len() {
        let data = &base[..len];
        for wrap in [LineWrap::Off, LineWrap::Columns(2), LineWrap::Columns(15)] {
            let text = encode(data, wrap);
            assert_eq!(
                decoder::decode_all(&text).unwrap(),
                data,
                "len={len} wrap={wrap:?}"
            );
        }
    }
}

#[test]
fn roundtrip_random_large() {
    let data = gen_data(1 << 20, 0xA85);
    let text = encode(&data, LineWrap::Columns(80));
    assert_eq!(decoder::decode_all(&text).unwrap(), data);
}

#[test]
fn roundtrip_zero_heavy() {
    // Long zero runs exercise the z-shorthand on full words and the
    // padded trailing word.
    let mut data = vec![0u8; 40_000];
    data.extend_from_slice(b"tail");
    data.extend_from_slice(&[0u8; 3]);
    let text = encode(&data, LineWrap::Columns(80));
    assert!(text.contains(&b'z'));
    assert_eq!(decoder::decode_all(&text).unwrap(), data);
}

#[test]
fn wrapped_output_is_reversible_and_bounded() {
    let data = gen_data(4096, 7);
    let text = encode(&data, LineWrap::Columns(15));
    for line in text.split(|&b| b == b'\n') {
        assert!(line.len() <= 15, "line of {} chars", line.len());
    }
    // Stripping the line breaks changes nothing for the decoder.
    let stripped: Vec<u8> = text.iter().copied().filter(|&b| b != b'\n').collect();
    assert_eq!(decoder::decode_all(&stripped).unwrap(), data);
    assert_eq!(decoder::decode_all(&text).unwrap(), data);
}

#[test]
fn streaming_equals_one_shot_for_every_chunk_size() {
    let data = gen_data(1000, 99);
    let whole = encode(&data, LineWrap::Columns(40));

    for chunk_size in [1, 2, 3, 4, 5, 7, 64, 999] {
        let mut enc = Ascii85Encoder::new(Vec::new(), LineWrap::Columns(40));
        for chunk in data.chunks(chunk_size) {
            enc.write_bytes(chunk).unwrap();
        }
        let (text, _) = enc.finish().unwrap();
        assert_eq!(text, whole, "encode chunk_size={chunk_size}");

        let mut dec = Ascii85Decoder::new_delimited(Vec::new());
        for chunk in whole.chunks(chunk_size) {
            dec.push(chunk).unwrap();
        }
        let (bytes, _) = dec.finish().unwrap();
        assert_eq!(bytes, data, "decode chunk_size={chunk_size}");
    }
}

#[test]
fn decode_failure_reports_the_rule() {
    let cases: &[(&[u8], &str)] = &[
        (b"<~!!z~>", "'z'"),
        (b"<~uuuuu~>", "exceeds 32 bits"),
        (b"<~!~>", "single character"),
        (b"<~;KZG\x07~>", "illegal character"),
    ];
    for (text, needle) in cases {
        match decoder::decode_all(text) {
            Err(DecodeError::Format(msg)) => {
                assert!(msg.contains(needle), "{text:?}: unexpected message {msg}")
            }
            other => panic!("{text:?}: expected format error, got {other:?}"),
        }
    }
}

#[test]
fn empty_and_markerless_inputs() {
    assert_eq!(encode(b"", LineWrap::Off), b"");
    assert_eq!(encode(b"", LineWrap::Columns(80)), b"");
    assert_eq!(decoder::decode_all(b"").unwrap(), b"");
    assert_eq!(decoder::decode_all(b"no markers here").unwrap(), b"");
}
