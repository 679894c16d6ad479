/// Table-driven base64 transcoder (RFC 4648 standard alphabet, `=` padding)
///
/// Operates on byte buffers rather than strings so it composes with the
/// cipher stage, which produces non-text output.
use crate::error::CodecError;

/// Standard alphabet plus `=` as the padding sentinel at index 64
const ALPHABET: &[u8; 65] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";

const PAD: u8 = 64;

/// Marks bytes outside the alphabet in the decode table
const INVALID: u8 = 0xFF;

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// byte value -> 6-bit symbol index (or INVALID)
static DECODE_TABLE: [u8; 256] = build_decode_table();

/// Encode bytes to base64 symbols. Total: every input is valid.
///
/// Output length is always a multiple of 4; a trailing 1-byte group emits
/// two symbols plus `==`, a trailing 2-byte group three symbols plus `=`.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len().div_ceil(3) * 4);

    let mut groups = input.chunks_exact(3);
    for group in &mut groups {
        out.push(ALPHABET[(group[0] >> 2) as usize]);
        out.push(ALPHABET[((group[0] & 0x03) << 4 | group[1] >> 4) as usize]);
        out.push(ALPHABET[((group[1] & 0x0F) << 2 | group[2] >> 6) as usize]);
        out.push(ALPHABET[(group[2] & 0x3F) as usize]);
    }

    match groups.remainder() {
        [a] => {
            out.push(ALPHABET[(a >> 2) as usize]);
            out.push(ALPHABET[((a & 0x03) << 4) as usize]);
            out.push(ALPHABET[PAD as usize]);
            out.push(ALPHABET[PAD as usize]);
        }
        [a, b] => {
            out.push(ALPHABET[(a >> 2) as usize]);
            out.push(ALPHABET[((a & 0x03) << 4 | b >> 4) as usize]);
            out.push(ALPHABET[((b & 0x0F) << 2) as usize]);
            out.push(ALPHABET[PAD as usize]);
        }
        _ => {}
    }

    out
}

/// Decode base64 symbols back to bytes.
///
/// The symbol stream is truncated at the first `=`, so trailing padding and
/// anything after it are ignored. Any byte outside the alphabet is an
/// `InvalidSymbol` error. A symbol count that is not a multiple of 4 is
/// tolerated: two or three trailing symbols decode to one or two bytes, a
/// single trailing symbol carries fewer than 8 bits and contributes nothing.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut symbols = Vec::with_capacity(input.len());
    for (offset, &byte) in input.iter().enumerate() {
        let index = DECODE_TABLE[byte as usize];
        if index == INVALID {
            return Err(CodecError::InvalidSymbol { byte, offset });
        }
        if index == PAD {
            break;
        }
        symbols.push(index);
    }

    let mut out = Vec::with_capacity(symbols.len() * 3 / 4);

    let mut groups = symbols.chunks_exact(4);
    for group in &mut groups {
        out.push(group[0] << 2 | group[1] >> 4);
        out.push(group[1] << 4 | group[2] >> 2);
        out.push(group[2] << 6 | group[3]);
    }

    match groups.remainder() {
        [a, b] => out.push(a << 2 | b >> 4),
        [a, b, c] => {
            out.push(a << 2 | b >> 4);
            out.push(b << 4 | c >> 2);
        }
        _ => {}
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(&[]), Vec::<u8>::new());
        assert_eq!(decode(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b"A"), b"QQ==");
        assert_eq!(encode(b"AB"), b"QUI=");
        assert_eq!(encode(b"ABC"), b"QUJD");
        assert_eq!(encode(b"Man"), b"TWFu");
        assert_eq!(encode(b"Hello, World!"), b"SGVsbG8sIFdvcmxkIQ==");
    }

    #[test]
    fn test_output_always_multiple_of_4() {
        for len in 0..32 {
            let data: Vec<u8> = (0..len as u8).collect();
            assert_eq!(encode(&data).len() % 4, 0, "len={}", len);
            assert_eq!(encode(&data).len(), data.len().div_ceil(3) * 4);
        }
    }

    #[test]
    fn test_roundtrip_all_lengths() {
        // Cover every trailing-group shape and all byte values
        for len in 0..64 {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let decoded = decode(&encode(&data)).unwrap();
            assert_eq!(decoded, data, "len={}", len);
        }
        let all: Vec<u8> = (0u16..256).map(|v| v as u8).collect();
        assert_eq!(decode(&encode(&all)).unwrap(), all);
    }

    #[test]
    fn test_padding_truncates_stream() {
        // Everything after the first '=' is ignored
        assert_eq!(decode(b"QQ==QUJD").unwrap(), b"A");
    }

    #[test]
    fn test_rejects_non_alphabet_byte() {
        let err = decode(b"QU*D").unwrap_err();
        match err {
            crate::CodecError::InvalidSymbol { byte, offset } => {
                assert_eq!(byte, b'*');
                assert_eq!(offset, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_lenient_symbol_count() {
        // 2 or 3 leftover symbols yield 1 or 2 bytes, 1 leftover yields none
        assert_eq!(decode(b"QQ").unwrap(), b"A");
        assert_eq!(decode(b"QUI").unwrap(), b"AB");
        assert_eq!(decode(b"Q").unwrap(), Vec::<u8>::new());
    }
}
