/// PC save container framing: fixed header, length prefix, base64 payload,
/// terminator, with the AES-ECB/PKCS7 encryption step in the middle
use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::base64;
use crate::error::CodecError;

// Layout: [header(22) | length prefix(1-5) | base64 payload | terminator(1)]

/// Fixed 22-byte preamble written by the game's C# BinaryFormatter;
/// identical for every PC save, never parsed for content
pub const HEADER: [u8; 22] = [
    0, 1, 0, 0, 0, 255, 255, 255, 255, 1, 0, 0, 0, 0, 0, 0, 0, 6, 1, 0, 0, 0,
];

/// 32-byte AES-256 key embedded in the game binary
pub const KEY: [u8; 32] = *b"UKu52ePUBwetZ9wNX88o54dnfKRu0T1l";

/// Single framing byte closing every container
pub const TERMINATOR: u8 = 11;

/// AES block size; also the PKCS7 padding boundary
const BLOCK: usize = 16;

/// The length prefix is the 7-bit-continuation varint of MS-NRBF
/// LengthPrefixedString: little-endian 7-bit groups, high bit set while more
/// groups follow, at most 5 bytes for the 32-bit value space.
fn encode_length_prefix(length: usize) -> Vec<u8> {
    // The origin format stores the length as a 32-bit signed int
    let mut value = u32::try_from(length).unwrap_or(u32::MAX).min(0x7FFF_FFFF);

    let mut out = Vec::with_capacity(5);
    while value >> 7 != 0 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out
}

/// Parse a length prefix from the start of `buf`, returning the value and
/// the number of bytes consumed
fn decode_length_prefix(buf: &[u8]) -> Result<(usize, usize), CodecError> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().take(5).enumerate() {
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value as usize, i + 1));
        }
    }
    Err(CodecError::UnterminatedLength)
}

/// PKCS7: pad value equals pad length. A plaintext already on a block
/// boundary still gets a full extra block, so the pad is never empty.
fn pkcs7_pad(data: &mut Vec<u8>) {
    let pad = BLOCK - data.len() % BLOCK;
    data.resize(data.len() + pad, pad as u8);
}

/// Drop the PKCS7 pad. Only the declared length is checked against the
/// block size and buffer; the pad bytes themselves are not verified,
/// matching the lenient behavior of the game's own loader.
fn pkcs7_unpad(data: &mut Vec<u8>) -> Result<(), CodecError> {
    let pad = *data.last().ok_or(CodecError::BadPadding(0))?;
    if pad == 0 || pad as usize > BLOCK || pad as usize > data.len() {
        return Err(CodecError::BadPadding(pad));
    }
    data.truncate(data.len() - pad as usize);
    Ok(())
}

/// Encrypt in place, block by block (ECB: no chaining, no IV).
/// Caller guarantees the buffer is already padded to a block multiple.
fn aes_ecb_encrypt(data: &mut [u8]) {
    let cipher = Aes256::new(GenericArray::from_slice(&KEY));
    for block in data.chunks_exact_mut(BLOCK) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
}

/// Decrypt in place, block by block
fn aes_ecb_decrypt(data: &mut [u8]) -> Result<(), CodecError> {
    if data.is_empty() || data.len() % BLOCK != 0 {
        return Err(CodecError::BlockSize(data.len()));
    }
    let cipher = Aes256::new(GenericArray::from_slice(&KEY));
    for block in data.chunks_exact_mut(BLOCK) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(())
}

/// Decode a PC save container to its embedded JSON text.
///
/// The returned string is whatever the game serialized; this function makes
/// no claim about JSON well-formedness, that is the caller's job.
pub fn decode(container: &[u8]) -> Result<String, CodecError> {
    // header + at least one prefix byte + terminator
    if container.len() < HEADER.len() + 2 {
        return Err(CodecError::TooShort(container.len()));
    }
    if container[..HEADER.len()] != HEADER {
        return Err(CodecError::HeaderMismatch);
    }

    // The trailing terminator is framing only; dropped without inspection
    let body = &container[HEADER.len()..container.len() - 1];

    let (declared, consumed) = decode_length_prefix(body)?;
    let payload = &body[consumed..];
    if payload.len() != declared {
        return Err(CodecError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let mut plain = base64::decode(payload)?;
    aes_ecb_decrypt(&mut plain)?;
    pkcs7_unpad(&mut plain)?;

    Ok(String::from_utf8(plain)?)
}

/// Encode JSON text into a PC save container.
///
/// Infallible and deterministic: ECB has no IV, so the same text always
/// produces the same bytes.
pub fn encode(json: &str) -> Vec<u8> {
    let mut plain = json.as_bytes().to_vec();
    pkcs7_pad(&mut plain);
    aes_ecb_encrypt(&mut plain);

    let payload = base64::encode(&plain);
    let prefix = encode_length_prefix(payload.len());

    let mut container = Vec::with_capacity(HEADER.len() + prefix.len() + payload.len() + 1);
    container.extend_from_slice(&HEADER);
    container.extend_from_slice(&prefix);
    container.extend_from_slice(&payload);
    container.push(TERMINATOR);
    container
}
