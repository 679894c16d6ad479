/// Error type shared by the base64 transcoder and the container codec
use thiserror::Error;

/// Everything that can go wrong while decoding a PC save file.
///
/// Encoding never fails, so only the decode path produces these. The
/// variants fall into four classes: container structure (`TooShort`,
/// `HeaderMismatch`, `UnterminatedLength`, `LengthMismatch`), base64
/// symbols (`InvalidSymbol`), cipher stage (`BlockSize`, `BadPadding`)
/// and the final text decode (`Utf8`).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("container too short: {0} bytes")]
    TooShort(usize),

    #[error("fixed header bytes do not match the save container format")]
    HeaderMismatch,

    #[error("length prefix does not terminate within 5 bytes")]
    UnterminatedLength,

    #[error("length prefix declares {declared} payload bytes but {actual} follow")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("byte 0x{byte:02x} at offset {offset} is not a base64 symbol")]
    InvalidSymbol { byte: u8, offset: usize },

    #[error("ciphertext length {0} is not a nonzero multiple of 16")]
    BlockSize(usize),

    #[error("PKCS7 pad length {0} out of range")]
    BadPadding(u8),

    #[error("decrypted save is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
