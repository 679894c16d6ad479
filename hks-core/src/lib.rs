//! core functionality for decoding and encoding
//! Hollow Knight / Silksong save files
//!
//! The PC save is a C#-framed container holding base64 of
//! AES-256-ECB-encrypted, PKCS7-padded JSON text. The Switch save is the
//! raw JSON text itself and needs no codec at all.
//!
//! # Modules
//!
//! - `base64`: table-driven base64 transcoder working on byte buffers
//! - `codec`: PC container framing plus the encryption step
//! - `error`: typed decode failures
//!
//! Everything is a pure function over in-memory buffers; the only state is
//! the constant header, alphabet tables and key, so calls are safe from any
//! thread. File I/O, platform selection and JSON parsing belong to callers.

pub mod base64;
pub mod codec;
pub mod error;

// Re-export commonly used items
pub use codec::{HEADER, KEY, TERMINATOR, decode, encode};
pub use error::CodecError;
