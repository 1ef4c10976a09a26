/*!
 * Opaque, reversible identifiers for filesystem paths.
 *
 * Paths never appear in URLs directly. Instead the absolute path is base64
 * encoded, one random alphanumeric character is put in front and another in
 * the middle, and the result is base64 encoded again. Decoding undoes those
 * steps; it needs no secret.
 *
 * Every call to [`PathIdCodec::encode`] draws fresh wrapper characters, so
 * the same path gets a different token each time. All of them decode to the
 * same path.
 */

use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::IdentifierError;

// @const: Alphabet for the two wrapper characters
const WRAPPER_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Path ⇄ token codec owning its random generator.
///
/// The generator sits behind a mutex so a single codec can be shared by
/// concurrent callers.
pub struct PathIdCodec<R = StdRng> {
    rng: Mutex<R>,
}

impl PathIdCodec<StdRng> {
    /// Codec seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic codec, mainly for tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PathIdCodec<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Mint a token for `path`. Relative paths are made absolute first.
    ///
    /// Non-UTF-8 path bytes are replaced with U+FFFD before encoding.
    pub fn encode(&self, path: &Path) -> String {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let inner = STANDARD.encode(absolute.to_string_lossy().as_bytes());
        let half = inner.len() / 2;

        let (first, second) = {
            let mut rng = self.rng.lock();
            (wrapper_char(&mut *rng), wrapper_char(&mut *rng))
        };

        let mut wrapped = String::with_capacity(inner.len() + 2);
        wrapped.push(first);
        wrapped.push_str(&inner[..half]);
        wrapped.push(second);
        wrapped.push_str(&inner[half..]);

        STANDARD.encode(wrapped.as_bytes())
    }

    /// Recover the path behind `token`
    pub fn decode(&self, token: &str) -> Result<PathBuf, IdentifierError> {
        decode(token)
    }
}

fn wrapper_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    WRAPPER_ALPHABET[rng.random_range(0..WRAPPER_ALPHABET.len())] as char
}

/// Recover the path behind `token`. Does not need a codec instance.
pub fn decode(token: &str) -> Result<PathBuf, IdentifierError> {
    let wrapped = STANDARD
        .decode(token.as_bytes())
        .map_err(|e| IdentifierError::InvalidIdentifier(format!("{}: {}", token, e)))?;

    if wrapped.len() < 2 {
        return Err(IdentifierError::InvalidIdentifier(format!(
            "{}: too short to hold wrapper characters",
            token
        )));
    }

    let half = (wrapped.len() - 2) / 2;
    let body = &wrapped[1..];
    let mut inner = Vec::with_capacity(body.len() - 1);
    inner.extend_from_slice(&body[..half]);
    inner.extend_from_slice(&body[half + 1..]);

    let path_bytes = STANDARD
        .decode(&inner)
        .map_err(|e| IdentifierError::InvalidIdentifier(format!("{}: {}", token, e)))?;
    let path = String::from_utf8(path_bytes).map_err(|_| {
        IdentifierError::InvalidIdentifier(format!("{}: path is not valid UTF-8", token))
    })?;

    Ok(PathBuf::from(path))
}
