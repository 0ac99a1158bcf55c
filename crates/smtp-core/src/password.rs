//! Random passwords for new sub-users.
//!
//! SendGrid requires a password on sub-user creation even though the
//! cluster only ever authenticates with an API key, so the policy is
//! minimal: a fixed length with at least one digit and one symbol.

use rand::Rng;
use rand::seq::SliceRandom;
use secrecy::SecretString;
use thiserror::Error;

const LOWER_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"~!@#$%^&*()_+`-={}|[]\\:\"<>?,./";

/// What a generated password must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Total number of characters.
    pub length: usize,
    /// Number of digits.
    pub digits: usize,
    /// Number of symbols.
    pub symbols: usize,
    /// Letters are lowercase only.
    pub no_upper: bool,
    /// A character may occur more than once.
    pub allow_repeat: bool,
}

impl PasswordPolicy {
    /// Policy used for every new sub-user.
    pub const SUB_USER: Self = Self {
        length: 10,
        digits: 1,
        symbols: 1,
        no_upper: false,
        allow_repeat: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("number of digits and symbols ({requested}) exceeds password length ({length})")]
    TooShort { requested: usize, length: usize },

    #[error(
        "cannot pick {requested} distinct {class} characters from {available} without repeats"
    )]
    NotEnoughCharacters {
        class: &'static str,
        requested: usize,
        available: usize,
    },
}

/// Produces passwords satisfying a [`PasswordPolicy`].
pub trait PasswordGenerator: Send + Sync {
    fn generate(&self, policy: &PasswordPolicy) -> Result<SecretString, PasswordError>;
}

/// [`PasswordGenerator`] backed by the thread-local CSPRNG.
///
/// Places exactly `digits` digits and `symbols` symbols, fills the rest with
/// letters and shuffles the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPasswordGenerator;

impl RandomPasswordGenerator {
    /// Generate with an explicit RNG.
    pub fn generate_with<R: Rng + ?Sized>(
        policy: &PasswordPolicy,
        rng: &mut R,
    ) -> Result<String, PasswordError> {
        let requested = policy.digits + policy.symbols;
        if requested > policy.length {
            return Err(PasswordError::TooShort {
                requested,
                length: policy.length,
            });
        }

        let letters: Vec<u8> = if policy.no_upper {
            LOWER_LETTERS.to_vec()
        } else {
            [LOWER_LETTERS, UPPER_LETTERS].concat()
        };

        let mut chars = Vec::with_capacity(policy.length);
        pick(
            &mut chars,
            "letter",
            &letters,
            policy.length - requested,
            policy.allow_repeat,
            rng,
        )?;
        pick(
            &mut chars,
            "digit",
            DIGITS,
            policy.digits,
            policy.allow_repeat,
            rng,
        )?;
        pick(
            &mut chars,
            "symbol",
            SYMBOLS,
            policy.symbols,
            policy.allow_repeat,
            rng,
        )?;
        chars.shuffle(rng);

        Ok(chars.into_iter().map(char::from).collect())
    }
}

impl PasswordGenerator for RandomPasswordGenerator {
    fn generate(&self, policy: &PasswordPolicy) -> Result<SecretString, PasswordError> {
        let password = Self::generate_with(policy, &mut rand::thread_rng())?;
        Ok(SecretString::from(password))
    }
}

fn pick<R: Rng + ?Sized>(
    out: &mut Vec<u8>,
    class: &'static str,
    alphabet: &[u8],
    count: usize,
    allow_repeat: bool,
    rng: &mut R,
) -> Result<(), PasswordError> {
    if allow_repeat {
        out.extend((0..count).filter_map(|_| alphabet.choose(rng).copied()));
        return Ok(());
    }
    if count > alphabet.len() {
        return Err(PasswordError::NotEnoughCharacters {
            class,
            requested: count,
            available: alphabet.len(),
        });
    }
    out.extend(alphabet.choose_multiple(rng, count).copied());
    Ok(())
}
