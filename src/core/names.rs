//
// Random file names for batch mode: prefix + 15 chars of [a-z0-9] + suffix,
// pairwise unique within one call.
//

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::core::error::{Error, Result};

/// length of the random part of a name
pub const NAME_BODY_LEN: usize = 15;

/// retries allowed for a single name before giving up
pub const MAX_ATTEMPTS_PER_NAME: usize = 1_000_000;

/// upper bound on the up-front reservation, `count` comes from the user
const RESERVE_HINT: usize = 4096;

pub const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates `count` distinct names.
/// The generator is seeded from the OS once per call.
pub fn generate_names(prefix: &str, suffix: &str, count: usize) -> Result<Vec<String>> {
    let mut rng = StdRng::from_entropy();
    generate_names_with(&mut rng, prefix, suffix, count)
}

pub fn generate_names_with<R: Rng>(
    rng: &mut R,
    prefix: &str,
    suffix: &str,
    count: usize,
) -> Result<Vec<String>> {
    bounded_generate(rng, prefix, suffix, count, MAX_ATTEMPTS_PER_NAME)
}

fn bounded_generate<R: Rng>(
    rng: &mut R,
    prefix: &str,
    suffix: &str,
    count: usize,
    max_attempts: usize,
) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(count.min(RESERVE_HINT));
    let mut seen = HashSet::with_capacity(count.min(RESERVE_HINT));

    for _ in 0..count {
        let mut attempts = 0;
        loop {
            if attempts == max_attempts {
                dbg_println!(
                    "name generation: {} collisions in a row (prefix {:?}, suffix {:?})",
                    attempts,
                    prefix,
                    suffix
                );
                return Err(Error::NameGenerationExhausted { attempts });
            }
            attempts += 1;

            let name = format!("{}{}{}", prefix, random_body(rng), suffix);
            if seen.insert(name.clone()) {
                names.push(name);
                break;
            }
        }
    }

    Ok(names)
}

fn random_body<R: Rng>(rng: &mut R) -> String {
    (0..NAME_BODY_LEN)
        .map(|_| NAME_CHARSET[rng.gen_range(0..NAME_CHARSET.len())] as char)
        .collect()
}
