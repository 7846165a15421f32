use anyhow::{Context, Result, bail};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// Longest range a single `a..b` token may expand to.
const MAX_RANGE: u64 = 10_000;

/// Resolve CLI seed tokens into a de-duplicated list, first mention first.
///
/// Supports literal integers (negatives use their magnitude) and ranges
/// written `a..b` or `a..=b`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seen = HashSet::new();
    let mut seeds = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if let Some((start, end)) = token.split_once("..") {
        let (end, inclusive) = match end.strip_prefix('=') {
            Some(rest) => (rest, true),
            None => (end, false),
        };
        let start: u64 = start
            .parse()
            .with_context(|| format!("invalid range start in {token}"))?;
        let end: u64 = end
            .parse()
            .with_context(|| format!("invalid range end in {token}"))?;
        let end = if inclusive {
            end.saturating_add(1)
        } else {
            end
        };
        if end <= start {
            bail!("empty seed range: {token}");
        }
        if end - start > MAX_RANGE {
            bail!("seed range {token} is longer than {MAX_RANGE}");
        }
        return Ok((start..end).collect());
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(vec![value.unsigned_abs()]);
    }
    if let Ok(value) = token.parse::<u64>() {
        return Ok(vec![value]);
    }
    bail!("Unrecognized seed token: {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_numbers_and_ranges() {
        let seeds = resolve_seed_inputs(&tokens(&["42", "-7", "3..5", "10..=11", "42"])).unwrap();
        assert_eq!(seeds, vec![42, 7, 3, 4, 10, 11]);
    }

    #[test]
    fn empty_input_uses_default() {
        assert_eq!(resolve_seed_inputs(&[]).unwrap(), vec![DEFAULT_SEED]);
    }

    #[test]
    fn rejects_garbage_and_empty_ranges() {
        assert!(resolve_seed_inputs(&tokens(&["kickoff"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["5..5"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["0..20000"])).is_err());
    }
}
