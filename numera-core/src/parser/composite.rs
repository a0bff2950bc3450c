//! Composite-number resolution over classified word tokens
//!
//! The grammar behind "nine hundred and ninety nine thousand, forty-two":
//! a right-to-left scan marks the terminal round-number tokens, the token
//! list is partitioned at each terminal and every partition resolves
//! recursively over an index sub-slice. Phrases with no round-number reach
//! fold through a small shift-reduce stack instead.

use smallvec::SmallVec;

use crate::config::NumberConfig;

/// Resolve an ordered list of number words into a single value.
///
/// Token classification (cardinal, ordinal, round-number) happens against
/// the configured maps; a word in none of them goes through the culture's
/// composite-word hook and contributes only if that yields a value.
pub fn resolve_integer(config: &NumberConfig, tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    // Terminal scan: right to left, tracking the smallest multiplier seen.
    // A round token is terminal only if it reaches strictly beyond that
    // floor, so the trailing "hundred" of "three hundred thousand two
    // hundred" closes its own partition instead of subsuming the phrase.
    let mut is_terminal = vec![false; tokens.len()];
    let mut end_flag: i64 = 1;
    for i in (0..tokens.len()).rev() {
        if let Some(scale) = config.round_value(&tokens[i]) {
            if scale > end_flag {
                is_terminal[i] = true;
                end_flag = scale;
            }
        }
    }

    if end_flag == 1 {
        return fold_simple(config, tokens);
    }

    // Partition at each terminal token: everything before it is the
    // multiplicand for its scale, the tail after the last terminal adds in.
    let mut total = 0.0;
    let mut last_index = 0;
    for i in 0..tokens.len() {
        if is_terminal[i] {
            let scale = config
                .round_value(&tokens[i])
                .expect("terminal tokens are round-number words") as f64;
            let multiplicand = if i == 0 {
                1.0
            } else {
                resolve_integer(config, &tokens[last_index..i])
            };
            total += scale * multiplicand;
            last_index = i + 1;
        }
    }
    if last_index != tokens.len() {
        total += resolve_integer(config, &tokens[last_index..]);
    }
    total
}

/// Shift-reduce fold for phrases without round-number reach ("twenty-one",
/// "ninety ninth"). An explicit stack, not recursion: the combine step needs
/// the two most recent values at once.
fn fold_simple(config: &NumberConfig, tokens: &[String]) -> f64 {
    let mut stack: SmallVec<[f64; 8]> = SmallVec::new();
    let mut previous = "";

    for token in tokens {
        let token = token.as_str();
        if let Some(&ordinal) = config.ordinal_map.get(token) {
            let ordinal = ordinal as f64;
            match stack.pop() {
                Some(top) if top >= ordinal => {
                    // "ninety" + "ninth" extends the pending integer
                    stack.push(top + ordinal);
                }
                Some(top) => {
                    // "three" + "hundredth" multiplies the drained sum
                    let mut drained = top;
                    while let Some(value) = stack.pop() {
                        drained += value;
                    }
                    stack.push(drained * ordinal);
                }
                None => stack.push(ordinal),
            }
        } else if let Some(&cardinal) = config.cardinal_map.get(token) {
            let cardinal = cardinal as f64;
            if previous == "-" {
                let sum = stack.pop().unwrap_or(0.0) + cardinal;
                stack.push(sum);
            } else if config
                .written_integer_separators
                .iter()
                .any(|s| s.as_str() == previous)
                || stack.len() < 2
            {
                stack.push(cardinal);
            } else {
                let sum = stack.pop().unwrap_or(0.0) + cardinal;
                let sum = stack.pop().unwrap_or(0.0) + sum;
                stack.push(sum);
            }
        } else {
            let composite = config.resolve_composite_word(token);
            if composite != 0 {
                stack.push(composite as f64);
            }
        }
        previous = token;
    }

    stack.iter().sum()
}

/// Resolve fractional-part tokens following the decimal-separator word.
///
/// A leading cardinal of ten or more reads as an integer whose digits become
/// the decimal digits ("point twenty-five" → 0.25); otherwise each token is
/// one decimal digit at a shrinking power of ten.
pub fn resolve_decimal_fraction(config: &NumberConfig, tokens: &[String]) -> f64 {
    let Some(first) = tokens.first() else {
        return 0.0;
    };

    if config.cardinal_map.get(first.as_str()).is_some_and(|&v| v >= 10) {
        let int_value = resolve_integer(config, tokens);
        let repr = format!("0.{}", int_value as i64);
        return repr.parse().unwrap_or(0.0);
    }

    let mut value = 0.0;
    let mut scale = 0.1;
    for token in tokens {
        let digit = config
            .cardinal_map
            .get(token.as_str())
            .copied()
            .unwrap_or_else(|| {
                panic!("decimal-digit word {token:?} missing from cardinal map")
            });
        value += digit as f64 * scale;
        scale *= 0.1;
    }
    value
}
