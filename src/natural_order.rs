/*!
 * Natural ("alphanumeric") string ordering for display names.
 *
 * Embedded digit runs compare by numeric value, everything else by code
 * point, so `episode 2` sorts before `episode 10`.
 */

use std::cmp::Ordering;

/// Compare two names in natural order.
///
/// Both strings are walked in lock-step. When the current characters are both
/// ASCII digits, the maximal digit run is taken from each side (the runs may
/// differ in length), the runs are compared by value and the walk resumes
/// after each run. Leading zeros do not count, so `"007"` equals `"7"`.
///
/// Once either string runs out the result is `Equal`, even if the other one
/// has characters left: `compare("file", "file2")` is `Equal`. Use
/// [`sort_natural`] to sort, which breaks these ties.
///
/// Only ASCII `0`-`9` start a number. Digits from other scripts (Arabic-Indic,
/// fullwidth) are compared as ordinary characters.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (ca, cb) = (a[i], b[j]);

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let run_a = digit_run(&a, i);
            let run_b = digit_run(&b, j);

            let ordering = compare_digit_runs(&a[i..run_a], &b[j..run_b]);
            if ordering != Ordering::Equal {
                return ordering;
            }

            i = run_a;
            j = run_b;
        } else {
            if ca != cb {
                return ca.cmp(&cb);
            }
            i += 1;
            j += 1;
        }
    }

    Ordering::Equal
}

/// Sort `items` by the natural order of `key`.
///
/// [`compare`] alone is not a total order: a prefix compares equal to any
/// longer string, and `"a01"` equals `"a1"` although other names can tell
/// them apart. Sorting therefore uses [`sort_key`], which agrees with
/// [`compare`] wherever it is not `Equal`, and falls back to plain string
/// order for names with identical keys.
pub fn sort_natural<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| {
        let name = key(item);
        (sort_key(name), name.to_string())
    });
}

/// One unit of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A character that is not an ASCII digit
    Text(char),
    /// A digit run without its leading zeros
    Num(String),
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Num(a), Self::Num(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            // Any digit sits between the characters below '0' and above '9'
            (Self::Num(_), Self::Text(c)) => '0'.cmp(c),
            (Self::Text(c), Self::Num(_)) => c.cmp(&'0'),
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Totally ordered key for `name`: text characters and digit runs in order
pub fn sort_key(name: &str) -> Vec<Token> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());

    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_digit() {
            let end = digit_run(&chars, i);
            tokens.push(Token::Num(strip_leading_zeros(&chars[i..end]).iter().collect()));
            i = end;
        } else {
            tokens.push(Token::Text(chars[i]));
            i += 1;
        }
    }

    tokens
}

// @returns: Index one past the digit run starting at `start`
fn digit_run(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

// Numeric comparison of arbitrarily long runs: drop leading zeros, then the
// longer run is larger and equal lengths compare digit by digit.
fn compare_digit_runs(a: &[char], b: &[char]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let first_significant = run.iter().position(|&c| c != '0').unwrap_or(run.len());
    &run[first_significant..]
}
