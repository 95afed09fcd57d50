//! Ratcliff/Obershelp string similarity.
//!
//! The ratio is `2·M / T`, where `T` is the combined length of both strings and
//! `M` the number of characters in matching blocks: the longest common block is
//! taken first, then the same search recurses on the unmatched text to its left
//! and to its right. Among equally long blocks the earliest in `a` wins, then
//! the earliest in `b`. Strings are compared by Unicode scalar value and no
//! characters are treated as junk.
//!
//! That tie-break makes the raw block search order-sensitive (`"aba"` against
//! `"babba"` matches 3 characters one way and 2 the other), so [`ratio`] always
//! searches with the lexicographically smaller string as `a`.

use std::collections::HashMap;

/// Returns the similarity ratio of two strings, in `[0, 1]`.
///
/// Symmetric in its arguments. Two empty strings are identical and score `1.0`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Returns `M`: the total length of the recursively matched blocks.
#[must_use]
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Finds the longest block `a[i..i+size] == b[j..j+size]` inside the window.
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_runs = HashMap::new();
        if let Some(js) = positions.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = j
                    .checked_sub(1)
                    .and_then(|prev| run_ending_at.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_runs.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_ending_at = next_runs;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn identical_and_disjoint() {
        assert_eq!(ratio("person", "person"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn known_ratios() {
        // "person" is a block of "persons": 2*6/13
        assert!(approx(ratio("person", "persons"), 12.0 / 13.0));
        // "car" / "automobile": only "a" survives the block recursion, 2/13
        assert!(approx(ratio("car", "automobile"), 2.0 / 13.0));
        // classic example: "abcd" / "bcde" share "bcd"
        assert!(approx(ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn longest_block_is_matched_before_recursing() {
        // "ab" matches at the start; the right side "xcd" vs "cdy" then
        // contributes "cd", for 4 matched characters out of 10.
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcdy".chars().collect();
        assert_eq!(matching_characters(&a, &b), 4);
    }

    #[test]
    fn blocks_do_not_cross() {
        // Longest block "bcd" splits the strings; the remaining "a" (left in a)
        // and "a" (right in b) are on opposite sides and cannot match.
        let a: Vec<char> = "abcd".chars().collect();
        let b: Vec<char> = "bcda".chars().collect();
        assert_eq!(matching_characters(&a, &b), 3);
    }

    #[test]
    fn compares_unicode_scalars() {
        assert!(approx(ratio("café", "cafe"), 0.75));
    }

    #[test]
    fn raw_block_search_is_order_sensitive() {
        let aba: Vec<char> = "aba".chars().collect();
        let babba: Vec<char> = "babba".chars().collect();
        assert_eq!(matching_characters(&aba, &babba), 3);
        assert_eq!(matching_characters(&babba, &aba), 2);
    }

    #[test]
    fn is_symmetric_on_examples() {
        for (a, b) in [("aba", "babba"), ("abab", "baab"), ("motorcar", "car")] {
            assert!(approx(ratio(a, b), ratio(b, a)), "{a} / {b}");
        }
    }
}
