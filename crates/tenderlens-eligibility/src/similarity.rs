//! Character n-gram similarity between short free-text fields.
//!
//! Distance is an edit distance over padded n-grams (partial matches cost the fraction of
//! mismatched characters), normalized to `0.0..=1.0` and returned as `1 - distance`.

use std::iter;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const TRIGRAM: usize = 3;

/// Compatibility-decompose, drop combining marks, lower-case.
pub fn fold(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Similarity in `0.0..=1.0`; identical inputs score 1.
pub fn ngram_similarity(source: &str, target: &str, n: usize) -> f64 {
    let s: Vec<char> = source.chars().collect();
    let t: Vec<char> = target.chars().collect();
    let (sl, tl) = (s.len(), t.len());

    if sl == 0 || tl == 0 {
        return if sl == tl { 1.0 } else { 0.0 };
    }
    let longest = sl.max(tl) as f64;

    if n == 0 || sl < n || tl < n {
        let same = s.iter().zip(&t).filter(|(a, b)| a == b).count();
        return same as f64 / longest;
    }

    // `None` is the padding before the first character.
    let padded: Vec<Option<char>> = iter::repeat_n(None, n - 1)
        .chain(s.iter().copied().map(Some))
        .collect();

    let mut prev: Vec<f64> = (0..=sl).map(|i| i as f64).collect();
    let mut cur = vec![0.0; sl + 1];
    let mut gram: Vec<Option<char>> = Vec::with_capacity(n);

    for j in 1..=tl {
        gram.clear();
        if j < n {
            gram.extend(iter::repeat_n(None, n - j));
            gram.extend(t[..j].iter().copied().map(Some));
        } else {
            gram.extend(t[j - n..j].iter().copied().map(Some));
        }

        cur[0] = j as f64;
        for i in 1..=sl {
            let mut cost = 0usize;
            let mut compared = n;
            for (k, expected) in gram.iter().enumerate() {
                let actual = padded[i - 1 + k];
                if actual != *expected {
                    cost += 1;
                } else if actual.is_none() {
                    compared -= 1;
                }
            }
            let substitution = cost as f64 / compared as f64;
            cur[i] = (cur[i - 1] + 1.0)
                .min(prev[i] + 1.0)
                .min(prev[i - 1] + substitution);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    1.0 - prev[sl] / longest
}

/// Trigram similarity of two texts after [`fold`]ing both.
pub fn folded_similarity(a: &str, b: &str) -> f64 {
    ngram_similarity(&fold(a), &fold(b), TRIGRAM)
}
