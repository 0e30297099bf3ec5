//! String similarity used by the fuzzy matching tier.
//!
//! `Gestalt` is the Ratcliff/Obershelp ratio `2*M / (|a| + |b|)`, where `M`
//! is the number of characters in the recursively found longest common
//! blocks. `Levenshtein` and `JaroWinkler` delegate to `strsim` for callers
//! that want a different tolerance profile.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    #[default]
    Gestalt,
    Levenshtein,
    JaroWinkler,
}

impl SimilarityMetric {
    /// Similarity of `candidate` against `word`, in `0.0..=1.0`.
    pub fn ratio(&self, candidate: &str, word: &str) -> f64 {
        match self {
            SimilarityMetric::Gestalt => gestalt_ratio(candidate, word),
            SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(candidate, word),
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(candidate, word),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Gestalt => "gestalt",
            SimilarityMetric::Levenshtein => "levenshtein",
            SimilarityMetric::JaroWinkler => "jaro_winkler",
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gestalt" => Ok(SimilarityMetric::Gestalt),
            "levenshtein" => Ok(SimilarityMetric::Levenshtein),
            "jaro_winkler" | "jaro-winkler" => Ok(SimilarityMetric::JaroWinkler),
            other => anyhow::bail!(
                "unknown similarity metric '{other}' (expected gestalt, levenshtein or jaro_winkler)"
            ),
        }
    }
}

/// Returns the candidate with the highest ratio against `word` that clears `cutoff`.
/// Equal ratios resolve to the lexicographically greatest candidate.
pub fn best_match<'a, I>(
    word: &str,
    candidates: I,
    cutoff: f64,
    metric: SimilarityMetric,
) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let ratio = metric.ratio(candidate, word);
        if ratio < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_name, best_ratio)) => {
                ratio > best_ratio || (ratio == best_ratio && candidate > best_name)
            }
        };
        if better {
            best = Some((candidate, ratio));
        }
    }
    best
}

/// Ratcliff/Obershelp similarity of two strings, compared by Unicode scalar.
/// Two empty strings are identical (1.0).
pub fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = find_longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`; earliest in `a`,
/// then earliest in `b`, among blocks of maximal size.
fn find_longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j2len[j] = length of the common block ending at a[i-1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = match j.checked_sub(1) {
                    Some(pj) => j2len.get(&pj).copied().unwrap_or(0),
                    None => 0,
                };
                let k = prev + 1;
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next;
    }
    (best_i, best_j, best_size)
}
