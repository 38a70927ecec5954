//! Candidate enumeration
//!
//! Candidates are produced in lexicographic order of the Cartesian power
//! `alphabet^length`: the leftmost character varies slowest. Generation,
//! verification and the sorted index all rely on this exact order.

use crate::domain::alphabet::Alphabet;

/// Lazy iterator over every candidate of a fixed length
///
/// Works like an odometer over alphabet positions. For `length == 0` it
/// yields exactly one candidate, the empty string.
#[derive(Clone, Debug)]
pub struct Candidates<'a> {
    alphabet: &'a Alphabet,
    positions: Vec<usize>,
    exhausted: bool,
}

impl<'a> Candidates<'a> {
    /// Create an iterator starting at the first candidate (`alphabet[0]` repeated)
    pub fn new(alphabet: &'a Alphabet, length: usize) -> Self {
        Self {
            alphabet,
            positions: vec![0; length],
            exhausted: false,
        }
    }

    /// Candidate length
    pub fn length(&self) -> usize {
        self.positions.len()
    }

    fn current(&self) -> String {
        self.positions
            .iter()
            .map(|&p| self.alphabet.char_at(p))
            .collect()
    }

    /// Move to the next position, rightmost character first
    fn advance(&mut self) {
        let base = self.alphabet.len();
        for slot in self.positions.iter_mut().rev() {
            *slot += 1;
            if *slot < base {
                return;
            }
            *slot = 0;
        }
        // Every slot wrapped (or there are none): the sequence is complete
        self.exhausted = true;
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let candidate = self.current();
        self.advance();
        Some(candidate)
    }
}

impl std::iter::FusedIterator for Candidates<'_> {}

/// Number of candidates of `length` over an alphabet of `alphabet_len` characters
///
/// Returns `None` if the count does not fit in a `u64`.
pub fn candidate_count(alphabet_len: usize, length: usize) -> Option<u64> {
    let length = u32::try_from(length).ok()?;
    (alphabet_len as u64).checked_pow(length)
}

/// Candidate at position `ordinal` of the enumeration
///
/// Inverse of counting positions in [`Candidates`]. Returns `None` if
/// `ordinal` lies outside the candidate space.
pub fn nth_candidate(alphabet: &Alphabet, length: usize, ordinal: u64) -> Option<String> {
    if let Some(count) = candidate_count(alphabet.len(), length)
        && ordinal >= count
    {
        return None;
    }

    let base = alphabet.len() as u64;
    let mut rest = ordinal;
    let mut chars = vec![alphabet.char_at(0); length];
    for slot in chars.iter_mut().rev() {
        *slot = alphabet.char_at((rest % base) as usize);
        rest /= base;
    }

    // Only reachable when the space overflows u64 but the ordinal does not
    if rest != 0 {
        return None;
    }

    Some(chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Alphabet {
        "ab".parse().unwrap()
    }

    #[test]
    fn test_lexicographic_order() {
        let alphabet = ab();
        let all: Vec<String> = Candidates::new(&alphabet, 2).collect();
        assert_eq!(all, vec!["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_leftmost_varies_slowest() {
        let alphabet: Alphabet = "xyz".parse().unwrap();
        let all: Vec<String> = Candidates::new(&alphabet, 3).collect();
        assert_eq!(all.len(), 27);
        assert_eq!(all[0], "xxx");
        assert_eq!(all[1], "xxy");
        assert_eq!(all[3], "xyx");
        assert_eq!(all[9], "yxx");
        assert_eq!(all[26], "zzz");
    }

    #[test]
    fn test_zero_length_yields_empty_string_once() {
        let alphabet = ab();
        let all: Vec<String> = Candidates::new(&alphabet, 0).collect();
        assert_eq!(all, vec![String::new()]);
    }

    #[test]
    fn test_single_character_alphabet() {
        let alphabet: Alphabet = "z".parse().unwrap();
        let all: Vec<String> = Candidates::new(&alphabet, 3).collect();
        assert_eq!(all, vec!["zzz"]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let alphabet = ab();
        let mut iter = Candidates::new(&alphabet, 1);
        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(iter.next().as_deref(), Some("b"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_count_matches_enumeration() {
        let alphabet: Alphabet = "abc".parse().unwrap();
        for length in 0..5 {
            let produced = Candidates::new(&alphabet, length).count() as u64;
            assert_eq!(Some(produced), candidate_count(alphabet.len(), length));
        }
    }

    #[test]
    fn test_candidate_count_default_alphabet() {
        assert_eq!(candidate_count(94, 0), Some(1));
        assert_eq!(candidate_count(94, 2), Some(8836));
        assert_eq!(candidate_count(94, 10), None);
    }

    #[test]
    fn test_nth_candidate_matches_iterator() {
        let alphabet: Alphabet = "abc".parse().unwrap();
        for (ordinal, candidate) in Candidates::new(&alphabet, 3).enumerate() {
            assert_eq!(
                nth_candidate(&alphabet, 3, ordinal as u64),
                Some(candidate),
                "Mismatch at ordinal {}",
                ordinal
            );
        }
    }

    #[test]
    fn test_nth_candidate_out_of_range() {
        let alphabet = ab();
        assert_eq!(nth_candidate(&alphabet, 2, 4), None);
        assert_eq!(nth_candidate(&alphabet, 0, 0), Some(String::new()));
        assert_eq!(nth_candidate(&alphabet, 0, 1), None);
    }
}
