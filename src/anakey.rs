use num_traits::Zero;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::types::*;

///Trait for objects that can be turned into an anagram key (string-like)
pub trait Anagrammable {
    fn anagram_key(&self) -> AnagramKey;
}

impl Anagrammable for str {
    ///Compute the anagram key for a given string, ignoring case and anything that is not a letter
    fn anagram_key(&self) -> AnagramKey {
        AnagramKey::create(self)
    }
}

///The anagram key: a bag-of-letters representation holding a count per letter a-z.
///Keys are compared on their counts; the hash is derived from the counts once, at construction.
#[derive(Clone, Copy)]
pub struct AnagramKey {
    counts: [u8; ALPHABET_SIZE],
    len: u16,
    hash: u64,
}

impl AnagramKey {
    ///Create the key for a piece of text. Letters are lower-cased, everything
    ///that is not a letter a-z is discarded. Counts saturate at 255.
    pub fn create(text: &str) -> AnagramKey {
        let mut counts = [0u8; ALPHABET_SIZE];
        for c in text.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_lowercase() {
                let index = (c as u8 - b'a') as usize;
                counts[index] = counts[index].saturating_add(1);
            }
        }
        AnagramKey::from_counts(counts)
    }

    pub fn from_counts(counts: [u8; ALPHABET_SIZE]) -> AnagramKey {
        let len = counts.iter().map(|n| *n as u16).sum();
        AnagramKey {
            counts,
            len,
            hash: Self::derive_hash(&counts),
        }
    }

    ///The key without any letters
    pub fn empty() -> AnagramKey {
        AnagramKey {
            counts: [0; ALPHABET_SIZE],
            len: 0,
            hash: 1,
        }
    }

    /// Product of the letter primes, raised to the letter counts (wrapping)
    fn derive_hash(counts: &[u8; ALPHABET_SIZE]) -> u64 {
        counts.iter().zip(PRIMES.iter()).fold(1u64, |hash, (n, prime)| {
            if *n == 0 {
                hash
            } else {
                hash.wrapping_mul(prime.wrapping_pow(*n as u32))
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    ///Total number of letters
    pub fn len(&self) -> usize {
        self.len as usize
    }

    ///Number of occurrences of a letter, by alphabet index
    pub fn count(&self, charindex: CharIndexType) -> u8 {
        self.counts.get(charindex as usize).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u8; ALPHABET_SIZE] {
        &self.counts
    }

    ///Returns the key holding the letters of both keys
    pub fn combine(&self, other: &AnagramKey) -> AnagramKey {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let mut counts = self.counts;
        for (n, m) in counts.iter_mut().zip(other.counts.iter()) {
            *n = n.saturating_add(*m);
        }
        AnagramKey::from_counts(counts)
    }

    ///Removes the letters of the other key from this one.
    ///Returns None if the other key is not contained in this one.
    pub fn try_subtract(&self, other: &AnagramKey) -> Option<AnagramKey> {
        if other.len > self.len {
            return None;
        }
        if other.is_empty() {
            return Some(*self);
        }
        let mut counts = [0u8; ALPHABET_SIZE];
        for i in 0..ALPHABET_SIZE {
            counts[i] = self.counts[i].checked_sub(other.counts[i])?;
        }
        Some(AnagramKey {
            counts,
            len: self.len - other.len,
            hash: Self::derive_hash(&counts),
        })
    }

    ///Tests if all letters of the other key are present in this one
    pub fn contains(&self, other: &AnagramKey) -> bool {
        other.len <= self.len && self.counts.iter().zip(other.counts.iter()).all(|(n, m)| n >= m)
    }

    ///Renders the letters of the key in alphabetical order
    pub fn text(&self) -> String {
        let mut s = String::with_capacity(self.len as usize);
        for (i, n) in self.counts.iter().enumerate() {
            for _ in 0..*n {
                s.push((b'a' + i as u8) as char);
            }
        }
        s
    }
}

impl PartialEq for AnagramKey {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.hash == other.hash && self.counts == other.counts
    }
}

impl Eq for AnagramKey {}

impl Hash for AnagramKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Default for AnagramKey {
    fn default() -> Self {
        AnagramKey::empty()
    }
}

impl fmt::Display for AnagramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl fmt::Debug for AnagramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnagramKey({})", self.text())
    }
}

impl From<&str> for AnagramKey {
    fn from(text: &str) -> Self {
        AnagramKey::create(text)
    }
}

impl Add for AnagramKey {
    type Output = AnagramKey;

    fn add(self, other: AnagramKey) -> AnagramKey {
        self.combine(&other)
    }
}

impl Zero for AnagramKey {
    fn zero() -> AnagramKey {
        AnagramKey::empty()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl std::iter::Sum for AnagramKey {
    fn sum<I: Iterator<Item = AnagramKey>>(iter: I) -> AnagramKey {
        iter.fold(AnagramKey::zero(), |acc, key| acc + key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ignores_case_and_punctuation() {
        assert_eq!(AnagramKey::create(" White-Wash! "), AnagramKey::create("whitewash"));
        assert_eq!("white wash".anagram_key(), "whitewash".anagram_key());
    }

    #[test]
    fn test_hash_consistent_with_construction() {
        let mut set = HashSet::new();
        set.insert("ab".anagram_key().combine(&"c".anagram_key()));
        assert!(set.contains(&"cab".anagram_key()));
        let abc = "abc".anagram_key();
        let ab = abc.try_subtract(&"c".anagram_key()).expect("subtraction");
        assert!(set.contains(&(ab + "c".anagram_key())));
    }

    #[test]
    fn test_empty_key() {
        let empty = AnagramKey::empty();
        assert!(empty.is_empty());
        assert_eq!(empty, "".anagram_key());
        assert_eq!(empty, "1234 !".anagram_key());
        assert_eq!(empty.text(), "");
        assert!(AnagramKey::zero().is_zero());
    }

    #[test]
    fn test_counts_saturate() {
        let long = "a".repeat(300);
        let key = long.as_str().anagram_key();
        assert_eq!(key.count(0), 255);
        assert_eq!(key.len(), 255);
    }

    #[test]
    fn test_contains() {
        let abc = "abc".anagram_key();
        assert!(abc.contains(&"ca".anagram_key()));
        assert!(abc.contains(&abc));
        assert!(!abc.contains(&"abcc".anagram_key()));
        assert!(!"ab".anagram_key().contains(&"c".anagram_key()));
    }
}
