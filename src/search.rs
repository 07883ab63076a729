use std::collections::HashSet;

use log::debug;

use crate::anakey::*;
use crate::automaton::*;
use crate::types::*;
use crate::vocab::*;

///Splits the input text into words, resolving each against the dictionary.
///Words not in the dictionary are kept as they are, with type `Other`.
pub fn get_words(text: &str, dictionary: &WordDictionary) -> Vec<Word> {
    text.split_whitespace()
        .map(|term| match dictionary.find(term) {
            Some(word) => word.clone(),
            None => Word::new(term, "", WordType::Other),
        })
        .collect()
}

///Combined key of all words
pub fn combined_key(words: &[Word]) -> AnagramKey {
    words.iter().map(|word| word.key()).sum()
}

///Searches the automaton for anagrams of all input words together
pub fn find_anagrams<'a>(
    words: Vec<Word>,
    automaton: &'a SearchNode,
    dictionary: &'a WordDictionary,
    params: &'a SearchParameters,
) -> AnagramIter<'a> {
    let key = combined_key(&words);
    debug!("Searching anagrams of {} letters for {} input word(s)", key.len(), words.len());
    automaton.find_anagrams(SearchContext::new(words, dictionary, params), key, Vec::new())
}

///Pairs the input words with every word of another type and searches anagrams of each pair.
///Only the first `max_results_per_pair` anagrams of each pair are kept.
pub fn find_paired_anagrams<'a>(
    words: Vec<Word>,
    word_type: WordType,
    comes_first: bool,
    automaton: &'a SearchNode,
    dictionary: &'a WordDictionary,
    params: &'a SearchParameters,
) -> AnagramIter<'a> {
    let key = combined_key(&words);
    debug!(
        "Pairing {} input letters with {} {} entries ({})",
        key.len(),
        dictionary.iterate(word_type).len(),
        word_type,
        if comes_first { "before input" } else { "after input" }
    );
    Box::new(dictionary.iterate(word_type).iter().flat_map(move |(other_key, other)| {
        let mut terms = words.clone();
        if comes_first {
            terms.insert(0, other.clone());
        } else {
            terms.push(other.clone());
        }
        automaton
            .find_anagrams(SearchContext::new(terms, dictionary, params), key.combine(other_key), Vec::new())
            .take(params.max_results_per_pair)
    }))
}

///Drops anagrams whose display text was already produced earlier in the sequence
///(every display text seen is kept, so memory grows with the number of results consumed)
pub fn unique(iter: AnagramIter<'_>) -> AnagramIter<'_> {
    let mut seen: HashSet<String> = HashSet::new();
    Box::new(iter.filter(move |anagram| seen.insert(anagram.data())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn test_get_words_classifies() {
        let dictionary = get_test_dictionary();
        let words = get_words("  Angela   Zzyzx ", &dictionary);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word_type, WordType::FirstName);
        assert_eq!(words[1].word_type, WordType::Other);
        assert_eq!(words[1].text, "Zzyzx");
        assert!(get_words(" \t ", &dictionary).is_empty());
    }

    #[test]
    fn test_combined_key() {
        let words = vec![Word::new("white", "", WordType::Other), Word::new("wash", "", WordType::Other)];
        assert_eq!(combined_key(&words).text(), "aehhistww");
        assert!(combined_key(&[]).is_empty());
    }

    #[test]
    fn test_unique_filters_repeats() {
        let a = PartialAnagram::new(vec![Word::new("x", "", WordType::Other)], vec![Word::new("y", "", WordType::Other)]);
        let items = vec![a.clone(), a.clone(), a];
        let results: Vec<_> = unique(Box::new(items.into_iter())).collect();
        assert_eq!(results.len(), 1);
    }
}
