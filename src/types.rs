use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use simple_error::SimpleError;

///Each entry in a word table gets assigned an ID integer (its position in the table), carries no further meaning
pub type WordId = u32;

///Index of a letter in the alphabet (a=0 .. z=25)
pub type CharIndexType = u8;

///Number of letters in the alphabet we count
pub const ALPHABET_SIZE: usize = 26;

///The first 26 primes, one per letter, used to derive the hash of an anagram key
pub const PRIMES: &[u64; ALPHABET_SIZE] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101];

///Grammatical category of a dictionary word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordType {
    Noun,
    Adjective,
    Verb,
    Adverb,
    FirstName,
    LastName,
    Other,
}

impl WordType {
    ///All word types, in the order tables are consulted when classifying a word
    pub const ALL: [WordType; 7] = [
        WordType::Noun,
        WordType::Adjective,
        WordType::Verb,
        WordType::Adverb,
        WordType::FirstName,
        WordType::LastName,
        WordType::Other,
    ];

    ///Maps a category code from the dictionary source format. Unknown codes map to `Other`.
    pub fn from_code(code: &str) -> WordType {
        match code {
            "n" => WordType::Noun,
            "j" => WordType::Adjective,
            "a" => WordType::Adverb,
            "v" => WordType::Verb,
            "f" => WordType::FirstName,
            "l" => WordType::LastName,
            _ => WordType::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            WordType::Noun => "n",
            WordType::Adjective => "j",
            WordType::Adverb => "a",
            WordType::Verb => "v",
            WordType::FirstName => "f",
            WordType::LastName => "l",
            WordType::Other => "o",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_name(&self) -> bool {
        matches!(self, WordType::FirstName | WordType::LastName)
    }

    ///Determines how a single input word of this type is paired up with a second word:
    ///the type of the complementary word, whether that word comes first, and
    ///which template set the pair is searched against.
    pub fn pairing(&self) -> Pairing {
        match self {
            WordType::Noun => Pairing::new(WordType::Adjective, true, TemplateSet::Name),
            WordType::Adjective => Pairing::new(WordType::Noun, false, TemplateSet::Name),
            WordType::Verb => Pairing::new(WordType::Adverb, false, TemplateSet::Name),
            WordType::Adverb => Pairing::new(WordType::Verb, true, TemplateSet::Name),
            WordType::FirstName => Pairing::new(WordType::LastName, false, TemplateSet::Phrase),
            //Unknown words are presumed to be last names
            WordType::LastName | WordType::Other => Pairing::new(WordType::FirstName, true, TemplateSet::Phrase),
        }
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordType::Noun => "noun",
            WordType::Adjective => "adjective",
            WordType::Verb => "verb",
            WordType::Adverb => "adverb",
            WordType::FirstName => "firstname",
            WordType::LastName => "lastname",
            WordType::Other => "other",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for WordType {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noun" | "n" => Ok(WordType::Noun),
            "adjective" | "j" => Ok(WordType::Adjective),
            "verb" | "v" => Ok(WordType::Verb),
            "adverb" | "a" => Ok(WordType::Adverb),
            "firstname" | "first" | "f" => Ok(WordType::FirstName),
            "lastname" | "last" | "l" => Ok(WordType::LastName),
            "other" | "o" => Ok(WordType::Other),
            _ => Err(SimpleError::new(format!("unknown word type: {}", s))),
        }
    }
}

///Which compiled template set to search against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateSet {
    ///Adjective + noun, adverb + verb and their article/pronoun variants
    Phrase,
    ///Last name + first name
    Name,
}

///How a single input word gets combined with a complementary word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub word_type: WordType,
    pub comes_first: bool,
    pub template_set: TemplateSet,
}

impl Pairing {
    pub fn new(word_type: WordType, comes_first: bool, template_set: TemplateSet) -> Self {
        Self {
            word_type,
            comes_first,
            template_set,
        }
    }
}

///Search strategy requested by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    ///Guess what to search for from the input
    Dynamic,
    ///Search for phrases
    Phrase,
    ///Search for names
    Name,
}

impl Default for SearchType {
    fn default() -> Self {
        SearchType::Dynamic
    }
}

impl FromStr for SearchType {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamic" | "auto" => Ok(SearchType::Dynamic),
            "phrase" => Ok(SearchType::Phrase),
            "name" => Ok(SearchType::Name),
            _ => Err(SimpleError::new(format!("unknown search type: {}", s))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchParameters {
    /// Single input words shorter than this (in characters) are paired with every word of a
    /// complementary category; longer input goes through the full phrase search
    pub single_word_threshold: usize,

    /// Dictionary words with fewer letters than this are skipped when enumerating candidates for a
    /// slot that is not the last one
    pub min_enumerated_word_length: usize,

    /// Maximum number of anagrams yielded per complementary word in the paired search
    pub max_results_per_pair: usize,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            single_word_threshold: 15,
            min_enumerated_word_length: 4,
            max_results_per_pair: 1,
        }
    }
}

impl SearchParameters {
    pub fn with_single_word_threshold(mut self, threshold: usize) -> Self {
        self.single_word_threshold = threshold;
        self
    }
    pub fn with_min_enumerated_word_length(mut self, length: usize) -> Self {
        self.min_enumerated_word_length = length;
        self
    }
    pub fn with_max_results_per_pair(mut self, max: usize) -> Self {
        self.max_results_per_pair = max;
        self
    }
}

///Parameters for reading a dictionary
#[derive(Clone, Debug, Default)]
pub struct DictionaryParams {
    ///Fail on malformed lines instead of skipping them with a warning
    pub strict: bool,
}

impl DictionaryParams {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
