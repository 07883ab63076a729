use simple_error::SimpleError;

use crate::anakey::*;
use crate::types::*;
use crate::vocab::*;

///Candidate words for a slot, paired with the key that remains once the word is taken
pub type Candidates<'a> = Box<dyn Iterator<Item = (AnagramKey, &'a Word)> + Send + 'a>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArticleVariant {
    A,
    An,
}

impl ArticleVariant {
    pub fn text(&self) -> &'static str {
        match self {
            ArticleVariant::A => "A",
            ArticleVariant::An => "An",
        }
    }

    ///Whether this article may precede a word starting with the given letter.
    ///For "an", h counts as a vowel; for "a" it does not.
    pub fn allows(&self, first_letter: char) -> bool {
        let c = first_letter.to_ascii_lowercase();
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u');
        match self {
            ArticleVariant::A => !vowel,
            ArticleVariant::An => vowel || c == 'h',
        }
    }
}

///A literal word along with its precomputed key
#[derive(Clone, Debug)]
pub struct FixedWord {
    pub word: Word,
    pub key: AnagramKey,
}

impl FixedWord {
    pub fn new(word: Word) -> Self {
        let key = word.key();
        Self { word, key }
    }

    fn possible_words<'a>(&'a self, remaining: AnagramKey, use_whole_key: bool) -> Candidates<'a> {
        if use_whole_key {
            if remaining == self.key {
                return Box::new(std::iter::once((AnagramKey::empty(), &self.word)));
            }
        } else if remaining.len() > self.key.len() {
            if let Some(rest) = remaining.try_subtract(&self.key) {
                return Box::new(std::iter::once((rest, &self.word)));
            }
        }
        Box::new(std::iter::empty())
    }
}

impl PartialEq for FixedWord {
    fn eq(&self, other: &Self) -> bool {
        self.word.text == other.word.text
    }
}

impl Eq for FixedWord {}

///A single slot in a phrase template
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhraseComponent {
    ///Any dictionary word of the given type
    WordSlot(WordType),
    ///Exactly this word
    FixedWord(FixedWord),
    ///"a" or "an", depending on the first letter of the word resolved at `next_slot`
    IndefiniteArticle {
        variant: ArticleVariant,
        next_slot: usize,
        fixed: FixedWord,
    },
}

impl PhraseComponent {
    pub fn word(word_type: WordType) -> Self {
        PhraseComponent::WordSlot(word_type)
    }

    pub fn fixed(text: &str, gloss: &str) -> Self {
        PhraseComponent::FixedWord(FixedWord::new(Word::new(text, gloss, WordType::Other)))
    }

    pub fn article(variant: ArticleVariant, next_slot: usize) -> Self {
        let word = Word::new(variant.text(), "Signifying one or any, but less emphatically.", WordType::Other);
        PhraseComponent::IndefiniteArticle {
            variant,
            next_slot,
            fixed: FixedWord::new(word),
        }
    }

    ///Check that a resolved word fits this component
    pub fn is_valid_word(&self, word: &Word) -> bool {
        match self {
            PhraseComponent::WordSlot(word_type) => word.word_type == *word_type,
            PhraseComponent::FixedWord(fixed) | PhraseComponent::IndefiniteArticle { fixed, .. } => {
                fixed.word.text == word.text
            }
        }
    }

    ///Lookahead gate, evaluated against the words resolved so far before this component is tried
    pub fn allow_preceding_nodes(&self, words_so_far: &[&Word]) -> bool {
        match self {
            PhraseComponent::IndefiniteArticle { variant, next_slot, .. } => words_so_far
                .get(*next_slot)
                .and_then(|word| word.first_letter())
                .map(|c| variant.allows(c))
                .unwrap_or(false),
            _ => true,
        }
    }

    ///Candidate words for this slot. With `use_whole_key` the word has to use up all
    ///remaining letters (this is the last slot), otherwise any word whose letters are
    ///contained in the remaining key is a candidate.
    pub fn possible_words<'a>(
        &'a self,
        remaining: AnagramKey,
        dictionary: &'a WordDictionary,
        params: &'a SearchParameters,
        use_whole_key: bool,
    ) -> Candidates<'a> {
        match self {
            PhraseComponent::WordSlot(word_type) => {
                if use_whole_key {
                    Box::new(dictionary.lookup(*word_type, &remaining).map(|word| (AnagramKey::empty(), word)).into_iter())
                } else if remaining.len() >= params.min_enumerated_word_length {
                    //full scan over the category, pruned by subtraction
                    let min_length = params.min_enumerated_word_length;
                    Box::new(
                        dictionary
                            .iterate(*word_type)
                            .iter()
                            .filter(move |(key, _)| key.len() >= min_length)
                            .filter_map(move |(key, word)| remaining.try_subtract(key).map(|rest| (rest, word))),
                    )
                } else {
                    Box::new(std::iter::empty())
                }
            }
            PhraseComponent::FixedWord(fixed) | PhraseComponent::IndefiniteArticle { fixed, .. } => {
                fixed.possible_words(remaining, use_whole_key)
            }
        }
    }
}

///An ordered list of components plus the order in which the resolved words are displayed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhraseTemplate {
    pub components: Vec<PhraseComponent>,
    ///Slot indices in display order
    pub order: Vec<usize>,
}

impl PhraseTemplate {
    pub fn new(components: Vec<PhraseComponent>, order: Vec<usize>) -> Self {
        Self { components, order }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    ///Checks that the template is usable: it has components, its display order is a
    ///permutation of the slots, and every article refers to a slot resolved before it.
    pub fn validate(&self) -> Result<(), SimpleError> {
        if self.components.is_empty() {
            return Err(SimpleError::new("phrase template has no components"));
        }
        let mut seen = vec![false; self.components.len()];
        for i in self.order.iter() {
            match seen.get_mut(*i) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(SimpleError::new(format!("invalid display order {:?} for {} components", self.order, self.components.len()))),
            }
        }
        if seen.iter().any(|flag| !flag) {
            return Err(SimpleError::new(format!("display order {:?} does not cover all {} components", self.order, self.components.len())));
        }
        for (slot, component) in self.components.iter().enumerate() {
            if let PhraseComponent::IndefiniteArticle { next_slot, .. } = component {
                if *next_slot >= slot {
                    return Err(SimpleError::new(format!(
                        "article at slot {} refers to slot {}, which is not resolved before it",
                        slot, next_slot
                    )));
                }
            }
        }
        Ok(())
    }
}

///The general phrase templates: adjective + noun and adverb + verb, with their article and pronoun variants
pub fn phrase_templates() -> Vec<PhraseTemplate> {
    let the = || PhraseComponent::fixed("The", "A word placed before nouns to limit or individualize their meaning.");
    let one = || PhraseComponent::fixed("One", "Denoting a person or thing conceived or spoken of indefinitely.");
    let i = || PhraseComponent::fixed("I", "The word with which a speaker or writer denotes themself.");
    vec![
        PhraseTemplate::new(vec![PhraseComponent::word(WordType::Adjective), PhraseComponent::word(WordType::Noun)], vec![0, 1]),
        PhraseTemplate::new(
            vec![PhraseComponent::word(WordType::Adjective), PhraseComponent::article(ArticleVariant::An, 0), PhraseComponent::word(WordType::Noun)],
            vec![1, 0, 2],
        ),
        PhraseTemplate::new(
            vec![PhraseComponent::word(WordType::Adjective), PhraseComponent::article(ArticleVariant::A, 0), PhraseComponent::word(WordType::Noun)],
            vec![1, 0, 2],
        ),
        PhraseTemplate::new(vec![PhraseComponent::word(WordType::Adjective), the(), PhraseComponent::word(WordType::Noun)], vec![1, 0, 2]),
        PhraseTemplate::new(vec![PhraseComponent::word(WordType::Adjective), one(), PhraseComponent::word(WordType::Noun)], vec![1, 0, 2]),
        PhraseTemplate::new(vec![PhraseComponent::word(WordType::Adverb), PhraseComponent::word(WordType::Verb)], vec![1, 0]),
        PhraseTemplate::new(vec![PhraseComponent::word(WordType::Adverb), i(), PhraseComponent::word(WordType::Verb)], vec![1, 2, 0]),
    ]
}

///The name templates: a last name followed by a first name, displayed first name first
pub fn name_templates() -> Vec<PhraseTemplate> {
    vec![PhraseTemplate::new(
        vec![PhraseComponent::word(WordType::LastName), PhraseComponent::word(WordType::FirstName)],
        vec![1, 0],
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_vowels() {
        assert!(ArticleVariant::An.allows('e'));
        assert!(ArticleVariant::An.allows('H'));
        assert!(!ArticleVariant::An.allows('n'));
        assert!(ArticleVariant::A.allows('n'));
        assert!(ArticleVariant::A.allows('h'));
        assert!(!ArticleVariant::A.allows('U'));
    }

    #[test]
    fn test_article_gate_reads_resolved_slot() {
        let nuclear = Word::new("nuclear", "", WordType::Adjective);
        let honest = Word::new("honest", "", WordType::Adjective);
        let a = PhraseComponent::article(ArticleVariant::A, 0);
        let an = PhraseComponent::article(ArticleVariant::An, 0);
        assert!(a.allow_preceding_nodes(&[&nuclear]));
        assert!(!an.allow_preceding_nodes(&[&nuclear]));
        assert!(an.allow_preceding_nodes(&[&honest]));
        //nothing resolved at the referenced slot yet
        assert!(!a.allow_preceding_nodes(&[]));
    }

    #[test]
    fn test_fixed_word_validity() {
        let the = PhraseComponent::fixed("The", "");
        assert!(the.is_valid_word(&Word::new("The", "", WordType::Other)));
        assert!(!the.is_valid_word(&Word::new("One", "", WordType::Other)));
        let noun = PhraseComponent::word(WordType::Noun);
        assert!(!noun.is_valid_word(&Word::new("quiet", "", WordType::Adjective)));
    }

    #[test]
    fn test_builtin_templates_are_valid() {
        for template in phrase_templates().iter().chain(name_templates().iter()) {
            assert!(template.validate().is_ok(), "{:?}", template);
        }
    }

    #[test]
    fn test_invalid_templates() {
        let forward = PhraseTemplate::new(
            vec![PhraseComponent::article(ArticleVariant::A, 1), PhraseComponent::word(WordType::Noun)],
            vec![0, 1],
        );
        assert!(forward.validate().is_err());
        let bad_order = PhraseTemplate::new(vec![PhraseComponent::word(WordType::Noun)], vec![0, 0]);
        assert!(bad_order.validate().is_err());
        let empty = PhraseTemplate::new(vec![], vec![]);
        assert!(empty.validate().is_err());
    }
}
