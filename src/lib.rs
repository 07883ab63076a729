extern crate num_traits;
extern crate simple_error;

use std::fs::File;
use std::io::BufReader;

use log::{debug, info};
use simple_error::SimpleError;

pub mod types;
pub mod anakey;
pub mod vocab;
pub mod template;
pub mod automaton;
pub mod search;
pub mod iterators;
pub mod cache;
pub mod test;

pub use crate::types::*;
pub use crate::anakey::*;
pub use crate::vocab::*;
pub use crate::template::*;
pub use crate::automaton::*;
pub use crate::search::*;
pub use crate::iterators::*;
pub use crate::cache::*;

///Holds everything a search needs: the dictionary and the compiled template automata.
///Built once, immutable afterwards, and shared by reference between searches.
pub struct AnagramModel {
    pub dictionary: WordDictionary,

    ///Compiled general phrase templates
    pub phrase: SearchNode,

    ///Compiled name templates
    pub name: SearchNode,

    pub params: SearchParameters,
}

impl AnagramModel {
    ///Build a model over the given dictionary using the built-in template sets
    pub fn new(dictionary: WordDictionary, params: SearchParameters) -> Result<AnagramModel, SimpleError> {
        Self::with_templates(dictionary, &phrase_templates(), &name_templates(), params)
    }

    ///Build a model with custom template sets
    pub fn with_templates(
        dictionary: WordDictionary,
        phrase_templates: &[PhraseTemplate],
        name_templates: &[PhraseTemplate],
        params: SearchParameters,
    ) -> Result<AnagramModel, SimpleError> {
        let phrase = SearchNode::compile(phrase_templates)?;
        let name = SearchNode::compile(name_templates)?;
        debug!(
            "Compiled {} phrase templates into {} steps, {} name templates into {} steps",
            phrase.template_count(),
            phrase.step_count(),
            name.template_count(),
            name.step_count()
        );
        Ok(AnagramModel {
            dictionary,
            phrase,
            name,
            params,
        })
    }

    ///Load the dictionary from a file in the tab-separated source format
    pub fn from_file(
        filename: &str,
        dictionary_params: &DictionaryParams,
        params: SearchParameters,
    ) -> Result<AnagramModel, SimpleError> {
        info!("Reading dictionary from {}...", filename);
        let f = File::open(filename)
            .map_err(|e| SimpleError::new(format!("Unable to open dictionary {}: {}", filename, e)))?;
        let dictionary = WordDictionary::read(BufReader::new(f), dictionary_params)?;
        Self::new(dictionary, params)
    }

    pub fn automaton(&self, template_set: TemplateSet) -> &SearchNode {
        match template_set {
            TemplateSet::Phrase => &self.phrase,
            TemplateSet::Name => &self.name,
        }
    }

    ///Split the input into words and resolve them against the dictionary
    pub fn get_words(&self, text: &str) -> Vec<Word> {
        get_words(text, &self.dictionary)
    }

    ///Find anagrams of the text, guessing the best strategy from the input.
    ///The results are computed lazily as the iterator is consumed.
    pub fn search<'a>(&'a self, text: &str) -> AnagramIter<'a> {
        self.search_with(text, SearchType::Dynamic, WordType::Other)
    }

    ///Find anagrams of the text with an explicit strategy. `combine_with` selects a word type
    ///to pair a single input word with (use `WordType::Other` for no pairing); it is ignored in
    ///dynamic mode, where the pairing follows from the input word itself.
    pub fn search_with<'a>(&'a self, text: &str, search_type: SearchType, combine_with: WordType) -> AnagramIter<'a> {
        let words = self.get_words(text);
        if words.is_empty() {
            return Box::new(std::iter::empty());
        }
        let results = match search_type {
            SearchType::Dynamic => {
                if words.len() == 1 && words[0].text.chars().count() < self.params.single_word_threshold {
                    let pairing = words[0].word_type.pairing();
                    debug!(
                        "Input '{}' classified as {}, pairing with every {}",
                        words[0].text, words[0].word_type, pairing.word_type
                    );
                    find_paired_anagrams(
                        words,
                        pairing.word_type,
                        pairing.comes_first,
                        self.automaton(pairing.template_set),
                        &self.dictionary,
                        &self.params,
                    )
                } else {
                    find_anagrams(words, &self.phrase, &self.dictionary, &self.params)
                }
            }
            SearchType::Phrase | SearchType::Name => {
                let automaton = if search_type == SearchType::Name { &self.name } else { &self.phrase };
                if combine_with != WordType::Other && words.len() == 1 {
                    let comes_first = words[0].word_type.pairing().comes_first;
                    find_paired_anagrams(words, combine_with, comes_first, automaton, &self.dictionary, &self.params)
                } else {
                    find_anagrams(words, automaton, &self.dictionary, &self.params)
                }
            }
        };
        unique(results)
    }
}
