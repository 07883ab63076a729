use serde::{Deserialize, Serialize};
use simple_error::SimpleError;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::BufRead;
use std::time::SystemTime;

use log::{debug, info, warn};

use crate::anakey::*;
use crate::types::*;

///A dictionary entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Word {
    pub text: String,

    /// Short definition, may be empty
    pub gloss: String,

    pub word_type: WordType,
}

impl Word {
    pub fn new(text: impl Into<String>, gloss: impl Into<String>, word_type: WordType) -> Self {
        Self {
            text: text.into(),
            gloss: gloss.into(),
            word_type,
        }
    }

    pub fn key(&self) -> AnagramKey {
        self.text.as_str().anagram_key()
    }

    pub fn first_letter(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text)
    }
}

///Words are identified by their text
impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

///All words of a single category
#[derive(Default, Debug)]
pub struct WordTable {
    ///Every entry in input order, indices correspond to WordId
    pub entries: Vec<(AnagramKey, Word)>,

    ///Maps anagram keys to the first entry seen with that key
    pub index: HashMap<AnagramKey, WordId>,

    ///Maps lower-cased text to the first entry with that text
    pub encoder: HashMap<String, WordId>,
}

impl WordTable {
    pub fn add(&mut self, key: AnagramKey, word: Word) -> WordId {
        let id = self.entries.len() as WordId;
        self.index.entry(key).or_insert(id);
        self.encoder.entry(word.text.to_lowercase()).or_insert(id);
        self.entries.push((key, word));
        id
    }

    ///Exact match on the anagram key
    pub fn lookup(&self, key: &AnagramKey) -> Option<&Word> {
        self.index.get(key).and_then(|id| self.get(*id))
    }

    ///Case-insensitive match on the text
    pub fn find(&self, text: &str) -> Option<&Word> {
        self.encoder.get(&text.to_lowercase()).and_then(|id| self.get(*id))
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.entries.get(id as usize).map(|(_, word)| word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AnagramKey, Word)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///Number of distinct anagram keys
    pub fn key_count(&self) -> usize {
        self.index.len()
    }
}

///One word table per word type. Immutable once built.
#[derive(Debug)]
pub struct WordDictionary {
    tables: Vec<WordTable>,
}

impl Default for WordDictionary {
    fn default() -> Self {
        Self {
            tables: WordType::ALL.iter().map(|_| WordTable::default()).collect(),
        }
    }
}

impl WordDictionary {
    ///Parse a dictionary from text in the tab-separated source format:
    ///`category \t word \t key \t gloss`, one entry per line
    pub fn parse(data: &str, params: &DictionaryParams) -> Result<WordDictionary, SimpleError> {
        let mut builder = DictionaryBuilder::new(params.clone());
        for (i, line) in data.lines().enumerate() {
            builder.add_line(i + 1, line)?;
        }
        Ok(builder.build())
    }

    ///Read a dictionary from a buffered reader in the tab-separated source format
    pub fn read(reader: impl BufRead, params: &DictionaryParams) -> Result<WordDictionary, SimpleError> {
        let mut builder = DictionaryBuilder::new(params.clone());
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| SimpleError::new(format!("Error reading dictionary at line {}: {}", i + 1, e)))?;
            builder.add_line(i + 1, &line)?;
        }
        Ok(builder.build())
    }

    pub fn table(&self, word_type: WordType) -> &WordTable {
        &self.tables[word_type.index()]
    }

    ///Exact match on the anagram key within a category
    pub fn lookup(&self, word_type: WordType, key: &AnagramKey) -> Option<&Word> {
        self.table(word_type).lookup(key)
    }

    ///All (key, word) pairs of a category, in input order
    pub fn iterate(&self, word_type: WordType) -> &[(AnagramKey, Word)] {
        &self.table(word_type).entries
    }

    ///Find a word by its text (case-insensitive), checking the categories in a fixed order
    pub fn find(&self, text: &str) -> Option<&Word> {
        WordType::ALL.iter().find_map(|word_type| self.table(*word_type).find(text))
    }

    ///Total number of entries over all categories
    pub fn len(&self) -> usize {
        self.tables.iter().map(|table| table.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|table| table.is_empty())
    }
}

///Accumulates dictionary lines, keeping track of what was skipped
pub struct DictionaryBuilder {
    dictionary: WordDictionary,
    params: DictionaryParams,
    skipped: usize,
    begintime: SystemTime,
}

impl DictionaryBuilder {
    pub fn new(params: DictionaryParams) -> Self {
        Self {
            dictionary: WordDictionary::default(),
            params,
            skipped: 0,
            begintime: SystemTime::now(),
        }
    }

    ///Add a line in the source format. Empty lines are ignored. Malformed
    ///lines are skipped with a warning, or rejected in strict mode.
    pub fn add_line(&mut self, linenr: usize, line: &str) -> Result<(), SimpleError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        match parse_line(line) {
            Ok((key, word)) => {
                self.dictionary.tables[word.word_type.index()].add(key, word);
                Ok(())
            }
            Err(e) if self.params.strict => Err(SimpleError::new(format!("Corrupt dictionary at line {}: {}", linenr, e))),
            Err(e) => {
                warn!("Skipping dictionary line {}: {}", linenr, e);
                self.skipped += 1;
                Ok(())
            }
        }
    }

    pub fn build(self) -> WordDictionary {
        for word_type in WordType::ALL.iter() {
            let table = self.dictionary.table(*word_type);
            if !table.is_empty() {
                debug!(" - {} table: {} words, {} anagram keys", word_type, table.len(), table.key_count());
            }
        }
        let duration = SystemTime::now()
            .duration_since(self.begintime)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        info!(
            "Word dictionary created with {} words ({} lines skipped) in {} ms",
            self.dictionary.len(),
            self.skipped,
            duration
        );
        self.dictionary
    }
}

fn parse_line(line: &str) -> Result<(AnagramKey, Word), SimpleError> {
    let fields: Vec<&str> = line.split('\t').map(|field| field.trim()).collect();
    if fields.len() < 3 {
        return Err(SimpleError::new(format!("expected at least 3 tab-separated fields, found {}", fields.len())));
    }
    let word_type = WordType::from_code(fields[0]);
    let text = fields[1];
    if text.is_empty() {
        return Err(SimpleError::new("empty word text"));
    }
    let key = fields[2].anagram_key();
    if key != text.anagram_key() {
        return Err(SimpleError::new(format!("key '{}' does not match the letters of '{}'", fields[2], text)));
    }
    let gloss = fields.get(3).copied().unwrap_or("");
    Ok((key, Word::new(text, gloss, word_type)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "n\tnotes\tenost\tShort written records\n\
                        n\tstone\tenost\tA lump of rock\n\
                        j\tquiet\teiqtu\tMaking little noise\n\
                        x\tthing\tghint\n";

    #[test]
    fn test_first_seen_key_wins() {
        let dictionary = WordDictionary::parse(DATA, &DictionaryParams::default()).expect("parse");
        let key = "tones".anagram_key();
        assert_eq!(dictionary.lookup(WordType::Noun, &key).map(|w| w.text.as_str()), Some("notes"));
        assert_eq!(dictionary.iterate(WordType::Noun).len(), 2);
        assert_eq!(dictionary.table(WordType::Noun).key_count(), 1);
    }

    #[test]
    fn test_find_by_text() {
        let dictionary = WordDictionary::parse(DATA, &DictionaryParams::default()).expect("parse");
        let stone = dictionary.find("Stone").expect("stone should be found");
        assert_eq!(stone.word_type, WordType::Noun);
        assert_eq!(stone.gloss, "A lump of rock");
        assert!(dictionary.find("pebble").is_none());
    }

    #[test]
    fn test_unknown_code_is_other() {
        let dictionary = WordDictionary::parse(DATA, &DictionaryParams::default()).expect("parse");
        let thing = dictionary.find("thing").expect("thing should be found");
        assert_eq!(thing.word_type, WordType::Other);
        assert_eq!(thing.gloss, "");
    }

    #[test]
    fn test_malformed_lines() {
        let data = "n\tnotes\tenost\tShort written records\nj\tbroken\nv\trun\txyz\tMove fast\n";
        let dictionary = WordDictionary::parse(data, &DictionaryParams::default()).expect("lenient parse");
        assert_eq!(dictionary.len(), 1);

        let err = WordDictionary::parse(data, &DictionaryParams::strict()).expect_err("strict parse should fail");
        assert!(err.to_string().contains("line 2"));
    }
}
