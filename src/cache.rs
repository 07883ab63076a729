use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::iterators::*;
use crate::types::*;
use crate::AnagramModel;

///Identifies a query: input text, search type, and the word type to combine with
pub type CacheKey = (String, SearchType, WordType);

///Caches the (lazily evaluated, memoized) results per query, so that repeated
///requests for more pages of the same query continue where the last one left off
pub struct SearchCache<'a> {
    model: &'a AnagramModel,
    entries: Mutex<HashMap<CacheKey, Arc<Memoized<'a>>>>,
    max_size: usize,
}

impl<'a> SearchCache<'a> {
    ///Create a cache. When more than `max_size` queries are cached, the cache is cleared;
    ///set to 0 for no limit.
    pub fn new(model: &'a AnagramModel, max_size: usize) -> Self {
        Self {
            model,
            entries: Mutex::new(HashMap::new()),
            max_size,
        }
    }

    ///Get the results for a query, starting the search if it is not cached yet
    pub fn get(&self, text: &str, search_type: SearchType, combine_with: WordType) -> Arc<Memoized<'a>> {
        let key: CacheKey = (text.trim().to_string(), search_type, combine_with);
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(results) = entries.get(&key) {
            return Arc::clone(results);
        }
        if self.max_size > 0 && entries.len() >= self.max_size {
            debug!("Search cache full ({} queries), clearing", entries.len());
            entries.clear();
        }
        let results = Arc::new(Memoized::new(self.model.search_with(&key.0, search_type, combine_with)));
        entries.insert(key, Arc::clone(&results));
        results
    }

    ///Results for a query using the dynamic search strategy
    pub fn search(&self, text: &str) -> Arc<Memoized<'a>> {
        self.get(text, SearchType::Dynamic, WordType::Other)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clear();
    }
}
