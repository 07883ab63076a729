use std::sync::{Arc, Mutex, MutexGuard};

use crate::automaton::*;

struct MemoState<'a> {
    produced: Vec<PartialAnagram>,
    ///The underlying search, None once exhausted
    source: Option<AnagramIter<'a>>,
}

///A lazily evaluated sequence of anagrams that remembers everything it has produced,
///so it can be iterated again from the start (by any number of cursors) without
///repeating the search. New items are only computed when a cursor asks for them.
pub struct Memoized<'a> {
    state: Mutex<MemoState<'a>>,
}

impl<'a> Memoized<'a> {
    pub fn new(source: AnagramIter<'a>) -> Self {
        Self {
            state: Mutex::new(MemoState {
                produced: Vec::new(),
                source: Some(source),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoState<'a>> {
        //a panic in another cursor leaves the buffer consistent, carry on
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    ///Get the item at the specified position, computing it (and everything before it) if needed
    pub fn get(&self, index: usize) -> Option<PartialAnagram> {
        let mut state = self.lock();
        while state.produced.len() <= index {
            let next = state.source.as_mut().and_then(|source| source.next());
            match next {
                Some(anagram) => state.produced.push(anagram),
                None => {
                    state.source = None;
                    return None;
                }
            }
        }
        state.produced.get(index).cloned()
    }

    ///Returns one page of results (pages are numbered from 0)
    pub fn page(&self, page: usize, page_size: usize) -> Vec<PartialAnagram> {
        let begin = page * page_size;
        (begin..begin + page_size).map_while(|i| self.get(i)).collect()
    }

    ///Number of items computed so far
    pub fn produced(&self) -> usize {
        self.lock().produced.len()
    }

    ///Whether the underlying search has been run to completion
    pub fn is_exhausted(&self) -> bool {
        self.lock().source.is_none()
    }

    ///A cursor starting at the beginning of the sequence
    pub fn iter(self: &Arc<Self>) -> MemoizedIter<'a> {
        MemoizedIter {
            results: Arc::clone(self),
            position: 0,
        }
    }
}

///Cursor over a memoized sequence
pub struct MemoizedIter<'a> {
    results: Arc<Memoized<'a>>,
    position: usize,
}

impl<'a> Iterator for MemoizedIter<'a> {
    type Item = PartialAnagram;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.results.get(self.position)?;
        self.position += 1;
        Some(item)
    }
}
