use serde::{Deserialize, Serialize};
use simple_error::SimpleError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::anakey::*;
use crate::template::*;
use crate::types::*;
use crate::vocab::*;

///A lazy sequence of anagrams
pub type AnagramIter<'a> = Box<dyn Iterator<Item = PartialAnagram> + Send + 'a>;

///A found anagram: the original input terms and the words forming the anagram
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartialAnagram {
    pub terms: Vec<Word>,
    pub words: Vec<Word>,
}

impl PartialAnagram {
    pub fn new(terms: Vec<Word>, words: Vec<Word>) -> Self {
        Self { terms, words }
    }

    pub fn terms_text(&self) -> String {
        join_words(&self.terms)
    }

    pub fn anagram_text(&self) -> String {
        join_words(&self.words)
    }

    ///The display string: `<terms> = <anagram>`
    pub fn data(&self) -> String {
        format!("{} = {}", self.terms_text(), self.anagram_text())
    }
}

fn join_words(words: &[Word]) -> String {
    words.iter().map(|word| word.text.as_str()).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for PartialAnagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data())
    }
}

impl PartialEq for PartialAnagram {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl Eq for PartialAnagram {}

impl Hash for PartialAnagram {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data().hash(state);
    }
}

///State that stays fixed during a single descent through the automaton
#[derive(Clone)]
pub struct SearchContext<'a> {
    ///The input words; resolved words may not repeat any of them
    pub terms: Arc<Vec<Word>>,
    pub dictionary: &'a WordDictionary,
    pub params: &'a SearchParameters,
}

impl<'a> SearchContext<'a> {
    pub fn new(terms: Vec<Word>, dictionary: &'a WordDictionary, params: &'a SearchParameters) -> Self {
        Self {
            terms: Arc::new(terms),
            dictionary,
            params,
        }
    }
}

///A node in the compiled template automaton
#[derive(Clone, Debug)]
pub enum SearchNode {
    ///Independent alternatives
    Branch(Vec<SearchNode>),
    ///Resolve this component, then continue with the child
    Step {
        component: PhraseComponent,
        child: Box<SearchNode>,
    },
    ///A complete template, fires when no letters remain
    Terminal(PhraseTemplate),
}

impl SearchNode {
    ///Compile a set of templates into a single automaton, merging templates that
    ///share components at the same depth
    pub fn compile(templates: &[PhraseTemplate]) -> Result<SearchNode, SimpleError> {
        if templates.is_empty() {
            return Err(SimpleError::new("can not compile an empty set of phrase templates"));
        }
        for template in templates.iter() {
            template.validate()?;
        }
        let templates: Vec<&PhraseTemplate> = templates.iter().collect();
        Ok(Self::compile_level(&templates, 0))
    }

    fn compile_level(templates: &[&PhraseTemplate], level: usize) -> SearchNode {
        let mut nodes: Vec<SearchNode> = Vec::new();

        //group by the component at this level, in order of first appearance
        let mut groups: Vec<(&PhraseComponent, Vec<&PhraseTemplate>)> = Vec::new();
        for template in templates.iter().copied() {
            match template.components.get(level) {
                None => nodes.push(SearchNode::Terminal(template.clone())),
                Some(component) => match groups.iter().position(|(c, _)| *c == component) {
                    Some(i) => groups[i].1.push(template),
                    None => groups.push((component, vec![template])),
                },
            }
        }

        for (component, group) in groups {
            nodes.push(SearchNode::Step {
                component: component.clone(),
                child: Box::new(Self::compile_level(&group, level + 1)),
            });
        }

        if nodes.len() == 1 {
            nodes.pop().unwrap_or(SearchNode::Branch(Vec::new()))
        } else {
            SearchNode::Branch(nodes)
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchNode::Terminal(_))
    }

    ///Number of templates compiled into this node
    pub fn template_count(&self) -> usize {
        match self {
            SearchNode::Branch(children) => children.iter().map(|child| child.template_count()).sum(),
            SearchNode::Step { child, .. } => child.template_count(),
            SearchNode::Terminal(_) => 1,
        }
    }

    ///Number of component steps in the automaton (after prefix merging)
    pub fn step_count(&self) -> usize {
        match self {
            SearchNode::Branch(children) => children.iter().map(|child| child.step_count()).sum(),
            SearchNode::Step { child, .. } => 1 + child.step_count(),
            SearchNode::Terminal(_) => 0,
        }
    }

    ///Lazily find all anagrams of the remaining key reachable from this node.
    ///`words_so_far` holds the words resolved for the preceding slots, in slot order.
    pub fn find_anagrams<'a>(
        &'a self,
        context: SearchContext<'a>,
        remaining: AnagramKey,
        words_so_far: Vec<&'a Word>,
    ) -> AnagramIter<'a> {
        match self {
            SearchNode::Terminal(template) => {
                if remaining.is_empty() {
                    if let Some(anagram) = try_make(template, &context.terms, &words_so_far) {
                        return Box::new(std::iter::once(anagram));
                    }
                }
                Box::new(std::iter::empty())
            }
            SearchNode::Branch(children) => Box::new(
                children
                    .iter()
                    .flat_map(move |child| child.find_anagrams(context.clone(), remaining, words_so_far.clone())),
            ),
            SearchNode::Step { component, child } => {
                if !component.allow_preceding_nodes(&words_so_far) {
                    return Box::new(std::iter::empty());
                }
                let candidates = component.possible_words(remaining, context.dictionary, context.params, child.is_terminal());
                Box::new(candidates.flat_map(move |(rest, word)| {
                    let mut words = words_so_far.clone();
                    words.push(word);
                    child.find_anagrams(context.clone(), rest, words)
                }))
            }
        }
    }
}

///Validates the resolved words against the template and renders them in display order
fn try_make(template: &PhraseTemplate, terms: &[Word], words: &[&Word]) -> Option<PartialAnagram> {
    if words.len() != template.components.len() {
        return None;
    }
    if !template.components.iter().zip(words.iter()).all(|(component, word)| component.is_valid_word(word)) {
        return None;
    }
    //an input word may not reappear in its own anagram
    if words.iter().any(|word| terms.iter().any(|term| word.matches_text(&term.text))) {
        return None;
    }
    let ordered = template
        .order
        .iter()
        .map(|i| words.get(*i).map(|word| (*word).clone()))
        .collect::<Option<Vec<Word>>>()?;
    Some(PartialAnagram::new(terms.to_vec(), ordered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_prefixes_are_merged() {
        let automaton = SearchNode::compile(&phrase_templates()).expect("compile");
        assert_eq!(automaton.template_count(), 7);
        //one adjective step with five continuations, one adverb step with two
        match &automaton {
            SearchNode::Branch(children) => {
                assert_eq!(children.len(), 2);
                match &children[0] {
                    SearchNode::Step { component, child } => {
                        assert_eq!(*component, PhraseComponent::word(WordType::Adjective));
                        match child.as_ref() {
                            SearchNode::Branch(grandchildren) => assert_eq!(grandchildren.len(), 5),
                            other => panic!("expected branch, got {:?}", other),
                        }
                    }
                    other => panic!("expected step, got {:?}", other),
                }
            }
            other => panic!("expected branch, got {:?}", other),
        }
        //2 first-level steps, 5 + 2 second-level steps, 4 + 1 third-level steps
        assert_eq!(automaton.step_count(), 14);
    }

    #[test]
    fn test_single_template_is_a_chain() {
        let automaton = SearchNode::compile(&name_templates()).expect("compile");
        match &automaton {
            SearchNode::Step { child, .. } => match child.as_ref() {
                SearchNode::Step { child, .. } => assert!(child.is_terminal()),
                other => panic!("expected step, got {:?}", other),
            },
            other => panic!("expected step, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_rejects_invalid() {
        assert!(SearchNode::compile(&[]).is_err());
        let forward = PhraseTemplate::new(
            vec![PhraseComponent::article(ArticleVariant::An, 1), PhraseComponent::word(WordType::Noun)],
            vec![0, 1],
        );
        assert!(SearchNode::compile(&[forward]).is_err());
    }

    #[test]
    fn test_partial_anagram_equality_by_text() {
        let a = PartialAnagram::new(
            vec![Word::new("Angela", "", WordType::FirstName)],
            vec![Word::new("nuclear", "x", WordType::Adjective)],
        );
        let b = PartialAnagram::new(
            vec![Word::new("Angela", "", WordType::Other)],
            vec![Word::new("nuclear", "y", WordType::Other)],
        );
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Angela = nuclear");
    }

    #[test]
    fn test_terminal_rejects_input_word() {
        let template = PhraseTemplate::new(vec![PhraseComponent::word(WordType::Noun)], vec![0]);
        let stone = Word::new("stone", "", WordType::Noun);
        let terms = vec![Word::new("Stone", "", WordType::Other)];
        assert!(try_make(&template, &terms, &[&stone]).is_none());
        let notes = Word::new("notes", "", WordType::Noun);
        assert!(try_make(&template, &terms, &[&notes]).is_some());
    }
}
