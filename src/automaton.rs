use crate::char_map::CharMap;
use crate::error::{Error, Result};
use crate::{Map, Set};
use std::collections::VecDeque;
use std::iter::FromIterator;
use std::ops::Range;

/// Identifies a pattern by insertion order.
pub type PatternId = usize;

/// Index of the root node.
const ROOT: usize = 0;

/// An Aho-Corasick automaton for case-insensitive, multi-pattern substring search.
///
/// Patterns are added with [`Automaton::add_pattern`], then the automaton is frozen with
/// [`Automaton::build`]. Afterwards, every search is a single pass over the text, no matter how
/// many patterns there are.
///
/// ```
/// use saring::Automaton;
///
/// let automaton: Automaton = ["an", "anjing", "babi"].into_iter().collect();
/// let found = automaton.search_unique("Dasar ANJING");
/// assert!(found.contains("an") && found.contains("anjing"));
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    nodes: Vec<Node>,
    patterns: Vec<Pattern>,
    built: bool,
}

#[derive(Clone, Debug)]
struct Node {
    children: CharMap<usize>,
    /// Longest proper suffix of this node's prefix that is also a prefix in the trie.
    fail: usize,
    /// Patterns ending here, including those inherited through failure links.
    outputs: Vec<PatternId>,
    depth: usize,
}

#[derive(Clone, Debug)]
struct Pattern {
    text: String,
    /// Length in characters.
    len: usize,
}

/// One occurrence of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub pattern: PatternId,
    /// Byte range within the searched text.
    pub range: Range<usize>,
}

impl Node {
    fn new(depth: usize) -> Self {
        Self {
            children: CharMap::new(),
            fail: ROOT,
            outputs: Vec::new(),
            depth,
        }
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0)],
            patterns: Vec::new(),
            built: false,
        }
    }

    /// Inserts a pattern, lowercased. Adding the same pattern twice returns the same id.
    ///
    /// Fails if the automaton is already built, or if the pattern is empty.
    pub fn add_pattern(&mut self, pattern: &str) -> Result<PatternId> {
        if self.built {
            return Err(Error::AutomatonBuilt {
                pattern: pattern.to_owned(),
            });
        }
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }

        let mut current = ROOT;
        let mut len = 0;
        for c in pattern.chars().flat_map(char::to_lowercase) {
            len += 1;
            current = match self.nodes[current].children.get(c) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::new(self.nodes[current].depth + 1));
                    self.nodes[current].children.insert(c, next);
                    next
                }
            };
        }

        if let Some(&existing) = self.nodes[current].outputs.first() {
            return Ok(existing);
        }

        let id = self.patterns.len();
        self.patterns.push(Pattern {
            text: pattern.to_lowercase(),
            len,
        });
        self.nodes[current].outputs.push(id);
        Ok(id)
    }

    /// Computes failure links breadth-first, and freezes the automaton. Idempotent.
    pub fn build(&mut self) {
        if self.built {
            return;
        }

        let mut queue = VecDeque::new();
        let roots: Vec<(char, usize)> = self.nodes[ROOT].children.iter().collect();
        for (_, child) in roots {
            self.nodes[child].fail = ROOT;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let children: Vec<(char, usize)> = self.nodes[current].children.iter().collect();
            for (c, child) in children {
                queue.push_back(child);

                let mut fail = self.nodes[current].fail;
                let target = loop {
                    if let Some(next) = self.nodes[fail].children.get(c) {
                        break next;
                    }
                    if fail == ROOT {
                        break ROOT;
                    }
                    fail = self.nodes[fail].fail;
                };
                self.nodes[child].fail = target;

                // The failure target is shallower, so its outputs are already complete.
                let inherited = self.nodes[target].outputs.clone();
                self.nodes[child].outputs.extend(inherited);
            }
        }

        log::debug!(
            "built automaton with {} patterns and {} nodes",
            self.patterns.len(),
            self.nodes.len()
        );
        self.built = true;
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The (lowercased) pattern with the given id.
    pub fn pattern(&self, id: PatternId) -> Option<&str> {
        self.patterns.get(id).map(|p| p.text.as_str())
    }

    fn step(&self, mut state: usize, c: char) -> usize {
        loop {
            if let Some(next) = self.nodes[state].children.get(c) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state].fail;
        }
    }

    /// Calls `f` with the char index and current node after every character, until `f` returns false.
    fn scan(&self, text: &str, mut f: impl FnMut(usize, &Node) -> bool) {
        assert!(self.built, "automaton must be built before searching");
        let mut state = ROOT;
        for (i, (_, c)) in text.char_indices().enumerate() {
            let c = c.to_lowercase().next().unwrap_or(c);
            state = self.step(state, c);
            if !f(i, &self.nodes[state]) {
                return;
            }
        }
    }

    /// Counts occurrences of every pattern found in the text, overlapping ones included.
    ///
    /// # Panics
    ///
    /// If the automaton was not built.
    pub fn search(&self, text: &str) -> Map<&str, usize> {
        let mut matches = Map::default();
        self.scan(text, |_, node| {
            for &id in &node.outputs {
                *matches.entry(self.patterns[id].text.as_str()).or_insert(0) += 1;
            }
            true
        });
        matches
    }

    /// Distinct patterns found in the text.
    pub fn search_unique(&self, text: &str) -> Set<&str> {
        self.search(text).into_keys().collect()
    }

    /// Whether any pattern occurs in the text. Stops at the first occurrence.
    pub fn contains_any(&self, text: &str) -> bool {
        let mut found = false;
        self.scan(text, |_, node| {
            found = !node.outputs.is_empty();
            !found
        });
        found
    }

    /// Every occurrence of every pattern, in order of where they end, with byte ranges.
    pub fn find_overlapping(&self, text: &str) -> Vec<Hit> {
        let starts: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        let mut hits = Vec::new();
        self.scan(text, |i, node| {
            if node.outputs.is_empty() {
                return true;
            }
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            for &id in &node.outputs {
                let start = starts[i + 1 - self.patterns[id].len];
                hits.push(Hit {
                    pattern: id,
                    range: start..end,
                });
            }
            true
        });
        hits
    }
}

impl<'a> FromIterator<&'a str> for Automaton {
    /// Builds an automaton from patterns, skipping empty ones.
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut ret = Self::new();
        for pattern in iter {
            // Only empty patterns can fail before building.
            let _ = ret.add_pattern(pattern);
        }
        ret.build();
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::Automaton;
    use crate::Error;

    fn automaton(patterns: &[&str]) -> Automaton {
        patterns.iter().copied().collect()
    }

    #[test]
    fn search() {
        let ac = automaton(&["anjing", "babi"]);
        let matches = ac.search("Dasar anjing dan babi!");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches["anjing"], 1);
        assert_eq!(matches["babi"], 1);
    }

    #[test]
    fn search_unique() {
        let ac = automaton(&["anjing", "babi"]);
        let matches = ac.search_unique("Dasar anjing dan babi dan anjing!");
        assert_eq!(matches.len(), 2);
        assert!(matches.contains("anjing"));
        assert!(matches.contains("babi"));
    }

    #[test]
    fn contains_any() {
        let ac = automaton(&["anjing", "babi"]);
        assert!(ac.contains_any("Dasar anjing!"));
        assert!(!ac.contains_any("Dasar kucing!"));
        assert!(!ac.contains_any(""));
    }

    #[test]
    fn occurrences() {
        let ac = automaton(&["anjing"]);
        assert_eq!(ac.search("anjing dan anjing lagi anjing")["anjing"], 3);
        assert!(ac.search("").is_empty());
    }

    #[test]
    fn nested() {
        let ac = automaton(&["an", "anjing", "ing"]);
        let matches = ac.search("anjing");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches["an"], 1);
        assert_eq!(matches["anjing"], 1);
        assert_eq!(matches["ing"], 1);
    }

    #[test]
    fn failure_links() {
        // "she" must inherit "he" through its failure link, and "hers" needs a fail to "h".
        let ac = automaton(&["he", "she", "his", "hers"]);
        let matches = ac.search("ushers");
        assert_eq!(matches.len(), 3);
        assert!(matches.contains_key("he"));
        assert!(matches.contains_key("she"));
        assert!(matches.contains_key("hers"));
    }

    #[test]
    fn case_insensitive() {
        let ac = automaton(&["JanCok"]);
        assert_eq!(ac.pattern(0), Some("jancok"));
        assert!(ac.contains_any("dasar JANCOK"));
    }

    #[test]
    fn hits() {
        let text = "Dasar ANJING, anjing";
        let ac = automaton(&["an", "anjing"]);
        let ranges: Vec<&str> = ac
            .find_overlapping(text)
            .into_iter()
            .map(|hit| &text[hit.range])
            .collect();
        assert_eq!(ranges, vec!["AN", "ANJING", "an", "anjing"]);
    }

    #[test]
    fn frozen() {
        let mut ac = Automaton::new();
        let id = ac.add_pattern("anjing").unwrap();
        assert_eq!(ac.add_pattern("ANJING").unwrap(), id);
        assert!(matches!(ac.add_pattern(""), Err(Error::EmptyPattern)));
        ac.build();
        ac.build();
        assert!(ac.is_built());
        assert!(matches!(
            ac.add_pattern("babi"),
            Err(Error::AutomatonBuilt { .. })
        ));
        assert_eq!(ac.len(), 1);
    }

    #[test]
    #[should_panic]
    fn unbuilt() {
        let mut ac = Automaton::new();
        ac.add_pattern("anjing").unwrap();
        ac.search("anjing");
    }
}
