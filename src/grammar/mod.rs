/*
    This module is for storing, combining and classifying grammars
*/

mod notation;
mod production;
mod symbol;

use std::fmt::Display;
use std::ops::{Add, Sub};
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use thiserror::Error;

use crate::error_handling::ErrorType;
use crate::parser::{self, RuleErrors};
pub use notation::Notation;
pub use production::Production;
use production::Shape;
pub use symbol::Symbol;

// The symbols on one side of a rule
pub type Sequence = Vec<Symbol>;

// Every daughter sequence seen for a head, in insertion order
pub type Rules = IndexMap<Sequence, Vec<Sequence>>;

#[derive(Debug, PartialEq, Error)]
pub enum GrammarError {
    #[error("Index {index} is out of range for a grammar with {len} rules")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Cannot remove a rule from an empty grammar")]
    Empty,
    #[error("`{0}` is not a non-terminal of this grammar")]
    InvalidStartSymbol(Symbol),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ErrorType for GrammarError {}

pub type Result<T> = std::result::Result<T, GrammarError>;

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Rules,
    start_symbol: Option<Symbol>,
    // Chosen through `set_start_symbol` rather than taken from the first head
    explicit_start: bool,
    notation: Notation,
    // Head of every stored rule in the order it was added, so that `pop`
    // without an index undoes the latest `push`. The nth occurrence of a head
    // here is the nth entry of that head's bucket.
    history: Vec<Sequence>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    pub fn with_notation(notation: Notation) -> Self {
        Grammar {
            notation,
            ..Grammar::default()
        }
    }

    pub fn from_rule(rule: &str) -> parser::Result<Self> {
        Grammar::from_rule_with(rule, Notation::default())
    }

    pub fn from_rule_with(rule: &str, notation: Notation) -> parser::Result<Self> {
        let production = Production::parse(rule, &notation)?;
        let mut grammar = Grammar::with_notation(notation);
        grammar.push(production);
        Ok(grammar)
    }

    pub fn parse(text: &str) -> std::result::Result<Self, RuleErrors> {
        Grammar::parse_with(text, Notation::default())
    }

    pub fn parse_with(text: &str, notation: Notation) -> std::result::Result<Self, RuleErrors> {
        let productions = parser::parse_rules(text, &notation)?;
        Ok(Grammar::from_productions_with(productions, notation))
    }

    // Build a grammar from a sequence of rule strings. Every malformed rule
    // is reported, located by its 1-based position in the sequence.
    pub fn from_rules<I, S>(rules: I) -> std::result::Result<Self, RuleErrors>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Grammar::from_rules_with(rules, Notation::default())
    }

    pub fn from_rules_with<I, S>(rules: I, notation: Notation) -> std::result::Result<Self, RuleErrors>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let productions = parser::parse_rule_list(rules, &notation)?;
        Ok(Grammar::from_productions_with(productions, notation))
    }

    pub fn from_pairs<I>(pairs: I) -> parser::Result<Self>
    where
        I: IntoIterator<Item = (Sequence, Sequence)>,
    {
        pairs
            .into_iter()
            .map(|(head, daughters)| Production::new(head, daughters))
            .collect()
    }

    pub fn from_productions_with<I>(productions: I, notation: Notation) -> Self
    where
        I: IntoIterator<Item = Production>,
    {
        let mut grammar = Grammar::with_notation(notation);
        grammar.extend(productions);
        log::debug!("Built grammar with {} rules under {} heads", grammar.len(), grammar.rules.len());
        grammar
    }

    // Adopt a previously built head→daughters mapping as-is.
    pub fn from_map(rules: Rules) -> Self {
        let history = rules
            .iter()
            .flat_map(|(head, bucket)| std::iter::repeat(head.clone()).take(bucket.len()))
            .collect();
        let start_symbol = first_default_start(&rules);

        Grammar {
            rules,
            start_symbol,
            explicit_start: false,
            notation: Notation::default(),
            history,
        }
    }

    pub fn notation(&self) -> &Notation {
        &self.notation
    }

    pub fn start_symbol(&self) -> Option<&Symbol> {
        self.start_symbol.as_ref()
    }

    pub fn set_start_symbol(&mut self, symbol: Symbol) -> Result<()> {
        if !self.nonterminal_alphabet().contains(&symbol) {
            return Err(GrammarError::InvalidStartSymbol(symbol));
        }
        self.start_symbol = Some(symbol);
        self.explicit_start = true;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn heads(&self) -> impl Iterator<Item = &[Symbol]> {
        self.rules.keys().map(Vec::as_slice)
    }

    pub fn productions_for(&self, head: &[Symbol]) -> &[Sequence] {
        self.rules.get(head).map(Vec::as_slice).unwrap_or_default()
    }

    // Rules in head-insertion order, then daughter-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Production> + '_ {
        self.rules.iter().flat_map(|(head, bucket)| {
            bucket.iter().map(move |daughters| Production::from_parts(head.clone(), daughters.clone()))
        })
    }

    pub fn to_vec(&self) -> Vec<Production> {
        self.iter().collect()
    }

    fn shapes(&self) -> impl Iterator<Item = Shape<'_>> {
        self.rules
            .iter()
            .flat_map(|(head, bucket)| bucket.iter().map(move |daughters| Shape::new(head, daughters)))
    }

    pub fn push(&mut self, production: Production) {
        let (head, daughters) = production.into_parts();

        if self.start_symbol.is_none() {
            self.start_symbol = default_start(&head);
        }

        self.history.push(head.clone());
        self.rules.entry(head).or_default().push(daughters);
    }

    pub fn push_rule(&mut self, rule: &str) -> parser::Result<()> {
        let production = Production::parse(rule, &self.notation)?;
        self.push(production);
        Ok(())
    }

    // Remove the rule at a flattened index, or the most recently added rule.
    pub fn pop(&mut self, index: Option<usize>) -> Result<Production> {
        let (head, position) = match index {
            Some(index) => self.locate(index).ok_or(GrammarError::IndexOutOfRange {
                index,
                len: self.len(),
            })?,
            None => {
                let head = self.history.last().cloned().ok_or(GrammarError::Empty)?;
                let position = self.productions_for(&head).len() - 1;
                (head, position)
            }
        };

        let history_index = self
            .history
            .iter()
            .positions(|h| *h == head)
            .nth(position)
            .ok_or(GrammarError::IndexOutOfRange {
                index: position,
                len: self.len(),
            })?;
        self.history.remove(history_index);

        let bucket = self.rules.get_mut(&head).ok_or(GrammarError::Empty)?;
        let daughters = bucket.remove(position);
        if bucket.is_empty() {
            self.rules.shift_remove(&head);
        }
        self.refresh_start();

        Ok(Production::from_parts(head, daughters))
    }

    // A default start symbol follows the first head; a chosen one is kept
    // until its last occurrence is removed
    fn refresh_start(&mut self) {
        let keep = match &self.start_symbol {
            Some(start) if self.explicit_start => self.nonterminal_alphabet().contains(start),
            _ => false,
        };
        if !keep {
            self.explicit_start = false;
            self.start_symbol = first_default_start(&self.rules);
        }
    }

    // Head and bucket position of the rule at a flattened index
    fn locate(&self, index: usize) -> Option<(Sequence, usize)> {
        let mut remaining = index;
        for (head, bucket) in &self.rules {
            if remaining < bucket.len() {
                return Some((head.clone(), remaining));
            }
            remaining -= bucket.len();
        }
        None
    }

    pub fn at(&self, index: usize) -> Option<Production> {
        self.iter().nth(index)
    }

    pub fn contains(&self, production: &Production) -> bool {
        self.productions_for(production.head())
            .iter()
            .any(|daughters| daughters.as_slice() == production.daughters())
    }

    // Like `contains`, reading the rule in this grammar's notation. Text
    // that is not a rule is never contained.
    pub fn contains_rule(&self, rule: &str) -> bool {
        Production::parse(rule, &self.notation).is_ok_and(|production| self.contains(&production))
    }

    // Every rule of both grammars; duplicates are kept.
    pub fn union(&self, other: &Grammar) -> Grammar {
        let mut result = Grammar::with_notation(self.notation.clone());
        result.extend(self.iter().chain(other.iter()));
        result.inherit_start(self);
        result
    }

    // This grammar's rules minus every rule equal to one in `other`.
    pub fn difference(&self, other: &Grammar) -> Grammar {
        let mut result = Grammar::with_notation(self.notation.clone());
        result.extend(self.iter().filter(|production| !other.contains(production)));
        result.inherit_start(self);
        result
    }

    fn inherit_start(&mut self, source: &Grammar) {
        // Otherwise the default chosen while extending stays
        if let Some(start) = &source.start_symbol {
            if self.nonterminal_alphabet().contains(start) {
                self.start_symbol = Some(start.clone());
                self.explicit_start = true;
            }
        }
    }

    pub fn alphabet(&self) -> IndexSet<Symbol> {
        self.rules
            .iter()
            .flat_map(|(head, bucket)| head.iter().chain(bucket.iter().flatten()))
            .cloned()
            .collect()
    }

    pub fn terminal_alphabet(&self) -> IndexSet<Symbol> {
        self.alphabet().into_iter().filter(Symbol::is_terminal).collect()
    }

    pub fn nonterminal_alphabet(&self) -> IndexSet<Symbol> {
        self.alphabet().into_iter().filter(Symbol::is_nonterminal).collect()
    }

    pub fn is_context_free(&self) -> bool {
        self.shapes().all(|s| s.is_context_free())
    }

    pub fn is_right_regular(&self) -> bool {
        self.shapes().all(|s| s.is_right_regular())
    }

    pub fn is_left_regular(&self) -> bool {
        self.shapes().all(|s| s.is_left_regular())
    }

    // Left-regular or right-regular, but not both.
    pub fn is_strictly_regular(&self) -> bool {
        self.is_left_regular() ^ self.is_right_regular()
    }

    pub fn is_regular(&self) -> bool {
        self.is_left_regular() || self.is_right_regular()
    }

    // Every rule is individually left- or right-regular; the grammar may mix
    // both kinds.
    pub fn is_linear(&self) -> bool {
        self.shapes().all(|s| s.is_linear())
    }

    pub fn is_chomsky_normal_form(&self) -> bool {
        self.shapes().all(|s| s.is_chomsky_normal_form())
    }

    pub fn is_greibach_normal_form(&self) -> bool {
        self.shapes().all(|s| s.is_greibach_normal_form())
    }

    // Some rule's daughters start with its own head.
    pub fn is_left_recursive(&self) -> bool {
        self.shapes().any(|s| s.is_left_recursive())
    }

    pub fn chomsky_normal_form(&self) -> Result<Grammar> {
        Err(GrammarError::NotImplemented("Conversion to Chomsky normal form"))
    }

    pub fn greibach_normal_form(&self) -> Result<Grammar> {
        Err(GrammarError::NotImplemented("Conversion to Greibach normal form"))
    }
}

// The first non-terminal of a head, used as the start symbol until one is set
fn default_start(head: &[Symbol]) -> Option<Symbol> {
    head.iter().find(|s| s.is_nonterminal()).cloned()
}

fn first_default_start(rules: &Rules) -> Option<Symbol> {
    rules.keys().find_map(|head| default_start(head))
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for Grammar {}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self
            .iter()
            .map(|production| production.render(&self.notation))
            .join(&self.notation.line_separator);
        write!(f, "{}", text)
    }
}

impl FromStr for Grammar {
    type Err = RuleErrors;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Grammar::parse(s)
    }
}

impl Extend<Production> for Grammar {
    fn extend<T: IntoIterator<Item = Production>>(&mut self, iter: T) {
        for production in iter {
            self.push(production);
        }
    }
}

impl FromIterator<Production> for Grammar {
    fn from_iter<T: IntoIterator<Item = Production>>(iter: T) -> Self {
        let mut grammar = Grammar::new();
        grammar.extend(iter);
        grammar
    }
}

impl Add for &Grammar {
    type Output = Grammar;

    fn add(self, other: &Grammar) -> Grammar {
        self.union(other)
    }
}

impl Sub for &Grammar {
    type Output = Grammar;

    fn sub(self, other: &Grammar) -> Grammar {
        self.difference(other)
    }
}
