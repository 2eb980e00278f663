use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;

use super::{Notation, Symbol};
use crate::parser::{self, RuleErrorType};

// One rewrite rule: a head sequence (normally a single non-terminal)
// rewriting to a sequence of daughters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    head: Vec<Symbol>,
    daughters: Vec<Symbol>,
}

impl Production {
    pub fn new(head: Vec<Symbol>, daughters: Vec<Symbol>) -> parser::Result<Self> {
        if head.is_empty() {
            return Err(RuleErrorType::MissingHead);
        }
        Ok(Production { head, daughters })
    }

    // Callers guarantee a non-empty head
    pub(crate) fn from_parts(head: Vec<Symbol>, daughters: Vec<Symbol>) -> Self {
        Production { head, daughters }
    }

    pub fn parse(text: &str, notation: &Notation) -> parser::Result<Self> {
        parser::parse_rule(text, notation)
    }

    pub fn head(&self) -> &[Symbol] {
        &self.head
    }

    pub fn daughters(&self) -> &[Symbol] {
        &self.daughters
    }

    pub fn into_parts(self) -> (Vec<Symbol>, Vec<Symbol>) {
        (self.head, self.daughters)
    }

    pub(crate) fn shape(&self) -> Shape<'_> {
        Shape::new(&self.head, &self.daughters)
    }

    pub fn is_context_free(&self) -> bool {
        self.shape().is_context_free()
    }

    pub fn is_right_regular(&self) -> bool {
        self.shape().is_right_regular()
    }

    pub fn is_left_regular(&self) -> bool {
        self.shape().is_left_regular()
    }

    pub fn is_linear(&self) -> bool {
        self.shape().is_linear()
    }

    pub fn is_chomsky_normal_form(&self) -> bool {
        self.shape().is_chomsky_normal_form()
    }

    pub fn is_greibach_normal_form(&self) -> bool {
        self.shape().is_greibach_normal_form()
    }

    pub fn is_left_recursive(&self) -> bool {
        self.shape().is_left_recursive()
    }

    pub fn is_cyclic(&self) -> bool {
        self.shape().is_cyclic()
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self.daughters.as_slice(), [d] if d.is_epsilon())
    }

    // Whether `render` in this notation parses back to an equal rule.
    pub fn is_writable(&self, notation: &Notation) -> bool {
        self.head.iter().chain(&self.daughters).all(|s| s.is_writable(notation))
    }

    pub fn render(&self, notation: &Notation) -> String {
        let join = |symbols: &[Symbol]| {
            symbols.iter().map(|s| s.render(notation)).join(&notation.separator.to_string())
        };
        format!("{} {} {}", join(&self.head), notation.delimiter, join(&self.daughters))
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&Notation::default()))
    }
}

impl FromStr for Production {
    type Err = RuleErrorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Production::parse(s, &Notation::default())
    }
}

// Borrowed view of a rule, shared by Production and the grammar's buckets so
// classification never has to clone symbols.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape<'a> {
    head: &'a [Symbol],
    daughters: &'a [Symbol],
}

impl<'a> Shape<'a> {
    pub(crate) fn new(head: &'a [Symbol], daughters: &'a [Symbol]) -> Self {
        Shape { head, daughters }
    }

    pub(crate) fn is_context_free(&self) -> bool {
        matches!(self.head, [h] if h.is_nonterminal())
    }

    pub(crate) fn is_right_regular(&self) -> bool {
        self.is_context_free()
            && match self.daughters {
                [a] => a.is_terminal(),
                [a, b] => a.is_terminal() && b.is_nonterminal(),
                _ => false,
            }
    }

    pub(crate) fn is_left_regular(&self) -> bool {
        self.is_context_free()
            && match self.daughters {
                [a] => a.is_terminal(),
                [b, a] => b.is_nonterminal() && a.is_terminal(),
                _ => false,
            }
    }

    pub(crate) fn is_linear(&self) -> bool {
        self.is_left_regular() || self.is_right_regular()
    }

    // A single terminal daughter covers both `A --> [a]` and `S --> []`.
    pub(crate) fn is_chomsky_normal_form(&self) -> bool {
        self.is_context_free()
            && match self.daughters {
                [a] => a.is_terminal(),
                [b, c] => b.is_nonterminal() && c.is_nonterminal(),
                _ => false,
            }
    }

    pub(crate) fn is_greibach_normal_form(&self) -> bool {
        self.is_context_free()
            && match self.daughters {
                [a] => a.is_epsilon(),
                [a, b] => a.is_terminal() && b.is_nonterminal(),
                _ => false,
            }
    }

    pub(crate) fn is_left_recursive(&self) -> bool {
        self.daughters.starts_with(self.head)
    }

    pub(crate) fn is_cyclic(&self) -> bool {
        self.head == self.daughters
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn rule(text: &str) -> Production {
        text.parse().unwrap()
    }

    #[test]
    fn empty_head_is_rejected() {
        assert_eq!(Production::new(vec![], vec![Symbol::epsilon()]), Err(RuleErrorType::MissingHead));
    }

    #[test]
    fn context_free_rules() {
        let rules = vec!["S --> NP, VP", "X --> [y]", "S -->", "X, p --> [a]", "[s] --> d, s"];
        let answers = vec![true, true, true, false, false];

        for (text, answer) in zip(rules, answers) {
            assert_eq!(rule(text).is_context_free(), answer, "{}", text);
        }
    }

    #[test]
    fn regular_rules() {
        // (rule, right regular, left regular)
        let rules = vec![
            ("B --> [a]", true, true),
            ("B --> []", true, true),
            ("B --> [a], C", true, false),
            ("B --> A, [b]", false, true),
            ("B --> A, B", false, false),
            ("B --> [a], [b]", false, false),
            ("B --> C", false, false),
            ("B --> [a], C, D", false, false),
            ("B, C --> [a], C", false, false),
        ];

        for (text, right, left) in rules {
            let production = rule(text);
            assert_eq!(production.is_right_regular(), right, "{}", text);
            assert_eq!(production.is_left_regular(), left, "{}", text);
            assert_eq!(production.is_linear(), right || left, "{}", text);
        }
    }

    #[test]
    fn normal_form_rules() {
        // (rule, chomsky, greibach)
        let rules = vec![
            ("A --> B, C", true, false),
            ("A --> [a]", true, false),
            ("S --> []", true, true),
            ("A --> [a], B", false, true),
            ("A --> B, [a]", false, false),
            ("A --> B", false, false),
            ("A --> B, C, D", false, false),
            ("A, B --> C, D", false, false),
        ];

        for (text, chomsky, greibach) in rules {
            let production = rule(text);
            assert_eq!(production.is_chomsky_normal_form(), chomsky, "{}", text);
            assert_eq!(production.is_greibach_normal_form(), greibach, "{}", text);
        }
    }

    #[test]
    fn left_recursion_and_cycles() {
        assert!(rule("NP --> NP, PP").is_left_recursive());
        assert!(rule("A, B --> A, B, [c]").is_left_recursive());
        assert!(!rule("NP --> Det, NP").is_left_recursive());
        assert!(!rule("A, B --> A, [c]").is_left_recursive());

        assert!(rule("A --> A").is_cyclic());
        assert!(rule("A --> A").is_left_recursive());
        assert!(!rule("A --> A, A").is_cyclic());
    }

    #[test]
    fn epsilon_production() {
        assert!(rule("S --> []").is_epsilon());
        assert!(!rule("S --> [a]").is_epsilon());
        assert!(!rule("S -->").is_epsilon());
    }

    #[test]
    fn render_rules() {
        assert_eq!(rule("S --> [a], b").to_string(), "S --> [a],b");
        assert_eq!(rule("a,S,a --> a ,    b").to_string(), "a,S,a --> a,b");

        let notation = Notation::default().with_delimiter("::=").with_bracket_pair('"', '"');
        let production = Production::parse("NP ::= \"the\", N", &notation).unwrap();
        assert_eq!(production.daughters(), &[Symbol::terminal("the"), Symbol::nonterminal("N")]);
        assert_eq!(production.render(&notation), "NP ::= \"the\",N");

        let notation = Notation::default().with_separator(';');
        let production = Production::parse("A --> [b]; C", &notation).unwrap();
        assert_eq!(production.daughters().len(), 2);
        assert_eq!(production.render(&notation), "A --> [b];C");
    }

    #[test]
    fn unwritable_rules_do_not_read_back() {
        let production = Production::new(vec![Symbol::nonterminal("S")], vec![Symbol::terminal("a,b")]).unwrap();
        assert!(!production.is_writable(&Notation::default()));
        assert_eq!(production.to_string(), "S --> [a,b]");
        assert_ne!(production.to_string().parse::<Production>().unwrap(), production);

        let notation = Notation::default().with_separator(';');
        assert!(production.is_writable(&notation));
        assert_eq!(Production::parse(&production.render(&notation), &notation).unwrap(), production);
        assert!(rule("S --> [a], b").is_writable(&Notation::default()));
    }
}
