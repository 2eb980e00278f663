//! Concrete grammar and tree scenarios

use std::path::Path;

use gramtree::parser::parse_file;
use gramtree::{Child, Grammar, Notation, Symbol, Tree};
use rstest::rstest;

#[test]
fn single_rule_grammar() {
    let grammar = Grammar::from_rule("S --> NP, VP").unwrap();

    assert_eq!(grammar.len(), 1);
    assert_eq!(grammar.start_symbol(), Some(&Symbol::nonterminal("S")));
    assert!(grammar.is_context_free());
}

#[test]
fn right_regular_with_epsilon() {
    let grammar = Grammar::from_rules(["B --> [a]", "B --> [a], C", "B --> []"]).unwrap();
    assert!(grammar.is_right_regular());
}

#[test]
fn left_regular_only() {
    let grammar = Grammar::from_rule("B --> A, [b]").unwrap();
    assert!(!grammar.is_right_regular());
    assert!(grammar.is_left_regular());
}

#[rstest]
#[case("S --> [a], b", true)]
#[case("S-->[a],b", true)]
#[case("S --> [b], b", false)]
#[case("S --> [A], B", false)]
#[case("S --> b, [a]", false)]
fn grammar_contains(#[case] rule: &str, #[case] expected: bool) {
    let grammar = Grammar::from_rule("S --> [a], b").unwrap();
    assert_eq!(grammar.contains_rule(rule), expected);
}

#[test]
fn parse_penn_sentence() {
    let tree = Tree::parse("(S (NP (NNP John)) (VP (V runs)))").unwrap();

    assert_eq!(tree.label(), "S");
    let labels: Vec<_> = tree
        .children()
        .iter()
        .map(|child| match child {
            Child::Tree(subtree) => subtree.label(),
            Child::Token(token) => token.as_str(),
        })
        .collect();
    assert_eq!(labels, vec!["NP", "VP"]);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.leaves().collect::<Vec<_>>(), vec!["John", "runs"]);
}

#[test]
fn mixed_linear_grammar_is_not_regular() {
    let grammar = parse_file(Path::new("example_data/mixed.cfg"), Notation::default()).unwrap();

    assert!(grammar.is_linear());
    assert!(!grammar.is_left_regular());
    assert!(!grammar.is_right_regular());
    assert!(!grammar.is_regular());
    assert!(!grammar.is_strictly_regular());
}

// (rules, context-free, regular, strictly regular, chomsky, greibach, left-recursive)
#[rstest]
#[case(&["S --> NP, VP", "NP --> [john]", "VP --> [runs]"], true, false, false, true, false, false)]
#[case(&["S --> [a], S", "S --> []"], true, true, true, false, true, false)]
#[case(&["S --> S, [a]", "S --> [b]"], true, true, true, false, false, true)]
#[case(&["S --> [a]", "S --> []"], true, true, false, true, false, false)]
#[case(&["S --> NP, VP", "NP, VP --> [hi]"], false, false, false, false, false, false)]
fn classify_grammars(
    #[case] rules: &[&str],
    #[case] context_free: bool,
    #[case] regular: bool,
    #[case] strictly_regular: bool,
    #[case] chomsky: bool,
    #[case] greibach: bool,
    #[case] left_recursive: bool,
) {
    let grammar = Grammar::from_rules(rules).unwrap();

    assert_eq!(grammar.is_context_free(), context_free);
    assert_eq!(grammar.is_regular(), regular);
    assert_eq!(grammar.is_strictly_regular(), strictly_regular);
    assert_eq!(grammar.is_chomsky_normal_form(), chomsky);
    assert_eq!(grammar.is_greibach_normal_form(), greibach);
    assert_eq!(grammar.is_left_recursive(), left_recursive);
}

#[rstest]
#[case("(S (NP (Det The) (N politician)) (VP (V took) (NP (Det the) (N bribe))))", 4, 5)]
#[case("(NP John)", 1, 1)]
#[case("John", 1, 1)]
#[case("( (S (NP John) (VP (V runs))))", 4, 2)]
fn tree_shapes(#[case] text: &str, #[case] height: usize, #[case] leaves: usize) {
    let tree = Tree::parse(text).unwrap();
    assert_eq!(tree.height(), height);
    assert_eq!(tree.leaves().count(), leaves);
    assert_eq!(tree.flatten().leaves().count(), leaves);
}

#[test]
fn grammar_display_round_trips() {
    let grammar = parse_file(Path::new("example_data/english.cfg"), Notation::default()).unwrap();
    let reparsed: Grammar = grammar.to_string().parse().unwrap();

    assert_eq!(reparsed, grammar);
    assert_eq!(reparsed.to_vec(), grammar.to_vec());
}

#[test]
fn penn_sentence_grammar_generates_its_yield() {
    let tree = Tree::parse("(S (NP (NNP John)) (VP (V runs)))").unwrap();
    let grammar = tree.to_grammar();

    assert_eq!(grammar.len(), 5);
    assert!(grammar.contains_rule("S --> NP, VP"));
    assert!(grammar.contains_rule("NNP --> [John]"));
    assert!(grammar.is_context_free());
    assert_eq!(gramtree::generator::generate(&grammar).unwrap(), "John runs");
}
