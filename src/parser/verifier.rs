use indexmap::IndexSet;

use crate::grammar::{Grammar, Symbol};

fn get_defined_symbols(grammar: &Grammar) -> IndexSet<&Symbol> {
    grammar.heads().flatten().collect()
}

// Non-terminals used as daughters that no rule rewrites, in first-seen
// order. Such a grammar is still valid; the symbols just derive nothing.
pub fn undefined_nonterminals(grammar: &Grammar) -> Vec<&Symbol> {
    let defined = get_defined_symbols(grammar);

    // Filter out everything but nonterminals, then filter out all the
    // defined ones
    grammar
        .rules()
        .values()
        .flatten()
        .flatten()
        .filter(|symbol| symbol.is_nonterminal() && !defined.contains(symbol))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

// Log a warning for every undefined non-terminal. Returns whether the
// grammar is free of them.
pub fn verify_rules(grammar: &Grammar) -> bool {
    let undefined = undefined_nonterminals(grammar);

    for symbol in &undefined {
        log::warn!("Could not find a rule for `{}`", symbol);
    }

    undefined.is_empty()
}
