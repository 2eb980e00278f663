/*
    This module derives random sentences from context-free grammars
*/

use rand::prelude::*;
use thiserror::Error;

use crate::error_handling::ErrorType;
use crate::grammar::{Grammar, Symbol};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, PartialEq, Error)]
pub enum GenerateErrorType {
    // Only single non-terminal heads can be expanded
    #[error("Only context-free grammars can be used for generation")]
    NotContextFree,
    // The grammar is empty and no start symbol was given
    #[error("The grammar has no start symbol")]
    NoStartSymbol,
    // A non-terminal has no rule to rewrite it
    #[error("No rule for nonterminal `{0}`")]
    UndefinedNonterminal(String),
    // The derivation kept growing past the configured bound
    #[error("Derivation exceeded the maximum depth of {0}")]
    DepthExceeded(usize),
}

impl ErrorType for GenerateErrorType {}

pub type GenResult = Result<String, GenerateErrorType>;

struct Derivation<'g, R: Rng + ?Sized> {
    grammar: &'g Grammar,
    max_depth: usize,
    rng: &'g mut R,
    words: Vec<String>,
}

impl<'g, R: Rng + ?Sized> Derivation<'g, R> {
    fn generate_nonterminal(
        &mut self,
        nonterminal: &Symbol,
        depth: usize,
    ) -> Result<(), GenerateErrorType> {
        if depth > self.max_depth {
            return Err(GenerateErrorType::DepthExceeded(self.max_depth));
        }

        let grammar = self.grammar;
        let alternative = grammar
            .productions_for(std::slice::from_ref(nonterminal))
            .choose(&mut *self.rng)
            .ok_or_else(|| GenerateErrorType::UndefinedNonterminal(nonterminal.text().to_string()))?;

        for symbol in alternative {
            self.generate_symbol(symbol, depth + 1)?;
        }

        Ok(())
    }

    fn generate_symbol(&mut self, symbol: &Symbol, depth: usize) -> Result<(), GenerateErrorType> {
        match symbol {
            Symbol::Nonterminal(_) => self.generate_nonterminal(symbol, depth),
            Symbol::Terminal(text) if text.is_empty() => Ok(()),
            Symbol::Terminal(text) => {
                self.words.push(text.clone());
                Ok(())
            }
        }
    }
}

// Derive a sentence from the grammar's start symbol, choosing uniformly
// among each non-terminal's rules.
pub fn generate(grammar: &Grammar) -> GenResult {
    let start = grammar.start_symbol().ok_or(GenerateErrorType::NoStartSymbol)?;
    generate_with_rng(grammar, start, DEFAULT_MAX_DEPTH, &mut thread_rng())
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override(grammar: &Grammar, start: &Symbol) -> GenResult {
    generate_with_rng(grammar, start, DEFAULT_MAX_DEPTH, &mut thread_rng())
}

// The terminal yield of one random derivation from `start`, words joined by
// single spaces. Epsilon contributes nothing.
pub fn generate_with_rng<R: Rng + ?Sized>(
    grammar: &Grammar,
    start: &Symbol,
    max_depth: usize,
    rng: &mut R,
) -> GenResult {
    if !grammar.is_context_free() {
        return Err(GenerateErrorType::NotContextFree);
    }

    let mut derivation = Derivation {
        grammar,
        max_depth,
        rng,
        words: Vec::new(),
    };
    derivation.generate_symbol(start, 0)?;

    Ok(derivation.words.join(" "))
}
