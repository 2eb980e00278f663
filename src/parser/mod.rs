/*
    This module parses rule text into productions and grammars
*/

mod lexer;
pub mod verifier;

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::*;
use lexer::Token;

#[derive(Debug, thiserror::Error)]
pub enum RuleErrorType {
    // A rule has no head/daughter delimiter
    #[error("Expected `{0}` between the head and daughters")]
    MissingDelimiter(String),
    // A rule has more than one delimiter
    #[error("Unexpected second `{0}`")]
    UnexpectedDelimiter(String),
    // Nothing before the delimiter
    #[error("A rule needs at least one head symbol")]
    MissingHead,
    // Two separators in a row, or one at either end of a side
    #[error("Empty symbol between separators")]
    EmptySymbol,
    // The configured delimiter is blank
    #[error("The rule delimiter cannot be empty")]
    EmptyDelimiter,
    // Rule text cannot be split into lines on an empty separator
    #[error("The line separator cannot be empty")]
    EmptyLineSeparator,
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for RuleErrorType {}

impl PartialEq for RuleErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuleErrorType::FileError(a), RuleErrorType::FileError(b)) => a.kind() == b.kind(),
            (RuleErrorType::MissingDelimiter(a), RuleErrorType::MissingDelimiter(b))
            | (RuleErrorType::UnexpectedDelimiter(a), RuleErrorType::UnexpectedDelimiter(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type RuleError = Error<RuleErrorType>;
pub type RuleErrors = Errors<RuleErrorType>;

pub type Result<T> = std::result::Result<T, RuleErrorType>;
pub type LineResult<T> = std::result::Result<T, RuleError>;
pub type TextResult<T> = std::result::Result<T, RuleErrors>;

fn io_error(error: std::io::Error, file: PathBuf) -> RuleError {
    RuleError {
        location: Location::in_file(file, 0),
        error: RuleErrorType::FileError(error)
    }
}

fn parse_side(tokens: &[Token], notation: &Notation) -> Result<Vec<Symbol>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    tokens
        .split(|t| *t == Token::Separator)
        .map(|piece| match piece {
            [Token::Symbol(text)] => Ok(Symbol::parse(text, notation)),
            _ => Err(RuleErrorType::EmptySymbol),
        })
        .collect()
}

fn parse_tokens(tokens: &[Token], notation: &Notation) -> Result<Production> {
    let mut sides = tokens.split(|t| *t == Token::Delimiter);

    let head = sides.next().unwrap_or_default();
    let daughters = sides
        .next()
        .ok_or_else(|| RuleErrorType::MissingDelimiter(notation.delimiter.clone()))?;

    if sides.next().is_some() {
        return Err(RuleErrorType::UnexpectedDelimiter(notation.delimiter.clone()));
    }

    Production::new(parse_side(head, notation)?, parse_side(daughters, notation)?)
}

pub fn parse_rule(rule: &str, notation: &Notation) -> Result<Production> {
    lexer::lex_rule(rule, notation).and_then(|tokens| parse_tokens(&tokens, notation))
}

fn parse_located_rule(rule: &str, location: Location, notation: &Notation) -> LineResult<Production> {
    parse_rule(rule, notation).map_err(|error| RuleError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';') && !line.starts_with('#')
}

// Keeps every rule if all of them parsed, otherwise every error
fn collect_located(results: impl Iterator<Item = LineResult<Production>>) -> TextResult<Vec<Production>> {
    let (rules, errors): (Vec<_>, Vec<_>) = results.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(rules)
}

fn parse_lines(text: &str, file: Option<&Path>, notation: &Notation) -> TextResult<Vec<Production>> {
    if notation.line_separator.is_empty() {
        return Err(vec![RuleError {
            location: Location {
                file: file.map(Path::to_path_buf),
                line: 0
            },
            error: RuleErrorType::EmptyLineSeparator
        }]);
    }

    let lines = text
        .split(notation.line_separator.as_str())
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| {
            let location = Location {
                file: file.map(Path::to_path_buf),
                line: num + 1
            };
            parse_located_rule(line, location, notation)
        });

    collect_located(lines)
}

// Parse multi-rule text. Blank lines and lines starting with `;` or `#`
// are skipped; every malformed line is reported.
pub fn parse_rules(text: &str, notation: &Notation) -> TextResult<Vec<Production>> {
    parse_lines(text, None, notation)
}

// Parse a sequence of rule strings, locating errors by 1-based position.
pub fn parse_rule_list<I, S>(rules: I, notation: &Notation) -> TextResult<Vec<Production>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = rules
        .into_iter()
        .enumerate()
        .map(|(num, rule)| parse_located_rule(rule.as_ref(), Location::line(num + 1), notation));

    collect_located(parsed)
}

pub fn parse_file(path: &Path, notation: Notation) -> TextResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| vec![io_error(e, path.to_path_buf())])?;
    let rules = parse_lines(&text, Some(path), &notation)?;

    log::debug!("Read {} rules from {}", rules.len(), path.display());
    let grammar = Grammar::from_productions_with(rules, notation);
    verifier::verify_rules(&grammar);

    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::nonterminal(text)
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::terminal(text)
    }

    #[test]
    fn parse_normal_rule() {
        let rules = vec!["S --> NP, VP", "N --> [home]", "X, p --> [a], []", "S -->"];
        let answers = vec![
            (vec![s_nonterminal("S")], vec![s_nonterminal("NP"), s_nonterminal("VP")]),
            (vec![s_nonterminal("N")], vec![s_terminal("home")]),
            (vec![s_nonterminal("X"), s_nonterminal("p")], vec![s_terminal("a"), Symbol::epsilon()]),
            (vec![s_nonterminal("S")], vec![])
        ];

        for (rule, (head, daughters)) in zip(rules, answers) {
            let production = parse_rule(rule, &Notation::default()).unwrap();
            assert_eq!(production.head(), head.as_slice());
            assert_eq!(production.daughters(), daughters.as_slice());
        }
    }

    #[test]
    fn parse_malformed_rule() {
        let notation = Notation::default();
        let arrow = "-->".to_string();

        assert_eq!(parse_rule("S NP VP", &notation), Err(RuleErrorType::MissingDelimiter(arrow.clone())));
        assert_eq!(parse_rule("", &notation), Err(RuleErrorType::MissingDelimiter(arrow.clone())));
        assert_eq!(parse_rule("S --> A --> B", &notation), Err(RuleErrorType::UnexpectedDelimiter(arrow)));
        assert_eq!(parse_rule("--> A", &notation), Err(RuleErrorType::MissingHead));
        assert_eq!(parse_rule("S --> A,,B", &notation), Err(RuleErrorType::EmptySymbol));
        assert_eq!(parse_rule("S --> A,", &notation), Err(RuleErrorType::EmptySymbol));
        assert_eq!(parse_rule(",S --> A", &notation), Err(RuleErrorType::EmptySymbol));
    }

    #[test]
    fn parse_text_skips_comments() {
        let text = "; a comment\nS --> NP, VP\n\n# another\nNP --> [john]\n";
        let rules = parse_rules(text, &Notation::default()).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].to_string(), "NP --> [john]");
    }

    #[test]
    fn parse_text_reports_every_line() {
        let text = "S --> NP, VP\nNP [john]\nVP --> ,\nVP --> [runs]";
        let errors = parse_rules(text, &Notation::default()).unwrap_err();

        assert_eq!(errors, vec![
            RuleError {
                location: Location::line(2),
                error: RuleErrorType::MissingDelimiter("-->".to_string())
            },
            RuleError {
                location: Location::line(3),
                error: RuleErrorType::EmptySymbol
            }
        ]);
    }

    #[test]
    fn parse_text_needs_line_separator() {
        let notation = Notation::default().with_line_separator("");
        let errors = parse_rules("S --> [a]", &notation).unwrap_err();

        assert_eq!(errors, vec![RuleError {
            location: Location::line(0),
            error: RuleErrorType::EmptyLineSeparator
        }]);
        assert!(Grammar::parse_with("S --> [a]", notation).is_err());
    }

    #[test]
    fn parse_list_locates_by_position() {
        let errors = parse_rule_list(["S --> A", "B"], &Notation::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, Location::line(2));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/english.cfg");
        let grammar = parse_file(&example_path, Notation::default()).unwrap();

        assert_eq!(grammar.len(), 9);
        assert_eq!(grammar.start_symbol(), Some(&s_nonterminal("S")));
        assert_eq!(grammar.productions_for(&[s_nonterminal("N")]), &[
            vec![s_terminal("ideas")],
            vec![s_terminal("dogs")]
        ]);
        assert!(grammar.is_context_free());
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cfg");
        let errors = parse_file(&example_path, Notation::default()).unwrap_err();

        assert_eq!(errors, vec![
            RuleError {
                location: Location::in_file(example_path.clone(), 3),
                error: RuleErrorType::MissingDelimiter("-->".to_string())
            },
            RuleError {
                location: Location::in_file(example_path, 6),
                error: RuleErrorType::UnexpectedDelimiter("-->".to_string())
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.cfg");
        let errors = parse_file(&example_path, Notation::default()).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location, Location::in_file(example_path, 0));
        assert_eq!(
            errors[0].error,
            RuleErrorType::FileError(std::io::Error::from(std::io::ErrorKind::NotFound))
        );
    }
}
