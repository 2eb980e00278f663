mod cli;

use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Cli, Command, GrammarArgs};
use gramtree::{generator, parser, Grammar, Symbol, Tree, TreeDelimiters};

fn report(error: impl Display) {
    eprintln!("\x1b[31;49;1merror:\x1b[39;49;1m {}\x1b[0m", error);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn load_grammar(args: &GrammarArgs) -> Option<Grammar> {
    match parser::parse_file(&args.file, args.notation()) {
        Ok(grammar) => Some(grammar),
        Err(errors) => {
            for error in &errors {
                report(error);
            }
            None
        }
    }
}

fn yes_no(answer: bool) -> &'static str {
    if answer { "yes" } else { "no" }
}

fn classify(grammar: &Grammar) {
    let start = grammar.start_symbol().map_or("-".to_string(), |s| s.to_string());
    println!("rules:                {}", grammar.len());
    println!("start symbol:         {}", start);
    println!("context-free:         {}", yes_no(grammar.is_context_free()));
    println!("right-regular:        {}", yes_no(grammar.is_right_regular()));
    println!("left-regular:         {}", yes_no(grammar.is_left_regular()));
    println!("strictly regular:     {}", yes_no(grammar.is_strictly_regular()));
    println!("regular:              {}", yes_no(grammar.is_regular()));
    println!("linear:               {}", yes_no(grammar.is_linear()));
    println!("chomsky normal form:  {}", yes_no(grammar.is_chomsky_normal_form()));
    println!("greibach normal form: {}", yes_no(grammar.is_greibach_normal_form()));
    println!("left-recursive:       {}", yes_no(grammar.is_left_recursive()));
}

fn generate(
    grammar: &Grammar,
    start: Option<Symbol>,
    amount: u32,
    max_depth: usize,
    seed: Option<u64>,
) -> bool {
    let Some(start) = start.or_else(|| grammar.start_symbol().cloned()) else {
        report(generator::GenerateErrorType::NoStartSymbol);
        return false;
    };
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    for _ in 0..amount {
        match generator::generate_with_rng(grammar, &start, max_depth, &mut rng) {
            Ok(sentence) => println!("{}", sentence),
            Err(error) => {
                report(error);
                return false;
            }
        }
    }
    true
}

fn describe_tree(text: &str, delimiters: TreeDelimiters, latex: bool, flatten: bool, rules: bool) -> bool {
    let tree = match Tree::parse_with(text, delimiters) {
        Ok(tree) if flatten => tree.flatten(),
        Ok(tree) => tree,
        Err(error) => {
            report(error);
            return false;
        }
    };

    if latex {
        println!("{}", tree.to_latex_qtree());
    } else if rules {
        println!("{}", tree.to_grammar());
    } else {
        println!("{}", tree.render(delimiters));
        println!("height: {}", tree.height());
        println!("leaves: {}", tree.leaves().collect::<Vec<_>>().join(" "));
    }
    true
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let succeeded = match cli.command {
        Command::Classify { grammar } => load_grammar(&grammar).map(|g| classify(&g)).is_some(),
        Command::Generate { grammar, start, amount, max_depth, seed } => {
            let notation = grammar.notation();
            let start = start.map(|s| Symbol::parse(&s, &notation));
            load_grammar(&grammar).is_some_and(|g| generate(&g, start, amount, max_depth, seed))
        }
        Command::Tree { text, tree_delimiters, latex, flatten, rules } => {
            describe_tree(&text, tree_delimiters, latex, flatten, rules)
        }
    };

    if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
