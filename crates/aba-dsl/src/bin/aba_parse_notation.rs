use std::{env, fs};

use aba_dsl::framework::RunOptions;
use aba_dsl::input::normalize_input;

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: aba_parse_notation <framework.txt|framework.json>");
        std::process::exit(2);
    };
    if args.next().is_some() {
        eprintln!("usage: aba_parse_notation <framework.txt|framework.json>");
        std::process::exit(2);
    }

    let text = match fs::read_to_string(&path) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("failed to read `{path}`: {err}");
            std::process::exit(2);
        }
    };

    match normalize_input(&text, RunOptions::default()) {
        Ok(input) => {
            let fw = &input.framework;
            println!(
                "ok({:?}): literals={} assumptions={} contraries={} rules={}",
                input.source,
                fw.literals.len(),
                fw.assumptions.len(),
                fw.contraries.len(),
                fw.rules.len()
            );
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
