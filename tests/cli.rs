use clap::Parser;

use koota::cli::Cli;
use koota::run_with;

fn run(argv: &[&str]) -> (anyhow::Result<()>, String) {
    let args = Cli::parse_from(std::iter::once("koota").chain(argv.iter().copied()));
    let mut out = Vec::new();
    let result = run_with(&args, &mut out);
    (result, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn missing_files_are_named_and_nothing_is_written() {
    let (result, out) = run(&[
        "tests/fixtures/single.koota",
        "tests/fixtures/absent.koota",
        "nowhere.koota",
    ]);

    let message = result.unwrap_err().to_string();
    assert!(message.starts_with("missing input file(s)"), "{message}");
    assert!(message.contains("tests/fixtures/absent.koota"), "{message}");
    assert!(message.contains("nowhere.koota"), "{message}");
    assert!(!message.contains("single.koota"), "{message}");
    assert_eq!(out, "");
}

#[test]
fn single_file_writes_words_without_header() {
    let (result, out) = run(&["tests/fixtures/single.koota"]);

    result.unwrap();
    assert_eq!(out, "ka\n");
}

#[test]
fn several_files_get_headers() {
    let (result, out) = run(&[
        "-w",
        "3",
        "-d",
        "-p",
        " ",
        "tests/fixtures/single.koota",
        "tests/fixtures/single.koota",
    ]);

    result.unwrap();
    assert_eq!(
        out,
        "--- tests/fixtures/single.koota\nka ka ka\n\n--- tests/fixtures/single.koota\nka ka ka\n"
    );
}

#[test]
fn bytecode_flag_writes_a_listing() {
    let (result, out) = run(&["--bytecode", "tests/fixtures/single.koota"]);

    result.unwrap();
    assert!(out.contains("PUT"), "{out}");
    assert!(out.contains("HALT"), "{out}");
}
