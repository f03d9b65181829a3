//! Basic usage of the recite comparison engine

use recite_core::{compare_attempt, CompareConfig, SpanStyle, Thresholds};

const LINE: &str = "----------------------------------------";

fn main() {
    env_logger::init();

    println!("=== Recite Core Examples ===\n");

    example_perfect_attempt();
    example_typo();
    example_omissions_and_extras();
    example_custom_thresholds();
}

fn example_perfect_attempt() {
    println!("Example 1: Case and punctuation do not count against you");
    println!("{}", LINE);

    let result = compare_attempt("Jesus wept.", "jesus wept", None);
    println!("Score: {}% ({:?})", result.score.percent, result.score.verdict);
    print_spans(&result.spans);
    println!();
}

fn example_typo() {
    println!("Example 2: A single wrong word");
    println!("{}", LINE);

    let result = compare_attempt(
        "For God so loved the world",
        "For God so loves the world",
        None,
    );
    println!("Score: {}% ({:?})", result.score.percent, result.score.verdict);
    print_spans(&result.spans);
    println!();
}

fn example_omissions_and_extras() {
    println!("Example 3: Omitted and extra words");
    println!("{}", LINE);

    let result = compare_attempt(
        "Trust in the Lord with all thine heart",
        "Trust in the Lord completely with thine heart",
        None,
    );
    println!("Score: {}% ({:?})", result.score.percent, result.score.verdict);
    print_spans(&result.spans);
    println!();
}

fn example_custom_thresholds() {
    println!("Example 4: Custom pass thresholds");
    println!("{}", LINE);

    let strict = CompareConfig::default().with_thresholds(Thresholds {
        excellent: 100,
        pass: 90,
    });

    let result = compare_attempt("In the beginning", "In the beginnin", Some(strict));
    println!("Score: {}% ({:?})", result.score.percent, result.score.verdict);
    println!();
}

fn print_spans(spans: &[recite_core::Span]) {
    for span in spans {
        match span.style {
            SpanStyle::Normal => print!("{}", span.text),
            SpanStyle::Wrong => print!("[-{}-]", span.text),
            SpanStyle::Added => print!("[+{}+]", span.text),
            SpanStyle::Cap => print!("[~{}~]", span.text),
        }
    }
    println!();
}
