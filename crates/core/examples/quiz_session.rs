//! A complete quiz round: store a passage, fetch its text in the background,
//! then compare an attempt.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use recite_core::fetch::CanonicalFetcher;
use recite_core::store::{MemoryStore, PassageStore};
use recite_core::{compare_attempt, PassageRef, SpanStyle};
use recite_core::verse::TableVerseSource;

fn main() {
    env_logger::init();

    // The verse source collaborator (normally a scripture database)
    let mut source = TableVerseSource::new();
    source.insert("John", 11, 35, "Jesus wept.");
    source.insert(
        "John",
        3,
        16,
        "For God so loved the world, that he gave his only begotten Son,",
    );
    let source: Arc<TableVerseSource> = Arc::new(source);

    // Passages selected for practice
    let mut store = MemoryStore::new();
    store.add(PassageRef::verse("John", 11, 35));
    store.add(PassageRef::verse("John", 3, 16));

    let passage = store.list()[1].clone();
    println!("Quiz: {passage}");

    // Fetch the canonical text without blocking the interface
    let fetcher = CanonicalFetcher::new();
    fetcher.request(Arc::clone(&source) as Arc<dyn recite_core::VerseSource>, passage.clone(), 8000);

    let canonical = loop {
        if let Some(text) = fetcher.latest() {
            break text;
        }
        thread::sleep(Duration::from_millis(5));
    };

    let attempt = "for god so loved the world that he gave his only begotten son";
    println!("Attempt: {attempt}\n");

    let result = compare_attempt(&canonical, attempt, None);
    println!("Score: {}% ({:?})", result.score.percent, result.score.verdict);

    for span in &result.spans {
        match span.style {
            SpanStyle::Normal => print!("{}", span.text),
            SpanStyle::Wrong => print!("[-{}-]", span.text),
            SpanStyle::Added => print!("[+{}+]", span.text),
            SpanStyle::Cap => print!("[~{}~]", span.text),
        }
    }
    println!();

    // Passed? Record progress
    if result.score.is_pass() {
        store.set_status(&passage, 1);
        store.set_favorite(&passage, true);
    }
}
