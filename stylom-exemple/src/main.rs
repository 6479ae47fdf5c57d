use std::fs;
use std::path::Path;

use stylom_core::model::{Attribution, NGramEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Print engine events (analysis progress, skipped works, ...)
    tracing_subscriber::fmt().init();

    // Build a tiny corpus on disk: one directory per author,
    // any file naming inside
    let root = Path::new("./data");
    fs::create_dir_all(root.join("Verne"))?;
    fs::create_dir_all(root.join("Balzac"))?;
    fs::write(
        root.join("Verne/lune.txt"),
        "From the earth to the moon, the projectile carried the three \
         travellers across the silent dark, and the moon grew large before them.",
    )?;
    fs::write(
        root.join("Balzac/pension.txt"),
        "The pension dining room smelled of soup and old wood; the lodgers \
         gathered around the long table and talked about money.",
    )?;

    // Configure the engine: bigrams, punctuation stripped
    let mut engine = NGramEngine::new();
    engine.set_ngram_size(2)?;
    engine.set_punctuation_policy(true);
    engine.set_author_root(root)?;

    // Attempting to set an out-of-range n-gram size
    match engine.set_ngram_size(0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("N-gram size 0 is invalid, must be between 1 and 20"),
    }

    // Build every author model in one pass; the result is a plain
    // value that later queries borrow
    let models = engine.analyze()?;
    println!("Analyzed {} author(s)", models.len());

    // Attribute an unknown text: one (author, score) pair per author,
    // unordered, so sort before printing
    let unknown = root.join("unknown.txt");
    fs::write(
        &unknown,
        "The travellers watched the moon fill the window of the projectile.",
    )?;
    let mut scores = engine.find_author(&models, &unknown)?;
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (author, score) in &scores {
        println!("{}: {:.4}", author, score);
    }

    // Generate 10 bigrams in Verne's style
    let generated = root.join("generated.txt");
    engine.gen_text(&models, "Verne", 10, &generated)?;
    println!("Generated: {}", fs::read_to_string(&generated)?);

    // Most frequent bigram(s) of Verne (ties share a rank)
    let top = engine.get_nth_element(&models, "Verne", 1)?;
    println!("Rank 1 bigrams for Verne: {:?}", top);

    // Asking for an author without a model must fail
    match engine.gen_text(&models, "Hugo", 10, &generated) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("This author ('Hugo') has no model"),
    }

    // Per-author frequency dumps ("<author> Occurenc_mots.txt")
    NGramEngine::write_frequency_dumps(&models, root)?;

    Ok(())
}
