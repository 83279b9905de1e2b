use std::env;

use rs_markov_core::io::{corpus_name, open_corpus};
use rs_markov_core::model::sentence_model::{SentenceModel, StartWord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Corpus path and sentence length from the command line, with defaults
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "./data/speech.txt".to_owned());
    let length: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => 12,
    };

    // Build the model by streaming the corpus line by line;
    // counts are normalized once the file is exhausted
    let model = SentenceModel::from_reader(open_corpus(&path)?)?;
    println!(
        "Corpus '{}': {} words with outgoing transitions",
        corpus_name(&path)?,
        model.len()
    );

    // Generate a few sentences with a random start word.
    // A sentence can reach a word that only ever closed a line;
    // that dead end is reported instead of a truncated sentence.
    for i in 0..5 {
        match model.generate(&StartWord::Random, length) {
            Ok(sentence) => println!("Sentence {}: {}", i + 1, sentence),
            Err(e) => println!("Sentence {}: dead end ({})", i + 1, e),
        }
    }

    // A start word the corpus never contained cannot be continued
    match model.generate(&StartWord::Custom("xyzzy"), length) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Seeding with an unknown word fails: {}", e),
    }

    // An empty corpus yields an empty model, which cannot generate at all
    let empty = SentenceModel::from_lines(Vec::<String>::new())?;
    match empty.generate(&StartWord::Random, length) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Generating from an empty model fails: {}", e),
    }

    Ok(())
}
