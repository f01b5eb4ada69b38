use std::env;
use std::fs::File;

use nonsense_core::model::author::Author;
use nonsense_core::model::generation_input::GenerationInput;
use nonsense_core::model::profile::StatisticalProfile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: nonsense-exemple [corpus.txt] [output.txt] [word_count]
    let args: Vec<String> = env::args().collect();
    let corpus = args.get(1);
    let output = args.get(2).map(String::as_str).unwrap_or("novel.txt");
    let size: usize = match args.get(3) {
        Some(value) => value.parse()?,
        None => 50_000,
    };

    // Learn the profile from a corpus when one is given; a cached .bin
    // next to the corpus is reused automatically
    let profile = match corpus {
        Some(path) => {
            println!("Parsing corpus at {}", path);
            StatisticalProfile::from_corpus(path)
        }
        None => StatisticalProfile::default(),
    };

    // The inferred vowels drive word shapes during generation
    println!("Vowels: {}", profile.vowels);

    let mut input = GenerationInput::default();

    // Fix the seed to make the novel reproducible
    input.seed = Some(1234);

    // Chances are thresholds in [0.0, 1.0]; anything else is rejected
    input.set_new_word_chance(0.96)?;
    match input.set_matched_chance(2.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Matched chance 2.0 is invalid, must be between 0.0 and 1.0"),
    }

    println!("Writing novel to {}", output);
    let mut author = Author::new(profile, input);
    let mut file = File::create(output)?;
    let written = author.write(size, &mut file)?;
    println!("Wrote {} word-units", written);

    // Dump the full profile, letter tables and all
    println!("{}", author.profile());

    Ok(())
}
