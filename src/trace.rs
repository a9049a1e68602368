use saring::{calculate_severity, Censor, Options, Preset};
use std::env::args;

/// Prints what the default lexicon finds in the arguments. Set `SARING_PRESET` to use a preset.
pub fn main() {
    let input = args().skip(1).collect::<Vec<_>>().join(" ");
    let options = std::env::var("SARING_PRESET")
        .ok()
        .and_then(|name| name.parse::<Preset>().ok())
        .map(Options::from)
        .unwrap_or_default();

    let outcome = saring::find_profanity_detailed(&input, &options);
    let entries = saring::find_profanity_with_metadata(&input, &options);
    let censored = Censor::from_str(&input)
        .with_options(options.clone())
        .censor();

    println!(
        "\"{}\" -> \"{}\" (severity {:.3})",
        input,
        censored,
        calculate_severity(&entries)
    );
    for record in outcome.records() {
        println!("  {} <- {:?}", record.word, record.triggers);
    }
    #[cfg(feature = "similarity")]
    for similar in outcome.similar_words() {
        println!(
            "  {} ~ {} ({:.3})",
            similar.word, similar.original, similar.similarity
        );
    }
}
