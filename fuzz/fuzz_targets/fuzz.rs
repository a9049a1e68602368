#![no_main]
use libfuzzer_sys::fuzz_target;
use saring::{Censor, Options};

fuzz_target!(|data: &[u8]| {
    if !data.is_empty() {
        let flags = data[0];
        let input = &data[1..];

        if let Ok(text) = std::str::from_utf8(input) {
            let mut options = Options::default();
            options
                .with_detect_leet_speak(flag(flags, 0))
                .with_indonesian_variation(flag(flags, 1))
                .with_detect_split(flag(flags, 2))
                .with_detect_masked(input.len() % 2 == 1)
                .with_detect_similarity(flag(flags, 3))
                .with_use_levenshtein(flag(flags, 4))
                .with_check_substring(flag(flags, 5))
                .with_full_word_censor(flag(flags, 6))
                .with_severity_threshold(if flag(flags, 7) { 0.7 } else { 0.0 });

            let found = saring::find_profanity(text, &options);
            assert_eq!(saring::is_profane(text, &options), !found.is_empty());
            let _ = saring::find_profanity_with_metadata(text, &options);

            let result = Censor::from_str(text)
                .with_options(options.clone())
                .censor_and_analyze();
            assert_eq!(result.filtered.chars().count(), text.chars().count());

            let _ = saring::analyze(text, &options);
            let _ = saring::analyze_by_sentence(text, &options);
            let _ = saring::analyze_with_context(text, 3, &options);
            let _ = saring::normalize_text(text);
            let _ = saring::levenshtein_distance(text, "anjing");
        }
    }
});

fn flag(flags: u8, index: u8) -> bool {
    ((flags >> index) & 1) == 1
}
