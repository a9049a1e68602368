use saring::{Censor, CensorStr, Options};

fn main() {
    // Clean text is unaffected.
    show_censor("Selamat pagi, apa kabar?");

    // Bad words and their aliases are censored.
    show_censor("Dasar anjing, anjay lah");

    // Whole words only, so "pantai" survives.
    show_censor("jalan-jalan ke pantai");

    // Leetspeak is ignored.
    show_censor("Dasar 4NJ1NG!");

    // Spaced out letters need split detection.
    let mut options = Options::default();
    options.with_detect_split(true);
    let text = "dasar a-n-j-i-n-g";
    println!(
        "{} -> {}",
        text,
        Censor::from_str(text).with_options(options).censor()
    );
}

fn show_censor(text: &str) {
    println!("{} -> {}", text, text.censor());
}
