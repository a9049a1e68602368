use saring::{Censor, Lexicon, Matcher, Options, Preset, Region};

const LEXICON: &str = "word,category,region,severity,aliases,description,context
kampret,insult,jawa,0.4,kampred|kamprut,,
bajingan,insult,general,0.7,bajigur,,
";

fn main() {
    let matcher = Matcher::new(Lexicon::from_csv(LEXICON.as_bytes()).expect("valid lexicon"));

    let mut options = Options::from(Preset::Jawa);
    options.with_full_word_censor(false).with_replace_with('?');

    let result = Censor::new(&matcher, "Dasar k4mpr3d, bajingan!")
        .with_options(options.clone())
        .censor_and_analyze();
    assert_eq!(result.filtered, "Dasar k?????d, bajingan!");
    assert_eq!(result.censored, 1);

    let analysis = matcher.analyze("Dasar k4mpr3d, bajingan!", &options);
    assert_eq!(analysis.matches, vec!["kampret"]);
    assert_eq!(analysis.regions, vec![Region::Jawa]);

    let summary = matcher.batch_analyze(
        &["kampret", "bajingan", "kampret dan bajingan", "halo"],
        &Options::default(),
    );
    println!("{:#?}", summary);
}
