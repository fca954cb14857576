use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use hmmtag::{Model, Tagger};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of HMM part-of-speech tagging models.")]
struct Args {
    /// The model file to use when tagging text
    #[arg(long)]
    model: PathBuf,

    /// A test corpus. Files ending with `.txt` are read as slash-tagged text and others as
    /// CoNLL-U
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// Uses the tags of slash-tagged corpora as is instead of universal tags
    #[arg(long)]
    native_tags: bool,

    /// Writes the length and the accuracy of each sentence to this CSV file
    #[arg(long)]
    points: Option<PathBuf>,
}

#[derive(Serialize)]
struct Point {
    length: usize,
    accuracy: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::new(model);

    let sents = hmmtag_corpus::read_corpora(&args.corpus, !args.native_tags)?;

    log::info!("Start tagging");
    let start = Instant::now();
    let mut n_correct = 0;
    let mut n_total = 0;
    let mut points = vec![];
    for s in &sents {
        let words: Vec<&str> = s.words().collect();
        let predicted = tagger.tag(&words);
        let n_cor = s.tags().zip(predicted).filter(|(r, h)| r == h).count();
        n_correct += n_cor;
        n_total += words.len();
        if !words.is_empty() {
            points.push(Point {
                length: words.len(),
                accuracy: n_cor as f64 / words.len() as f64,
            });
        }
    }
    let duration = start.elapsed();

    if n_total == 0 {
        log::warn!("The test corpus contains no tokens.");
    } else {
        println!(
            "Accuracy: {:.2}%",
            n_correct as f64 / n_total as f64 * 100.
        );
    }
    println!("Tokens: {n_total}, Correct: {n_correct}");
    println!("Elapsed: {} [sec]", duration.as_secs_f64());

    if let Some(path) = args.points {
        let mut wtr = csv::Writer::from_writer(File::create(path)?);
        for point in &points {
            wtr.serialize(point)?;
        }
        wtr.flush()?;
    }

    Ok(())
}
