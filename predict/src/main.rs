use std::fs::File;
use std::io::{prelude::*, stdin, stdout, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use hmmtag::{Model, Tagger};

#[derive(Parser, Debug)]
#[command(about = "A program to perform part-of-speech tagging.")]
struct Args {
    /// The model file to use when tagging text
    #[arg(long)]
    model: PathBuf,

    /// Number of threads (0 means tagging line by line on the main thread)
    #[arg(long, default_value = "0")]
    n_threads: usize,
}

fn write_tagged<W>(out: &mut W, words: &[&str], tags: &[&str]) -> std::io::Result<()>
where
    W: Write,
{
    for (i, (word, tag)) in words.iter().zip(tags).enumerate() {
        if i != 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{word}/{tag}")?;
    }
    out.write_all(b"\n")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::new(model);

    log::info!("Start tagging");
    let mut out = BufWriter::new(stdout().lock());
    let mut n_words = 0;
    let start = Instant::now();
    if args.n_threads == 0 {
        for line in stdin().lock().lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            let tags = tagger.tag(&words);
            n_words += words.len();
            write_tagged(&mut out, &words, &tags)?;
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.n_threads)
            .build()?;
        let lines = stdin().lock().lines().collect::<Result<Vec<_>, _>>()?;
        let sents: Vec<Vec<&str>> = lines
            .iter()
            .map(|line| line.split_whitespace().collect())
            .collect();
        let results = pool.install(|| tagger.tag_batch(&sents));
        for (words, tags) in sents.iter().zip(&results) {
            n_words += words.len();
            write_tagged(&mut out, words, tags)?;
        }
    }
    out.flush()?;
    let duration = start.elapsed();
    log::info!("Elapsed: {} [sec]", duration.as_secs_f64());
    log::info!(
        "Speed: {} [words/sec]",
        n_words as f64 / duration.as_secs_f64()
    );

    Ok(())
}
