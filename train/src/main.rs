use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use hmmtag::{TagSet, Trainer, UnknownTagPolicy, Vocabulary};
use hmmtag_corpus::SlashTag;

#[derive(Clone, Copy, Debug)]
struct UnknownTag(UnknownTagPolicy);

impl FromStr for UnknownTag {
    type Err = &'static str;
    fn from_str(policy: &str) -> Result<Self, Self::Err> {
        match policy {
            "fallback" => Ok(Self(UnknownTagPolicy::Fallback)),
            "skip" => Ok(Self(UnknownTagPolicy::Skip)),
            "error" => Ok(Self(UnknownTagPolicy::Error)),
            _ => Err("Could not parse an unknown-tag value"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "A program to train HMM part-of-speech tagging models.")]
struct Args {
    /// A training corpus. Files ending with `.txt` are read as slash-tagged text and others as
    /// CoNLL-U
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// The additive smoothing constant
    #[arg(long, default_value = "0.1")]
    alpha: f64,

    /// Keeps only this number of the most frequent words
    #[arg(long)]
    vocab_size: Option<usize>,

    /// Uses the tags of slash-tagged corpora as is instead of universal tags
    #[arg(long)]
    native_tags: bool,

    /// How to treat tags outside the tag set: {fallback, skip, error}.
    /// fallback: counts as the last tag (X).
    /// skip: ignores the token.
    /// error: aborts training.
    #[arg(long, default_value = "skip")]
    unknown_tag: UnknownTag,

    /// Number of threads for counting (0 means the number of CPUs)
    #[arg(long, default_value = "0")]
    n_threads: usize,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.n_threads != 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.n_threads)
            .build_global()?;
    }

    log::info!("Loading dataset...");
    let sents = hmmtag_corpus::read_corpora(&args.corpus, !args.native_tags)?;

    let vocab = Vocabulary::build(sents.iter().flat_map(|s| s.words()), args.vocab_size);
    log::info!("# of words: {}", vocab.len());

    let tag_set = if args.native_tags {
        TagSet::new(SlashTag::ALL.iter().map(|t| t.as_str()))?
    } else {
        TagSet::universal()
    };

    log::info!("Start training...");
    let mut trainer =
        Trainer::new(tag_set, vocab, args.alpha)?.unknown_tag_policy(args.unknown_tag.0);
    trainer.add_sentences_par(&sents)?;
    let model = trainer.train();
    log::info!("Finish training.");

    let mut f = zstd::Encoder::new(File::create(args.model)?, 19)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
