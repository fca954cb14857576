#![cfg_attr(docsrs, feature(doc_cfg))]

//! # hmmtag
//!
//! hmmtag is a part-of-speech tagger based on a first-order hidden Markov model.
//!
//! A [`Trainer`] counts add-alpha smoothed tag transitions and word emissions in labeled
//! sentences and normalizes them into a [`Model`]. A [`Tagger`] decodes the most likely tag
//! sequence of tokenized words with the Viterbi algorithm.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! use hmmtag::{Model, TagSet, Tagger, Trainer, Vocabulary};
//!
//! let corpus = vec![
//!     vec![("the", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")],
//!     vec![("a", "DET"), ("dog", "NOUN"), ("barks", "VERB")],
//! ];
//! let vocab = Vocabulary::build(corpus.iter().flatten().map(|(w, _)| *w), None);
//! let mut trainer = Trainer::new(TagSet::universal(), vocab, 0.1).unwrap();
//! for s in &corpus {
//!     trainer.add_sentence(s).unwrap();
//! }
//! let model = trainer.train();
//!
//! let mut f = BufWriter::new(File::create("model.bin").unwrap());
//! model.write(&mut f).unwrap();
//!
//! let mut f = BufReader::new(File::open("model.bin").unwrap());
//! let tagger = Tagger::new(Model::read(&mut f).unwrap());
//! assert_eq!(vec!["DET", "NOUN"], tagger.tag(&["the", "dog"]));
//! ```

pub mod errors;
pub mod matrix;

mod model;
mod tag_set;
mod tagger;
mod trainer;
mod vocabulary;

pub use model::Model;
pub use tag_set::{TagLookup, TagSet, START_SYMBOL, UNIVERSAL_TAGS};
pub use tagger::{Path, Tagger};
pub use trainer::{TaggedToken, Trainer, UnknownTagPolicy};
pub use vocabulary::{Vocabulary, OOV_SYMBOL};
