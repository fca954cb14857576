//! Corpus readers for hmmtag.
//!
//! Two formats are supported:
//!
//! * CoNLL-U treebanks ([`conllu`]), using the FORM and UPOS columns.
//! * Slash-tagged plain text ([`slash`]), one sentence per line with `word/tag` tokens.

pub mod conllu;
pub mod slash;

use std::fs;
use std::io::{self, BufReader};
use std::path::Path;

pub use slash::SlashTag;

/// Sentence with a gold tag for each word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaggedSentence {
    tokens: Vec<(String, String)>,
}

impl TaggedSentence {
    /// Creates an empty sentence.
    pub const fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Appends a word and its tag.
    pub fn push<W, T>(&mut self, word: W, tag: T)
    where
        W: Into<String>,
        T: Into<String>,
    {
        self.tokens.push((word.into(), tag.into()));
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|(w, _)| w.as_str())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|(_, t)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(w, t)| (w.as_str(), t.as_str()))
    }
}

impl<'a> IntoIterator for &'a TaggedSentence {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl<W, T> FromIterator<(W, T)> for TaggedSentence
where
    W: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, T)>>(iter: I) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .map(|(w, t)| (w.into(), t.into()))
                .collect(),
        }
    }
}

/// Reads a corpus file. Files with the `.txt` extension are read as slash-tagged text and
/// others as CoNLL-U.
///
/// # Arguments
///
/// * `path` - A corpus file.
/// * `universal` - Converts slash tags into universal tags. CoNLL-U files always use UPOS.
///
/// # Errors
///
/// I/O errors are returned as is. Malformed lines are skipped.
pub fn read_corpus<P>(path: P, universal: bool) -> io::Result<Vec<TaggedSentence>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let rdr = BufReader::new(fs::File::open(path)?);
    let sents = if path.extension().map_or(false, |ext| ext == "txt") {
        slash::read(rdr, universal)?
    } else {
        conllu::read(rdr)?
    };
    log::info!("{} sentences loaded from {path:?}", sents.len());
    Ok(sents)
}

/// Reads multiple corpus files with [`read_corpus()`] and concatenates them.
pub fn read_corpora<I, P>(paths: I, universal: bool) -> io::Result<Vec<TaggedSentence>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut sents = vec![];
    for path in paths {
        sents.append(&mut read_corpus(path, universal)?);
    }
    Ok(sents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use hmmtag::{TagSet, Tagger, Trainer, Vocabulary};

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("hmmtag_corpus_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_tagged_sentence() {
        let s: TaggedSentence = [("the", "DET"), ("cat", "NOUN")].into_iter().collect();

        assert_eq!(2, s.len());
        assert_eq!(vec!["the", "cat"], s.words().collect::<Vec<_>>());
        assert_eq!(vec!["DET", "NOUN"], s.tags().collect::<Vec<_>>());
        assert_eq!(vec![("the", "DET"), ("cat", "NOUN")], s.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_read_corpora_dispatch() {
        let slash = write_temp("dispatch.txt", "公/n 曰/v\n");
        let conllu = write_temp("dispatch.conllu", "1\tthe\tthe\tDET\n2\tcat\tcat\tNOUN\n\n");

        let sents = read_corpora([&slash, &conllu], true).unwrap();

        assert_eq!(2, sents.len());
        assert_eq!(vec![("公", "NOUN"), ("曰", "VERB")], sents[0].iter().collect::<Vec<_>>());
        assert_eq!(vec![("the", "DET"), ("cat", "NOUN")], sents[1].iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_read_corpus_missing() {
        let path = std::env::temp_dir().join("hmmtag_corpus_missing_file.conllu");

        assert!(read_corpus(path, true).is_err());
    }

    #[test]
    fn test_train_from_corpus() {
        let path = write_temp(
            "train.conllu",
            "# text = the cat\n\
             1\tthe\tthe\tDET\t_\t_\t2\tdet\t_\t_\n\
             2\tcat\tcat\tNOUN\t_\t_\t0\troot\t_\t_\n\
             \n\
             # text = a dog\n\
             1\ta\ta\tDET\t_\t_\t2\tdet\t_\t_\n\
             2\tdog\tdog\tNOUN\t_\t_\t0\troot\t_\t_\n",
        );
        let sents = read_corpus(path, true).unwrap();

        let vocab = Vocabulary::build(sents.iter().flat_map(|s| s.words()), None);
        let mut trainer = Trainer::new(TagSet::universal(), vocab, 0.1).unwrap();
        trainer.add_sentences_par(&sents).unwrap();
        let tagger = Tagger::new(trainer.train());

        assert_eq!(vec!["DET", "NOUN"], tagger.tag(&["the", "dog"]));
    }
}
