#[cfg(feature = "multithreading")]
use rayon::prelude::*;

use crate::errors::{HmmTagError, Result};
use crate::matrix::CountMatrix;
use crate::model::Model;
use crate::tag_set::{TagLookup, TagSet};
use crate::vocabulary::Vocabulary;

/// A word paired with its gold tag.
pub trait TaggedToken {
    fn word(&self) -> &str;
    fn tag(&self) -> &str;
}

impl<W, T> TaggedToken for (W, T)
where
    W: AsRef<str>,
    T: AsRef<str>,
{
    fn word(&self) -> &str {
        self.0.as_ref()
    }

    fn tag(&self) -> &str {
        self.1.as_ref()
    }
}

impl<X> TaggedToken for &X
where
    X: TaggedToken + ?Sized,
{
    fn word(&self) -> &str {
        (**self).word()
    }

    fn tag(&self) -> &str {
        (**self).tag()
    }
}

/// What the trainer does with a tag that is not in the tag set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Counts the token as the last tag of the tag set.
    Fallback,

    /// Ignores the token. The next known tag is linked to the last known one.
    #[default]
    Skip,

    /// Rejects the whole sentence.
    Error,
}

/// Counts of one or more sentences.
#[derive(Clone, Debug)]
struct Accumulator {
    transition: CountMatrix,
    emission: CountMatrix,
    n_sentences: usize,
    n_tokens: usize,
    n_skipped: usize,
}

impl Accumulator {
    fn new(n_tags: usize, n_words: usize) -> Self {
        Self {
            transition: CountMatrix::new(n_tags, n_tags),
            emission: CountMatrix::new(n_tags, n_words),
            n_sentences: 0,
            n_tokens: 0,
            n_skipped: 0,
        }
    }

    fn merge(&mut self, other: &Self) {
        self.transition.merge(&other.transition);
        self.emission.merge(&other.emission);
        self.n_sentences += other.n_sentences;
        self.n_tokens += other.n_tokens;
        self.n_skipped += other.n_skipped;
    }

    fn add_sentence<I>(
        &mut self,
        tag_set: &TagSet,
        vocabulary: &Vocabulary,
        policy: UnknownTagPolicy,
        tokens: I,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: TaggedToken,
    {
        // Resolves every tag first so that a rejected sentence leaves no partial counts.
        let mut ids = vec![];
        for token in tokens {
            let tag_id = match tag_set.lookup(token.tag()) {
                TagLookup::Known(TagSet::START_INDEX) | TagLookup::Unmapped => match policy {
                    UnknownTagPolicy::Fallback => {
                        log::debug!("unknown tag `{}` folded into the last tag", token.tag());
                        Some(tag_set.len() - 1)
                    }
                    UnknownTagPolicy::Skip => {
                        log::debug!("token with unknown tag `{}` skipped", token.tag());
                        None
                    }
                    UnknownTagPolicy::Error => {
                        return Err(HmmTagError::invalid_argument(
                            "tag",
                            format!("`{}` is not in the tag set", token.tag()),
                        ));
                    }
                },
                TagLookup::Known(idx) => Some(idx),
            };
            ids.push((vocabulary.index_of(token.word()), tag_id));
        }

        let mut prev_tag_id = TagSet::START_INDEX;
        for (word_id, tag_id) in ids {
            self.n_tokens += 1;
            let Some(tag_id) = tag_id else {
                self.n_skipped += 1;
                continue;
            };
            self.emission.increment(tag_id, word_id);
            self.transition.increment(prev_tag_id, tag_id);
            prev_tag_id = tag_id;
        }
        self.n_sentences += 1;
        Ok(())
    }
}

/// Trainer.
///
/// The trainer owns the count matrices while sentences are added. [`Trainer::train()`]
/// consumes it and returns an immutable [`Model`].
///
/// # Examples
///
/// ```
/// use hmmtag::{TagSet, Tagger, Trainer, Vocabulary};
///
/// let corpus = vec![
///     vec![("the", "DET"), ("cat", "NOUN")],
///     vec![("a", "DET"), ("dog", "NOUN")],
/// ];
///
/// let vocab = Vocabulary::build(corpus.iter().flatten().map(|(w, _)| *w), None);
/// let mut trainer = Trainer::new(TagSet::universal(), vocab, 0.1).unwrap();
/// for s in &corpus {
///     trainer.add_sentence(s).unwrap();
/// }
///
/// let tagger = Tagger::new(trainer.train());
/// assert_eq!(vec!["DET", "NOUN"], tagger.tag(&["the", "dog"]));
/// ```
pub struct Trainer {
    tag_set: TagSet,
    vocabulary: Vocabulary,
    alpha: f64,
    policy: UnknownTagPolicy,
    acc: Accumulator,
}

impl Trainer {
    /// Creates a new trainer.
    ///
    /// # Arguments
    ///
    /// * `tag_set` - Tags to be estimated.
    /// * `vocabulary` - A frozen vocabulary.
    /// * `alpha` - Additive smoothing constant.
    ///
    /// # Errors
    ///
    /// If `alpha` is not a finite positive number, an error variant will be returned.
    pub fn new(tag_set: TagSet, vocabulary: Vocabulary, alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(HmmTagError::invalid_argument(
                "alpha",
                format!("must be a finite positive number, but got {alpha}"),
            ));
        }
        let acc = Accumulator::new(tag_set.len(), vocabulary.len());
        Ok(Self {
            tag_set,
            vocabulary,
            alpha,
            policy: UnknownTagPolicy::default(),
            acc,
        })
    }

    /// Sets the policy for tags outside the tag set.
    pub fn unknown_tag_policy(mut self, policy: UnknownTagPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a labeled sentence.
    ///
    /// # Errors
    ///
    /// With [`UnknownTagPolicy::Error`], a sentence containing an unknown tag is rejected and
    /// no count is changed.
    pub fn add_sentence<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: TaggedToken,
    {
        self.acc
            .add_sentence(&self.tag_set, &self.vocabulary, self.policy, tokens)
    }

    /// Adds labeled sentences in parallel. Each worker counts into its own matrices and the
    /// partial counts are summed afterwards.
    ///
    /// # Errors
    ///
    /// With [`UnknownTagPolicy::Error`], if any sentence is rejected, none of `sentences` is
    /// counted.
    #[cfg(feature = "multithreading")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multithreading")))]
    pub fn add_sentences_par<'s, S>(&mut self, sentences: &'s [S]) -> Result<()>
    where
        S: Sync,
        &'s S: IntoIterator,
        <&'s S as IntoIterator>::Item: TaggedToken,
    {
        let tag_set = &self.tag_set;
        let vocabulary = &self.vocabulary;
        let policy = self.policy;
        let new_acc = || Accumulator::new(tag_set.len(), vocabulary.len());
        let partial = sentences
            .par_iter()
            .try_fold(new_acc, |mut acc, sentence| {
                acc.add_sentence(tag_set, vocabulary, policy, sentence)?;
                Ok::<_, HmmTagError>(acc)
            })
            .try_reduce(new_acc, |mut a, b| {
                a.merge(&b);
                Ok(a)
            })?;
        self.acc.merge(&partial);
        Ok(())
    }

    /// Number of sentences added so far.
    pub const fn n_sentences(&self) -> usize {
        self.acc.n_sentences
    }

    /// Number of tokens added so far, including skipped ones.
    pub const fn n_tokens(&self) -> usize {
        self.acc.n_tokens
    }

    /// Number of tokens ignored because of an unknown tag.
    pub const fn n_skipped(&self) -> usize {
        self.acc.n_skipped
    }

    /// Normalizes the counts and returns the model.
    pub fn train(self) -> Model {
        log::info!(
            "estimating {} tags x {} words from {} sentences ({} tokens, {} skipped)",
            self.tag_set.len(),
            self.vocabulary.len(),
            self.acc.n_sentences,
            self.acc.n_tokens,
            self.acc.n_skipped,
        );
        if self.acc.n_skipped != 0 {
            log::warn!("{} tokens had a tag outside the tag set", self.acc.n_skipped);
        }
        let transition = self.acc.transition.normalize(self.alpha);
        let emission = self.acc.emission.normalize(self.alpha);
        Model {
            tag_set: self.tag_set,
            vocabulary: self.vocabulary,
            alpha: self.alpha,
            transition,
            emission,
        }
    }
}
