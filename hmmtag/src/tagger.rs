#[cfg(feature = "multithreading")]
use rayon::prelude::*;

use crate::model::Model;
use crate::tag_set::TagSet;

// The start symbol is never a candidate state.
const FIRST_TAG: usize = TagSet::START_INDEX + 1;

const NO_PREDECESSOR: usize = usize::MAX;

/// Best tag sequence found by the Viterbi algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    tag_ids: Vec<usize>,
    log_prob: f64,
}

impl Path {
    /// Tag indices, one per input position.
    pub fn tag_ids(&self) -> &[usize] {
        &self.tag_ids
    }

    /// Joint log-probability of the path and the observed words. 0 for an empty input.
    pub const fn log_prob(&self) -> f64 {
        self.log_prob
    }
}

/// Returns the first index of the maximum value in `xs[from..]`.
#[inline(always)]
fn argmax(xs: &[f64], from: usize) -> (usize, f64) {
    let mut best_idx = from;
    let mut best = xs[from];
    for (i, &x) in xs.iter().enumerate().skip(from + 1) {
        if x > best {
            best = x;
            best_idx = i;
        }
    }
    (best_idx, best)
}

/// Tagger.
///
/// The tagger only reads the model, so it can be shared between threads.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::{prelude::*, stdin, BufReader};
///
/// use hmmtag::{Model, Tagger};
///
/// let mut f = BufReader::new(File::open("model.bin").unwrap());
/// let model = Model::read(&mut f).unwrap();
/// let tagger = Tagger::new(model);
///
/// for line in stdin().lock().lines() {
///     let line = line.unwrap();
///     let words: Vec<&str> = line.split_whitespace().collect();
///     let tags = tagger.tag(&words);
///     println!("{:?}", tags);
/// }
/// ```
pub struct Tagger {
    model: Model,
}

impl Tagger {
    /// Creates a new tagger.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new tagger.
    pub const fn new(model: Model) -> Self {
        Self { model }
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Maps words to vocabulary indices. Unknown words map to the OOV index.
    pub fn word_ids<S>(&self, words: &[S]) -> Vec<usize>
    where
        S: AsRef<str>,
    {
        let vocab = &self.model.vocabulary;
        words.iter().map(|w| vocab.index_of(w.as_ref())).collect()
    }

    /// Runs the Viterbi algorithm on vocabulary indices.
    ///
    /// Ties are resolved to the lowest tag index, both when choosing a predecessor and when
    /// choosing the final tag.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of the vocabulary.
    pub fn viterbi(&self, word_ids: &[usize]) -> Path {
        if word_ids.is_empty() {
            return Path {
                tag_ids: vec![],
                log_prob: 0.,
            };
        }
        let transition = &self.model.transition;
        let emission = &self.model.emission;
        let n_tags = self.model.tag_set.len();
        let len = word_ids.len();

        // Column of the start symbol stays at -inf.
        let mut costs = vec![f64::NEG_INFINITY; len * n_tags];
        let mut backtrace = vec![NO_PREDECESSOR; len * n_tags];

        let start_costs = transition.row(TagSet::START_INDEX);
        for t in FIRST_TAG..n_tags {
            costs[t] = start_costs[t] + emission.get(t, word_ids[0]);
        }

        for (i, &word_id) in word_ids.iter().enumerate().skip(1) {
            let (prev_costs, cur_costs) = costs.split_at_mut(i * n_tags);
            let prev_costs = &prev_costs[(i - 1) * n_tags..];
            let cur_costs = &mut cur_costs[..n_tags];
            let bt = &mut backtrace[i * n_tags..(i + 1) * n_tags];
            for t in FIRST_TAG..n_tags {
                let mut best_prev = FIRST_TAG;
                let mut best = prev_costs[FIRST_TAG] + transition.get(FIRST_TAG, t);
                for s in FIRST_TAG + 1..n_tags {
                    let cost = prev_costs[s] + transition.get(s, t);
                    if cost > best {
                        best = cost;
                        best_prev = s;
                    }
                }
                cur_costs[t] = best + emission.get(t, word_id);
                bt[t] = best_prev;
            }
        }

        let (mut tag_id, log_prob) = argmax(&costs[(len - 1) * n_tags..], FIRST_TAG);
        let mut tag_ids = vec![0; len];
        for i in (0..len).rev() {
            tag_ids[i] = tag_id;
            tag_id = backtrace[i * n_tags + tag_id];
        }
        debug_assert_eq!(NO_PREDECESSOR, tag_id);

        Path { tag_ids, log_prob }
    }

    /// Predicts tags of words.
    ///
    /// # Arguments
    ///
    /// * `words` - Tokenized words.
    ///
    /// # Returns
    ///
    /// Tag symbols with the same length as `words`.
    pub fn tag<S>(&self, words: &[S]) -> Vec<&str>
    where
        S: AsRef<str>,
    {
        self.tag_with_score(words).0
    }

    /// Predicts tags of words and also returns the log-probability of the best path.
    pub fn tag_with_score<S>(&self, words: &[S]) -> (Vec<&str>, f64)
    where
        S: AsRef<str>,
    {
        let path = self.viterbi(&self.word_ids(words));
        let tags = path
            .tag_ids
            .iter()
            .map(|&t| self.model.tag_set.symbol_of(t))
            .collect();
        (tags, path.log_prob)
    }

    /// Predicts tags of multiple sentences in parallel.
    #[cfg(feature = "multithreading")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multithreading")))]
    pub fn tag_batch<S, W>(&self, sentences: &[S]) -> Vec<Vec<&str>>
    where
        S: AsRef<[W]> + Sync,
        W: AsRef<str>,
    {
        sentences.par_iter().map(|s| self.tag(s.as_ref())).collect()
    }
}
