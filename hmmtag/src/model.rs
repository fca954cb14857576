use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::errors::{HmmTagError, Result};
use crate::matrix::LogProbMatrix;
use crate::tag_set::TagSet;
use crate::vocabulary::Vocabulary;

/// Persistent layout of a model. Hash indices are not stored; they are rebuilt from the
/// ordered lists on load.
#[derive(Decode, Encode)]
struct ModelData {
    tags: Vec<String>,
    words: Vec<String>,
    alpha: f64,
    transition: LogProbMatrix,
    emission: LogProbMatrix,
}

/// Model data.
///
/// A model bundles the tag set, the vocabulary, the smoothing constant and the two
/// log-probability matrices. It is created by [`Trainer::train()`](crate::Trainer::train) and
/// never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub(crate) tag_set: TagSet,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) alpha: f64,

    // tags x tags, rows are the preceding tags.
    pub(crate) transition: LogProbMatrix,

    // tags x words
    pub(crate) emission: LogProbMatrix,
}

impl Model {
    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        let data = ModelData {
            tags: self.tag_set.tags().to_vec(),
            words: self.vocabulary.words().to_vec(),
            alpha: self.alpha,
            transition: self.transition.clone(),
            emission: self.emission.clone(),
        };
        bincode::encode_into_std_write(data, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When bincode generates an error or the decoded data is inconsistent, an error variant
    /// will be returned.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let data: ModelData = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        if !(data.alpha.is_finite() && data.alpha > 0.0) {
            return Err(HmmTagError::invalid_model("alpha must be positive"));
        }
        let tag_set = TagSet::new(data.tags).map_err(|e| {
            HmmTagError::invalid_model(format!("invalid tag set: {e}"))
        })?;
        let vocabulary = Vocabulary::from_words(data.words)?;
        data.transition
            .validate(tag_set.len(), tag_set.len(), "transition")?;
        data.emission
            .validate(tag_set.len(), vocabulary.len(), "emission")?;
        Ok(Self {
            tag_set,
            vocabulary,
            alpha: data.alpha,
            transition: data.transition,
            emission: data.emission,
        })
    }

    pub const fn tag_set(&self) -> &TagSet {
        &self.tag_set
    }

    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Smoothing constant used at training time.
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Transition log-probabilities. Rows are the preceding tags.
    pub const fn transition(&self) -> &LogProbMatrix {
        &self.transition
    }

    /// Emission log-probabilities. Rows are tags and columns are vocabulary indices.
    pub const fn emission(&self) -> &LogProbMatrix {
        &self.emission
    }

    /// Log-probabilities of each tag opening a sentence.
    pub fn start_log_probs(&self) -> &[f64] {
        self.transition.row(TagSet::START_INDEX)
    }
}
