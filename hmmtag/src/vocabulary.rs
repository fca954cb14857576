use hashbrown::HashMap;

use crate::errors::{HmmTagError, Result};

/// Sentinel standing in for every word outside the vocabulary.
pub const OOV_SYMBOL: &str = "<<OOV>>";

/// Frozen, ordered list of lower-cased word types.
///
/// Index 0 always holds [`OOV_SYMBOL`].
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Index of the OOV sentinel.
    pub const OOV_INDEX: usize = 0;

    /// Builds a vocabulary from training tokens.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Raw words. They are lower-cased before counting.
    /// * `max_size` - If specified, only the `max_size` most frequent words are kept. Ties are
    ///                broken by first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmtag::Vocabulary;
    ///
    /// let vocab = Vocabulary::build(["The", "cat", "the", "dog"], Some(2));
    /// assert_eq!(3, vocab.len());
    /// assert_eq!(1, vocab.index_of("THE"));
    /// assert_eq!(2, vocab.index_of("cat"));
    /// assert_eq!(Vocabulary::OOV_INDEX, vocab.index_of("dog"));
    /// ```
    pub fn build<I, S>(tokens: I, max_size: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: Vec<(String, usize)> = vec![];
        let mut positions: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            let word = token.as_ref().to_lowercase();
            if let Some(&pos) = positions.get(&word) {
                counts[pos].1 += 1;
            } else {
                positions.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
        if let Some(max_size) = max_size {
            // Stable sort keeps first-seen order among equal counts.
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            counts.truncate(max_size);
        }
        let mut words = Vec::with_capacity(counts.len() + 1);
        words.push(OOV_SYMBOL.to_string());
        words.extend(counts.into_iter().map(|(word, _)| word));
        Self::from_words_unchecked(words)
    }

    fn from_words_unchecked(words: Vec<String>) -> Self {
        let ids = words
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, ids }
    }

    /// Restores a vocabulary from its ordered word list, including the sentinel.
    pub(crate) fn from_words(words: Vec<String>) -> Result<Self> {
        if words.first().map(String::as_str) != Some(OOV_SYMBOL) {
            return Err(HmmTagError::invalid_model(
                "vocabulary does not start with the OOV symbol",
            ));
        }
        let vocab = Self::from_words_unchecked(words);
        if vocab.ids.len() + 1 != vocab.words.len() {
            return Err(HmmTagError::invalid_model(
                "vocabulary contains duplicated words",
            ));
        }
        Ok(vocab)
    }

    /// Gets the index of a word after lower-casing it. Unknown words map to
    /// [`Vocabulary::OOV_INDEX`].
    pub fn index_of(&self, word: &str) -> usize {
        if let Some(&idx) = self.ids.get(word) {
            return idx;
        }
        self.ids
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(Self::OOV_INDEX)
    }

    /// Returns `true` if the lower-cased word is part of the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index_of(word) != Self::OOV_INDEX
    }

    /// Gets the word at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn word_of(&self, index: usize) -> &str {
        &self.words[index]
    }

    /// Number of entries including the OOV sentinel.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Iterates over all entries including the OOV sentinel.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub(crate) fn words(&self) -> &[String] {
        &self.words
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for Vocabulary {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_empty() {
        let vocab = Vocabulary::build(Vec::<&str>::new(), None);

        assert_eq!(1, vocab.len());
        assert_eq!(OOV_SYMBOL, vocab.word_of(Vocabulary::OOV_INDEX));
    }

    #[test]
    fn test_build_unbounded() {
        let vocab = Vocabulary::build(["The", "cat", "THE", "Dog", "cat"], None);

        assert_eq!(
            vec![OOV_SYMBOL, "the", "cat", "dog"],
            vocab.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_build_capped() {
        let vocab = Vocabulary::build(["a", "b", "c", "b", "c", "d", "c"], Some(2));

        assert_eq!(vec![OOV_SYMBOL, "c", "b"], vocab.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_build_capped_ties() {
        let vocab = Vocabulary::build(["x", "y", "z", "z", "y", "x", "w"], Some(2));

        assert_eq!(vec![OOV_SYMBOL, "x", "y"], vocab.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_build_zero() {
        let vocab = Vocabulary::build(["a", "b"], Some(0));

        assert_eq!(1, vocab.len());
    }

    #[test]
    fn test_build_larger_cap() {
        let vocab = Vocabulary::build(["a", "b"], Some(10));

        assert_eq!(3, vocab.len());
    }

    #[test]
    fn test_index_of() {
        let vocab = Vocabulary::build(["Rust", "is", "fun"], None);

        assert_eq!(1, vocab.index_of("rust"));
        assert_eq!(1, vocab.index_of("RUST"));
        assert_eq!(3, vocab.index_of("Fun"));
        assert_eq!(Vocabulary::OOV_INDEX, vocab.index_of("boring"));
        assert!(vocab.contains("IS"));
        assert!(!vocab.contains("was"));
    }

    #[test]
    fn test_sentinel_is_not_a_word() {
        let vocab = Vocabulary::build(["<<OOV>>", "a"], None);

        assert_eq!(1, vocab.index_of(OOV_SYMBOL));
        assert_eq!("<<oov>>", vocab.word_of(1));
        assert_eq!(Vocabulary::OOV_INDEX, vocab.index_of("<<START>>"));
    }

    #[test]
    fn test_from_words() {
        let vocab = Vocabulary::build(["a", "b"], None);
        let restored = Vocabulary::from_words(vocab.words().to_vec()).unwrap();

        assert_eq!(vocab, restored);
        assert_eq!(2, restored.index_of("B"));
    }

    #[test]
    fn test_from_words_invalid() {
        assert!(Vocabulary::from_words(vec![]).is_err());
        assert!(Vocabulary::from_words(vec!["a".to_string()]).is_err());
        assert!(Vocabulary::from_words(vec![
            OOV_SYMBOL.to_string(),
            "a".to_string(),
            "a".to_string(),
        ])
        .is_err());
    }
}
