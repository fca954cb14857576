use hashbrown::HashMap;

use crate::errors::{HmmTagError, Result};

/// Symbol of the synthetic tag preceding the first token of every sentence.
pub const START_SYMBOL: &str = "<<START>>";

/// The 17 Universal Dependencies part-of-speech tags. `X` is kept last so that the legacy
/// fallback slot is the "other" tag.
pub const UNIVERSAL_TAGS: [&str; 17] = [
    "ADJ", "ADP", "ADV", "AUX", "CCONJ", "DET", "INTJ", "NOUN", "NUM", "PART", "PRON", "PROPN",
    "PUNCT", "SCONJ", "SYM", "VERB", "X",
];

/// Result of looking up a tag symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagLookup {
    /// The tag exists at the given index.
    Known(usize),

    /// The tag is not part of the tag set.
    Unmapped,
}

impl TagLookup {
    /// Returns the index if the tag is known.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Known(idx) => Some(idx),
            Self::Unmapped => None,
        }
    }
}

/// Closed, ordered inventory of tags.
///
/// Index 0 always holds [`START_SYMBOL`]; the configured tags follow in their given order.
#[derive(Clone, Debug)]
pub struct TagSet {
    symbols: Vec<String>,
    ids: HashMap<String, usize>,
}

impl TagSet {
    /// Index of the start symbol.
    pub const START_INDEX: usize = 0;

    /// Creates a new tag set.
    ///
    /// # Arguments
    ///
    /// * `tags` - Tag symbols without the start symbol.
    ///
    /// # Errors
    ///
    /// This function will return an error variant when:
    ///
    /// * `tags` is empty.
    /// * `tags` contains an empty string or the start symbol.
    /// * `tags` contains duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmtag::TagSet;
    ///
    /// let tag_set = TagSet::new(["DET", "NOUN"]).unwrap();
    /// assert_eq!(3, tag_set.len());
    /// assert_eq!("NOUN", tag_set.symbol_of(2));
    ///
    /// assert!(TagSet::new(["DET", "DET"]).is_err());
    /// ```
    pub fn new<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut symbols = vec![START_SYMBOL.to_string()];
        let mut ids = HashMap::new();
        ids.insert(START_SYMBOL.to_string(), Self::START_INDEX);
        for tag in tags {
            let tag = tag.into();
            if tag.is_empty() {
                return Err(HmmTagError::invalid_argument("tags", "contains an empty tag"));
            }
            if tag == START_SYMBOL {
                return Err(HmmTagError::invalid_argument(
                    "tags",
                    format!("`{START_SYMBOL}` is reserved"),
                ));
            }
            if ids.contains_key(&tag) {
                return Err(HmmTagError::invalid_argument(
                    "tags",
                    format!("`{tag}` is duplicated"),
                ));
            }
            ids.insert(tag.clone(), symbols.len());
            symbols.push(tag);
        }
        if symbols.len() == 1 {
            return Err(HmmTagError::invalid_argument("tags", "is empty"));
        }
        Ok(Self { symbols, ids })
    }

    /// Creates a tag set of [`UNIVERSAL_TAGS`].
    pub fn universal() -> Self {
        let mut symbols = vec![START_SYMBOL.to_string()];
        symbols.extend(UNIVERSAL_TAGS.iter().map(|t| t.to_string()));
        let ids = symbols
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { symbols, ids }
    }

    /// Looks up a tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use hmmtag::{TagLookup, TagSet};
    ///
    /// let tag_set = TagSet::new(["DET", "NOUN"]).unwrap();
    /// assert_eq!(TagLookup::Known(1), tag_set.lookup("DET"));
    /// assert_eq!(TagLookup::Unmapped, tag_set.lookup("VERB"));
    /// ```
    pub fn lookup(&self, tag: &str) -> TagLookup {
        self.ids
            .get(tag)
            .map_or(TagLookup::Unmapped, |&idx| TagLookup::Known(idx))
    }

    /// Gets the index of a tag, folding unknown tags into the last index.
    pub fn index_of(&self, tag: &str) -> usize {
        self.lookup(tag).index().unwrap_or(self.symbols.len() - 1)
    }

    /// Gets the symbol at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn symbol_of(&self, index: usize) -> &str {
        &self.symbols[index]
    }

    /// Number of symbols including the start symbol.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Configured tags without the start symbol.
    pub fn tags(&self) -> &[String] {
        &self.symbols[1..]
    }

    /// Iterates over all symbols including the start symbol.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for TagSet {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let tag_set = TagSet::new(["DET", "NOUN", "VERB"]).unwrap();

        assert_eq!(4, tag_set.len());
        assert_eq!(
            vec![START_SYMBOL, "DET", "NOUN", "VERB"],
            tag_set.iter().collect::<Vec<_>>()
        );
        assert_eq!(&["DET", "NOUN", "VERB"], tag_set.tags());
    }

    #[test]
    fn test_new_empty() {
        let tag_set = TagSet::new(Vec::<String>::new());

        assert_eq!(
            "InvalidArgumentError: tags: is empty",
            &tag_set.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_new_reserved() {
        let tag_set = TagSet::new(["DET", START_SYMBOL]);

        assert_eq!(
            "InvalidArgumentError: tags: `<<START>>` is reserved",
            &tag_set.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_new_empty_tag() {
        assert!(TagSet::new(["DET", ""]).is_err());
    }

    #[test]
    fn test_new_duplicated() {
        let tag_set = TagSet::new(["DET", "NOUN", "DET"]);

        assert_eq!(
            "InvalidArgumentError: tags: `DET` is duplicated",
            &tag_set.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_lookup() {
        let tag_set = TagSet::new(["DET", "NOUN"]).unwrap();

        assert_eq!(TagLookup::Known(0), tag_set.lookup(START_SYMBOL));
        assert_eq!(TagLookup::Known(2), tag_set.lookup("NOUN"));
        assert_eq!(TagLookup::Unmapped, tag_set.lookup("noun"));
        assert_eq!(None, tag_set.lookup("ADJ").index());
    }

    #[test]
    fn test_index_of_fallback() {
        let tag_set = TagSet::new(["DET", "NOUN", "X"]).unwrap();

        assert_eq!(1, tag_set.index_of("DET"));
        assert_eq!(3, tag_set.index_of("ADJ"));
        assert_eq!(3, tag_set.index_of(""));
    }

    #[test]
    fn test_universal() {
        let tag_set = TagSet::universal();

        assert_eq!(18, tag_set.len());
        assert_eq!(TagLookup::Known(6), tag_set.lookup("DET"));
        assert_eq!("X", tag_set.symbol_of(tag_set.len() - 1));
        assert_eq!(TagSet::new(UNIVERSAL_TAGS).unwrap(), tag_set);
    }
}
