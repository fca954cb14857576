//! Reader of CoNLL-U treebanks.
//!
//! Only the FORM (2nd) and UPOS (4th) columns are used. Comment lines, multiword token ranges
//! (`1-2`) and empty nodes (`1.1`) are ignored, and a blank line ends a sentence.

use std::io::{self, BufRead};

use crate::TaggedSentence;

/// Parses a token line. Returns `None` for lines that carry no word-tag pair.
fn parse_token_line(line: &str) -> Option<(&str, &str)> {
    let mut cols = line.split('\t');
    let id = cols.next()?;
    if id.contains('-') || id.contains('.') {
        return None;
    }
    let form = cols.next()?;
    let _lemma = cols.next()?;
    let upos = cols.next()?;
    if form.is_empty() || upos.is_empty() {
        return None;
    }
    Some((form, upos))
}

/// Reads sentences from CoNLL-U text.
///
/// # Errors
///
/// I/O errors of `rdr` are returned as is.
pub fn read<R>(rdr: R) -> io::Result<Vec<TaggedSentence>>
where
    R: BufRead,
{
    let mut sents = vec![];
    let mut sent = TaggedSentence::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !sent.is_empty() {
                sents.push(std::mem::take(&mut sent));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        if let Some((form, upos)) = parse_token_line(line) {
            sent.push(form, upos);
        } else if !line.split('\t').next().map_or(false, |id| id.contains(['-', '.'])) {
            log::debug!("line {}: malformed token line skipped", i + 1);
        }
    }
    if !sent.is_empty() {
        sents.push(sent);
    }
    Ok(sents)
}

/// Parses sentences from a CoNLL-U string.
pub fn parse(text: &str) -> Vec<TaggedSentence> {
    // Reading from a byte slice never fails.
    read(text.as_bytes()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(s: &TaggedSentence) -> Vec<(&str, &str)> {
        s.iter().collect()
    }

    #[test]
    fn test_parse() {
        let text = "\
# sent_id = 1
# text = 顏淵問仁
1\t顏淵\t顏淵\tPROPN\tn,名詞,人,名\t_\t2\tnsubj\t_\t_
2\t問\t問\tVERB\tv,動詞,行為,伝達\t_\t0\troot\t_\t_
3\t仁\t仁\tNOUN\tn,名詞,不可譲,属性\t_\t2\tobj\t_\tSpaceAfter=No

# sent_id = 2
1\t子\t子\tNOUN\t_\t_\t2\tnsubj\t_\t_
2\t曰\t曰\tVERB\t_\t_\t0\troot\t_\t_
";
        let sents = parse(text);

        assert_eq!(2, sents.len());
        assert_eq!(
            vec![("顏淵", "PROPN"), ("問", "VERB"), ("仁", "NOUN")],
            pairs(&sents[0])
        );
        assert_eq!(vec![("子", "NOUN"), ("曰", "VERB")], pairs(&sents[1]));
    }

    #[test]
    fn test_parse_multiword_and_empty_nodes() {
        let text = "\
1-2\tdel\t_\t_\t_\t_\t_\t_\t_\t_
1\tde\tde\tADP\t_\t_\t3\tcase\t_\t_
2\tel\tel\tDET\t_\t_\t3\tdet\t_\t_
2.1\tvoy\tir\tVERB\t_\t_\t_\t_\t0:root\t_
3\tmar\tmar\tNOUN\t_\t_\t0\troot\t_\t_
";
        let sents = parse(text);

        assert_eq!(1, sents.len());
        assert_eq!(
            vec![("de", "ADP"), ("el", "DET"), ("mar", "NOUN")],
            pairs(&sents[0])
        );
    }

    #[test]
    fn test_parse_malformed_lines() {
        let text = "1\tthe\n2\tcat\tcat\tNOUN\ngarbage\n\n\n\n3\tsat\tsit\t\t_\n";
        let sents = parse(text);

        assert_eq!(1, sents.len());
        assert_eq!(vec![("cat", "NOUN")], pairs(&sents[0]));
    }

    #[test]
    fn test_parse_crlf_and_trailing_sentence() {
        let text = "1\tthe\tthe\tDET\r\n\r\n1\tdog\tdog\tNOUN";
        let sents = parse(text);

        assert_eq!(2, sents.len());
        assert_eq!(vec![("dog", "NOUN")], pairs(&sents[1]));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("# only a comment\n\n").is_empty());
    }
}
