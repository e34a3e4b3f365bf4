// WHY: Entry boundaries are the only structure this tool understands; no TOML parsing happens here

use std::ops::Range;
use tracing::debug;

use crate::commenter::BRACKET;

/// Locate the byte spans of every entry in `document`.
///
/// An entry starts at a `[[` delimiter (inclusive) and runs up to the next
/// delimiter. Bytes before the first delimiter form the preamble and belong to
/// the first entry. The returned spans partition the document exactly:
/// concatenating `&document[span]` for every span reproduces the input.
///
/// An empty document yields no spans. Every delimiter closes the span before
/// it, so a document that starts with `[[` begins with a zero-length preamble.
pub fn split_spans(document: &[u8]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    if document.is_empty() {
        return spans;
    }

    let mut offset = 0;
    for i in 0..document.len() - 1 {
        if document[i] == BRACKET && document[i + 1] == BRACKET {
            spans.push(offset..i);
            offset = i;
        }
    }

    // The tail is always an entry, with or without a trailing delimiter.
    spans.push(offset..document.len());

    debug!("Split {} bytes into {} entries", document.len(), spans.len());
    spans
}

/// Borrowed entry slices in original order
pub fn split_entries(document: &[u8]) -> Vec<&[u8]> {
    split_spans(document)
        .into_iter()
        .map(|span| &document[span])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(entries: &[&[u8]]) -> Vec<u8> {
        entries.concat()
    }

    #[test]
    fn test_empty_document_has_no_entries() {
        assert!(split_entries(b"").is_empty());
        assert!(split_spans(b"").is_empty());
    }

    #[test]
    fn test_short_document_is_single_entry() {
        assert_eq!(split_entries(b"["), vec![b"[".as_slice()]);
        assert_eq!(split_entries(b"x"), vec![b"x".as_slice()]);
    }

    #[test]
    fn test_no_delimiter_is_single_entry() {
        let doc = b"title = \"x\"\n[table]\nkey = 1\n";
        let entries = split_entries(doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], doc.as_slice());
    }

    #[test]
    fn test_preamble_joins_first_split() {
        let doc = b"# header\n[[a]]\nx=1\n[[b]]\ny=2\n";
        let entries = split_entries(doc);
        assert_eq!(
            entries,
            vec![
                b"# header\n".as_slice(),
                b"[[a]]\nx=1\n".as_slice(),
                b"[[b]]\ny=2\n".as_slice(),
            ]
        );
    }

    #[test]
    fn test_leading_delimiter_has_empty_preamble() {
        let doc = b"[[x]]\nfoo=1\n[[y]]\nbar=2\n";
        let entries = split_entries(doc);
        assert_eq!(
            entries,
            vec![
                b"".as_slice(),
                b"[[x]]\nfoo=1\n".as_slice(),
                b"[[y]]\nbar=2\n".as_slice(),
            ]
        );
        assert_eq!(split_spans(doc)[0], 0..0);
    }

    #[test]
    fn test_tail_entry_is_kept() {
        // The last `[[` is followed by very little; it must still be emitted
        let doc = b"[[a]]\n[[b";
        let entries = split_entries(doc);
        assert_eq!(
            entries,
            vec![b"".as_slice(), b"[[a]]\n".as_slice(), b"[[b".as_slice()]
        );
    }

    #[test]
    fn test_delimiter_in_last_two_bytes() {
        let doc = b"abc[[";
        let entries = split_entries(doc);
        assert_eq!(entries, vec![b"abc".as_slice(), b"[[".as_slice()]);
    }

    #[test]
    fn test_adjacent_delimiters_do_not_crash() {
        let doc = b"[[[[x]]]]\n";
        let entries = split_entries(doc);
        assert_eq!(
            entries,
            vec![
                b"".as_slice(),
                b"[".as_slice(),
                b"[".as_slice(),
                b"[[x]]]]\n".as_slice(),
            ]
        );
        assert_eq!(joined(&entries), doc.to_vec());
    }

    #[test]
    fn test_bare_delimiter() {
        assert_eq!(split_entries(b"[["), vec![b"".as_slice(), b"[[".as_slice()]);
        assert_eq!(
            split_entries(b"[[["),
            vec![b"".as_slice(), b"[".as_slice(), b"[[".as_slice()]
        );
    }

    #[test]
    fn test_partition_invariant() {
        let docs: [&[u8]; 7] = [
            b"a",
            b"[[",
            b"[[[",
            b"\n\n[[a]]\n\n[[b]]",
            b"pre\n[[a]]\n#c\n[[b]]\n[[c]]\n",
            b"[x]\n[[y]]\n[z]\n",
            &[0xFF, b'[', b'[', 0x00, b'[', 0xFE],
        ];
        for doc in docs {
            let entries = split_entries(doc);
            assert!(!entries.is_empty());
            assert_eq!(joined(&entries), doc.to_vec(), "partition broken for {doc:?}");
        }
    }

    #[test]
    fn test_spans_are_contiguous() {
        let doc = b"p\n[[a]]\n[[b]]\n[[c]]\n";
        let spans = split_spans(doc);
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(doc.len()));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}
