// WHY: Byte-level commenting keeps arbitrary (even non-UTF-8) input byte-identical outside inserted markers

use std::borrow::Cow;

/// Marks a line as disabled (`#`)
pub const COMMENT_MARKER: u8 = b'#';
/// Line terminator (`\n`)
pub const NEWLINE: u8 = b'\n';
/// Half of the `[[` entry delimiter
pub const BRACKET: u8 = b'[';

/// Case-sensitive substring test over raw bytes. An empty needle matches everything.
pub fn contains(entry: &[u8], needle: &[u8]) -> bool {
    memchr::memmem::find(entry, needle).is_some()
}

/// Comment out every line of `entry`.
///
/// A marker is always written first, even when the entry already begins with
/// one. After each newline that is not the final byte, a marker is inserted
/// unless the next line is blank or already commented.
pub fn comment(entry: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(entry.len() + entry.len() / 8 + 1);
    out.push(COMMENT_MARKER);

    for (i, &byte) in entry.iter().enumerate() {
        out.push(byte);
        if byte != NEWLINE {
            continue;
        }
        match entry.get(i + 1) {
            None | Some(&COMMENT_MARKER) | Some(&NEWLINE) => {}
            Some(_) => out.push(COMMENT_MARKER),
        }
    }

    out
}

/// Comment `entry` out when it contains `needle`; otherwise hand it back untouched
pub fn comment_if_contains<'a>(entry: &'a [u8], needle: &[u8]) -> Cow<'a, [u8]> {
    if contains(entry, needle) {
        Cow::Owned(comment(entry))
    } else {
        Cow::Borrowed(entry)
    }
}
