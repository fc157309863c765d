//! Fixed substitution dictionary shared by the encoder and decoder.
//!
//! Index in [`DICTIONARY`] is the code byte. Entries are unique, non-empty,
//! printable ASCII, and at most [`MAX_ENTRY_LEN`] bytes. Appending entries is
//! backwards compatible; reordering or removing them breaks every block
//! produced by an older build.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Longest dictionary entry in bytes.
pub const MAX_ENTRY_LEN: usize = 7;

/// Code table, indexed by code byte.
pub const DICTIONARY: &[&str] = &[
    " ", "e", "t", "a", "o", "i", "n", "s", "r", "h", "l", "d", "c", "u", "m", "f", "p", "g",
    "w", "y", "b", "v", "k", "x", "j", "q", "z", ".", ",", "!", "?", "'", "-", ":", "E", "T",
    "A", "O", "I", "N", "S", "R", "H", "L", "D", "C", "M", "W", "Y", "0", "1", "2", " the ",
    "the", " th", "th", "he", "in", "er", "an", "re", "on", "at", "en", "nd", "ti", "es", "or",
    "te", "of", "ed", "is", "it", "al", "ar", "st", "to", "nt", "ng", "se", "ha", "as", "ou",
    "io", "le", "ve", "co", "me", "de", "hi", "ri", "ro", "ic", "ne", "ea", "ra", "ce", "li",
    "ch", "ll", "be", "ma", "si", "om", "ur", "e ", "s ", "t ", "d ", "n ", "y ", "r ", ", ",
    ". ", " a ", " a", " to ", " of ", " and ", " in ", " is ", " it ", " you", " for ", " on ",
    " are ", " was ", " with ", " be ", " that ", " this ", " have ", " not ", " but ", " we ",
    " at ", " he ", " i ", "ing ", "ing", "tion", "tion ", "ion", "ent", "and", "for", "you",
    "ver", "all", "ter", "ere", "her", "ate", "hat", "his", "ith", "ere ", "our", "out", "ome",
    "one", "ght", "ight", "ould", "ly ", "ed ", "er ", "es ", "ay", "ow", "ee", "oo", "ss",
    "ck", "wh", "ok", "ye", "hello", "hey", "hi ", "yes", "no ", "okay", "ok ", "thanks",
    "please", "what ", "where", "when ", "how ", "why ", "who ", "can", "will", "just", "now",
    "time", "come", "here", "there", "light", "send", "signal", "message",
];

/// Reverse lookup from fragment to code byte.
pub(crate) fn reverse_index() -> &'static HashMap<&'static str, u8> {
    static INDEX: OnceLock<HashMap<&'static str, u8>> = OnceLock::new();
    INDEX.get_or_init(|| {
        DICTIONARY
            .iter()
            .enumerate()
            .filter_map(|(code, entry)| u8::try_from(code).ok().map(|code| (*entry, code)))
            .collect()
    })
}
