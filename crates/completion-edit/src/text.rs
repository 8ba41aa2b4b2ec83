/// Split on `linefeed`, keeping trailing empty segments (N separators => N+1 lines).
pub(crate) fn split_lines<'a>(text: &'a str, linefeed: &str) -> Vec<&'a str> {
    if linefeed.is_empty() {
        return vec![text];
    }
    text.split(linefeed).collect()
}

/// Decode UTF-8, silently dropping invalid byte sequences.
pub(crate) fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Decode UTF-16 code units and measure the result in UTF-8 bytes, skipping unpaired surrogates.
pub(crate) fn utf16_units_to_utf8_len(units: &[u16]) -> usize {
    char::decode_utf16(units.iter().copied())
        .filter_map(Result::ok)
        .map(char::len_utf8)
        .sum()
}
