//! Default value normalization

/// Turn raw default bytes into the string a generator should emit.
///
/// Bytes are decoded lossily. A value wrapped in single quotes loses one
/// pair of quotes and has its doubled quotes collapsed; anything else
/// (numbers, `CURRENT_TIMESTAMP`, expressions) is returned trimmed.
pub fn clean_default(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();

    match text
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => text.to_string(),
    }
}
