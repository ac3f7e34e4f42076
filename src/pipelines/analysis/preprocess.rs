/// Clean raw review text before annotation.
///
/// Strips control characters, collapses whitespace runs to single spaces,
/// and trims. `Err` carries the human-readable skip reason when the cleaned
/// text falls outside the configured length bounds; it is recorded as a
/// per-review skip, never raised.
pub(crate) fn preprocess(
    raw: &str,
    min_chars: usize,
    max_chars: usize,
) -> std::result::Result<String, String> {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = !cleaned.is_empty();
        } else if ch.is_control() {
            continue;
        } else {
            if pending_space {
                cleaned.push(' ');
                pending_space = false;
            }
            cleaned.push(ch);
        }
    }

    let length = cleaned.chars().count();
    if length < min_chars {
        return Err(format!(
            "text is {length} characters after cleaning, minimum is {min_chars}"
        ));
    }
    if length > max_chars {
        return Err(format!(
            "text is {length} characters after cleaning, maximum is {max_chars}"
        ));
    }
    Ok(cleaned)
}
