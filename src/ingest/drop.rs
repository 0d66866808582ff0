use std::path::PathBuf;

/// Parse the text a terminal pastes when files are dropped onto it.
///
/// Terminals disagree on the format: some emit one path per line, some
/// separate paths with spaces and backslash-escape spaces inside them, some
/// single-quote each path, and some emit `file://` URIs. All of these are
/// accepted; order is preserved.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    split_words(text)
        .into_iter()
        .filter_map(|word| {
            if word.starts_with("file://") {
                reqwest::Url::parse(&word)
                    .ok()
                    .and_then(|url| url.to_file_path().ok())
            } else {
                Some(PathBuf::from(word))
            }
        })
        .collect()
}

fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word && !current.is_empty() {
        words.push(current);
    }
    words
}
