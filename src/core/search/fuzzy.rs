/// Returns true when `query` plausibly refers to `candidate`: either as a
/// case-insensitive substring, or as an ordered (not necessarily contiguous)
/// subsequence of its characters. An empty query matches everything.
///
/// A substring is also a subsequence, so one forward pass over `candidate`
/// decides both; nothing is allocated.
pub fn matches(candidate: &str, query: &str) -> bool {
    let mut pending = query.chars().map(fold_char).peekable();
    for ch in candidate.chars().map(fold_char) {
        match pending.peek() {
            Some(&wanted) if wanted == ch => {
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    pending.peek().is_none()
}

/// Same decision as [`matches`], but also reports which candidate character
/// positions satisfied the query. A substring hit reports the first
/// contiguous run; otherwise the earliest subsequence positions are returned.
pub fn match_indices(candidate: &str, query: &str) -> Option<Vec<usize>> {
    let query_chars = fold(query);
    let candidate_chars = fold(candidate);

    if query_chars.is_empty() {
        return Some(Vec::new());
    }
    if query_chars.len() > candidate_chars.len() {
        return None;
    }

    if let Some(start) = find_run(&candidate_chars, &query_chars) {
        return Some((start..start + query_chars.len()).collect());
    }

    let mut indices = Vec::with_capacity(query_chars.len());
    let mut qpos = 0;

    for (cpos, ch) in candidate_chars.iter().enumerate() {
        if qpos >= query_chars.len() {
            break;
        }
        if *ch == query_chars[qpos] {
            indices.push(cpos);
            qpos += 1;
        }
    }

    if qpos == query_chars.len() {
        Some(indices)
    } else {
        None
    }
}

/// Collapses sorted character positions into half-open `(start, end)` ranges.
pub fn indices_to_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let Some((&first, rest)) = indices.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut prev = first;

    for &idx in rest {
        if idx == prev + 1 {
            prev = idx;
            continue;
        }
        ranges.push((start, prev + 1));
        start = idx;
        prev = idx;
    }

    ranges.push((start, prev + 1));
    ranges
}

// One output char per input char so positions line up with the input text.
fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn find_run(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
