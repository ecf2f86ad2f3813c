use crate::core::candidate::Candidate;
use crate::core::controller::RenderSurface;
use crate::core::search::ranker::{Suggestion, SuggestionList};
use std::io::Write;

/// Writes suggestion lists and selection changes as plain text lines.
pub struct ConsoleSurface<W> {
    label: &'static str,
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(label: &'static str, out: W) -> Self {
        Self { label, out }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(label = self.label, "failed to write to console: {e}");
        }
    }
}

impl<C: Candidate, W: Write> RenderSurface<C> for ConsoleSurface<W> {
    fn suggestions_changed(&mut self, list: &SuggestionList<C>) {
        let text = format_list(self.label, list);
        self.emit(&text);
    }

    fn selection_changed(&mut self, selection: Option<&C>) {
        let text = match selection {
            Some(candidate) => format!("[{}] selected: {}\n", self.label, describe(candidate)),
            None => format!("[{}] selection cleared\n", self.label),
        };
        self.emit(&text);
    }
}

pub fn format_list<C: Candidate>(label: &str, list: &SuggestionList<C>) -> String {
    if list.is_empty() {
        return format!("[{label}] no suggestions\n");
    }

    let mut out = format!("[{label}] suggestions for \"{}\":\n", list.query());
    for (position, entry) in list.iter().enumerate() {
        let marker = if list.active() == Some(position) { '>' } else { ' ' };
        out.push_str(&format!(
            "  {marker} {}. {}\n",
            position + 1,
            format_entry(entry)
        ));
    }
    out
}

fn format_entry<C: Candidate>(entry: &Suggestion<C>) -> String {
    let field_text = entry.field.value(&entry.candidate);
    let highlighted = highlight(field_text, &entry.ranges);
    if field_text == entry.candidate.display_text() {
        match entry.candidate.detail() {
            Some(detail) => format!("{highlighted} ({detail})"),
            None => highlighted,
        }
    } else {
        format!(
            "{} ({}: {highlighted})",
            entry.candidate.display_text(),
            entry.field.name()
        )
    }
}

fn describe<C: Candidate>(candidate: &C) -> String {
    match candidate.detail() {
        Some(detail) => format!("{} ({detail})", candidate.display_text()),
        None => candidate.display_text().to_string(),
    }
}

/// Wraps each half-open character range of `text` in brackets.
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut ranges = ranges.iter().peekable();
    let mut open_until = None;

    for (idx, ch) in text.chars().enumerate() {
        if open_until == Some(idx) {
            out.push(']');
            open_until = None;
        }
        if let Some(&&(start, end)) = ranges.peek() {
            if start == idx && end > start {
                out.push('[');
                open_until = Some(end);
                ranges.next();
            }
        }
        out.push(ch);
    }
    if open_until.is_some() {
        out.push(']');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{ConsoleSurface, format_list, highlight};
    use crate::core::candidate::{Book, Candidate, Username};
    use crate::core::controller::AutocompleteController;
    use crate::core::pool::CandidatePool;
    use crate::core::search::ranker::rank;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn dune() -> Book {
        Book {
            id: Some(1),
            google_id: String::new(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: None,
            cover_url: None,
            status: "currently_reading".to_string(),
        }
    }

    #[test]
    fn highlight_brackets_ranges() {
        assert_eq!(highlight("Foundation", &[(0, 2)]), "[Fo]undation");
        assert_eq!(highlight("Programming Pearls", &[(0, 1), (6, 7), (16, 18)]), "[P]rogra[m]ming Pear[ls]");
        assert_eq!(highlight("abc", &[]), "abc");
    }

    #[test]
    fn highlight_closes_consecutive_ranges() {
        assert_eq!(highlight("abcd", &[(0, 1), (1, 2)]), "[a][b]cd");
        assert_eq!(highlight("abcd", &[(2, 4)]), "ab[cd]");
    }

    #[test]
    fn list_marks_active_entry_and_matched_field() {
        let pool = CandidatePool::new(vec![dune()]);
        let list = rank(&pool, "herb", 8, &Book::default_fields());
        assert_eq!(
            format_list("book", &list),
            "[book] suggestions for \"herb\":\n  > 1. Dune (author: Frank [Herb]ert)\n"
        );
    }

    #[test]
    fn display_field_matches_show_detail() {
        let pool = CandidatePool::new(vec![dune()]);
        let list = rank(&pool, "dn", 8, &Book::default_fields());
        assert_eq!(
            format_list("book", &list),
            "[book] suggestions for \"dn\":\n  > 1. [D]u[n]e (Frank Herbert | Currently Reading)\n"
        );
    }

    #[test]
    fn surface_reports_selection_changes() {
        let buffer = SharedBuffer::default();
        let mut controller = AutocompleteController::<Username>::default();
        controller.pool_loaded(Ok(vec![Username::from("alice")]));
        controller.subscribe(ConsoleSurface::new("user", buffer.clone()));

        controller.set_query("ali");
        controller.select(0).expect("alice is suggested");
        controller.set_query("");

        assert_eq!(
            buffer.contents(),
            "[user] suggestions for \"ali\":\n  > 1. [ali]ce\n\
             [user] no suggestions\n\
             [user] selected: alice\n\
             [user] selection cleared\n\
             [user] no suggestions\n"
        );
    }
}
