use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A named, searchable text field of a candidate.
pub struct Field<C> {
    name: &'static str,
    get: fn(&C) -> &str,
}

impl<C> Field<C> {
    pub const fn new(name: &'static str, get: fn(&C) -> &str) -> Self {
        Self { name, get }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value<'a>(&self, candidate: &'a C) -> &'a str {
        (self.get)(candidate)
    }
}

// Manual impls: deriving would demand `C: Clone`.
impl<C> Clone for Field<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Field<C> {}

impl<C> fmt::Debug for Field<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

impl<C> PartialEq for Field<C> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<C> Eq for Field<C> {}

/// An item the autocomplete can suggest.
pub trait Candidate: Clone + fmt::Debug {
    /// Identity of the candidate; two candidates with equal keys are the same item.
    type Key: PartialEq + fmt::Debug;

    /// Human readable kind, used in logs and configuration errors.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    /// Text written back into the query input once this candidate is picked.
    fn display_text(&self) -> &str;

    /// Secondary line shown next to a suggestion, if any.
    fn detail(&self) -> Option<String> {
        None
    }

    /// Every searchable field this candidate type exposes.
    fn fields() -> Vec<Field<Self>>;

    fn default_fields() -> Vec<Field<Self>> {
        Self::fields()
    }

    fn field(name: &str) -> Option<Field<Self>> {
        Self::fields()
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    fn is_same(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// One entry of a book payload. `/my_library_books` carries the library
/// `id`; `/get_user_books` does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub google_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub status: String,
}

impl Book {
    /// `currently_reading` -> `Currently Reading`.
    pub fn status_label(&self) -> String {
        self.status
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Identity of a book: the library id when present, else the Google Books
/// id, else the title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookKey {
    Id(u64),
    Google(String),
    Title(String),
}

impl Candidate for Book {
    type Key = BookKey;

    const KIND: &'static str = "book";

    fn key(&self) -> BookKey {
        match self.id {
            Some(id) => BookKey::Id(id),
            None if !self.google_id.is_empty() => BookKey::Google(self.google_id.clone()),
            None => BookKey::Title(self.title.clone()),
        }
    }

    fn display_text(&self) -> &str {
        self.title.as_str()
    }

    fn detail(&self) -> Option<String> {
        Some(format!("{} | {}", self.author, self.status_label()))
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::<Self>::new("title", |book| book.title.as_str()),
            Field::<Self>::new("author", |book| book.author.as_str()),
            Field::<Self>::new("genre", |book| book.genre.as_deref().unwrap_or_default()),
        ]
    }

    fn default_fields() -> Vec<Field<Self>> {
        vec![
            Field::<Self>::new("title", |book| book.title.as_str()),
            Field::<Self>::new("author", |book| book.author.as_str()),
        ]
    }
}

/// One entry of the `/all_usernames` payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Candidate for Username {
    type Key = String;

    const KIND: &'static str = "username";

    fn key(&self) -> String {
        self.0.clone()
    }

    fn display_text(&self) -> &str {
        self.as_str()
    }

    fn fields() -> Vec<Field<Self>> {
        vec![Field::<Self>::new("username", |user| user.as_str())]
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookKey, Candidate, Username};

    fn book(status: &str) -> Book {
        Book {
            id: Some(7),
            google_id: String::new(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: None,
            cover_url: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn status_label_title_cases_words() {
        assert_eq!(book("currently_reading").status_label(), "Currently Reading");
        assert_eq!(book("completed").status_label(), "Completed");
        assert_eq!(book("wishlist").status_label(), "Wishlist");
    }

    #[test]
    fn book_payload_tolerates_missing_optional_fields() {
        let raw = r#"{"id": 3, "title": "Dune", "author": "Frank Herbert", "status": "completed"}"#;
        let parsed: Book = serde_json::from_str(raw).expect("book should parse");
        assert_eq!(parsed.id, Some(3));
        assert_eq!(parsed.cover_url, None);
        assert!(parsed.google_id.is_empty());
    }

    #[test]
    fn user_books_payload_without_library_id_parses() {
        let raw = r#"{"google_id": "B1N2", "title": "Dune", "author": "Frank Herbert",
                      "genre": null, "cover_url": "https://covers.example/dune.jpg",
                      "status": "currently_reading", "date_added": "2024-01-01",
                      "date_completed": null}"#;
        let parsed: Book = serde_json::from_str(raw).expect("book should parse");
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.genre, None);
        assert_eq!(parsed.key(), BookKey::Google("B1N2".to_string()));
    }

    #[test]
    fn key_falls_back_from_id_to_google_id_to_title() {
        let mut dune = book("completed");
        assert_eq!(dune.key(), BookKey::Id(7));
        dune.id = None;
        assert_eq!(dune.key(), BookKey::Title("Dune".to_string()));
        dune.google_id = "B1N2".to_string();
        assert_eq!(dune.key(), BookKey::Google("B1N2".to_string()));
    }

    #[test]
    fn usernames_parse_from_plain_strings() {
        let parsed: Vec<Username> =
            serde_json::from_str(r#"["alice", "bob"]"#).expect("usernames should parse");
        assert_eq!(parsed, vec![Username::from("alice"), Username::from("bob")]);
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        let field = Book::field("Author").expect("author field");
        assert_eq!(field.value(&book("completed")), "Frank Herbert");
        assert!(Book::field("isbn").is_none());
        assert_eq!(
            Book::default_fields()
                .iter()
                .map(|field| field.name())
                .collect::<Vec<_>>(),
            vec!["title", "author"]
        );
    }

    #[test]
    fn identity_follows_key() {
        let mut renamed = book("completed");
        renamed.title = "Dune Messiah".to_string();
        assert!(book("completed").is_same(&renamed));
        assert!(Username::from("alice").is_same(&Username::from("alice")));
        assert!(!Username::from("alice").is_same(&Username::from("Alice")));
    }
}
