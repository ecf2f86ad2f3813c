use crate::core::candidate::{Book, Username};
use crate::core::controller::AutocompleteController;
use serde::{Deserialize, Serialize};

/// Body of a share submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub book_id: u64,
    pub username: String,
    /// Reading status of the book at the time of sharing.
    pub status: String,
}

impl ShareRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("Please select a book and enter a username.")]
    Incomplete,
    #[error("The selected book has no library id and cannot be shared.")]
    MissingBookId,
}

/// Builds a share request from the two inputs of the share form. A book must
/// have been picked from the suggestions; the recipient is whatever is typed
/// into the username input, picked or not.
pub fn compose(
    books: &AutocompleteController<Book>,
    users: &AutocompleteController<Username>,
) -> Result<ShareRequest, ShareError> {
    let username = users.query().trim();
    let Some(book) = books.selection() else {
        return Err(ShareError::Incomplete);
    };
    if username.is_empty() {
        return Err(ShareError::Incomplete);
    }
    let Some(book_id) = book.id else {
        return Err(ShareError::MissingBookId);
    };

    Ok(ShareRequest {
        book_id,
        username: username.to_string(),
        status: book.status.clone(),
    })
}

/// Clears both inputs once a share went through.
pub fn finish(books: &mut AutocompleteController<Book>, users: &mut AutocompleteController<Username>) {
    books.reset();
    users.reset();
    tracing::debug!("share form cleared");
}
