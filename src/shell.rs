use crate::core::candidate::{Book, Username};
use crate::core::controller::AutocompleteController;
use crate::share;

pub const HELP: &str = "\
commands:
  book <text>          type into the book input
  user <text>          type into the username input
  focus <book|user>    focus an input (searches again)
  dismiss <book|user>  click outside an input
  next|prev <book|user>  move the highlighted suggestion
  accept <book|user>   pick the highlighted suggestion
  pick <book|user> <n> pick suggestion n (1-based)
  share                submit the share form
  help                 show this text
  quit                 leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Book,
    User,
}

impl Target {
    fn parse(raw: Option<&str>) -> Result<Self, CommandError> {
        match raw {
            Some("book") => Ok(Self::Book),
            Some("user") => Ok(Self::User),
            Some(other) => Err(CommandError::UnknownTarget(other.to_string())),
            None => Err(CommandError::MissingTarget),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(Target, String),
    Focus(Target),
    Dismiss(Target),
    Move(Target, isize),
    Accept(Target),
    Pick(Target, usize),
    Share,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("expected `book` or `user`")]
    MissingTarget,
    #[error("unknown input `{0}`, expected `book` or `user`")]
    UnknownTarget(String),
    #[error("expected a suggestion number, got `{0}`")]
    BadIndex(String),
}

impl Command {
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let mut args = rest.split_whitespace();

        let command = match word {
            // Everything after the first space is the typed text, untrimmed.
            "book" => Self::Type(Target::Book, rest.to_string()),
            "user" => Self::Type(Target::User, rest.to_string()),
            "focus" => Self::Focus(Target::parse(args.next())?),
            "dismiss" => Self::Dismiss(Target::parse(args.next())?),
            "next" => Self::Move(Target::parse(args.next())?, 1),
            "prev" => Self::Move(Target::parse(args.next())?, -1),
            "accept" => Self::Accept(Target::parse(args.next())?),
            "pick" => {
                let target = Target::parse(args.next())?;
                let raw = args.next().unwrap_or_default();
                let position = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| CommandError::BadIndex(raw.to_string()))?;
                Self::Pick(target, position - 1)
            }
            "share" => Self::Share,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Message(String),
    Quit,
}

/// The two autocomplete inputs of the share form and the commands driving them.
pub struct Session {
    pub books: AutocompleteController<Book>,
    pub users: AutocompleteController<Username>,
}

impl Session {
    pub fn new(
        books: AutocompleteController<Book>,
        users: AutocompleteController<Username>,
    ) -> Self {
        Self { books, users }
    }

    pub fn apply(&mut self, command: Command) -> Reply {
        match command {
            Command::Type(Target::Book, text) => self.books.set_query(&text),
            Command::Type(Target::User, text) => self.users.set_query(&text),
            Command::Focus(Target::Book) => self.books.focus(),
            Command::Focus(Target::User) => self.users.focus(),
            Command::Dismiss(Target::Book) => self.books.dismiss(),
            Command::Dismiss(Target::User) => self.users.dismiss(),
            Command::Move(Target::Book, delta) => {
                self.books.move_active(delta);
            }
            Command::Move(Target::User, delta) => {
                self.users.move_active(delta);
            }
            // Rejected picks are dropped without a message.
            Command::Accept(Target::Book) => {
                self.books.accept_active().ok();
            }
            Command::Accept(Target::User) => {
                self.users.accept_active().ok();
            }
            Command::Pick(Target::Book, index) => {
                self.books.select(index).ok();
            }
            Command::Pick(Target::User, index) => {
                self.users.select(index).ok();
            }
            Command::Share => return self.share(),
            Command::Help => return Reply::Message(HELP.to_string()),
            Command::Quit => return Reply::Quit,
        }
        Reply::Nothing
    }

    fn share(&mut self) -> Reply {
        let request = match share::compose(&self.books, &self.users) {
            Ok(request) => request,
            Err(e) => return Reply::Message(e.to_string()),
        };
        let body = match request.to_json() {
            Ok(body) => body,
            Err(e) => return Reply::Message(format!("failed to encode share request: {e}")),
        };
        tracing::info!(book_id = request.book_id, username = %request.username, "share composed");
        share::finish(&mut self.books, &mut self.users);
        Reply::Message(format!("share request: {body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandError, Reply, Session, Target};
    use crate::core::candidate::{Book, Username};
    use crate::core::controller::{AutocompleteController, ControllerState};

    fn session() -> Session {
        let mut books = AutocompleteController::default();
        books.pool_loaded(Ok(vec![
            Book {
                id: Some(1),
                google_id: String::new(),
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                genre: None,
                cover_url: None,
                status: "completed".to_string(),
            },
            Book {
                id: Some(2),
                google_id: String::new(),
                title: "Foundation".to_string(),
                author: "Isaac Asimov".to_string(),
                genre: None,
                cover_url: None,
                status: "wishlist".to_string(),
            },
        ]));
        let mut users = AutocompleteController::default();
        users.pool_loaded(Ok(vec![Username::from("alice"), Username::from("bob")]));
        Session::new(books, users)
    }

    fn run(session: &mut Session, line: &str) -> Reply {
        let command = Command::parse(line)
            .expect("command should parse")
            .expect("line is not blank");
        session.apply(command)
    }

    #[test]
    fn parses_typed_text_verbatim() {
        assert_eq!(
            Command::parse("book  dune \n"),
            Ok(Some(Command::Type(Target::Book, " dune ".to_string())))
        );
        assert_eq!(
            Command::parse("user"),
            Ok(Some(Command::Type(Target::User, String::new())))
        );
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn parses_navigation_and_picks() {
        assert_eq!(Command::parse("next user"), Ok(Some(Command::Move(Target::User, 1))));
        assert_eq!(Command::parse("prev book"), Ok(Some(Command::Move(Target::Book, -1))));
        assert_eq!(Command::parse("pick book 2"), Ok(Some(Command::Pick(Target::Book, 1))));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(Command::parse("pick"), Err(CommandError::MissingTarget));
        assert_eq!(
            Command::parse("pick shelf 1"),
            Err(CommandError::UnknownTarget("shelf".to_string()))
        );
        assert_eq!(
            Command::parse("pick user 0"),
            Err(CommandError::BadIndex("0".to_string()))
        );
        assert_eq!(
            Command::parse("borrow dune"),
            Err(CommandError::Unknown("borrow".to_string()))
        );
    }

    #[test]
    fn share_round_trip_resets_form() {
        let mut session = session();
        run(&mut session, "book fo");
        run(&mut session, "accept book");
        run(&mut session, "user bo");

        let reply = run(&mut session, "share");
        assert_eq!(
            reply,
            Reply::Message(
                r#"share request: {"book_id":2,"username":"bo","status":"wishlist"}"#.to_string()
            )
        );
        assert_eq!(session.books.state(), ControllerState::Idle);
        assert_eq!(session.users.query(), "");
    }

    #[test]
    fn share_without_book_explains_what_is_missing() {
        let mut session = session();
        run(&mut session, "user alice");
        assert_eq!(
            run(&mut session, "share"),
            Reply::Message("Please select a book and enter a username.".to_string())
        );
    }

    #[test]
    fn invalid_pick_is_silent() {
        let mut session = session();
        run(&mut session, "book dune");
        assert_eq!(run(&mut session, "pick book 4"), Reply::Nothing);
        assert!(session.books.selection().is_none());
    }

    #[test]
    fn quit_and_help() {
        let mut session = session();
        assert_eq!(run(&mut session, "quit"), Reply::Quit);
        assert!(matches!(run(&mut session, "help"), Reply::Message(text) if text.contains("share")));
    }
}
