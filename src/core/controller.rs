use crate::core::candidate::{Candidate, Field};
use crate::core::error::{PoolLoadError, SelectionError};
use crate::core::pool::CandidatePool;
use crate::core::search::ranker::{DEFAULT_LIMIT, SuggestionList, rank};
use crate::source::CandidateSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing typed, nothing shown.
    Idle,
    /// A non-empty query and its suggestion list are exposed.
    Suggesting,
    /// A candidate was picked; the list is hidden until the query changes.
    Selected,
}

/// Receives every change a controller exposes. Implementations draw; the
/// controller never does.
pub trait RenderSurface<C> {
    fn suggestions_changed(&mut self, list: &SuggestionList<C>);

    fn selection_changed(&mut self, selection: Option<&C>);
}

#[derive(Debug, Clone)]
pub struct AutocompleteOptions<C> {
    pub limit: usize,
    pub fields: Vec<Field<C>>,
}

impl<C: Candidate> Default for AutocompleteOptions<C> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            fields: C::default_fields(),
        }
    }
}

/// One autocomplete input: owns its pool, query, visible suggestions and
/// selection.
pub struct AutocompleteController<C> {
    options: AutocompleteOptions<C>,
    pool: CandidatePool<C>,
    query: String,
    state: ControllerState,
    suggestions: SuggestionList<C>,
    selection: Option<C>,
    surfaces: Vec<Box<dyn RenderSurface<C>>>,
}

impl<C: Candidate> Default for AutocompleteController<C> {
    fn default() -> Self {
        Self::new(AutocompleteOptions::default())
    }
}

impl<C: Candidate> AutocompleteController<C> {
    pub fn new(options: AutocompleteOptions<C>) -> Self {
        Self {
            options,
            pool: CandidatePool::empty(),
            query: String::new(),
            state: ControllerState::Idle,
            suggestions: SuggestionList::empty(0),
            selection: None,
            surfaces: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, surface: impl RenderSurface<C> + 'static) {
        self.surfaces.push(Box::new(surface));
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn query(&self) -> &str {
        self.query.as_str()
    }

    pub fn suggestions(&self) -> &SuggestionList<C> {
        &self.suggestions
    }

    pub fn selection(&self) -> Option<&C> {
        self.selection.as_ref()
    }

    pub fn pool(&self) -> &CandidatePool<C> {
        &self.pool
    }

    pub fn options(&self) -> &AutocompleteOptions<C> {
        &self.options
    }

    /// Installs the outcome of a pool load. A failed load leaves an empty
    /// pool. The visible list is not re-ranked; the next query change sees
    /// the new pool.
    pub fn pool_loaded(&mut self, result: Result<Vec<C>, PoolLoadError>) {
        let items = match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(kind = C::KIND, "candidate pool unavailable, using an empty one: {e}");
                Vec::new()
            }
        };
        let count = items.len();
        let generation = self.pool.replace(items);
        tracing::debug!(kind = C::KIND, count, generation, "candidate pool loaded");
    }

    pub fn load_from<S>(&mut self, source: &S)
    where
        S: CandidateSource<C> + ?Sized,
    {
        self.pool_loaded(source.load());
    }

    /// Records a new query text. Any selection is dropped.
    pub fn set_query(&mut self, text: &str) {
        self.query.clear();
        self.query.push_str(text);
        self.search();
    }

    /// The input regained focus: search again with the current text.
    pub fn focus(&mut self) {
        self.search();
    }

    /// Focus left the component: hide the list, keep query and selection.
    pub fn dismiss(&mut self) {
        if self.state != ControllerState::Suggesting {
            return;
        }
        self.state = ControllerState::Idle;
        self.hide_suggestions();
    }

    /// Picks entry `index` of the visible list.
    pub fn select(&mut self, index: usize) -> Result<(), SelectionError> {
        let Some(entry) = self.suggestions.get(index) else {
            tracing::debug!(kind = C::KIND, index, "ignoring pick outside the suggestion list");
            return Err(SelectionError::NotSuggested);
        };
        if !self.pool.contains(&entry.candidate) {
            tracing::debug!(
                kind = C::KIND,
                key = ?entry.candidate.key(),
                "ignoring pick of a candidate dropped by a pool reload"
            );
            return Err(SelectionError::NoLongerInPool);
        }

        let candidate = entry.candidate.clone();
        self.query.clear();
        self.query.push_str(candidate.display_text());
        self.selection = Some(candidate);
        self.state = ControllerState::Selected;
        self.hide_suggestions();
        self.notify_selection();
        Ok(())
    }

    /// Picks `candidate` if it is part of the visible list.
    pub fn select_candidate(&mut self, candidate: &C) -> Result<(), SelectionError> {
        match self.suggestions.position_of(candidate) {
            Some(index) => self.select(index),
            None => {
                tracing::debug!(kind = C::KIND, key = ?candidate.key(), "ignoring pick of an unlisted candidate");
                Err(SelectionError::NotSuggested)
            }
        }
    }

    pub fn move_active(&mut self, delta: isize) -> bool {
        if !self.suggestions.move_active(delta) {
            return false;
        }
        self.notify_suggestions();
        true
    }

    pub fn accept_active(&mut self) -> Result<(), SelectionError> {
        let index = self.suggestions.active().ok_or(SelectionError::NotSuggested)?;
        self.select(index)
    }

    /// Back to a blank input, as after a completed submission.
    pub fn reset(&mut self) {
        self.query.clear();
        self.search();
    }

    fn search(&mut self) {
        self.clear_selection();

        let query = self.query.trim();
        if query.is_empty() {
            self.state = ControllerState::Idle;
            self.hide_suggestions();
            return;
        }

        self.suggestions = rank(&self.pool, query, self.options.limit, &self.options.fields);
        self.state = ControllerState::Suggesting;
        tracing::debug!(
            kind = C::KIND,
            query,
            matches = self.suggestions.len(),
            "suggestions ranked"
        );
        self.notify_suggestions();
    }

    fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.notify_selection();
        }
    }

    fn hide_suggestions(&mut self) {
        self.suggestions = SuggestionList::empty(self.pool.generation());
        self.notify_suggestions();
    }

    fn notify_suggestions(&mut self) {
        for surface in &mut self.surfaces {
            surface.suggestions_changed(&self.suggestions);
        }
    }

    fn notify_selection(&mut self) {
        for surface in &mut self.surfaces {
            surface.selection_changed(self.selection.as_ref());
        }
    }
}
