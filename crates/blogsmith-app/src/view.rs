//! Body view state machine and result tabs
//!
//! The main pane shows exactly one of four bodies. Transitions are explicit
//! methods; an illegal transition returns [`Error::InvalidTransition`] and
//! leaves the machine untouched.
//!
//! ```text
//! Welcome ─┐                 ┌─ success ──> Result
//! Result  ─┼─ submit ─> Loading
//! Error   ─┘                 └─ failure ──> Error ── dismiss ──> Welcome
//!
//! Welcome|Result|Error ─ load ─> Loading ─ loaded ─> Result (Preview tab)
//!                                       └ load failed ─> previous body
//! ```

use blogsmith_core::prelude::*;

/// Which body is visible in the main pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyState {
    #[default]
    Welcome,
    Loading,
    Result,
    Error,
}

impl BodyState {
    pub fn name(&self) -> &'static str {
        match self {
            BodyState::Welcome => "welcome",
            BodyState::Loading => "loading",
            BodyState::Result => "result",
            BodyState::Error => "error",
        }
    }
}

/// What the `Loading` body is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingKind {
    Generation,
    PastBlog,
}

/// Result tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ResultTab {
    #[default]
    Plan,
    Evidence,
    Preview,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [ResultTab::Plan, ResultTab::Evidence, ResultTab::Preview];

    pub fn title(&self) -> &'static str {
        match self {
            ResultTab::Plan => "Plan",
            ResultTab::Evidence => "Evidence",
            ResultTab::Preview => "Preview",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ResultTab::Plan => 0,
            ResultTab::Evidence => 1,
            ResultTab::Preview => 2,
        }
    }

    /// Tab for a 1-based number key
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(ResultTab::Plan),
            2 => Some(ResultTab::Evidence),
            3 => Some(ResultTab::Preview),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Body state plus the data that only makes sense in some bodies
#[derive(Debug, Clone, Default)]
pub struct ViewMachine {
    body: BodyState,
    /// Message shown by the `Error` body
    error_message: Option<String>,
    /// Set while `Loading`: what is pending and which body to restore
    loading: Option<(LoadingKind, BodyState)>,
    tab: ResultTab,
}

impl ViewMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self) -> BodyState {
        self.body
    }

    pub fn is_loading(&self) -> bool {
        self.body == BodyState::Loading
    }

    pub fn loading_kind(&self) -> Option<LoadingKind> {
        self.loading.map(|(kind, _)| kind)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn active_tab(&self) -> ResultTab {
        self.tab
    }

    /// Start a generation: `Welcome|Result|Error -> Loading`
    pub fn submit(&mut self) -> Result<()> {
        self.enter_loading(LoadingKind::Generation, "submit")
    }

    /// Generation succeeded: `Loading -> Result` with the Plan tab active
    pub fn succeed(&mut self) -> Result<()> {
        self.expect_loading(LoadingKind::Generation, "complete a generation")?;
        self.loading = None;
        self.error_message = None;
        self.body = BodyState::Result;
        self.tab = ResultTab::Plan;
        Ok(())
    }

    /// Generation failed: `Loading -> Error`
    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.expect_loading(LoadingKind::Generation, "fail a generation")?;
        self.loading = None;
        self.error_message = Some(message.into());
        self.body = BodyState::Error;
        Ok(())
    }

    /// Dismiss the error: `Error -> Welcome`
    pub fn dismiss(&mut self) -> Result<()> {
        if self.body != BodyState::Error {
            return Err(self.invalid("dismiss"));
        }
        self.error_message = None;
        self.body = BodyState::Welcome;
        Ok(())
    }

    /// Start loading a saved blog: `Welcome|Result|Error -> Loading`
    pub fn begin_load(&mut self) -> Result<()> {
        self.enter_loading(LoadingKind::PastBlog, "load a blog")
    }

    /// Saved blog loaded: `Loading -> Result` with the Preview tab forced
    pub fn finish_load(&mut self) -> Result<()> {
        self.expect_loading(LoadingKind::PastBlog, "finish loading a blog")?;
        self.loading = None;
        self.error_message = None;
        self.body = BodyState::Result;
        self.tab = ResultTab::Preview;
        Ok(())
    }

    /// Saved blog failed to load: `Loading -> <previous body>`
    ///
    /// Returns the restored body.
    pub fn abort_load(&mut self) -> Result<BodyState> {
        self.expect_loading(LoadingKind::PastBlog, "abort loading a blog")?;
        let previous = self
            .loading
            .take()
            .map_or(BodyState::Welcome, |(_, previous)| previous);
        self.body = previous;
        Ok(previous)
    }

    /// Select a tab. Idempotent; never touches the body.
    pub fn select_tab(&mut self, tab: ResultTab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    fn enter_loading(&mut self, kind: LoadingKind, action: &'static str) -> Result<()> {
        if self.body == BodyState::Loading {
            return Err(self.invalid(action));
        }
        self.loading = Some((kind, self.body));
        self.body = BodyState::Loading;
        Ok(())
    }

    fn expect_loading(&self, kind: LoadingKind, action: &'static str) -> Result<()> {
        if self.body != BodyState::Loading || self.loading_kind() != Some(kind) {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.body.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_welcome() {
        let view = ViewMachine::new();
        assert_eq!(view.body(), BodyState::Welcome);
        assert_eq!(view.active_tab(), ResultTab::Plan);
    }

    #[test]
    fn test_generation_success_path() {
        let mut view = ViewMachine::new();
        view.submit().unwrap();
        assert_eq!(view.body(), BodyState::Loading);
        assert_eq!(view.loading_kind(), Some(LoadingKind::Generation));

        view.select_tab(ResultTab::Evidence);
        view.succeed().unwrap();
        assert_eq!(view.body(), BodyState::Result);
        assert_eq!(view.active_tab(), ResultTab::Plan);
        assert_eq!(view.loading_kind(), None);
    }

    #[test]
    fn test_generation_failure_then_dismiss() {
        let mut view = ViewMachine::new();
        view.submit().unwrap();
        view.fail("backend down").unwrap();
        assert_eq!(view.body(), BodyState::Error);
        assert_eq!(view.error_message(), Some("backend down"));

        view.dismiss().unwrap();
        assert_eq!(view.body(), BodyState::Welcome);
        assert_eq!(view.error_message(), None);
    }

    #[test]
    fn test_submit_from_result_and_error() {
        let mut view = ViewMachine::new();
        view.submit().unwrap();
        view.succeed().unwrap();
        assert!(view.submit().is_ok());

        view.fail("x").unwrap();
        assert!(view.submit().is_ok());
    }

    #[test]
    fn test_submit_while_loading_is_rejected_and_unchanged() {
        let mut view = ViewMachine::new();
        view.submit().unwrap();
        let before = (view.body(), view.loading_kind(), view.active_tab());

        let err = view.submit().unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert_eq!(before, (view.body(), view.loading_kind(), view.active_tab()));

        assert!(view.begin_load().is_err());
        assert_eq!(view.loading_kind(), Some(LoadingKind::Generation));
    }

    #[test]
    fn test_illegal_transitions_from_welcome() {
        let mut view = ViewMachine::new();
        assert!(view.succeed().is_err());
        assert!(view.fail("x").is_err());
        assert!(view.dismiss().is_err());
        assert!(view.finish_load().is_err());
        assert!(view.abort_load().is_err());
        assert_eq!(view.body(), BodyState::Welcome);
    }

    #[test]
    fn test_completion_kind_must_match() {
        let mut view = ViewMachine::new();
        view.begin_load().unwrap();
        assert!(view.succeed().is_err());
        assert!(view.fail("x").is_err());
        assert_eq!(view.body(), BodyState::Loading);
    }

    #[test]
    fn test_load_forces_preview_tab() {
        let mut view = ViewMachine::new();
        view.select_tab(ResultTab::Evidence);
        view.begin_load().unwrap();
        view.finish_load().unwrap();
        assert_eq!(view.body(), BodyState::Result);
        assert_eq!(view.active_tab(), ResultTab::Preview);
    }

    #[test]
    fn test_load_failure_restores_previous_body() {
        let mut view = ViewMachine::new();
        view.submit().unwrap();
        view.fail("boom").unwrap();

        view.begin_load().unwrap();
        assert_eq!(view.abort_load().unwrap(), BodyState::Error);
        assert_eq!(view.body(), BodyState::Error);
        assert_eq!(view.error_message(), Some("boom"));

        let mut view = ViewMachine::new();
        view.begin_load().unwrap();
        assert_eq!(view.abort_load().unwrap(), BodyState::Welcome);
    }

    #[test]
    fn test_tab_selection_is_idempotent() {
        let mut view = ViewMachine::new();
        view.select_tab(ResultTab::Preview);
        view.select_tab(ResultTab::Preview);
        assert_eq!(view.active_tab(), ResultTab::Preview);
        assert_eq!(view.body(), BodyState::Welcome);
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(ResultTab::Plan.next(), ResultTab::Evidence);
        assert_eq!(ResultTab::Preview.next(), ResultTab::Plan);
        assert_eq!(ResultTab::Plan.prev(), ResultTab::Preview);
        assert_eq!(ResultTab::from_number(3), Some(ResultTab::Preview));
        assert_eq!(ResultTab::from_number(4), None);
    }
}
