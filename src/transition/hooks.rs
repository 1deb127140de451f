//! Transition definitions: the hook set and how completion is signalled

use std::fmt;
use std::rc::Rc;

use super::sequencer::Done;

/// Handle to an element supplied by the external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hook without a completion handle
pub type Hook = Rc<dyn Fn(ElementId)>;

/// `enter`/`leave` hook; receives the one-shot completion handle
pub type DoneHook = Rc<dyn Fn(ElementId, Done)>;

/// The eight lifecycle points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    BeforeEnter,
    Enter,
    AfterEnter,
    EnterCancelled,
    BeforeLeave,
    Leave,
    AfterLeave,
    LeaveCancelled,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookKind::BeforeEnter => "beforeEnter",
            HookKind::Enter => "enter",
            HookKind::AfterEnter => "afterEnter",
            HookKind::EnterCancelled => "enterCancelled",
            HookKind::BeforeLeave => "beforeLeave",
            HookKind::Leave => "leave",
            HookKind::AfterLeave => "afterLeave",
            HookKind::LeaveCancelled => "leaveCancelled",
        };
        f.write_str(name)
    }
}

/// A named transition: optional hooks plus completion mode
#[derive(Clone)]
pub struct TransitionSpec {
    /// Completion comes from the renderer's transition-end signal when true,
    /// from the `Done` handle when false
    pub css_driven: bool,
    /// Class applied while entering; defaults to `<name>-enter`
    pub enter_class: Option<String>,
    /// Class applied while leaving; defaults to `<name>-leave`
    pub leave_class: Option<String>,
    before_enter: Option<Hook>,
    enter: Option<DoneHook>,
    after_enter: Option<Hook>,
    enter_cancelled: Option<Hook>,
    before_leave: Option<Hook>,
    leave: Option<DoneHook>,
    after_leave: Option<Hook>,
    leave_cancelled: Option<Hook>,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            css_driven: true,
            enter_class: None,
            leave_class: None,
            before_enter: None,
            enter: None,
            after_enter: None,
            enter_cancelled: None,
            before_leave: None,
            leave: None,
            after_leave: None,
            leave_cancelled: None,
        }
    }
}

impl fmt::Debug for TransitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<String> = [
            HookKind::BeforeEnter,
            HookKind::Enter,
            HookKind::AfterEnter,
            HookKind::EnterCancelled,
            HookKind::BeforeLeave,
            HookKind::Leave,
            HookKind::AfterLeave,
            HookKind::LeaveCancelled,
        ]
        .into_iter()
        .filter(|k| self.has_hook(*k))
        .map(|k| k.to_string())
        .collect();
        f.debug_struct("TransitionSpec")
            .field("css_driven", &self.css_driven)
            .field("enter_class", &self.enter_class)
            .field("leave_class", &self.leave_class)
            .field("hooks", &hooks)
            .finish()
    }
}

impl TransitionSpec {
    /// A CSS-driven transition with no hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether completion is CSS-driven
    pub fn with_css(mut self, css_driven: bool) -> Self {
        self.css_driven = css_driven;
        self
    }

    pub fn with_enter_class(mut self, class: impl Into<String>) -> Self {
        self.enter_class = Some(class.into());
        self
    }

    pub fn with_leave_class(mut self, class: impl Into<String>) -> Self {
        self.leave_class = Some(class.into());
        self
    }

    pub fn before_enter(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.before_enter = Some(Rc::new(f));
        self
    }

    pub fn enter(mut self, f: impl Fn(ElementId, Done) + 'static) -> Self {
        self.enter = Some(Rc::new(f));
        self
    }

    pub fn after_enter(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.after_enter = Some(Rc::new(f));
        self
    }

    pub fn enter_cancelled(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.enter_cancelled = Some(Rc::new(f));
        self
    }

    pub fn before_leave(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.before_leave = Some(Rc::new(f));
        self
    }

    pub fn leave(mut self, f: impl Fn(ElementId, Done) + 'static) -> Self {
        self.leave = Some(Rc::new(f));
        self
    }

    pub fn after_leave(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.after_leave = Some(Rc::new(f));
        self
    }

    pub fn leave_cancelled(mut self, f: impl Fn(ElementId) + 'static) -> Self {
        self.leave_cancelled = Some(Rc::new(f));
        self
    }

    pub fn has_hook(&self, kind: HookKind) -> bool {
        match kind {
            HookKind::Enter => self.enter.is_some(),
            HookKind::Leave => self.leave.is_some(),
            other => self.plain_hook(other).is_some(),
        }
    }

    /// Hook for a lifecycle point without a completion handle.
    /// Always None for `Enter` and `Leave`.
    pub(crate) fn plain_hook(&self, kind: HookKind) -> Option<&Hook> {
        match kind {
            HookKind::BeforeEnter => self.before_enter.as_ref(),
            HookKind::AfterEnter => self.after_enter.as_ref(),
            HookKind::EnterCancelled => self.enter_cancelled.as_ref(),
            HookKind::BeforeLeave => self.before_leave.as_ref(),
            HookKind::AfterLeave => self.after_leave.as_ref(),
            HookKind::LeaveCancelled => self.leave_cancelled.as_ref(),
            HookKind::Enter | HookKind::Leave => None,
        }
    }

    /// `enter` or `leave` hook
    pub(crate) fn done_hook(&self, kind: HookKind) -> Option<&DoneHook> {
        match kind {
            HookKind::Enter => self.enter.as_ref(),
            HookKind::Leave => self.leave.as_ref(),
            _ => None,
        }
    }

    /// Class applied while entering, given the transition's registered name
    pub fn enter_class_for(&self, name: &str) -> String {
        self.enter_class
            .clone()
            .unwrap_or_else(|| format!("{}-enter", name))
    }

    /// Class applied while leaving, given the transition's registered name
    pub fn leave_class_for(&self, name: &str) -> String {
        self.leave_class
            .clone()
            .unwrap_or_else(|| format!("{}-leave", name))
    }
}
