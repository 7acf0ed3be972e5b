/// Page visibility transitions the viewer reacts to (`pagehide` / `pageshow`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    Hide,
    Show,
}

/// What to do with the frame loop and the sensor on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Page is entering the back/forward cache: pause, keep everything alive.
    Suspend,
    /// Page is being unloaded for good: cancel and release.
    Teardown,
    /// Page came back from the back/forward cache.
    Resume,
    /// Regular first load; `init` already started everything.
    Ignore,
}

/// `persisted` is `PageTransitionEvent.persisted`.
pub fn page_action(transition: PageTransition, persisted: bool) -> PageAction {
    match (transition, persisted) {
        (PageTransition::Hide, true) => PageAction::Suspend,
        (PageTransition::Hide, false) => PageAction::Teardown,
        (PageTransition::Show, true) => PageAction::Resume,
        (PageTransition::Show, false) => PageAction::Ignore,
    }
}
