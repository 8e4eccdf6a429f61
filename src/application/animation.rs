use std::cell::RefCell;
use std::rc::Rc;
use strum::{AsRefStr, Display, EnumString};

use super::scene::SceneFrame;

/// Easing of a transition's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Easing {
    Linear,
    /// Quadratic ease-in, `t²`
    #[default]
    Quad,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Quad => t * t,
        }
    }
}

/// Move the visible scene to `target`. A zero duration means "draw now".
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub target: SceneFrame,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Transition {
    pub fn immediate(target: SceneFrame) -> Self {
        Self { target, duration_ms: 0.0, easing: Easing::Linear }
    }

    pub fn animated(target: SceneFrame, duration_ms: f64) -> Self {
        Self { target, duration_ms, easing: Easing::Quad }
    }

    pub fn is_animated(&self) -> bool {
        self.duration_ms > 0.0
    }
}

/// Presents scene frames. Transitions are fire-and-forget: a new one
/// supersedes whatever is still running.
pub trait TransitionExecutor {
    fn run(&mut self, transition: Transition);

    /// Stop drawing; called when the plot is destroyed.
    fn clear(&mut self) {}
}

/// Keeps every transition it receives. Used headless and in tests; clones
/// share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    log: Rc<RefCell<Vec<Transition>>>,
    cleared: Rc<RefCell<bool>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.log.borrow().clone()
    }

    pub fn last(&self) -> Option<Transition> {
        self.log.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    pub fn was_cleared(&self) -> bool {
        *self.cleared.borrow()
    }
}

impl TransitionExecutor for RecordingExecutor {
    fn run(&mut self, transition: Transition) {
        self.log.borrow_mut().push(transition);
    }

    fn clear(&mut self) {
        *self.cleared.borrow_mut() = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn quad_eases_in() {
        assert_eq!(Easing::Quad.apply(0.5), 0.25);
        assert_eq!(Easing::Quad.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
        assert_eq!(Easing::from_str("quad"), Ok(Easing::Quad));
        assert_eq!(Easing::Linear.to_string(), "linear");
    }
}
