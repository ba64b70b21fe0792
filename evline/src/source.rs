//! The input side of the editor
//!
//! The editor never reads by itself. It only needs to know whether the
//! upstream can still produce input, and to forward flow control and
//! teardown to it.

/// Flow state of a reader backed upstream
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Flowing,
    Paused,
    /// The reader reported end of input
    Ended,
    Closed,
}

impl Flow {
    pub fn is_readable(&self) -> bool {
        matches!(self, Flow::Flowing | Flow::Paused)
    }

    /// Pausing or resuming a finished upstream has no effect
    pub(crate) fn pause(&mut self) {
        if *self == Flow::Flowing {
            *self = Flow::Paused;
        }
    }

    pub(crate) fn resume(&mut self) {
        if *self == Flow::Paused {
            *self = Flow::Flowing;
        }
    }
}

/// Upstream input source as seen by the editor
pub trait Upstream {
    fn is_readable(&self) -> bool {
        true
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    /// Detach from the input. Called once when the editor closes.
    fn close(&mut self) {}
}

/// No upstream, input is pushed into the editor directly
impl Upstream for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow() {
        let mut flow = Flow::default();

        flow.pause();
        assert_eq!(flow, Flow::Paused);
        assert!(flow.is_readable());

        flow.resume();
        assert_eq!(flow, Flow::Flowing);

        let mut flow = Flow::Ended;

        flow.pause();
        flow.resume();
        assert_eq!(flow, Flow::Ended);
        assert!(!flow.is_readable());
        assert!(!Flow::Closed.is_readable());
    }
}
