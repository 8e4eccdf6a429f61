use std::fmt::Debug;

pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Events raised by a plot instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    /// Emitted once after every re-sync of the scene.
    ViewportChanged {
        scale: f64,
        position: f64,
        aa_position: f64,
        animated: bool,
    },
    /// Overlapping heads were spread out under the pointer.
    HeadsFannedOut {
        position: f64,
        value: f64,
        count: usize,
    },
    Resized {
        width: f64,
        height: f64,
    },
}

impl DomainEvent for PlotEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PlotEvent::ViewportChanged { .. } => "ViewportChanged",
            PlotEvent::HeadsFannedOut { .. } => "HeadsFannedOut",
            PlotEvent::Resized { .. } => "Resized",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_plot_event(&self, event: PlotEvent);
}

/// Simple in-memory event dispatcher
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    plot_handlers: Vec<Box<dyn Fn(&PlotEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self { plot_handlers: Vec::new() }
    }

    pub fn subscribe_to_plot_events<F>(&mut self, handler: F)
    where
        F: Fn(&PlotEvent) + 'static,
    {
        self.plot_handlers.push(Box::new(handler));
    }

    pub fn clear(&mut self) {
        self.plot_handlers.clear();
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_plot_event(&self, event: PlotEvent) {
        for handler in &self.plot_handlers {
            handler(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn every_subscriber_receives_the_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = InMemoryEventDispatcher::new();
        for tag in ["needle", "site"] {
            let seen = seen.clone();
            dispatcher.subscribe_to_plot_events(move |event| {
                seen.borrow_mut().push((tag, event.event_type()));
            });
        }

        dispatcher.publish_plot_event(PlotEvent::Resized { width: 600.0, height: 300.0 });

        assert_eq!(*seen.borrow(), vec![("needle", "Resized"), ("site", "Resized")]);
    }
}
