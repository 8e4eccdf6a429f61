//! Shared ownership of a plot between DOM listeners and the host.
//!
//! Host code may call back into the plot from a callback. Host calls are
//! therefore queued while the plot is borrowed and run once it is released.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::application::{DeltaMode, NeedlePlot};
use crate::domain::logging::LogComponent;
use crate::domain::tooltip::PointerPosition;
use crate::infrastructure::input::PointerSink;
use crate::log_warn;

pub type HostTask = Box<dyn FnOnce()>;
pub type HostQueue = Rc<RefCell<VecDeque<HostTask>>>;

pub fn host_queue() -> HostQueue {
    Rc::new(RefCell::new(VecDeque::new()))
}

pub struct PlotHandle {
    plot: RefCell<NeedlePlot>,
    queue: HostQueue,
}

impl PlotHandle {
    /// Wrap a freshly built plot and run whatever it queued while building.
    pub fn new(plot: NeedlePlot, queue: HostQueue) -> Self {
        let handle = Self { plot: RefCell::new(plot), queue };
        handle.flush();
        handle
    }

    /// Run `f` on the plot, then the host calls it queued. Returns `None`
    /// when called from inside another plot call.
    pub fn with<R>(&self, f: impl FnOnce(&mut NeedlePlot) -> R) -> Option<R> {
        let result = match self.plot.try_borrow_mut() {
            Ok(mut plot) => f(&mut plot),
            Err(_) => {
                log_warn!(LogComponent::Host("queue"), "Plot is busy, call dropped");
                return None;
            }
        };
        self.flush();
        Some(result)
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn flush(&self) {
        loop {
            let task = self.queue.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl PointerSink for PlotHandle {
    fn wheel(&self, x: f64, delta_y: f64, mode: DeltaMode) {
        self.with(|plot| plot.wheel(x, delta_y, mode));
    }

    fn double_click(&self, x: f64, shift: bool) {
        self.with(|plot| plot.double_click(x, shift));
    }

    fn drag_start(&self, x: f64) {
        self.with(|plot| plot.drag_start(x));
    }

    fn drag_move(&self, x: f64) {
        self.with(|plot| plot.drag_move(x));
    }

    fn drag_end(&self) {
        self.with(|plot| plot.drag_end());
    }

    fn pointer_move(&self, x: f64, y: f64, client: PointerPosition) {
        self.with(|plot| plot.pointer_move(x, y, client));
    }

    fn pointer_leave(&self) {
        self.with(|plot| plot.pointer_leave());
    }
}
