use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Unit of work for the dispatcher. `execute` may run on any worker and
/// must not assume exclusive access to anything beyond what the task
/// itself owns.
pub trait Task: Send {
    fn execute(&mut self);
}

struct QueueState<'s> {
    tasks: VecDeque<Box<dyn Task + 's>>,
    terminate: bool,
}

/// FIFO task queue guarded by one mutex and one condition variable.
/// Workers run `worker_loop` until the terminate flag is set and the
/// queue has drained; the driver calls `wait_for_finish` once every task
/// has been enqueued.
pub struct ParallelSystem<'s> {
    state: Mutex<QueueState<'s>>,
    cv: Condvar,
}

impl<'s> ParallelSystem<'s> {
    pub fn new() -> ParallelSystem<'s> {
        ParallelSystem {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                terminate: false,
            }),
            cv: Condvar::new(),
        }
    }

    pub fn add_task(&self, task: Box<dyn Task + 's>) {
        let mut state = self.state.lock().unwrap();
        state.tasks.push_back(task);
        self.cv.notify_all();
    }

    /// Blocks until a task is available or termination was requested.
    /// Returns `None` only on terminate-and-empty.
    pub fn wait_for_task(&self) -> Option<Box<dyn Task + 's>> {
        let mut state = self.state.lock().unwrap();
        while state.tasks.is_empty() && !state.terminate {
            state = self.cv.wait(state).unwrap();
        }

        let task = state.tasks.pop_front();
        self.cv.notify_all();
        task
    }

    pub fn wait_for_empty(&self) {
        let mut state = self.state.lock().unwrap();
        while !state.tasks.is_empty() {
            state = self.cv.wait(state).unwrap();
        }
    }

    pub fn terminate(&self) {
        let mut state = self.state.lock().unwrap();
        state.terminate = true;
        self.cv.notify_all();
    }

    /// Drain the queue, then tell the workers to exit. The workers finish
    /// whatever task they already popped; joining them is the caller's
    /// (scope's) responsibility.
    pub fn wait_for_finish(&self) {
        self.wait_for_empty();
        self.terminate();
    }

    pub fn worker_loop(&self) {
        while let Some(mut task) = self.wait_for_task() {
            task.execute();
        }
    }
}

impl<'s> Default for ParallelSystem<'s> {
    fn default() -> Self {
        ParallelSystem::new()
    }
}
