//! Driver that links a source and an ordered list of stages into one run.

use super::channel::Receiver;

/// Produces the initial stream of a pipeline.
pub type Source<T> = Box<dyn FnOnce() -> Receiver<T> + Send>;

/// A single already-bound stage: takes the previous stage's output receiver
/// and returns its own. Each of [`super::stage::map`],
/// [`super::stage::filter`], etc. partially applied to its handler and
/// capacity produces a value of this shape.
pub type Pipe<T> = Box<dyn FnOnce(Receiver<T>) -> Receiver<T> + Send>;

/// Wires `out_0 = source(); out_i = stage_i(out_{i-1})` and returns the
/// final stream handle.
pub fn run_pipeline<T>(source: Source<T>, stages: Vec<Pipe<T>>) -> Receiver<T> {
    let mut out = source();
    for stage in stages {
        out = stage(out);
    }
    out
}
