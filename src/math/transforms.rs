//! Transform pipeline infrastructure
//!
//! Compilation is a fixed chain of stages (preprocess, parse, layout,
//! serialize), but tools and tests often want to stop part way, for example to
//! look at the tree before serialization. Each stage is a [`Runnable`], and
//! [`Transform`] chains them with type-checked `.then()` calls:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(|s: String| s)
//!     .then(Preprocess::new())  // String -> String
//!     .then(Parse::new())       // String -> Node
//!     .then(Layout::new());     // Node -> Node
//! ```
//!
//! The compiler is total, so stages return their output directly instead of a
//! `Result`. Pre-built pipelines live in [`standard`] as lazily built statics.
//!
//! - [`stages`]: the individual stages
//! - [`standard`]: the common pipelines

pub mod stages;
pub mod standard;

/// Anything that turns an `I` into an `O`.
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> O;
}

/// A composable chain of stages from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Feed this transform's output into `stage`.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| stage.run(prev_run(input))),
        }
    }

    /// Like [`Transform::then`], for a pre-built static pipeline.
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| next.run(prev_run(input))),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> O {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> O {
        Transform::run(self, input)
    }
}
