//! # Streams
//!
//! A [`Stream`] is a value that evolves once per external tick. Each tick
//! feeds it one input and it yields one output, carrying whatever state
//! it needs to the next tick inside itself.
//!
//! Streams are never shared. Combining two streams moves both into the
//! combined stream, and the combined stream advances both on the same input.
//! If the same derived quantity is needed in two places, build it twice:
//! both copies see the same inputs and produce the same outputs.
//!
//! ```rust
//! # use pistonite_eta as eta;
//! use eta::stream::{Stream, position};
//!
//! // running sum of the input, paired with the tick index
//! let mut sum = Stream::<u32, u32>::identity()
//!     .fold(0, |acc, x| acc + x)
//!     .zip(position());
//! assert_eq!(sum.next(&3), (3, 1));
//! assert_eq!(sum.next(&4), (7, 2));
//! ```
//!
//! Arithmetic operators are implemented pointwise for `f64` streams, so
//! `a + b` is the stream whose output is the sum of the outputs of `a` and
//! `b` at the same tick.

mod signal;
pub use signal::{branch, latch, position, with_previous};

/// A stateful, pull-based value transformer
///
/// See the [module documentation](self).
pub struct Stream<I, O> {
    step: Box<dyn FnMut(&I) -> O + Send>,
}

impl<I: 'static, O: 'static> Stream<I, O> {
    /// Create a stream from its transition function.
    ///
    /// State captured by the closure is the state of the stream.
    pub fn new<F>(step: F) -> Self
    where
        F: FnMut(&I) -> O + Send + 'static,
    {
        Self {
            step: Box::new(step),
        }
    }

    /// Advance the stream by one tick
    #[inline(always)]
    pub fn next(&mut self, input: &I) -> O {
        (self.step)(input)
    }

    /// Advance the stream by one tick, returning the output
    /// together with the stream for the next tick
    pub fn step(mut self, input: &I) -> (O, Self) {
        let output = self.next(input);
        (output, self)
    }

    /// A stream that ignores the input and always yields `value`
    pub fn constant(value: O) -> Self
    where
        O: Clone + Send,
    {
        Self::new(move |_| value.clone())
    }

    /// Transform the output of each tick
    pub fn map<P, F>(mut self, mut f: F) -> Stream<I, P>
    where
        P: 'static,
        F: FnMut(O) -> P + Send + 'static,
    {
        Stream::new(move |input| f(self.next(input)))
    }

    /// Advance two streams on the same tick and pair up the outputs
    pub fn zip<P: 'static>(mut self, mut other: Stream<I, P>) -> Stream<I, (O, P)> {
        Stream::new(move |input| {
            let left = self.next(input);
            let right = other.next(input);
            (left, right)
        })
    }

    /// Accumulate the outputs of this stream.
    ///
    /// Each tick yields `acc = combine(&acc, output)`, starting from `seed`.
    /// This is the only combinator that carries history from one tick to the next.
    pub fn fold<A, F>(mut self, seed: A, mut combine: F) -> Stream<I, A>
    where
        A: Clone + Send + 'static,
        F: FnMut(&A, O) -> A + Send + 'static,
    {
        let mut acc = seed;
        Stream::new(move |input| {
            acc = combine(&acc, self.next(input));
            acc.clone()
        })
    }
}

impl<I: Clone + 'static> Stream<I, I> {
    /// A stream that yields the input unchanged
    pub fn identity() -> Self {
        Self::new(I::clone)
    }
}

/// Apply a stream of functions to a stream of arguments, both advanced on the same tick
pub fn apply<I, A, B, F>(mut functions: Stream<I, F>, mut args: Stream<I, A>) -> Stream<I, B>
where
    I: 'static,
    A: 'static,
    B: 'static,
    F: FnOnce(A) -> B + 'static,
{
    Stream::new(move |input| {
        let f = functions.next(input);
        f(args.next(input))
    })
}

/// Combine the outputs of 2 streams pointwise
pub fn lift2<I, A, B, C, F>(mut f: F, a: Stream<I, A>, b: Stream<I, B>) -> Stream<I, C>
where
    I: 'static,
    A: 'static,
    B: 'static,
    C: 'static,
    F: FnMut(A, B) -> C + Send + 'static,
{
    a.zip(b).map(move |(a, b)| f(a, b))
}

/// Combine the outputs of 3 streams pointwise
pub fn lift3<I, A, B, C, D, F>(
    mut f: F,
    a: Stream<I, A>,
    b: Stream<I, B>,
    c: Stream<I, C>,
) -> Stream<I, D>
where
    I: 'static,
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    F: FnMut(A, B, C) -> D + Send + 'static,
{
    a.zip(b).zip(c).map(move |((a, b), c)| f(a, b, c))
}

macro_rules! impl_stream_arith {
    ($($Op:ident, $op:ident);* $(;)?) => { $(
    impl<I: 'static> std::ops::$Op for Stream<I, f64> {
        type Output = Stream<I, f64>;
        fn $op(self, rhs: Self) -> Self::Output {
            lift2(|a: f64, b: f64| std::ops::$Op::$op(a, b), self, rhs)
        }
    }
    impl<I: 'static> std::ops::$Op<f64> for Stream<I, f64> {
        type Output = Stream<I, f64>;
        fn $op(self, rhs: f64) -> Self::Output {
            self.map(move |x| std::ops::$Op::$op(x, rhs))
        }
    }
    )* }
}
impl_stream_arith! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
}
