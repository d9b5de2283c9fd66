use super::{Stream, lift3};

/// The 1-based index of the current tick
pub fn position<I: 'static>() -> Stream<I, u64> {
    Stream::constant(1u64).fold(0, |acc, x| acc + x)
}

/// Pair each output of `source` with its output on the previous tick.
///
/// On the first tick, the previous value is `initial`.
pub fn with_previous<I, T>(initial: T, source: Stream<I, T>) -> Stream<I, (T, T)>
where
    I: 'static,
    T: Clone + Send + 'static,
{
    source.fold((initial.clone(), initial), |(_, current), next| {
        (current.clone(), next)
    })
}

/// Select between 2 streams per tick.
///
/// Both branches are advanced on every tick regardless of which one is selected,
/// so their internal state never depends on the condition.
pub fn branch<I, T>(cond: Stream<I, bool>, if_true: Stream<I, T>, if_false: Stream<I, T>) -> Stream<I, T>
where
    I: 'static,
    T: 'static,
{
    lift3(
        |cond, if_true, if_false| if cond { if_true } else { if_false },
        cond,
        if_true,
        if_false,
    )
}

/// Freeze a value while its gate is closed.
///
/// The source yields `(gate, value)`. While `gate` is `false`, `value` is passed
/// through. While `gate` is `true`, the last value yielded before the gate closed
/// is repeated. If the gate is closed on the very first tick, the first value
/// is used.
pub fn latch<I, T>(mut source: Stream<I, (bool, T)>) -> Stream<I, T>
where
    I: 'static,
    T: Clone + Send + 'static,
{
    let mut held: Option<T> = None;
    Stream::new(move |input| {
        let (gate, value) = source.next(input);
        let output = match held.take() {
            Some(held) if gate => held,
            _ => value,
        };
        held = Some(output.clone());
        output
    })
}
