/// A point-in-time view of build progress.
///
/// Counts and times are cumulative over the life of one build. Rules move
/// from `todo`/`unknown` into `built`/`skipped` as the build proceeds, so
/// the individual fields may go up or down, but nothing is ever removed
/// from the build as a whole.
///
/// Snapshots from sub-builds can be combined with [`Snapshot::merge`]
/// (also available as `+` and `Sum`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Snapshot {
    /// Name of the first target that failed, if any
    pub failure: Option<String>,
    /// Number of rules which were required, but were already valid
    pub count_skipped: u64,
    /// Number of rules which were built in this run
    pub count_built: u64,
    /// Number of rules built previously, but not yet known to be required
    pub count_unknown: u64,
    /// Number of rules which are required, but not yet built
    pub count_todo: u64,
    /// Seconds previously spent on rules that were skipped
    pub time_skipped: f64,
    /// Seconds spent on rules built in this run
    pub time_built: f64,
    /// Seconds previously spent on rules in the unknown state
    pub time_unknown: f64,
    /// Known seconds for rules still to build, and the number of rules
    /// still to build whose time is not known (never built before)
    pub time_todo: (f64, u64),
}

impl Snapshot {
    /// Combine two snapshots.
    ///
    /// Counts and times are added. The failure of `self` is kept if there is one,
    /// so the first failure wins when merging in order.
    pub fn merge(self, other: Self) -> Self {
        Self {
            failure: self.failure.or(other.failure),
            count_skipped: self.count_skipped + other.count_skipped,
            count_built: self.count_built + other.count_built,
            count_unknown: self.count_unknown + other.count_unknown,
            count_todo: self.count_todo + other.count_todo,
            time_skipped: self.time_skipped + other.time_skipped,
            time_built: self.time_built + other.time_built,
            time_unknown: self.time_unknown + other.time_unknown,
            time_todo: (
                self.time_todo.0 + other.time_todo.0,
                self.time_todo.1 + other.time_todo.1,
            ),
        }
    }

    /// Name of the failed target, if any
    #[inline(always)]
    pub fn is_failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl std::ops::Add for Snapshot {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.merge(rhs)
    }
}

impl std::iter::Sum for Snapshot {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}
