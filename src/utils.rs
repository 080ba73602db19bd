use std::ops::Range;

use itertools::{Itertools, MinMaxResult};

/// Smallest and largest of `values`, ignoring NaNs. `None` if nothing is left.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    match values
        .into_iter()
        .filter(|v| !v.is_nan())
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements       => None,
        MinMaxResult::OneElement(x)    => Some((x, x)),
        MinMaxResult::MinMax(lo, hi)   => Some((lo, hi)),
    }
}

/// Arithmetic mean; `None` for an empty sequence.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRangeError<E> {
    #[error("could not find '..' when parsing range")]
    MissingDots,
    #[error("{0}")]
    Bound(E),
}

pub fn parse_range<T: std::str::FromStr>(s: &str) -> Result<Range<T>, ParseRangeError<<T as std::str::FromStr>::Err>> {
    let v = s.split("..").collect::<Vec<_>>();
    if v.len() != 2 {
        return Err(ParseRangeError::MissingDots);
    }
    let x = v[0].trim().parse().map_err(ParseRangeError::Bound)?;
    let y = v[1].trim().parse().map_err(ParseRangeError::Bound)?;
    Ok(x..y)
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use log::info;

    /// Log how long each step of a multi-step job takes.
    pub struct Progress {
        previous: Instant,
        message: String,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now(), message: String::new() } }

        /// Remember message, start timer.
        pub fn start(&mut self, message: &str) {
            message.clone_into(&mut self.message);
            self.start_timer();
        }

        // Log the message given to `start` with the time elapsed since then
        pub fn done(&mut self) {
            info!("{}: {} ms", self.message, group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
