extern crate std;

use crate::result;
use crate::structs::ArrivalRecord;

pub type FetchOutcome = result::FetchResult<Vec<ArrivalRecord>>;

/// One upstream feed, normalized into `ArrivalRecord`s.
pub trait ArrivalSource {
    fn name(&self) -> &str;
    fn fetch(&self) -> FetchOutcome;
}

/// Anything the scheduler can poll for a fresh arrival list.
pub trait ArrivalFeed {
    fn arrivals(&self) -> Vec<ArrivalRecord>;
}

/// Asks the primary source first and only consults the secondary when the
/// primary fails outright. An empty primary answer is still an answer.
pub struct FallbackArrivals<'a> {
    primary: &'a dyn ArrivalSource,
    secondary: &'a dyn ArrivalSource,
}

impl<'a> FallbackArrivals<'a> {
    pub fn new(primary: &'a dyn ArrivalSource, secondary: &'a dyn ArrivalSource) -> FallbackArrivals<'a> {
        return FallbackArrivals {
            primary: primary,
            secondary: secondary,
        };
    }
}

impl<'a> ArrivalFeed for FallbackArrivals<'a> {
    fn arrivals(&self) -> Vec<ArrivalRecord> {
        match self.primary.fetch() {
            Ok(arrivals) => return arrivals,
            Err(err) => warn!("{} failed, falling back to {}: {}",
                              self.primary.name(), self.secondary.name(), err),
        }

        match self.secondary.fetch() {
            Ok(arrivals) => {
                info!("Using {} arrivals ({})", self.secondary.name(), arrivals.len());
                return arrivals;
            },
            Err(err) => {
                error!("{} failed too, no arrivals: {}", self.secondary.name(), err);
                return vec![];
            },
        }
    }
}

#[cfg(test)]
impl<F> ArrivalFeed for F where F: Fn() -> Vec<ArrivalRecord> {
    fn arrivals(&self) -> Vec<ArrivalRecord> {
        return self();
    }
}
