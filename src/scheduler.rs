extern crate std;

use crate::arrivals;
use crate::display;
use crate::structs::ArrivalRecord;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PollState {
    /// Last poll found trains; poll at the relaxed interval.
    Normal,
    /// Nothing to show yet, or the feeds are failing; poll quickly.
    Degraded,
}

/// What is currently on the matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DisplayState {
    Waiting,
    Arrivals(Vec<ArrivalRecord>),
}

#[derive(Clone, Copy, Debug)]
pub struct Intervals {
    pub normal: std::time::Duration,
    pub degraded: std::time::Duration,
}

impl Default for Intervals {
    fn default() -> Intervals {
        return Intervals {
            normal: std::time::Duration::from_secs(60),
            degraded: std::time::Duration::from_secs(5),
        };
    }
}

pub struct Scheduler {
    intervals: Intervals,
    state: PollState,
    display_state: DisplayState,
}

impl Scheduler {
    pub fn new(intervals: Intervals) -> Scheduler {
        return Scheduler {
            intervals: intervals,
            state: PollState::Degraded,
            display_state: DisplayState::Waiting,
        };
    }

    pub fn state(&self) -> PollState {
        return self.state;
    }

    pub fn display_state(&self) -> &DisplayState {
        return &self.display_state;
    }

    pub fn interval(&self) -> std::time::Duration {
        match self.state {
            PollState::Normal => return self.intervals.normal,
            PollState::Degraded => return self.intervals.degraded,
        }
    }

    /// Draws whatever the scheduler currently holds, i.e. the waiting
    /// message before the first poll.
    pub fn show(&self, screen: &mut dyn display::Screen) {
        let rendered = match self.display_state {
            DisplayState::Waiting => screen.render_placeholder(),
            DisplayState::Arrivals(ref arrivals) => screen.render(arrivals),
        };
        if let Err(err) = rendered {
            error!("Display error: {:?}", err);
        }
    }

    pub fn poll(&mut self, feed: &dyn arrivals::ArrivalFeed, screen: &mut dyn display::Screen) {
        let arrivals = feed.arrivals();
        let previous = self.state;

        if arrivals.is_empty() {
            self.state = PollState::Degraded;
            self.display_state = DisplayState::Waiting;
        } else {
            self.state = PollState::Normal;
            self.display_state = DisplayState::Arrivals(arrivals);
        }

        if previous != self.state {
            info!("Poll state {:?} -> {:?}, next poll in {:?}", previous, self.state, self.interval());
        }
        self.show(screen);
    }

    pub fn run(&mut self, feed: &dyn arrivals::ArrivalFeed, screen: &mut dyn display::Screen) -> ! {
        self.show(screen);
        loop {
            self.poll(feed, screen);
            std::thread::sleep(self.interval());
        }
    }
}
