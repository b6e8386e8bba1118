//! Per-passenger timing record and lifecycle stage.

use ap_core::{PassengerId, ScannerId, SimTime};

/// Where a passenger is in the two-stage pipeline.
///
/// ```text
/// Arrived → AwaitingChecker → InCheck → AwaitingScanner(s) → InScan(s) → Done
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Arrived,
    AwaitingChecker,
    InCheck,
    AwaitingScanner(ScannerId),
    InScan(ScannerId),
    Done,
}

impl Stage {
    /// Short label for logs and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Arrived => "arrived",
            Stage::AwaitingChecker => "awaiting_checker",
            Stage::InCheck => "in_check",
            Stage::AwaitingScanner(_) => "awaiting_scanner",
            Stage::InScan(_) => "in_scan",
            Stage::Done => "done",
        }
    }
}

/// Whether a passenger made it through before the run horizon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassengerStatus {
    Complete,
    /// Still in flight when the run stopped; frozen at this stage.
    Incomplete(Stage),
}

/// Timing record for one passenger in one run.
///
/// Fields are filled in as the passenger moves through the pipeline and are
/// never rewritten.  A passenger still in flight at the run horizon keeps
/// `exit_time == None` and is excluded from wait statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerRecord {
    pub id:                      PassengerId,
    pub arrival_time:            SimTime,
    pub check_start:             Option<SimTime>,
    pub boarding_check_duration: Option<f64>,
    /// Lane chosen by shortest-queue routing after the check.
    pub scanner:                 Option<ScannerId>,
    pub scan_start:              Option<SimTime>,
    pub scan_duration:           Option<f64>,
    pub exit_time:               Option<SimTime>,
    pub stage:                   Stage,
}

impl PassengerRecord {
    pub fn new(id: PassengerId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            check_start:             None,
            boarding_check_duration: None,
            scanner:                 None,
            scan_start:              None,
            scan_duration:           None,
            exit_time:               None,
            stage:                   Stage::Arrived,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.exit_time.is_some()
    }

    pub fn status(&self) -> PassengerStatus {
        if self.is_complete() {
            PassengerStatus::Complete
        } else {
            PassengerStatus::Incomplete(self.stage)
        }
    }

    /// Exit time minus arrival time, for completed passengers.
    pub fn total_time(&self) -> Option<f64> {
        self.exit_time.map(|exit| exit - self.arrival_time)
    }

    /// Time in the system not spent being served at either stage.
    pub fn wait_time(&self) -> Option<f64> {
        let total = self.total_time()?;
        Some(total - self.boarding_check_duration? - self.scan_duration?)
    }

    pub fn name(&self) -> String {
        self.id.name()
    }
}
