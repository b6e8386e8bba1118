//! The `Sim` struct and its event loop.

use ap_core::{AirportConfig, ConfigError, PassengerId, RunId, ScannerId, SimTime};
use ap_queue::{Grant, ResourcePool, Scheduler, shortest_queue};
use tracing::{debug, trace};

use crate::{
    ArrivalGenerator, PassengerRecord, RunOutcome, RunSummary, ServiceTimes, SimError, SimEvent,
    SimObserver, SimResult, Stage,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One bounded-duration run of the checkpoint.
///
/// `Sim` owns everything the run touches: the scheduler, the run's RNG, the
/// checker pool, one single-lane pool per scanner, and the record arena.
/// Every passenger is a small state machine (its [`Stage`]) advanced by
/// [`SimEvent`]s:
///
/// 1. **Arrival**: draw the next gap and schedule the next arrival, then
///    create the record and request a checker.
/// 2. **CheckerGranted**: start the check; schedule `CheckDone` after an
///    exponential service time.
/// 3. **CheckDone**: release the checker (the slot passes to the next
///    waiter), pick the scanner with the shortest queue, request it.
/// 4. **ScannerGranted**: start the scan; schedule `ScanDone` after a
///    uniform service time.
/// 5. **ScanDone**: release the scanner and record the exit time.
///
/// Grants always resume through a zero-delay event, so whoever released the
/// slot finishes its own step first.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Validated configuration for this run.
    pub config: AirportConfig,

    pub(crate) run:       RunId,
    pub(crate) rng:       ap_core::RunRng,
    pub(crate) scheduler: Scheduler<SimEvent>,
    pub(crate) checkers:  ResourcePool,
    pub(crate) scanners:  Vec<ResourcePool>,
    pub(crate) arrivals:  ArrivalGenerator,
    pub(crate) service:   ServiceTimes,

    /// Passenger records indexed by `PassengerId`.
    pub(crate) records: Vec<PassengerRecord>,

    /// Whether the first arrival has been scheduled.
    pub(crate) started: bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until `config.sim_time`, then call `observer.on_run_end`.
    ///
    /// Passengers still in flight at the horizon are left as they are.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        debug!(run = self.run.0, seed = self.rng.seed(), "run started");

        let horizon = SimTime(self.config.sim_time);
        self.run_until(horizon, observer)?;
        observer.on_run_end(self.scheduler.now(), &self.records);

        debug!(
            run = self.run.0,
            arrivals = self.arrivals.spawned(),
            completed = self.completed(),
            in_flight = self.in_flight(),
            "run finished"
        );
        Ok(())
    }

    /// Process every event strictly before `horizon`, then move the clock to
    /// `horizon`.  Ignores `config.sim_time`.
    ///
    /// May be called repeatedly with increasing horizons; useful for tests
    /// and incremental stepping.
    pub fn run_until<O: SimObserver>(&mut self, horizon: SimTime, observer: &mut O) -> SimResult<()> {
        if !self.started {
            self.started = true;
            let gap = self.arrivals.next_gap(&mut self.rng);
            self.scheduler.schedule_in(gap, SimEvent::Arrival)?;
        }

        while let Some((now, event)) = self.scheduler.pop_before(horizon) {
            self.handle(now, event, observer)?;
        }
        self.scheduler.advance_to(horizon);
        Ok(())
    }

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn run_id(&self) -> RunId {
        self.run
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// All passenger records so far, in arrival order.
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn checkers(&self) -> &ResourcePool {
        &self.checkers
    }

    pub fn scanners(&self) -> &[ResourcePool] {
        &self.scanners
    }

    /// Events waiting in the scheduler.
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    pub fn completed(&self) -> usize {
        self.records.iter().filter(|r| r.is_complete()).count()
    }

    /// Passengers that have arrived but not yet exited.
    pub fn in_flight(&self) -> usize {
        self.records.len() - self.completed()
    }

    /// Summary statistics for the records collected so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_records(self.run, self.rng.seed(), &self.records)
    }

    /// Consume the run, handing back its summary and records.
    pub fn into_outcome(self) -> RunOutcome {
        let summary = self.summary();
        RunOutcome {
            summary,
            records: self.records,
        }
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn handle<O: SimObserver>(&mut self, now: SimTime, event: SimEvent, observer: &mut O) -> SimResult<()> {
        match event {
            SimEvent::Arrival => self.on_arrival(now, observer),
            SimEvent::CheckerGranted(p) => self.on_checker_granted(now, p, observer),
            SimEvent::CheckDone(p) => self.on_check_done(now, p, observer),
            SimEvent::ScannerGranted(p, s) => self.on_scanner_granted(now, p, s, observer),
            SimEvent::ScanDone(p, s) => self.on_scan_done(now, p, s, observer),
        }
    }

    fn on_arrival<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        // The next gap is drawn before this passenger does anything.
        let gap = self.arrivals.next_gap(&mut self.rng);
        self.scheduler.schedule_in(gap, SimEvent::Arrival)?;

        let mut record = self.arrivals.spawn(now);
        let id = record.id;
        debug_assert_eq!(id.index(), self.records.len());
        record.stage = Stage::AwaitingChecker;
        self.records.push(record);
        observer.on_arrival(now, id);

        if self.checkers.request(id) == Grant::Granted {
            self.scheduler.schedule_in(0.0, SimEvent::CheckerGranted(id))?;
        }
        Ok(())
    }

    fn on_checker_granted<O: SimObserver>(
        &mut self,
        now:      SimTime,
        id:       PassengerId,
        observer: &mut O,
    ) -> SimResult<()> {
        let record = record_mut(&mut self.records, id)?;
        expect_stage(record, Stage::AwaitingChecker, SimEvent::CheckerGranted(id))?;
        record.stage = Stage::InCheck;
        record.check_start = Some(now);

        let service = self.service.check_time(&mut self.rng);
        self.scheduler.schedule_in(service, SimEvent::CheckDone(id))?;
        observer.on_check_start(now, id);
        Ok(())
    }

    fn on_check_done<O: SimObserver>(
        &mut self,
        now:      SimTime,
        id:       PassengerId,
        observer: &mut O,
    ) -> SimResult<()> {
        let record = record_mut(&mut self.records, id)?;
        expect_stage(record, Stage::InCheck, SimEvent::CheckDone(id))?;
        let start = started_at(record, record.check_start, SimEvent::CheckDone(id))?;
        record.boarding_check_duration = Some(now - start);

        if let Some(next) = self.checkers.release()? {
            self.scheduler.schedule_in(0.0, SimEvent::CheckerGranted(next))?;
        }
        observer.on_check_end(now, id);

        // Snapshot of waiting-line lengths, taken once.
        let lane = shortest_queue(self.scanners.iter().map(ResourcePool::queue_len))
            .ok_or(ConfigError::ZeroCount { field: "num_scanners" })?;
        let scanner = ScannerId(lane as u32);

        let record = record_mut(&mut self.records, id)?;
        record.scanner = Some(scanner);
        record.stage = Stage::AwaitingScanner(scanner);

        if self.scanners[lane].request(id) == Grant::Granted {
            self.scheduler.schedule_in(0.0, SimEvent::ScannerGranted(id, scanner))?;
        }
        Ok(())
    }

    fn on_scanner_granted<O: SimObserver>(
        &mut self,
        now:      SimTime,
        id:       PassengerId,
        scanner:  ScannerId,
        observer: &mut O,
    ) -> SimResult<()> {
        let record = record_mut(&mut self.records, id)?;
        expect_stage(record, Stage::AwaitingScanner(scanner), SimEvent::ScannerGranted(id, scanner))?;
        record.stage = Stage::InScan(scanner);
        record.scan_start = Some(now);

        let service = self.service.scan_time(&mut self.rng);
        self.scheduler.schedule_in(service, SimEvent::ScanDone(id, scanner))?;
        observer.on_scan_start(now, id, scanner);
        Ok(())
    }

    fn on_scan_done<O: SimObserver>(
        &mut self,
        now:      SimTime,
        id:       PassengerId,
        scanner:  ScannerId,
        observer: &mut O,
    ) -> SimResult<()> {
        let record = record_mut(&mut self.records, id)?;
        expect_stage(record, Stage::InScan(scanner), SimEvent::ScanDone(id, scanner))?;
        let start = started_at(record, record.scan_start, SimEvent::ScanDone(id, scanner))?;
        record.scan_duration = Some(now - start);
        record.exit_time = Some(now);
        record.stage = Stage::Done;
        trace!(passenger = id.0, scanner = scanner.0, exit = now.0, "passenger exited");

        let lane = self
            .scanners
            .get_mut(scanner.index())
            .ok_or(SimError::UnknownScanner(scanner))?;
        if let Some(next) = lane.release()? {
            self.scheduler.schedule_in(0.0, SimEvent::ScannerGranted(next, scanner))?;
        }
        observer.on_scan_end(now, id, scanner);
        Ok(())
    }
}

// ── Record helpers ────────────────────────────────────────────────────────────

fn record_mut(records: &mut [PassengerRecord], id: PassengerId) -> SimResult<&mut PassengerRecord> {
    records
        .get_mut(id.index())
        .ok_or(SimError::UnknownPassenger(id))
}

fn expect_stage(record: &PassengerRecord, expected: Stage, event: SimEvent) -> SimResult<()> {
    if record.stage != expected {
        return Err(SimError::UnexpectedStage {
            passenger: record.id,
            stage:     record.stage,
            event:     event.label(),
        });
    }
    Ok(())
}

/// Start time of the stage being completed; always set when the stage matched.
fn started_at(
    record: &PassengerRecord,
    start:  Option<SimTime>,
    event:  SimEvent,
) -> SimResult<SimTime> {
    start.ok_or(SimError::UnexpectedStage {
        passenger: record.id,
        stage:     record.stage,
        event:     event.label(),
    })
}
