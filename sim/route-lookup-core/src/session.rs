//! Drives a forwarding table through its two phases.
//!
//! A [`Session`] first loads every route from a route source, then answers
//! every address from a query source, timing each lookup and handing the
//! result to a [`Reporter`]. Sources are plain iterators: running out means
//! the phase is over, while an `Err` item is a malformed input and ends the
//! run.

use std::time::{Duration, Instant};

use crate::{
    fib::{ForwardingTable, Interface, Route},
    logging::{out_of_order_event, phase_event, summary_event},
    Ipv4Address, SessionError,
};

/// Settings for a [`Session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Refuse a route that is shorter than a route loaded before it,
    /// instead of only logging a warning.
    pub strict_order: bool,
}

/// One answered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRecord {
    pub address: Ipv4Address,
    pub interface: Interface,
    pub elapsed: Duration,
    pub accesses: u32,
}

/// Aggregate statistics of a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_queries: u64,
    pub average_accesses: f64,
    pub average_elapsed_ns: f64,
    pub routes_loaded: u64,
    pub aux_blocks: usize,
    pub table_bytes: usize,
}

/// Receives the results of a session.
pub trait Reporter {
    type Error;

    /// Called once per query, in query order.
    fn report_lookup(&mut self, record: &LookupRecord) -> Result<(), Self::Error>;

    /// Called once, after the last query.
    fn report_summary(&mut self, summary: &Summary) -> Result<(), Self::Error>;
}

/// Running totals over the query phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    queries: u64,
    accesses: u64,
    elapsed: Duration,
}

impl Totals {
    fn record(&mut self, record: &LookupRecord) {
        self.queries += 1;
        self.accesses += u64::from(record.accesses);
        self.elapsed += record.elapsed;
    }

    /// Averages are 0 when there were no queries.
    fn averages(&self) -> (f64, f64) {
        if self.queries == 0 {
            return (0.0, 0.0);
        }
        let queries = self.queries as f64;
        (
            self.accesses as f64 / queries,
            self.elapsed.as_nanos() as f64 / queries,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Building,
    Querying,
}

/// Owns the forwarding table and the statistics gathered over it.
#[derive(Debug)]
pub struct Session {
    table: ForwardingTable,
    config: SessionConfig,
    phase: Phase,
    routes_loaded: u64,
    longest_prefix: Option<u32>,
    totals: Totals,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            table: ForwardingTable::new(),
            config,
            phase: Phase::Building,
            routes_loaded: 0,
            longest_prefix: None,
            totals: Totals::default(),
        }
    }

    pub fn table(&self) -> &ForwardingTable {
        &self.table
    }

    pub fn routes_loaded(&self) -> u64 {
        self.routes_loaded
    }

    /// Inserts every route `routes` yields, in order.
    ///
    /// Stops at the first `Err` item, returning it, or at the first route
    /// the table refuses. Routes inserted before the failure stay in the
    /// table and are counted. Returns the number of routes loaded by this
    /// call.
    pub fn load_routes<I, E>(&mut self, routes: I) -> Result<u64, E>
    where
        I: IntoIterator<Item = Result<Route, E>>,
        E: From<SessionError>,
    {
        if self.phase != Phase::Building {
            return Err(SessionError::RoutesAfterQueries.into());
        }

        let mut loaded = 0;
        for route in routes {
            let route = route?;
            self.check_order(&route)?;
            self.table
                .add_route(&route)
                .map_err(|source| SessionError::Insert { route, source })?;
            self.routes_loaded += 1;
            loaded += 1;
        }

        phase_event("routes loaded", loaded);
        Ok(loaded)
    }

    fn check_order(&mut self, route: &Route) -> Result<(), SessionError> {
        let len = route.prefix_len();
        match self.longest_prefix {
            Some(previous) if len < previous => {
                if self.config.strict_order {
                    return Err(SessionError::OutOfOrder {
                        route: *route,
                        previous,
                    });
                }
                out_of_order_event(route, previous);
            }
            _ => self.longest_prefix = Some(len),
        }
        Ok(())
    }

    /// Resolves every address `queries` yields and reports each lookup.
    ///
    /// Once this has been called no more routes can be loaded. Returns the
    /// number of queries answered by this call.
    pub fn run_queries<I, R, E>(&mut self, queries: I, reporter: &mut R) -> Result<u64, E>
    where
        I: IntoIterator<Item = Result<Ipv4Address, E>>,
        R: Reporter,
        E: From<R::Error>,
    {
        self.phase = Phase::Querying;

        let before = self.totals.queries;
        for address in queries {
            let address = address?;

            let start = Instant::now();
            let resolution = self.table.resolve(address);
            let elapsed = start.elapsed();

            let record = LookupRecord {
                address,
                interface: resolution.interface,
                elapsed,
                accesses: resolution.accesses,
            };
            self.totals.record(&record);
            reporter.report_lookup(&record)?;
        }

        let answered = self.totals.queries - before;
        phase_event("queries answered", answered);
        Ok(answered)
    }

    /// Computes the summary without ending the session.
    pub fn summary(&self) -> Summary {
        let (average_accesses, average_elapsed_ns) = self.totals.averages();
        Summary {
            total_queries: self.totals.queries,
            average_accesses,
            average_elapsed_ns,
            routes_loaded: self.routes_loaded,
            aux_blocks: self.table.block_count(),
            table_bytes: self.table.memory_footprint(),
        }
    }

    /// Hands the summary to `reporter` and releases the table.
    pub fn finish<R: Reporter>(self, reporter: &mut R) -> Result<Summary, R::Error> {
        let summary = self.summary();
        summary_event(&summary);
        reporter.report_summary(&summary)?;
        Ok(summary)
    }

    /// Runs a whole session: loads `routes`, answers `queries` and reports
    /// the summary.
    pub fn run<Rt, Q, R, E>(
        config: SessionConfig,
        routes: Rt,
        queries: Q,
        reporter: &mut R,
    ) -> Result<Summary, E>
    where
        Rt: IntoIterator<Item = Result<Route, E>>,
        Q: IntoIterator<Item = Result<Ipv4Address, E>>,
        R: Reporter,
        E: From<SessionError> + From<R::Error>,
    {
        let mut session = Session::new(config);
        session.load_routes(routes)?;
        session.run_queries(queries, reporter)?;
        Ok(session.finish(reporter)?)
    }
}
