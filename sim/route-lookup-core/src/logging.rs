//! Logging holds wrapper functions for logging events.
//! Each function corresponds to a type of event (route insertion, block
//! allocation, session phases..). Nothing is recorded unless the application
//! installed a subscriber.

use tracing::{event, Level};

use crate::{
    fib::{BlockIndex, Route},
    session::Summary,
    Ipv4Address,
};

/// Route event handler.
/// Logged for every route written into the table.
pub(crate) fn route_event(route: &Route) {
    event!(target: "ROUTE", Level::DEBUG, prefix = %route.prefix(), interface = route.interface().get());
}

/// Aux block event handler.
/// Logged when a bucket is moved into a newly allocated aux block.
pub(crate) fn aux_block_event(bucket_of: Ipv4Address, block: BlockIndex) {
    event!(target: "AUX_BLOCK", Level::DEBUG, bucket = %Ipv4Address::from(bucket_of.to_u32() & 0xFFFF_FF00), block = block.get());
}

/// Logged when a route is shorter than one loaded before it. Where the two
/// overlap, the shorter route overwrites the longer one.
pub(crate) fn out_of_order_event(route: &Route, previous: u32) {
    event!(target: "ORDER", Level::WARN, route = %route, previous_prefix_len = previous, "route is less specific than an earlier one");
}

/// Phase boundary event handler.
pub(crate) fn phase_event(phase: &str, count: u64) {
    event!(target: "SESSION", Level::INFO, phase = phase, count = count);
}

pub(crate) fn summary_event(summary: &Summary) {
    event!(
        target: "SESSION",
        Level::INFO,
        queries = summary.total_queries,
        average_accesses = summary.average_accesses,
        average_elapsed_ns = summary.average_elapsed_ns,
        aux_blocks = summary.aux_blocks,
        table_bytes = summary.table_bytes,
    );
}
