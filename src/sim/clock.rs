//! Clock domain bookkeeping
//!
//! Two domains drive the front-end: the primary system domain and a derived
//! domain clocked on the inversion of the decoder's serial clock. The
//! derived edge is never read from global state; the harness passes the
//! primary domain's post-evaluation clock level in explicitly and the
//! domain decides whether its own edge fires.

use tracing::trace;

/// A primary clock domain with its own reset line
///
/// Domains start in reset; registers belonging to a domain in reset are
/// forced to their reset values on every edge instead of committing.
#[derive(Clone, Debug)]
pub struct ClockDomain {
    name: &'static str,
    in_reset: bool,
    edges: u64,
}

impl ClockDomain {
    /// Create a domain, initially held in reset
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            in_reset: true,
            edges: 0,
        }
    }

    /// The domain name (diagnostics only)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the reset line is asserted
    #[must_use]
    pub const fn in_reset(&self) -> bool {
        self.in_reset
    }

    /// Assert the reset line
    pub fn assert_reset(&mut self) {
        self.in_reset = true;
    }

    /// Release the reset line
    pub fn release_reset(&mut self) {
        if self.in_reset {
            trace!(domain = self.name, edge = self.edges, "reset released");
        }
        self.in_reset = false;
    }

    /// Record one clock edge
    pub fn edge(&mut self) {
        self.edges += 1;
    }

    /// Number of edges seen since construction
    #[must_use]
    pub const fn edges(&self) -> u64 {
        self.edges
    }
}

/// A clock domain derived from another domain's signal
///
/// Models a device clocked on the complement of a source clock: the edge
/// fires when the inverted source level rises. The reset line mirrors the
/// primary domain's reset and is set by the harness.
#[derive(Clone, Debug)]
pub struct DerivedClock {
    name: &'static str,
    inverted_level: bool,
    in_reset: bool,
    edges: u64,
}

impl DerivedClock {
    /// Create a derived domain, initially held in reset
    ///
    /// The source clock is taken to be low at time zero, so the inverted
    /// level starts high and the first low-going source sample does not
    /// produce a spurious edge.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            inverted_level: true,
            in_reset: true,
            edges: 0,
        }
    }

    /// The domain name (diagnostics only)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the mirrored reset line is asserted
    #[must_use]
    pub const fn in_reset(&self) -> bool {
        self.in_reset
    }

    /// Mirror the primary domain's reset line
    pub fn set_reset(&mut self, asserted: bool) {
        self.in_reset = asserted;
    }

    /// Feed the source clock level after primary-domain evaluation
    ///
    /// Returns `true` when the inverted level rises, i.e. when this
    /// domain's registers must commit.
    pub fn sample(&mut self, source_level: bool) -> bool {
        let inverted = !source_level;
        let rising = inverted && !self.inverted_level;
        self.inverted_level = inverted;
        if rising {
            self.edges += 1;
        }
        rising
    }

    /// Number of edges seen since construction
    #[must_use]
    pub const fn edges(&self) -> u64 {
        self.edges
    }
}
