//! Combinational dependency graph
//!
//! The harness declares every combinational block together with the wires
//! it reads and writes, then asks for an evaluation schedule. Scheduling is
//! a topological sort: a block runs after every block driving one of its
//! inputs. A dependency cycle, or a wire with two drivers, is reported as a
//! construction error before the first tick — it is never a runtime panic.

use crate::error::{FrontEndError, Result};

/// Handle to a declared wire
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireId(usize);

/// Handle to a declared combinational block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockId(pub usize);

#[derive(Debug)]
struct Block {
    name: &'static str,
    reads: Vec<WireId>,
    writes: Vec<WireId>,
}

/// Declared wires and blocks awaiting scheduling
#[derive(Debug, Default)]
pub struct CombGraph {
    wire_names: Vec<&'static str>,
    blocks: Vec<Block>,
}

impl CombGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a wire
    pub fn wire(&mut self, name: &'static str) -> WireId {
        self.wire_names.push(name);
        WireId(self.wire_names.len() - 1)
    }

    /// Declare a combinational block with its read and write sets
    pub fn block(&mut self, name: &'static str, reads: &[WireId], writes: &[WireId]) -> BlockId {
        self.blocks.push(Block {
            name,
            reads: reads.to_vec(),
            writes: writes.to_vec(),
        });
        BlockId(self.blocks.len() - 1)
    }

    /// Compute the evaluation order
    ///
    /// # Errors
    ///
    /// [`FrontEndError::MultipleDrivers`] if two blocks write one wire,
    /// [`FrontEndError::CombinationalCycle`] if the blocks cannot be
    /// ordered.
    pub fn schedule(&self) -> Result<Vec<BlockId>> {
        // Map each wire to its single driver.
        let mut driver: Vec<Option<usize>> = vec![None; self.wire_names.len()];
        for (b, block) in self.blocks.iter().enumerate() {
            for w in &block.writes {
                if driver[w.0].replace(b).is_some() {
                    return Err(FrontEndError::MultipleDrivers(self.wire_names[w.0]));
                }
            }
        }

        // Kahn's algorithm over block-to-block edges.
        let n = self.blocks.len();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        for (b, block) in self.blocks.iter().enumerate() {
            for r in &block.reads {
                if let Some(d) = driver[r.0] {
                    successors[d].push(b);
                    in_degree[b] += 1;
                }
            }
        }

        let mut ready: Vec<usize> = (0..n).filter(|&b| in_degree[b] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(b) = ready.pop() {
            order.push(BlockId(b));
            for &s in &successors[b] {
                in_degree[s] -= 1;
                if in_degree[s] == 0 {
                    ready.push(s);
                }
            }
        }

        if order.len() < n {
            // Any block left with inputs pending sits on a cycle.
            let stuck = (0..n)
                .find(|&b| in_degree[b] > 0)
                .map_or("<unknown>", |b| self.blocks[b].name);
            return Err(FrontEndError::CombinationalCycle(stuck));
        }
        Ok(order)
    }
}
