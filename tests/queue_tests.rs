//! Symbol Queue Tests
//!
//! Ring semantics: wrap-around writes, independent combinational reads,
//! and the documented undefined-until-first-full-cycle default.

use afsk_frontend::config::MAX_SYMBOL_SLOTS;
use afsk_frontend::dsp::SymbolQueue;
use afsk_frontend::error::FrontEndError;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_capacity_validation() {
    assert_eq!(
        SymbolQueue::new(0).unwrap_err(),
        FrontEndError::QueueCapacity(0)
    );
    assert_eq!(
        SymbolQueue::new(MAX_SYMBOL_SLOTS + 1).unwrap_err(),
        FrontEndError::QueueCapacity(MAX_SYMBOL_SLOTS + 1)
    );
    assert_eq!(SymbolQueue::new(8).unwrap().capacity(), 8);
}

// =============================================================================
// Ring Semantics
// =============================================================================

#[test]
fn test_k_writes_fill_in_order() {
    // After K writes to a K-slot queue, index i holds the (i+1)-th value.
    let k = 8;
    let mut q = SymbolQueue::new(k).unwrap();
    for v in 0..k as i16 {
        q.clock(true, (v + 1) * 10);
    }
    for i in 0..k {
        assert_eq!(q.read(i), (i as i16 + 1) * 10, "slot {i}");
    }
}

#[test]
fn test_k_plus_one_writes_overwrite_slot_zero() {
    let k = 8;
    let mut q = SymbolQueue::new(k).unwrap();
    for v in 0..=k as i16 {
        q.clock(true, (v + 1) * 10);
    }
    assert_eq!(q.read(0), (k as i16 + 1) * 10);
    // The rest of the ring is untouched.
    for i in 1..k {
        assert_eq!(q.read(i), (i as i16 + 1) * 10, "slot {i}");
    }
}

#[test]
fn test_invalid_ticks_do_not_write() {
    let mut q = SymbolQueue::new(4).unwrap();
    q.clock(true, 42);
    for _ in 0..10 {
        q.clock(false, 99);
    }
    assert_eq!(q.read(0), 42);
    assert_eq!(q.writes(), 1);
    // The cursor did not move either: the next write lands in slot 1.
    q.clock(true, 43);
    assert_eq!(q.read(1), 43);
}

#[test]
fn test_reads_are_independent_of_writes() {
    let mut q = SymbolQueue::new(4).unwrap();
    for v in [5, 6, 7, 8] {
        q.clock(true, v);
    }
    // Any index is readable at any time, wrapped to the capacity.
    assert_eq!(q.read(2), 7);
    assert_eq!(q.read(6), 7);
    assert_eq!(q.read(401), 6);
}

// =============================================================================
// Defaults and Reset
// =============================================================================

#[test]
fn test_unwritten_slots_read_the_default() {
    // Reads before the first full cycle return the slot default. Accepted
    // steady-state behavior, not a fault.
    let mut q = SymbolQueue::new(4).unwrap();
    q.clock(true, -7);
    assert_eq!(q.read(0), -7);
    for i in 1..4 {
        assert_eq!(q.read(i), 0, "unwritten slot {i}");
    }
}

#[test]
fn test_reset_restores_defaults_and_cursor() {
    let mut q = SymbolQueue::new(4).unwrap();
    for v in [1, 2, 3] {
        q.clock(true, v);
    }
    q.reset();
    assert_eq!(q.writes(), 0);
    for i in 0..4 {
        assert_eq!(q.read(i), 0);
    }
    q.clock(true, 9);
    assert_eq!(q.read(0), 9, "cursor restarts at slot zero");
}
