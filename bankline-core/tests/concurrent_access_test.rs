//! Concurrent access tests
//!
//! These verify that shared accounts keep money conserved and never
//! deadlock when many threads transfer between them in both directions.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use bankline_core::services::{transfer_shared, SharedAccount};
use bankline_core::{Account, EventLog, Source};

/// Number of concurrent threads for stress tests
const THREAD_COUNT: usize = 6;

/// Number of iterations per thread
const ITERATIONS_PER_THREAD: usize = 200;

fn total(accounts: &[SharedAccount]) -> Decimal {
    accounts
        .iter()
        .filter_map(|a| a.balance().unwrap())
        .sum()
}

/// Threads transfer in opposite directions around a ring of accounts.
/// Lock ordering by account id must prevent deadlock, and every
/// successful transfer moves money without creating or destroying it.
#[test]
fn test_opposing_transfers_conserve_total() {
    let accounts: Vec<SharedAccount> = ["Manuel", "Valencia", "Ana", "Luis"]
        .iter()
        .map(|owner| SharedAccount::new(Account::new(*owner, dec!(1000.50))))
        .collect();
    let opening = total(&accounts);

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let success_count = Arc::new(AtomicUsize::new(0));
    let rejected_count = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];

    for thread_id in 0..THREAD_COUNT {
        let accounts = accounts.clone();
        let barrier = Arc::clone(&barrier);
        let success_count = Arc::clone(&success_count);
        let rejected_count = Arc::clone(&rejected_count);

        let handle = thread::spawn(move || {
            barrier.wait();

            let len = accounts.len();
            for i in 0..ITERATIONS_PER_THREAD {
                let from = (thread_id + i) % len;
                // Even threads go clockwise, odd threads counter-clockwise
                let to = if thread_id % 2 == 0 {
                    (from + 1) % len
                } else {
                    (from + len - 1) % len
                };
                let amount = Decimal::new((i as i64 % 7 + 1) * 125, 2);

                match transfer_shared(&accounts[from], &accounts[to], amount) {
                    Ok(()) => {
                        success_count.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        assert!(e.is_insufficient_funds(), "unexpected error: {}", e);
                        rejected_count.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let successes = success_count.load(Ordering::SeqCst);
    let rejected = rejected_count.load(Ordering::SeqCst);
    println!("Transfers: {} ok, {} rejected", successes, rejected);

    assert_eq!(successes + rejected, THREAD_COUNT * ITERATIONS_PER_THREAD);
    assert_eq!(total(&accounts), opening);
    for account in &accounts {
        assert!(account.balance().unwrap().unwrap() >= Decimal::ZERO);
    }
}

/// Concurrent debits against one account never overdraw it
#[test]
fn test_concurrent_debits_never_overdraw() {
    let account = SharedAccount::new(Account::new("Manuel", dec!(100)));
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let success_count = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let account = account.clone();
            let barrier = Arc::clone(&barrier);
            let success_count = Arc::clone(&success_count);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..10 {
                    if account.debit(dec!(3)).is_ok() {
                        success_count.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // 100 / 3 = 33 debits fit, 60 were attempted
    assert_eq!(success_count.load(Ordering::SeqCst), 33);
    assert_eq!(account.balance().unwrap(), Some(dec!(1)));
}

/// Several threads recording into one event log
#[test]
fn test_concurrent_event_recording() {
    let temp_dir = TempDir::new().unwrap();
    let log = Arc::new(EventLog::open(temp_dir.path(), Source::Library, "test").unwrap());
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let log = Arc::clone(&log);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..5 {
                    if i % 2 == 0 {
                        log.record_ok(&format!("run_t{}", thread_id)).unwrap();
                    } else {
                        log.record_failure("debit", "Insufficient Funds").unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = log.summary().unwrap();
    assert_eq!(summary.total, (THREAD_COUNT * 5) as u64);
    assert_eq!(summary.failed, (THREAD_COUNT * 2) as u64);

    // Sequence numbers stay unique under contention
    let mut seqs: Vec<i64> = log.recent(100, false).unwrap().iter().map(|e| e.seq).collect();
    seqs.dedup();
    assert_eq!(seqs.len(), THREAD_COUNT * 5);
}
