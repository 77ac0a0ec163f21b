//! Integration tests for once, memoize and delay under concurrent callers

use crossbeam_channel::unbounded;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use underbar::{
    delay, delay_on, memoize, memoize_recursive, once, Scheduler, SchedulerConfig, UtilError,
};

const THREADS: usize = 8;

#[test]
fn test_once_three_calls_one_execution() {
    let runs = AtomicUsize::new(0);
    let init = once(|_: ()| {
        runs.fetch_add(1, Ordering::SeqCst);
        "ready".to_string()
    });
    let results: Vec<String> = (0..3).map(|_| init.call(())).collect();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| r == "ready"));
}

#[test]
fn test_once_concurrent_first_calls() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let init = Arc::new(once(move |id: usize| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        id
    }));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let init = Arc::clone(&init);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                init.call(id)
            })
        })
        .collect();
    let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|&r| r == results[0]));
}

#[test]
fn test_memoize_same_argument_runs_body_once() {
    let runs = AtomicUsize::new(0);
    let slow_double = memoize(|n: &u32| {
        runs.fetch_add(1, Ordering::SeqCst);
        n * 2
    });
    assert_eq!(slow_double.call(21), 42);
    assert_eq!(slow_double.call(21), 42);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_memoize_concurrent_callers_share_one_computation() {
    let runs = AtomicUsize::new(0);
    let square = memoize(|n: &u64| {
        runs.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        n * n
    });
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                barrier.wait();
                assert_eq!(square.call(12), 144);
            });
        }
    });

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(square.len(), 1);
}

#[test]
fn test_memoize_recursive_across_threads() {
    let fib = memoize_recursive(|recurse: &dyn Fn(u64) -> u128, n: &u64| {
        if *n < 2 {
            *n as u128
        } else {
            recurse(n - 1) + recurse(n - 2)
        }
    });
    thread::scope(|scope| {
        for k in [60u64, 70, 90] {
            let fib = &fib;
            scope.spawn(move || fib.call(k));
        }
    });
    assert_eq!(fib.call(90), 2_880_067_194_370_816_120);
}

#[test]
fn test_delay_runs_later_without_blocking() {
    let (tx, rx) = unbounded();
    let start = Instant::now();
    delay(
        move |msg: &'static str| {
            let _ = tx.send((msg, Instant::now()));
        },
        Duration::from_millis(40),
        "done",
    )
    .unwrap();
    assert!(start.elapsed() < Duration::from_millis(40));

    let (msg, fired_at) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(msg, "done");
    assert!(fired_at.duration_since(start) >= Duration::from_millis(40));
}

#[test]
fn test_delay_cancel_handle() {
    let config = SchedulerConfig {
        thread_name: "delay-test".to_string(),
        max_pending: 0,
    };
    let scheduler = Scheduler::from_config(&config).unwrap();
    let (tx, rx) = unbounded::<u8>();
    let send = move |v: u8| {
        let _ = tx.send(v);
    };
    let keep = delay_on(&scheduler, send.clone(), Duration::from_millis(30), 1).unwrap();
    let dropped = delay_on(&scheduler, send, Duration::from_millis(10), 2).unwrap();
    assert!(dropped.cancel());

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
    assert!(keep.has_fired());
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn test_delay_rejects_unrepresentable_wait() {
    let err = delay(|_: ()| {}, Duration::MAX, ()).unwrap_err();
    assert!(matches!(err, UtilError::InvalidArgument { op: "delay", .. }));
}

#[test]
fn test_cancelled_delay_frees_capacity() {
    let config = SchedulerConfig {
        max_pending: 1,
        ..SchedulerConfig::default()
    };
    let scheduler = Scheduler::from_config(&config).unwrap();
    let parked = delay_on(&scheduler, |_: ()| {}, Duration::from_secs(60), ()).unwrap();
    assert!(parked.cancel());

    let (tx, rx) = unbounded();
    delay_on(
        &scheduler,
        move |v: u8| {
            let _ = tx.send(v);
        },
        Duration::from_millis(1),
        9,
    )
    .unwrap();
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 9);
}
