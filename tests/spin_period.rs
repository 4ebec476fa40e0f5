use tactus::source::PeriodicTimer;
use tactus::wait::PollingProvider;
use tactus::{Context, Executor, ExecutorBuilder, Invocation};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

fn fast_executor(context: &Arc<Context>, capacity: usize) -> Executor<PollingProvider> {
    ExecutorBuilder::new(PollingProvider::new(), capacity)
        .timeout(Duration::ZERO)
        .build(context)
        .expect("executor construction should succeed")
}

#[test]
fn test_period_driver_sleeps_the_remainder() {
    let context = Arc::new(Context::new());
    let mut executor = fast_executor(&context, 1);

    let period = Duration::from_millis(50);

    let start = Instant::now();
    for _ in 0..3 {
        executor
            .spin_one_period(period)
            .expect("period iteration should succeed");
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed >= period * 3,
        "Three instantaneous rounds should still span three periods, got {elapsed:?}"
    );
    assert!(
        elapsed < period * 3 + Duration::from_millis(60),
        "The driver should sleep only the remainder of each period, got {elapsed:?}"
    );
}

#[test]
fn test_period_boundaries_do_not_drift() {
    let context = Arc::new(Context::new());
    let mut executor = fast_executor(&context, 1);

    let period = Duration::from_millis(30);

    let start = Instant::now();
    executor
        .spin_one_period(period)
        .expect("period iteration should succeed");

    // Perturb one iteration: the driver must re-align to the boundary
    // grid, not to the late wake-up.
    thread::sleep(Duration::from_millis(20));

    for _ in 0..3 {
        executor
            .spin_one_period(period)
            .expect("period iteration should succeed");
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed >= period * 4,
        "Four periods should have passed, got {elapsed:?}"
    );
    assert!(
        elapsed < period * 4 + Duration::from_millis(60),
        "The injected delay must not accumulate into later periods, got {elapsed:?}"
    );
}

#[test]
fn test_overrunning_rounds_run_back_to_back() {
    let context = Arc::new(Context::new());
    let mut executor = ExecutorBuilder::new(PollingProvider::new(), 1)
        // Every round blocks for the full 40 ms wait: nothing is ready.
        .timeout(Duration::from_millis(40))
        .build(&context)
        .expect("executor construction should succeed");

    let period = Duration::from_millis(10);

    let start = Instant::now();
    for _ in 0..3 {
        executor
            .spin_one_period(period)
            .expect("period iteration should succeed");
    }
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(120),
        "Each round blocks for its wait timeout, got {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_millis(120 + 40),
        "Overrunning rounds should not sleep on top of the overrun, got {elapsed:?}"
    );
}

#[test]
fn test_spin_period_stops_on_shutdown() {
    let context = Arc::new(Context::new());
    let mut executor = fast_executor(&context, 1);

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();
    let timer = Arc::new(PeriodicTimer::new(Duration::from_millis(10), move || {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    executor
        .add_timer(timer, Invocation::OnNewData)
        .expect("registration should succeed");

    let ctx = context.clone();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        ctx.shutdown();
    });

    executor.spin_period(Duration::from_millis(10));

    stopper.join().expect("stopper thread should not panic");
    assert!(
        ticks.load(Ordering::Relaxed) >= 2,
        "The timer should have fired several times before shutdown"
    );
}

#[test]
fn test_spin_stops_on_shutdown() {
    let context = Arc::new(Context::new());
    let mut executor = ExecutorBuilder::new(PollingProvider::new(), 1)
        .timeout(Duration::from_millis(5))
        .build(&context)
        .expect("executor construction should succeed");

    let ctx = context.clone();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(40));
        ctx.shutdown();
    });

    executor.spin().expect("spin should end cleanly on shutdown");

    stopper.join().expect("stopper thread should not panic");
}
