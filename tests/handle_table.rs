use tactus::source::Mailbox;
use tactus::wait::PollingProvider;
use tactus::{Context, Executor, ExecutorBuilder, ExecutorError, Invocation};

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

fn executor(context: &Arc<Context>, capacity: usize) -> Executor<PollingProvider> {
    Executor::new(PollingProvider::new(), context, capacity)
        .expect("executor construction should succeed")
}

#[test]
fn test_zero_capacity_is_rejected() {
    let context = Arc::new(Context::new());
    let result = Executor::new(PollingProvider::new(), &context, 0);

    assert!(
        matches!(result, Err(ExecutorError::InvalidArgument(_))),
        "A zero-capacity handle table should be rejected at construction"
    );
}

#[test]
fn test_registration_fails_past_capacity() {
    let context = Arc::new(Context::new());
    let mut executor = executor(&context, 3);

    for _ in 0..3 {
        let mailbox = Arc::new(Mailbox::<u32>::new());
        executor
            .add_subscription(mailbox, 0, |_| {}, Invocation::OnNewData)
            .expect("registration within capacity should succeed");
    }

    let overflow = Arc::new(Mailbox::<u32>::new());
    let result = executor.add_subscription(overflow, 0, |_| {}, Invocation::OnNewData);

    assert!(
        matches!(result, Err(ExecutorError::CapacityExceeded { max_handles: 3 })),
        "The fourth registration into a table of three should be rejected"
    );
}

#[test]
fn test_rejected_registration_leaves_prior_state_intact() {
    let context = Arc::new(Context::new());
    let mut executor = executor(&context, 1);

    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = received.clone();

    let mailbox = Arc::new(Mailbox::<u32>::new());
    executor
        .add_subscription(
            mailbox.clone(),
            0,
            move |n| sink.borrow_mut().push(*n),
            Invocation::OnNewData,
        )
        .expect("first registration should succeed");

    let overflow = Arc::new(Mailbox::<u32>::new());
    assert!(
        executor
            .add_subscription(overflow, 0, |_| {}, Invocation::OnNewData)
            .is_err(),
        "Registration past capacity should fail"
    );

    mailbox.publish(7);
    executor
        .spin_some(Duration::from_millis(50))
        .expect("round after a rejected registration should still run");

    assert_eq!(
        *received.borrow(),
        vec![7],
        "The surviving handle should still receive data"
    );
}

#[test]
fn test_fini_is_idempotent() {
    let context = Arc::new(Context::new());
    let mut executor = executor(&context, 2);

    let mailbox = Arc::new(Mailbox::<u32>::new());
    executor
        .add_subscription(mailbox, 0, |_| {}, Invocation::OnNewData)
        .expect("registration should succeed");

    executor.fini();
    executor.fini();

    let late = Arc::new(Mailbox::<u32>::new());
    let result = executor.add_subscription(late, 0, |_| {}, Invocation::OnNewData);

    assert!(
        matches!(result, Err(ExecutorError::CapacityExceeded { max_handles: 0 })),
        "A finalized executor should hold no capacity"
    );
}

#[test]
fn test_fini_on_fresh_executor_is_a_no_op() {
    let context = Arc::new(Context::new());
    let mut executor = executor(&context, 2);

    executor.fini();
}

#[test]
fn test_builder_configures_timeout() {
    let context = Arc::new(Context::new());
    let executor = ExecutorBuilder::new(PollingProvider::new(), 2)
        .timeout(Duration::from_millis(5))
        .build(&context)
        .expect("builder with valid capacity should succeed");

    assert_eq!(
        executor.timeout(),
        Duration::from_millis(5),
        "The configured timeout should be retained"
    );
}

#[test]
fn test_builder_rejects_zero_capacity() {
    let context = Arc::new(Context::new());
    let result = ExecutorBuilder::new(PollingProvider::new(), 0).build(&context);

    assert!(
        matches!(result, Err(ExecutorError::InvalidArgument(_))),
        "The builder should reject a zero-capacity table"
    );
}
