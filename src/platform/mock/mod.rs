//! Mock platform implementations for host testing
//!
//! These doubles let every driver in the crate run on the host: `MockPulse`
//! replays a scripted sequence of pulse widths, `MockTimer` keeps a virtual
//! clock, `MockGpio` and `MockAdc` track pin and channel state for
//! verification.

mod adc;
mod gpio;
mod pulse;
mod timer;

pub use adc::MockAdc;
pub use gpio::MockGpio;
pub use pulse::MockPulse;
pub use timer::MockTimer;

/// Simple blocking executor for driving async drivers in host tests
///
/// The mock futures never actually suspend, so polling in a tight loop with a
/// no-op waker is sufficient.
pub fn block_on<F: core::future::Future>(fut: F) -> F::Output {
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        const VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut fut = core::pin::pin!(fut);

    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => continue,
        }
    }
}
