//! IRM-3636 infrared receiver with NEC decoding
//!
//! The receiver demodulates the 38 kHz carrier and presents the NEC stream
//! as plain logic levels: a 9 ms low leader mark, a 4.5 ms high leader
//! space, then 32 bit cells. Every cell is a fixed-width low mark followed
//! by a high space whose width encodes the bit (short = 0, long = 1). There
//! is no clock line; the decoder recovers everything from edge timings.
//!
//! Decoding runs as a perpetual background task: once started it never
//! returns, delivering each completed 32-bit code to whichever observer is
//! currently registered. A rejected or absent transmission simply restarts
//! leader detection, so an idle line costs one timed-out measurement per
//! pass and nothing else.
//!
//! # Example (Pico 2 W)
//!
//! ```ignore
//! use embassy_rp::gpio::Flex;
//! use pico_sense::devices::irm3636;
//! use pico_sense::platform::rp2350::Rp2350PulseInput;
//!
//! fn on_code(code: u32) {
//!     // addr / command split per the NEC layout, if wanted
//! }
//!
//! #[embassy_executor::main]
//! async fn main(spawner: embassy_executor::Spawner) {
//!     let p = embassy_rp::init(Default::default());
//!     let pin = Rp2350PulseInput::new(Flex::new(p.PIN_15));
//!     irm3636::init(&spawner, pin).unwrap();
//!     irm3636::on_code_received(on_code);
//! }
//! ```

use crate::core::traits::SharedState;
use crate::platform::traits::{PinLevel, PulseInput};

/// Bound for every edge measurement within a frame
pub const EDGE_TIMEOUT_US: u32 = 100_000;

/// Minimum leader mark width; anything shorter is noise or a partial pulse
const LEADER_MARK_MIN_US: u32 = 8_000;

/// Minimum leader space width
const LEADER_SPACE_MIN_US: u32 = 4_000;

/// Bit spaces longer than this decode as 1
const BIT_ONE_MIN_US: u32 = 1_000;

/// Bits per NEC frame (address, address', command, command')
const FRAME_BITS: u32 = 32;

/// Observer invoked with each completed 32-bit code
pub type CodeCallback = fn(u32);

/// Decoder state shared between the background loop and the application
///
/// Holds the observer slot. Wrapped in a [`SharedState`] so registration and
/// dispatch never observe a half-replaced callback.
pub struct ReceiverState {
    callback: Option<CodeCallback>,
}

impl ReceiverState {
    /// Create an empty state with no observer registered
    pub const fn new() -> Self {
        Self { callback: None }
    }

    /// Replace the observer; the previous one receives nothing further
    pub fn set_callback(&mut self, callback: CodeCallback) {
        self.callback = Some(callback);
    }

    /// Currently registered observer, if any
    pub fn callback(&self) -> Option<CodeCallback> {
        self.callback
    }
}

impl Default for ReceiverState {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempt to decode one NEC frame from the pin
///
/// Returns the 32-bit code, or `None` when the attempt is rejected: leader
/// mark shorter than 8 ms, leader space shorter than 4 ms, or any edge
/// missing inside the data section. A missed edge aborts the whole frame
/// because resuming mid-frame would shift every remaining bit position;
/// detection restarts from the next leader instead.
pub async fn read_nec_frame<P: PulseInput>(pin: &mut P) -> Option<u32> {
    let mark = pin.pulse_in(PinLevel::Low, EDGE_TIMEOUT_US).await?;
    if mark < LEADER_MARK_MIN_US {
        return None;
    }
    let space = pin.pulse_in(PinLevel::High, EDGE_TIMEOUT_US).await?;
    if space < LEADER_SPACE_MIN_US {
        return None;
    }

    let mut code: u32 = 0;
    for _ in 0..FRAME_BITS {
        // The cell mark has fixed width; measuring it only advances the
        // stream to the space that carries the bit
        pin.pulse_in(PinLevel::Low, EDGE_TIMEOUT_US).await?;
        let space = pin.pulse_in(PinLevel::High, EDGE_TIMEOUT_US).await?;

        code <<= 1;
        if space > BIT_ONE_MIN_US {
            code |= 1;
        }
    }

    Some(code)
}

/// Run one decode attempt and dispatch the result
///
/// On a completed frame the observer slot is read under its guard and the
/// callback invoked outside it, so a long-running observer never blocks
/// registration. Frames completed with no observer registered are dropped;
/// there is no buffering.
pub async fn poll_once<P, S>(pin: &mut P, shared: &S) -> Option<u32>
where
    P: PulseInput,
    S: SharedState<ReceiverState>,
{
    let code = read_nec_frame(pin).await?;
    crate::log_debug!("irm3636: frame 0x{:08x}", code);

    let callback = shared.with(|state| state.callback());
    if let Some(callback) = callback {
        callback(code);
    }
    Some(code)
}

/// Perpetual acquisition loop
///
/// Restarts leader detection immediately after every attempt, successful or
/// not. Cooperative yielding happens inside each pulse measurement, so other
/// tasks keep running while the line is idle. There is no stop operation;
/// the loop runs for the life of the process.
pub async fn run_receiver<P, S>(mut pin: P, shared: &S) -> !
where
    P: PulseInput,
    S: SharedState<ReceiverState>,
{
    loop {
        let _ = poll_once(&mut pin, shared).await;
    }
}

#[cfg(feature = "pico2_w")]
mod target {
    use core::sync::atomic::{AtomicBool, Ordering};

    use embassy_executor::Spawner;

    use super::{run_receiver, CodeCallback, ReceiverState};
    use crate::core::traits::{EmbassyState, SharedState};
    use crate::platform::rp2350::Rp2350PulseInput;
    use crate::platform::{PlatformError, Result};

    static RECEIVER: EmbassyState<ReceiverState> = EmbassyState::new(ReceiverState::new());
    static RECEIVER_STARTED: AtomicBool = AtomicBool::new(false);

    #[embassy_executor::task]
    async fn receiver_task(pin: Rp2350PulseInput) -> ! {
        run_receiver(pin, &RECEIVER).await
    }

    /// Bind the receiver to `pin` and start the background decode loop
    ///
    /// The loop is started at most once per process; a second call changes
    /// nothing and reports the pin as unavailable.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the loop is already
    /// running or the task could not be spawned.
    pub fn init(spawner: &Spawner, pin: Rp2350PulseInput) -> Result<()> {
        if RECEIVER_STARTED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PlatformError::ResourceUnavailable);
        }

        if spawner.spawn(receiver_task(pin)).is_err() {
            RECEIVER_STARTED.store(false, Ordering::Release);
            return Err(PlatformError::ResourceUnavailable);
        }

        crate::log_info!("irm3636: receiver started");
        Ok(())
    }

    /// Register the observer for decoded codes
    ///
    /// Replaces any previous observer atomically; it takes effect for the
    /// next frame completed after registration. Frames decoded while no
    /// observer was registered are gone.
    pub fn on_code_received(callback: CodeCallback) {
        RECEIVER.with_mut(|state| state.set_callback(callback));
    }
}

#[cfg(feature = "pico2_w")]
pub use target::{init, on_code_received};

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::core::traits::MockState;
    use crate::platform::mock::{block_on, MockPulse};

    /// Append one complete NEC frame for `code` to the script
    fn push_frame(pin: &mut MockPulse, code: u32) {
        pin.push_pulse(9000); // leader mark
        pin.push_pulse(4500); // leader space
        for i in (0..32).rev() {
            pin.push_pulse(560); // cell mark
            if (code >> i) & 1 == 1 {
                pin.push_pulse(1690);
            } else {
                pin.push_pulse(560);
            }
        }
    }

    #[test]
    fn decodes_golden_frame() {
        let mut pin = MockPulse::new();
        push_frame(&mut pin, 0x00FF_00FF);

        assert_eq!(block_on(read_nec_frame(&mut pin)), Some(0x00FF_00FF));
        assert_eq!(pin.remaining(), 0);
    }

    #[test]
    fn rejects_short_leader_mark_then_recovers() {
        let mut pin = MockPulse::new();
        pin.push_pulse(5000); // partial leader, below the 8 ms floor
        push_frame(&mut pin, 0x20DF_10EF);

        assert_eq!(block_on(read_nec_frame(&mut pin)), None);
        // Detection restarts cleanly on the next attempt
        assert_eq!(block_on(read_nec_frame(&mut pin)), Some(0x20DF_10EF));
    }

    #[test]
    fn rejects_short_leader_space() {
        let mut pin = MockPulse::new();
        pin.push_pulse(9000);
        pin.push_pulse(2000); // below the 4 ms floor

        assert_eq!(block_on(read_nec_frame(&mut pin)), None);
    }

    #[test]
    fn rejects_idle_line() {
        let mut pin = MockPulse::new();
        pin.push_timeout();

        assert_eq!(block_on(read_nec_frame(&mut pin)), None);
    }

    #[test]
    fn aborts_frame_on_mid_frame_timeout() {
        let mut pin = MockPulse::new();
        pin.push_pulse(9000);
        pin.push_pulse(4500);
        // Three good cells, then the stream dies
        for _ in 0..3 {
            pin.push_pulse(560);
            pin.push_pulse(1690);
        }
        pin.push_timeout();

        assert_eq!(block_on(read_nec_frame(&mut pin)), None);
    }

    #[test]
    fn bit_space_threshold_is_exclusive() {
        // All-zero frame whose last space sits exactly on the threshold
        let mut pin = MockPulse::new();
        pin.push_pulse(9000);
        pin.push_pulse(4500);
        for _ in 0..31 {
            pin.push_pulse(560);
            pin.push_pulse(560);
        }
        pin.push_pulse(560);
        pin.push_pulse(1000); // not above the threshold: still 0
        assert_eq!(block_on(read_nec_frame(&mut pin)), Some(0));

        let mut pin = MockPulse::new();
        pin.push_pulse(9000);
        pin.push_pulse(4500);
        for _ in 0..31 {
            pin.push_pulse(560);
            pin.push_pulse(560);
        }
        pin.push_pulse(560);
        pin.push_pulse(1001); // just above: 1
        assert_eq!(block_on(read_nec_frame(&mut pin)), Some(1));
    }

    static GOLDEN_OBSERVED: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    fn golden_observer(code: u32) {
        GOLDEN_OBSERVED.lock().unwrap().push(code);
    }

    #[test]
    fn dispatches_frame_to_observer_exactly_once() {
        let mut pin = MockPulse::new();
        push_frame(&mut pin, 0x00FF_00FF);

        let shared = MockState::new(ReceiverState::new());
        shared.with_mut(|state| state.set_callback(golden_observer));

        assert_eq!(block_on(poll_once(&mut pin, &shared)), Some(0x00FF_00FF));
        assert_eq!(*GOLDEN_OBSERVED.lock().unwrap(), vec![0x00FF_00FF]);
    }

    static SWAP_FIRST: Mutex<Vec<u32>> = Mutex::new(Vec::new());
    static SWAP_SECOND: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    fn swap_first_observer(code: u32) {
        SWAP_FIRST.lock().unwrap().push(code);
    }

    fn swap_second_observer(code: u32) {
        SWAP_SECOND.lock().unwrap().push(code);
    }

    #[test]
    fn replacing_observer_redirects_later_frames() {
        let mut pin = MockPulse::new();
        push_frame(&mut pin, 0x0000_0001);
        push_frame(&mut pin, 0x0000_0002);

        let shared = MockState::new(ReceiverState::new());
        shared.with_mut(|state| state.set_callback(swap_first_observer));
        block_on(poll_once(&mut pin, &shared));

        // Last registration wins; the first observer receives nothing further
        shared.with_mut(|state| state.set_callback(swap_second_observer));
        block_on(poll_once(&mut pin, &shared));

        assert_eq!(*SWAP_FIRST.lock().unwrap(), vec![1]);
        assert_eq!(*SWAP_SECOND.lock().unwrap(), vec![2]);
    }

    #[test]
    fn frame_without_observer_is_dropped() {
        let mut pin = MockPulse::new();
        push_frame(&mut pin, 0xA55A_A55A);

        let shared = MockState::new(ReceiverState::new());
        // Decoding still reports the frame; nothing is dispatched
        assert_eq!(block_on(poll_once(&mut pin, &shared)), Some(0xA55A_A55A));
    }

    static REJECT_OBSERVED: Mutex<Vec<u32>> = Mutex::new(Vec::new());

    fn reject_observer(code: u32) {
        REJECT_OBSERVED.lock().unwrap().push(code);
    }

    #[test]
    fn rejected_attempt_dispatches_nothing() {
        let mut pin = MockPulse::new();
        pin.push_pulse(5000);

        let shared = MockState::new(ReceiverState::new());
        shared.with_mut(|state| state.set_callback(reject_observer));

        assert_eq!(block_on(poll_once(&mut pin, &shared)), None);
        assert!(REJECT_OBSERVED.lock().unwrap().is_empty());
    }
}
