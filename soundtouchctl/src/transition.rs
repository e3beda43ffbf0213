//! Timed linear volume ramps and the composite smooth power-on sequence.
//!
//! A transition moves the volume between two levels in unit steps, with the
//! requested duration divided evenly across the steps. The first volume
//! command goes out immediately; each later one follows after one step
//! delay, and there is no pause after the final command, so the ramp ends
//! exactly when the duration elapses.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use soundtouch_api::ApiError;

use crate::speaker::Speaker;

/// Volume primed before power-on in the smooth power-on sequence.
///
/// A speaker wakes at roughly volume 15 and silently drops the first volume
/// command it receives after waking. Priming to 30 while still in standby
/// means the wake-up happens at a known, audible level instead.
pub const PRIMER_VOLUME: i32 = 30;

/// Level the post-power-on ramp starts from.
///
/// The ramp's first command is the one the speaker drops (see
/// [`PRIMER_VOLUME`]), so it is pinned to the quietest level; the audible
/// ramp then rises from the primed volume.
pub const RAMP_START_LEVEL: i32 = 1;

/// Errors from planning or running a volume transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// Start and end level are equal, leaving nothing to pace the duration
    /// over
    #[error("cannot transition volume from {level} to itself")]
    FlatTransition { level: i32 },

    /// Duration is zero, negative, or not a number
    #[error("transition duration must be a positive number of minutes, got {minutes}")]
    InvalidDuration { minutes: f64 },

    /// A volume command failed mid-ramp; the ramp is abandoned at the last
    /// level that was set
    #[error(transparent)]
    Command(#[from] ApiError),
}

/// A validated plan for one volume ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    from_level: i32,
    to_level: i32,
    step_delay: Duration,
}

impl TransitionPlan {
    /// Plan a ramp from `from_level` to `to_level` spread over
    /// `duration_minutes`.
    ///
    /// # Errors
    ///
    /// Equal endpoints are rejected as [`TransitionError::FlatTransition`]
    /// rather than dividing the duration by zero steps, and the duration
    /// must be a positive finite number of minutes.
    pub fn new(from_level: i32, to_level: i32, duration_minutes: f64) -> Result<Self, TransitionError> {
        if from_level == to_level {
            return Err(TransitionError::FlatTransition { level: from_level });
        }
        if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
            return Err(TransitionError::InvalidDuration {
                minutes: duration_minutes,
            });
        }

        let step_count = from_level.abs_diff(to_level);
        let step_delay = Duration::from_secs_f64(duration_minutes * 60.0 / f64::from(step_count));

        Ok(Self {
            from_level,
            to_level,
            step_delay,
        })
    }

    pub fn from_level(&self) -> i32 {
        self.from_level
    }

    pub fn to_level(&self) -> i32 {
        self.to_level
    }

    /// Number of unit volume changes; the ramp issues one more volume
    /// command than this, since both endpoints are set.
    pub fn step_count(&self) -> u32 {
        self.from_level.abs_diff(self.to_level)
    }

    /// Pause between consecutive volume commands.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// The levels the ramp sets, in order, endpoints included.
    pub fn levels(&self) -> impl Iterator<Item = i32> {
        let from = i64::from(self.from_level);
        let step: i64 = if self.to_level > self.from_level { 1 } else { -1 };
        (0..=i64::from(self.step_count())).map(move |s| (from + step * s) as i32)
    }
}

/// Run a planned transition against a speaker, pacing with `thread::sleep`.
///
/// Blocks the calling thread for the whole duration. A failed volume command
/// aborts immediately; the device is left at the last level that was set.
pub fn run<S: Speaker + ?Sized>(plan: &TransitionPlan, speaker: &S) -> Result<(), TransitionError> {
    run_with(plan, speaker, thread::sleep)
}

/// Like [`run`], but with an injected pause function so tests can observe
/// pacing without waiting for it.
pub fn run_with<S: Speaker + ?Sized>(
    plan: &TransitionPlan,
    speaker: &S,
    mut pause: impl FnMut(Duration),
) -> Result<(), TransitionError> {
    println!(
        "Starting smooth volume transition from {} to {}",
        plan.from_level(),
        plan.to_level()
    );
    println!("Delay: {}sec", plan.step_delay().as_secs_f64());

    for (i, level) in plan.levels().enumerate() {
        if i > 0 {
            pause(plan.step_delay());
        }
        speaker.set_volume(level)?;
    }

    Ok(())
}

/// Power a speaker on and ramp it to `to_level` over `duration_minutes`.
///
/// Strictly ordered: prime the volume to [`PRIMER_VOLUME`] while the speaker
/// is still in standby, wake it, then ramp from [`RAMP_START_LEVEL`]. The
/// ramp's first command is expected to be swallowed by the wake-up quirk.
pub fn smooth_power_on<S: Speaker + ?Sized>(
    speaker: &S,
    to_level: i32,
    duration_minutes: f64,
) -> Result<(), TransitionError> {
    smooth_power_on_with(speaker, to_level, duration_minutes, thread::sleep)
}

/// Like [`smooth_power_on`], with an injected pause function.
pub fn smooth_power_on_with<S: Speaker + ?Sized>(
    speaker: &S,
    to_level: i32,
    duration_minutes: f64,
    pause: impl FnMut(Duration),
) -> Result<(), TransitionError> {
    let plan = TransitionPlan::new(RAMP_START_LEVEL, to_level, duration_minutes)?;

    speaker.set_volume(PRIMER_VOLUME)?;
    speaker.power_on()?;
    run_with(&plan, speaker, pause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        PowerOn,
        PowerOff,
        SetVolume(i32),
    }

    /// Scripted speaker that records every command; optionally fails all
    /// volume commands after the first `fail_after` of them.
    #[derive(Default)]
    struct RecordingSpeaker {
        calls: RefCell<Vec<Call>>,
        fail_after: Option<usize>,
    }

    impl RecordingSpeaker {
        fn failing_after(sets: usize) -> Self {
            Self {
                fail_after: Some(sets),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn set_volume_levels(&self) -> Vec<i32> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::SetVolume(level) => Some(level),
                    _ => None,
                })
                .collect()
        }
    }

    impl Speaker for RecordingSpeaker {
        fn name(&self) -> &str {
            "Test Speaker"
        }

        fn power_on(&self) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::PowerOn);
            Ok(())
        }

        fn power_off(&self) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(Call::PowerOff);
            Ok(())
        }

        fn set_volume(&self, level: i32) -> Result<(), ApiError> {
            let sets_so_far = self
                .calls
                .borrow()
                .iter()
                .filter(|call| matches!(call, Call::SetVolume(_)))
                .count();
            if self.fail_after.is_some_and(|limit| sets_so_far >= limit) {
                return Err(ApiError::Network("device went away".to_string()));
            }
            self.calls.borrow_mut().push(Call::SetVolume(level));
            Ok(())
        }
    }

    fn run_recorded(plan: &TransitionPlan, speaker: &RecordingSpeaker) -> Vec<Duration> {
        let pauses = RefCell::new(Vec::new());
        run_with(plan, speaker, |d| pauses.borrow_mut().push(d)).unwrap();
        pauses.into_inner()
    }

    #[test]
    fn example_ramp_10_to_13_over_six_seconds() {
        let plan = TransitionPlan::new(10, 13, 0.1).unwrap();

        assert_eq!(plan.step_count(), 3);
        assert_eq!(plan.step_delay(), Duration::from_secs(2));

        let speaker = RecordingSpeaker::default();
        let pauses = run_recorded(&plan, &speaker);

        assert_eq!(speaker.set_volume_levels(), vec![10, 11, 12, 13]);
        assert_eq!(pauses, vec![Duration::from_secs(2); 3]);
    }

    #[test]
    fn descending_ramp_steps_down_by_one() {
        let plan = TransitionPlan::new(13, 10, 0.1).unwrap();
        let speaker = RecordingSpeaker::default();
        run_recorded(&plan, &speaker);

        assert_eq!(speaker.set_volume_levels(), vec![13, 12, 11, 10]);
    }

    #[rstest]
    #[case(0, 50, 2.0)]
    #[case(50, 0, 2.0)]
    #[case(1, 2, 0.5)]
    #[case(-3, 4, 1.0)]
    #[case(18, 95, 12.5)]
    fn ramp_visits_both_endpoints_in_unit_steps(
        #[case] from: i32,
        #[case] to: i32,
        #[case] minutes: f64,
    ) {
        let plan = TransitionPlan::new(from, to, minutes).unwrap();
        let speaker = RecordingSpeaker::default();
        let pauses = run_recorded(&plan, &speaker);

        let levels = speaker.set_volume_levels();
        assert_eq!(levels.len() as u32, from.abs_diff(to) + 1);
        assert_eq!(*levels.first().unwrap(), from);
        assert_eq!(*levels.last().unwrap(), to);

        let direction = if to > from { 1 } else { -1 };
        for pair in levels.windows(2) {
            assert_eq!(pair[1] - pair[0], direction);
        }

        // One pause between consecutive commands, none after the last, so the
        // paused time adds up to the requested duration.
        assert_eq!(pauses.len() as u32, plan.step_count());
        let total: Duration = pauses.iter().sum();
        let expected = Duration::from_secs_f64(minutes * 60.0);
        let jitter = if total > expected { total - expected } else { expected - total };
        assert!(jitter < Duration::from_millis(1), "paused {:?}, wanted {:?}", total, expected);
    }

    #[test]
    fn equal_endpoints_are_rejected_not_divided_by_zero() {
        let err = TransitionPlan::new(20, 20, 5.0).unwrap_err();
        assert!(matches!(err, TransitionError::FlatTransition { level: 20 }));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn unusable_durations_are_rejected(#[case] minutes: f64) {
        let err = TransitionPlan::new(10, 20, minutes).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidDuration { .. }));
    }

    #[test]
    fn failed_command_aborts_the_ramp_immediately() {
        let plan = TransitionPlan::new(10, 20, 1.0).unwrap();
        let speaker = RecordingSpeaker::failing_after(4);

        let result = run_with(&plan, &speaker, |_| {});

        assert!(matches!(result, Err(TransitionError::Command(_))));
        // Stops at the last level that was set; no rollback, no resume.
        assert_eq!(speaker.set_volume_levels(), vec![10, 11, 12, 13]);
    }

    #[test]
    fn smooth_power_on_primes_wakes_then_ramps() {
        let speaker = RecordingSpeaker::default();
        smooth_power_on_with(&speaker, 50, 1.0, |_| {}).unwrap();

        let calls = speaker.calls();
        assert_eq!(calls[0], Call::SetVolume(PRIMER_VOLUME));
        assert_eq!(calls[1], Call::PowerOn);

        // 51 volume commands total: the primer, then the ramp from 1 to 50.
        let levels = speaker.set_volume_levels();
        assert_eq!(levels.len(), 51);
        assert_eq!(levels[1..].to_vec(), (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn smooth_power_on_rejects_target_equal_to_ramp_start() {
        let speaker = RecordingSpeaker::default();
        let err = smooth_power_on_with(&speaker, RAMP_START_LEVEL, 1.0, |_| {}).unwrap_err();

        assert!(matches!(err, TransitionError::FlatTransition { .. }));
        // Planning happens before any command goes out.
        assert!(speaker.calls().is_empty());
    }
}
