use spin_and_win::{
    resolve_winner, AudioEvent, ManualTimer, NoParticles, RandomAngles, RecordingAudio,
    ScriptedAngles, SoundId, SpinPhase, WheelError, WheelSession,
};
use std::time::Duration;

type TestSession<A> = WheelSession<ManualTimer, A, RecordingAudio, NoParticles>;

fn session<A: spin_and_win::AngleSource>(angles: A) -> TestSession<A> {
    WheelSession::new(ManualTimer::new(), angles, RecordingAudio::new(), NoParticles)
}

#[test]
fn pizza_or_sushi_settles_after_five_seconds() {
    let mut s = session(RandomAngles::seeded(2024));
    s.add_option("Pizza").unwrap();
    s.add_option("Sushi").unwrap();
    s.set_spin_duration(5.0).unwrap();

    let start = s.spin().expect("two options should spin");
    assert_eq!(s.phase(), &SpinPhase::Spinning);

    assert_eq!(s.advance(Duration::from_millis(4_999)), None);
    assert_eq!(s.phase(), &SpinPhase::Spinning);

    let winner = s.advance(Duration::from_millis(1)).expect("settles at 5s");
    let expected = resolve_winner(start.angle, &["Pizza", "Sushi"]).unwrap();
    assert_eq!(winner, expected);
    assert_eq!(s.phase(), &SpinPhase::Settled(expected.to_string()));
    assert_eq!(s.winners(), [expected]);
}

#[test]
fn history_is_most_recent_first() {
    // 1080 -> last option, 1080 + 180 -> first of two
    let mut s = session(ScriptedAngles::new([1080, 1260]));
    s.add_option("W1-loser").unwrap();
    s.add_option("W1").unwrap();

    s.spin().unwrap();
    let w1 = s.advance(Duration::from_secs(5)).unwrap();
    s.spin().unwrap();
    let w2 = s.advance(Duration::from_secs(5)).unwrap();

    assert_eq!(w1, "W1");
    assert_eq!(w2, "W1-loser");
    assert_eq!(s.winners(), [w2, w1]);
}

#[test]
fn guards_leave_state_untouched() {
    let mut s = session(ScriptedAngles::new([1100, 1200]));
    assert!(s.spin().is_none());
    s.add_option("Only").unwrap();
    assert!(!s.can_spin());
    assert!(s.spin().is_none());
    assert_eq!(s.phase(), &SpinPhase::Idle);

    s.add_option("Other").unwrap();
    assert!(s.can_spin());
    s.spin().unwrap();
    assert!(!s.can_spin());
    assert!(s.spin().is_none());
    assert_eq!(s.machine().timer().armed_count(), 1);
    assert_eq!(s.machine().angles().remaining(), 1);
}

#[test]
fn too_few_options_after_settle_keeps_the_winner_on_display() {
    let mut s = session(ScriptedAngles::new([1080, 1200]));
    s.add_option("A").unwrap();
    s.add_option("B").unwrap();
    s.spin().unwrap();
    let winner = s.advance(Duration::from_secs(5)).unwrap();
    let events_after_settle = s.audio().events().to_vec();

    s.remove_option(0).unwrap();
    assert!(!s.can_spin());
    assert!(s.spin().is_none());
    assert_eq!(s.phase(), &SpinPhase::Settled(winner.clone()));
    assert_eq!(s.machine().winner(), Some(winner.as_str()));

    s.clear_options();
    assert!(s.spin().is_none());
    assert_eq!(s.phase(), &SpinPhase::Settled(winner.clone()));

    assert_eq!(s.machine().timer().armed_count(), 1);
    assert_eq!(s.machine().angles().remaining(), 1);
    assert_eq!(s.machine().spins_started(), 1);
    assert_eq!(s.audio().events(), events_after_settle.as_slice());
    assert_eq!(s.winners(), [winner]);
}

#[test]
fn duplicate_entry_surfaces_error_and_keeps_one_copy() {
    let mut s = session(ScriptedAngles::default());
    s.add_option(" Tacos ").unwrap();
    assert_eq!(
        s.add_option("Tacos"),
        Err(WheelError::DuplicateOption("Tacos".into()))
    );
    assert_eq!(s.options(), ["Tacos"]);
}

#[test]
fn list_edits_during_a_spin_wait_for_settle() {
    let mut s = session(ScriptedAngles::new([1080 + 10]));
    for o in ["A", "B", "C"] {
        s.add_option(o).unwrap();
    }
    s.spin().unwrap();
    s.remove_option(2).unwrap();
    s.add_option("D").unwrap();
    assert_eq!(s.wheel_options(), ["A", "B", "C"]);

    // 10 degrees into the first of three sectors -> last option of the snapshot
    assert_eq!(s.advance(Duration::from_secs(5)).as_deref(), Some("C"));
    assert_eq!(s.wheel_options(), ["A", "B", "D"]);
    assert_eq!(s.phase(), &SpinPhase::Settled("C".into()));
}

#[test]
fn winner_stays_in_history_after_removal_from_options() {
    let mut s = session(ScriptedAngles::new([1080]));
    s.add_option("A").unwrap();
    s.add_option("B").unwrap();
    s.spin().unwrap();
    let winner = s.advance(Duration::from_secs(5)).unwrap();
    s.clear_options();
    assert!(s.options().is_empty());
    assert_eq!(s.winners(), [winner.clone()]);
    assert_eq!(s.phase(), &SpinPhase::Settled(winner));
}

#[test]
fn muted_session_still_settles_quietly() {
    let mut s = session(ScriptedAngles::new([1200]));
    s.add_option("A").unwrap();
    s.add_option("B").unwrap();
    assert!(s.toggle_mute());
    s.spin().unwrap();
    assert!(s.advance(Duration::from_secs(5)).is_some());
    assert_eq!(s.audio().events(), [AudioEvent::Stopped(SoundId::Spin)]);
}

#[test]
fn shorter_duration_settles_sooner() {
    let mut s = session(ScriptedAngles::new([1200]));
    s.add_option("A").unwrap();
    s.add_option("B").unwrap();
    s.set_spin_duration(2.0).unwrap();
    s.spin().unwrap();
    assert!(s.advance(Duration::from_millis(2_000)).is_some());
}

#[test]
fn dispose_disarms_the_timer() {
    let mut s = session(ScriptedAngles::new([1200]));
    s.add_option("A").unwrap();
    s.add_option("B").unwrap();
    s.spin().unwrap();
    s.dispose();
    assert_eq!(s.advance(Duration::from_secs(30)), None);
    assert!(s.winners().is_empty());
}
