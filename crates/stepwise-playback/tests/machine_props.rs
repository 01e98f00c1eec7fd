//! Property tests for the playback state machine

use proptest::prelude::*;
use std::time::Duration;
use stepwise_playback::{PlaybackMachine, PlaybackMode, RenderSink, SpeedRange, TickToken};
use stepwise_test_utils::{canned_history, CapturingRenderer};

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Resume,
    Toggle,
    Step,
    Tick,
    StaleTick,
    Reset,
    Speed(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Resume),
        1 => Just(Op::Toggle),
        1 => Just(Op::Step),
        4 => Just(Op::Tick),
        1 => Just(Op::StaleTick),
        1 => Just(Op::Reset),
        1 => (0u8..=12).prop_map(Op::Speed),
    ]
}

fn machine() -> PlaybackMachine<u32> {
    let range = SpeedRange::default();
    PlaybackMachine::new(range.speed(1).unwrap(), range, Duration::from_millis(100))
}

proptest! {
    #[test]
    fn invariants_hold_under_any_command_sequence(
        len in 0u32..8,
        fail_at in proptest::option::of(0usize..8),
        ops in proptest::collection::vec(op(), 0..60),
    ) {
        let mut renderer = CapturingRenderer::new().0;
        if let Some(seq) = fail_at {
            renderer = renderer.failing_at(seq);
        }
        let mut m = machine();
        let history = canned_history(len);
        m.load(history, &mut RenderSink::new(&mut renderer, &())).unwrap();

        for op in ops {
            let mut sink = RenderSink::new(&mut renderer, &());
            let _ = match op {
                Op::Start => m.start(&mut sink).map(|_| ()),
                Op::Pause => m.pause(),
                Op::Resume => m.resume(&mut sink),
                Op::Toggle => m.pause_or_resume(&mut sink).map(|_| ()),
                Op::Step => m.step(&mut sink),
                Op::Tick => match m.pending() {
                    Some(p) => m.tick(p.token, &mut sink).map(|_| ()).map_err(Into::into),
                    None => Ok(()),
                },
                Op::StaleTick => {
                    let before = (m.cursor(), m.mode(), m.pending());
                    let token = TickToken { history: m.history().id(), generation: u64::MAX };
                    let outcome = m.tick(token, &mut sink);
                    prop_assert!(outcome.is_ok());
                    prop_assert_eq!((m.cursor(), m.mode(), m.pending()), before);
                    Ok(())
                }
                Op::Reset => m.reset(&mut sink).map_err(Into::into),
                Op::Speed(v) => m.set_speed(v),
            };

            prop_assert!(m.cursor() <= m.history().len());
            prop_assert_eq!(m.mode() == PlaybackMode::Running, m.pending().is_some());
            if m.mode() == PlaybackMode::Finished {
                prop_assert_eq!(m.cursor(), m.history().len());
            }
        }

        let mut sink = RenderSink::new(&mut renderer, &());
        m.reset(&mut sink).unwrap();
        let once = (m.cursor(), m.mode(), m.pending());
        m.reset(&mut sink).unwrap();
        prop_assert_eq!((m.cursor(), m.mode(), m.pending()), once);
        prop_assert_eq!(once, (0, PlaybackMode::Idle, None));
    }

    #[test]
    fn uninterrupted_run_renders_each_step_once(len in 1u32..20) {
        let (mut renderer, log) = CapturingRenderer::new();
        let mut m = machine();
        let mut sink = RenderSink::new(&mut renderer, &());
        m.load(canned_history(len), &mut sink).unwrap();
        m.start(&mut sink).unwrap();
        while let Some(p) = m.pending() {
            m.tick(p.token, &mut sink).unwrap();
        }
        prop_assert_eq!(m.mode(), PlaybackMode::Finished);
        prop_assert_eq!(log.steps(), (0..len as usize).collect::<Vec<_>>());
    }
}
