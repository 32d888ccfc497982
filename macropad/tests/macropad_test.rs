mod common;
pub(crate) use crate::common::*;

mod macropad_test {
    use super::*;

    use embassy_futures::block_on;
    use embassy_time::{Duration, Instant};
    use macropad::config::{BehaviorConfig, DebounceMode, MacropadConfig, ReleaseMode};
    use macropad::usb::descriptor::KeyboardReport;
    use macropad::{HidKeyCode, Macropad, MacropadError, RestartRequest, run_macropad};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn global_debounce() -> BehaviorConfig {
        BehaviorConfig {
            debounce_mode: DebounceMode::Global,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_press_while_held() {
        let mut pad = build_macropad(&config(&[("GP1", keys(&["E"]))]), BehaviorConfig::default());
        block_on(async {
            assert_eq!(pad.macropad.poll(at(0)).await, Ok(None));
            pad.pins[0].press();
            pad.macropad.poll(at(1)).await.unwrap();
            pad.macropad.poll(at(2)).await.unwrap();
            pad.macropad.poll(at(100)).await.unwrap();
            pad.macropad.poll(at(200)).await.unwrap();
        });
        assert_eq!(pad.writer.reports(), [report(0, &[HidKeyCode::E])]);
    }

    #[test]
    fn test_release_all_on_any_release() {
        let mut pad = build_macropad(
            &config(&[("GP1", keys(&["A"])), ("GP2", keys(&["B"])), ("GP14", keys(&["C"]))]),
            BehaviorConfig::default(),
        );
        block_on(async {
            pad.pins[0].press();
            pad.pins[1].press();
            pad.macropad.poll(at(0)).await.unwrap();
            pad.pins[1].release();
            pad.macropad.poll(at(60)).await.unwrap();
            pad.macropad.poll(at(61)).await.unwrap();
        });
        assert_eq!(
            pad.writer.reports(),
            [
                report(0, &[HidKeyCode::A]),
                report(0, &[HidKeyCode::A, HidKeyCode::B]),
                KeyboardReport::default(),
            ]
        );
    }

    #[test]
    fn test_per_button_release_keeps_other_keys() {
        let behavior = BehaviorConfig {
            release_mode: ReleaseMode::PerButton,
            ..Default::default()
        };
        let mut pad = build_macropad(&config(&[("GP1", keys(&["A"])), ("GP2", keys(&["B"]))]), behavior);
        block_on(async {
            pad.pins[0].press();
            pad.pins[1].press();
            pad.macropad.poll(at(0)).await.unwrap();
            pad.pins[0].release();
            pad.macropad.poll(at(60)).await.unwrap();
        });
        assert_eq!(
            pad.writer.reports().last(),
            Some(&report(0, &[HidKeyCode::No, HidKeyCode::B]))
        );
    }

    #[test]
    fn test_global_debounce_holds_every_button() {
        let mut pad = build_macropad(&config(&[("GP1", keys(&["A"])), ("GP2", keys(&["B"]))]), global_debounce());
        block_on(async {
            pad.pins[0].press();
            pad.macropad.poll(at(0)).await.unwrap();
            // Later buttons of the same pass are held too
            assert_eq!(pad.pins[1].reads(), 0);

            pad.pins[1].press();
            pad.macropad.poll(at(10)).await.unwrap();
            assert_eq!(pad.pins[0].reads(), 1);
            assert_eq!(pad.pins[1].reads(), 0);
            assert_eq!(pad.writer.reports().len(), 1);

            pad.macropad.poll(at(50)).await.unwrap();
        });
        assert_eq!(
            pad.writer.reports(),
            [
                report(0, &[HidKeyCode::A]),
                report(0, &[HidKeyCode::A, HidKeyCode::B]),
            ]
        );
    }

    #[test]
    fn test_per_channel_debounce_keeps_other_buttons_responsive() {
        let mut pad = build_macropad(&config(&[("GP1", keys(&["A"])), ("GP2", keys(&["B"]))]), BehaviorConfig::default());
        block_on(async {
            pad.pins[0].press();
            pad.macropad.poll(at(0)).await.unwrap();
            assert_eq!(pad.pins[1].reads(), 1);

            // Contact bounce on GP1 is ignored, GP2 is polled
            pad.pins[0].release();
            pad.pins[1].press();
            pad.macropad.poll(at(10)).await.unwrap();
            assert_eq!(pad.pins[0].reads(), 1);
            assert_eq!(pad.pins[1].reads(), 2);

            pad.pins[0].press();
            pad.macropad.poll(at(50)).await.unwrap();
        });
        assert_eq!(
            pad.writer.reports(),
            [
                report(0, &[HidKeyCode::A]),
                report(0, &[HidKeyCode::A, HidKeyCode::B]),
            ]
        );
    }

    #[test]
    fn test_text_action() {
        let mut pad = build_macropad(&config(&[("GP1", text("hello"))]), BehaviorConfig::default());
        block_on(async {
            pad.pins[0].press();
            pad.macropad.poll(at(0)).await.unwrap();
            pad.macropad.poll(at(100)).await.unwrap();
        });
        let expected: std::vec::Vec<KeyboardReport> = [HidKeyCode::H, HidKeyCode::E, HidKeyCode::L, HidKeyCode::L, HidKeyCode::O]
            .iter()
            .flat_map(|k| [report(0, &[*k]), KeyboardReport::default()])
            .collect();
        assert_eq!(pad.writer.reports(), expected);
        assert_eq!(pad.macropad.keyboard().held_report(), KeyboardReport::default());
    }

    #[test]
    fn test_key_sequence_action() {
        let mut pad = build_macropad(&config(&[("GP1", keys(&["A", "B"]))]), BehaviorConfig::default());
        block_on(async {
            pad.pins[0].press();
            pad.macropad.poll(at(0)).await.unwrap();
            pad.pins[0].release();
            pad.macropad.poll(at(50)).await.unwrap();
        });
        assert_eq!(
            pad.writer.reports(),
            [report(0, &[HidKeyCode::A, HidKeyCode::B]), KeyboardReport::default()]
        );
    }

    #[test]
    fn test_unknown_key_fails_before_polling() {
        init_log();
        let writer = RecordingWriter::default();
        let mut resolved = 0;
        let result = Macropad::new(
            &config(&[("GP1", keys(&["A"])), ("GP2", keys(&["NOT_A_KEY"]))]),
            BehaviorConfig::default(),
            |_| {
                resolved += 1;
                Some(PinHandle::default().pin())
            },
            writer.clone(),
            FakeControl::default(),
        );
        assert!(matches!(result, Err(MacropadError::UnknownKeyCode(name)) if name.as_str() == "NOT_A_KEY"));
        assert_eq!(resolved, 0);
        assert!(writer.reports().is_empty());
    }

    #[test]
    fn test_unknown_pin() {
        init_log();
        let result = Macropad::new(
            &config(&[("GP1", keys(&["A"])), ("GP99", keys(&["B"]))]),
            BehaviorConfig::default(),
            |name| (name == "GP1").then(|| PinHandle::default().pin()),
            RecordingWriter::default(),
            FakeControl::default(),
        );
        assert!(matches!(result, Err(MacropadError::UnknownPin(name)) if name.as_str() == "GP99"));
    }

    #[test]
    fn test_restart_stops_polling() {
        let mut pad = build_macropad(&MacropadConfig::default(), BehaviorConfig::default());
        block_on(async {
            assert_eq!(pad.macropad.poll(at(0)).await, Ok(None));
            let reads = pad.pins[0].reads();

            pad.control.receive(1);
            pad.pins[0].press();
            assert_eq!(pad.macropad.poll(at(1)).await, Ok(Some(RestartRequest)));
            assert_eq!(pad.pins[0].reads(), reads);
        });
        assert!(pad.writer.reports().is_empty());
    }

    #[test]
    fn test_run_returns_restart_request() {
        let mut pad = build_macropad(&MacropadConfig::default(), BehaviorConfig::default());
        pad.control.receive(3);
        assert_eq!(block_on(pad.macropad.run()), Ok(RestartRequest));
    }

    #[test]
    fn test_hid_failure_is_propagated() {
        init_log();
        let pin = PinHandle::default();
        let mut macropad = Macropad::new(
            &config(&[("GP1", keys(&["A"]))]),
            BehaviorConfig::default(),
            |_| Some(pin.pin()),
            DisabledWriter,
            FakeControl::default(),
        )
        .unwrap();
        pin.press();
        assert!(matches!(block_on(macropad.poll(at(0))), Err(MacropadError::Hid(_))));
    }

    #[test]
    fn test_run_macropad_lights_leds() {
        init_log();
        let mut config = MacropadConfig::default();
        config.led_intensities.truncate(2);
        config.led_intensities[1] = 50;
        let mut leds = [FakePwm { duty: 0 }, FakePwm { duty: 0 }, FakePwm { duty: 0 }, FakePwm { duty: 0 }];
        let writer = RecordingWriter::default();
        // Every sample sees one more byte, so the first pass restarts
        let control = FakeControl {
            step: 1,
            ..Default::default()
        };
        let result = block_on(run_macropad(
            &config,
            BehaviorConfig::default(),
            &mut leds,
            |_| Some(PinHandle::default().pin()),
            writer.clone(),
            control,
        ));
        assert_eq!(result, Ok(RestartRequest));
        let duties: std::vec::Vec<u16> = leds.iter().map(|l| l.duty).collect();
        assert_eq!(duties, [65535, 32768, 65535, 65535]);
        assert!(writer.reports().is_empty());
    }

    #[test]
    fn test_release_has_no_debounce() {
        let mut pad = build_macropad(&config(&[("GP1", keys(&["A"]))]), BehaviorConfig::default());
        let hold = Duration::from_millis(50);
        block_on(async {
            pad.pins[0].press();
            pad.macropad.poll(at(0)).await.unwrap();
            pad.pins[0].release();
            pad.macropad.poll(at(0) + hold).await.unwrap();
            pad.pins[0].press();
            pad.macropad.poll(at(0) + hold).await.unwrap();
        });
        assert_eq!(pad.writer.reports().len(), 3);
    }
}
