mod tests {
    use std::collections::VecDeque;
    use std::fmt;

    use diorama_light_cycle::{
        Ack, CycleConfig, CycleDriver, CycleError, CyclePhase, Duration, Instant, PACKED_LEN,
        Transport, decode,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct LinkDown;

    impl fmt::Display for LinkDown {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("link down")
        }
    }

    /// Records every frame and replays scripted acknowledgements
    #[derive(Default)]
    struct RecordingTransport {
        frames: Vec<Vec<u8>>,
        flushes: usize,
        acks: VecDeque<Result<Ack, LinkDown>>,
        fail_write: bool,
    }

    impl Transport for RecordingTransport {
        type Error = LinkDown;

        fn write(&mut self, bytes: &[u8]) -> Result<(), LinkDown> {
            if self.fail_write {
                return Err(LinkDown);
            }
            self.frames.push(bytes.to_vec());
            Ok(())
        }

        fn flush(&mut self) -> Result<(), LinkDown> {
            self.flushes += 1;
            Ok(())
        }

        fn read_ack(&mut self) -> Result<Ack, LinkDown> {
            self.acks.pop_front().unwrap_or(Ok(Ack::Received(b'k')))
        }
    }

    const ORIGIN: Instant = Instant::from_millis(1_000);

    fn driver(transport: RecordingTransport) -> CycleDriver<RecordingTransport> {
        CycleDriver::new(transport, CycleConfig::default(), ORIGIN)
    }

    fn assert_hour(driver: &CycleDriver<RecordingTransport>, expected: f64) {
        let hour = driver.clock().hour();
        assert!((hour - expected).abs() < 1e-9, "expected {expected}, got {hour}");
    }

    #[test]
    fn test_first_tick_sends_frame() {
        let mut driver = driver(RecordingTransport::default());
        let report = driver.tick(ORIGIN).unwrap();

        assert_eq!(report.ticks, 1);
        assert_eq!(report.ack, Some(Ack::Received(b'k')));
        assert_eq!(report.next_deadline, ORIGIN + Duration::from_micros(16_666));
        assert_eq!(driver.phase(), CyclePhase::WaitingForDeadline);
        assert_hour(&driver, 1.0 / 30.0);

        let transport = driver.transport();
        assert_eq!(transport.frames.len(), 1);
        assert_eq!(transport.flushes, 1);
        let stream = &transport.frames[0];
        assert_eq!(stream.len(), PACKED_LEN);
        assert_eq!(&decode(stream).unwrap()[..], driver.last_frame());
    }

    #[test]
    fn test_catch_up_coalesces_ticks() {
        let mut driver = driver(RecordingTransport::default());
        driver.tick(ORIGIN).unwrap();

        let report = driver.tick(ORIGIN + Duration::from_millis(100)).unwrap();
        assert_eq!(report.ticks, 6);
        assert!(report.sent());
        assert_eq!(driver.transport().frames.len(), 2);
        assert_eq!(driver.stats().ticks, 7);
        assert_eq!(driver.stats().frames_sent, 2);
        assert_hour(&driver, 7.0 / 30.0);
    }

    #[test]
    fn test_tick_before_start_sends_nothing() {
        let mut driver = driver(RecordingTransport::default());
        let report = driver.tick(Instant::from_millis(500)).unwrap();

        assert_eq!(report.ticks, 0);
        assert!(!report.sent());
        assert_eq!(report.next_deadline, ORIGIN);
        assert!(driver.transport().frames.is_empty());
    }

    #[test]
    fn test_early_wake_repeats_frame() {
        let mut driver = driver(RecordingTransport::default());
        driver.tick(ORIGIN).unwrap();
        let report = driver.tick(ORIGIN + Duration::from_millis(5)).unwrap();

        assert_eq!(report.ticks, 0);
        let frames = &driver.transport().frames;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn test_soft_timeout_is_not_an_error() {
        let transport = RecordingTransport {
            acks: VecDeque::from([Ok(Ack::TimedOut)]),
            ..Default::default()
        };
        let mut driver = driver(transport);

        let report = driver.tick(ORIGIN).unwrap();
        assert_eq!(report.ack, Some(Ack::TimedOut));
        assert_eq!(driver.stats().missed_acks, 1);

        let report = driver.tick(ORIGIN + Duration::from_millis(20)).unwrap();
        assert_eq!(report.ack, Some(Ack::Received(b'k')));
        assert_eq!(driver.stats().missed_acks, 1);
    }

    #[test]
    fn test_read_error_is_fatal() {
        let transport = RecordingTransport {
            acks: VecDeque::from([Err(LinkDown)]),
            ..Default::default()
        };
        let mut driver = driver(transport);

        let err = driver.tick(ORIGIN).unwrap_err();
        assert!(matches!(err, CycleError::Read(LinkDown)));
        assert_eq!(err.to_string(), "failed to read acknowledgement: link down");
        assert_eq!(driver.phase(), CyclePhase::AwaitingAck);
    }

    #[test]
    fn test_write_error_is_fatal() {
        let transport = RecordingTransport {
            fail_write: true,
            ..Default::default()
        };
        let mut driver = driver(transport);

        let err = driver.tick(ORIGIN).unwrap_err();
        assert!(matches!(err, CycleError::Write(LinkDown)));
        assert_eq!(driver.transport().flushes, 0);
        assert_eq!(driver.stats().frames_sent, 0);
    }

    #[test]
    fn test_sleep_duration() {
        let mut driver = driver(RecordingTransport::default());
        driver.tick(ORIGIN).unwrap();

        assert_eq!(driver.sleep_duration(ORIGIN), Duration::from_micros(16_666));
        assert_eq!(
            driver.sleep_duration(ORIGIN + Duration::from_secs(1)),
            Duration::from_ticks(0)
        );
    }

    #[test]
    fn test_filter_eases_light_on() {
        // First tick lands just before the main light switches on at 4:00,
        // the second just after
        let config = CycleConfig {
            start_hour: 3.95,
            ..CycleConfig::default()
        };
        let mut driver = CycleDriver::new(RecordingTransport::default(), config, ORIGIN);

        driver.tick(ORIGIN).unwrap();
        assert_eq!(driver.filtered()[2], 0.0);

        driver.tick(ORIGIN + Duration::from_millis(17)).unwrap();
        let weight = config.filter_weight();
        assert!((driver.filtered()[2] - (1.0 - weight)).abs() < 1e-12);
        assert!(driver.filtered()[2] < 1.0);
    }

    #[test]
    fn test_default_config() {
        let config = CycleConfig::default();
        assert_eq!(config.refresh_rate, 60);
        assert_eq!(config.seconds_per_sim_hour, 0.5);
        assert_eq!(config.filter_half_life_seconds, 0.02);
        assert!((config.sim_hours_per_tick() - 1.0 / 30.0).abs() < 1e-12);
        assert_eq!(config.deadline_offset(60), Duration::from_secs(1));
    }
}
