mod common;

mod tests {
    use myrtio_pwm_strip::{
        Busy, ConfigError, HsvConversion, IndexPolicy, Rgb, StripConfig, StripDriver,
        StripFamily,
    };
    use smart_leds::SmartLedsWrite;

    use super::common::{MockChannel, TICK_HZ, TestDriver, run_frame, ws2812_config, ws2812_driver};

    fn driver_for<const N: usize>(config: &StripConfig) -> TestDriver<N> {
        StripDriver::new(config, MockChannel::default()).unwrap()
    }

    fn config_error(config: &StripConfig) -> Option<ConfigError> {
        StripDriver::<MockChannel, u16, 8>::new(config, MockChannel::default()).err()
    }

    #[test]
    fn test_wire_order_ws2812() {
        let mut driver: TestDriver<8> = ws2812_driver(2);
        driver.set_rgb(0, 1, 2, 3);
        assert_eq!(driver.wire_bytes(0), Some(&[2u8, 1, 3][..]));
        assert_eq!(driver.rgb(0), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut driver: TestDriver<8> = ws2812_driver(5);
        driver.fill_rgb(9, 8, 7);
        driver.set_rgb(3, 255, 255, 255);

        driver.clear();
        let first: Vec<Vec<u8>> = (0..5).map(|i| driver.wire_bytes(i).unwrap().to_vec()).collect();
        driver.clear();
        let second: Vec<Vec<u8>> = (0..5).map(|i| driver.wire_bytes(i).unwrap().to_vec()).collect();

        assert_eq!(first, second);
        assert!(first.iter().flatten().all(|&byte| byte == 0));
    }

    #[test]
    fn test_clear_resets_white() {
        let config = StripConfig::new(2, StripFamily::Sk6812, TICK_HZ);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.fill_rgbw(1, 2, 3, 4);
        driver.clear();
        assert_eq!(driver.wire_bytes(1), Some(&[0u8, 0, 0, 0][..]));
    }

    #[test]
    fn test_brightness_is_monotonic() {
        let mut driver: TestDriver<8> = ws2812_driver(1);
        let mut previous = Rgb::new(0, 0, 0);
        for level in 0..=255u8 {
            driver.set_brightness(level);
            driver.set_rgb(0, 200, 100, 50);
            let stored = driver.rgb(0).unwrap();
            assert!(stored.r >= previous.r && stored.g >= previous.g && stored.b >= previous.b);
            previous = stored;
        }
        assert_eq!(previous, Rgb::new(200, 100, 50));
    }

    #[test]
    fn test_brightness_levels() {
        let mut driver: TestDriver<8> = ws2812_driver(1);
        assert_eq!(driver.brightness(), 255);

        driver.set_brightness(127);
        driver.set_rgb(0, 200, 100, 50);
        assert_eq!(driver.rgb(0), Some(Rgb::new(100, 50, 25)));

        driver.set_brightness(0);
        driver.set_rgb(0, 200, 100, 50);
        assert_eq!(driver.rgb(0), Some(Rgb::new(0, 0, 0)));

        let config = ws2812_config(1).with_brightness(0);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.set_rgb(0, 255, 255, 255);
        assert_eq!(driver.rgb(0), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_gamma_correction() {
        let config = ws2812_config(1).with_gamma_correction(true);
        let mut driver: TestDriver<8> = driver_for(&config);

        driver.set_rgb(0, 255, 255, 255);
        assert_eq!(driver.rgb(0), Some(Rgb::new(255, 176, 240)));

        driver.set_brightness(127);
        driver.set_rgb(0, 200, 200, 200);
        assert_eq!(driver.rgb(0), Some(Rgb::new(100, 69, 94)));
    }

    #[test]
    fn test_hsv_red_round_trip() {
        for gamma in [false, true] {
            let config = ws2812_config(2).with_gamma_correction(gamma);
            let mut driver: TestDriver<8> = driver_for(&config);
            driver.set_hsv(0, 0, 255, 255);
            assert_eq!(driver.rgb(0), Some(Rgb::new(255, 0, 0)));
        }
    }

    #[test]
    fn test_hsv_read_back() {
        let mut driver: TestDriver<8> = ws2812_driver(1);
        driver.set_rgb(0, 0, 255, 0);
        let hsv = driver.hsv(0).unwrap();
        assert_eq!((hsv.hue, hsv.sat, hsv.val), (85, 255, 255));
    }

    #[test]
    fn test_spectrum_conversion() {
        let config = ws2812_config(1).with_hsv_conversion(HsvConversion::Spectrum);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.set_hsv(0, 0, 255, 255);
        let color = driver.rgb(0).unwrap();
        assert!(color.r > 200 && color.g < 16 && color.b < 16);
    }

    #[test]
    fn test_index_wraps_by_default() {
        let mut driver: TestDriver<8> = ws2812_driver(3);
        driver.set_rgb(3, 1, 2, 3);
        assert_eq!(driver.rgb(0), Some(Rgb::new(1, 2, 3)));
        driver.set_rgb(7, 4, 5, 6);
        assert_eq!(driver.rgb(1), Some(Rgb::new(4, 5, 6)));
        assert_eq!(driver.rgb(4), driver.rgb(1));
    }

    #[test]
    fn test_index_discard_policy() {
        let config = ws2812_config(3).with_index_policy(IndexPolicy::Discard);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.set_rgb(3, 1, 2, 3);
        driver.set_white(3, 9);
        assert_eq!(driver.rgb(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(driver.rgb(3), None);
        assert_eq!(driver.wire_bytes(3), None);
    }

    #[test]
    fn test_fill_ranges() {
        let mut driver: TestDriver<8> = ws2812_driver(4);
        driver.fill_rgb_range(1, 2, 10, 20, 30);
        assert_eq!(driver.rgb(0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(driver.rgb(1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(driver.rgb(2), Some(Rgb::new(10, 20, 30)));
        assert_eq!(driver.rgb(3), Some(Rgb::new(0, 0, 0)));

        driver.fill_hsv_range(2, 3, 0, 0, 40);
        assert_eq!(driver.rgb(1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(driver.rgb(3), Some(Rgb::new(40, 40, 40)));

        driver.fill_hsv(0, 255, 255);
        for index in 0..4 {
            assert_eq!(driver.rgb(index), Some(Rgb::new(255, 0, 0)));
        }
    }

    #[test]
    fn test_white_ignored_on_rgb_strip() {
        let mut driver: TestDriver<8> = ws2812_driver(2);
        driver.set_rgb(0, 1, 2, 3);
        driver.set_white(0, 200);
        driver.fill_white(200);
        assert_eq!(driver.white(0), None);
        assert_eq!(driver.wire_bytes(0), Some(&[2u8, 1, 3][..]));
    }

    #[test]
    fn test_rgbw_strips() {
        let config = StripConfig::new(2, StripFamily::Sk6812, TICK_HZ);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.set_rgbw(0, 1, 2, 3, 4);
        assert_eq!(driver.wire_bytes(0), Some(&[1u8, 2, 3, 4][..]));
        assert_eq!(driver.white(0), Some(4));

        driver.set_rgb(0, 9, 9, 9);
        assert_eq!(driver.white(0), Some(4));

        driver.set_brightness(127);
        driver.set_white(1, 200);
        assert_eq!(driver.white(1), Some(100));

        let config = StripConfig::new(2, StripFamily::Sk6812Grbw, TICK_HZ);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.set_rgbw(1, 1, 2, 3, 4);
        assert_eq!(driver.wire_bytes(1), Some(&[2u8, 1, 3, 4][..]));
        assert_eq!(driver.rgb(1), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_rgbw_frame_uses_wide_halves() {
        let config = StripConfig::new(3, StripFamily::Sk6812, TICK_HZ);
        let mut driver: TestDriver<8> = driver_for(&config);
        driver.fill_white(0xFF);
        driver.show().unwrap();
        assert_eq!(driver.channel().last_len, 64);

        let capture = run_frame(&mut driver);
        let first = &capture.wire[..32];
        assert!(first[..24].iter().all(|&symbol| symbol == 31));
        assert!(first[24..].iter().all(|&symbol| symbol == 53));
    }

    #[test]
    fn test_mixed_segments() {
        let config = StripConfig::new(4, StripFamily::Ws2811Fast, TICK_HZ)
            .with_segment(2, StripFamily::Ws2812)
            .unwrap();
        let mut driver: TestDriver<8> = driver_for(&config);

        let segments = driver.layout().segments();
        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].start, segments[0].end), (0, 1));
        assert_eq!((segments[1].start, segments[1].end), (2, 3));

        driver.fill_rgb(0xFF, 0, 0);
        assert_eq!(driver.wire_bytes(1), Some(&[0xFFu8, 0, 0][..]));
        assert_eq!(driver.wire_bytes(2), Some(&[0u8, 0xFF, 0][..]));
        assert_eq!(driver.rgb(2), Some(Rgb::new(0xFF, 0, 0)));

        driver.show().unwrap();
        let capture = run_frame(&mut driver);
        // WS2811 pixel: red first, WS2811 duty
        assert_eq!(capture.wire[0], 53);
        assert_eq!(capture.wire[8], 28);
        // WS2812 pixel: green first, WS2812 duty
        assert_eq!(capture.wire[48], 35);
        assert_eq!(capture.wire[56], 60);
    }

    #[test]
    fn test_config_errors() {
        assert_eq!(config_error(&ws2812_config(0)), Some(ConfigError::EmptyStrip));
        assert_eq!(config_error(&ws2812_config(9)), Some(ConfigError::CapacityExceeded));
        assert_eq!(config_error(&ws2812_config(8)), None);
        assert_eq!(
            config_error(&ws2812_config(4).with_bit_rate(0)),
            Some(ConfigError::InvalidBitRate)
        );
        assert_eq!(
            config_error(&StripConfig::new(4, StripFamily::Ws2811Slow, 200_000_000)),
            Some(ConfigError::DutyOutOfRange)
        );
    }

    #[test]
    fn test_segment_errors() {
        let base = || StripConfig::new(6, StripFamily::Ws2812, TICK_HZ);

        let at_zero = base().with_segment(0, StripFamily::Ws2811Fast).unwrap();
        assert_eq!(config_error(&at_zero), Some(ConfigError::InvalidSegment));

        let past_end = base().with_segment(6, StripFamily::Ws2811Fast).unwrap();
        assert_eq!(config_error(&past_end), Some(ConfigError::InvalidSegment));

        let unordered = base()
            .with_segment(3, StripFamily::Ws2811Fast)
            .and_then(|config| config.with_segment(2, StripFamily::Ws2812))
            .unwrap();
        assert_eq!(config_error(&unordered), Some(ConfigError::InvalidSegment));

        let mixed = base().with_segment(3, StripFamily::Sk6812).unwrap();
        assert_eq!(config_error(&mixed), Some(ConfigError::MixedChannelCount));

        let too_many = base()
            .with_segment(1, StripFamily::Ws2811Fast)
            .and_then(|config| config.with_segment(2, StripFamily::Ws2812))
            .and_then(|config| config.with_segment(3, StripFamily::Ws2811Fast))
            .and_then(|config| config.with_segment(4, StripFamily::Ws2812));
        assert_eq!(too_many.err(), Some(ConfigError::TooManySegments));
    }

    #[test]
    fn test_release_stops_channel() {
        let mut driver: TestDriver<8> = ws2812_driver(3);
        driver.show().unwrap();
        let channel = driver.release();
        assert!(!channel.active);
        assert_eq!(channel.stops, 1);
    }

    #[test]
    fn test_smart_leds_write() {
        let mut driver: TestDriver<8> = ws2812_driver(3);
        driver.write([Rgb::new(10, 20, 30); 3]).unwrap();
        assert!(driver.is_busy());
        assert_eq!(driver.rgb(2), Some(Rgb::new(10, 20, 30)));

        assert_eq!(driver.write([Rgb::new(1, 1, 1); 3]), Err(Busy));
        assert_eq!(driver.rgb(0), Some(Rgb::new(10, 20, 30)));

        run_frame(&mut driver);
        driver.write([Rgb::new(5, 5, 5)]).unwrap();
        assert_eq!(driver.rgb(0), Some(Rgb::new(5, 5, 5)));
        assert_eq!(driver.rgb(1), Some(Rgb::new(10, 20, 30)));
    }
}
