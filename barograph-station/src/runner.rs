//! Top-level panel loop
//!
//! Polls the buttons against the current menu node and refreshes the
//! segment displays with the latest reading every refresh interval. While
//! an action holds the panel the refresh waits, since actions run their
//! own blocking loops.

use barograph_core::action::Key;
use barograph_core::config::{PanelConfig, TimingConfig};
use barograph_core::menu::Selection;
use barograph_core::panel::{Panel, Readout};
use barograph_core::period::Date;
use barograph_core::traits::{DataProvider, Metric, Reading};
use barograph_core::PanelError;
use barograph_hal::{DelayNs, RegisterIo};

use crate::menu::{build_menu, StationMenu};
use crate::station::Station;

/// Build the panel and menu, run until Quit, then hand back the bus
pub fn start<R, D, P>(
    io: R,
    delay: D,
    provider: P,
    today: Date,
    config: &PanelConfig,
) -> Result<(R, D), PanelError>
where
    R: RegisterIo,
    D: DelayNs,
    P: DataProvider,
{
    let mut panel = Panel::new(io, delay, config)?;
    let mut tree = build_menu(today)?;
    let mut station = Station::new(provider, today);

    #[cfg(feature = "defmt")]
    defmt::info!("Barograph panel ready, today is {}", today);

    run(&mut panel, &mut tree, &mut station, &config.timing)?;
    Ok(panel.release())
}

/// Main loop; returns once Quit is selected, with every surface cleared
pub fn run<R, D, P>(
    panel: &mut Panel<R, D>,
    tree: &mut StationMenu<P>,
    station: &mut Station<P>,
    timing: &TimingConfig,
) -> Result<(), PanelError>
where
    R: RegisterIo,
    D: DelayNs,
    P: DataProvider,
{
    let refresh_ticks = timing.refresh_ticks();
    let mut ticks: u32 = 0;
    let mut current = tree.root();

    refresh(panel, station);
    tree.draw(current, panel)?;

    loop {
        let keys = panel.poll();
        for key in Key::edges(keys) {
            match key {
                Key::Down => tree.down(current)?,
                Key::Up => tree.up(current)?,
                Key::Select => match tree.activate(current, panel, station)? {
                    Selection::Stay => {}
                    Selection::Enter(node) => current = node,
                    Selection::Quit => {
                        panel.clear_all();
                        #[cfg(feature = "defmt")]
                        defmt::info!("Quit selected, panel cleared");
                        return Ok(());
                    }
                },
            }
            tree.draw(current, panel)?;
        }

        ticks += 1;
        if ticks >= refresh_ticks {
            ticks = 0;
            refresh(panel, station);
        }
        panel.tick();
    }
}

/// Fetch the latest reading and show it; on failure the old values stay
fn refresh<R, D, P>(panel: &mut Panel<R, D>, station: &mut Station<P>)
where
    R: RegisterIo,
    D: DelayNs,
    P: DataProvider,
{
    match station.refresh_latest() {
        Some(reading) => show_reading(panel, &reading),
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("No recent reading, retrying next interval");
        }
    }
}

/// Clock as HHMM, outside and inside temperature on the side displays
fn show_reading<R: RegisterIo, D: DelayNs>(panel: &mut Panel<R, D>, reading: &Reading) {
    if let Err(_e) = panel.show_integer(Readout::Clock, reading.time.hhmm()) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Clock not shown: {}", _e);
        panel.blank(Readout::Clock);
    }

    for (which, metric) in [
        (Readout::Left, Metric::OutsideTemp),
        (Readout::Right, Metric::InsideTemp),
    ] {
        if let Err(_e) = panel.show_decimal(which, reading.get(metric)) {
            #[cfg(feature = "defmt")]
            defmt::warn!("{} not shown on {}: {}", metric, which, _e);
            panel.blank(which);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{date, reading, FixtureProvider};
    use barograph_display::segment::{pattern, SegmentDisplay};
    use barograph_hal::mock::{MockDelay, MockRegisters};

    const TEXT: u16 = 0x40;
    const DOWN: u16 = 0x90;
    const UP: u16 = 0x100;
    const SELECT: u16 = 0x80;

    const CLOCK: [u16; 5] = [0x10, 0x12, 0x14, 0x16, 0x18];
    const LEFT: [u16; 3] = [0x20, 0x22, 0x24];
    const RIGHT: [u16; 3] = [0x30, 0x32, 0x34];

    fn shown(panel: &mut Panel<MockRegisters, MockDelay>, addresses: &[u16]) -> f64 {
        SegmentDisplay::new(addresses)
            .unwrap()
            .read_number(panel.io_mut())
            .unwrap()
    }

    fn setup(
        config: &PanelConfig,
    ) -> (
        Panel<MockRegisters, MockDelay>,
        StationMenu<FixtureProvider>,
        Station<FixtureProvider>,
    ) {
        let today = date(2024, 3, 15);
        let panel = Panel::new(MockRegisters::new(), MockDelay::new(), config).unwrap();
        (panel, build_menu(today).unwrap(), Station::new(FixtureProvider::new(), today))
    }

    #[test]
    fn test_start_quits_and_clears() {
        let mut io = MockRegisters::new();
        // First read of each button seeds edge detection
        io.script(UP, &[0, 1]);
        io.script(SELECT, &[0, 0, 1]);

        let mut provider = FixtureProvider::new();
        provider.push_latest(Some(reading(7, 5, 4.5, 19.0)));

        let (io, delay) = start(
            io,
            MockDelay::new(),
            provider,
            date(2024, 3, 15),
            &PanelConfig::default(),
        )
        .unwrap();

        assert_eq!(delay.sleeps(), 1);
        assert!(io.screen(TEXT).is_empty());
        for address in CLOCK.iter().chain(&LEFT).chain(&RIGHT) {
            assert_eq!(io.peek(*address), pattern::EMPTY);
        }
        // Clock showed 705 before the quit
        assert!(io.writes_to(CLOCK[2]).contains(&pattern::SEVEN));
    }

    #[test]
    fn test_refresh_every_interval() {
        let config = PanelConfig {
            timing: TimingConfig {
                tick_ms: 50,
                refresh_s: 1,
            },
            ..PanelConfig::default()
        };
        let (mut panel, mut tree, mut station) = setup(&config);
        station.provider_mut().push_latest(Some(reading(12, 30, 8.5, 21.0)));
        station.provider_mut().push_latest(None);
        station.provider_mut().push_latest(Some(reading(12, 32, -3.0, 1234.0)));

        // Up to Quit at once, Select on the 45th poll
        panel.io_mut().script(UP, &[1]);
        let mut select = std::vec![0; 44];
        select.push(1);
        panel.io_mut().script(SELECT, &select);

        run(&mut panel, &mut tree, &mut station, &config.timing).unwrap();

        // Initial refresh plus one every 20 ticks
        assert_eq!(station.provider_mut().latest_calls, 3);
        assert_eq!(panel.delay().sleeps(), 44);
        assert_eq!(station.latest().map(|r| r.time.hhmm()), Some(1232));

        let left = panel.io().writes_to(LEFT[0]);
        let right = panel.io().writes_to(RIGHT[0]);
        // 8.50, then -3.0, then the final clear
        assert_eq!(left.len(), 3);
        // 21.0, then blanked because 1234 does not fit, then the final clear
        assert_eq!(right, [pattern::ZERO, pattern::EMPTY, pattern::EMPTY]);
        assert_eq!(
            panel.io().writes_to(CLOCK[1]),
            [pattern::THREE, pattern::THREE, pattern::EMPTY]
        );
    }

    #[test]
    fn test_navigates_submenu_and_back() {
        let (mut panel, mut tree, mut station) = setup(&PanelConfig::default());
        station.provider_mut().push_latest(Some(reading(9, 41, 8.5, 21.0)));

        // Polls: 1 down, 2 select (Statistics), 3 up (Back), 4 select (root),
        // 5 up (Period), 6 up (Quit), 7 select
        panel.io_mut().script(DOWN, &[1]);
        panel.io_mut().script(UP, &[0, 0, 1, 1, 0, 1]);
        panel.io_mut().script(SELECT, &[0, 1, 1, 0, 0, 0, 1]);

        run(&mut panel, &mut tree, &mut station, &TimingConfig::default()).unwrap();

        let root = tree.root();
        let statistics = tree.node(root).unwrap().children()[1];
        assert_eq!(tree.node(root).unwrap().selected(), 4);
        assert_eq!(tree.node(statistics).unwrap().selected(), 18);
        assert_eq!(panel.delay().sleeps(), 6);
        assert!(panel.io().screen(TEXT).is_empty());
    }

    #[test]
    fn test_readouts_before_quit() {
        let (mut panel, mut tree, mut station) = setup(&PanelConfig::default());
        station.provider_mut().push_latest(Some(reading(23, 59, 8.5, 21.0)));
        refresh(&mut panel, &mut station);

        assert_eq!(shown(&mut panel, &CLOCK), 2359.0);
        assert_eq!(shown(&mut panel, &LEFT), 8.5);
        assert_eq!(shown(&mut panel, &RIGHT), 21.0);

        // Quit straight away
        panel.io_mut().script(UP, &[1]);
        panel.io_mut().script(SELECT, &[1]);
        run(&mut panel, &mut tree, &mut station, &TimingConfig::default()).unwrap();
        assert_eq!(station.provider_mut().latest_calls, 2);
        assert_eq!(panel.io().peek(LEFT[0]), pattern::EMPTY);
    }
}
