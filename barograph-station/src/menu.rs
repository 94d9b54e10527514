//! Station menu layout
//!
//! ```text
//! Period      Year / Month / Day range editors, Back applies the window
//! Statistics  one page per metric, sunrise and sunset, Back
//! Summary     degree days, heat wave, nice days, temperature differences
//! Rain year   Year editor, Result page, Back
//! Quit
//! ```

use barograph_core::action::{Action, EntryFormat, Target};
use barograph_core::menu::{MenuError, MenuTree, NodeId};
use barograph_core::period::Date;
use barograph_core::traits::{DataProvider, Metric};

use crate::pages;
use crate::station::Station;

/// Menu tree over the station context
pub type StationMenu<P> = MenuTree<Station<P>>;

/// Earliest year the editors offer
pub const FIRST_YEAR: i32 = 2000;

const BACK: &str = "Back";

const CELSIUS: EntryFormat = EntryFormat::new(1, " C");
const PERCENT: EntryFormat = EntryFormat::new(0, "%");
const SPEED: EntryFormat = EntryFormat::new(1, " m/s");

/// Metric pages listed before the sunrise and sunset pages
const MEASURED: [(&str, Metric, EntryFormat); 13] = [
    ("Outside temperature", Metric::OutsideTemp, CELSIUS),
    ("Inside temperature", Metric::InsideTemp, CELSIUS),
    ("Inside humidity", Metric::InsideHumidity, PERCENT),
    ("Outside humidity", Metric::OutsideHumidity, PERCENT),
    ("Air pressure", Metric::Barometer, EntryFormat::new(1, " hPa")),
    ("Wind speed", Metric::WindSpeed, SPEED),
    ("Avg. wind speed", Metric::AvgWindSpeed, SPEED),
    ("Wind direction", Metric::WindDirection, EntryFormat::new(0, " deg")),
    ("Rainfall", Metric::RainRate, EntryFormat::new(1, " mm")),
    ("UV level", Metric::UvLevel, EntryFormat::new(1, "")),
    ("Solar radiation", Metric::SolarRadiation, EntryFormat::new(1, " W/m2")),
    ("Xmit battery", Metric::TransmitterBattery, EntryFormat::new(0, "")),
    ("Battery level", Metric::BatteryLevel, EntryFormat::new(1, "%")),
];

/// Metric pages listed after the sunrise and sunset pages
const DERIVED: [(&str, Metric, EntryFormat); 3] = [
    ("Dew point", Metric::DewPoint, CELSIUS),
    ("Heat index", Metric::HeatIndex, EntryFormat::new(0, "")),
    ("Wind chill", Metric::WindChill, CELSIUS),
];

/// Build the whole menu; editors start on `today`
pub fn build_menu<P: DataProvider>(today: Date) -> Result<StationMenu<P>, MenuError> {
    let mut tree = MenuTree::new("Barograph")?;
    let root = tree.root();

    let period = tree.add_submenu(root, "Period")?;
    add_period(&mut tree, period, today)?;

    let statistics = tree.add_submenu(root, "Statistics")?;
    add_statistics(&mut tree, statistics)?;

    tree.add_child(root, "Summary", Some(Action::page(pages::summary_page::<P>)))?;

    let rain = tree.add_submenu(root, "Rain year")?;
    add_rain_year(&mut tree, rain, today)?;

    tree.add_child(root, "Quit", Some(Action::navigate(Target::Quit)))?;

    #[cfg(feature = "defmt")]
    defmt::debug!("menu built with {} nodes", tree.len());

    Ok(tree)
}

fn add_period<P: DataProvider>(
    tree: &mut StationMenu<P>,
    menu: NodeId,
    today: Date,
) -> Result<(), MenuError> {
    let year = i32::from(today.year());
    let month = i32::from(today.month());
    let day = i32::from(today.day());

    tree.add_child(
        menu,
        "Year",
        Some(Action::range(year, year, FIRST_YEAR, year, pages::save_years::<P>)),
    )?;
    tree.add_child(
        menu,
        "Month",
        Some(Action::range(month, month, 1, 12, pages::save_months::<P>)),
    )?;
    tree.add_child(
        menu,
        "Day",
        Some(Action::range(day, day, 1, 31, pages::save_days::<P>)),
    )?;
    tree.add_child(
        menu,
        BACK,
        Some(Action::guarded(Target::Grandparent, pages::apply_period::<P>)),
    )?;
    Ok(())
}

fn add_statistics<P: DataProvider>(
    tree: &mut StationMenu<P>,
    menu: NodeId,
) -> Result<(), MenuError> {
    let stats = |(name, metric, format): (&'static str, Metric, EntryFormat)| {
        (name, Action::stats(metric, format, pages::gather_metric::<P>))
    };

    for (name, action) in MEASURED.into_iter().map(stats) {
        tree.add_child(menu, name, Some(action))?;
    }
    tree.add_child(menu, "Sunrise", Some(Action::page(pages::sunrise_page::<P>)))?;
    tree.add_child(menu, "Sunset", Some(Action::page(pages::sunset_page::<P>)))?;
    for (name, action) in DERIVED.into_iter().map(stats) {
        tree.add_child(menu, name, Some(action))?;
    }
    tree.add_child(menu, BACK, Some(Action::navigate(Target::Grandparent)))?;
    Ok(())
}

fn add_rain_year<P: DataProvider>(
    tree: &mut StationMenu<P>,
    menu: NodeId,
    today: Date,
) -> Result<(), MenuError> {
    let year = i32::from(today.year());

    tree.add_child(
        menu,
        "Year",
        Some(Action::single(year, FIRST_YEAR, year, pages::save_rain_year::<P>)),
    )?;
    tree.add_child(
        menu,
        "Result",
        Some(Action::page(pages::rain_result_page::<P>)),
    )?;
    tree.add_child(menu, BACK, Some(Action::navigate(Target::Grandparent)))?;
    Ok(())
}
