use chrono::NaiveDate;
use relay_config::BoardConfig;
use relay_core::window::{DateRangePreset, DateWindow};

use crate::cli::root_commands::RangeArgs;
use crate::commands::shared::parse::parse_enum;

/// Resolve `--range` / `--from --to` against `today`, falling back to the
/// configured default range.
pub fn resolve_window(
    args: &RangeArgs,
    config: &BoardConfig,
    today: NaiveDate,
) -> anyhow::Result<DateWindow> {
    let preset = args
        .range
        .as_deref()
        .map(|raw| parse_enum::<DateRangePreset>(raw, "range"))
        .transpose()?;

    if let (Some(from), Some(to)) = (args.from, args.to) {
        if let Some(preset) = preset.filter(|p| *p != DateRangePreset::Custom) {
            anyhow::bail!("--range {preset} conflicts with --from/--to");
        }
        return Ok(DateWindow::new(from, to)?);
    }

    Ok(preset
        .unwrap_or(config.default_range)
        .resolve(today, config.week_start)?)
}

/// True when the caller narrowed the dates explicitly.
pub const fn has_explicit_range(args: &RangeArgs) -> bool {
    args.range.is_some() || args.from.is_some()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use relay_config::BoardConfig;
    use relay_core::window::WeekStart;

    use super::resolve_window;
    use crate::cli::root_commands::RangeArgs;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("valid date")
    }

    #[test]
    fn default_range_is_this_week_from_sunday() {
        // 2026-10-14 is a Wednesday.
        let window = resolve_window(&RangeArgs::default(), &BoardConfig::default(), day(14))
            .expect("should resolve");
        assert_eq!((window.start, window.end), (day(11), day(17)));
    }

    #[test]
    fn configured_week_start_applies() {
        let config = BoardConfig {
            week_start: WeekStart::Monday,
            ..BoardConfig::default()
        };
        let args = RangeArgs {
            range: Some("last-week".into()),
            ..RangeArgs::default()
        };
        let window = resolve_window(&args, &config, day(14)).expect("should resolve");
        assert_eq!((window.start, window.end), (day(5), day(11)));
    }

    #[test]
    fn explicit_dates_win() {
        let args = RangeArgs {
            range: None,
            from: Some(day(1)),
            to: Some(day(3)),
        };
        let window = resolve_window(&args, &BoardConfig::default(), day(14)).expect("should resolve");
        assert_eq!((window.start, window.end), (day(1), day(3)));
    }

    #[test]
    fn custom_without_dates_fails() {
        let args = RangeArgs {
            range: Some("custom".into()),
            ..RangeArgs::default()
        };
        assert!(resolve_window(&args, &BoardConfig::default(), day(14)).is_err());
    }

    #[test]
    fn preset_conflicting_with_dates_fails() {
        let args = RangeArgs {
            range: Some("this_month".into()),
            from: Some(day(1)),
            to: Some(day(3)),
        };
        assert!(resolve_window(&args, &BoardConfig::default(), day(14)).is_err());
    }

    #[test]
    fn reversed_dates_fail() {
        let args = RangeArgs {
            range: None,
            from: Some(day(5)),
            to: Some(day(1)),
        };
        assert!(resolve_window(&args, &BoardConfig::default(), day(14)).is_err());
    }
}
