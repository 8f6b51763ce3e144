// File: crates/kbar/tests/kbar_tests.rs
// Purpose: Facade behaviour: overlay collection, font handling and rendering through kbar-core.

mod common;

use common::{four_day_frame, resolver, western_resolver, RecordingInstaller};
use kbar::{
    Figure, HostEnvironment, KBar, KBarError, LineStyle, OverlayOptions, PanelRole, PlotError, PlotOptions,
    StaticFontRegistry,
};
use kbar_core::{parse_color, Color};

fn render(kbar: &KBar<'_>, options: PlotOptions) -> Figure {
    kbar.plot(false, options.returnfig(true)).expect("plot").expect("figure")
}

#[test]
fn starts_without_overlays_and_borrows_frame() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    assert_eq!(kbar.overlays().len(), 0);
    assert!(std::ptr::eq(kbar.frame(), &df));
    assert_eq!(kbar.frame(), &four_day_frame());
}

#[test]
fn explicit_font_skips_detection() {
    let df = four_day_frame();
    let installer = RecordingInstaller::new();
    let calls = installer.calls.clone();
    let r = resolver(StaticFontRegistry::default(), installer, HostEnvironment::DesktopLinux);
    let kbar = KBar::with_resolver(&df, Some("Noto Sans CJK TC"), r);
    assert_eq!(kbar.font(), Some("Noto Sans CJK TC"));
    assert!(calls.borrow().is_empty());
    let text = kbar.text_config().expect("text config");
    assert_eq!(text.sans_serif[0], "Noto Sans CJK TC");
    assert!(!text.sans_serif.iter().any(|f| f == "SimHei"));
    assert!(!text.unicode_minus);
}

#[test]
fn detected_font_becomes_active() {
    let df = four_day_frame();
    let r = resolver(StaticFontRegistry::new(["PingFang TC", "DejaVu Sans"]), RecordingInstaller::new(), HostEnvironment::Other);
    let kbar = KBar::with_resolver(&df, None, r);
    assert_eq!(kbar.font(), Some("PingFang TC"));
    assert!(kbar.text_config().is_some());
}

#[test]
fn unresolved_font_leaves_no_text_config() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    assert_eq!(kbar.font(), None);
    assert!(kbar.text_config().is_none());
}

#[test]
fn add_overlay_appends_one() {
    let df = four_day_frame();
    let mut kbar = KBar::with_resolver(&df, None, western_resolver());
    let opts = OverlayOptions::new()
        .color(parse_color("red").unwrap())
        .line_style(LineStyle::Dashed)
        .width(2.0);
    kbar.add_overlay(df.close(), opts).unwrap();
    assert_eq!(kbar.overlays().len(), 1);
}

#[test]
fn overlay_keeps_series_length() {
    let df = four_day_frame();
    let mut kbar = KBar::with_resolver(&df, None, western_resolver());
    kbar.add_overlay(df.close(), OverlayOptions::new().color(parse_color("blue").unwrap())).unwrap();
    assert_eq!(kbar.overlays()[0].len(), df.len());
    assert_eq!(kbar.overlays()[0].columns()[0].values(), df.close().values());
}

#[test]
fn text_overlay_is_a_type_error() {
    let df = four_day_frame();
    let mut kbar = KBar::with_resolver(&df, None, western_resolver());
    let err = kbar.add_overlay("invalid_data", OverlayOptions::new()).unwrap_err();
    assert!(matches!(err, KBarError::Plot(PlotError::InvalidPlotData { .. })));
    assert_eq!(kbar.overlays().len(), 0);
}

#[test]
fn plot_without_returnfig_returns_none() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let out = kbar.plot(false, PlotOptions::new().volume(true).title("Test Plot").ylabel("Price")).unwrap();
    assert!(out.is_none());
}

#[test]
fn plot_with_returnfig_has_volume_axes() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let fig = render(&kbar, PlotOptions::new().volume(true).title("Test Plot"));
    assert!(fig.axes().len() >= 2);
    assert!(fig.axes_for(PanelRole::Volume).is_some());
}

#[test]
fn title_reaches_the_figure() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let fig = render(&kbar, PlotOptions::new().volume(true).title("My Test Title"));
    assert!(fig.suptitle().unwrap_or_default().contains("My Test Title"));
}

#[test]
fn custom_sizing_options_are_forwarded() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let opts = PlotOptions::new().volume(true).figscale(1.2).figratio(10.0, 6.0).tight_layout(true).xrotation(30.0);
    let fig = render(&kbar, opts);
    assert_eq!((fig.width(), fig.height()), (960, 576));
}

#[test]
fn embedding_flag_does_not_change_output() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let a = kbar.plot(true, PlotOptions::new().volume(true).returnfig(true)).unwrap().unwrap();
    let b = kbar.plot(false, PlotOptions::new().volume(true).returnfig(true)).unwrap().unwrap();
    assert_eq!(a.axes().len(), b.axes().len());
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
}

#[test]
fn collaborator_errors_pass_through() {
    let df = four_day_frame();
    let mut kbar = KBar::with_resolver(&df, None, western_resolver());
    kbar.add_overlay(vec![1.0, 2.0], OverlayOptions::new()).unwrap();
    let err = kbar.plot(false, PlotOptions::new()).unwrap_err();
    assert!(matches!(err, KBarError::Plot(PlotError::OverlayLength { expected: 4, actual: 2, .. })));
}

#[test]
fn end_to_end_with_real_fonts() -> anyhow::Result<()> {
    let df = four_day_frame();
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("kbar.png");
    let mut kbar = KBar::with_font(&df, Some("DejaVu Sans"));
    kbar.add_overlay(df.close(), OverlayOptions::new().color(parse_color("red").unwrap()).line_style(LineStyle::Dashed).width(2.0))?;
    let fig = kbar
        .plot(false, PlotOptions::new().volume(true).returnfig(true).title("收盤價 K 線").savefig(&out))?
        .expect("figure");
    assert!(fig.axes().len() >= 2);
    assert!(std::fs::metadata(&out)?.len() > 0);
    Ok(())
}

#[test]
fn empty_font_name_runs_detection() {
    let df = four_day_frame();
    let r = resolver(StaticFontRegistry::new(["PingFang TC"]), RecordingInstaller::new(), HostEnvironment::Other);
    let kbar = KBar::with_resolver(&df, Some(""), r);
    assert_eq!(kbar.font(), Some("PingFang TC"));
    assert_eq!(kbar.text_config().unwrap().sans_serif[0], "PingFang TC");
}

#[test]
fn style_puts_candidates_first_with_red_up_green_down() {
    let df = four_day_frame();
    let r = resolver(
        StaticFontRegistry::new(["Arial", "DejaVu Sans", "Noto Sans CJK TC"]),
        RecordingInstaller::new(),
        HostEnvironment::Other,
    );
    let kbar = KBar::with_resolver(&df, None, r);
    let style = kbar.chart_style();
    assert_eq!(&style.font_families[..3], &["Noto Sans CJK TC", "DejaVu Sans", "Arial"]);
    // construction-time families follow the candidates without repeats
    assert!(style.font_families.iter().any(|f| f == "Verdana"));
    assert_eq!(style.font_families.iter().filter(|f| *f == "DejaVu Sans").count(), 1);
    assert!(!style.unicode_minus);
    assert_eq!(style.market_colors.candle.up, Color::from_rgb(0xff, 0x00, 0x00));
    assert_eq!(style.market_colors.candle.down, Color::from_rgb(0x00, 0x80, 0x00));
}

#[test]
fn up_candle_body_is_drawn_red() {
    let df = four_day_frame();
    let kbar = KBar::with_resolver(&df, None, western_resolver());
    let fig = render(&kbar, PlotOptions::new().volume(true));
    let price = fig.axes_for(PanelRole::Price).expect("price axes");

    // Row 0 opens at 100 and closes at 102; sample the middle of its body.
    let slot = price.rect.width() as f64 / df.len() as f64;
    let x = (price.rect.left as f64 + 0.5 * slot).round() as usize;
    let (vmin, vmax) = price.y_range;
    let frac = (101.0 - vmin) / (vmax - vmin);
    let y = (price.rect.bottom as f64 - frac * price.rect.height() as f64).round() as usize;

    let at = (y * fig.width() as usize + x) * 4;
    assert_eq!(&fig.pixels()[at..at + 4], &[255, 0, 0, 255]);
}
