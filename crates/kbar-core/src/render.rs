// File: crates/kbar-core/src/render.rs
// Summary: `plot` entry point and the headless candlestick rendering pipeline on Skia CPU raster surfaces.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use skia_safe as skia;
use tracing::{debug, warn};

use crate::error::{PlotError, PlotResult};
use crate::figure::{Axes, Figure, PanelRole};
use crate::frame::OhlcvFrame;
use crate::layout::{self, Insets, RectI32};
use crate::options::{ChartType, PlotOptions, PlotRequest};
use crate::overlay::{Overlay, OverlayKind};
use crate::scale::{IndexScale, ValueScale};
use crate::style::ChartStyle;
use crate::text::{Anchor, TextShaper};

const TITLE_SIZE: f32 = 16.0;
const LABEL_SIZE: f32 = 12.0;
const TICK_SIZE: f32 = 10.0;
const PANEL_GAP: i32 = 8;
const DEFAULT_XROTATION: f32 = 45.0;
const DEFAULT_DATE_FORMAT: &str = "%b %d";

/// Render `frame` as described by `req`.
///
/// Returns the figure when `req.options.returnfig` is set; writes a PNG when
/// `req.options.savefig` is set. Data problems are reported as errors before
/// anything is drawn.
pub fn plot(frame: &OhlcvFrame, req: PlotRequest<'_>) -> PlotResult<Option<Figure>> {
    let PlotRequest { chart_type, style, overlays, options: opts, fonts } = req;
    if frame.is_empty() {
        return Err(PlotError::EmptyData);
    }
    if opts.volume && frame.volume().is_none() {
        return Err(PlotError::MissingVolume);
    }
    for (i, ov) in overlays.iter().enumerate() {
        if ov.len() != frame.len() {
            return Err(PlotError::OverlayLength { overlay: i, expected: frame.len(), actual: ov.len() });
        }
    }

    let date_format = opts.datetime_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(PlotError::InvalidDateFormat { format: date_format.to_string() });
    }

    let (width, height) = layout::figure_pixels(opts.figsize, opts.figratio, opts.figscale);
    if width < 64 || height < 64 || width > 16_384 || height > 16_384 {
        return Err(PlotError::InvalidFigure { width, height });
    }

    let panels = panel_numbers(opts.volume, overlays);
    let ratios = panel_ratios(opts.panel_ratios.as_deref(), panels.len());
    let insets = Insets::for_figure(opts.title.is_some(), opts.tight_layout);
    let area = RectI32::from_ltrb(insets.left, insets.top, width - insets.right, height - insets.bottom);
    let rects = layout::stack_panels(area, &ratios, PANEL_GAP);
    debug!(width, height, panels = panels.len(), overlays = overlays.len(), "plot layout");

    let shaper = match fonts {
        Some(fc) => TextShaper::with_collection(fc, &style.font_families),
        None => TextShaper::system(&style.font_families),
    };

    let xlabels = x_tick_labels(frame, date_format, area.width())?;

    let mut surface = skia::surfaces::raster_n32_premul((width, height)).ok_or(PlotError::Surface)?;
    let mut axes = Vec::with_capacity(panels.len());
    {
        let canvas = surface.canvas();
        canvas.clear(style.background);

        if let Some(title) = &opts.title {
            let y = (insets.top as f32 * 0.5 + TITLE_SIZE * 0.4).max(TITLE_SIZE);
            shaper.draw(canvas, title, width as f32 * 0.5, y, TITLE_SIZE, style.text, Anchor::Center);
        }

        let xs = IndexScale::new(area, frame.len());
        for (&panel, &rect) in panels.iter().zip(rects.iter()) {
            let role = match panel {
                0 => PanelRole::Price,
                1 if opts.volume => PanelRole::Volume,
                n => PanelRole::Extra(n),
            };
            let range = panel_range(frame, overlays, &opts.mav, role, panel);
            let ys = ValueScale::padded(rect, range, 0.05);
            let ylabel = panel_ylabel(opts, overlays, role, panel);

            draw_panel_frame(canvas, &shaper, style, rect, &ys, ylabel.as_deref());
            draw_x_grid(canvas, style, rect, &xs, &xlabels);

            canvas.save();
            let clip = skia::Rect::from_ltrb(rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
            canvas.clip_rect(clip, skia::ClipOp::Intersect, true);
            match role {
                PanelRole::Price => {
                    draw_prices(canvas, frame, chart_type, style, &xs, &ys);
                    draw_moving_averages(canvas, frame, &opts.mav, style, &xs, &ys);
                }
                PanelRole::Volume => draw_volume(canvas, frame, style, &xs, &ys),
                PanelRole::Extra(_) => {}
            }
            for ov in overlays.iter().filter(|o| o.options().panel == panel) {
                draw_overlay(canvas, ov, &xs, &ys);
            }
            canvas.restore();

            axes.push(Axes {
                role,
                panel,
                rect,
                y_range: (ys.vmin, ys.vmax),
                ylabel,
                xticklabels: xlabels.iter().map(|(_, s)| s.clone()).collect(),
            });
        }

        if let Some(bottom) = rects.last() {
            let rotation = opts.xrotation.unwrap_or(DEFAULT_XROTATION);
            for (i, label) in &xlabels {
                let x = xs.to_px(*i);
                let y = bottom.bottom as f32 + TICK_SIZE + 4.0;
                let anchor = if rotation.abs() < 1e-3 { Anchor::Center } else { Anchor::Right };
                shaper.draw_rotated(canvas, label, x, y, TICK_SIZE, style.text, rotation, anchor);
            }
        }
    }

    let info = skia::ImageInfo::new((width, height), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(PlotError::Surface);
    }

    let figure = Figure::new(width as u32, height as u32, pixels, axes, opts.title.clone());
    if let Some(path) = &opts.savefig {
        figure.save_png(path)?;
        debug!(path = %path.display(), "figure saved");
    }
    Ok(opts.returnfig.then_some(figure))
}

// ---- layout helpers ---------------------------------------------------------

/// Sorted, de-duplicated panel numbers: price, volume (if any), overlay panels.
fn panel_numbers(volume: bool, overlays: &[Overlay]) -> Vec<usize> {
    let mut panels = vec![0usize];
    if volume {
        panels.push(1);
    }
    panels.extend(overlays.iter().map(|o| o.options().panel));
    panels.sort_unstable();
    panels.dedup();
    panels
}

fn panel_ratios(requested: Option<&[f32]>, count: usize) -> Vec<f32> {
    match requested {
        Some(r) if r.len() == count && r.iter().all(|v| *v > 0.0) => r.to_vec(),
        Some(r) => {
            warn!(given = r.len(), panels = count, "ignoring panel_ratios that do not match the panel count");
            default_ratios(count)
        }
        None => default_ratios(count),
    }
}

fn default_ratios(count: usize) -> Vec<f32> {
    (0..count).map(|i| if i == 0 { 5.0 } else { 2.0 }).collect()
}

fn panel_range(frame: &OhlcvFrame, overlays: &[Overlay], mav: &[usize], role: PanelRole, panel: usize) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut take = |r: Option<(f64, f64)>| {
        if let Some((a, b)) = r {
            lo = lo.min(a);
            hi = hi.max(b);
        }
    };
    match role {
        PanelRole::Price => {
            take(frame.price_range());
            for &w in mav {
                take(frame.close().rolling_mean(w).finite_range());
            }
        }
        PanelRole::Volume => {
            take(frame.volume().and_then(|v| v.finite_range()).map(|(_, b)| (0.0, b)));
        }
        PanelRole::Extra(_) => {}
    }
    for ov in overlays.iter().filter(|o| o.options().panel == panel) {
        take(ov.value_range());
    }
    if lo.is_finite() && hi.is_finite() { (lo, hi) } else { (0.0, 1.0) }
}

fn panel_ylabel(opts: &PlotOptions, overlays: &[Overlay], role: PanelRole, panel: usize) -> Option<String> {
    let from_overlay = || {
        overlays
            .iter()
            .filter(|o| o.options().panel == panel)
            .find_map(|o| o.options().ylabel.clone())
    };
    match role {
        PanelRole::Price => Some(opts.ylabel.clone().unwrap_or_else(|| "Price".to_string())),
        PanelRole::Volume => Some(opts.ylabel_lower.clone().unwrap_or_else(|| "Volume".to_string())),
        PanelRole::Extra(_) => from_overlay(),
    }
}

/// (row index, formatted date) pairs, thinned to fit the plot width.
fn x_tick_labels(frame: &OhlcvFrame, fmt: &str, plot_width: i32) -> PlotResult<Vec<(usize, String)>> {
    let max_labels = (plot_width / 60).max(1) as usize;
    let stride = layout::label_stride(frame.len(), max_labels);
    frame
        .index()
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(i, t)| {
            let mut label = String::new();
            write!(label, "{}", t.format(fmt)).map_err(|_| PlotError::InvalidDateFormat { format: fmt.to_string() })?;
            Ok((i, label))
        })
        .collect()
}

fn format_tick(style: &ChartStyle, v: f64, precision: usize) -> String {
    let s = if v.abs() >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v.abs() >= 1e4 {
        format!("{:.0}", v)
    } else {
        format!("{:.*}", precision, v)
    };
    style.format_minus(&s)
}

// ---- drawing helpers --------------------------------------------------------

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

fn draw_panel_frame(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    style: &ChartStyle,
    rect: RectI32,
    ys: &ValueScale,
    ylabel: Option<&str>,
) {
    let (l, t, r, b) = (rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
    let grid = stroke(style.grid, 1.0);
    let ticks = layout::nice_ticks(ys.vmin, ys.vmax, ((rect.height() / 40).max(2)) as usize);
    let precision = layout::tick_precision(&ticks).min(6);
    for v in &ticks {
        let y = ys.to_px(*v);
        canvas.draw_line((l, y), (r, y), &grid);
        let label = format_tick(style, *v, precision);
        shaper.draw(canvas, &label, l - 6.0, y + TICK_SIZE * 0.4, TICK_SIZE, style.text, Anchor::Right);
    }

    canvas.draw_rect(skia::Rect::from_ltrb(l, t, r, b), &stroke(style.axis_line, 1.0));

    if let Some(label) = ylabel {
        let x = (l - 54.0).max(LABEL_SIZE);
        shaper.draw_rotated(canvas, label, x, (t + b) * 0.5, LABEL_SIZE, style.text, 90.0, Anchor::Center);
    }
}

fn draw_x_grid(canvas: &skia::Canvas, style: &ChartStyle, rect: RectI32, xs: &IndexScale, labels: &[(usize, String)]) {
    let grid = stroke(style.grid, 1.0);
    for (i, _) in labels {
        let x = xs.to_px(*i);
        canvas.draw_line((x, rect.top as f32 + 1.0), (x, rect.bottom as f32 - 1.0), &grid);
    }
}

fn draw_prices(canvas: &skia::Canvas, frame: &OhlcvFrame, chart_type: ChartType, style: &ChartStyle, xs: &IndexScale, ys: &ValueScale) {
    let colors = &style.market_colors;
    let half = xs.body_px() * 0.5;
    for (i, c) in frame.candles().enumerate() {
        if !c.is_finite() {
            continue;
        }
        let x = xs.to_px(i);
        let up = c.is_up();
        let (y_o, y_h, y_l, y_c) = (ys.to_px(c.o), ys.to_px(c.h), ys.to_px(c.l), ys.to_px(c.c));
        match chart_type {
            ChartType::Candle => {
                canvas.draw_line((x, y_h), (x, y_l), &stroke(colors.wick.pick(up), 1.0));
                let top = y_o.min(y_c);
                let bot = y_o.max(y_c).max(top + 1.0);
                let body = skia::Rect::from_ltrb(x - half, top, x + half, bot);
                canvas.draw_rect(body, &fill(colors.candle.pick(up)));
                canvas.draw_rect(body, &stroke(colors.edge.pick(up), 1.0));
            }
        }
    }
}

fn draw_moving_averages(canvas: &skia::Canvas, frame: &OhlcvFrame, windows: &[usize], style: &ChartStyle, xs: &IndexScale, ys: &ValueScale) {
    for (k, &w) in windows.iter().enumerate() {
        if w < 2 || w > frame.len() {
            debug!(window = w, rows = frame.len(), "skipping moving average");
            continue;
        }
        let color = style.mav_colors.get(k % style.mav_colors.len().max(1)).copied().unwrap_or(skia::Color::BLUE);
        let ma = frame.close().rolling_mean(w);
        draw_polyline(canvas, ma.values(), xs, ys, &stroke(color, 1.2));
    }
}

fn draw_volume(canvas: &skia::Canvas, frame: &OhlcvFrame, style: &ChartStyle, xs: &IndexScale, ys: &ValueScale) {
    let Some(volume) = frame.volume() else { return };
    let half = xs.body_px() * 0.5;
    let base = ys.to_px(0.0);
    for (i, (c, v)) in frame.candles().zip(volume.values()).enumerate() {
        if !v.is_finite() {
            continue;
        }
        let x = xs.to_px(i);
        let top = ys.to_px(*v).min(base - 1.0);
        let color = style.market_colors.volume.pick(c.is_up());
        canvas.draw_rect(skia::Rect::from_ltrb(x - half, top, x + half, base), &fill(color));
    }
}

fn draw_overlay(canvas: &skia::Canvas, ov: &Overlay, xs: &IndexScale, ys: &ValueScale) {
    let o = ov.options();
    let base_color = o.color.unwrap_or(skia::Color::from_rgb(0x1f, 0x77, 0xb4));
    let color = base_color.with_a((o.alpha * base_color.a() as f32).round() as u8);
    for column in ov.columns() {
        match o.kind {
            OverlayKind::Line => {
                let mut paint = stroke(color, o.width);
                if let Some(intervals) = o.line_style.intervals(o.width) {
                    paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
                }
                draw_polyline(canvas, column.values(), xs, ys, &paint);
            }
            OverlayKind::Scatter => {
                let paint = fill(color);
                for (i, v) in column.values().iter().enumerate() {
                    if v.is_finite() {
                        canvas.draw_circle((xs.to_px(i), ys.to_px(*v)), o.marker_size * 0.5, &paint);
                    }
                }
            }
            OverlayKind::Bar => {
                let paint = fill(color);
                let half = xs.body_px() * 0.5;
                let base = ys.to_px(0.0_f64.clamp(ys.vmin, ys.vmax));
                for (i, v) in column.values().iter().enumerate() {
                    if v.is_finite() {
                        let y = ys.to_px(*v);
                        let x = xs.to_px(i);
                        canvas.draw_rect(skia::Rect::from_ltrb(x - half, y.min(base), x + half, y.max(base)), &paint);
                    }
                }
            }
        }
    }
}

/// Polyline through finite values; NaN breaks the line into segments.
fn draw_polyline(canvas: &skia::Canvas, values: &[f64], xs: &IndexScale, ys: &ValueScale, paint: &skia::Paint) {
    fn flush(canvas: &skia::Canvas, run: &mut Vec<skia::Point>, paint: &skia::Paint) {
        if run.len() >= 2 {
            canvas.draw_points(skia::canvas::PointMode::Polygon, run, paint);
        }
        run.clear();
    }
    let mut run: Vec<skia::Point> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        if v.is_finite() {
            run.push(skia::Point::new(xs.to_px(i), ys.to_px(*v)));
        } else {
            flush(canvas, &mut run, paint);
        }
    }
    flush(canvas, &mut run, paint);
}
