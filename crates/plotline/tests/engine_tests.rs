//! Cross-module behavior: gestures feeding layout, charts, and animation.

use std::time::{Duration, Instant};

use plotline::animation::{AnimationConfig, AnimationScheduler, HiddenSeries};
use plotline::charts::{BarChart, ChartFrame};
use plotline::events::PointerButton;
use plotline::layout::ChartLayout;
use plotline::series::Series;
use plotline::ticks::{TickConfig, linear_ticks};
use plotline::viewport::{Axis, ViewportController, ZoomRange};
use plotline_core::geometry::{Pos, Size};
use plotline_render::Color;

fn bar_chart() -> BarChart {
    BarChart::new(vec![
        Series::new("a", Color::parse_css("#4477aa"), vec![2.0, 6.0, 4.0, 8.0]),
        Series::new("b", Color::parse_css("#ee6677"), vec![1.0, 3.0, 5.0, 2.0]),
    ])
}

#[test]
fn zoom_gesture_narrows_ticks_and_clips_the_scene() {
    let canvas = Size::new(800.0, 600.0);
    let layout = ChartLayout::default();
    let plot = layout.plot_rect(canvas);
    let mut controller = ViewportController::new();

    // Horizontal selection over the left half of the plot.
    let y = plot.y + 40.0;
    controller.pointer_down(plot, Pos::new(plot.x, y), PointerButton::Primary);
    controller.pointer_move(plot, Pos::new(plot.x + plot.width / 2.0, y));
    controller.pointer_up(plot, Pos::new(plot.x + plot.width / 2.0, y));

    let zoom = controller.zoom();
    assert!((zoom.x_min - 0.0).abs() < 1e-6);
    assert!((zoom.x_max - 0.5).abs() < 1e-6);

    let chart = bar_chart();
    let frame = ChartFrame {
        canvas,
        plot,
        zoom,
        entrance: 1.0,
        visibility: &[1.0, 1.0],
        background: Color::WHITE,
    };
    let scene = chart.build(&frame);
    // Zoomed frames clip to the plot; every bar is still expressed.
    assert_eq!(scene.clip, Some(plot));
    assert_eq!(scene.rects.len(), 8);

    // Tick positions cover only the zoomed slice of the data range.
    let y_range = chart.y_range(&frame);
    let ticks = linear_ticks(y_range.0, y_range.1, &TickConfig::default());
    assert!(*ticks.positions.last().unwrap() <= y_range.1 + ticks.step);
}

#[test]
fn animation_drives_chart_heights_through_the_callback_contract() {
    let duration = Duration::from_millis(600);
    let mut scheduler =
        AnimationScheduler::new(AnimationConfig::default().with_duration(duration));
    let hidden = HiddenSeries::new();
    scheduler.set_series_count(2, &hidden);
    scheduler.sync_hidden(&hidden, Instant::now());

    let t0 = Instant::now();
    scheduler.set_ready(true, t0);

    // Mid-entrance, bars are proportionally shorter.
    scheduler.tick(t0 + duration / 2);
    let mid_entrance = scheduler.entrance_progress();
    assert!(mid_entrance > 0.0 && mid_entrance < 1.0);

    let canvas = Size::new(800.0, 600.0);
    let layout = ChartLayout::default();
    let chart = bar_chart();

    let build = |entrance: f32, visibility: &[f32]| {
        let frame = ChartFrame {
            canvas,
            plot: layout.plot_rect(canvas),
            zoom: ZoomRange::IDENTITY,
            entrance,
            visibility,
            background: Color::WHITE,
        };
        chart.build(&frame)
    };

    let mid = build(mid_entrance, scheduler.visibility());
    scheduler.tick(t0 + duration * 2);
    assert_eq!(scheduler.entrance_progress(), 1.0);
    let done = build(scheduler.entrance_progress(), scheduler.visibility());

    for (m, d) in mid.rects.iter().zip(&done.rects) {
        assert!((m.h - d.h * mid_entrance).abs() < 1e-2);
    }
}

#[test]
fn hidden_series_fade_composes_with_zoom() {
    let canvas = Size::new(800.0, 600.0);
    let layout = ChartLayout::default();
    let plot = layout.plot_rect(canvas);

    let mut controller = ViewportController::new();
    let y = plot.y + 10.0;
    controller.pointer_down(plot, Pos::new(plot.x + 100.0, y), PointerButton::Primary);
    controller.pointer_move(plot, Pos::new(plot.x + 300.0, y));
    controller.pointer_up(plot, Pos::new(plot.x + 300.0, y));
    assert!(controller.is_zoomed());

    let mut scheduler = AnimationScheduler::new(AnimationConfig::default());
    let mut hidden = HiddenSeries::new();
    scheduler.set_series_count(2, &hidden);
    let t0 = Instant::now();
    scheduler.sync_hidden(&hidden, t0);
    hidden.toggle(1);
    scheduler.sync_hidden(&hidden, t0);
    scheduler.set_ready(true, t0);
    scheduler.tick(t0 + Duration::from_secs(2));

    let frame = ChartFrame {
        canvas,
        plot,
        zoom: controller.zoom(),
        entrance: scheduler.entrance_progress(),
        visibility: scheduler.visibility(),
        background: Color::WHITE,
    };
    let scene = bar_chart().build(&frame);
    assert_eq!(scene.clip, Some(plot));
    // Series 1 faded out entirely but its bars are still expressed.
    assert_eq!(scene.rects[1].color.a, 0.0);
    assert_eq!(scene.rects[0].color.a, 1.0);
}

#[test]
fn pan_after_zoom_keeps_apply_to_range_consistent() {
    let plot = plotline_core::geometry::Rect::new(0.0, 0.0, 400.0, 300.0);
    let mut controller = ViewportController::new();

    controller.pointer_down(plot, Pos::new(100.0, 10.0), PointerButton::Primary);
    controller.pointer_move(plot, Pos::new(300.0, 10.0));
    controller.pointer_up(plot, Pos::new(300.0, 10.0));
    let before = controller.zoom();

    controller.pointer_down(plot, Pos::new(200.0, 150.0), PointerButton::Secondary);
    controller.pointer_move(plot, Pos::new(120.0, 150.0));
    controller.pointer_up(plot, Pos::new(120.0, 150.0));

    let after = controller.zoom();
    let span_before = before.span(Axis::X);
    assert!((after.span(Axis::X) - span_before).abs() < 1e-9);

    // Panning right in fraction space shifts the visible data window.
    let (lo, hi) = after.apply_to_range(0.0, 100.0, Axis::X);
    assert!(lo > before.apply_to_range(0.0, 100.0, Axis::X).0);
    assert!((hi - lo) - span_before * 100.0 < 1e-6);
}
