//! Interactive demo host: a composite chart in a winit window.
//!
//! Drag with the left button to zoom into a span (the drag locks to one
//! axis), drag with the right button to pan while zoomed, double-click to
//! reset, click legend entries (or press 1/2/3) to toggle series.

use std::sync::Arc;
use std::time::{Duration, Instant};

use plotline::animation::{AnimationConfig, AnimationScheduler, HiddenSeries};
use plotline::charts::{BarChart, ChartFrame, CompositeChart, LineChart, push_selection_overlay};
use plotline::events::PointerButton;
use plotline::layout::ChartLayout;
use plotline::overlay::{self, Legend, OverlayFrame, OverlayStyle};
use plotline::series::{Series, XyPoint, XySeries};
use plotline::ticks::{TickConfig, linear_ticks};
use plotline::viewport::ViewportController;
use plotline_core::geometry::{Pos, Size};
use plotline_core::time::TimeTracker;
use plotline_render::{CanvasRenderer, Color, GraphicsContext};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(350);

fn sample_chart() -> CompositeChart {
    CompositeChart::new(
        BarChart::new(vec![
            Series::new(
                "requests",
                Color::parse_css("#4477aa"),
                vec![32.0, 48.0, 41.0, 65.0, 58.0, 72.0, 69.0, 80.0],
            ),
            Series::new(
                "errors",
                Color::parse_css("#ee6677"),
                vec![3.0, 5.0, 2.0, 9.0, 6.0, 4.0, 8.0, 5.0],
            ),
        ]),
        LineChart::new(vec![XySeries::new(
            "latency p95",
            Color::parse_css("#228833"),
            (0..8)
                .map(|i| XyPoint::new(i as f64 + 0.5, 20.0 + 12.0 * ((i as f64) * 0.9).sin().abs()))
                .collect(),
        )])
        .with_markers(3.0),
    )
}

struct DemoApp {
    context: Arc<GraphicsContext>,
    window: Option<Arc<Window>>,
    renderer: Option<CanvasRenderer>,
    chart: CompositeChart,
    layout: ChartLayout,
    legend: Legend,
    overlay_style: OverlayStyle,
    controller: ViewportController,
    scheduler: AnimationScheduler,
    hidden: HiddenSeries,
    cursor: Pos,
    last_primary_down: Option<(Instant, Pos)>,
    time: TimeTracker,
}

impl DemoApp {
    fn new(context: Arc<GraphicsContext>) -> Self {
        let chart = sample_chart();
        let mut scheduler = AnimationScheduler::new(AnimationConfig::default());
        let hidden = HiddenSeries::new();
        scheduler.set_series_count(chart.series_count(), &hidden);
        scheduler.sync_hidden(&hidden, Instant::now());

        Self {
            context,
            window: None,
            renderer: None,
            chart,
            layout: ChartLayout::default().with_legend(24.0),
            legend: Legend::new(),
            overlay_style: OverlayStyle::default(),
            controller: ViewportController::new(),
            scheduler,
            hidden,
            cursor: Pos::new(0.0, 0.0),
            last_primary_down: None,
            time: TimeTracker::new(),
        }
    }

    fn canvas_size(&self) -> Size {
        self.renderer
            .as_ref()
            .map(|r| {
                let (w, h) = r.size();
                Size::new(w as f32, h as f32)
            })
            .unwrap_or(Size::new(1.0, 1.0))
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn toggle_series(&mut self, index: usize) {
        if index >= self.chart.series_count() {
            return;
        }
        self.hidden.toggle(index);
        self.scheduler.sync_hidden(&self.hidden, Instant::now());
        self.request_redraw();
    }

    fn redraw(&mut self) {
        let frame_time = self.time.tick();
        tracing::trace!(
            frame = frame_time.frame_count,
            dt_ms = frame_time.delta.as_secs_f64() * 1e3,
            "redraw"
        );
        self.scheduler.tick(Instant::now());

        let canvas = self.canvas_size();
        let plot = self.layout.plot_rect(canvas);
        let frame = ChartFrame {
            canvas,
            plot,
            zoom: self.controller.zoom(),
            entrance: self.scheduler.entrance_progress(),
            visibility: self.scheduler.visibility(),
            background: Color::parse_css("#fdfdfb"),
        };

        let mut scene = self.chart.build(&frame);
        if let Some(selection) = self.controller.selection() {
            push_selection_overlay(&mut scene, selection, self.controller.selection_style());
        }

        // The overlay layer is composed as commands; a real host hands them
        // to its 2D painter. The demo only keeps the legend hit rectangles.
        let mut text_layer = OverlayFrame::new();
        overlay::push_axis_lines(&mut text_layer, plot, &self.overlay_style);
        let y_range = self.chart.bars.y_range(&frame);
        let ticks = linear_ticks(y_range.0, y_range.1, &TickConfig::default());
        overlay::push_y_ticks(&mut text_layer, plot, y_range, &ticks, &self.overlay_style);
        if let Some(strip) = self.layout.legend_rect(canvas) {
            self.legend
                .layout(strip, &self.chart.legend_items(), &self.overlay_style);
            self.legend
                .compose(&mut text_layer, frame.visibility, &self.overlay_style);
        }
        tracing::trace!(overlay_cmds = text_layer.cmds().len(), "composed overlay");

        if let Some(renderer) = &mut self.renderer {
            if let Err(err) = renderer.draw(&scene) {
                tracing::warn!(%err, "dropped frame");
            }
        }
    }

    fn pointer_down(&mut self, button: PointerButton) {
        let plot = self.layout.plot_rect(self.canvas_size());
        let pos = self.cursor;

        if button == PointerButton::Primary {
            let now = Instant::now();
            let is_double = self.last_primary_down.is_some_and(|(at, p)| {
                now.duration_since(at) < DOUBLE_CLICK_WINDOW
                    && (p.x - pos.x).abs() < 4.0
                    && (p.y - pos.y).abs() < 4.0
            });
            self.last_primary_down = Some((now, pos));
            if is_double && self.controller.double_click(plot, pos).is_consumed() {
                self.request_redraw();
                return;
            }
        }

        if self.controller.pointer_down(plot, pos, button).is_consumed() {
            self.request_redraw();
            return;
        }
        // Not consumed by the gesture machine: chart-level hit-testing.
        if button == PointerButton::Primary {
            if let Some(index) = self.legend.hit(pos) {
                self.toggle_series(index);
            }
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("plotline interactive demo")
                        .with_inner_size(winit::dpi::LogicalSize::new(900.0, 620.0)),
                )
                .expect("create window"),
        );

        let size = window.inner_size();
        match CanvasRenderer::new(
            self.context.clone(),
            window.clone(),
            size.width,
            size.height,
        ) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                let redraw_window = window.clone();
                self.scheduler
                    .set_redraw_hook(Box::new(move || redraw_window.request_redraw()));
                self.scheduler
                    .set_callback(Box::new(|entrance, visibility| {
                        tracing::trace!(entrance, ?visibility, "animation frame");
                    }));
                self.scheduler.set_ready(true, Instant::now());
            }
            Err(err) => {
                // Fallback path: the chart renders as text instead of a canvas.
                tracing::warn!(%err, "renderer unavailable, falling back to text");
                println!("chart unavailable: {err}");
                event_loop.exit();
            }
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.scheduler.cancel();
                if let Some(renderer) = &mut self.renderer {
                    renderer.destroy();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Pos::new(position.x as f32, position.y as f32);
                let plot = self.layout.plot_rect(self.canvas_size());
                if self.controller.pointer_move(plot, self.cursor).is_consumed() {
                    self.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if self.controller.pointer_leave().is_handled() {
                    self.request_redraw();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => PointerButton::Auxiliary,
                };
                match state {
                    ElementState::Pressed => self.pointer_down(button),
                    ElementState::Released => {
                        let plot = self.layout.plot_rect(self.canvas_size());
                        if self.controller.pointer_up(plot, self.cursor).is_consumed() {
                            self.request_redraw();
                        }
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Key::Character(c) = event.logical_key.as_ref() {
                        match c {
                            "1" => self.toggle_series(0),
                            "2" => self.toggle_series(1),
                            "3" => self.toggle_series(2),
                            _ => {}
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() {
    plotline_core::logging::init();

    let context = match GraphicsContext::new_sync() {
        Ok(context) => context,
        Err(err) => {
            // The recoverable initialization failure: no canvas, text instead.
            println!("chart unavailable: {err}");
            return;
        }
    };

    let event_loop = EventLoop::new().expect("event loop");
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = DemoApp::new(context);
    event_loop.run_app(&mut app).expect("run event loop");
}
