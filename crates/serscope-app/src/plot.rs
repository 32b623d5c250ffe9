//! The telemetry pipeline: parse 6-axis samples and redraw the full trace.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use egui::{Color32, RichText};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};
use serscope_core::{decode_line, SerialConfig, SerialEvent, SerialService};
use serscope_decode::{ImuSample, SampleHistory, AXIS_NAMES};

/// Per-axis trace colors: x, y, z.
const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(0xE5, 0x48, 0x3B),
    Color32::from_rgb(0x3B, 0xB2, 0x73),
    Color32::from_rgb(0x3B, 0x7D, 0xE5),
];

const REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Open the reader service and run the plot window until the user closes it.
/// A fatal transport error stops the feed but leaves the window interactive
/// with the final trace on screen.
pub fn run(cfg: SerialConfig) -> Result<()> {
    let service = SerialService::open(cfg);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("SerScope IMU Telemetry"),
        ..Default::default()
    };

    eframe::run_native(
        "serscope-plot",
        options,
        Box::new(move |_cc| Ok(Box::new(PlotApp::new(service)))),
    )
    .map_err(|e| anyhow!("failed to run plot window: {e}"))
}

enum Link {
    Connecting,
    Up(String),
    Down(String),
}

struct PlotApp {
    service: SerialService,
    history: SampleHistory,
    link: Link,
}

impl PlotApp {
    fn new(service: SerialService) -> Self {
        Self {
            service,
            history: SampleHistory::new(),
            link: Link::Connecting,
        }
    }

    /// Drain pending events in arrival order. Accepted samples are stamped
    /// with the receipt time and appended; malformed lines vanish silently.
    fn drain_events(&mut self) {
        while let Ok(event) = self.service.events().try_recv() {
            match event {
                SerialEvent::Opened(port) => {
                    self.link = Link::Up(port);
                }
                SerialEvent::Line(frame) => {
                    if let Some(sample) = decode_line(&frame).as_deref().and_then(ImuSample::parse)
                    {
                        self.history.push(now_secs(), &sample);
                    }
                }
                SerialEvent::Error(message) => {
                    self.link = Link::Down(message);
                }
                SerialEvent::Closed => {}
            }
        }
    }

    fn status_text(&self) -> RichText {
        let cfg = self.service.config();
        match &self.link {
            Link::Connecting => RichText::new(format!("Connecting to {}...", cfg.port_name)),
            Link::Up(port) => {
                RichText::new(format!("Connected to {} at {} baud", port, cfg.baud_rate))
                    .color(AXIS_COLORS[1])
            }
            Link::Down(message) => {
                RichText::new(format!("Connection lost: {message}")).color(AXIS_COLORS[0])
            }
        }
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status_text());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} samples", self.history.len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = (ui.available_height() / 2.0 - 28.0).max(120.0);

            ui.heading("Linear Acceleration");
            chart(
                ui,
                "accel",
                chart_height,
                std::array::from_fn(|axis| self.history.accel_series(axis)),
            );

            ui.heading("Angular Velocity");
            chart(
                ui,
                "gyro",
                chart_height,
                std::array::from_fn(|axis| self.history.gyro_series(axis)),
            );
        });

        // The full trace is redrawn every frame; the periodic repaint keeps
        // new samples flowing in even when the user is not interacting.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

fn chart(ui: &mut egui::Ui, id: &str, height: f32, series: [Vec<[f64; 2]>; 3]) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Time (s)")
        .show(ui, |plot_ui| {
            for (axis, points) in series.into_iter().enumerate() {
                plot_ui.line(
                    Line::new(AXIS_NAMES[axis], PlotPoints::from(points))
                        .color(AXIS_COLORS[axis])
                        .width(1.5),
                );
            }
        });
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}
