//! Main window: capture → detect → control → render, once per repaint
//!
//! [`VolumeControlApp`] implements `eframe::App`. Every `update` pulls one
//! frame, runs the landmark source and the volume controller, then draws the
//! video with its overlay. ESC closes the window at the next frame boundary;
//! a failed or finished capture closes it too. The frame source is released
//! when the app is dropped.

use super::drawing::{
    draw_fingertips, draw_hand, draw_text, draw_volume_bar, FrameTransform, HINT_COLOR,
    TEXT_COLOR,
};
use super::fps::FpsCounter;
use crate::capture::{self, FrameSource};
use crate::controller::{FrameReport, GestureStatus, VolumeController};
use crate::detector::{to_hand_frame, LandmarkSource, PointerSample};
use crate::gesture::HandFrame;
use std::time::Instant;
use tracing::{debug, error, info};

const HINT: &str = "Show index+middle fingers (both up) to control volume";

/// Everything needed to draw the most recent frame
struct FrameView {
    width: u32,
    height: u32,
    hand: Option<HandFrame>,
    report: FrameReport,
    fps: f32,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    EndOfStream,
    CaptureFailed,
}

pub struct VolumeControlApp {
    source: Box<dyn FrameSource>,
    detector: Box<dyn LandmarkSource>,
    controller: VolumeController,
    mirror: bool,
    fps: FpsCounter,
    texture: Option<egui::TextureHandle>,
    view: Option<FrameView>,
    pointer: Option<PointerSample>,
    stopped: Option<StopReason>,
}

impl VolumeControlApp {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn LandmarkSource>,
        controller: VolumeController,
        mirror: bool,
    ) -> Self {
        info!(
            "Frame source: {} | landmarks: {} | {}",
            source.name(),
            detector.name(),
            controller.audio().label()
        );
        Self {
            source,
            detector,
            controller,
            mirror,
            fps: FpsCounter::new(),
            texture: None,
            view: None,
            pointer: None,
            stopped: None,
        }
    }

    fn stop(&mut self, ctx: &egui::Context, reason: StopReason) {
        self.stopped = Some(reason);
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    /// Capture, detect and control for one frame
    fn step(&mut self, ctx: &egui::Context) {
        let mut frame = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("Capture stream ended");
                self.stop(ctx, StopReason::EndOfStream);
                return;
            },
            Err(e) => {
                error!("{}", e);
                self.stop(ctx, StopReason::CaptureFailed);
                return;
            },
        };

        if self.mirror {
            capture::mirror(&mut frame);
        }

        self.detector.observe_pointer(self.pointer);
        let hand = match self.detector.detect(&frame) {
            Ok(hand) => hand.map(|h| to_hand_frame(&h, frame.width(), frame.height())),
            Err(e) => {
                debug!("Landmark detection failed this frame: {:#}", e);
                None
            },
        };

        let report = self.controller.process(hand.as_ref());
        let fps = self.fps.tick(Instant::now());

        let image = egui::ColorImage::from_rgb(
            [frame.width() as usize, frame.height() as usize],
            frame.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("camera-frame", image, egui::TextureOptions::LINEAR));
            },
        }

        self.view = Some(FrameView {
            width: frame.width(),
            height: frame.height(),
            hand,
            report,
            fps,
        });
    }

    fn render(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());

        let (Some(view), Some(texture)) = (&self.view, &self.texture) else {
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "Waiting for first frame...",
                egui::FontId::proportional(18.0),
                HINT_COLOR,
            );
            return;
        };

        let xf = FrameTransform::fit(response.rect, view.width, view.height);
        painter.image(
            texture.id(),
            xf.rect(),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some(hand) = &view.hand {
            draw_hand(&painter, &xf, hand);
        }

        match view.report.status {
            GestureStatus::Active {
                index_tip,
                middle_tip,
                ..
            } => {
                draw_fingertips(&painter, &xf, index_tip, middle_tip);
                draw_text(
                    &painter,
                    &xf,
                    (10.0, 40.0),
                    format!("Vol: {}%", view.report.volume.percent()),
                    30.0,
                    TEXT_COLOR,
                );
            },
            GestureStatus::Idle => {
                draw_text(&painter, &xf, (10.0, 40.0), HINT, 18.0, HINT_COLOR);
            },
            GestureStatus::NoHand => {},
        }

        let (fw, fh) = (xf.frame_width(), xf.frame_height());
        draw_volume_bar(&painter, &xf, view.report.volume, (fw - 80.0, 80.0, 40.0, 300.0));
        draw_text(
            &painter,
            &xf,
            (10.0, fh - 20.0),
            format!("FPS: {}", view.fps as u32),
            21.0,
            TEXT_COLOR,
        );

        if !self.controller.audio().is_live() {
            draw_text(
                &painter,
                &xf,
                (10.0, fh - 50.0),
                self.controller.audio().label(),
                16.0,
                HINT_COLOR,
            );
        }

        let pressed = ui.input(|i| i.pointer.primary_down());
        self.pointer = response
            .hover_pos()
            .and_then(|pos| xf.to_frame(pos))
            .map(|(x, y)| PointerSample { x, y, pressed });
    }
}

impl eframe::App for VolumeControlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.stopped.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            info!("ESC pressed, quitting");
            self.stop(ctx, StopReason::Quit);
        }

        if self.stopped.is_none() {
            self.step(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| self.render(ui));

        ctx.request_repaint();
    }
}

impl Drop for VolumeControlApp {
    fn drop(&mut self) {
        info!(
            "Releasing {} (stopped: {:?}, final volume {}%)",
            self.source.name(),
            self.stopped.unwrap_or(StopReason::Quit),
            self.controller.volume().percent()
        );
    }
}
