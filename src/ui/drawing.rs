//! Overlay drawing primitives
//!
//! All positions and sizes are given in frame pixels and mapped onto the
//! on-screen video rectangle through [`FrameTransform`], so the overlay stays
//! glued to the video whatever the window size.

use crate::gesture::landmarks::HAND_CONNECTIONS;
use crate::gesture::{HandFrame, PixelPoint};
use crate::volume::SmoothedVolume;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

pub const TEXT_COLOR: Color32 = Color32::WHITE;
pub const HINT_COLOR: Color32 = Color32::from_gray(200);
const TIP_COLOR: Color32 = Color32::from_rgb(0, 255, 0);
const TIP_LINK_COLOR: Color32 = Color32::from_rgb(0, 0, 255);
const MIDPOINT_COLOR: Color32 = Color32::from_rgb(255, 0, 255);
const BONE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
const JOINT_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
const BAR_BACKGROUND: Color32 = Color32::from_gray(50);
const BAR_FILL: Color32 = Color32::from_rgb(0, 200, 0);
const BAR_BORDER: Color32 = Color32::from_gray(200);

/// Maps frame pixel coordinates onto a screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    rect: Rect,
    frame_width: f32,
    frame_height: f32,
}

impl FrameTransform {
    /// Fit a `frame_width` × `frame_height` frame inside `available`,
    /// preserving aspect ratio and centering it
    pub fn fit(available: Rect, frame_width: u32, frame_height: u32) -> Self {
        let fw = frame_width.max(1) as f32;
        let fh = frame_height.max(1) as f32;
        let scale = (available.width() / fw).min(available.height() / fh);
        let size = egui::vec2(fw * scale, fh * scale);
        Self {
            rect: Rect::from_center_size(available.center(), size),
            frame_width: fw,
            frame_height: fh,
        }
    }

    /// Screen rectangle covered by the frame
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Screen pixels per frame pixel
    pub fn scale(&self) -> f32 {
        self.rect.width() / self.frame_width
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Pos2 {
        egui::pos2(
            self.rect.min.x + x * self.scale(),
            self.rect.min.y + y / self.frame_height * self.rect.height(),
        )
    }

    pub fn point(&self, p: PixelPoint) -> Pos2 {
        self.to_screen(p.x as f32, p.y as f32)
    }

    /// Frame coordinates of a screen position, or None outside the video
    pub fn to_frame(&self, pos: Pos2) -> Option<(f32, f32)> {
        if !self.rect.contains(pos) {
            return None;
        }
        Some((
            (pos.x - self.rect.min.x) / self.rect.width() * self.frame_width,
            (pos.y - self.rect.min.y) / self.rect.height() * self.frame_height,
        ))
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }
}

/// Draw text with its baseline-left corner at a frame position
pub fn draw_text(
    painter: &Painter,
    xf: &FrameTransform,
    at: (f32, f32),
    text: impl ToString,
    size: f32,
    color: Color32,
) {
    painter.text(
        xf.to_screen(at.0, at.1),
        Align2::LEFT_BOTTOM,
        text,
        FontId::proportional(size * xf.scale()),
        color,
    );
}

/// Draw bones and joints of a detected hand
pub fn draw_hand(painter: &Painter, xf: &FrameTransform, hand: &HandFrame) {
    let stroke = Stroke::new(2.0 * xf.scale(), BONE_COLOR);
    for (a, b) in HAND_CONNECTIONS {
        if let (Some(pa), Some(pb)) = (hand.get(a), hand.get(b)) {
            painter.line_segment([xf.point(pa), xf.point(pb)], stroke);
        }
    }
    for kp in hand.keypoints() {
        painter.circle_filled(xf.point(kp.position), 3.0 * xf.scale(), JOINT_COLOR);
    }
}

/// Highlight the fingertip pair that drives the volume
pub fn draw_fingertips(
    painter: &Painter,
    xf: &FrameTransform,
    index_tip: PixelPoint,
    middle_tip: PixelPoint,
) {
    let s = xf.scale();
    let (a, b) = (xf.point(index_tip), xf.point(middle_tip));
    painter.circle_filled(a, 8.0 * s, TIP_COLOR);
    painter.circle_filled(b, 8.0 * s, TIP_COLOR);
    painter.line_segment([a, b], Stroke::new(2.0 * s, TIP_LINK_COLOR));
    painter.circle_filled(xf.point(index_tip.midpoint(middle_tip)), 10.0 * s, MIDPOINT_COLOR);
}

/// Vertical volume bar with percentage label
///
/// `x`, `y`, `w`, `h` are the bar's frame-pixel bounds.
pub fn draw_volume_bar(
    painter: &Painter,
    xf: &FrameTransform,
    volume: SmoothedVolume,
    (x, y, w, h): (f32, f32, f32, f32),
) {
    let outer = Rect::from_min_max(xf.to_screen(x, y), xf.to_screen(x + w, y + h));
    painter.rect_filled(outer, 0.0, BAR_BACKGROUND);

    let filled_h = (h * volume.get()).trunc();
    let filled = Rect::from_min_max(xf.to_screen(x, y + h - filled_h), xf.to_screen(x + w, y + h));
    painter.rect_filled(filled, 0.0, BAR_FILL);

    painter.rect_stroke(outer, 0.0, Stroke::new(2.0 * xf.scale(), BAR_BORDER));

    draw_text(
        painter,
        xf,
        (x - 10.0, y + h + 30.0),
        format!("{}%", volume.percent()),
        24.0,
        TEXT_COLOR,
    );
}
