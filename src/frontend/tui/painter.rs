//! Rasterizes widget draw commands into a ratatui buffer.
//!
//! Virtual pixels map onto terminal cells through a fixed cell size (8x16 by
//! default). A cell belongs to a shape when its center does. Fills blend into
//! the cell background, outlines and lines use box-drawing glyphs in the
//! foreground, and text is written one character per cell.

use crate::paint::{Corners, DrawList, PackedColor, Rect, Vec2};
use ratatui::{buffer::Buffer, layout::Rect as CellRect, style::Color};

/// [`DrawList`] over a region of a ratatui [`Buffer`]
pub struct BufferPainter<'a> {
    buf: &'a mut Buffer,
    area: CellRect,
    cell: Vec2,
    clip_stack: Vec<Rect>,
    /// Color assumed under cells that have no RGB background yet
    backdrop: (u8, u8, u8),
}

impl<'a> BufferPainter<'a> {
    /// Virtual pixel (0, 0) is the top-left corner of `area`
    pub fn new(buf: &'a mut Buffer, area: CellRect, cell: Vec2) -> Self {
        Self {
            buf,
            area,
            cell,
            clip_stack: Vec::new(),
            backdrop: (0, 0, 0),
        }
    }

    pub fn with_backdrop(mut self, rgb: (u8, u8, u8)) -> Self {
        self.backdrop = rgb;
        self
    }

    /// Virtual pixel rectangle covered by the painter's area
    pub fn viewport(&self) -> Rect {
        Rect::from_min_size(
            Vec2::ZERO,
            Vec2::new(
                self.area.width as f32 * self.cell.x,
                self.area.height as f32 * self.cell.y,
            ),
        )
    }

    fn clip(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or_else(|| self.viewport())
    }

    fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell.x,
            (row as f32 + 0.5) * self.cell.y,
        )
    }

    /// Cell column/row range whose centers may fall inside `rect`
    fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let rect = rect.intersect(&self.clip());
        if rect.is_empty() {
            return None;
        }
        let col0 = (rect.min.x / self.cell.x - 0.5).ceil().max(0.0) as u16;
        let row0 = (rect.min.y / self.cell.y - 0.5).ceil().max(0.0) as u16;
        let col1 = ((rect.max.x / self.cell.x - 0.5).ceil() as u16).min(self.area.width);
        let row1 = ((rect.max.y / self.cell.y - 0.5).ceil() as u16).min(self.area.height);
        (col0 < col1 && row0 < row1).then_some((col0, row0, col1, row1))
    }

    fn visible(&self, col: u16, row: u16) -> bool {
        col < self.area.width && row < self.area.height && self.clip().contains(self.cell_center(col, row))
    }

    fn cell_at(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell.x) as u16;
        let row = (p.y / self.cell.y) as u16;
        self.visible(col, row).then_some((col, row))
    }

    fn blend_bg(&mut self, col: u16, row: u16, color: PackedColor) {
        let backdrop = self.backdrop;
        let Some(cell) = self.buf.cell_mut((self.area.x + col, self.area.y + row)) else {
            return;
        };
        let under = match cell.bg {
            Color::Rgb(r, g, b) => (r, g, b),
            _ => backdrop,
        };
        let alpha = color.a() as f32 / 255.0;
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        cell.set_bg(Color::Rgb(
            mix(color.r(), under.0),
            mix(color.g(), under.1),
            mix(color.b(), under.2),
        ));
        if color.a() == 255 {
            cell.set_char(' ');
        }
    }

    fn put_glyph(&mut self, col: u16, row: u16, glyph: char, color: PackedColor) {
        if let Some(cell) = self.buf.cell_mut((self.area.x + col, self.area.y + row)) {
            cell.set_char(glyph).set_fg(to_color(color));
        }
    }

    fn fill_where(&mut self, bounds: Rect, color: PackedColor, inside: impl Fn(Vec2) -> bool) {
        let Some((col0, row0, col1, row1)) = self.cell_span(bounds) else {
            return;
        };
        for row in row0..row1 {
            for col in col0..col1 {
                if self.visible(col, row) && inside(self.cell_center(col, row)) {
                    self.blend_bg(col, row, color);
                }
            }
        }
    }
}

pub fn to_color(color: PackedColor) -> Color {
    Color::Rgb(color.r(), color.g(), color.b())
}

/// Whether `p` is inside `rect` once the selected corners are rounded by `radius`
fn inside_rounded(rect: Rect, radius: f32, corners: Corners, p: Vec2) -> bool {
    if !rect.contains(p) {
        return false;
    }
    let r = radius.min(rect.width() * 0.5).min(rect.height() * 0.5);
    if r <= 0.0 {
        return true;
    }

    let (top_left, top_right) = match corners {
        Corners::All => (true, true),
        Corners::TopLeft => (true, false),
        Corners::TopRight => (false, true),
        Corners::None => (false, false),
    };
    let bottom = corners == Corners::All;
    let checks = [
        (top_left, Vec2::new(rect.min.x + r, rect.min.y + r), p.x < rect.min.x + r && p.y < rect.min.y + r),
        (top_right, Vec2::new(rect.max.x - r, rect.min.y + r), p.x > rect.max.x - r && p.y < rect.min.y + r),
        (bottom, Vec2::new(rect.min.x + r, rect.max.y - r), p.x < rect.min.x + r && p.y > rect.max.y - r),
        (bottom, Vec2::new(rect.max.x - r, rect.max.y - r), p.x > rect.max.x - r && p.y > rect.max.y - r),
    ];
    checks.iter().all(|&(rounded, center, in_corner)| {
        let d = p - center;
        !(rounded && in_corner) || d.x * d.x + d.y * d.y <= r * r
    })
}

impl DrawList for BufferPainter<'_> {
    fn push_clip_rect(&mut self, rect: Rect) {
        let clipped = self.clip().intersect(&rect);
        self.clip_stack.push(clipped);
    }

    fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
    }

    fn rect_filled(&mut self, rect: Rect, color: PackedColor, rounding: f32, corners: Corners) {
        self.fill_where(rect, color, |p| inside_rounded(rect, rounding, corners, p));
    }

    fn rect(
        &mut self,
        rect: Rect,
        color: PackedColor,
        rounding: f32,
        corners: Corners,
        _thickness: f32,
    ) {
        let Some((col0, row0, col1, row1)) = self.cell_span(rect) else {
            return;
        };
        let (last_col, last_row) = (col1 - 1, row1 - 1);
        let round = rounding > 0.0;
        let (round_tl, round_tr, round_bottom) = match corners {
            Corners::All => (round, round, round),
            Corners::TopLeft => (round, false, false),
            Corners::TopRight => (false, round, false),
            Corners::None => (false, false, false),
        };

        for row in row0..row1 {
            for col in col0..col1 {
                let top = row == row0;
                let bottom = row == last_row;
                let left = col == col0;
                let right = col == last_col;
                let glyph = match (top, bottom, left, right) {
                    (true, true, _, _) => '─',
                    (_, _, true, true) => '│',
                    (true, _, true, _) => if round_tl { '╭' } else { '┌' },
                    (true, _, _, true) => if round_tr { '╮' } else { '┐' },
                    (_, true, true, _) => if round_bottom { '╰' } else { '└' },
                    (_, true, _, true) => if round_bottom { '╯' } else { '┘' },
                    (true, _, _, _) | (_, true, _, _) => '─',
                    (_, _, true, _) | (_, _, _, true) => '│',
                    _ => continue,
                };
                if self.visible(col, row) {
                    self.put_glyph(col, row, glyph, color);
                }
            }
        }
    }

    fn circle_filled(&mut self, center: Vec2, radius: f32, color: PackedColor) {
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        self.fill_where(bounds, color, |p| {
            let d = p - center;
            d.x * d.x + d.y * d.y <= radius * radius
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: PackedColor, thickness: f32) {
        // Rings thinner than a cell would vanish between cell centers
        let band = thickness.max(self.cell.x.min(self.cell.y) * 0.5);
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        let Some((col0, row0, col1, row1)) = self.cell_span(bounds) else {
            return;
        };
        for row in row0..row1 {
            for col in col0..col1 {
                let d = self.cell_center(col, row) - center;
                let dist = (d.x * d.x + d.y * d.y).sqrt();
                if dist <= radius && dist > radius - band && self.visible(col, row) {
                    self.put_glyph(col, row, '·', color);
                }
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: PackedColor, _thickness: f32) {
        let delta = to - from;
        let glyph = if delta.y.abs() * self.cell.x <= delta.x.abs() * self.cell.y * 0.5 {
            '─'
        } else if delta.x.abs() * self.cell.y <= delta.y.abs() * self.cell.x * 0.5 {
            '│'
        } else if (delta.x > 0.0) == (delta.y > 0.0) {
            '╲'
        } else {
            '╱'
        };

        let step = self.cell.x.min(self.cell.y) * 0.5;
        let length = (delta.x * delta.x + delta.y * delta.y).sqrt();
        let steps = (length / step).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = from + delta * (i as f32 / steps as f32);
            if let Some((col, row)) = self.cell_at(p) {
                self.put_glyph(col, row, glyph, color);
            }
        }
    }

    fn text(&mut self, pos: Vec2, color: PackedColor, text: &str) {
        let origin = pos + Vec2::new(0.0, self.cell.y * 0.5);
        for (i, ch) in text.chars().enumerate() {
            let p = origin + Vec2::new(i as f32 * self.cell.x, 0.0);
            if let Some((col, row)) = self.cell_at(p) {
                self.put_glyph(col, row, ch, color);
            }
        }
    }

    fn text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * self.cell.x, self.cell.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{ClipScope, Rgba};

    const CELL: Vec2 = Vec2::new(8.0, 16.0);

    fn buffer(width: u16, height: u16) -> Buffer {
        Buffer::empty(CellRect::new(0, 0, width, height))
    }

    fn bg(buf: &Buffer, x: u16, y: u16) -> Color {
        buf[(x, y)].bg
    }

    fn px(col: f32, row: f32) -> Vec2 {
        Vec2::new(col * CELL.x, row * CELL.y)
    }

    #[test]
    fn test_fill_covers_cells_by_center() {
        let mut buf = buffer(6, 3);
        let white = Rgba::gray(1.0).to_packed();
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 6, 3), CELL);
            // Covers cell centers of columns 1 and 2 on row 0 only
            painter.rect_filled(
                Rect::from_min_max(px(1.0, 0.0), px(3.0, 1.0)),
                white,
                0.0,
                Corners::All,
            );
        }
        assert_eq!(bg(&buf, 1, 0), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 2, 0), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 0, 0), Color::Reset);
        assert_eq!(bg(&buf, 3, 0), Color::Reset);
        assert_eq!(bg(&buf, 1, 1), Color::Reset);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut buf = buffer(2, 1);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 2, 1), CELL);
            let all = painter.viewport();
            painter.rect_filled(all, Rgba::gray(1.0).to_packed(), 0.0, Corners::All);
            painter.rect_filled(all, Rgba::new(1.0, 0.0, 0.0, 0.5).to_packed(), 0.0, Corners::All);
        }
        assert_eq!(bg(&buf, 0, 0), Color::Rgb(255, 127, 127));
    }

    #[test]
    fn test_painter_offset_into_area() {
        let mut buf = buffer(10, 5);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(4, 2, 3, 2), CELL);
            painter.rect_filled(painter.viewport(), Rgba::gray(1.0).to_packed(), 0.0, Corners::All);
        }
        assert_eq!(bg(&buf, 4, 2), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 6, 3), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 7, 2), Color::Reset);
        assert_eq!(bg(&buf, 3, 2), Color::Reset);
    }

    #[test]
    fn test_clip_limits_drawing() {
        let mut buf = buffer(4, 2);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 4, 2), CELL);
            let all = painter.viewport();
            let mut scope = ClipScope::new(&mut painter, Rect::from_min_max(px(0.0, 0.0), px(1.0, 1.0)));
            scope.rect_filled(all, Rgba::gray(1.0).to_packed(), 0.0, Corners::All);
        }
        assert_eq!(bg(&buf, 0, 0), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 1, 0), Color::Reset);
        assert_eq!(bg(&buf, 0, 1), Color::Reset);
    }

    #[test]
    fn test_outline_uses_box_glyphs() {
        let mut buf = buffer(4, 3);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 4, 3), CELL);
            let all = painter.viewport();
            painter.rect(all, Rgba::gray(1.0).to_packed(), 0.0, Corners::All, 1.0);
        }
        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert_eq!(buf[(1, 0)].symbol(), "─");
        assert_eq!(buf[(3, 0)].symbol(), "┐");
        assert_eq!(buf[(0, 1)].symbol(), "│");
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(buf[(3, 2)].symbol(), "┘");
    }

    #[test]
    fn test_rounded_corners_only_where_requested() {
        let mut buf = buffer(4, 3);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 4, 3), CELL);
            let all = painter.viewport();
            painter.rect(all, Rgba::gray(1.0).to_packed(), 5.0, Corners::TopLeft, 1.0);
        }
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(3, 0)].symbol(), "┐");
        assert_eq!(buf[(0, 2)].symbol(), "└");
    }

    #[test]
    fn test_text_placement() {
        let mut buf = buffer(6, 2);
        let color = Rgba::new(1.0, 0.0, 0.0, 1.0).to_packed();
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 6, 2), CELL);
            painter.text(px(1.0, 1.0) + Vec2::new(2.0, 3.0), color, "Hi");
            assert_eq!(painter.text_size("Hi"), Vec2::new(16.0, 16.0));
        }
        assert_eq!(buf[(1, 1)].symbol(), "H");
        assert_eq!(buf[(2, 1)].symbol(), "i");
        assert_eq!(buf[(1, 1)].fg, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_text_outside_area_is_dropped() {
        let mut buf = buffer(3, 1);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 3, 1), CELL);
            painter.text(px(1.0, 0.0), Rgba::gray(1.0).to_packed(), "long text");
            painter.text(Vec2::new(-20.0, 0.0), Rgba::gray(1.0).to_packed(), "x");
        }
        assert_eq!(buf[(1, 0)].symbol(), "l");
        assert_eq!(buf[(2, 0)].symbol(), "o");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_filled_circle() {
        let mut buf = buffer(5, 3);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 5, 3), CELL);
            painter.circle_filled(px(2.5, 1.5), 12.0, Rgba::gray(1.0).to_packed());
        }
        assert_eq!(bg(&buf, 2, 1), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 1, 1), Color::Rgb(255, 255, 255));
        assert_eq!(bg(&buf, 2, 0), Color::Reset);
        assert_eq!(bg(&buf, 0, 1), Color::Reset);
    }

    #[test]
    fn test_horizontal_line() {
        let mut buf = buffer(5, 1);
        {
            let mut painter = BufferPainter::new(&mut buf, CellRect::new(0, 0, 5, 1), CELL);
            painter.line(px(1.0, 0.5), px(3.5, 0.5), Rgba::gray(1.0).to_packed(), 1.0);
        }
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(1, 0)].symbol(), "─");
        assert_eq!(buf[(3, 0)].symbol(), "─");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }

    #[test]
    fn test_rounded_fill_skips_corners() {
        let rect = Rect::from_min_size(Vec2::ZERO, Vec2::new(40.0, 40.0));
        assert!(!inside_rounded(rect, 20.0, Corners::All, Vec2::new(2.0, 2.0)));
        assert!(inside_rounded(rect, 20.0, Corners::TopRight, Vec2::new(2.0, 2.0)));
        assert!(inside_rounded(rect, 20.0, Corners::All, Vec2::new(20.0, 20.0)));
        assert!(!inside_rounded(rect, 0.0, Corners::All, Vec2::new(41.0, 2.0)));
    }
}
