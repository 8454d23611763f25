//! Terminal renderers.
//!
//! Both presentations draw the same [`Scene`] onto a braille canvas; they
//! differ in frame size, how the pointer drives focus, and what panel
//! accompanies the map.

pub mod desktop;
pub mod mobile;

use crossterm::event::MouseEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        Block, Borders, Paragraph, Wrap,
        canvas::{Canvas, Line, Points},
    },
};

use crate::classify::{FALLBACK_COLOR, Rgb};
use crate::config::Layout;
use crate::labels::LabelKind;
use crate::projection::ProjectionFrame;
use crate::sales::format_price;
use crate::scene::{Focus, Scene};

pub use desktop::DesktopView;
pub use mobile::MobileView;

pub const BACKGROUND: Rgb = Rgb::new(0x12, 0x1a, 0x22);

/// Maps a terminal cell inside `surface` to frame coordinates (cell centre).
pub fn cell_to_frame(surface: Rect, column: u16, row: u16, frame: &ProjectionFrame) -> Option<(f64, f64)> {
    if surface.width == 0
        || surface.height == 0
        || column < surface.x
        || row < surface.y
        || column >= surface.x + surface.width
        || row >= surface.y + surface.height
    {
        return None;
    }
    let rx = (f64::from(column - surface.x) + 0.5) / f64::from(surface.width);
    let ry = (f64::from(row - surface.y) + 0.5) / f64::from(surface.height);
    Some((rx * frame.view_width(), ry * frame.view_height()))
}

/// Inverse of [`cell_to_frame`], clamped into the surface.
pub fn frame_to_cell(surface: Rect, x: f64, y: f64, frame: &ProjectionFrame) -> (u16, u16) {
    let col = (x / frame.view_width() * f64::from(surface.width)).floor();
    let row = (y / frame.view_height() * f64::from(surface.height)).floor();
    let col = col.clamp(0.0, f64::from(surface.width.saturating_sub(1))) as u16;
    let row = row.clamp(0.0, f64::from(surface.height.saturating_sub(1))) as u16;
    (surface.x + col, surface.y + row)
}

/// Braille dot positions per scene region, sampled once per canvas size.
#[derive(Debug, Default)]
pub struct FillCache {
    size: Option<(u16, u16)>,
    points: Vec<Vec<(f64, f64)>>,
}

impl FillCache {
    /// Canvas-space points per region (y grows upward, as the canvas expects).
    pub fn points(&mut self, scene: &Scene, width: u16, height: u16) -> &[Vec<(f64, f64)>] {
        if self.size != Some((width, height)) || self.points.len() != scene.regions.len() {
            self.points = rasterize(scene, width, height);
            self.size = Some((width, height));
        }
        &self.points
    }
}

fn rasterize(scene: &Scene, width: u16, height: u16) -> Vec<Vec<(f64, f64)>> {
    let cols = usize::from(width) * 2;
    let rows = usize::from(height) * 4;
    let vw = scene.frame.view_width();
    let vh = scene.frame.view_height();
    let mut points = vec![Vec::new(); scene.regions.len()];
    for row in 0..rows {
        let y = (row as f64 + 0.5) / rows as f64 * vh;
        for col in 0..cols {
            let x = (col as f64 + 0.5) / cols as f64 * vw;
            if let Some(i) = scene.regions.iter().rposition(|r| r.region.contains(x, y)) {
                points[i].push((x, vh - y));
            }
        }
    }
    log::trace!("rasterized {}x{} canvas", width, height);
    points
}

/// Draws filled regions, outlines and labels; returns the canvas surface.
pub fn draw_map(
    f: &mut Frame,
    area: Rect,
    title: &str,
    scene: &Scene,
    fill: &mut FillCache,
    focus: Focus<'_>,
) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let surface = block.inner(area);
    let fills = fill.points(scene, surface.width, surface.height);

    let vw = scene.frame.view_width();
    let vh = scene.frame.view_height();
    let cell_w = vw / f64::from(surface.width.max(1));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(BACKGROUND.into())
        .x_bounds([0.0, vw])
        .y_bounds([0.0, vh])
        .paint(|ctx| {
            for (r, coords) in scene.regions.iter().zip(fills) {
                let style = scene.style(r, focus);
                let color = style.fill.mix(BACKGROUND, 1.0 - style.opacity);
                ctx.draw(&Points { coords: coords.as_slice(), color: color.into() });
            }
            ctx.layer();

            for r in &scene.regions {
                let emphasized = scene.style(r, focus).emphasized;
                let color = if emphasized { Color::White } else { Color::DarkGray };
                for poly in &r.region.shape.polygons.0 {
                    for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
                        for w in ring.0.windows(2) {
                            ctx.draw(&Line {
                                x1: w[0].x,
                                y1: vh - w[0].y,
                                x2: w[1].x,
                                y2: vh - w[1].y,
                                color,
                            });
                        }
                    }
                }
            }
            ctx.layer();

            for r in &scene.regions {
                for line in &r.label.lines {
                    let (text, style) = match line.kind {
                        LabelKind::Name if r.label.small => (
                            r.region.short.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                        LabelKind::Name => (
                            line.text.clone(),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                        // Small shapes only carry their code in a terminal.
                        LabelKind::Metric if r.label.small => continue,
                        LabelKind::Metric => (line.text.clone(), Style::default().fg(Color::Gray)),
                    };
                    let x = line.x - text.chars().count() as f64 / 2.0 * cell_w;
                    ctx.print(x, vh - line.y, TextLine::styled(text, style));
                }
            }
        });
    f.render_widget(canvas, area);
    surface
}

/// Colour swatches with their price bands.
pub fn legend_lines(scene: &Scene) -> Vec<TextLine<'static>> {
    let swatch = |c: Rgb| Span::styled("██ ", Style::default().fg(c.into()));
    if scene.legend.is_empty() {
        return vec![TextLine::from(vec![swatch(FALLBACK_COLOR), Span::raw("no price data")])];
    }
    scene
        .legend
        .iter()
        .map(|band| {
            TextLine::from(vec![
                swatch(band.color),
                Span::raw(format!("{} – {}", format_price(band.from), format_price(band.to))),
            ])
        })
        .collect()
}

pub fn draw_legend(f: &mut Frame, area: Rect, scene: &Scene) {
    let legend = Paragraph::new(legend_lines(scene))
        .block(Block::default().borders(Borders::ALL).title("Average price"))
        .wrap(Wrap { trim: true });
    f.render_widget(legend, area);
}

/// The active presentation; it owns its own interaction state.
#[derive(Debug)]
pub enum Presentation {
    Desktop(DesktopView),
    Mobile(MobileView),
}

impl Presentation {
    pub fn new(layout: Layout, scene: &Scene) -> Self {
        match layout {
            Layout::Desktop => Presentation::Desktop(DesktopView::new(scene)),
            Layout::Mobile => Presentation::Mobile(MobileView::new(scene)),
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Presentation::Desktop(_) => Layout::Desktop,
            Presentation::Mobile(_) => Layout::Mobile,
        }
    }

    pub fn on_mouse(&mut self, event: MouseEvent, scene: &Scene) {
        match self {
            Presentation::Desktop(v) => v.on_mouse(event, scene),
            Presentation::Mobile(v) => v.on_mouse(event, scene),
        }
    }

    /// Region currently hovered or selected.
    pub fn focused(&self) -> Option<&str> {
        match self {
            Presentation::Desktop(v) => v.hovered(),
            Presentation::Mobile(v) => v.selected(),
        }
    }

    pub fn surface(&self) -> Option<Rect> {
        match self {
            Presentation::Desktop(v) => v.surface(),
            Presentation::Mobile(v) => v.surface(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Presentation::Desktop(v) => v.clear(),
            Presentation::Mobile(v) => v.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::DESKTOP_FRAME;

    #[test]
    fn cells_map_into_frame_and_back() {
        let surface = Rect::new(10, 5, 84, 37);
        assert_eq!(cell_to_frame(surface, 9, 10, &DESKTOP_FRAME), None);
        assert_eq!(cell_to_frame(surface, 20, 42, &DESKTOP_FRAME), None);

        let (x, y) = cell_to_frame(surface, 10, 5, &DESKTOP_FRAME).expect("inside");
        assert!(x > 0.0 && x < DESKTOP_FRAME.view_width() / 84.0);
        assert!(y > 0.0 && y < DESKTOP_FRAME.view_height() / 37.0);

        for (col, row) in [(10, 5), (50, 20), (93, 41)] {
            let (x, y) = cell_to_frame(surface, col, row, &DESKTOP_FRAME).expect("inside");
            assert_eq!(frame_to_cell(surface, x, y, &DESKTOP_FRAME), (col, row));
        }
    }

    #[test]
    fn zero_sized_surface_maps_nothing() {
        assert_eq!(cell_to_frame(Rect::new(0, 0, 0, 0), 0, 0, &DESKTOP_FRAME), None);
    }
}
