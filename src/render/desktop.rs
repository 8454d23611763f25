//! Full-size presentation: the mouse hovers regions, a tooltip follows it.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line as TextLine,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{FillCache, cell_to_frame, draw_map};
use crate::interaction::{HoverController, Pointer, Size, place_tooltip};
use crate::sales::format_price;
use crate::scene::{Focus, Scene, SceneRegion};

/// Gap between the cursor cell and the tooltip box, in cells.
const TOOLTIP_OFFSET: f64 = 1.0;

#[derive(Debug, Default)]
pub struct DesktopView {
    hover: HoverController,
    fill: FillCache,
    surface: Option<Rect>,
}

impl DesktopView {
    pub fn new(scene: &Scene) -> Self {
        Self {
            hover: HoverController::new(scene.ids()),
            fill: FillCache::default(),
            surface: None,
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn surface(&self) -> Option<Rect> {
        self.surface
    }

    pub fn clear(&mut self) {
        self.hover.pointer_left();
    }

    /// Moves inside the map hover; anything outside it ends the hover.
    pub fn on_mouse(&mut self, event: MouseEvent, scene: &Scene) {
        if !matches!(event.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let Some(surface) = self.surface else {
            return;
        };
        match cell_to_frame(surface, event.column, event.row, &scene.frame) {
            Some((x, y)) => {
                let region = scene.region_at(x, y).map(|r| r.region.id.as_str());
                let pointer = Pointer {
                    x: f64::from(event.column - surface.x),
                    y: f64::from(event.row - surface.y),
                };
                self.hover.pointer_moved(region, pointer);
            }
            None => self.hover.pointer_left(),
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, scene: &Scene) {
        let focus = self.hover.hovered().map_or(Focus::None, Focus::Hovered);
        let surface = draw_map(f, area, "Average price per province", scene, &mut self.fill, focus);
        self.surface = Some(surface);

        let (Some(id), Some(pointer)) = (self.hover.hovered(), self.hover.pointer()) else {
            return;
        };
        if let Some(region) = scene.region(id) {
            draw_tooltip(f, surface, pointer, region);
        }
    }
}

pub fn tooltip_lines(region: &SceneRegion) -> Vec<TextLine<'static>> {
    let mut lines = vec![TextLine::styled(
        region.region.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !region.stats.has_data() {
        lines.push(TextLine::from("No sales this auction"));
        return lines;
    }
    lines.push(TextLine::from(format!("Certified: {}", format_price(region.stats.certified_avg))));
    if region.stats.has_non_certified {
        lines.push(TextLine::from(format!(
            "Non-certified: {}",
            format_price(region.stats.non_certified_avg)
        )));
    }
    lines
}

fn draw_tooltip(f: &mut Frame, surface: Rect, pointer: Pointer, region: &SceneRegion) {
    let lines = tooltip_lines(region);
    let width = lines.iter().map(TextLine::width).max().unwrap_or(0) + 2;
    let height = lines.len() + 2;
    let pos = place_tooltip(
        Size { width: f64::from(surface.width), height: f64::from(surface.height) },
        pointer,
        Size { width: width as f64, height: height as f64 },
        TOOLTIP_OFFSET,
    );
    let rect = Rect::new(
        surface.x + pos.left as u16,
        surface.y + pos.top as u16,
        (width as u16).min(surface.width),
        (height as u16).min(surface.height),
    );
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL)), rect);
}
