//! Compact presentation: clicks toggle a selection, and a detail panel
//! under the map always shows the selected province.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{FillCache, cell_to_frame, draw_legend, draw_map, legend_lines};
use crate::interaction::SelectController;
use crate::sales::format_price;
use crate::scene::{Focus, Scene, SceneRegion};

/// Widest the compact map column grows, in cells.
const MAX_WIDTH: u16 = 48;
const DETAIL_HEIGHT: u16 = 6;

#[derive(Debug, Default)]
pub struct MobileView {
    select: SelectController,
    fill: FillCache,
    surface: Option<Rect>,
}

impl MobileView {
    pub fn new(scene: &Scene) -> Self {
        Self {
            select: SelectController::new(scene.ids()),
            fill: FillCache::default(),
            surface: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.select.selected()
    }

    pub fn surface(&self) -> Option<Rect> {
        self.surface
    }

    pub fn clear(&mut self) {
        self.select.clear();
    }

    /// A left click is a tap; taps outside every region are ignored.
    pub fn on_mouse(&mut self, event: MouseEvent, scene: &Scene) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(surface) = self.surface else {
            return;
        };
        let Some((x, y)) = cell_to_frame(surface, event.column, event.row, &scene.frame) else {
            return;
        };
        if let Some(region) = scene.region_at(x, y) {
            self.select.tap(&region.region.id);
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, scene: &Scene) {
        let width = area.width.min(MAX_WIDTH);
        let column = Rect { x: area.x + (area.width - width) / 2, width, ..area };
        let legend_height = legend_lines(scene).len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(DETAIL_HEIGHT),
                Constraint::Length(legend_height),
            ])
            .split(column);

        let focus = self.select.selected().map_or(Focus::None, Focus::Selected);
        let surface = draw_map(f, chunks[0], "Tap a province", scene, &mut self.fill, focus);
        self.surface = Some(surface);

        let detail = Paragraph::new(detail_lines(self.select.selected().and_then(|id| scene.region(id))))
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        f.render_widget(detail, chunks[1]);
        draw_legend(f, chunks[2], scene);
    }
}

pub fn detail_lines(region: Option<&SceneRegion>) -> Vec<TextLine<'static>> {
    let Some(region) = region else {
        return vec![TextLine::styled(
            "Tap a province to see its prices",
            Style::default().fg(Color::DarkGray),
        )];
    };
    let mut lines = vec![TextLine::styled(
        region.region.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !region.stats.has_data() {
        lines.push(TextLine::from("No sales this auction"));
        return lines;
    }
    lines.push(TextLine::from(vec![
        Span::styled("██ ", Style::default().fg(region.color.into())),
        Span::raw(format!("Certified: {}", format_price(region.stats.certified_avg))),
    ]));
    if region.stats.has_non_certified {
        lines.push(TextLine::from(format!(
            "Non-certified: {}",
            format_price(region.stats.non_certified_avg)
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RegionBoundary;
    use crate::labels::MOBILE_LABELS;
    use crate::projection::MOBILE_FRAME;
    use crate::render::frame_to_cell;
    use crate::sales::{AuctionReport, ProducerSale};
    use crate::scene::{MapLayer, MapModel};
    use crossterm::event::KeyModifiers;
    use geo::{Geometry, LineString, Polygon};

    fn scene() -> Scene {
        let ring = |lon: f64| LineString::from(vec![(lon, -33.0), (lon + 5.0, -33.0), (lon + 5.0, -24.0), (lon, -24.0)]);
        let boundaries = vec![
            RegionBoundary {
                id: "ZA-NC".into(),
                name: "Northern Cape".into(),
                geometry: Some(Geometry::Polygon(Polygon::new(ring(18.0), vec![]))),
            },
            RegionBoundary {
                id: "ZA-FS".into(),
                name: "Free State".into(),
                geometry: Some(Geometry::Polygon(Polygon::new(ring(25.0), vec![]))),
            },
        ];
        let sales = vec![ProducerSale {
            region: "Free State".into(),
            rank: 1,
            producer: "Soetendal".into(),
            district: String::new(),
            price: 180.0,
            micron: None,
            certified: false,
            buyer: String::new(),
        }];
        let layer = MapLayer::project(&boundaries, MOBILE_FRAME);
        let model = MapModel::build(&AuctionReport { id: "a".into(), title: String::new(), sales });
        Scene::compose(&layer, &model, &MOBILE_LABELS)
    }

    fn click(surface: Rect, lon: f64, lat: f64) -> MouseEvent {
        let p = MOBILE_FRAME.project(lon, lat);
        let (column, row) = frame_to_cell(surface, p.x, p.y, &MOBILE_FRAME);
        MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn clicks_toggle_and_switch_selection() {
        let scene = scene();
        let mut view = MobileView::new(&scene);
        let surface = Rect::new(0, 0, 46, 20);
        view.surface = Some(surface);

        view.on_mouse(click(surface, 20.0, -28.0), &scene);
        assert_eq!(view.selected(), Some("ZA-NC"));
        view.on_mouse(click(surface, 27.0, -28.0), &scene);
        assert_eq!(view.selected(), Some("ZA-FS"));
        view.on_mouse(click(surface, 27.0, -28.0), &scene);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn clicks_on_background_change_nothing() {
        let scene = scene();
        let mut view = MobileView::new(&scene);
        let surface = Rect::new(0, 0, 46, 20);
        view.surface = Some(surface);
        view.on_mouse(click(surface, 20.0, -28.0), &scene);
        view.on_mouse(click(surface, 32.5, -34.5), &scene);
        assert_eq!(view.selected(), Some("ZA-NC"));
    }

    #[test]
    fn detail_panel_describes_selection() {
        let scene = scene();
        assert_eq!(detail_lines(None).len(), 1);
        let fs = detail_lines(scene.region("ZA-FS"));
        assert_eq!(fs.len(), 3);
        assert_eq!(fs[1].to_string(), "██ Certified: –");
        assert_eq!(fs[2].to_string(), "Non-certified: R 180.00/kg");
        assert_eq!(detail_lines(scene.region("ZA-NC"))[1].to_string(), "No sales this auction");
    }
}
