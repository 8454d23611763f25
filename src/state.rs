use crossterm::event::{KeyCode, MouseEvent};

use crate::{
    config::Layout,
    data::RegionBoundary,
    error::AtlasError,
    render::Presentation,
    sales::AuctionReport,
    scene::{MapLayer, MapModel, Scene},
};

pub struct AppState {
    pub reports: Vec<AuctionReport>,
    pub selected: usize,
    desktop: MapLayer,
    mobile: MapLayer,
    pub model: MapModel,
    pub scene: Scene,
    pub view: Presentation,
    /// How many times auction stats were rebuilt.
    pub recomputes: usize,
}

impl AppState {
    pub const HELP_TEXT: &'static str = "\
↑/↓: auction
m: switch layout
Esc: clear focus
q: quit";

    /// Projects the boundaries for both frames once and opens on
    /// `initial_auction`, or the first report when none is given.
    pub fn new(
        boundaries: &[RegionBoundary],
        reports: Vec<AuctionReport>,
        layout: Layout,
        initial_auction: Option<&str>,
    ) -> Result<Self, AtlasError> {
        let selected = match initial_auction {
            Some(id) => reports
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| AtlasError::UnknownAuction { id: id.to_string() })?,
            None => 0,
        };
        let desktop = MapLayer::project(boundaries, Layout::Desktop.frame());
        let mobile = MapLayer::project(boundaries, Layout::Mobile.frame());
        log::info!("Projected {} regions", desktop.regions.len());

        let model = match reports.get(selected) {
            Some(report) => MapModel::build(report),
            None => MapModel::build(&AuctionReport { id: String::new(), title: String::new(), sales: Vec::new() }),
        };
        let layer = if layout == Layout::Desktop { &desktop } else { &mobile };
        let scene = Scene::compose(layer, &model, &layout.label_style());
        let view = Presentation::new(layout, &scene);

        Ok(Self {
            reports,
            selected,
            desktop,
            mobile,
            model,
            scene,
            view,
            recomputes: 1,
        })
    }

    pub fn layout(&self) -> Layout {
        self.view.layout()
    }

    pub fn current_report(&self) -> Option<&AuctionReport> {
        self.reports.get(self.selected)
    }

    fn layer(&self, layout: Layout) -> &MapLayer {
        match layout {
            Layout::Desktop => &self.desktop,
            Layout::Mobile => &self.mobile,
        }
    }

    fn recompose(&mut self) {
        let layout = self.layout();
        self.scene = Scene::compose(self.layer(layout), &self.model, &layout.label_style());
    }

    /// Moves to auction `index`; stats are rebuilt only when a different
    /// report is selected. Ids may repeat across reports, so the selection
    /// index is the key.
    pub fn select_auction(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        let Some(report) = self.reports.get(index) else {
            return;
        };
        self.selected = index;
        self.model = MapModel::build(report);
        self.recomputes += 1;
        log::info!("Showing auction {}", report.label());
        self.recompose();
    }

    /// Swaps presentation; the new one starts without hover or selection.
    pub fn toggle_layout(&mut self) {
        let layout = self.layout().toggled();
        log::debug!("layout -> {layout:?}");
        let scene = Scene::compose(self.layer(layout), &self.model, &layout.label_style());
        self.view = Presentation::new(layout, &scene);
        self.scene = scene;
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up if self.selected > 0 => self.select_auction(self.selected - 1),
            KeyCode::Down => self.select_auction(self.selected + 1),
            KeyCode::Char('m') => self.toggle_layout(),
            KeyCode::Esc => self.view.clear(),
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        self.view.on_mouse(event, &self.scene);
    }
}
