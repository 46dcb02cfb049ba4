//! The magic-wand tool: one click extracts a region polygon from the image.

use image::DynamicImage;
use microlabel_raster::{RasterError, RegionExtractor, WorkingRaster};

use crate::config::{ToolSettings, WandSettings};
use crate::constants::WAND_SENSITIVITY_RANGE;
use crate::coords::DrawRect;
use crate::model::{AnnotationTool, Point, ShapeId};
use crate::persistence::WireAnnotation;

use super::{EditorTool, PointerOutcome, RegionKind, ShapeTool};

/// Region editing plus extraction.
///
/// Regions behave like polygons once created: vertices are draggable and
/// the body moves rigidly. Without a prepared raster, clicks on empty canvas
/// do nothing.
#[derive(Debug, Clone)]
pub struct MagicWandTool {
    regions: ShapeTool<RegionKind>,
    extractor: RegionExtractor,
    raster: Option<WorkingRaster>,
    sensitivity: u32,
}

impl Default for MagicWandTool {
    fn default() -> Self {
        Self::new(ToolSettings::default(), &WandSettings::default())
    }
}

impl MagicWandTool {
    pub fn new(tools: ToolSettings, wand: &WandSettings) -> Self {
        let mut tool = Self {
            regions: ShapeTool::new(tools),
            extractor: RegionExtractor::new(wand.extractor_settings()),
            raster: None,
            sensitivity: *WAND_SENSITIVITY_RANGE.start(),
        };
        tool.set_sensitivity(wand.sensitivity);
        tool
    }

    pub fn regions(&self) -> &ShapeTool<RegionKind> {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut ShapeTool<RegionKind> {
        &mut self.regions
    }

    pub fn sensitivity(&self) -> u32 {
        self.sensitivity
    }

    /// Colour tolerance of the flood fill, clamped to 1..=100.
    pub fn set_sensitivity(&mut self, sensitivity: u32) {
        self.sensitivity =
            sensitivity.clamp(*WAND_SENSITIVITY_RANGE.start(), *WAND_SENSITIVITY_RANGE.end());
    }

    /// Rasterize the active image onto the working canvas.
    pub fn set_image(&mut self, image: &DynamicImage) -> Result<(), RasterError> {
        let settings = self.extractor.settings();
        let raster = WorkingRaster::prepare(image, settings.working_size, settings.blur_sigma)?;
        self.raster = Some(raster);
        Ok(())
    }

    /// Use an already prepared raster.
    pub fn set_raster(&mut self, raster: Option<WorkingRaster>) {
        self.raster = raster;
    }

    pub fn has_raster(&self) -> bool {
        self.raster.is_some()
    }

    /// Run the extractor at `seed` and commit the result.
    pub fn extract_at(&mut self, seed: Point) -> Option<ShapeId> {
        let Some(raster) = self.raster.as_ref() else {
            log::debug!("Magic wand: no image prepared, ignoring click");
            return None;
        };
        let vertices = self
            .extractor
            .extract(raster, (seed.x, seed.y), self.sensitivity)?;
        let geometry = vertices.into_iter().map(Point::from).collect();
        Some(self.regions.commit_geometry(geometry))
    }
}

impl EditorTool for MagicWandTool {
    fn tool(&self) -> AnnotationTool {
        AnnotationTool::MagicWand
    }

    fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        match self.regions.pointer_down(point) {
            PointerOutcome::Seed(seed) => match self.extract_at(seed) {
                Some(id) => PointerOutcome::Committed(id),
                None => PointerOutcome::Ignored,
            },
            outcome => outcome,
        }
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        self.regions.pointer_move(point)
    }

    fn pointer_up(&mut self, point: Option<Point>) -> Option<ShapeId> {
        self.regions.pointer_up(point)
    }

    fn pointer_cancel(&mut self) {
        self.regions.pointer_cancel()
    }

    fn undo(&mut self) -> bool {
        self.regions.undo()
    }

    fn redo(&mut self) -> bool {
        self.regions.redo()
    }

    fn can_undo(&self) -> bool {
        self.regions.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.regions.can_redo()
    }

    fn delete_selected(&mut self) -> bool {
        self.regions.delete_selected()
    }

    fn cancel_draft(&mut self) -> bool {
        false
    }

    fn finish_draft(&mut self) -> Option<ShapeId> {
        None
    }

    fn discard_transient(&mut self) {
        self.regions.discard_transient()
    }

    fn clear_all(&mut self) -> bool {
        self.regions.clear_all()
    }

    fn selected_id(&self) -> Option<&ShapeId> {
        self.regions.selected()
    }

    fn clear_selection(&mut self) {
        self.regions.clear_selection()
    }

    fn shape_count(&self) -> usize {
        self.regions.shapes().len()
    }

    fn is_dragging(&self) -> bool {
        self.regions.is_dragging()
    }

    fn is_drawing(&self) -> bool {
        self.regions.is_drawing()
    }

    fn set_view(&mut self, view: Option<DrawRect>) {
        self.regions.set_view(view)
    }

    fn set_category(&mut self, category: &str) {
        self.regions.set_category(category)
    }

    fn encode(&self) -> Vec<WireAnnotation> {
        EditorTool::encode(&self.regions)
    }

    fn load(&mut self, entries: &[WireAnnotation]) {
        EditorTool::load(&mut self.regions, entries)
    }
}
