//! The five tools of the editor and which one is active.

use crate::config::EditorConfig;
use crate::coords::DrawRect;
use crate::model::AnnotationTool;
use crate::persistence::WireAnnotation;

use super::{BoxTool, EditorTool, EllipseTool, FreehandTool, MagicWandTool, PolygonTool, ShapeTool};

/// Owns every tool's shapes, drafts and histories.
///
/// Tools never share state; only the active tool receives pointer and key
/// input.
#[derive(Debug, Clone)]
pub struct Toolbox {
    pub boxes: BoxTool,
    pub polygons: PolygonTool,
    pub ellipses: EllipseTool,
    pub strokes: FreehandTool,
    pub wand: MagicWandTool,
    active: AnnotationTool,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Toolbox {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            boxes: ShapeTool::new(config.tools.clone()),
            polygons: ShapeTool::new(config.tools.clone()),
            ellipses: ShapeTool::new(config.tools.clone()),
            strokes: ShapeTool::new(config.tools.clone()),
            wand: MagicWandTool::new(config.tools.clone(), &config.magic_wand),
            active: AnnotationTool::default(),
        }
    }

    pub fn active(&self) -> AnnotationTool {
        self.active
    }

    /// Switch tools. The outgoing tool loses its draft and any drag.
    pub fn set_active(&mut self, tool: AnnotationTool) {
        if tool == self.active {
            return;
        }
        self.active_tool_mut().discard_transient();
        log::debug!("Tool: {} -> {}", self.active.name(), tool.name());
        self.active = tool;
    }

    pub fn tool(&self, tool: AnnotationTool) -> &dyn EditorTool {
        match tool {
            AnnotationTool::BoundingBox => &self.boxes,
            AnnotationTool::Polygon => &self.polygons,
            AnnotationTool::Ellipse => &self.ellipses,
            AnnotationTool::Freehand => &self.strokes,
            AnnotationTool::MagicWand => &self.wand,
        }
    }

    pub fn tool_mut(&mut self, tool: AnnotationTool) -> &mut dyn EditorTool {
        match tool {
            AnnotationTool::BoundingBox => &mut self.boxes,
            AnnotationTool::Polygon => &mut self.polygons,
            AnnotationTool::Ellipse => &mut self.ellipses,
            AnnotationTool::Freehand => &mut self.strokes,
            AnnotationTool::MagicWand => &mut self.wand,
        }
    }

    pub fn active_tool(&self) -> &dyn EditorTool {
        self.tool(self.active)
    }

    pub fn active_tool_mut(&mut self) -> &mut dyn EditorTool {
        self.tool_mut(self.active)
    }

    /// Every tool, in wire order (bbox, polygon, ellipse, freehand, mask).
    pub fn all(&self) -> [&dyn EditorTool; 5] {
        [
            &self.boxes,
            &self.polygons,
            &self.ellipses,
            &self.strokes,
            &self.wand,
        ]
    }

    pub fn all_mut(&mut self) -> [&mut dyn EditorTool; 5] {
        [
            &mut self.boxes,
            &mut self.polygons,
            &mut self.ellipses,
            &mut self.strokes,
            &mut self.wand,
        ]
    }

    pub fn set_view(&mut self, view: Option<DrawRect>) {
        for tool in self.all_mut() {
            tool.set_view(view);
        }
    }

    pub fn set_category(&mut self, category: &str) {
        for tool in self.all_mut() {
            tool.set_category(category);
        }
    }

    /// Drop drafts, drags and selections everywhere.
    pub fn discard_transients(&mut self) {
        for tool in self.all_mut() {
            tool.discard_transient();
            tool.clear_selection();
        }
    }

    pub fn shape_count(&self) -> usize {
        self.all().iter().map(|tool| tool.shape_count()).sum()
    }

    /// Empty every tool (each tool records its own undo step).
    pub fn clear_all(&mut self) -> bool {
        let mut changed = false;
        for tool in self.all_mut() {
            changed |= tool.clear_all();
        }
        changed
    }

    /// One flat list of entries across all tools.
    pub fn encode(&self) -> Vec<WireAnnotation> {
        self.all().iter().flat_map(|tool| tool.encode()).collect()
    }

    /// Replace every tool's shapes from one flat entry list.
    pub fn load(&mut self, entries: &[WireAnnotation]) {
        for tool in self.all_mut() {
            tool.load(entries);
        }
    }
}
