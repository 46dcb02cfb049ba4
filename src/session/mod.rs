//! The editing session.
//!
//! A session binds the five tools to one active image at a time. Pointer
//! input arrives in viewport pixels and is mapped through the current draw
//! rectangle; key presses resolve through the configured bindings. Switching
//! images saves the outgoing annotations before the incoming ones are
//! loaded.

use std::time::Duration;

use image::DynamicImage;
use microlabel_raster::RasterError;
use serde_json::Value;

use crate::config::EditorConfig;
use crate::coords::{DrawRect, Size, compute_draw_rect, to_normalized, to_normalized_clamped};
use crate::keybindings::{EditorAction, KeyBindings, KeyEvent};
use crate::model::{AnnotationTool, ImageId, Point, ShapeId};
use crate::persistence::{
    AnnotationCache, AnnotationService, PersistError, SaveRequest, decode_payload,
};
use crate::tools::{PointerOutcome, Toolbox};

#[cfg(test)]
mod tests;

/// Annotation editing for a sequence of images, backed by `S`.
///
/// Call [`close`](Self::close) before dropping to flush the last image.
pub struct AnnotationSession<S: AnnotationService> {
    service: S,
    cache: AnnotationCache,
    toolbox: Toolbox,
    keybindings: KeyBindings,
    active_image: Option<ImageId>,
    draw_rect: Option<DrawRect>,
    prefetch_window: usize,
}

impl<S: AnnotationService> AnnotationSession<S> {
    pub fn new(service: S, config: &EditorConfig) -> Self {
        Self {
            service,
            cache: AnnotationCache::new(Duration::from_secs(config.persistence.cache_ttl_secs)),
            toolbox: Toolbox::new(config),
            keybindings: config.keybindings.clone(),
            active_image: None,
            draw_rect: None,
            prefetch_window: config.persistence.prefetch_window,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn cache(&self) -> &AnnotationCache {
        &self.cache
    }

    /// Read access for overlay renderers.
    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    pub fn toolbox_mut(&mut self) -> &mut Toolbox {
        &mut self.toolbox
    }

    pub fn active_image(&self) -> Option<&ImageId> {
        self.active_image.as_ref()
    }

    pub fn active_tool(&self) -> AnnotationTool {
        self.toolbox.active()
    }

    pub fn set_active_tool(&mut self, tool: AnnotationTool) {
        self.toolbox.set_active(tool);
    }

    /// Label stamped onto shapes created from now on.
    pub fn set_category(&mut self, label: &str) {
        self.toolbox.set_category(label);
    }

    // ========================================================================
    // Rendering surface
    // ========================================================================

    /// Record the image's intrinsic size and the container it is drawn in.
    pub fn set_viewport(&mut self, intrinsic: Size, container: Size) -> DrawRect {
        let rect = compute_draw_rect(intrinsic, container);
        log::trace!("Viewport: draw rect {:?}", rect);
        self.draw_rect = Some(rect);
        self.toolbox.set_view(Some(rect));
        rect
    }

    pub fn draw_rect(&self) -> Option<&DrawRect> {
        self.draw_rect.as_ref()
    }

    /// Give the magic wand the pixels of the active image.
    pub fn set_wand_image(&mut self, image: &DynamicImage) -> Result<(), RasterError> {
        self.toolbox.wand.set_image(image)
    }

    pub fn sensitivity(&self) -> u32 {
        self.toolbox.wand.sensitivity()
    }

    pub fn set_sensitivity(&mut self, sensitivity: u32) {
        self.toolbox.wand.set_sensitivity(sensitivity);
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Press at a viewport position. Presses outside the drawn image (or
    /// before an image is active) are ignored.
    pub fn pointer_down(&mut self, viewport: Point) -> PointerOutcome {
        if self.active_image.is_none() {
            return PointerOutcome::Ignored;
        }
        let Some(point) = self.draw_rect.and_then(|rect| to_normalized(viewport, &rect)) else {
            return PointerOutcome::Ignored;
        };
        self.toolbox.active_tool_mut().pointer_down(point)
    }

    /// Pointer motion. While a gesture is in progress, positions outside the
    /// image are pinned to its edge.
    pub fn pointer_move(&mut self, viewport: Point) -> bool {
        let tool = self.toolbox.active_tool_mut();
        if !(tool.is_dragging() || tool.is_drawing()) {
            return false;
        }
        match self.draw_rect.and_then(|rect| to_normalized_clamped(viewport, &rect)) {
            Some(point) => tool.pointer_move(point),
            None => false,
        }
    }

    /// Release. `None` (or a position outside the image) commits at the last
    /// tracked position.
    pub fn pointer_up(&mut self, viewport: Option<Point>) -> Option<ShapeId> {
        let point = viewport
            .zip(self.draw_rect)
            .and_then(|(viewport, rect)| to_normalized(viewport, &rect));
        self.toolbox.active_tool_mut().pointer_up(point)
    }

    pub fn pointer_cancel(&mut self) {
        self.toolbox.active_tool_mut().pointer_cancel();
    }

    /// Resolve and apply a key press. Returns the action taken.
    pub fn handle_key(&mut self, event: &KeyEvent, text_input_focused: bool) -> Option<EditorAction> {
        let action = self.keybindings.action_for(event, text_input_focused)?;
        log::trace!("Key {:?} -> {:?}", event.key, action);
        self.apply(action);
        Some(action)
    }

    /// Apply an editor action to the active tool. Returns whether anything
    /// changed.
    pub fn apply(&mut self, action: EditorAction) -> bool {
        let tool = self.toolbox.active_tool_mut();
        match action {
            EditorAction::Undo => tool.undo(),
            EditorAction::Redo => tool.redo(),
            EditorAction::DeleteSelected => tool.delete_selected(),
            EditorAction::CancelDraft => tool.cancel_draft(),
            EditorAction::FinishDraft => tool.finish_draft().is_some(),
            EditorAction::SelectTool(next) => {
                let changed = self.toolbox.active() != next;
                self.toolbox.set_active(next);
                changed
            }
        }
    }

    /// Remove every shape from every tool; the next save sends an empty list.
    pub fn clear_all(&mut self) -> bool {
        self.toolbox.clear_all()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Save the active image's annotations.
    pub async fn save(&mut self, for_remark: bool) -> Result<(), PersistError> {
        let image = self.active_image.clone().ok_or(PersistError::NoActiveImage)?;
        self.flush(&image, for_remark).await
    }

    async fn flush(&mut self, image: &ImageId, for_remark: bool) -> Result<(), PersistError> {
        let request = SaveRequest {
            image_id: image.clone(),
            annotations: self.toolbox.encode(),
            for_remark,
        };
        match self.service.save(image, &request).await {
            Ok(()) => {
                self.cache.insert(image.clone(), request.to_payload());
                log::info!(
                    "💾 Saved {} annotations for {}{}",
                    request.annotations.len(),
                    image,
                    if for_remark { " (for remark)" } else { "" }
                );
                Ok(())
            }
            Err(e) => {
                self.cache.invalidate(image);
                Err(e)
            }
        }
    }

    /// Make `image` the active image.
    ///
    /// The outgoing image is saved first; a failed save is logged and the
    /// switch proceeds. Every tool is then replaced with the incoming
    /// annotations, with empty history and no selection. Returns the number
    /// of shapes loaded.
    pub async fn switch_image(&mut self, image: ImageId) -> usize {
        if self.active_image.as_ref() == Some(&image) {
            return self.toolbox.shape_count();
        }

        self.toolbox.discard_transients();
        if let Some(outgoing) = self.active_image.take() {
            if let Err(e) = self.flush(&outgoing, false).await {
                log::warn!("Failed to save annotations for {} before switching: {}", outgoing, e);
            }
        }

        self.toolbox.wand.set_raster(None);
        let payload = self.load_payload(&image).await;
        self.toolbox.load(&decode_payload(payload.as_ref()));
        let count = self.toolbox.shape_count();
        log::info!("📂 Loaded {} annotations for {}", count, image);
        self.active_image = Some(image);
        count
    }

    async fn load_payload(&mut self, image: &ImageId) -> Option<Value> {
        if let Some(payload) = self.cache.get(image) {
            log::debug!("Annotations for {} served from cache", image);
            return Some(payload.clone());
        }
        match self.service.fetch(image).await {
            Ok(payload) => {
                self.cache
                    .insert(image.clone(), payload.clone().unwrap_or(Value::Null));
                payload
            }
            Err(e) => {
                log::warn!("Failed to fetch annotations for {}: {}", image, e);
                None
            }
        }
    }

    /// Warm the cache for upcoming images, at most `prefetch_window` of them.
    /// Returns how many were fetched.
    pub async fn prefetch(&mut self, images: &[ImageId]) -> usize {
        self.cache.prune();
        let mut fetched = 0;
        for image in images.iter().take(self.prefetch_window) {
            if self.active_image.as_ref() == Some(image) || self.cache.is_fresh(image) {
                continue;
            }
            match self.service.fetch(image).await {
                Ok(payload) => {
                    self.cache.insert(image.clone(), payload.unwrap_or(Value::Null));
                    fetched += 1;
                }
                Err(e) => log::warn!("Prefetch of {} failed: {}", image, e),
            }
        }
        if fetched > 0 {
            log::debug!("Prefetched annotations for {} images", fetched);
        }
        fetched
    }

    /// Save the active image and detach from it.
    pub async fn close(&mut self) -> Result<(), PersistError> {
        self.toolbox.discard_transients();
        let Some(image) = self.active_image.take() else {
            return Ok(());
        };
        let result = self.flush(&image, false).await;
        self.toolbox.load(&[]);
        result
    }
}

impl<S: AnnotationService> Drop for AnnotationSession<S> {
    fn drop(&mut self) {
        if let Some(image) = &self.active_image {
            log::warn!("Session dropped without closing; edits to {} were not saved", image);
        }
    }
}
