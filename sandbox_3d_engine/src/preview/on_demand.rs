/// OnDemandRenderer - per-resource preview renderers, created on first display.
///
/// One renderer exists per distinct resource key. Showing the same resource in
/// several panels during one frame reuses that renderer and its offscreen
/// target (the last render of the frame is what every panel shows).
///
/// Entries live until removed, cleared, or evicted by the configured
/// `EvictionPolicy`. A key whose resource has left the `ResourceManager` is
/// dropped the next time it is drawn.

use rustc_hash::FxHashMap;
use crate::config::{EvictionPolicy, PreviewConfig};
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::resource::ResourceManager;
use super::resource_renderer::ResourceRenderer;
use super::ui::PreviewUi;

struct CachedRenderer<R> {
    renderer: R,
    /// Frame of the last draw
    last_frame: u64,
    /// Global draw counter at the last draw, orders entries for LRU
    last_tick: u64,
}

pub struct OnDemandRenderer<R: ResourceRenderer> {
    config: PreviewConfig,
    entries: FxHashMap<R::Key, CachedRenderer<R>>,
    frame: u64,
    tick: u64,
}

impl<R: ResourceRenderer> OnDemandRenderer<R> {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            entries: FxHashMap::default(),
            frame: 0,
            tick: 0,
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Render and show the preview of the resource behind `key`
    ///
    /// Creates the renderer on first use, then renders and draws its UI.
    /// Returns `InvalidResource` if `key` no longer resolves in `resources`.
    pub fn draw_ui(
        &mut self,
        key: R::Key,
        resources: &ResourceManager,
        renderer: &mut dyn Renderer,
        ui: &mut dyn PreviewUi,
    ) -> Result<()> {
        let Some(resource) = R::lookup(resources, key) else {
            self.entries.remove(&key);
            ui.label(&format!("Missing {} {:?}", R::KIND, key));
            return Err(Error::InvalidResource(format!("No {} for key {:?}", R::KIND, key)));
        };

        // Build before evicting: a failed create leaves the cache untouched
        if !self.entries.contains_key(&key) {
            let created = R::create(resource, renderer, &self.config)?;
            crate::engine_debug!("sandbox3d::OnDemandRenderer",
                "Created {} preview for {:?} ({}x{})",
                R::KIND, key, created.target().width(), created.target().height());
            self.make_room();
            self.entries.insert(key, CachedRenderer { renderer: created, last_frame: self.frame, last_tick: 0 });
        }

        self.tick += 1;
        let frame = self.frame;
        let tick = self.tick;
        let Some(cached) = self.entries.get_mut(&key) else {
            return Err(Error::InvalidOperation(format!("{} preview for {:?} was not cached", R::KIND, key)));
        };
        cached.last_frame = frame;
        cached.last_tick = tick;

        cached.renderer.render(resource, renderer)?;
        cached.renderer.draw_ui(ui);
        Ok(())
    }

    /// Evict until one more entry fits the policy
    fn make_room(&mut self) {
        let EvictionPolicy::LeastRecentlyUsed { capacity } = self.config.eviction else {
            return;
        };
        let capacity = capacity.max(1);
        while self.entries.len() >= capacity {
            let Some(oldest) = self.entries.iter()
                .min_by_key(|(_, cached)| cached.last_tick)
                .map(|(key, _)| *key)
            else {
                break;
            };
            self.entries.remove(&oldest);
            crate::engine_info!("sandbox3d::OnDemandRenderer",
                "Evicted {} preview for {:?} (capacity {})", R::KIND, oldest, capacity);
        }
    }

    pub fn renderer_for(&self, key: R::Key) -> Option<&R> {
        self.entries.get(&key).map(|cached| &cached.renderer)
    }

    pub fn renderer_for_mut(&mut self, key: R::Key) -> Option<&mut R> {
        self.entries.get_mut(&key).map(|cached| &mut cached.renderer)
    }

    pub fn contains(&self, key: R::Key) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = R::Key> + '_ {
        self.entries.keys().copied()
    }

    /// Frame of the last draw of `key`
    pub fn last_drawn_frame(&self, key: R::Key) -> Option<u64> {
        self.entries.get(&key).map(|cached| cached.last_frame)
    }

    /// Drop the renderer of `key` and its offscreen target
    pub fn remove(&mut self, key: R::Key) -> bool {
        self.entries.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance the frame counter
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
#[path = "on_demand_tests.rs"]
mod tests;
