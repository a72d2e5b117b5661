//! Workspace session: the tab strip plus everything that reacts to it.
//!
//! [`WorkspaceSession`] is the single object the UI layer talks to. It owns
//! the [`TabRegistry`], resolves sidebar clicks into tabs, runs drag
//! reorders, and fans every tab or focus change out to a density refit and
//! a debounced snapshot write. It is constructed with an explicit tenant and
//! storage, so independent sessions never share state.

use crate::density::{
    DensityController, DensityOutcome, DensityRun, DensityStep, StripMetrics, fit_density_with,
};
use crate::pane::{NavAction, Section};
use crate::session::{PersistScheduler, SessionStore, Storage, Tenant};
use crate::tab::{Tab, TabId, TabIdentity, TabRegistry, section_tab_id};
use crate::tab_bar::{DragReorder, MoveDirection, ReorderPlan, TabBarAction, TabRect};
use carbono_config::Config;
use std::time::{Duration, Instant};

/// Tab strip session for one tenant.
pub struct WorkspaceSession<S: Storage> {
    registry: TabRegistry,
    store: SessionStore<S>,
    scheduler: PersistScheduler,
    density: DensityController,
    drag: DragReorder,
    /// Set when tabs or focus changed since the last density fit
    density_stale: bool,
}

impl<S: Storage> WorkspaceSession<S> {
    /// Session with the default registry; storage is not read.
    pub fn new(store: SessionStore<S>, debounce: Duration) -> Self {
        Self {
            registry: TabRegistry::new(),
            store,
            scheduler: PersistScheduler::new(debounce),
            density: DensityController::new(),
            drag: DragReorder::new(),
            density_stale: true,
        }
    }

    /// Session restored from the tenant's snapshot when one is usable.
    pub fn restore(store: SessionStore<S>, debounce: Duration) -> Self {
        let mut session = Self::new(store, debounce);
        if let Some(restored) = session.store.restore() {
            restored.apply(&mut session.registry);
        }
        session
    }

    /// Restored session using the configured tenant (or the storage's
    /// tenant slot) and debounce.
    pub fn from_config(storage: S, config: &Config) -> Self {
        let tenant = match &config.tenant {
            Some(name) => Tenant::new(name.clone()),
            None => Tenant::resolve(&storage),
        };
        log::info!("Opening workspace session for tenant '{}'", tenant);
        Self::restore(
            SessionStore::new(storage, tenant),
            Duration::from_millis(config.persist_debounce_ms),
        )
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn tabs(&self) -> &[Tab] {
        self.registry.tabs()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.registry.active_tab()
    }

    /// Sidebar section to highlight
    pub fn active_section(&self) -> Option<Section> {
        self.registry.active_section()
    }

    pub fn tenant(&self) -> &Tenant {
        self.store.tenant()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    // ── Sidebar and documents ──────────────────────────────────────────────

    /// Handle a sidebar click by navigation key.
    ///
    /// Section keys open or focus their tab. `Logout` is returned for the
    /// caller to act on; unknown keys are ignored.
    pub fn navigate(&mut self, key: &str) -> NavAction {
        let action = NavAction::for_key(key);
        match action {
            NavAction::Open(section) => {
                self.open_section(section);
            }
            NavAction::Ignore => log::debug!("Sidebar key '{}' has no section", key),
            NavAction::Logout => {}
        }
        action
    }

    /// Focus the section's tab, opening it first if absent.
    ///
    /// The docs section is the `docs:main` document, see [`Self::open_docs`].
    pub fn open_section(&mut self, section: Section) -> TabId {
        if section == Section::Docs {
            return self.open_docs();
        }
        let identity = TabIdentity::Section(section.key().to_string());
        if let Some(existing) = self.registry.find_by_identity(&identity) {
            let id = existing.id.clone();
            self.activate(&id);
            return id;
        }

        let id = section_tab_id(section);
        self.registry.add(Tab::for_section(section, id.clone()));
        self.registry.activate(&id);
        log::info!("Opened section '{}' as tab {}", section.key(), id);
        self.touch();
        id
    }

    /// Focus the document's tab, opening it first if absent.
    ///
    /// Returns `None`, leaving the strip unchanged, when `kind` or `doc_id`
    /// is blank.
    pub fn open_document(&mut self, kind: &str, doc_id: &str, title: &str) -> Option<TabId> {
        let Some(tab) = Tab::document(kind, doc_id, title) else {
            log::debug!("Rejected document tab '{}:{}'", kind, doc_id);
            return None;
        };
        Some(self.open_tab(tab))
    }

    /// Focus the documentation tab, opening it first if absent
    pub fn open_docs(&mut self) -> TabId {
        self.open_tab(Tab::docs())
    }

    fn open_tab(&mut self, tab: Tab) -> TabId {
        let id = tab.id.clone();
        if self.registry.add(tab) {
            log::info!("Opened document tab {}", id);
            self.touch();
        }
        self.activate(&id);
        id
    }

    // ── Tab strip ──────────────────────────────────────────────────────────

    pub fn activate(&mut self, id: &str) {
        if self.registry.active_id() == Some(id) {
            return;
        }
        self.registry.activate(id);
        self.touch();
    }

    /// Close a tab. Pinned tabs are left alone.
    ///
    /// Returns `true` if a tab was closed.
    pub fn close_tab(&mut self, id: &str) -> bool {
        match self.registry.get(id) {
            Some(tab) if tab.closable => {}
            Some(_) => {
                log::debug!("Tab {} is pinned, close ignored", id);
                return false;
            }
            None => return false,
        }
        let closed = self.registry.close(id);
        if closed {
            self.touch();
        }
        closed
    }

    pub fn next_tab(&mut self) {
        let before = self.registry.active_index();
        self.registry.next_tab();
        if self.registry.active_index() != before {
            self.touch();
        }
    }

    pub fn prev_tab(&mut self) {
        let before = self.registry.active_index();
        self.registry.prev_tab();
        if self.registry.active_index() != before {
            self.touch();
        }
    }

    /// Keyboard reorder of the active tab
    pub fn move_active(&mut self, direction: MoveDirection) -> bool {
        let Some(id) = self.registry.active_id().map(str::to_string) else {
            return false;
        };
        let moved = self.registry.move_tab(&id, direction.delta()).is_some();
        if moved {
            self.touch();
        }
        moved
    }

    /// Move `id` to `index` (clamped to the strip)
    pub fn move_tab_to(&mut self, id: &str, index: usize) -> bool {
        let moved = self.registry.move_tab_to_index(id, index).is_some();
        if moved {
            self.touch();
        }
        moved
    }

    /// Apply an action emitted by the tab strip
    pub fn handle_action(&mut self, action: TabBarAction) {
        match action {
            TabBarAction::None => {}
            TabBarAction::SwitchTo(id) => self.activate(&id),
            TabBarAction::Close(id) => {
                self.close_tab(&id);
            }
            TabBarAction::Reorder(plan) => {
                self.apply_reorder(&plan);
            }
        }
    }

    // ── Drag reorder ───────────────────────────────────────────────────────

    pub fn begin_drag(&mut self, id: &str) {
        self.drag.begin(id);
    }

    pub fn drag_over(&mut self, over_id: &str) {
        self.drag.hover(over_id);
    }

    pub fn drag_pointer(&mut self, pointer_x: f32, rects: &[TabRect]) {
        self.drag.hover_pointer(pointer_x, rects);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Commit the drag. Returns `true` if the strip was reordered.
    pub fn end_drag(&mut self) -> bool {
        match self.drag.end(self.registry.tabs()) {
            Some(plan) => self.apply_reorder(&plan),
            None => false,
        }
    }

    /// Commit a gesture library's final `(source, destination)` pair.
    pub fn drop_tab(&mut self, source_id: &str, destination_id: &str) -> bool {
        self.drag.cancel();
        match ReorderPlan::between(self.registry.tabs(), source_id, destination_id) {
            Some(plan) => self.apply_reorder(&plan),
            None => false,
        }
    }

    fn apply_reorder(&mut self, plan: &ReorderPlan) -> bool {
        let applied = plan.apply(&mut self.registry);
        if applied {
            self.touch();
        }
        applied
    }

    // ── Density ────────────────────────────────────────────────────────────

    /// Whether a density refit is owed (tabs, focus or container changed)
    pub fn density_stale(&self) -> bool {
        self.density_stale
    }

    /// Container resized
    pub fn on_resize(&mut self) {
        self.density_stale = true;
    }

    pub fn density(&self) -> u8 {
        self.registry.density()
    }

    pub fn density_controller(&self) -> &DensityController {
        &self.density
    }

    /// Fit density with a synchronous measurement callback.
    ///
    /// `measure` receives the level just applied and must return the strip
    /// metrics after laying out at that level.
    pub fn refit_density<M>(&mut self, measure: M) -> DensityOutcome
    where
        M: FnMut(u8) -> Option<StripMetrics>,
    {
        let registry = &mut self.registry;
        let outcome = fit_density_with(
            &self.density,
            |level| registry.set_density(level),
            measure,
        );
        if !matches!(outcome, DensityOutcome::Superseded) {
            self.density_stale = false;
        }
        log::trace!("Density refit: {:?}", outcome);
        outcome
    }

    /// Start a stepwise fit for hosts that measure asynchronously.
    ///
    /// Supersedes any run in flight and applies level 0.
    pub fn begin_density_fit(&mut self) -> DensityRun {
        let run = self.density.begin();
        self.registry.set_density(run.level());
        self.density_stale = false;
        run
    }

    /// Feed one measurement of a stepwise fit, applying the next level.
    pub fn density_step(&mut self, run: &mut DensityRun, metrics: StripMetrics) -> DensityStep {
        let step = self.density.step(run, metrics);
        if let DensityStep::Apply(level) = step {
            self.registry.set_density(level);
        }
        step
    }

    // ── Persistence ────────────────────────────────────────────────────────

    pub fn has_pending_save(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// When the pending write is due, for hosts that schedule timers
    pub fn save_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Write the snapshot if the debounce elapsed. Returns `true` if written.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.scheduler.take_due(now) {
            self.store.save(&self.registry)
        } else {
            false
        }
    }

    /// Write the snapshot now, regardless of the debounce.
    pub fn flush(&mut self) -> bool {
        self.scheduler.clear();
        self.store.save(&self.registry)
    }

    /// Drop the tenant's snapshot and return to the default strip.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear tab snapshot: {}", e);
        }
        self.registry = TabRegistry::new();
        self.scheduler.clear();
        self.density_stale = true;
    }

    /// Tabs or focus changed
    fn touch(&mut self) {
        self.scheduler.mark_dirty(Instant::now());
        self.density_stale = true;
    }
}

impl<S: Storage> Drop for WorkspaceSession<S> {
    fn drop(&mut self) {
        if self.scheduler.is_dirty() {
            self.flush();
        }
    }
}
