//! Region registry: the authoritative region list plus the per-type overlay
//! registrations that render and hit-test them.

use std::rc::Rc;

use super::HitProbe;
use crate::error::Result;
use crate::layout::GridSnapshot;
use crate::render::DrawContext;
use crate::types::GridRegion;

/// Paints one region during the composited overlay pass
pub type RenderFn = dyn Fn(&mut dyn DrawContext, &GridRegion, &GridSnapshot<'_>) -> Result<()>;

/// Answers whether a pointer probe falls within a region's interactive area
pub type HitTestFn = dyn Fn(&HitProbe, &GridRegion, &GridSnapshot<'_>) -> bool;

/// Listener notified synchronously after every region-list mutation
pub type RegionListener = dyn FnMut(&[GridRegion]);

/// A renderer / hit-tester pair bound to one region type
pub struct OverlayRegistration {
    region_type: String,
    priority: i32,
    renderer: Box<RenderFn>,
    hit_test: Option<Box<HitTestFn>>,
}

impl OverlayRegistration {
    /// Create a purely decorative registration (priority 0, no hit-test)
    pub fn new<F>(region_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&mut dyn DrawContext, &GridRegion, &GridSnapshot<'_>) -> Result<()> + 'static,
    {
        Self {
            region_type: region_type.into(),
            priority: 0,
            renderer: Box::new(renderer),
            hit_test: None,
        }
    }

    /// Render order is ascending priority; hit-testing is descending
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Make the region type interactively claimable
    pub fn with_hit_test<F>(mut self, hit_test: F) -> Self
    where
        F: Fn(&HitProbe, &GridRegion, &GridSnapshot<'_>) -> bool + 'static,
    {
        self.hit_test = Some(Box::new(hit_test));
        self
    }

    /// Claim pointer events anywhere inside the region's bounds
    pub fn with_bounds_hit_test(self) -> Self {
        self.with_hit_test(super::bounds_hit_test)
    }

    pub fn region_type(&self) -> &str {
        &self.region_type
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_interactive(&self) -> bool {
        self.hit_test.is_some()
    }

    pub(crate) fn render(
        &self,
        ctx: &mut dyn DrawContext,
        region: &GridRegion,
        grid: &GridSnapshot<'_>,
    ) -> Result<()> {
        (self.renderer)(ctx, region, grid)
    }

    /// `false` for decorative registrations
    pub(crate) fn hit_test(
        &self,
        probe: &HitProbe,
        region: &GridRegion,
        grid: &GridSnapshot<'_>,
    ) -> bool {
        match &self.hit_test {
            Some(f) => f(probe, region, grid),
            None => false,
        }
    }
}

impl std::fmt::Debug for OverlayRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayRegistration")
            .field("region_type", &self.region_type)
            .field("priority", &self.priority)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

/// Disposer token returned by [`RegionRegistry::register_overlay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

/// Token returned by [`RegionRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry {
    handle: OverlayHandle,
    registration: OverlayRegistration,
}

/// Owns the active regions and the overlay registrations
pub struct RegionRegistry {
    /// Registrations in registration order
    entries: Vec<Entry>,
    regions: Rc<[GridRegion]>,
    listeners: Vec<(SubscriptionId, Box<RegionListener>)>,
    next_id: u64,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            regions: Rc::from(Vec::new()),
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- Registrations -------------------------------------------------

    /// Register the overlay for a region type.
    ///
    /// Registering a type that already has an overlay replaces it; the
    /// replacement takes the newest registration slot for tie-breaking.
    pub fn register_overlay(&mut self, registration: OverlayRegistration) -> OverlayHandle {
        let handle = OverlayHandle(self.next_id());
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.registration.region_type == registration.region_type)
        {
            tracing::debug!(
                region_type = %registration.region_type,
                "replacing existing overlay registration"
            );
            self.entries.remove(pos);
        }
        self.entries.push(Entry {
            handle,
            registration,
        });
        handle
    }

    /// Remove the registration created with `handle`.
    ///
    /// Returns `false` if the handle is stale (already removed or replaced).
    pub fn unregister_overlay(&mut self, handle: OverlayHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn registration(&self, region_type: &str) -> Option<&OverlayRegistration> {
        self.entries
            .iter()
            .map(|e| &e.registration)
            .find(|r| r.region_type == region_type)
    }

    pub fn has_hit_tester(&self, region_type: &str) -> bool {
        self.registration(region_type)
            .is_some_and(OverlayRegistration::is_interactive)
    }

    /// Registrations sorted by ascending priority, ties in registration order
    pub fn renderers_by_priority(&self) -> Vec<&OverlayRegistration> {
        let mut out: Vec<&OverlayRegistration> =
            self.entries.iter().map(|e| &e.registration).collect();
        out.sort_by_key(|r| r.priority);
        out
    }

    // ---- Regions -------------------------------------------------------

    /// Current immutable snapshot of the region list
    pub fn regions(&self) -> Rc<[GridRegion]> {
        Rc::clone(&self.regions)
    }

    pub fn region(&self, id: &str) -> Option<&GridRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn regions_of_type<'a>(
        &'a self,
        region_type: &'a str,
    ) -> impl Iterator<Item = &'a GridRegion> + 'a {
        self.regions
            .iter()
            .filter(move |r| r.region_type == region_type)
    }

    /// Cell-anchored regions covering `(row, col)`
    pub fn regions_at_cell(&self, row: u32, col: u32) -> Vec<&GridRegion> {
        self.regions
            .iter()
            .filter(|r| !r.is_floating() && r.cell_range().contains(row, col))
            .collect()
    }

    /// Replace the whole region list
    pub fn set_regions(&mut self, regions: Vec<GridRegion>) {
        self.regions = Rc::from(regions);
        self.notify();
    }

    /// Append regions to the list
    pub fn add_regions(&mut self, regions: Vec<GridRegion>) {
        if regions.is_empty() {
            return;
        }
        let mut next: Vec<GridRegion> = self.regions.to_vec();
        next.extend(regions);
        self.regions = Rc::from(next);
        self.notify();
    }

    /// Remove every region of `region_type`
    pub fn remove_regions_by_type(&mut self, region_type: &str) {
        let next: Vec<GridRegion> = self
            .regions
            .iter()
            .filter(|r| r.region_type != region_type)
            .cloned()
            .collect();
        self.regions = Rc::from(next);
        self.notify();
    }

    /// Swap all regions of `region_type` for `regions`, notifying once.
    pub fn replace_regions_by_type(&mut self, region_type: &str, regions: Vec<GridRegion>) {
        let mut next: Vec<GridRegion> = self
            .regions
            .iter()
            .filter(|r| r.region_type != region_type)
            .cloned()
            .collect();
        next.extend(regions);
        self.regions = Rc::from(next);
        self.notify();
    }

    // ---- Listeners -----------------------------------------------------

    /// Subscribe to region-list changes. Listeners run synchronously, in
    /// subscription order, inside the mutating call.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[GridRegion]) + 'static,
    {
        let id = SubscriptionId(self.next_id());
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let snapshot = Rc::clone(&self.regions);
        for (_, listener) in &mut self.listeners {
            listener(snapshot.as_ref());
        }
    }
}

impl std::fmt::Debug for RegionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionRegistry")
            .field("registrations", &self.renderers_by_priority())
            .field("regions", &self.regions.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::CellRange;
    use std::cell::RefCell;

    fn noop(region_type: &str) -> OverlayRegistration {
        OverlayRegistration::new(region_type, |_, _, _| Ok(()))
    }

    #[test]
    fn test_same_type_replaces() {
        let mut registry = RegionRegistry::new();
        registry.register_overlay(noop("table").with_priority(1));
        registry.register_overlay(noop("table").with_priority(7));
        let renderers = registry.renderers_by_priority();
        assert_eq!(renderers.len(), 1);
        assert_eq!(renderers[0].priority(), 7);
    }

    #[test]
    fn test_stale_handle_does_not_remove_replacement() {
        let mut registry = RegionRegistry::new();
        let old = registry.register_overlay(noop("chart"));
        let new = registry.register_overlay(noop("chart").with_priority(3));
        assert!(!registry.unregister_overlay(old));
        assert_eq!(registry.renderers_by_priority().len(), 1);
        assert!(registry.unregister_overlay(new));
        assert!(registry.renderers_by_priority().is_empty());
    }

    #[test]
    fn test_priority_ties_keep_registration_order() {
        let mut registry = RegionRegistry::new();
        registry.register_overlay(noop("a").with_priority(2));
        registry.register_overlay(noop("b").with_priority(1));
        registry.register_overlay(noop("c").with_priority(2));
        let order: Vec<&str> = registry
            .renderers_by_priority()
            .iter()
            .map(|r| r.region_type())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_listeners_fire_on_every_mutation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = RegionRegistry::new();
        let sink = Rc::clone(&seen);
        registry.subscribe(move |regions| sink.borrow_mut().push(regions.len()));

        registry.set_regions(vec![GridRegion::cells("t1", "table", CellRange::cell(0, 0))]);
        registry.add_regions(vec![GridRegion::cells("b1", "bookmark", CellRange::cell(1, 1))]);
        registry.remove_regions_by_type("table");

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = RegionRegistry::new();
        let c = Rc::clone(&count);
        let id = registry.subscribe(move |_| *c.borrow_mut() += 1);
        registry.set_regions(Vec::new());
        assert!(registry.unsubscribe(id));
        registry.set_regions(Vec::new());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let mut registry = RegionRegistry::new();
        registry.set_regions(vec![GridRegion::cells("t1", "table", CellRange::cell(0, 0))]);
        let before = registry.regions();
        registry.remove_regions_by_type("table");
        assert_eq!(before.len(), 1);
        assert!(registry.regions().is_empty());
    }

    #[test]
    fn test_replace_regions_by_type() {
        let mut registry = RegionRegistry::new();
        registry.set_regions(vec![
            GridRegion::cells("t1", "table", CellRange::cell(0, 0)),
            GridRegion::cells("b1", "bookmark", CellRange::cell(1, 1)),
        ]);
        registry.replace_regions_by_type(
            "table",
            vec![GridRegion::cells("t2", "table", CellRange::new(2, 2, 4, 4))],
        );
        assert!(registry.region("t1").is_none());
        assert!(registry.region("t2").is_some());
        assert!(registry.region("b1").is_some());
        assert_eq!(registry.regions_at_cell(3, 3).len(), 1);
    }
}
