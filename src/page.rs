//! Page Composer - the whole portfolio as one mounted page.
//!
//! Builds the navbar and the content sections in their fixed order, mounts
//! every section's animations and listeners, mounts the mouse follower, and
//! plays one page-wide fade-in. The event loop drives it through
//! [`Page::tick`], [`Page::handle_pointer`] and [`Page::handle_command`], and
//! paints whatever [`Page::scene`] returns.
//!
//! Navbar state (scrolled chrome, active section, mobile menu) is recomputed
//! from freshly laid-out section bounds on every tick.

use std::rc::Rc;

use crate::animation::{self as anim, animate, AnimationSpec, Ease, FrameContext, Props, ScrollView, Target, Trigger, Tween};
use crate::config::AppConfig;
use crate::content::NAV_LINKS;
use crate::follower::MouseFollower;
use crate::layout::{compute_layout, ComputedLayout, LinkAction, NodeId, NodeTree};
use crate::renderer::{paint, Frame, Scene};
use crate::sections::navbar::{self, NavbarNodes, NavbarState};
use crate::sections::{about, contact, footer, hero, projects, skills, Scope, SectionContext};
use crate::state::frame::run_frame;
use crate::state::input::Command;
use crate::state::mouse::{self, PointerAction, PointerEvent, ScrollDirection};
use crate::state::{AppStore, SmoothScroll, Viewport};
use crate::theme::Theme;
use crate::Result;

/// Whether the loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Page {
    config: AppConfig,
    theme: Theme,
    store: AppStore,
    tree: Rc<NodeTree>,
    layout: Rc<ComputedLayout>,
    navbar: NavbarNodes,
    navbar_state: NavbarState,
    scroll: SmoothScroll,
    scopes: Vec<Scope>,
    follower: Option<MouseFollower>,
    last_external: Option<String>,
}

impl Page {
    /// Build and mount the page for a `cols` x `rows` viewport.
    pub fn new(config: AppConfig, cols: u16, rows: u16) -> Result<Self> {
        config.validate()?;
        let theme = config.theme();
        anim::configure(&config.animation);

        let metrics = config.viewport.cell_metrics();
        let store = AppStore::new(Viewport::new(cols, rows, metrics));

        let mut tree = NodeTree::new();
        let root = tree.root();
        let navbar = navbar::build(&mut tree, root, &theme);
        hero::build(&mut tree, root, &theme);
        skills::build(&mut tree, root, &theme);
        projects::build(&mut tree, root, &theme);
        about::build(&mut tree, root, &theme);
        contact::build(&mut tree, root, &theme);
        footer::build(&mut tree, root, &theme);

        let navbar_state = NavbarState {
            scrolled: false,
            active: store.active_section.get(),
            menu_open: false,
        };
        navbar::apply(&mut tree, &navbar, &navbar_state, &theme);

        let mut page = Self {
            scroll: SmoothScroll::new(config.animation.enabled),
            config,
            theme,
            store,
            tree: Rc::new(tree),
            layout: Rc::new(ComputedLayout::empty(cols, rows, metrics)),
            navbar,
            navbar_state,
            scopes: Vec::new(),
            follower: None,
            last_external: None,
        };
        page.relayout()?;
        page.mount();
        Ok(page)
    }

    fn mount(&mut self) {
        let ctx = SectionContext::new(&self.tree, &self.store, &self.theme);
        let mounts: [fn(&SectionContext<'_>) -> Scope; 7] = [
            navbar::mount,
            hero::mount,
            skills::mount,
            projects::mount,
            about::mount,
            contact::mount,
            footer::mount,
        ];
        let mut scopes: Vec<Scope> = mounts.iter().map(|mount| mount(&ctx)).collect();

        let mut fade_in = Scope::new();
        fade_in.animation(animate(AnimationSpec::new(
            Tween::from_to(
                vec![Target::node(self.tree.root())],
                Props::new().opacity(0.0),
                Props::new().opacity(1.0),
            )
            .duration(0.8)
            .ease(Ease::Power2Out),
            Trigger::Immediate,
        )));
        scopes.push(fade_in);
        self.scopes = scopes;

        self.follower = Some(MouseFollower::mount(
            &self.store,
            &self.config.follower,
            self.config.viewport.narrow_breakpoint_px,
            &self.theme,
        ));
        tracing::info!(sections = self.scopes.len(), "page mounted");
    }

    /// Drop every section scope and stop the follower.
    pub fn unmount(&mut self) {
        self.scopes.clear();
        if let Some(mut follower) = self.follower.take() {
            follower.unmount();
        }
        tracing::info!("page unmounted");
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn layout(&self) -> &ComputedLayout {
        &self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn navbar(&self) -> &NavbarNodes {
        &self.navbar
    }

    pub fn follower(&self) -> Option<&MouseFollower> {
        self.follower.as_ref()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    /// Offset the page is scrolling toward.
    pub fn scroll_target(&self) -> f64 {
        self.scroll.target()
    }

    /// Most recent link that leaves the page.
    pub fn last_external(&self) -> Option<&str> {
        self.last_external.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        !self.scopes.is_empty()
    }

    fn viewport(&self) -> Viewport {
        self.store.viewport.get()
    }

    fn is_narrow(&self) -> bool {
        self.viewport().is_narrow(self.config.viewport.narrow_breakpoint_px)
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Advance the page by `dt` seconds: scroll animation, frame tasks,
    /// navbar state, then every animation trigger and clock.
    pub fn tick(&mut self, dt: f64) -> Result<()> {
        self.scroll.update(dt);
        self.sync_scroll()?;
        run_frame(dt);

        let ctx = FrameContext {
            layout: &self.layout,
            view: ScrollView::new(self.scroll.offset(), self.viewport().height_px()),
        };
        for event in anim::tick(dt, &ctx) {
            tracing::trace!(?event, "trigger fired");
        }
        Ok(())
    }

    /// Publish the scroll offset and refresh the navbar from it.
    fn sync_scroll(&mut self) -> Result<()> {
        AppStore::update(&self.store.scroll_y, self.scroll.offset());
        self.refresh_navbar()
    }

    /// Recompute scrolled/active/menu state and restyle the navbar on change.
    fn refresh_navbar(&mut self) -> Result<()> {
        let offset = self.scroll.offset();
        let bounds = self.layout.section_bounds(&self.tree);
        let anchor = offset + self.config.navbar.active_anchor_offset_px;
        let state = NavbarState {
            scrolled: navbar::is_scrolled(offset, self.config.navbar.scrolled_threshold_px),
            active: navbar::active_section(&bounds, anchor, &self.navbar_state.active),
            menu_open: self.store.menu_open.get(),
        };

        AppStore::update(&self.store.scrolled, state.scrolled);
        if AppStore::update(&self.store.active_section, state.active.clone()) {
            tracing::debug!(section = %state.active, "active section");
        }

        if state == self.navbar_state {
            return Ok(());
        }
        let relayout = navbar::apply(Rc::make_mut(&mut self.tree), &self.navbar, &state, &self.theme);
        self.navbar_state = state;
        self.store.bump();
        if relayout {
            self.relayout()?;
        }
        Ok(())
    }

    fn relayout(&mut self) -> Result<()> {
        let viewport = self.viewport();
        let layout = compute_layout(
            &self.tree,
            viewport.cols,
            viewport.rows,
            self.is_narrow(),
            viewport.metrics,
        )?;
        self.scroll.set_extent(layout.page_height_px(), viewport.height_px());
        self.layout = Rc::new(layout);
        Ok(())
    }

    /// Everything needed to paint the current frame.
    pub fn scene(&self) -> Scene {
        let viewport = self.viewport();
        Scene {
            tree: self.tree.clone(),
            layout: self.layout.clone(),
            styles: Rc::new(anim::styles()),
            scroll_y: self.scroll.offset(),
            cols: viewport.cols,
            rows: viewport.rows,
            foreground: self.theme.text,
            background: self.theme.background,
            hovered: self.store.hovered.get(),
            overlays: self
                .follower
                .as_ref()
                .map(MouseFollower::overlays)
                .unwrap_or_default(),
        }
    }

    /// Paint the current scene and install its hit grid.
    pub fn paint(&self) -> Frame {
        let frame = paint(&self.scene());
        mouse::set_hit_grid(frame.hits.clone());
        frame
    }

    // =========================================================================
    // SCROLLING
    // =========================================================================

    /// Scroll right away by `delta` pixels.
    pub fn scroll_by(&mut self, delta: f64) -> Result<()> {
        self.scroll.scroll_by(delta);
        self.sync_scroll()
    }

    /// Smooth scroll to an offset.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll.scroll_to(offset);
    }

    /// Smooth scroll to the element with `element_id`. Returns false when no
    /// such element is laid out.
    pub fn scroll_into_view(&mut self, element_id: &str) -> bool {
        let Some(rect) = self
            .tree
            .find_by_id(element_id)
            .and_then(|id| self.layout.rect_px(id))
        else {
            tracing::warn!(element_id, "scroll target not found");
            return false;
        };
        tracing::debug!(element_id, top = rect.top, "scroll into view");
        self.scroll.scroll_to(rect.top);
        true
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Route a pointer event: hover listeners, store, clicks and the wheel.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<()> {
        let hit = mouse::hit_test(event.col, event.row);
        mouse::dispatch(event.clone(), &self.tree);

        match event.action {
            PointerAction::Move => {
                self.store.pointer.set(Some(event.position));
                let hovered = hit.and_then(|id| self.tree.interactive_ancestor(id));
                AppStore::update(&self.store.hovered, hovered);
            }
            PointerAction::Down if event.button == mouse::MouseButton::Left => {
                if let Some(target) = hit.and_then(|id| self.tree.interactive_ancestor(id)) {
                    self.activate(target)?;
                }
            }
            PointerAction::Scroll => {
                let step = self.config.viewport.wheel_step_px;
                let delta = match event.scroll {
                    Some(ScrollDirection::Up) => -step,
                    Some(ScrollDirection::Down) => step,
                    None => 0.0,
                };
                self.scroll_by(delta)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Run a keyboard command.
    pub fn handle_command(&mut self, command: Command) -> Result<Flow> {
        let viewport_h = self.viewport().height_px();
        match command {
            Command::Scroll(steps) => self.scroll_by(steps as f64 * self.config.viewport.wheel_step_px)?,
            Command::Page(pages) => self.scroll_by(pages as f64 * viewport_h)?,
            Command::Top => self.scroll_to(0.0),
            Command::Bottom => self.scroll_to(self.scroll.max()),
            Command::ToggleMenu => self.toggle_menu()?,
            Command::Jump(index) => {
                self.select_nav(index)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Follow the link on an interactive node.
    fn activate(&mut self, node: NodeId) -> Result<()> {
        let Some(action) = self.tree.get(node).and_then(|n| n.link.clone()) else {
            return Ok(());
        };
        self.follow(action)
    }

    fn follow(&mut self, action: LinkAction) -> Result<()> {
        match action {
            LinkAction::Anchor(id) => {
                self.set_menu(false)?;
                self.scroll_into_view(&id);
            }
            LinkAction::External(url) => {
                tracing::info!(%url, "external link");
                self.last_external = Some(url);
            }
            LinkAction::ScrollTop => self.scroll_to(0.0),
            LinkAction::ToggleMenu => self.toggle_menu()?,
        }
        Ok(())
    }

    /// Open or close the mobile menu.
    pub fn toggle_menu(&mut self) -> Result<()> {
        let open = !self.store.menu_open.get();
        self.set_menu(open)
    }

    fn set_menu(&mut self, open: bool) -> Result<()> {
        if AppStore::update(&self.store.menu_open, open) {
            tracing::debug!(open, "mobile menu");
        }
        self.refresh_navbar()
    }

    /// Navigate to the nth navbar link, closing the mobile menu.
    pub fn select_nav(&mut self, index: usize) -> Result<bool> {
        let Some(link) = NAV_LINKS.get(index) else {
            return Ok(false);
        };
        self.follow(LinkAction::Anchor(link.target_id().to_string()))?;
        Ok(true)
    }

    /// Adopt a new terminal size.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        let metrics = self.config.viewport.cell_metrics();
        AppStore::update(&self.store.viewport, Viewport::new(cols, rows, metrics));
        self.relayout()?;
        self.sync_scroll()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("scroll", &self.scroll.offset())
            .field("navbar", &self.navbar_state)
            .field("scopes", &self.scopes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{animation_count, reset_animations};
    use crate::state::frame::{reset_frame_tasks, task_count};
    use crate::state::mouse::{listener_count, reset_mouse_state};
    use crate::types::Point;

    fn setup() -> Page {
        reset_animations();
        reset_mouse_state();
        reset_frame_tasks();
        Page::new(AppConfig::default(), 120, 50).unwrap()
    }

    #[test]
    fn test_sections_in_order() {
        let page = setup();
        let ids: Vec<_> = page
            .layout()
            .section_bounds(page.tree())
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, ["home", "skills", "projects", "about", "contact"]);
    }

    #[test]
    fn test_scroll_into_view_animates() {
        let mut page = setup();
        assert!(page.scroll_into_view("skills"));
        assert_eq!(page.scroll_target(), 800.0);
        for _ in 0..60 {
            page.tick(1.0 / 60.0).unwrap();
        }
        assert_eq!(page.scroll_offset(), 800.0);
        assert_eq!(page.store().active_section.get(), "skills");
        assert!(!page.scroll_into_view("missing"));
    }

    #[test]
    fn test_commands() {
        let mut page = setup();
        assert_eq!(page.handle_command(Command::Scroll(2)).unwrap(), Flow::Continue);
        assert_eq!(page.scroll_offset(), 96.0);
        assert!(page.store().scrolled.get());
        page.handle_command(Command::Page(-1)).unwrap();
        assert_eq!(page.scroll_offset(), 0.0);
        assert!(!page.store().scrolled.get());
        assert_eq!(page.handle_command(Command::Quit).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_click_follows_link() {
        let mut page = setup();
        page.tick(5.0).unwrap();
        page.paint();

        let button = page.tree().select_str(".hero-actions .button")[0];
        let rect = page.layout().rect(button).unwrap();
        let position = Point::new(0.0, 0.0);
        page.handle_pointer(PointerEvent::down(mouse::MouseButton::Left, rect.x + 1, rect.y, position))
            .unwrap();
        let projects = page.tree().find_by_id("projects").unwrap();
        assert_eq!(page.scroll_target(), page.layout().rect_px(projects).unwrap().top);
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut page = setup();
        assert!(page.is_mounted());
        assert!(animation_count() > 0);
        assert!(listener_count() > 0);
        assert_eq!(task_count(), 1);

        page.unmount();
        assert!(!page.is_mounted());
        assert_eq!(animation_count(), 0);
        assert_eq!(listener_count(), 0);
        assert_eq!(task_count(), 0);
    }
}
