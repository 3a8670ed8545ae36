//! End-to-end page scenarios: scrolling, navbar state, menu and follower.

use spark_folio::animation::reset_animations;
use spark_folio::content::NAV_LINKS;
use spark_folio::state::frame::reset_frame_tasks;
use spark_folio::state::input::Command;
use spark_folio::state::mouse::{reset_mouse_state, PointerEvent};
use spark_folio::{AppConfig, Flow, Page, Point};

const DT: f64 = 1.0 / 60.0;

fn setup(cols: u16, rows: u16) -> Page {
    reset_animations();
    reset_mouse_state();
    reset_frame_tasks();
    Page::new(AppConfig::default(), cols, rows).unwrap()
}

fn section_top(page: &Page, id: &str) -> f64 {
    let node = page.tree().find_by_id(id).unwrap();
    page.layout().rect_px(node).unwrap().top
}

#[test]
fn test_scrolling_updates_navbar_state() {
    let mut page = setup(120, 50);
    page.tick(DT).unwrap();
    assert_eq!(page.store().active_section.get(), "home");
    assert!(!page.store().scrolled.get());

    page.scroll_by(150.0).unwrap();
    page.tick(DT).unwrap();
    assert_eq!(page.store().active_section.get(), "home");
    assert!(page.store().scrolled.get());

    page.scroll_by(700.0).unwrap();
    page.tick(DT).unwrap();
    assert_eq!(page.scroll_offset(), 850.0);
    assert_eq!(page.store().active_section.get(), "skills");
}

#[test]
fn test_active_section_tracks_every_link() {
    let mut page = setup(120, 50);
    for link in NAV_LINKS {
        let top = section_top(&page, link.target_id());
        page.scroll_by(top - page.scroll_offset()).unwrap();
        page.tick(DT).unwrap();
        // The last section may sit above the largest reachable offset
        if page.scroll_offset() == top {
            assert_eq!(page.store().active_section.get(), link.target_id());
        }
    }
}

#[test]
fn test_mobile_menu_navigation() {
    let mut page = setup(80, 40);
    assert!(!page.store().menu_open.get());

    page.handle_command(Command::ToggleMenu).unwrap();
    assert!(page.store().menu_open.get());

    assert!(page.select_nav(2).unwrap());
    assert!(!page.store().menu_open.get());
    assert_eq!(page.scroll_target(), section_top(&page, "projects"));

    assert!(!page.select_nav(NAV_LINKS.len()).unwrap());
}

#[test]
fn test_follower_trails_pointer() {
    let mut page = setup(120, 50);
    let target = Point::new(400.0, 300.0);
    page.handle_pointer(PointerEvent::move_to(50, 18, target)).unwrap();

    let mut last = f64::MAX;
    for _ in 0..90 {
        page.tick(DT).unwrap();
        let halo = page.follower().unwrap().markers().halo;
        let distance = ((halo.x - target.x).powi(2) + (halo.y - target.y).powi(2)).sqrt();
        assert!(distance < last);
        last = distance;
    }
    assert!(last < 1.0);
    assert_eq!(page.scene().overlays.len(), 2);
}

#[test]
fn test_quit_and_unmount() {
    let mut page = setup(120, 50);
    assert_eq!(page.handle_command(Command::Top).unwrap(), Flow::Continue);
    assert_eq!(page.handle_command(Command::Quit).unwrap(), Flow::Quit);
    page.unmount();
    assert!(!page.is_mounted());
    assert!(page.follower().is_none());
}
