use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tabstripui::{
    Completion, ContentAnimator, ContentView, Controller, NavigationHost, Point, PositioningConfig,
    PositioningMode, Rect, SelectOutcome, Size, TabItem, TabStrip, TabStripConfig,
};

type Journal = Rc<RefCell<Vec<String>>>;

/// Records every transition hook under the view's label and completes at once.
struct RecordingAnimator {
    label: &'static str,
    journal: Journal,
}

impl RecordingAnimator {
    fn record(&self, hook: &str, completion: Completion) {
        self.journal.borrow_mut().push(format!("{} {hook}", self.label));
        completion.fire();
    }
}

impl ContentAnimator for RecordingAnimator {
    fn select_animation(&self, _: &ContentView, _: bool, completion: Completion) {
        self.record("select", completion);
    }
    fn deselect_animation(&self, _: &ContentView, _: bool, completion: Completion) {
        self.record("deselect", completion);
    }
    fn reselect_animation(&self, _: &ContentView, _: bool, completion: Completion) {
        self.record("reselect", completion);
    }
    fn highlight_animation(&self, _: &ContentView, _: bool, completion: Completion) {
        self.record("highlight", completion);
    }
    fn dehighlight_animation(&self, _: &ContentView, _: bool, completion: Completion) {
        self.record("dehighlight", completion);
    }
}

fn recorded_view(label: &'static str, journal: &Journal) -> ContentView {
    ContentView::with_animator(Rc::new(RecordingAnimator {
        label,
        journal: journal.clone(),
    }))
}

#[derive(Default)]
struct MockHost {
    pages: Vec<&'static str>,
    stacked: Vec<&'static str>,
    selected: Cell<Option<usize>>,
    overflow: Cell<bool>,
    events: RefCell<Vec<String>>,
}

impl NavigationHost for MockHost {
    type Page = &'static str;

    fn pages(&self) -> Vec<&'static str> {
        self.pages.clone()
    }
    fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }
    fn set_selected_index(&self, index: usize) {
        self.selected.set(Some(index));
        self.events.borrow_mut().push(format!("host select {index}"));
    }
    fn show_overflow_page(&self) {
        self.events.borrow_mut().push("host overflow".to_string());
    }
    fn is_overflow_active(&self) -> bool {
        self.overflow.get()
    }
    fn has_navigation_stack(&self, page: &&'static str) -> bool {
        self.stacked.contains(page)
    }
    fn pop_to_root(&self, page: &&'static str, _animated: bool) {
        self.events.borrow_mut().push(format!("pop {page}"));
    }
    fn apply_native_positioning(&self, mode: PositioningMode) {
        self.events.borrow_mut().push(format!("native {mode:?}"));
    }
}

struct Fixture {
    controller: Rc<Controller<MockHost>>,
    journal: Journal,
    selections: Rc<RefCell<Vec<(&'static str, usize)>>>,
}

fn fixture(labels: &[&'static str], host: MockHost) -> Fixture {
    let journal: Journal = Rc::default();
    let config = TabStripConfig {
        positioning: PositioningConfig {
            mode: PositioningMode::FillExcludeSeparator,
            ..Default::default()
        },
        show_overflow_view: true,
    };
    let controller = Controller::new(host, config);
    let items = labels
        .iter()
        .map(|label| TabItem::new(recorded_view(*label, &journal)))
        .collect();
    controller.set_items(items, false).unwrap();
    controller.set_bounds(Size::new(375.0, 49.0)).unwrap();
    controller.layout_if_needed().unwrap();

    let selections = Rc::new(RefCell::new(Vec::new()));
    let sink = selections.clone();
    controller.set_did_select_handler(move |page, index| sink.borrow_mut().push((*page, index)));
    Fixture {
        controller,
        journal,
        selections,
    }
}

fn abc_host() -> MockHost {
    MockHost {
        pages: vec!["A", "B", "C"],
        stacked: vec!["B"],
        ..Default::default()
    }
}

#[test]
fn selecting_b_then_reselecting_pops_its_stack() {
    let fx = fixture(&["A", "B", "C"], abc_host());
    fx.controller.select_item(0, true).unwrap();
    fx.journal.borrow_mut().clear();

    assert_eq!(
        fx.controller.select_item(1, true),
        Ok(SelectOutcome::Selected { previous: Some(0) })
    );
    assert_eq!(*fx.journal.borrow(), vec!["A deselect", "B select"]);
    assert_eq!(fx.selections.borrow().last(), Some(&("B", 1)));

    fx.journal.borrow_mut().clear();
    assert_eq!(fx.controller.select_item(1, true), Ok(SelectOutcome::Reselected));
    assert_eq!(*fx.journal.borrow(), vec!["B reselect"]);
    assert_eq!(fx.selections.borrow().len(), 2);
    assert_eq!(
        fx.controller.host().events.borrow().last().map(String::as_str),
        Some("pop B")
    );
}

#[test]
fn overflow_slot_selects_the_overflow_view() {
    let host = MockHost {
        pages: vec!["A", "B", "C", "D"],
        ..Default::default()
    };
    let fx = fixture(&["A", "B", "C", "D"], host);
    fx.controller.host().overflow.set(true);

    fx.controller.select_item(3, false).unwrap();
    let (overflow_selected, own_slot_view) = fx
        .controller
        .with_strip(|strip| {
            let overflow = strip.overflow_view().map(ContentView::is_selected);
            let own = strip.items()[3].content_view.clone();
            (overflow, own)
        })
        .unwrap();
    assert_eq!(overflow_selected, Some(true));
    assert!(!own_slot_view.unwrap().is_selected());
    assert!(!fx.journal.borrow().iter().any(|entry| entry == "D select"));
    assert_eq!(
        fx.controller.host().events.borrow().last().map(String::as_str),
        Some("host overflow")
    );
    assert!(fx.selections.borrow().is_empty());
}

#[test]
fn hijacked_tap_flashes_and_keeps_selection() {
    let fx = fixture(&["A", "B", "C"], abc_host());
    fx.controller.select_item(0, false).unwrap();
    fx.controller.set_should_hijack_handler(|page, _| *page == "C");
    let hijacked = Rc::new(Cell::new(false));
    let flag = hijacked.clone();
    fx.controller.set_did_hijack_handler(move |_, _| flag.set(true));
    fx.journal.borrow_mut().clear();

    assert_eq!(fx.controller.select_item(2, true), Ok(SelectOutcome::Hijacked));
    assert!(hijacked.get());
    assert_eq!(*fx.journal.borrow(), vec!["C select", "C deselect"]);
    assert_eq!(
        fx.controller.with_strip(TabStrip::selected_index),
        Ok(Some(0))
    );
    assert_eq!(fx.selections.borrow().len(), 1);
}

#[test]
fn tap_through_pointer_input_reaches_the_host() {
    let fx = fixture(&["A", "B", "C"], abc_host());
    fx.controller.pointer_down(Point::new(200.0, 20.0)).unwrap();
    fx.controller.pointer_up(Point::new(200.0, 22.0)).unwrap();
    assert_eq!(
        *fx.journal.borrow(),
        vec!["B highlight", "B dehighlight", "B select"]
    );
    assert_eq!(fx.controller.host().selected.get(), Some(1));
}

#[test]
fn native_positioning_is_forwarded_and_frames_copied() {
    let fx = fixture(&["A", "B"], MockHost {
        pages: vec!["A", "B"],
        ..Default::default()
    });
    fx.controller
        .set_positioning(PositioningConfig {
            mode: PositioningMode::Centered,
            ..Default::default()
        })
        .unwrap();
    fx.controller
        .set_native_button_frames(vec![
            Rect::new(200.0, 1.0, 90.0, 48.0),
            Rect::new(100.0, 1.0, 90.0, 48.0),
        ])
        .unwrap();
    fx.controller.layout_if_needed().unwrap();

    let frames = fx
        .controller
        .with_strip(|strip| strip.containers().iter().map(|c| c.frame()).collect::<Vec<_>>())
        .unwrap();
    assert_eq!(
        frames,
        vec![
            Rect::new(100.0, 1.0, 90.0, 48.0),
            Rect::new(200.0, 1.0, 90.0, 48.0),
        ]
    );
    assert_eq!(
        fx.controller.host().events.borrow().last().map(String::as_str),
        Some("native Centered")
    );
    let buttons = fx.controller.native_buttons().unwrap();
    assert!(buttons.iter().all(|button| button.hidden));
}
