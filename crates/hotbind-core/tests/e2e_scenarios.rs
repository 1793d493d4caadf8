// Hotbind End-to-End Test Scenarios
//
// Shortcut workflows as a page would see them: a binder on an element,
// events fired from various origins with various modifiers held.
//
// Run with: cargo test -p hotbind-core --test e2e_scenarios

use std::cell::RefCell;
use std::rc::Rc;

use hotbind_core::{
    bind, BindingOptions, BindingsConfig, Element, HandlerMap, HotkeyBinder, KeyboardEvent,
    Modifier, ModifierState, Origin, TargetHandle,
};

// =========================================================================
// Test Helpers
// =========================================================================

type Log = Rc<RefCell<Vec<(String, String)>>>;

/// Handler map whose handlers record (action, key of the event they saw)
fn recording_map(log: &Log, entries: &[(&str, &str)]) -> HandlerMap {
    let mut map = HandlerMap::new();
    for (combo, action) in entries {
        let log = Rc::clone(log);
        let action = action.to_string();
        map.insert(*combo, move |event: &KeyboardEvent| {
            log.borrow_mut()
                .push((action.clone(), event.key().to_string()));
        });
    }
    map
}

fn bound_div(map: HandlerMap) -> (Rc<Element>, HotkeyBinder) {
    let el = Rc::new(Element::new("DIV"));
    let handle: TargetHandle = el.clone();
    let binder = bind(map, BindingOptions::new().with_target(handle));
    (el, binder)
}

fn release(key: &str, held: &[Modifier], origin: &str) -> KeyboardEvent {
    KeyboardEvent::key_up(key)
        .with_modifiers(ModifierState::from_held(held.iter().copied()))
        .with_origin(Origin::new(origin))
}

fn actions(log: &Log) -> Vec<String> {
    log.borrow().iter().map(|(a, _)| a.clone()).collect()
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_ctrl_s_saves_and_prevents_default() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("ctrl+s", "save"), ("Escape", "close")]));

    let event = release("s", &[Modifier::Ctrl], "DIV");
    el.dispatch(&event);

    assert_eq!(*log.borrow(), vec![("save".to_string(), "s".to_string())]);
    assert!(event.default_prevented());
}

#[test]
fn test_escape_in_input_is_ignored() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("ctrl+s", "save"), ("Escape", "close")]));

    let event = release("Escape", &[], "input");
    el.dispatch(&event);

    assert!(log.borrow().is_empty());
    assert!(!event.default_prevented());
}

#[test]
fn test_shift_a_falls_back_to_bare_a() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("a", "select_all")]));

    el.dispatch(&release("a", &[Modifier::Shift], "DIV"));

    assert_eq!(actions(&log), vec!["select_all"]);
}

#[test]
fn test_full_combo_beats_bare_key() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(
        &log,
        &[("z", "bare"), ("ctrl+shift+z", "redo"), ("ctrl+z", "undo")],
    ));

    el.dispatch(&release("z", &[Modifier::Shift, Modifier::Ctrl], "DIV"));
    el.dispatch(&release("z", &[Modifier::Ctrl], "DIV"));
    el.dispatch(&release("z", &[Modifier::Meta], "DIV"));

    assert_eq!(actions(&log), vec!["redo", "undo", "bare"]);
}

#[test]
fn test_modifier_report_order_is_irrelevant() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("ctrl+ALT+shift+meta+k", "all")]));

    let orders = [
        [Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Meta],
        [Modifier::Meta, Modifier::Shift, Modifier::Alt, Modifier::Ctrl],
        [Modifier::Shift, Modifier::Meta, Modifier::Ctrl, Modifier::Alt],
    ];
    for held in &orders {
        el.dispatch(&release("k", held, "DIV"));
    }

    assert_eq!(actions(&log), vec!["all", "all", "all"]);
}

#[test]
fn test_lowercase_alt_binding_never_fires() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("alt+x", "lower"), ("ALT+y", "upper")]));

    el.dispatch(&release("x", &[Modifier::Alt], "DIV"));
    el.dispatch(&release("y", &[Modifier::Alt], "DIV"));

    assert_eq!(actions(&log), vec!["upper"]);
}

#[test]
fn test_text_entry_origins_never_dispatch() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("a", "a"), ("ctrl+a", "ctrl_a")]));

    for tag in ["INPUT", "textarea", "Select"] {
        el.dispatch(&release("a", &[], tag));
        el.dispatch(&release("a", &[Modifier::Ctrl], tag));
    }
    let editable = KeyboardEvent::key_up("a").with_origin(Origin::new("DIV").content_editable(true));
    el.dispatch(&editable);

    assert!(log.borrow().is_empty());
}

#[test]
fn test_exactly_one_handler_per_event() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("shift+A", "combo"), ("A", "bare")]));

    el.dispatch(&release("A", &[Modifier::Shift], "DIV"));

    assert_eq!(actions(&log), vec!["combo"]);
}

#[test]
fn test_event_without_origin_dispatches() {
    let log: Log = Rc::default();
    let (el, _binder) = bound_div(recording_map(&log, &[("Enter", "submit")]));

    el.dispatch(&KeyboardEvent::key_up("Enter"));

    assert_eq!(actions(&log), vec!["submit"]);
}

#[test]
fn test_bindings_file_drives_binder() {
    let config = BindingsConfig::from_toml(
        r#"
[options]
prevent_default = false

[bindings]
"ctrl+s" = "save"
"?" = "help"
"#,
    )
    .unwrap();
    assert!(config.validate().is_empty());

    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let map = config.handler_map(|action| {
        let sink = Rc::clone(&sink);
        let action = action.to_string();
        Rc::new(move |event: &KeyboardEvent| {
            sink.borrow_mut().push((action.clone(), event.key().to_string()));
        })
    });

    let el = Rc::new(Element::new("DIV"));
    let handle: TargetHandle = el.clone();
    let _binder = bind(map, config.binding_options(Some(handle.into())));

    let save = release("s", &[Modifier::Ctrl], "BODY");
    el.dispatch(&save);
    el.dispatch(&release("?", &[Modifier::Shift], "BODY"));

    assert_eq!(actions(&log), vec!["save", "help"]);
    assert!(!save.default_prevented());
}
