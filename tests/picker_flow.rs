use std::{cell::RefCell, rc::Rc, time::Duration};

use timewheel::{ClockTime, Selection, TimePicker, WheelSlot};

const FRAME: Duration = Duration::from_millis(16);

fn run_until_idle(picker: &mut TimePicker) {
    for _ in 0..1_000 {
        picker.frame(FRAME);
        if !picker.is_animating() {
            picker.frame(FRAME);
            return;
        }
    }
    panic!("picker never settled");
}

fn recording_picker(start: ClockTime, min: ClockTime) -> (TimePicker, Rc<RefCell<Vec<String>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let picker = TimePicker::new(start, min)
        .with_on_selected_strings(move |hour, minute| sink.borrow_mut().push(format!("{hour}:{minute}")));
    (picker, events)
}

#[test]
fn picking_an_alarm_time_after_the_minimum() {
    let (mut picker, events) = recording_picker(ClockTime::new(7, 0), ClockTime::new(8, 29));
    picker.mount();
    assert_eq!(*events.borrow(), vec!["08:29".to_string()]);

    // Hour forward: the minute floor goes away for good.
    picker.wheel_mut(WheelSlot::Hour).step(2);
    run_until_idle(&mut picker);
    assert_eq!(picker.hour(), 10);
    assert_eq!(picker.minute_min(), 0);

    picker.wheel_mut(WheelSlot::Minute).step(-30);
    run_until_idle(&mut picker);
    assert_eq!(picker.selection().formatted, "10:59");
    assert_eq!(events.borrow().last().map(String::as_str), Some("10:59"));
}

#[test]
fn hours_before_the_minimum_bounce_back() {
    let (mut picker, events) = recording_picker(ClockTime::new(10, 5), ClockTime::new(8, 29));
    picker.mount();

    picker.wheel_mut(WheelSlot::Hour).step(-3);
    run_until_idle(&mut picker);

    assert_eq!(picker.hour(), 10);
    assert_eq!(
        picker.wheel(WheelSlot::Hour).centered_item().map(|item| item.value),
        Some(10)
    );
    let hours: Vec<u32> = events
        .borrow()
        .iter()
        .map(|event| event[..2].parse().unwrap())
        .collect();
    assert!(hours.iter().all(|hour| *hour >= 8), "events: {hours:?}");
}

#[test]
fn fling_wraps_around_the_minute_wheel() {
    let selections = Rc::new(RefCell::new(Vec::<(u32, u32)>::new()));
    let sink = Rc::clone(&selections);
    let mut picker = TimePicker::new(ClockTime::new(12, 30), ClockTime::MIDNIGHT)
        .with_on_selected(move |hour, minute| sink.borrow_mut().push((hour, minute)));
    picker.mount();

    let wheel = picker.wheel_mut(WheelSlot::Minute);
    let row = wheel.geometry().row_height;
    wheel.begin_drag();
    wheel.drag_by(row * 70.0);
    wheel.release(0.0);
    run_until_idle(&mut picker);

    // 30 + 70 rows lands on 40 after one and a half turns.
    assert_eq!(picker.minute(), 40);
    assert_eq!(picker.hour(), 12);
    assert_eq!(selections.borrow().last(), Some(&(12, 40)));
}

#[test]
fn recenter_and_restart_use_deferred_scrolls() {
    let mut picker = TimePicker::new(ClockTime::new(6, 15), ClockTime::MIDNIGHT);
    picker.mount();

    picker.wheel_mut(WheelSlot::Hour).step(5);
    run_until_idle(&mut picker);
    assert_eq!(picker.hour(), 11);

    picker.recenter();
    assert!(picker.is_animating(), "recenter waits for the next frame");
    run_until_idle(&mut picker);
    assert_eq!(picker.selection(), Selection::new(6, 15));

    picker.set_start_time(ClockTime::new(21, 40));
    run_until_idle(&mut picker);
    assert_eq!(picker.selection().time(), ClockTime::new(21, 40));
}
