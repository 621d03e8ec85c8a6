use std::cell::Cell;
use std::rc::Rc;

use scrollfx::prelude::*;

fn host() -> MemoryHost {
    MemoryHost::new(Viewport::new(1280.0, 1000.0))
}

/// A section whose crossing of the viewport spans scroll 1000..=2000.
fn ranged(element: ElementId) -> TriggerSpec {
    TriggerSpec::new(element, "top bottom".parse().unwrap()).end("top top".parse::<Anchor>().unwrap())
}

#[test]
fn test_progress_never_decreases_while_scrolling_forward() {
    let mut host = host();
    let section = host.add_element(Rect::new(0.0, 2000.0, 1280.0, 600.0));
    let animator = Animator::new();

    let samples = Rc::new(std::cell::RefCell::new(Vec::new()));
    let recorded = samples.clone();
    let _trigger = animator.register_trigger(ranged(section).on_update(move |event| {
        recorded.borrow_mut().push(event.progress);
    }));

    for step in 0..=30 {
        host.set_scroll(900.0 + step as f32 * 40.0);
        animator.tick(&mut host, step as f64 * 16.0);
    }

    let samples = samples.borrow();
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(samples.last().copied(), Some(1.0));
}

#[test]
fn test_scrubbed_values_depend_only_on_progress() {
    let build = |host: &mut MemoryHost| {
        let section = host.add_element(Rect::new(0.0, 2000.0, 1280.0, 600.0));
        let line = host.add_child(section, "timeline-line", Rect::new(0.0, 2000.0, 4.0, 600.0));
        (section, line)
    };

    let mut wandering = host();
    let (section, line) = build(&mut wandering);
    let animator = Animator::new();
    let _line = animator
        .register_scroll(ranged(section), |trigger| {
            vec![TweenSpec::new(line)
                .from_to(Property::ScaleY, 0.0, 1.0)
                .from_to(Property::Y, 0.0, -144.0)
                .easing(TimingFunction::PowerOut(2.0))
                .scrub(trigger)]
        })
        .unwrap();
    wandering.set_scroll(1600.0);
    animator.tick(&mut wandering, 0.0);
    wandering.set_scroll(1200.0);
    animator.tick(&mut wandering, 16.0);

    let mut direct = host();
    let (section, line) = build(&mut direct);
    let fresh = Animator::new();
    let _line = fresh
        .register_scroll(ranged(section), |trigger| {
            vec![TweenSpec::new(line)
                .from_to(Property::ScaleY, 0.0, 1.0)
                .from_to(Property::Y, 0.0, -144.0)
                .easing(TimingFunction::PowerOut(2.0))
                .scrub(trigger)]
        })
        .unwrap();
    direct.set_scroll(1200.0);
    fresh.tick(&mut direct, 0.0);

    assert_eq!(wandering.style(line), direct.style(line));
    assert!(wandering.style(line).get(Property::ScaleY).unwrap() > 0.0);
}

#[test]
fn test_dispose_before_first_tick_leaves_no_trace() {
    let mut host = host();
    let el = host.add_element(Rect::new(0.0, 1200.0, 400.0, 300.0));
    let animator = Animator::new();

    let calls = Rc::new(Cell::new(0));
    let counted = calls.clone();
    let mut reveal = animator
        .register_scroll(
            TriggerSpec::new(el, "top 85%".parse().unwrap()).on_enter(move |_| {
                counted.set(counted.get() + 1)
            }),
            |trigger| {
                vec![TweenSpec::new(el)
                    .from(Property::Opacity, 0.0)
                    .duration(600.0)
                    .toggled_by(trigger, ToggleActions::PLAY)]
            },
        )
        .unwrap();
    reveal.dispose();
    reveal.dispose();

    host.set_scroll(1000.0);
    animator.tick(&mut host, 0.0);
    animator.tick(&mut host, 16.0);

    assert_eq!(calls.get(), 0);
    assert_eq!(animator.trigger_count(), 0);
    assert_eq!(animator.tween_count(), 0);
    assert_eq!(host.write_count(el), 0);
}

#[test]
fn test_once_reveal_stays_after_scrolling_back() {
    let mut host = host();
    let el = host.add_element(Rect::new(0.0, 1500.0, 400.0, 300.0));
    let animator = Animator::new();
    let _reveal = animator
        .register_fade_in(el, RevealOptions::default().once(true))
        .unwrap();

    host.set_scroll(1000.0);
    animator.tick(&mut host, 0.0);
    animator.tick(&mut host, 1200.0);
    assert_eq!(host.style(el).get(Property::Opacity), Some(1.0));

    host.set_scroll(0.0);
    animator.tick(&mut host, 1216.0);
    animator.tick(&mut host, 3000.0);
    assert_eq!(host.style(el).get(Property::Opacity), Some(1.0));
}

#[test]
fn test_reveal_reverses_when_scrolled_back_above() {
    let mut host = host();
    let el = host.add_element(Rect::new(0.0, 1500.0, 400.0, 300.0));
    let animator = Animator::new();
    let _reveal = animator.register_fade_in(el, RevealOptions::default()).unwrap();

    host.set_scroll(1000.0);
    animator.tick(&mut host, 0.0);
    animator.tick(&mut host, 1200.0);
    assert_eq!(host.style(el).get(Property::Y), Some(0.0));

    host.set_scroll(0.0);
    animator.tick(&mut host, 1216.0);
    animator.tick(&mut host, 3000.0);
    assert_eq!(host.style(el).get(Property::Opacity), Some(0.0));
    assert_eq!(host.style(el).get(Property::Y), Some(50.0));
}

#[test]
fn test_text_reveal_reverses_unless_once() {
    let mut host = host();
    let block = host.add_element(Rect::new(0.0, 1500.0, 600.0, 120.0));
    let kept = host.add_element(Rect::new(0.0, 1500.0, 600.0, 120.0));
    let animator = Animator::new();
    let _reveal = animator
        .register_text_reveal(block, &[], TextRevealOptions::default())
        .unwrap();
    let _kept = animator
        .register_text_reveal(kept, &[], TextRevealOptions::default().once(true))
        .unwrap();

    host.set_scroll(1000.0);
    animator.tick(&mut host, 0.0);
    animator.tick(&mut host, 1200.0);
    assert_eq!(host.style(block).get(Property::Opacity), Some(1.0));
    assert_eq!(host.style(kept).get(Property::Opacity), Some(1.0));

    host.set_scroll(0.0);
    animator.tick(&mut host, 1216.0);
    animator.tick(&mut host, 3000.0);
    assert_eq!(host.style(block).get(Property::Opacity), Some(0.0));
    assert_eq!(host.style(block).get(Property::Y), Some(50.0));
    assert_eq!(host.style(kept).get(Property::Opacity), Some(1.0));
}

#[test]
fn test_counter_counts_up_with_affixes() {
    let mut host = host();
    let el = host.add_element(Rect::new(0.0, 1500.0, 200.0, 80.0));
    let animator = Animator::new();
    let mut counter = animator
        .register_counter(el, 250.0, CounterOptions::default().prefix("+").suffix("%"))
        .unwrap();

    animator.tick(&mut host, 0.0);
    assert_eq!(host.text(el), Some("+0%"));

    host.set_scroll(1000.0);
    animator.tick(&mut host, 16.0);
    animator.tick(&mut host, 2100.0);
    assert_eq!(host.text(el), Some("+250%"));
    assert!(host.style(el).is_empty());

    counter.dispose();
    animator.tick(&mut host, 2116.0);
    assert_eq!(host.text(el), Some("+0%"));
}

#[test]
fn test_horizontal_scroll_tracks_vertical_distance() {
    let mut host = MemoryHost::new(Viewport::new(1200.0, 800.0));
    let container = host.add_element(Rect::new(0.0, 2000.0, 1200.0, 800.0));
    let track = host.add_child(container, "track", Rect::new(0.0, 2000.0, 3600.0, 800.0));
    let animator = Animator::new();
    let horizontal = animator
        .register_horizontal_scroll(&host, container, track)
        .unwrap();
    let pin = horizontal.pin().unwrap();
    assert_eq!(animator.pin_distance(pin), Some(2400.0));

    host.set_scroll(3000.0);
    animator.tick(&mut host, 0.0);
    assert_eq!(host.style(track).get(Property::X), Some(-1000.0));

    // past the end the track stays at its far edge
    host.set_scroll(9000.0);
    animator.tick(&mut host, 16.0);
    assert_eq!(host.style(track).get(Property::X), Some(-2400.0));
    assert!(!animator.is_holding(pin));
}

#[test]
fn test_detached_trigger_is_reported_not_fatal() {
    let mut host = host();
    let gone = host.add_element(Rect::new(0.0, 1500.0, 400.0, 300.0));
    let kept = host.add_element(Rect::new(0.0, 1500.0, 400.0, 300.0));
    let animator = Animator::with_config(AnimatorConfig::default().detach_threshold(3));
    let gone_reveal = animator.register_fade_in(gone, RevealOptions::default()).unwrap();
    let _kept = animator.register_fade_in(kept, RevealOptions::default()).unwrap();

    host.detach(gone);
    host.set_scroll(1000.0);
    for frame in 0..4 {
        animator.tick(&mut host, frame as f64 * 16.0);
    }

    assert_eq!(animator.detached_triggers(), vec![gone_reveal.trigger().unwrap()]);
    assert!(host.style(kept).get(Property::Opacity).unwrap() > 0.0);
}

#[test]
fn test_timeline_plays_overlapping_entries() {
    let mut host = host();
    let line = host.add_element(Rect::new(0.0, 0.0, 800.0, 2.0));
    let title = host.add_element(Rect::new(0.0, 100.0, 800.0, 200.0));
    let animator = Animator::new();

    let intro = Timeline::new()
        .then(
            TweenSpec::new(line)
                .from(Property::ScaleX, 0.0)
                .duration(1500.0)
                .easing(TimingFunction::Linear),
            Position::AfterPrevious,
        )
        .then(
            TweenSpec::new(title)
                .from(Property::Y, 200.0)
                .duration(1200.0)
                .easing(TimingFunction::Linear),
            "-=1000".parse().unwrap(),
        );
    let _intro = animator.register_timeline(intro).unwrap();

    animator.tick(&mut host, 0.0);
    animator.tick(&mut host, 500.0);
    // the title starts at 500ms, when the line is a third of the way in
    assert_eq!(host.style(title).get(Property::Y), Some(200.0));
    animator.tick(&mut host, 1100.0);
    assert_eq!(host.style(title).get(Property::Y), Some(100.0));
}
