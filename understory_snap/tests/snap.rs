// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scenario tests for the `understory_snap` crate.
//!
//! These drive a `Snap` the way a host would: report a container, feed input
//! with timestamps and pump `advance` until the frame loop goes idle.

use kurbo::Point;
use understory_snap::{
    Driver, Freemode, Slide, SlideProps, SlideSize, Snap, SnapError, SnapEvent, SnapProps,
    TransitionOptions, Viewport, WheelInput, WheelThrottle,
};

fn snap(props: SnapProps, sizes: &[f64], container: f64) -> Snap {
    let slides = sizes.iter().map(|&size| Slide::fixed(size)).collect();
    Snap::new(props, Viewport::default(), slides).with_container_size(container, 100.0)
}

fn five(props: SnapProps) -> Snap {
    snap(props, &[100.0; 5], 300.0)
}

fn instant() -> TransitionOptions {
    TransitionOptions::default().duration(0.0)
}

/// Pumps frames until the snap is idle; returns the final timestamp.
fn settle(snap: &mut Snap, mut now: u64) -> u64 {
    while snap.wants_frame() {
        now += 16;
        snap.advance(now);
        assert!(now < 20_000, "snap never settled");
    }
    now
}

fn events(snap: &mut Snap) -> Vec<SnapEvent> {
    snap.drain_events().collect()
}

#[test]
fn to_slide_clamps_into_track_bounds() {
    let mut snap = five(SnapProps::default());
    assert_eq!(snap.geometry().max(), 200.0);
    assert!(snap.to_slide(4, instant()));
    assert_eq!(snap.track().current(), 200.0);
    assert_eq!(snap.active_index(), 4);
}

#[test]
fn looping_to_coord_wraps_onto_first_slide() {
    let mut snap = five(SnapProps {
        looped: true,
        ..SnapProps::default()
    });
    assert_eq!(snap.geometry().max(), 500.0);
    assert!(snap.to_slide(2, instant()));
    assert_eq!(snap.active_index(), 2);

    assert!(snap.to_coord(520.0, instant()));
    let geo = snap.geometry();
    assert_eq!(snap.track().looped_current(&geo), 20.0);
    assert_eq!(snap.active_index(), 0);
}

#[test]
fn centered_small_slide_has_a_single_magnet() {
    let snap = snap(
        SnapProps {
            centered: true,
            ..SnapProps::default()
        },
        &[50.0, 100.0, 50.0],
        200.0,
    );
    let geo = snap.geometry();
    let magnets = snap.slides()[1].magnets(&geo);
    assert_eq!(magnets.as_slice(), &[75.0]);
}

#[test]
fn small_stable_wheel_burst_steps_once() {
    let mut snap = five(SnapProps {
        wheel: true,
        follow_wheel: false,
        ..SnapProps::default()
    });
    snap.drain_events().for_each(drop);

    let mut now = 0;
    for _ in 0..6 {
        assert!(snap.on_wheel(WheelInput::pixels(0.0, 1.0), now));
        now += 16;
    }
    settle(&mut snap, now);

    let events = events(&mut snap);
    let steps = events
        .iter()
        .filter(|e| **e == SnapEvent::TimelineStart)
        .count();
    assert_eq!(steps, 1);
    assert_eq!(events.iter().filter(|e| **e == SnapEvent::WheelStart).count(), 1);
    assert!(events.contains(&SnapEvent::WheelEnd));
    assert_eq!(snap.active_index(), 1);
    assert_eq!(snap.track().current(), 100.0);
}

#[test]
fn wheel_burst_ends_after_silence() {
    let mut snap = five(SnapProps {
        wheel: true,
        ..SnapProps::default()
    });
    assert!(snap.on_wheel(WheelInput::pixels(0.0, 40.0), 0));
    assert_eq!(snap.track().target(), 40.0);
    assert_eq!(snap.driver(), Driver::Wheel);

    snap.advance(100);
    snap.advance(199);
    assert!(!events(&mut snap).contains(&SnapEvent::WheelEnd));
    snap.advance(200);
    assert!(events(&mut snap).contains(&SnapEvent::WheelEnd));

    // 40px past the first magnet in the wheel's direction continues on.
    settle(&mut snap, 200);
    assert_eq!(snap.active_index(), 1);
    assert_eq!(snap.track().current(), 100.0);
}

#[test]
fn short_wheel_burst_sticks_back() {
    let mut snap = five(SnapProps {
        wheel: true,
        ..SnapProps::default()
    });
    snap.on_wheel(WheelInput::pixels(0.0, 20.0), 0);
    settle(&mut snap, 0);
    assert_eq!(snap.active_index(), 0);
    assert_eq!(snap.track().current(), 0.0);
}

#[test]
fn followed_wheel_is_clamped() {
    let mut snap = five(SnapProps {
        wheel: true,
        stick_on_wheel_end: false,
        ..SnapProps::default()
    });
    snap.on_wheel(WheelInput::pixels(0.0, 10_000.0), 0);
    assert_eq!(snap.track().target(), 200.0);
    settle(&mut snap, 0);
    assert_eq!(snap.track().current(), 200.0);
}

#[test]
fn to_slide_on_active_index_only_sticks() {
    let mut snap = five(SnapProps::default());
    assert!(snap.to_coord(30.0, instant()));
    assert_eq!(snap.active_index(), 0);

    assert!(!snap.to_slide(0, TransitionOptions::default()));
    assert!(snap.is_transitioning());
    settle(&mut snap, 0);
    assert_eq!(snap.track().current(), 0.0);
    assert_eq!(snap.active_index(), 0);
}

#[test]
fn sticking_twice_equals_sticking_once() {
    let mut once = five(SnapProps::default());
    let mut twice = five(SnapProps::default());
    once.to_coord(130.0, instant());
    twice.to_coord(130.0, instant());

    assert!(once.stick());
    assert!(twice.stick());
    assert!(twice.stick());
    settle(&mut once, 0);
    settle(&mut twice, 0);
    assert_eq!(once.track().current(), twice.track().current());
    assert_eq!(once.track().current(), 100.0);
}

#[test]
fn navigation_without_slides_fails() {
    let mut snap = Snap::new(SnapProps::default(), Viewport::default(), Vec::new())
        .with_container_size(300.0, 100.0);
    assert!(!snap.to_coord(10.0, instant()));
    assert!(!snap.to_slide(1, instant()));
    assert!(!snap.next(instant()));
    assert!(!snap.prev(instant()));
    assert!(!snap.stick());
    assert_eq!(snap.nearest_magnet(), None);
}

#[test]
fn virtual_slides_need_size_and_mount_with_visibility() {
    let auto = SlideProps {
        size: SlideSize::Auto,
        is_virtual: true,
    };
    assert_eq!(Slide::new(auto).err(), Some(SnapError::VirtualSlideSize));

    let props = SlideProps {
        size: SlideSize::Fixed(100.0),
        is_virtual: true,
    };
    let slides = (0..5)
        .map(|_| Slide::new(props))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let ids: Vec<_> = slides.iter().map(Slide::id).collect();
    let mut snap =
        Snap::new(SnapProps::default(), Viewport::default(), slides).with_container_size(300.0, 100.0);

    let mounted: Vec<_> = events(&mut snap)
        .into_iter()
        .filter_map(|e| match e {
            SnapEvent::SlideMount(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(mounted, ids[..3]);

    snap.to_slide(4, instant());
    let events = events(&mut snap);
    assert!(events.contains(&SnapEvent::SlideUnmount(ids[0])));
    assert!(events.contains(&SnapEvent::SlideUnmount(ids[1])));
    assert!(events.contains(&SnapEvent::SlideMount(ids[3])));
    assert!(events.contains(&SnapEvent::SlideMount(ids[4])));
}

#[test]
fn short_swipe_steps_one_slide() {
    let mut snap = five(SnapProps::default());
    assert!(snap.on_pointer_down(Point::new(200.0, 50.0), 0));
    assert!(snap.on_pointer_move(Point::new(160.0, 50.0), 16));
    assert_eq!(snap.driver(), Driver::Swipe);
    assert!(snap.on_pointer_up(50));
    settle(&mut snap, 50);
    assert_eq!(snap.active_index(), 1);
    assert_eq!(snap.track().current(), 100.0);
}

#[test]
fn slow_swipe_sticks() {
    let mut snap = five(SnapProps::default());
    snap.on_pointer_down(Point::new(200.0, 50.0), 0);
    snap.on_pointer_move(Point::new(160.0, 50.0), 400);
    snap.on_pointer_up(400);
    settle(&mut snap, 400);
    assert_eq!(snap.active_index(), 0);
    assert_eq!(snap.track().current(), 0.0);
}

#[test]
fn sticky_inertia_lands_on_a_magnet() {
    let mut snap = snap(
        SnapProps {
            freemode: Freemode::Sticky,
            ..SnapProps::default()
        },
        &[100.0; 10],
        300.0,
    );
    snap.on_pointer_down(Point::new(200.0, 50.0), 0);
    snap.on_pointer_move(Point::new(180.0, 50.0), 16);
    snap.on_pointer_move(Point::new(150.0, 50.0), 32);
    snap.on_pointer_move(Point::new(110.0, 50.0), 48);
    snap.on_pointer_up(48);
    assert!(snap.has_inertia());

    settle(&mut snap, 48);
    let current = snap.track().current();
    assert!(current > 100.0, "inertia carried the track forward");
    assert!((current / 100.0 - (current / 100.0).round()).abs() < 1e-6);
    assert_eq!(snap.driver(), Driver::None);
}

#[test]
fn swipe_cancels_running_transition_and_wheel() {
    let mut snap = five(SnapProps {
        wheel: true,
        ..SnapProps::default()
    });
    snap.to_slide(3, TransitionOptions::default());
    snap.advance(16);
    assert_eq!(snap.driver(), Driver::Timeline);

    snap.on_wheel(WheelInput::pixels(0.0, 30.0), 20);
    assert!(!snap.is_transitioning());
    assert_eq!(snap.driver(), Driver::Wheel);
    snap.drain_events().for_each(drop);

    snap.on_pointer_down(Point::new(200.0, 50.0), 30);
    snap.on_pointer_move(Point::new(150.0, 50.0), 46);
    assert_eq!(snap.driver(), Driver::Swipe);
    let events = events(&mut snap);
    assert_eq!(events.first(), Some(&SnapEvent::WheelEnd));
    assert!(matches!(events.get(1), Some(SnapEvent::SwipeStart(_))));
}

#[test]
fn toggling_loop_rebounds_the_track() {
    let mut snap = five(SnapProps {
        looped: true,
        ..SnapProps::default()
    });
    snap.to_coord(430.0, instant());
    assert_eq!(snap.active_index(), 4);

    snap.update_props(|p| p.looped = false);
    assert!(!snap.geometry().can_loop());
    assert_eq!(snap.track().target(), 200.0);
    assert_eq!(snap.track().current(), 200.0);
    assert_eq!(snap.active_index(), 4);

    snap.update_props(|p| p.looped = true);
    assert!(snap.geometry().can_loop());
    assert_eq!(snap.track().current(), 400.0);
}

#[test]
fn viewport_units_follow_viewport_changes() {
    let props = SnapProps {
        slide_size: "25vw".parse().unwrap(),
        ..SnapProps::default()
    };
    let mut snap = Snap::from_count(props, Viewport::new(1_000.0, 800.0), 4)
        .with_container_size(600.0, 100.0);
    assert_eq!(snap.slides()[0].size(), 250.0);

    snap.set_viewport(Viewport::new(800.0, 800.0));
    assert_eq!(snap.slides()[0].size(), 200.0);
    assert_eq!(snap.slides()[3].static_coord(), 600.0);
}

#[test]
fn native_scroll_navigates_to_slide_under_offset() {
    let mut snap = five(SnapProps::default());
    assert!(snap.on_native_scroll(120.0));
    settle(&mut snap, 0);
    assert_eq!(snap.active_index(), 1);
}

#[test]
fn throttled_wheel_clicks_each_step_once() {
    let mut snap = snap(
        SnapProps {
            wheel: true,
            follow_wheel: false,
            wheel_throttle: WheelThrottle::Millis(50),
            ..SnapProps::default()
        },
        &[100.0; 10],
        300.0,
    );
    snap.drain_events().for_each(drop);

    let mut now = 0;
    for click in 0..3_u64 {
        while now < click * 100 {
            now += 16;
            snap.advance(now);
        }
        assert!(snap.on_wheel(WheelInput::pixels(0.0, 100.0), now));
    }
    settle(&mut snap, now);

    let steps = events(&mut snap)
        .iter()
        .filter(|e| **e == SnapEvent::TimelineStart)
        .count();
    assert_eq!(steps, 3);
    assert_eq!(snap.active_index(), 3);
    assert_eq!(snap.track().current(), 300.0);
}

/// A 500px slide between two 100px ones in a 300px container scrolls
/// internally across track positions 100..=300.
fn oversized(props: SnapProps) -> Snap {
    let mut snap = snap(props, &[100.0, 500.0, 100.0], 300.0);
    assert!(snap.to_slide(1, instant()));
    assert_eq!(snap.track().current(), 100.0);
    snap
}

#[test]
fn wheel_scrolls_inside_oversized_slide_then_steps_out() {
    let mut snap = oversized(SnapProps {
        wheel: true,
        follow_wheel: false,
        ..SnapProps::default()
    });

    for i in 0..6_u64 {
        snap.on_wheel(WheelInput::pixels(0.0, 50.0), i * 16);
    }
    assert_eq!(snap.track().target(), 300.0);
    assert!(!snap.is_transitioning());
    let now = settle(&mut snap, 80);
    assert_eq!(snap.track().current(), 300.0);
    assert_eq!(snap.active_index(), 1);

    // Resting inside the slide: nothing to stick to.
    assert!(!snap.stick());
    let mut inside = oversized(SnapProps::default());
    inside.to_coord(180.0, instant());
    assert!(!inside.stick());

    // At the trailing edge the next burst leaves the slide.
    let now = now + 600;
    assert!(snap.on_wheel(WheelInput::pixels(0.0, 50.0), now));
    assert!(snap.is_transitioning());
    settle(&mut snap, now);
    assert_eq!(snap.active_index(), 2);
    assert_eq!(snap.track().current(), snap.geometry().max());
}

#[test]
fn swipe_inertia_stays_inside_oversized_slide() {
    let mut snap = oversized(SnapProps::default());
    snap.on_pointer_down(Point::new(200.0, 50.0), 0);
    snap.on_pointer_move(Point::new(180.0, 50.0), 16);
    snap.on_pointer_move(Point::new(150.0, 50.0), 32);
    snap.on_pointer_move(Point::new(120.0, 50.0), 48);
    snap.on_pointer_up(48);
    assert!(snap.has_inertia());

    settle(&mut snap, 48);
    assert!((snap.track().current() - 300.0).abs() < 1e-6);
    assert_eq!(snap.active_index(), 1);
    assert_eq!(snap.driver(), Driver::None);
}
