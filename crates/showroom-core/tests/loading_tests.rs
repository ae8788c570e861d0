use showroom_core::*;

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{a} != {b}");
}

#[test]
fn progress_counts_distinct_items() {
    let mut m = LoadingManager::new();
    m.item_start("a.png");
    m.item_start("b.png");
    m.item_start("a.png");
    assert_eq!(m.total(), 2);

    let ev = m.item_end("a.png");
    assert_eq!(
        ev.as_slice(),
        &[LoadEvent::Progress {
            url: "a.png".into(),
            loaded: 1,
            total: 2
        }]
    );
    assert_close(ev[0].ratio().unwrap(), 0.5);
    // Ending twice or ending an unknown item reports nothing
    assert!(m.item_end("a.png").is_empty());
    assert!(m.item_end("zzz.png").is_empty());
    assert!(!m.is_complete());
}

#[test]
fn completion_fires_once_after_last_item() {
    let mut m = LoadingManager::new();
    m.item_start("a");
    m.item_start("b");
    assert!(!m.item_end("a").contains(&LoadEvent::Complete));
    let ev = m.item_end("b");
    assert_eq!(ev.len(), 2);
    assert_eq!(ev[1], LoadEvent::Complete);
    assert!(m.is_complete());
    assert!(m.item_end("b").is_empty());
}

#[test]
fn failed_items_still_complete_loading() {
    let mut m = LoadingManager::new();
    m.item_start("ok");
    m.item_start("broken");
    m.item_end("ok");
    let ev = m.item_error("broken");
    assert!(ev.contains(&LoadEvent::Complete));
    assert_eq!(m.failed(), 1);
    assert_eq!(m.loaded(), 2);
}

#[test]
fn progress_ratio_is_clamped_and_safe_for_empty() {
    assert_eq!(progress_ratio(0, 0), 0.0);
    assert_close(progress_ratio(3, 4), 0.75);
    assert_eq!(progress_ratio(5, 4), 1.0);
}

#[test]
fn sequencer_waits_for_completion() {
    let mut s = LoadingSequencer::default();
    assert!(s.advance(100.0).is_empty());
    assert_eq!(s.state(), SequencerState::Loading { completed_at: None });
    assert_eq!(s.overlay_alpha(100.0), 1.0);
    assert!(s.overlay_tween().is_none());
}

#[test]
fn sequencer_fades_then_opens_gate_on_schedule() {
    let mut s = LoadingSequencer::default();
    s.on_progress("x", 1, 2);
    assert_close(s.progress_ratio(), 0.5);
    s.on_complete(10.0);
    assert_close(s.progress_ratio(), 1.0);

    assert!(s.advance(10.49).is_empty());
    assert_eq!(s.advance(10.5).as_slice(), &[SequencerEvent::FadeStarted]);
    assert_eq!(s.state(), SequencerState::Fading { completed_at: 10.0 });
    assert!(!s.is_ready());
    assert!(s.advance(11.99).is_empty());
    assert_eq!(s.advance(12.0).as_slice(), &[SequencerEvent::SceneReady]);
    assert!(s.is_ready());
    // Terminal
    assert!(s.advance(1000.0).is_empty());
}

#[test]
fn late_frame_reports_both_transitions_in_order() {
    let mut s = LoadingSequencer::default();
    s.on_complete(0.0);
    assert_eq!(
        s.advance(5.0).as_slice(),
        &[SequencerEvent::FadeStarted, SequencerEvent::SceneReady]
    );
}

#[test]
fn repeated_completion_keeps_first_timestamp() {
    let mut s = LoadingSequencer::default();
    s.on_load_event(&LoadEvent::Complete, 1.0);
    s.on_load_event(&LoadEvent::Complete, 50.0);
    assert_eq!(s.state(), SequencerState::Loading { completed_at: Some(1.0) });
}

#[test]
fn overlay_alpha_follows_eased_fade() {
    let mut s = LoadingSequencer::default();
    s.on_complete(0.0);
    s.advance(0.5);
    // The fade itself starts one second after it is scheduled
    assert_close(s.overlay_alpha(1.0), 1.0);
    assert_close(s.overlay_alpha(1.5), 1.0);
    // Halfway through a power1.out fade: 1 - 0.75
    assert_close(s.overlay_alpha(3.0), 0.25);
    assert_close(s.overlay_alpha(4.5), 0.0);
    assert_close(s.overlay_alpha(100.0), 0.0);
}

#[test]
fn overlay_alpha_is_non_increasing_over_time() {
    let mut s = LoadingSequencer::default();
    s.on_complete(2.0);
    s.advance(10.0);
    let mut prev = f32::INFINITY;
    for i in 0..200 {
        let a = s.overlay_alpha(2.0 + i as f64 * 0.05);
        assert!(a <= prev + 1e-6);
        assert!((0.0..=1.0).contains(&a));
        prev = a;
    }
}

#[test]
fn custom_timing_is_respected() {
    let timing = SequencerTiming {
        pre_delay: 0.0,
        fade_delay: 0.0,
        fade_duration: 1.0,
        ready_delay: 0.25,
    };
    let mut s = LoadingSequencer::new(timing);
    s.on_complete(3.0);
    assert_eq!(s.advance(3.0).as_slice(), &[SequencerEvent::FadeStarted]);
    assert_eq!(s.advance(3.25).as_slice(), &[SequencerEvent::SceneReady]);
    assert_eq!(s.timing(), timing);
}

#[test]
fn mixed_successes_and_failures_complete_exactly_once() {
    let mut m = LoadingManager::new();
    let items = ["env/px.jpg", "env/nx.jpg", "floor.jpg", "car.gltf", "car.bin"];
    for url in items {
        m.item_start(url);
    }
    let mut events = Vec::new();
    events.extend(m.item_end("floor.jpg"));
    events.extend(m.item_error("env/nx.jpg"));
    events.extend(m.item_end("car.gltf"));
    events.extend(m.item_error("car.bin"));
    assert!(!m.is_complete());
    events.extend(m.item_end("env/px.jpg"));
    // Settling an already failed item again changes nothing
    events.extend(m.item_error("car.bin"));

    let completions = events.iter().filter(|e| **e == LoadEvent::Complete).count();
    assert_eq!(completions, 1);
    assert_eq!(events.last(), Some(&LoadEvent::Complete));
    assert_eq!((m.loaded(), m.total(), m.failed()), (5, 5, 2));
}
