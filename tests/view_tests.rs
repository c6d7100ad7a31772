use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use gpui::{MouseButton, Point, TestAppContext, VisualTestContext, px};
use gpui_linechart::{GpuiLineChartView, LineChart, SampleReadout, TrackingPhase};

const SAMPLES: [f64; 9] = [8.0, 23.0, 54.0, 32.0, 12.0, 37.0, 7.0, 23.0, 43.0];

#[gpui::test]
fn view_starts_idle(cx: &mut TestAppContext) {
    let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
    let window = cx.add_window(|_window, _cx| GpuiLineChartView::new(chart));

    window
        .update(cx, |view, _window, _cx| {
            assert_eq!(view.chart().series().len(), 9);
            let snapshot = view.readout().snapshot();
            assert_eq!(snapshot.phase, TrackingPhase::Idle);
            assert_eq!(snapshot.current_index, 0);
            assert_eq!(snapshot.opacity, 0.0);
        })
        .unwrap();
}

#[gpui::test]
fn drag_publishes_to_shared_readout(cx: &mut TestAppContext) {
    let moves = Arc::new(AtomicUsize::new(0));
    let ends = Arc::new(AtomicUsize::new(0));
    let chart = {
        let moves = Arc::clone(&moves);
        let ends = Arc::clone(&ends);
        LineChart::builder(SAMPLES)
            .on_value_change(move |_| {
                moves.fetch_add(1, Ordering::SeqCst);
            })
            .on_gesture_end(move || {
                ends.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .expect("valid chart")
    };

    let readout = SampleReadout::new();
    let window = {
        let readout = readout.clone();
        cx.add_window(move |_window, _cx| GpuiLineChartView::new(chart).with_readout(readout))
    };
    cx.run_until_parked();

    let mut visual_cx = VisualTestContext::from_window(window.into(), cx);
    let start = Point::new(px(100.0), px(100.0));
    visual_cx.simulate_mouse_down(start, MouseButton::Left, Default::default());

    assert!(readout.is_tracking());
    assert_eq!(readout.opacity(), 1.0);
    assert_eq!(moves.load(Ordering::SeqCst), 1);

    visual_cx.simulate_mouse_move(
        start + Point::new(px(20.0), px(0.0)),
        Some(MouseButton::Left),
        Default::default(),
    );
    assert_eq!(moves.load(Ordering::SeqCst), 2);

    let index = readout.current_index();
    assert!(index < SAMPLES.len());
    assert_eq!(readout.current_value(), SAMPLES[index]);

    visual_cx.simulate_mouse_up(
        start + Point::new(px(20.0), px(0.0)),
        MouseButton::Left,
        Default::default(),
    );
    assert!(!readout.is_tracking());
    assert_eq!(readout.opacity(), 0.0);
    assert_eq!(readout.current_index(), index);
    assert_eq!(ends.load(Ordering::SeqCst), 1);
}

#[gpui::test]
fn callbacks_can_read_back_through_the_view(cx: &mut TestAppContext) {
    let view_slot: Arc<OnceLock<GpuiLineChartView>> = Arc::new(OnceLock::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chart = {
        let view_slot = Arc::clone(&view_slot);
        let seen = Arc::clone(&seen);
        LineChart::builder(SAMPLES)
            .on_value_change(move |index| {
                let readout = view_slot.get().map(|view| view.readout().current_index());
                seen.lock().expect("lock").push((index, readout));
            })
            .build()
            .expect("valid chart")
    };

    let view = GpuiLineChartView::new(chart);
    let readout = view.readout();
    assert!(view_slot.set(view.clone()).is_ok());
    let window = cx.add_window(move |_window, _cx| view);
    cx.run_until_parked();

    let mut visual_cx = VisualTestContext::from_window(window.into(), cx);
    let start = Point::new(px(100.0), px(100.0));
    visual_cx.simulate_mouse_down(start, MouseButton::Left, Default::default());
    visual_cx.simulate_mouse_up(start, MouseButton::Left, Default::default());

    let index = readout.current_index();
    assert_eq!(*seen.lock().expect("lock"), vec![(index, Some(index))]);
    assert!(!readout.is_tracking());
}
