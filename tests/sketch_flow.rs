use sketch_solver::settings::Settings;
use sketch_solver::sketch::messages::{parse_reply, DisplayState, TaggedOutcome};
use sketch_solver::sketch::model::Point;
use sketch_solver::sketch::SketchController;
use std::time::{Duration, Instant};

fn controller() -> SketchController {
    SketchController::new(&Settings::default(), (64, 64))
}

fn draw_stroke(controller: &mut SketchController, points: &[(f32, f32)], now: Instant) {
    controller.pointer_down(Point::new(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        controller.pointer_move(Point::new(x, y));
    }
    controller.pointer_up(now);
}

#[test]
fn undo_then_redraw_leaves_only_the_new_stroke() {
    let mut controller = controller();
    let now = Instant::now();

    draw_stroke(&mut controller, &[(10.0, 10.0), (30.0, 30.0), (50.0, 50.0)], now);
    assert_eq!(controller.history().len(), 1);

    controller.undo(now);
    assert!(controller.history().is_empty());
    let blank = controller.surface().clone();
    assert!(blank.pixels.chunks_exact(4).all(|px| px[3] == 0));

    draw_stroke(&mut controller, &[(0.0, 0.0), (5.0, 5.0)], now);
    assert_eq!(controller.history().len(), 1);
    assert_eq!(
        controller.history().strokes()[0].points(),
        &[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]
    );
}

#[test]
fn quiescence_is_measured_from_the_last_pointer_up() {
    let settings = Settings::default();
    let mut controller = SketchController::new(&settings, (32, 32));
    let t0 = Instant::now();

    draw_stroke(&mut controller, &[(2.0, 2.0), (6.0, 6.0)], t0);

    // a new gesture before the interval elapses disarms the trigger
    controller.tick(t0 + Duration::from_millis(1000));
    controller.pointer_down(Point::new(8.0, 8.0));
    assert!(!controller.trigger_armed());

    let t1 = t0 + Duration::from_millis(1500);
    controller.pointer_up(t1);

    // 1600 ms after the first stroke would have fired without the new gesture
    controller.tick(t0 + Duration::from_millis(1700));
    assert_eq!(controller.latest_request_seq(), 0);

    controller.tick(t1 + Duration::from_millis(1600));
    assert_eq!(controller.latest_request_seq(), 1);
}

#[test]
fn simulated_reply_renders_the_expected_display_line() {
    let mut controller = controller();
    controller.request_prediction();

    let outcome = parse_reply(r#"{"status":200,"equation":"2+2","solution":"4"}"#);
    controller.apply_outcome(TaggedOutcome { seq: 1, outcome });

    assert_eq!(
        controller.display().map(DisplayState::text),
        Some("2+2 = 4".to_string())
    );
}

#[test]
fn late_reply_from_an_overtaken_request_never_wins() {
    let mut controller = controller();
    controller.request_prediction();
    controller.request_prediction();
    assert_eq!(controller.latest_request_seq(), 2);

    let stale = parse_reply(r#"{"status":200,"equation":"1+1","solution":"2"}"#);
    assert!(!controller.apply_outcome(TaggedOutcome { seq: 1, outcome: stale }));

    let current = parse_reply(r#"{"status":200,"equation":"7*3","solution":"21"}"#);
    assert!(controller.apply_outcome(TaggedOutcome { seq: 2, outcome: current }));
    assert_eq!(
        controller.display().map(DisplayState::text),
        Some("7*3 = 21".to_string())
    );
}

#[test]
fn clear_blanks_the_surface_regardless_of_history_size() {
    let mut controller = controller();
    let now = Instant::now();

    for i in 0..5 {
        let offset = i as f32 * 4.0;
        draw_stroke(&mut controller, &[(offset, offset), (offset + 8.0, offset + 3.0)], now);
    }
    assert_eq!(controller.history().len(), 5);

    controller.clear();
    assert!(controller.history().is_empty());
    assert!(controller
        .surface()
        .pixels
        .chunks_exact(4)
        .all(|px| px[3] == 0));
}
