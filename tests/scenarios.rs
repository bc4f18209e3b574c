use fuzzy_timeline::compute::temporal::{aggregate, objects_at, ticks_for};
use fuzzy_timeline::{
    BinView, Config, DataObject, Dataset, ProportionView, SpanWidth, TimeExtent, TimelineController,
    TimelineError, TimelineListener, TimelineState, Timestamp,
};
use std::cell::RefCell;
use std::rc::Rc;

fn date(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_ymd(y, m, d).unwrap()
}

fn one_day() -> SpanWidth {
    SpanWidth::from_days(1.0)
}

#[test]
fn test_single_exact_object() {
    let datasets = vec![Dataset::from_objects(
        "letters",
        vec![DataObject::exact("letter", date(2020, 1, 10))],
    )];

    let extent = aggregate(&datasets).unwrap();
    assert_eq!(extent.min(), date(2020, 1, 10));
    assert_eq!(extent.max(), date(2020, 1, 10));

    let ticks = ticks_for(&datasets[0].objects[0], extent.min(), one_day())
        .unwrap()
        .unwrap();
    assert_eq!(ticks.first_tick, 0);
    assert_eq!(ticks.last_tick, 0);
    assert_eq!(ticks.first_tick_percentage, 1.0);
    assert_eq!(ticks.last_tick_percentage, 1.0);
}

#[test]
fn test_fuzzy_and_exact_extent() {
    let datasets = vec![Dataset::from_objects(
        "events",
        vec![
            DataObject::fuzzy("january", date(2020, 1, 1), date(2020, 1, 31)),
            DataObject::exact("mid february", date(2020, 2, 15)),
        ],
    )];

    assert_eq!(
        aggregate(&datasets).unwrap(),
        TimeExtent::new(date(2020, 1, 1), date(2020, 2, 15))
    );
}

#[test]
fn test_span_aligned_to_bins() {
    let object = DataObject::fuzzy("three days", date(2020, 1, 1), date(2020, 1, 3));
    let ticks = ticks_for(&object, date(2020, 1, 1), one_day())
        .unwrap()
        .unwrap();

    assert_eq!(ticks.first_tick, 0);
    assert_eq!(ticks.last_tick, 2);
    assert_eq!(ticks.first_tick_percentage, 1.0);
    assert_eq!(ticks.last_tick_percentage, 1.0);
}

#[test]
fn test_query_before_extent_returns_empty_groups() {
    let datasets = vec![
        Dataset::from_objects("a", vec![DataObject::exact("x", date(2020, 1, 10))]),
        Dataset::from_objects(
            "b",
            vec![
                DataObject::fuzzy("y", date(2020, 1, 5), date(2020, 3, 1)),
                DataObject::untimed("z"),
            ],
        ),
        Dataset::new("c"),
    ];

    let overall_min = aggregate(&datasets).unwrap().min();
    let found = objects_at(&datasets, overall_min.saturating_add_millis(-1));

    assert_eq!(found.len(), datasets.len());
    assert!(found.iter().all(|objects| objects.is_empty()));
}

#[test]
fn test_empty_load_then_span_change_is_rejected() {
    let mut timeline = TimelineController::new(Config::default()).unwrap();
    timeline.load(Vec::new()).unwrap();
    assert_eq!(timeline.state(), TimelineState::Uninitialized);

    let result = timeline.span_changed(one_day(), &[], &[]);
    assert!(matches!(
        result,
        Err(TimelineError::InvalidState {
            operation: "span_changed",
            state: TimelineState::Uninitialized,
        })
    ));
}

#[derive(Default)]
struct Frames {
    density: Vec<BinView>,
    range: Vec<(Vec<String>, BinView)>,
    proportions: Vec<ProportionView>,
}

#[derive(Clone, Default)]
struct FrameRecorder(Rc<RefCell<Frames>>);

impl TimelineListener for FrameRecorder {
    fn density_changed(&mut self, view: &BinView) {
        self.0.borrow_mut().density.push(view.clone());
    }

    fn range_changed(&mut self, shown: &[Dataset], view: &BinView) {
        let labels = shown.iter().map(|d| d.label.clone()).collect();
        self.0.borrow_mut().range.push((labels, view.clone()));
    }

    fn proportions_changed(&mut self, view: &ProportionView) {
        self.0.borrow_mut().proportions.push(view.clone());
    }
}

#[test]
fn test_full_interaction_flow() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut timeline =
        TimelineController::new(Config::default().with_initial_bucket_count(10)).unwrap();
    let frames = FrameRecorder::default();
    timeline.add_listener(frames.clone());

    timeline
        .load(vec![
            Dataset::from_objects(
                "letters",
                vec![
                    DataObject::exact("first", date(2020, 1, 1)),
                    DataObject::fuzzy("undated", date(2020, 1, 3), date(2020, 1, 6)),
                ],
            ),
            Dataset::from_objects("diaries", vec![DataObject::exact("entry", date(2020, 1, 11))]),
        ])
        .unwrap();

    {
        let frames = frames.0.borrow();
        assert_eq!(frames.density.len(), 1);
        let density = &frames.density[0];
        assert_eq!(density.span_width, one_day());
        assert_eq!(density.bin_count(), 11);
        // 1.0 on day 0; the span covers days 2..=5 with full weight at both ends
        assert_eq!(&density.bins[0][..6], &[1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(density.bins[1][10], 1.0);
        assert_eq!(frames.range.len(), 1);
    }

    let window = TimeExtent::new(date(2020, 1, 2), date(2020, 1, 8));
    let (shown, hidden) = timeline.partition(window).unwrap();
    timeline
        .span_changed(SpanWidth::from_days(2.0), &shown, &hidden)
        .unwrap();
    assert_eq!(timeline.state(), TimelineState::Interacting);

    let frames = frames.0.borrow();
    let (labels, range) = frames.range.last().unwrap();
    assert_eq!(labels, &vec!["letters".to_string(), "diaries".to_string()]);
    assert_eq!(range.span_width, SpanWidth::from_days(2.0));
    assert_eq!(range.bin_count(), 6);
    // Only the fuzzy span is shown: days 2..5 cover bin 1 and half of bin 2
    assert_eq!(range.bins[0], vec![0.0, 1.0, 0.5, 0.0, 0.0, 0.0]);
    assert!(range.bins[1].iter().all(|w| *w == 0.0));

    // Density keeps the load-time width but only counts shown objects
    let density = frames.density.last().unwrap();
    assert_eq!(density.span_width, one_day());
    assert_eq!(density.bins[0][0], 0.0);

    let proportions = frames.proportions.last().unwrap();
    assert_eq!(proportions.datasets[0].shown, 1);
    assert_eq!(proportions.datasets[0].hidden, 1);
    assert_eq!(proportions.datasets[1].shown, 0);
    assert_eq!(proportions.datasets[1].hidden, 1);
}
