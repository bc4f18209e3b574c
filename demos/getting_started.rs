use fuzzy_timeline::prelude::*;
use std::sync::Arc;

/// Prints every view the controller pushes out.
struct ConsoleListener;

impl TimelineListener for ConsoleListener {
    fn density_changed(&mut self, view: &BinView) {
        println!(
            "   [density] {} bins of {}, peak weight {:.2}",
            view.bin_count(),
            view.span_width,
            view.max_weight()
        );
    }

    fn range_changed(&mut self, shown: &[Dataset], view: &BinView) {
        let objects: usize = shown.iter().map(Dataset::len).sum();
        println!(
            "   [range] {} objects over {} bins of {}",
            objects,
            view.bin_count(),
            view.span_width
        );
    }

    fn proportions_changed(&mut self, view: &ProportionView) {
        for entry in &view.datasets {
            println!(
                "   [proportions] {}: {} shown / {} hidden ({:.0}%)",
                entry.label,
                entry.shown,
                entry.hidden,
                entry.shown_share() * 100.0
            );
        }
    }

    fn highlight_changed(&mut self, objects: &[Vec<Arc<DataObject>>]) {
        let labels: Vec<&str> = objects.iter().flatten().map(|o| o.label.as_str()).collect();
        println!("   [highlight] {:?}", labels);
    }

    fn selection_changed(&mut self, selection: &Selection) {
        println!("   [selection] {} objects", selection.len());
    }

    fn cleared(&mut self) {
        println!("   [cleared]");
    }
}

fn date(year: i32, month: u32, day: u32) -> Timestamp {
    Timestamp::from_ymd(year, month, day).expect("valid calendar date")
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Fuzzy Timeline - Getting Started ===\n");

    let mut timeline = TimelineBuilder::new()
        .initial_bucket_count(24)
        .listener(ConsoleListener)
        .build()?;
    println!("✓ Created timeline controller ({})\n", timeline.state());

    // === 1. LOADING DATA ===
    println!("1. Loading Data");
    println!("---------------");

    let mut letters = Dataset::new("letters");
    letters.push(DataObject::exact("Letter to the council", date(1848, 3, 2)));
    letters.push(DataObject::exact("Reply from the council", date(1848, 4, 17)));
    letters.push(DataObject::fuzzy("Undated draft", date(1848, 1, 1), date(1848, 6, 30)));
    letters.push(DataObject::untimed("Envelope fragment"));

    let mut photos = Dataset::new("photographs");
    photos.push(DataObject::fuzzy("Harbour view", date(1847, 1, 1), date(1849, 12, 31)));
    photos.push(DataObject::exact("Market day", date(1849, 5, 12)));

    timeline.load(vec![letters, photos])?;
    if let Some(extent) = timeline.extent() {
        println!("   Overall extent: {}", extent);
    }
    println!("   State: {}\n", timeline.state());

    // === 2. CHANGING THE VISIBLE SPAN ===
    println!("2. Changing the Visible Span");
    println!("----------------------------");

    let window = TimeExtent::new(date(1848, 1, 1), date(1848, 12, 31));
    let (shown, hidden) = timeline.partition(window)?;
    timeline.span_changed(SpanWidth::from_days(30.0), &shown, &hidden)?;
    println!("   State: {}\n", timeline.state());

    // === 3. POINT QUERIES ===
    println!("3. Point Queries");
    println!("----------------");

    let at = date(1848, 3, 2);
    let found = timeline.objects_at(at)?;
    for (dataset, matches) in timeline.datasets().iter().zip(&found) {
        let labels: Vec<&str> = matches.iter().map(|o| o.label.as_str()).collect();
        println!("   {} at {}: {:?}", dataset.label, at, labels);
    }
    timeline.highlight_changed(&found)?;
    println!();

    // === 4. TICK CALCULATION ===
    println!("4. Tick Calculation");
    println!("-------------------");

    let draft = DataObject::fuzzy("Undated draft", date(1848, 1, 1), date(1848, 6, 30));
    if let Some(ticks) = timeline.ticks_for(&draft, SpanWidth::from_days(30.0))? {
        println!(
            "   Bins {}..={} (first {:.2}, last {:.2})",
            ticks.first_tick, ticks.last_tick, ticks.first_tick_percentage, ticks.last_tick_percentage
        );
    }
    println!();

    // === 5. SELECTION AND STATS ===
    println!("5. Selection and Stats");
    println!("----------------------");

    timeline.selection_changed(&Selection::from_datasets(&shown))?;
    let stats = timeline.stats();
    println!("   Loads: {}", stats.loads);
    println!("   Span changes: {}", stats.span_changes);
    println!("   Highlights forwarded: {}", stats.highlights_forwarded);
    println!("   Selections forwarded: {}", stats.selections_forwarded);
    println!("   Skipped untimed objects: {}\n", stats.skipped_objects);

    timeline.unload();
    println!("✓ Unloaded, state: {}", timeline.state());

    Ok(())
}
