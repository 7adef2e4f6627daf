use std::time::Instant;

use anyhow::{Context, Result};

use dlvis::display_list::{DisplayList, demo_display_list};
use dlvis::settings::Settings;
use dlvis::viewer::Viewer;

fn load_display_list(path: Option<&str>) -> Result<DisplayList> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading display list from {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing display list {path}"))
        }
        None => Ok(demo_display_list()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let list_path = if args.len() > 1 {
        Some(args[1].as_str())
    } else {
        None
    };
    let display_list = load_display_list(list_path)?;

    let settings = Settings::load();
    let mut viewer = Viewer::new(display_list, 0);
    viewer.set_background(settings.display.background);
    viewer.set_annotations_visible(settings.display.show_annotations);
    viewer.set_axes_visible(settings.display.show_axes);
    viewer.set_fps(settings.playback.fps);
    viewer.set_loop_mode(settings.playback.loop_mode);

    log::info!(
        "display list: {} frames, {} groups",
        viewer.frame_count(),
        viewer.groups().len()
    );
    for group in viewer.groups() {
        log::info!("group {}: {}", group.id, group.label);
    }

    // Headless demo run: play a couple of seconds of the sequence and print
    // the overlay for every committed frame.
    viewer.play();
    let started = Instant::now();
    while started.elapsed().as_secs_f64() < 2.0 {
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        if viewer.tick(now_ms).is_some() {
            println!("{}", viewer.frame_label());
            if let Some(text) = viewer.annotation_text() {
                println!("  {text}");
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    viewer.pause();

    if let Some(group_id) = viewer.groups().first().map(|g| g.id.clone()) {
        viewer.set_group_visibility(&group_id, false);
        log::info!("group {group_id} hidden");
        viewer.set_group_visibility(&group_id, true);
    }

    viewer.dispose();

    settings.display.save();
    settings.playback.save();
    Ok(())
}
