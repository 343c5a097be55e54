mod scenario;

use glide_panel::SlidingPanel;
use glide_runtime_std::StdRuntime;
use scenario::FramePump;
use std::thread;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 2_000;

/// Drives the std runtime at roughly display rate.
struct StdPump {
    runtime: StdRuntime,
}

impl FramePump for StdPump {
    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.is_animating() && frames < MAX_FRAMES {
            thread::sleep(FRAME_INTERVAL);
            if self.runtime.take_frame_request() || self.runtime.is_animating() {
                self.runtime.drain_frame_callbacks();
            }
            frames += 1;
        }
        if frames == MAX_FRAMES {
            log::warn!("panel still moving after {MAX_FRAMES} frames");
        }
        frames
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let runtime = StdRuntime::new();
    let config = match scenario::panel_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid panel config: {err}");
            std::process::exit(1);
        }
    };
    let panel = match SlidingPanel::new(config, runtime.runtime_handle()) {
        Ok(panel) => panel,
        Err(err) => {
            eprintln!("failed to create panel: {err}");
            std::process::exit(1);
        }
    };
    let _trace = panel.on_position_change(|value| log::trace!("position {value}"));

    println!("=== Glide Sliding Panel ===");
    println!("Scripted show, hide, swipe, keyboard and fling on a {panel:?}");
    println!();

    let mut pump = StdPump { runtime };
    for step in scenario::run(&panel, &mut pump) {
        println!(
            "{:<16} value {:>7.2}  frames {:>4}  backdrop {:.2}",
            step.label,
            step.value,
            step.frames,
            step.backdrop
        );
    }
}
