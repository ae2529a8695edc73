use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use squishy_toggle::replay::TapScript;
use squishy_toggle::utils::Rectangle;
use squishy_toggle::{save_png, Renderer, SquishyToggle, ToggleStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Render toggle transition frames and compare them with golden images.
#[derive(Parser, Debug)]
#[command(name = "snapshots", version)]
struct Args {
    /// Directory holding `actual/` and `golden/`
    #[arg(long, default_value = "snapshots")]
    out: PathBuf,
    /// JSON style overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Frames sampled across one transition
    #[arg(long, default_value_t = 6)]
    frames: usize,
    /// Canvas size as WIDTHxHEIGHT
    #[arg(long, default_value = "400x200", value_parser = parse_size)]
    size: (u32, u32),
    /// Per-channel tolerance when comparing against goldens
    #[arg(long, default_value_t = 3)]
    tolerance: u8,
    /// Overwrite existing goldens with the new renders
    #[arg(long)]
    bless: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s}"))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((w, h))
}

fn compare_with_tolerance(a_path: &Path, b_path: &Path, tolerance: u8) -> anyhow::Result<bool> {
    let a = ImageReader::open(a_path)?.decode()?.to_rgba8();
    let b = ImageReader::open(b_path)?.decode()?.to_rgba8();

    if a.dimensions() != b.dimensions() {
        return Ok(false);
    }
    Ok(a.pixels().zip(b.pixels()).all(|(pa, pb)| {
        let da = pa.0;
        let db = pb.0;
        (0..4).all(|i| da[i].abs_diff(db[i]) <= tolerance)
    }))
}

struct Shot {
    name: String,
    toggle: SquishyToggle,
}

/// Evenly spaced frames of an off → on transition, then a tap half way back.
fn transition_shots(style: &ToggleStyle, frames: usize) -> Vec<Shot> {
    let mut shots = Vec::new();
    let mut toggle = SquishyToggle::new(false, style.clone());
    toggle.tap();
    let steps = frames.max(2) - 1;
    let dt = style.duration / steps as f32;
    for i in 0..=steps {
        if i > 0 {
            toggle.update(dt);
        }
        shots.push(Shot {
            name: format!("off_to_on_{i:02}"),
            toggle: toggle.clone(),
        });
    }

    toggle.tap();
    toggle.update(style.duration * 0.5);
    toggle.tap();
    shots.push(Shot {
        name: "retap_mid_flight".to_string(),
        toggle: toggle.clone(),
    });

    let mut debug_style = style.clone();
    debug_style.debug = true;
    let mut debug = SquishyToggle::new(false, debug_style);
    debug.tap();
    debug.update(style.duration * 0.5);
    shots.push(Shot {
        name: "debug_half".to_string(),
        toggle: debug,
    });
    shots
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let style = match &args.config {
        Some(path) => ToggleStyle::load(path)?,
        None => ToggleStyle::default(),
    };

    let actual_dir = args.out.join("actual");
    let golden_dir = args.out.join("golden");
    fs::create_dir_all(&actual_dir).with_context(|| format!("create {}", actual_dir.display()))?;
    fs::create_dir_all(&golden_dir).with_context(|| format!("create {}", golden_dir.display()))?;

    let renderer = Renderer::new();
    if !renderer.labels().has_fonts() {
        log::warn!("no system fonts found, labels will be missing from snapshots");
    }

    let (width, height) = args.size;
    let mut mismatches = Vec::new();
    for shot in transition_shots(&style, args.frames) {
        let file = format!("{}.png", shot.name);
        let out_actual = actual_dir.join(&file);
        let out_golden = golden_dir.join(&file);

        let pixmap = renderer.render(&shot.toggle, width, height)?;
        save_png(&pixmap, &out_actual)?;

        if args.bless || !out_golden.exists() {
            fs::copy(&out_actual, &out_golden)?;
            log::info!("golden written at {}", out_golden.display());
            continue;
        }

        if compare_with_tolerance(&out_actual, &out_golden, args.tolerance)? {
            log::info!("snapshot OK for {file}");
        } else {
            log::warn!("snapshot mismatch for {file}");
            mismatches.push(file);
        }
    }

    // Settle check: a replayed double tap must come back to rest where it started
    let container = Rectangle::new(0.0, 0.0, width as f32, height as f32);
    let script = TapScript::new(vec![0.0, 0.2], style.duration + 0.4);
    let mut toggle = SquishyToggle::new(true, style.clone());
    let frames = script.run(&mut toggle, container)?;
    if let Some(last) = frames.last() {
        log::info!(
            "replay settled at knob x {:.2} (on: {}) after {} frames",
            last.knob_x,
            last.is_on,
            frames.len()
        );
    }

    if !mismatches.is_empty() {
        anyhow::bail!("{} snapshot(s) differ: {}", mismatches.len(), mismatches.join(", "));
    }
    Ok(())
}
