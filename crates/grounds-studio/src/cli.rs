// ============================================================================
// magicgrounds CLI: compose a gradient from flags and export it
// ============================================================================
//
// Usage examples:
//   magicgrounds --preset sunset --kind radial --format png --format svg
//   magicgrounds --colors '#FF0000,#0000FF' --angle 90 --format css --stdout
//   magicgrounds --random --palette-seed 7 --grain 40 --seed 1 --template instagram-story
//   magicgrounds --ratio 16:9 --width 1280 -f jpeg --out-dir renders/
//   magicgrounds --list
//
// Everything runs on the current thread. Text output (CSS, palette) goes to
// the clipboard unless --stdout is given; files land in --out-dir.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use grounds_engine::catalog;
use grounds_engine::export::{copy_palette, export, DesktopHost, ExportFormat, TextSink};
use grounds_engine::filter::{FilterKey, HUE_PRESETS};
use grounds_engine::paint::{ColorStops, GradientKind};
use grounds_engine::session::Session;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// MagicGrounds gradient composer.
#[derive(Parser, Debug)]
#[command(
    name = "magicgrounds",
    about = "Compose color gradients and export them as CSS, SVG, PNG or JPEG",
    long_about = "Build a gradient from a preset, explicit colors or a random palette,\n\
                  shape it, apply filters and export it. CSS and palette text go to\n\
                  the clipboard (or stdout with --stdout); images are written as\n\
                  magicgrounds-gradient.<ext> into --out-dir.\n\n\
                  Example:\n  \
                  magicgrounds --preset sunset --kind radial -f png -f svg"
)]
pub struct CliArgs {
    /// Built-in palette to start from (see --list).
    #[arg(long, value_name = "NAME", conflicts_with_all = ["colors", "random"])]
    pub preset: Option<String>,

    /// Explicit colors, comma separated: '#f00,#00ff00,hsl(200, 80%, 60%)'.
    #[arg(long, value_name = "C1,C2,..", conflicts_with = "random")]
    pub colors: Option<String>,

    /// Random palette of 3 to 5 colors.
    #[arg(long)]
    pub random: bool,

    /// Seed for --random, for a reproducible palette.
    #[arg(long, value_name = "N", requires = "random")]
    pub palette_seed: Option<u64>,

    /// Gradient shape: linear, radial or conic.
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<GradientKind>,

    /// Direction in degrees (0-360).
    #[arg(short, long, value_name = "DEG")]
    pub angle: Option<f32>,

    /// Film grain amount (0-100).
    #[arg(long, value_name = "0-100")]
    pub grain: Option<f32>,

    /// Blur amount (0-100); the preview blur is half this in pixels.
    #[arg(long, value_name = "0-100")]
    pub blur: Option<f32>,

    /// Contrast percentage (0-200).
    #[arg(long, value_name = "0-200")]
    pub contrast: Option<f32>,

    /// Brightness percentage (0-200).
    #[arg(long, value_name = "0-200")]
    pub brightness: Option<f32>,

    /// Hue rotation in degrees (0-360).
    #[arg(long, value_name = "0-360")]
    pub hue: Option<f32>,

    /// Canvas template, e.g. "Instagram Story" or instagram-story.
    #[arg(short, long, value_name = "NAME", conflicts_with = "ratio")]
    pub template: Option<String>,

    /// Ratio shortcut: 1:1, 2:1, 16:9, 4:3, 3:2 or 7:4.
    #[arg(short, long, value_name = "W:H")]
    pub ratio: Option<String>,

    /// Canvas width in pixels. The height follows unless --unlocked.
    #[arg(long, value_name = "PX")]
    pub width: Option<String>,

    /// Canvas height in pixels. The width follows unless --unlocked.
    #[arg(long, value_name = "PX")]
    pub height: Option<String>,

    /// Let --width and --height change independently.
    #[arg(long)]
    pub unlocked: bool,

    /// Preview scale (0.5-3). Does not affect exported pixel size.
    #[arg(long, value_name = "S")]
    pub scale: Option<f32>,

    /// Export format; repeat for several. Defaults to png unless --palette is given.
    #[arg(short, long = "format", value_name = "FORMAT")]
    pub formats: Vec<ExportFormat>,

    /// Directory image files are written to.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print CSS and palette text instead of copying it to the clipboard.
    ///
    /// On X11 the clipboard copy only survives this process if a clipboard
    /// manager is running. Without an available clipboard, text is printed anyway.
    #[arg(long)]
    pub stdout: bool,

    /// Seed for film grain, for byte-identical rasters.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Copy the palette ("#a, #b, #c") as text.
    #[arg(long)]
    pub palette: bool,

    /// List palettes, templates, ratios and hue shortcuts, then exit.
    #[arg(long)]
    pub list: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Requested exports, with the png default applied.
    pub fn export_formats(&self) -> Vec<ExportFormat> {
        if self.formats.is_empty() && !self.palette {
            vec![ExportFormat::Png]
        } else {
            self.formats.clone()
        }
    }

    fn filter_values(&self) -> [(FilterKey, Option<f32>); 5] {
        [
            (FilterKey::Grain, self.grain),
            (FilterKey::Blur, self.blur),
            (FilterKey::Contrast, self.contrast),
            (FilterKey::Brightness, self.brightness),
            (FilterKey::Hue, self.hue),
        ]
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Runs one invocation. `Ok(false)` means at least one export failed; the
/// others were still attempted.
pub fn run(args: &CliArgs) -> Result<bool> {
    if args.list {
        print_catalog();
        return Ok(true);
    }

    let mut palette_rng = match args.palette_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = build_session(args, &mut palette_rng)?;

    log::debug!("background: {}", session.preview_background());
    log::debug!("filter: {}", session.preview_filter());
    let (pw, ph) = session.preview_size();
    log::debug!(
        "canvas {}x{}, preview {}x{}",
        session.canvas().width(),
        session.canvas().height(),
        pw,
        ph
    );

    let sink = if args.stdout { TextSink::Stdout } else { TextSink::Clipboard };
    let mut host = DesktopHost::new(&args.out_dir, sink)?;
    log::debug!("files go to {}", host.out_dir().display());
    let mut grain_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut all_ok = true;

    if args.palette {
        match copy_palette(&session.gradient().stops, &mut host) {
            Ok(text) if !args.stdout => println!("palette copied: {}", text),
            Ok(_) => {}
            Err(e) => {
                eprintln!("  error: copying palette failed: {}", e);
                all_ok = false;
            }
        }
    }

    for format in args.export_formats() {
        match export(session.export_request(format), &mut host, &mut grain_rng) {
            Ok(outcome) => {
                if outcome.format != ExportFormat::Css || !args.stdout {
                    eprintln!("  {}", outcome);
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

// ============================================================================
// Flags -> Session
// ============================================================================

/// Applies the flags to a default session in the order the editor would:
/// palette, shape, filters, canvas.
pub fn build_session(args: &CliArgs, rng: &mut StdRng) -> Result<Session> {
    let mut session = Session::default();

    // -- Palette ---------------------------------------------------------
    if let Some(name) = &args.preset {
        if catalog::palette(name).is_none() {
            bail!("unknown palette {:?} (try --list)", name);
        }
        session = session.load_preset(name);
    } else if let Some(colors) = &args.colors {
        let literals = split_colors(colors);
        let stops = ColorStops::parse(literals.as_slice()).with_context(|| format!("invalid --colors {:?}", colors))?;
        session = session.set_stops(stops);
    } else if args.random {
        let count = ColorStops::random_count(rng);
        session = session.randomize(count, rng);
    }

    // -- Shape -----------------------------------------------------------
    if let Some(kind) = args.kind {
        session = session.set_kind(kind);
    }
    if let Some(angle) = args.angle {
        session = session.set_angle(angle);
    }

    // -- Filters ---------------------------------------------------------
    for (key, value) in args.filter_values() {
        if let Some(v) = value {
            session = session.update_filter(key, v);
        }
    }

    // -- Canvas ----------------------------------------------------------
    if let Some(name) = &args.template {
        if catalog::template(name).is_none() {
            bail!("unknown template {:?} (try --list)", name);
        }
        session = session.select_template(name);
    }
    if let Some(text) = &args.ratio {
        let ratio = catalog::ratio(text)
            .ok_or_else(|| anyhow!("unsupported ratio {:?} (1:1, 2:1, 16:9, 4:3, 3:2, 7:4)", text))?;
        session = session.apply_ratio(ratio);
    }
    if args.unlocked {
        session = session.set_aspect_lock(false);
    }
    if let Some(w) = &args.width {
        session = session.set_width_text(w);
    }
    if let Some(h) = &args.height {
        session = session.set_height_text(h);
    }
    if let Some(scale) = args.scale {
        session = session.set_scale(scale);
    }

    Ok(session)
}

/// Splits on commas outside parentheses, so `hsl(1, 2%, 3%)` stays whole.
fn split_colors(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() || !out.is_empty() {
        out.push(current.trim().to_string());
    }
    out
}

fn print_catalog() {
    println!("palettes:");
    for p in catalog::PALETTES {
        println!("  {:<10} {}", p.name, p.colors.join(", "));
    }
    println!("templates:");
    for t in catalog::TEMPLATES {
        println!("  {:<18} {}x{} ({})", t.name, t.width, t.height, t.ratio);
    }
    println!("ratios:");
    for r in catalog::RATIOS {
        let (w, h) = r.size();
        println!("  {:<5} {}x{}", r.to_string(), w, h);
    }
    let hues: Vec<String> = HUE_PRESETS.iter().map(|h| format!("{}", h)).collect();
    println!("hue shortcuts: {}", hues.join(", "));
    let kinds: Vec<&str> = GradientKind::ALL.iter().map(|k| k.name()).collect();
    println!("kinds: {}", kinds.join(", "));
}
