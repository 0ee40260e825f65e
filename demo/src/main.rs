//! Humble Alert Demo
//!
//! Chains four alerts on the headless host, each one shown from the dismiss
//! callback of the previous one, and logs every lifecycle change on a virtual
//! clock. The last alert waits for a tap, which the driver performs.
//!
//! ```text
//! RUST_LOG=debug humble_demo --idiom tablet --width 1024 --height 768
//! ```

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use humble_alert::prelude::*;
use humble_headless::HeadlessPlatform;
use humble_platform::{DeviceIdiom, Font, FontWeight, Orientation, Size, ViewId};
use rustc_hash::FxHashMap;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Virtual time between two driver steps
const STEP: Duration = Duration::from_millis(250);

/// The demo ends at the latest after this much virtual time
const MAX_RUNTIME: Duration = Duration::from_secs(60);

const LAST_TITLE: &str = "Have fun!";
const KEYBOARD_TITLE: &str = "Check out the code.";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Idiom {
    Phone,
    Tablet,
}

impl From<Idiom> for DeviceIdiom {
    fn from(idiom: Idiom) -> Self {
        match idiom {
            Idiom::Phone => DeviceIdiom::Phone,
            Idiom::Tablet => DeviceIdiom::Tablet,
        }
    }
}

#[derive(Parser)]
#[command(name = "humble_demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Humble alert demo on a headless host", long_about = None)]
struct Args {
    /// Device class
    #[arg(long, value_enum, default_value = "phone")]
    idiom: Idiom,

    /// Screen width in points
    #[arg(long, default_value_t = 390.0)]
    width: f32,

    /// Screen height in points
    #[arg(long, default_value_t = 844.0)]
    height: f32,

    /// Alert configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raise a software keyboard while the bottom alert is visible
    #[arg(long)]
    keyboard: bool,

    /// Rotate to landscape once the first alert is visible
    #[arg(long)]
    rotate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match &args.config {
        Some(path) => AlertConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AlertConfig::default(),
    };

    let host = Rc::new(HeadlessPlatform::new(
        args.idiom.into(),
        Size::new(args.width, args.height),
    ));
    let ctx = AlertContext::with_config(host.clone(), config);

    info!(
        "Starting demo on a {:?} screen of {}x{}",
        args.idiom, args.width, args.height
    );

    let first = AlertView::new(&ctx, "Hi there.", None, Duration::from_secs(5), false);
    first.set_position(AlertPosition::Top);
    first.set_top_content_margin(64.0);
    let next = ctx.clone();
    first.set_on_dismissed(move || show_or_log(second_alert(&next)));
    first.show_in(host.root())?;
    drop(first);

    drive(&host, &ctx, &args);
    Ok(())
}

fn second_alert(ctx: &Rc<AlertContext>) -> AlertView {
    let alert = AlertView::with_title(ctx, "This is a demo of HumbleAlertView.");
    alert.set_position(AlertPosition::Center);
    alert.set_style(AlertStyle::Light);
    let next = ctx.clone();
    alert.set_on_dismissed(move || show_or_log(third_alert(&next)));
    alert
}

fn third_alert(ctx: &Rc<AlertContext>) -> AlertView {
    let alert = AlertView::with_message(
        ctx,
        KEYBOARD_TITLE,
        "Try out different setups before implementing it in your app.",
    );
    alert.set_title_font(
        Font::named("AvenirNextCondensed-Medium", 19.0).with_weight(FontWeight::Medium),
    );
    alert.set_message_font(Font::named("AvenirNext-Regular", 14.0));
    alert.set_style(AlertStyle::Dark);
    alert.set_bottom_content_margin(50.0);
    let next = ctx.clone();
    alert.set_on_dismissed(move || show_or_log(fourth_alert(&next)));
    alert
}

fn fourth_alert(ctx: &Rc<AlertContext>) -> AlertView {
    let alert = AlertView::new(
        ctx,
        LAST_TITLE,
        Some("You can tap this message to dismiss it."),
        Duration::from_secs(900),
        true,
    );
    alert.set_position(AlertPosition::Center);
    alert.set_on_dismissed(|| info!("All alerts dismissed"));
    alert
}

fn show_or_log(alert: AlertView) {
    if let Err(err) = alert.show() {
        error!("Failed to show {:?}: {}", alert.title(), err);
    }
}

/// Step the virtual clock, logging transitions and playing the user's part
fn drive(host: &HeadlessPlatform, ctx: &Rc<AlertContext>, args: &Args) {
    let mut seen: FxHashMap<ViewId, AlertState> = FxHashMap::default();
    let mut keyboard_shown = false;
    let mut rotated = false;

    while host.now() < MAX_RUNTIME {
        host.advance(STEP);

        let alerts = ctx.alerts_in(host.root());
        for alert in &alerts {
            let state = alert.state();
            if seen.insert(alert.view_id(), state) != Some(state) {
                info!(
                    "[{:>6.2}s] {:?} is {:?} at {:?}",
                    host.now().as_secs_f32(),
                    alert.title(),
                    state,
                    host.frame(alert.view_id())
                );
            }
            if state != AlertState::Visible {
                continue;
            }

            if args.rotate && !rotated {
                rotated = true;
                info!("Rotating to landscape");
                host.rotate(Orientation::LandscapeLeft);
                info!("  {:?} now at {:?}", alert.title(), host.frame(alert.view_id()));
            }

            if args.keyboard && !keyboard_shown && alert.title() == KEYBOARD_TITLE {
                keyboard_shown = true;
                host.show_keyboard(216.0);
                info!("Keyboard up, alert at {:?}", host.frame(alert.view_id()));
                host.hide_keyboard();
                info!("Keyboard down, alert at {:?}", host.frame(alert.view_id()));
            }

            if alert.title() == LAST_TITLE {
                info!("Tapping {:?}", alert.title());
                host.tap(alert.view_id());
            }
        }

        if alerts.is_empty() && !host.has_pending_tasks() {
            break;
        }
    }

    info!(
        "Demo finished at {:.2}s, {} alert(s) still attached",
        host.now().as_secs_f32(),
        ctx.attached_count()
    );
}
