//! Spring Flow Demo
//!
//! Replays a scripted scroll session against the spring list layout and
//! logs where the simulated items end up:
//! - Pull past the top edge, then release and settle
//! - Drag through the middle of the list with a finger down
//! - Pull past the bottom edge
//!
//! Run with: RUST_LOG=debug cargo run -p springflow_demo -- --items 30

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use springflow_core::{Point, Size};
use springflow_layout::{LayoutContext, SpringFlowConfig, SpringFlowLayout};
use tracing_subscriber::EnvFilter;

const FRAME: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(
    name = "springflow-demo",
    about = "Replay a scroll session on the spring list layout"
)]
struct Args {
    /// Number of items in the list
    #[arg(long, default_value_t = 30)]
    items: usize,

    /// Item height (overrides the config file)
    #[arg(long)]
    item_height: Option<f32>,

    /// Viewport width
    #[arg(long, default_value_t = 375.0)]
    width: f32,

    /// Viewport height
    #[arg(long, default_value_t = 667.0)]
    height: f32,

    /// Frames per phase
    #[arg(long, default_value_t = 60)]
    frames: usize,

    /// How far to pull past each edge
    #[arg(long, default_value_t = 120.0)]
    pull: f32,

    /// Layout config in TOML
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SpringFlowConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SpringFlowConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => SpringFlowConfig::default(),
    };
    if let Some(height) = args.item_height {
        config.item_height = height;
    }
    config.validate().context("Invalid layout config")?;
    Ok(config)
}

/// Host-side scroll state fed to the layout each frame
struct Host {
    layout: SpringFlowLayout,
    viewport: Size,
    item_count: usize,
    offset_y: f32,
    touch: Option<Point>,
}

impl Host {
    fn context(&self) -> LayoutContext {
        let content = self.layout.flow_content_size(self.viewport.width, self.item_count);
        let ctx = LayoutContext::new(
            Point::new(0.0, self.offset_y),
            self.viewport,
            content,
            self.item_count,
        );
        match self.touch {
            Some(touch) => ctx.with_touch(touch),
            None => ctx,
        }
    }

    fn max_offset(&self) -> f32 {
        let content = self.layout.flow_content_size(self.viewport.width, self.item_count);
        (content.height - self.viewport.height).max(0.0)
    }

    /// Scroll to `offset_y` and run one frame
    fn scroll_to(&mut self, offset_y: f32) {
        let ctx = self.context();
        let new_bounds = ctx.bounds().offset(0.0, offset_y - self.offset_y);
        self.layout.should_invalidate_layout_for_bounds_change(&ctx, new_bounds);

        self.offset_y = offset_y;
        if let Some(touch) = self.touch.as_mut() {
            // The finger stays put on screen, so it moves in content space
            touch.y += new_bounds.y() - ctx.bounds().y();
        }
        self.frame();
    }

    fn frame(&mut self) {
        let ctx = self.context();
        self.layout.prepare_layout(&ctx);
        self.layout.step(FRAME);
    }

    fn report(&self, phase: &str) {
        let visible = self.layout.layout_attributes_in_rect(self.context().bounds());
        let first = visible.first().map(|a| (a.index, a.center.y));
        let last = visible.last().map(|a| (a.index, a.center.y));
        tracing::info!(
            phase,
            offset = self.offset_y,
            attached = self.layout.attachment_count(),
            settled = self.layout.is_settled(),
            ?first,
            ?last,
            "phase complete"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let layout = SpringFlowLayout::with_config(config)?;

    let mut host = Host {
        layout,
        viewport: Size::new(args.width, args.height),
        item_count: args.items,
        offset_y: 0.0,
        touch: None,
    };
    let frames = args.frames.max(1);

    host.frame();
    host.report("initial");

    // Pull past the top edge and let go
    host.touch = Some(Point::new(args.width / 2.0, args.height / 2.0));
    for frame in 1..=frames {
        host.scroll_to(-args.pull * frame as f32 / frames as f32);
    }
    host.report("pulled past top");
    host.touch = None;
    host.scroll_to(0.0);
    for _ in 0..frames {
        host.frame();
    }
    host.report("released");

    // Drag through the middle
    let target = host.max_offset() / 2.0;
    host.touch = Some(Point::new(args.width / 2.0, args.height / 3.0));
    for frame in 1..=frames {
        host.scroll_to(target * frame as f32 / frames as f32);
    }
    host.report("dragged");

    // Pull past the bottom edge
    let max_offset = host.max_offset();
    for frame in 1..=frames {
        let progress = frame as f32 / frames as f32;
        host.scroll_to(target + (max_offset + args.pull - target) * progress);
    }
    host.report("pulled past bottom");
    host.touch = None;
    host.scroll_to(max_offset);
    for _ in 0..frames * 10 {
        host.frame();
    }
    host.report("settled");

    Ok(())
}
