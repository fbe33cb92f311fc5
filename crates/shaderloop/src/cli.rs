use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "shaderloop",
    author,
    version,
    about = "Full-screen shader render loop"
)]
pub struct Cli {
    /// Window width in pixels.
    #[arg(long, default_value_t = 800, value_name = "PIXELS")]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 600, value_name = "PIXELS")]
    pub height: u32,

    /// Take over the current monitor instead of opening a window.
    #[arg(long)]
    pub fullscreen: bool,

    /// Redraw cadence override; the default is the nominal 60 Hz interval.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
