pub mod render;

pub const INTRO: &str = "Paste a video URL and press Enter to list its downloads. Ctrl-D quits.";
