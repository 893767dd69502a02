use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use itertools::Itertools;
use robot_sandbox::painting::Color;

#[derive(Debug, Parser)]
#[command(
    name = "robot-sandbox",
    about = "Animates the drag-and-drop robot and writes the frames as PNG files"
)]
pub struct Args {
    /// Number of frames to render
    #[arg(long, default_value_t = 50)]
    pub frames: u32,

    /// Animation frames per second
    #[arg(long, default_value_t = 25)]
    pub fps: u32,

    /// Directory the frames are written to
    #[arg(long, default_value = "frames")]
    pub out: PathBuf,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Scale of the robot inside the scene
    #[arg(long)]
    pub scale: Option<f32>,

    /// Drop a color before the first frame, in scene coordinates
    #[arg(long = "drop-color", value_name = "R,G,B@X,Y", value_parser = parse_color_drop)]
    pub drop_colors: Vec<ColorDrop>,

    /// Drop an image file before the first frame, in scene coordinates
    #[arg(long = "drop-image", value_name = "PATH@X,Y", value_parser = parse_image_drop)]
    pub drop_images: Vec<ImageDrop>,

    /// Print the draw commands of the first frame
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorDrop {
    pub color: Color,
    pub point: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDrop {
    pub path: PathBuf,
    pub point: Vec2,
}

fn split_target(value: &str) -> anyhow::Result<(&str, Vec2)> {
    let (payload, point) = value
        .rsplit_once('@')
        .with_context(|| format!("Missing '@X,Y' in {value:?}"))?;

    Ok((payload, parse_point(point)?))
}

fn parse_point(value: &str) -> anyhow::Result<Vec2> {
    let (x, y) = value
        .split(',')
        .map(str::trim)
        .collect_tuple()
        .with_context(|| format!("Expected X,Y but got {value:?}"))?;

    Ok(Vec2::new(
        x.parse().with_context(|| format!("Invalid x coordinate {x:?}"))?,
        y.parse().with_context(|| format!("Invalid y coordinate {y:?}"))?,
    ))
}

fn parse_color(value: &str) -> anyhow::Result<Color> {
    let (r, g, b) = value
        .split(',')
        .map(|channel| {
            channel
                .trim()
                .parse::<u8>()
                .with_context(|| format!("Invalid color channel {channel:?}"))
        })
        .collect_tuple()
        .with_context(|| format!("Expected R,G,B but got {value:?}"))?;

    Ok(Color::rgb(r?, g?, b?))
}

pub fn parse_color_drop(value: &str) -> anyhow::Result<ColorDrop> {
    let (color, point) = split_target(value)?;

    Ok(ColorDrop {
        color: parse_color(color)?,
        point,
    })
}

pub fn parse_image_drop(value: &str) -> anyhow::Result<ImageDrop> {
    let (path, point) = split_target(value)?;
    anyhow::ensure!(!path.is_empty(), "Missing image path in {value:?}");

    Ok(ImageDrop {
        path: PathBuf::from(path),
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_drop() {
        let drop = parse_color_drop("255, 0, 10@-4.5,20").unwrap();

        assert_eq!(drop.color, Color::rgb(255, 0, 10));
        assert_eq!(drop.point, Vec2::new(-4.5, 20.0));
    }

    #[test]
    fn test_parse_image_drop_keeps_at_in_path() {
        let drop = parse_image_drop("photos/me@home.png@0,-40").unwrap();

        assert_eq!(drop.path, PathBuf::from("photos/me@home.png"));
        assert_eq!(drop.point, Vec2::new(0.0, -40.0));
    }

    #[test]
    fn test_rejects_malformed_specs() {
        assert!(parse_color_drop("255,0@1,2").is_err());
        assert!(parse_color_drop("256,0,0@1,2").is_err());
        assert!(parse_color_drop("1,2,3").is_err());
        assert!(parse_image_drop("@1,2").is_err());
        assert!(parse_image_drop("a.png@1").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "robot-sandbox",
            "--frames",
            "3",
            "--drop-color",
            "1,2,3@0,0",
            "--drop-color",
            "4,5,6@10,10",
        ])
        .unwrap();

        assert_eq!(args.frames, 3);
        assert_eq!(args.fps, 25);
        assert_eq!(args.drop_colors.len(), 2);
        assert!(args.drop_images.is_empty());
    }
}
