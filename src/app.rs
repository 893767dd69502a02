use std::fs;
use std::time::Duration;

use anyhow::Context;
use robot_sandbox::config::StageConfig;
use robot_sandbox::parts::Payload;
use robot_sandbox::stage::Stage;

use crate::cli::Args;

struct App {
    stage: Stage,
    frame_interval: Duration,
}

impl App {
    fn from_args(args: &Args) -> anyhow::Result<Self> {
        anyhow::ensure!(args.fps > 0, "--fps must be at least 1");

        let mut config = StageConfig::default();
        if let Some(width) = args.width {
            config.width = width;
        }
        if let Some(height) = args.height {
            config.height = height;
        }
        if let Some(scale) = args.scale {
            config.robot_scale = scale;
        }

        Ok(Self {
            stage: Stage::new(config),
            frame_interval: Duration::from_secs(1) / args.fps,
        })
    }

    fn apply_drops(&mut self, args: &Args) -> anyhow::Result<()> {
        for drop in &args.drop_colors {
            let accepted = self.stage.drop(drop.point, Payload::Color(drop.color));
            log_drop("color", drop.point, accepted);
        }

        for drop in &args.drop_images {
            let payload = Payload::load_image(&drop.path)?;
            let accepted = self.stage.drop(drop.point, payload);
            log_drop(&drop.path.display().to_string(), drop.point, accepted);
        }

        Ok(())
    }

    fn print_display_list(&self) {
        for command in self.stage.display_list().commands() {
            println!("{command}");
        }
    }

    fn render_frames(&mut self, args: &Args) -> anyhow::Result<()> {
        fs::create_dir_all(&args.out)
            .with_context(|| format!("Failed to create {}", args.out.display()))?;

        for index in 0..args.frames {
            let path = args.out.join(format!("frame_{index:04}.png"));
            let image = self.stage.render_image();
            image
                .save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            log::debug!("Wrote {}", path.display());
            self.stage.tick(self.frame_interval);
        }

        log::info!("Wrote {} frames to {}", args.frames, args.out.display());
        Ok(())
    }
}

fn log_drop(what: &str, point: glam::Vec2, accepted: bool) {
    if accepted {
        log::info!("Dropped {} at ({}, {})", what, point.x, point.y);
    } else {
        log::warn!("Nothing at ({}, {}) accepted {}", point.x, point.y, what);
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut app = App::from_args(&args).context("Failed to set up stage")?;
    app.apply_drops(&args)?;

    if args.list {
        app.print_display_list();
    }

    app.render_frames(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ImageDrop;
    use clap::Parser;
    use glam::Vec2;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_image_drop_then_frames_on_disk() {
        let dir = tempdir().unwrap();
        let image_path = dir.path().join("face.png");
        // Scaled down by the head, this covers the whole silhouette.
        RgbaImage::from_pixel(132, 177, BLUE).save(&image_path).unwrap();

        let mut args = Args::try_parse_from(["robot-sandbox", "--frames", "2"]).unwrap();
        args.out = dir.path().join("frames");

        let mut app = App::from_args(&args).unwrap();
        let head = app.stage.robot().head();
        let head_center = app
            .stage
            .scene
            .world_matrix(head)
            .unwrap()
            .transform_point2(Vec2::new(0.0, -15.0));

        args.drop_images.push(ImageDrop {
            path: image_path,
            point: head_center,
        });
        app.apply_drops(&args).unwrap();
        assert!(app.stage.scene.get_node(head).unwrap().part.image().is_some());

        let pixel = app.stage.view_transform().transform_point2(head_center);
        app.render_frames(&args).unwrap();

        assert!(args.out.join("frame_0001.png").exists());
        assert!(!args.out.join("frame_0002.png").exists());

        let frame = image::open(args.out.join("frame_0000.png")).unwrap().into_rgba8();
        assert_eq!(frame.dimensions(), (400, 400));
        assert_eq!(*frame.get_pixel(pixel.x as u32, pixel.y as u32), BLUE);
    }

    #[test]
    fn test_missing_drop_image_is_an_error() {
        let dir = tempdir().unwrap();
        let mut args = Args::try_parse_from(["robot-sandbox"]).unwrap();
        args.drop_images.push(ImageDrop {
            path: dir.path().join("missing.png"),
            point: Vec2::ZERO,
        });

        let mut app = App::from_args(&args).unwrap();
        assert!(app.apply_drops(&args).is_err());
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        let args = Args::try_parse_from(["robot-sandbox", "--fps", "0"]).unwrap();

        assert!(App::from_args(&args).is_err());
    }
}
