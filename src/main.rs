//! `microlabel-wand`: run the magic-wand extractor on an image file.
//!
//! ```text
//! microlabel-wand <image> <x> <y> [--sensitivity N] [--store DIR --image-id ID] [--label NAME]
//! ```
//!
//! `x` and `y` are normalized seed coordinates. The extracted region is
//! printed as a wire entry; with `--store` it is also added to the image's
//! annotations in a file-backed store.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// The library is used directly on the web; there is no CLI.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use microlabel::coords::Size;
    use microlabel::tools::MagicWandTool;
    use microlabel::{
        AnnotationSession, AnnotationTool, EditorConfig, EditorTool, FileAnnotationService,
        ImageId, Point, PointerOutcome,
    };

    #[derive(Parser, Debug, Clone, PartialEq)]
    #[command(
        name = "microlabel-wand",
        version,
        about = "Extract a magic-wand region from an image at a normalized seed point"
    )]
    pub(crate) struct Cli {
        /// Image to extract from
        pub image: PathBuf,
        /// Seed x in [0, 1]
        #[arg(value_parser = parse_coordinate)]
        pub x: f32,
        /// Seed y in [0, 1]
        #[arg(value_parser = parse_coordinate)]
        pub y: f32,
        /// Wand sensitivity; overrides the config value
        #[arg(long)]
        pub sensitivity: Option<u32>,
        /// Directory of a file-backed annotation store to add the region to
        #[arg(long)]
        pub store: Option<PathBuf>,
        /// Image id inside the store (defaults to the image file stem)
        #[arg(long, requires = "store")]
        pub image_id: Option<String>,
        /// Category label for the region
        #[arg(long, default_value = "")]
        pub label: String,
    }

    impl Cli {
        fn seed(&self) -> Point {
            Point::new(self.x, self.y)
        }
    }

    fn parse_coordinate(value: &str) -> Result<f32, String> {
        let parsed: f32 = value
            .parse()
            .map_err(|_| format!("must be a number, got '{}'", value))?;
        if (0.0..=1.0).contains(&parsed) {
            Ok(parsed)
        } else {
            Err(format!("must be within [0, 1], got {}", parsed))
        }
    }

    fn init_logging(config: &EditorConfig) {
        env_logger::Builder::new()
            .filter_level(config.preferences.log_level.to_level_filter())
            .parse_default_env()
            .init();
    }

    pub(crate) fn run() -> ExitCode {
        let config = EditorConfig::load_from_default_path().unwrap_or_default();
        init_logging(&config);

        let args = Cli::parse();

        let image = match image::open(&args.image) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Failed to open {:?}: {}", args.image, e);
                return ExitCode::FAILURE;
            }
        };

        let result = match &args.store {
            Some(dir) => extract_into_store(&config, &args, dir.clone(), &image),
            None => extract_only(&config, &args, &image),
        };
        match result {
            Ok(Some(json)) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Ok(None) => {
                log::warn!("No region found at ({}, {})", args.x, args.y);
                ExitCode::FAILURE
            }
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        }
    }

    fn extract_only(
        config: &EditorConfig,
        args: &Cli,
        image: &image::DynamicImage,
    ) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let mut tool = MagicWandTool::new(config.tools.clone(), &config.magic_wand);
        tool.set_category(&args.label);
        if let Some(sensitivity) = args.sensitivity {
            tool.set_sensitivity(sensitivity);
        }
        tool.set_image(image)?;

        let Some(id) = tool.extract_at(args.seed()) else {
            return Ok(None);
        };
        let entry = tool.encode().into_iter().find(|entry| entry.id == id.as_str());
        Ok(entry.map(|entry| serde_json::to_string_pretty(&entry)).transpose()?)
    }

    fn extract_into_store(
        config: &EditorConfig,
        args: &Cli,
        dir: PathBuf,
        image: &image::DynamicImage,
    ) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let image_id = match &args.image_id {
            Some(id) => ImageId::new(id.clone()),
            None => ImageId::new(
                args.image
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
        };

        let mut session = AnnotationSession::new(FileAnnotationService::new(dir), config);
        let existing = pollster::block_on(session.switch_image(image_id.clone()));
        log::info!("{} has {} existing annotations", image_id, existing);

        let size = Size::new(image.width() as f32, image.height() as f32);
        session.set_viewport(size, size);
        session.set_category(&args.label);
        session.set_wand_image(image)?;
        session.set_active_tool(AnnotationTool::MagicWand);
        if let Some(sensitivity) = args.sensitivity {
            session.set_sensitivity(sensitivity);
        }

        let press = Point::new(args.x * size.width, args.y * size.height);
        let outcome = session.pointer_down(press);
        session.pointer_up(Some(press));

        let entry = match outcome {
            PointerOutcome::Committed(id) => session
                .toolbox()
                .wand
                .encode()
                .into_iter()
                .find(|entry| entry.id == id.as_str()),
            _ => None,
        };
        pollster::block_on(session.close())?;
        Ok(entry.map(|entry| serde_json::to_string_pretty(&entry)).transpose()?)
    }

}
