use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagcrop::config::{self, EngineConfig};
use tagcrop::geometry::{Handle, ImageDimensions, Point, Size};
use tagcrop::imaging::{self, OperationError, RustBackend};
use tagcrop::output::{self, DragStep};
use tagcrop::session::CropEditor;
use tagcrop::tags::{ProductData, TagBoard};

#[derive(Parser)]
#[command(name = "tagcrop")]
#[command(about = "Crop-box and product-tag geometry for photo capture")]
#[command(long_about = "\
Crop-box and product-tag geometry for photo capture

A photo is fitted into a viewport (the container), centered and letterboxed.
The crop region starts as a centered square and is moved or resized with
drag gestures, always staying inside the photo, above the minimum size, and
within the allowed aspect-ratio range. Product tags are placed by tapping
the photo and stored as percentages of the image.

Handles for --drag:
  move, top-left, top, top-right, right, bottom-right, bottom, bottom-left, left

Examples:
  tagcrop fit  --image look.jpg --container 390x844
  tagcrop crop --image look.jpg --container 390x844 --output crop.jpg \\
               --drag bottom-right:40,80 --drag move:-20,0
  tagcrop tag  --image look.jpg --container 390x844 --tap 200,400 \\
               --title \"Wool jacket\" --price 129.00 --currency '$'

Run 'tagcrop gen-config' to generate a documented tagcrop.toml.")]
#[command(version)]
struct Cli {
    /// Engine config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that open a photo.
#[derive(clap::Args, Clone)]
struct ImageArgs {
    /// Source photo
    #[arg(long)]
    image: PathBuf,

    /// Viewport the photo is fitted into, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    container: Size,
}

/// Product details attached to every placed tag.
#[derive(clap::Args, Clone)]
struct ProductArgs {
    /// Product name
    #[arg(long)]
    title: Option<String>,
    /// Price as shown, e.g. 129.00
    #[arg(long)]
    price: Option<String>,
    /// Currency symbol or code
    #[arg(long)]
    currency: Option<String>,
    /// Product page
    #[arg(long)]
    url: Option<String>,
    /// Product image
    #[arg(long)]
    image_url: Option<String>,
}

impl From<&ProductArgs> for ProductData {
    fn from(args: &ProductArgs) -> Self {
        ProductData {
            title: args.title.clone().unwrap_or_default(),
            price: args.price.clone().unwrap_or_default(),
            currency: args.currency.clone().unwrap_or_default(),
            image_url: args.image_url.clone().unwrap_or_default(),
            url: args.url.clone().unwrap_or_default(),
        }
    }
}

/// One `--drag HANDLE:DX,DY` gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    handle: Handle,
    dx: f64,
    dy: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fitted layout and the initial crop region
    Fit(ImageArgs),
    /// Replay drag gestures and export the resulting crop
    Crop {
        #[command(flatten)]
        image: ImageArgs,
        /// Where to write the cropped photo (format from extension)
        #[arg(long)]
        output: PathBuf,
        /// Drag a handle by DX,DY screen units, e.g. top-left:-20,15 (repeatable)
        #[arg(long = "drag", value_parser = parse_drag)]
        drags: Vec<Drag>,
    },
    /// Place product tags by tapping the photo
    Tag {
        #[command(flatten)]
        image: ImageArgs,
        /// Tap position in screen units as X,Y (repeatable)
        #[arg(long = "tap", value_parser = parse_point, required = true)]
        taps: Vec<Point>,
        #[command(flatten)]
        product: ProductArgs,
        /// Print the tags as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock tagcrop.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => {
            let config = config::load_config(&cli.config)?;
            let (editor, dims) = open_editor(&RustBackend::new(), &config, &args)?;
            output::print_fit_output(dims, &editor);
        }
        Command::Crop {
            image,
            output: out,
            drags,
        } => {
            let config = config::load_config(&cli.config)?;
            let backend = RustBackend::new();
            let (mut editor, _) = open_editor(&backend, &config, &image)?;

            let steps: Vec<DragStep> = drags
                .iter()
                .map(|d| DragStep {
                    handle: d.handle,
                    dx: d.dx,
                    dy: d.dy,
                    region: editor.apply_drag(d.handle, d.dx, d.dy),
                })
                .collect();

            let pixels = imaging::export_crop(&backend, &editor, &image.image, &out)?;
            output::print_crop_output(&editor, &steps, &pixels, &out);
        }
        Command::Tag {
            image,
            taps,
            product,
            json,
        } => {
            let config = config::load_config(&cli.config)?;
            let (editor, _) = open_editor(&RustBackend::new(), &config, &image)?;
            let layout = editor
                .layout()
                .ok_or("container has no area; nothing can be tapped")?;

            let mut board = TagBoard::new(&config.tags);
            for tap in taps {
                board.tap(tap, &layout)?;
                board.complete(ProductData::from(&product))?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(board.dots())?);
            } else {
                output::print_tags(&board, &layout);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Build an editor for `args.container` and load the photo into it.
fn open_editor(
    backend: &RustBackend,
    config: &EngineConfig,
    args: &ImageArgs,
) -> Result<(CropEditor, ImageDimensions), OperationError> {
    let mut editor = CropEditor::new(&config.crop);
    editor.set_container(args.container);
    let dims = imaging::load_image(backend, &mut editor, &args.image)?;
    Ok((editor, dims))
}

/// Parse two numbers separated by `sep`.
fn parse_pair(s: &str, sep: char) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(sep)
        .ok_or_else(|| format!("expected two numbers separated by '{sep}', got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| format!("'{v}' is not a number"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (width, height) = parse_pair(s, 'x')?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("container size cannot be negative: '{s}'"));
    }
    Ok(Size::new(width, height))
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = parse_pair(s, ',')?;
    Ok(Point::new(x, y))
}

fn parse_drag(s: &str) -> Result<Drag, String> {
    let (handle, delta) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HANDLE:DX,DY, got '{s}'"))?;
    let handle = handle.parse::<Handle>().map_err(|e| e.to_string())?;
    let (dx, dy) = parse_pair(delta, ',')?;
    Ok(Drag { handle, dx, dy })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_container_size() {
        assert_eq!(parse_size("390x844").unwrap(), Size::new(390.0, 844.0));
        assert_eq!(parse_size("0x0").unwrap(), Size::new(0.0, 0.0));
        assert!(parse_size("390").is_err());
        assert!(parse_size("-1x10").is_err());
    }

    #[test]
    fn parses_tap_point() {
        assert_eq!(parse_point("200, 400.5").unwrap(), Point::new(200.0, 400.5));
        assert!(parse_point("200;400").is_err());
        assert!(parse_point("nan,1").is_err());
    }

    #[test]
    fn parses_drag_gesture() {
        assert_eq!(
            parse_drag("bottom-right:40,-80").unwrap(),
            Drag {
                handle: Handle::BottomRight,
                dx: 40.0,
                dy: -80.0
            }
        );
        assert_eq!(parse_drag("move:-20,0").unwrap().handle, Handle::Move);
        assert!(parse_drag("sideways:1,1").is_err());
        assert!(parse_drag("left").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
