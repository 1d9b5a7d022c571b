//! glyphcell - render text into terminal-style glyph cells
//!
//! Renders each character of TEXT through the font fallback chain and writes
//! the resulting strip as a PNG (or prints a coverage preview).

use anyhow::{anyhow, bail, Context, Result};
use glyphcell::config::{Config, EngineKind};
use glyphcell::font::fontconfig::{resolve_font_chain, system_font_chain};
use glyphcell::utils::{argb_channels, parse_hex_color_argb};
use glyphcell::{CellRenderer, FontEngine, FontRegistry, FontdueEngine, FreeTypeEngine, LineImage};
use log::info;
use std::path::{Path, PathBuf};

/// Preview ramp from background to foreground
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Parsed command line
#[derive(Debug, Default)]
struct CliOptions {
    text: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    fonts: Vec<String>,
    engine: Option<EngineKind>,
    fg: Option<u32>,
    bg: Option<u32>,
    ascii: bool,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut text: Vec<&str> = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            // Accept both "--opt value" and "--opt=value"
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
                _ => (arg.as_str(), None),
            };
            match flag {
                "-o" | "--output" => {
                    opts.output = Some(take_value(flag, &inline, &mut iter)?.into());
                }
                "-c" | "--config" => {
                    opts.config = Some(take_value(flag, &inline, &mut iter)?.into());
                }
                "--font" => opts.fonts.push(take_value(flag, &inline, &mut iter)?),
                "--engine" => {
                    let v = take_value(flag, &inline, &mut iter)?;
                    let kind =
                        EngineKind::from_str(&v).ok_or_else(|| anyhow!("unknown engine: {}", v))?;
                    opts.engine = Some(kind);
                }
                "--fg" => {
                    opts.fg = Some(parse_color_arg(&take_value(flag, &inline, &mut iter)?)?);
                }
                "--bg" => {
                    opts.bg = Some(parse_color_arg(&take_value(flag, &inline, &mut iter)?)?);
                }
                "--ascii" => opts.ascii = true,
                "--" => text.extend(iter.by_ref().map(String::as_str)),
                f if f.starts_with('-') && f.len() > 1 => bail!("unknown option: {}", f),
                _ => text.push(arg.as_str()),
            }
        }

        if text.is_empty() {
            bail!("no TEXT given (see --help)");
        }
        opts.text = text.join(" ");
        Ok(opts)
    }
}

/// Value of an option: inline (`--opt=v`) or the next argument
fn take_value<'a>(
    flag: &str,
    inline: &Option<String>,
    rest: &mut impl Iterator<Item = &'a String>,
) -> Result<String> {
    match inline {
        Some(v) => Ok(v.clone()),
        None => rest
            .next()
            .cloned()
            .ok_or_else(|| anyhow!("{} requires a value", flag)),
    }
}

fn parse_color_arg(s: &str) -> Result<u32> {
    parse_hex_color_argb(s).ok_or_else(|| anyhow!("invalid color: {}", s))
}

/// Print help message
fn print_help() {
    println!(
        r#"glyphcell {} - render text into fixed-size glyph cells

USAGE:
    glyphcell [OPTIONS] TEXT

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -o, --output FILE       PNG output path (default: glyphcell.png)
    -c, --config FILE       Config file (default: ~/.config/glyphcell/config.toml)
    --font PATH|FAMILY      Font chain entry; repeat for fallbacks (overrides config)
    --engine NAME           Rasterizer: freetype | fontdue
    --fg HEX                Foreground color (RRGGBB or AARRGGBB)
    --bg HEX                Background color (RRGGBB or AARRGGBB)
    --ascii                 Print a text preview instead of writing PNG

EXAMPLES:
    glyphcell "Hello 世界"
    glyphcell --font ~/.fonts/Hack.ttf --font "Noto Sans CJK JP" -o out.png "a日b"
    glyphcell --ascii --fg ffcc00 A

ENVIRONMENT:
    GLYPHCELL_CONFIG        Config file path
    RUST_LOG                Log filter (default: warn)
"#,
        env!("CARGO_PKG_VERSION")
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("glyphcell {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let opts = CliOptions::parse(&args[1..])?;

    let config = match &opts.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(),
    };

    let specifiers = if opts.fonts.is_empty() {
        &config.font.chain
    } else {
        &opts.fonts
    };
    let chain = if specifiers.is_empty() {
        system_font_chain()
    } else {
        resolve_font_chain(specifiers)
    };

    match opts.engine.unwrap_or(config.font.engine) {
        EngineKind::FreeType => run(FreeTypeEngine::new()?, &chain, &config, &opts),
        EngineKind::Fontdue => run(FontdueEngine::new(), &chain, &config, &opts),
    }
}

/// Load the chain, render the text, emit the result
fn run<E: FontEngine>(
    engine: E,
    chain: &[PathBuf],
    config: &Config,
    opts: &CliOptions,
) -> Result<()> {
    let registry = FontRegistry::init(engine, chain, config.font.pixel_height);
    if registry.is_empty() {
        bail!("no usable fonts (configure [font].chain or pass --font)");
    }
    info!(
        "{} font(s) loaded at {}px via {}",
        registry.len(),
        registry.pixel_height(),
        registry.engine().name()
    );

    let fg = opts.fg.unwrap_or_else(|| config.colors.foreground_argb());
    let bg = opts.bg.unwrap_or_else(|| config.colors.background_argb());
    let geometry = config.cell.geometry();

    let renderer = CellRenderer::new(&registry);
    let line = renderer.render_line(&opts.text, fg, bg, &geometry)?;
    info!(
        "Rendered {} chars into {}x{}",
        line.advances.len(),
        line.width,
        line.height
    );

    if opts.ascii {
        print!("{}", ascii_preview(&line, fg, bg));
    } else {
        let path = opts
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("glyphcell.png"));
        write_png(&path, &line)?;
        println!("{} ({}x{})", path.display(), line.width, line.height);
    }

    registry.teardown();
    Ok(())
}

/// Save strip as PNG
fn write_png(path: &Path, line: &LineImage) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = png::Encoder::new(
        std::io::BufWriter::new(file),
        line.width as u32,
        line.height as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&line.to_rgba_bytes())?;
    Ok(())
}

/// Text rendering of the strip: darkest ramp char = background
fn ascii_preview(line: &LineImage, fg: u32, bg: u32) -> String {
    let (_, fr, fgc, fb) = argb_channels(fg);
    let (_, br, bgc, bb) = argb_channels(bg);
    // Channel with the largest fg/bg contrast carries the coverage estimate
    let span = [
        (fr as i32 - br as i32).abs(),
        (fgc as i32 - bgc as i32).abs(),
        (fb as i32 - bb as i32).abs(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
    .max(1);

    let mut out = String::with_capacity((line.width + 1) * line.height);
    for y in 0..line.height {
        for &p in &line.pixels[y * line.width..(y + 1) * line.width] {
            let (_, r, g, b) = argb_channels(p);
            let dist = [
                (r as i32 - br as i32).abs(),
                (g as i32 - bgc as i32).abs(),
                (b as i32 - bb as i32).abs(),
            ]
            .into_iter()
            .max()
            .unwrap_or(0);
            let level = (dist * (ASCII_RAMP.len() as i32 - 1) / span) as usize;
            out.push(ASCII_RAMP[level.min(ASCII_RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let opts = CliOptions::parse(&args(&[
            "--font",
            "a.ttf",
            "--font=Noto Sans CJK JP",
            "-o",
            "out.png",
            "--engine=fontdue",
            "--fg",
            "ff0000",
            "hello",
            "world",
        ]))
        .unwrap();
        assert_eq!(opts.fonts, vec!["a.ttf", "Noto Sans CJK JP"]);
        assert_eq!(opts.output, Some(PathBuf::from("out.png")));
        assert_eq!(opts.engine, Some(EngineKind::Fontdue));
        assert_eq!(opts.fg, Some(0xFFFF_0000));
        assert_eq!(opts.bg, None);
        assert_eq!(opts.text, "hello world");
    }

    #[test]
    fn test_parse_errors() {
        assert!(CliOptions::parse(&args(&[])).is_err());
        assert!(CliOptions::parse(&args(&["--bogus", "x"])).is_err());
        assert!(CliOptions::parse(&args(&["x", "--font"])).is_err());
        assert!(CliOptions::parse(&args(&["--fg", "zz", "x"])).is_err());
    }

    #[test]
    fn test_double_dash_text() {
        let opts = CliOptions::parse(&args(&["--", "-", "--ascii"])).unwrap();
        assert_eq!(opts.text, "- --ascii");
        assert!(!opts.ascii);
    }

    #[test]
    fn test_ascii_preview() {
        let line = LineImage {
            pixels: vec![0xFF00_0000, 0xFF80_8080, 0xFFFF_FFFF],
            width: 3,
            height: 1,
            advances: vec![3],
        };
        assert_eq!(ascii_preview(&line, 0xFFFF_FFFF, 0xFF00_0000), " =@\n");
    }
}
