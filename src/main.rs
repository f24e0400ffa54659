use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use xpost_preview::{
    ContentRecord, Error, RenderFormat, RenderOptions, RenderPayload, Theme, WidthMode, render_to_writer,
};

/// X投稿プレビュー生成CLI
#[derive(Parser, Debug)]
#[command(name = "xpostgen", version, about = "Render an X (Twitter) post preview card")]
struct Cli {
    /// Post body (required unless --payload is given)
    #[arg(long)]
    text: Option<String>,
    /// Avatar image: local path, http(s) URL or data: URI
    #[arg(long)]
    icon: Option<String>,
    /// Display name
    #[arg(long)]
    name: Option<String>,
    /// Handle, with or without the leading @
    #[arg(long = "id")]
    handle: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Call-to-action label (empty hides the button)
    #[arg(long, default_value = "Explore what's happening on Twitter")]
    cta: String,
    /// Hide the call-to-action button
    #[arg(long)]
    no_cta: bool,
    /// Show the verified badge
    #[arg(long)]
    verified: bool,
    /// Compact card without the footer
    #[arg(long)]
    simple: bool,
    #[arg(long, default_value = "0")]
    like_count: String,

    /// Output path, `-` for stdout
    #[arg(long, short, default_value = "tweet.png")]
    output: PathBuf,
    /// png | jpg | jpeg | gif | svg | html (default: from the output extension)
    #[arg(long)]
    format: Option<String>,
    /// Canvas width in px
    #[arg(long)]
    width: Option<i32>,
    /// fixed | tight
    #[arg(long)]
    width_mode: Option<String>,
    #[arg(long)]
    padding: Option<i32>,
    /// light | dark
    #[arg(long, default_value = "light")]
    theme: String,
    /// Regular font (.ttf/.otf)
    #[arg(long)]
    font: Option<PathBuf>,
    /// Bold font (.ttf/.otf)
    #[arg(long)]
    font_bold: Option<PathBuf>,
    /// font-family for the SVG and HTML outputs
    #[arg(long)]
    font_family: Option<String>,
    /// BudouX-format phrase-break model (JSON) for CJK wrapping
    #[arg(long)]
    segment_model: Option<PathBuf>,

    /// Read the post from a JSON payload file (`-` for stdin)
    #[arg(long)]
    payload: Option<PathBuf>,
}

/// Problems with the invocation itself
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct UsageError(String);

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if is_usage_error(&e) {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn is_usage_error(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause.is::<UsageError>()
            || matches!(
                cause.downcast_ref::<Error>(),
                Some(Error::MissingRequiredField(_) | Error::UnsupportedFormat(_) | Error::InvalidPayload(_))
            )
    })
}

fn run(cli: Cli) -> Result<()> {
    let format = output_format(&cli)?;
    let (content, options) = render_input(&cli)?;

    // 全部描けてから書き出す
    let mut rendered = Vec::new();
    render_to_writer(&mut rendered, &content, &options, format)?;

    write_output(&cli.output, &rendered)?;
    if cli.output != Path::new("-") {
        info!("wrote {} ({format}, {} bytes)", cli.output.display(), rendered.len());
    }
    Ok(())
}

/// --format, then the output extension, then png
fn output_format(cli: &Cli) -> Result<RenderFormat> {
    match cli.format.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(name) => Ok(name.parse()?),
        None => Ok(RenderFormat::from_path(&cli.output).unwrap_or_default()),
    }
}

fn render_input(cli: &Cli) -> Result<(ContentRecord, RenderOptions)> {
    let (content, mut options) = match &cli.payload {
        Some(path) => {
            let json = read_payload(path)?;
            RenderPayload::from_json(&json)?.into_render_input()?
        }
        None => (content_from_flags(cli)?, RenderOptions::default()),
    };

    options.theme = Theme::by_name(&cli.theme)
        .ok_or_else(|| UsageError(format!("unknown theme: {} (light|dark)", cli.theme)))?;
    if let Some(width) = cli.width {
        options.width = width;
    }
    if let Some(mode) = &cli.width_mode {
        options.width_mode = WidthMode::from_name(mode);
    }
    if let Some(padding) = cli.padding {
        options.padding = padding;
    }
    if let Some(family) = &cli.font_family {
        options.font_family = family.clone();
    }
    options.font_path = cli.font.clone();
    options.bold_font_path = cli.font_bold.clone();
    options.segment_model = cli.segment_model.clone();

    Ok((content, options))
}

fn content_from_flags(cli: &Cli) -> Result<ContentRecord> {
    let required = |value: &Option<String>, flag: &str| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| UsageError(format!("--{flag} is required (required: --text, --name, --id)")))
    };

    let content = ContentRecord {
        text: required(&cli.text, "text")?,
        name: required(&cli.name, "name")?,
        handle: required(&cli.handle, "id")?,
        avatar: cli.icon.clone(),
        date: cli.date.clone(),
        location: cli.location.clone(),
        cta: (!cli.no_cta).then(|| cli.cta.clone()),
        verified: cli.verified,
        simple: cli.simple,
        like_count: cli.like_count.clone(),
    };
    Ok(content)
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("failed to read payload from stdin");
    }
    fs::read_to_string(path).with_context(|| format!("failed to read payload {}", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes).context("failed to write to stdout")?;
        return stdout.flush().context("failed to write to stdout");
    }

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("xpostgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_build_the_content() {
        let cli = parse(&["--text", "Hello", "--name", "Ann Lee", "--id", "annlee", "--verified"]);
        let (content, options) = render_input(&cli).unwrap();
        assert_eq!(content.handle, "annlee");
        assert!(content.verified);
        assert_eq!(content.cta.as_deref(), Some("Explore what's happening on Twitter"));
        assert_eq!(content.like_count, "0");
        assert_eq!(options.width, 960);
        assert_eq!(output_format(&cli).unwrap(), RenderFormat::Png);
    }

    #[test]
    fn no_cta_and_style_flags() {
        let cli = parse(&[
            "--text", "t", "--name", "n", "--id", "i", "--no-cta", "--theme", "dark",
            "--width", "700", "--width-mode", "tight", "-o", "out/card.svg",
        ]);
        let (content, options) = render_input(&cli).unwrap();
        assert_eq!(content.cta, None);
        assert_eq!(options.theme, Theme::dark());
        assert_eq!(options.width, 700);
        assert_eq!(options.width_mode, WidthMode::Tight);
        assert_eq!(output_format(&cli).unwrap(), RenderFormat::Svg);
    }

    #[test]
    fn segment_model_flag_reaches_the_options() {
        let cli = parse(&["--text", "t", "--name", "n", "--id", "i", "--segment-model", "models/ja.json"]);
        let (_, options) = render_input(&cli).unwrap();
        assert_eq!(options.segment_model, Some(PathBuf::from("models/ja.json")));
    }

    #[test]
    fn usage_errors_are_classified() {
        let missing = render_input(&parse(&["--text", "t", "--name", "n"])).unwrap_err();
        assert!(is_usage_error(&missing));
        assert_eq!(missing.to_string(), "--id is required (required: --text, --name, --id)");

        let theme = render_input(&parse(&["--text", "t", "--name", "n", "--id", "i", "--theme", "sepia"]))
            .unwrap_err();
        assert!(is_usage_error(&theme));

        let format = output_format(&parse(&["--format", "bmp"])).unwrap_err();
        assert!(is_usage_error(&format));

        let io = anyhow::Error::from(Error::AvatarFetchFailed("x".into()));
        assert!(!is_usage_error(&io));
    }

    #[test]
    fn explicit_format_beats_the_extension() {
        let cli = parse(&["--format", "JPG", "-o", "card.png"]);
        assert_eq!(output_format(&cli).unwrap(), RenderFormat::Jpeg);
        let cli = parse(&["-o", "card.unknown"]);
        assert_eq!(output_format(&cli).unwrap(), RenderFormat::Png);
    }
}
