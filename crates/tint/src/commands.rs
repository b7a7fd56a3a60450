//! Command execution.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::json;
use tincture::theme::DETERMINISTIC_SOURCE;
use tincture::{
    Color, ColorInput, Compliance, ExportFormat, GenerationRequest, InputType, MemoryThemeStore,
    Theme, ThemeService, WcagGrade, WcagLevel, adjust_for_contrast, component_css,
    contrast_ratio, format_ratio, render_all, select_diverse_palette, themes_from_extracted,
};
use tracing::{info, warn};

use crate::cli::{Cli, Command, ContrastArgs, EnsureArgs, ExtractArgs, GenerateArgs, OutputArgs};
use crate::config::Config;

/// Run the parsed command, writing results to `out`.
///
/// # Errors
/// Returns an error for invalid colors, failed exports or unwritable output
/// files.
pub fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::Generate(args) => generate(args, config, out),
        Command::Contrast(args) => contrast(args, config, out),
        Command::Ensure(args) => ensure(args, config, out),
        Command::Extract(args) => extract(args, config, out),
    }
}

fn parse_color(value: &str) -> Result<Color> {
    Color::parse(value).with_context(|| format!("invalid color '{value}'"))
}

fn generate<W: Write>(args: &GenerateArgs, config: &Config, out: &mut W) -> Result<()> {
    let input = ColorInput {
        primary: args.primary.clone(),
        secondary: args.secondary.clone(),
        accent: args.accent.clone(),
    };

    let service = ThemeService::new(MemoryThemeStore::new());
    let generation = service
        .generate(&GenerationRequest::colors(input))
        .context("failed to generate themes")?;

    info!(
        tint.primary = %args.primary,
        tint.generated_by = %generation.generated_by,
        "Generated theme set"
    );
    emit(&generation.themes, &args.output, config, out)
}

fn extract<W: Write>(args: &ExtractArgs, config: &Config, out: &mut W) -> Result<()> {
    let colors = args
        .colors
        .iter()
        .map(|value| parse_color(value))
        .collect::<Result<Vec<_>>>()?;

    let palette = select_diverse_palette(&colors, args.count);
    if palette.is_empty() {
        bail!("no usable colors: every color is too light, too dark or a near duplicate");
    }

    let provenance = json!({
        "extractedColors": palette.iter().map(Color::to_hex).collect::<Vec<_>>(),
        "generatedBy": DETERMINISTIC_SOURCE,
    });
    let themes: Vec<Theme> = themes_from_extracted(&palette)
        .into_iter()
        .map(|draft| Theme::new(draft.into_new_theme(InputType::Image, provenance.clone())))
        .collect();

    info!(
        tint.candidates = colors.len(),
        tint.palette = palette.len(),
        tint.themes = themes.len(),
        "Built themes from extracted colors"
    );
    emit(&themes, &args.output, config, out)
}

fn emit<W: Write>(
    themes: &[Theme],
    args: &OutputArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let format = args.format.map_or(config.format, ExportFormat::from);

    let mut rendered = render_all(themes, format).context("failed to render themes")?;
    if args.components {
        if format == ExportFormat::Css {
            rendered.push_str("\n\n");
            rendered.push_str(&component_css().stylesheet());
        } else {
            warn!(tint.format = %format, "--components only applies to css output");
        }
    }
    rendered.push('\n');

    match args.output.as_deref().or(config.output.as_deref()) {
        Some(path) => write_file(path, &rendered),
        None => {
            out.write_all(rendered.as_bytes())?;
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(tint.output = %path.display(), "Wrote themes");
    Ok(())
}

fn contrast<W: Write>(args: &ContrastArgs, config: &Config, out: &mut W) -> Result<()> {
    let first = parse_color(&args.first)?;
    let second = parse_color(&args.second)?;
    let level = args.level.map_or(config.level, WcagLevel::from);

    let ratio = contrast_ratio(&first, &second);
    writeln!(out, "Contrast:   {}", format_ratio(ratio))?;
    writeln!(out, "Grade:      {}", WcagGrade::for_ratio(ratio))?;
    writeln!(out, "{:<12}{}", format!("{level}:"), Compliance::evaluate(ratio, level))?;
    Ok(())
}

fn ensure<W: Write>(args: &EnsureArgs, config: &Config, out: &mut W) -> Result<()> {
    let background = parse_color(&args.background)?;
    let foreground = parse_color(&args.foreground)?;
    let target = args.ratio.unwrap_or(config.target_ratio);
    if !target.is_finite() || target < 1.0 {
        bail!("target ratio must be at least 1.0, got {target}");
    }

    let adjustment = adjust_for_contrast(&background, &foreground, target);
    writeln!(out, "{}", adjustment.color)?;
    writeln!(
        out,
        "Contrast:   {} (target {}, {} steps)",
        format_ratio(adjustment.ratio),
        format_ratio(target),
        adjustment.steps
    )?;
    if !adjustment.met {
        writeln!(out, "Target not reached; this is the closest color found.")?;
    }
    Ok(())
}
